use half::f16;
use num_bigint::BigInt;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;

/// A single candidate value for a test parameter.
///
/// Values are dynamically typed: explicit value lists may mix kinds, and
/// `Null` is a legitimate entry wherever absence of a value should be tested.
///
/// # Examples
///
/// ```rust
/// use combinatorial::Value;
/// let n = Value::from(3u32);
/// assert_eq!(n.type_name(), "u32");
/// let nil = Value::default();
/// assert!(nil.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),
    F16(#[serde(serialize_with = "serialize_f16")] f16),
    F32(f32),
    F64(f64),
    BigInt(#[serde(serialize_with = "serialize_display")] BigInt),
    Decimal(#[serde(serialize_with = "serialize_display")] Decimal),
    Char(char),
    String(String),
    Enum(EnumMember),
}

/// A named member of an enumeration type, carrying its underlying value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumMember {
    pub type_name: String,
    pub name: String,
    pub value: i64,
}

impl EnumMember {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>, value: i64) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            value,
        }
    }
}

impl fmt::Display for EnumMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// Members serialize as their bare name, matching how they are written in plan files.
impl Serialize for EnumMember {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

fn serialize_f16<S: Serializer>(value: &f16, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f32(value.to_f32())
}

fn serialize_display<T: fmt::Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

impl Value {
    /// Returns the type name of the value as a string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use combinatorial::Value;
    /// assert_eq!(Value::Bool(true).type_name(), "bool");
    /// assert_eq!(Value::Null.type_name(), "null");
    /// ```
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::I128(_) => "i128",
            Value::Isize(_) => "isize",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::U128(_) => "u128",
            Value::Usize(_) => "usize",
            Value::F16(_) => "f16",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::BigInt(_) => "bigint",
            Value::Decimal(_) => "decimal",
            Value::Char(_) => "char",
            Value::String(_) => "string",
            Value::Enum(_) => "enum",
        }
    }

    /// Returns true if the value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::I8(n) => write!(f, "{n}"),
            Value::I16(n) => write!(f, "{n}"),
            Value::I32(n) => write!(f, "{n}"),
            Value::I64(n) => write!(f, "{n}"),
            Value::I128(n) => write!(f, "{n}"),
            Value::Isize(n) => write!(f, "{n}"),
            Value::U8(n) => write!(f, "{n}"),
            Value::U16(n) => write!(f, "{n}"),
            Value::U32(n) => write!(f, "{n}"),
            Value::U64(n) => write!(f, "{n}"),
            Value::U128(n) => write!(f, "{n}"),
            Value::Usize(n) => write!(f, "{n}"),
            Value::F16(n) => write!(f, "{n}"),
            Value::F32(n) => write!(f, "{n}"),
            Value::F64(n) => write!(f, "{n}"),
            Value::BigInt(n) => write!(f, "{n}"),
            Value::Decimal(n) => write!(f, "{n}"),
            Value::Char(c) => write!(f, "{c:?}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Enum(member) => write!(f, "{member}"),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from_primitive! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f16 => F16,
    f32 => F32,
    f64 => F64,
    BigInt => BigInt,
    Decimal => Decimal,
    char => Char,
    String => String,
    EnumMember => Enum,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_none_becomes_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(4i32)), Value::I32(4));
    }

    #[test]
    fn display_quotes_strings_but_not_enum_members() {
        assert_eq!(Value::from("a").to_string(), "\"a\"");
        assert_eq!(Value::Enum(EnumMember::new("Mode", "Fast", 0)).to_string(), "Fast");
    }

    #[test]
    fn serializes_as_plain_json() {
        let values = vec![
            Value::Null,
            Value::U128(u128::MAX),
            Value::BigInt(BigInt::from(-12)),
            Value::Decimal(Decimal::new(125, 2)),
            Value::F16(f16::from_f32(0.5)),
            Value::Enum(EnumMember::new("Mode", "Slow", 1)),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,340282366920938463463374607431768211455,"-12","1.25",0.5,"Slow"]"#);
    }
}
