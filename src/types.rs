//! Static parameter types.
//!
//! A [`ParamType`] is what the harness knows about a parameter before any
//! values exist. Numeric domains are a closed set of [`NumericKind`] tags so the
//! resolver can match a range declaration to its parameter without reflection.

use std::fmt;

use crate::value::EnumMember;

/// One tag per domain a range can be declared over: every integer width and
/// signedness, the float kinds, arbitrary-precision integers and decimals, and
/// `char` stepped by scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F16,
    F32,
    F64,
    BigInt,
    Decimal,
    Char,
}

impl NumericKind {
    pub const ALL: [NumericKind; 18] = [
        NumericKind::I8,
        NumericKind::I16,
        NumericKind::I32,
        NumericKind::I64,
        NumericKind::I128,
        NumericKind::Isize,
        NumericKind::U8,
        NumericKind::U16,
        NumericKind::U32,
        NumericKind::U64,
        NumericKind::U128,
        NumericKind::Usize,
        NumericKind::F16,
        NumericKind::F32,
        NumericKind::F64,
        NumericKind::BigInt,
        NumericKind::Decimal,
        NumericKind::Char,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NumericKind::I8 => "i8",
            NumericKind::I16 => "i16",
            NumericKind::I32 => "i32",
            NumericKind::I64 => "i64",
            NumericKind::I128 => "i128",
            NumericKind::Isize => "isize",
            NumericKind::U8 => "u8",
            NumericKind::U16 => "u16",
            NumericKind::U32 => "u32",
            NumericKind::U64 => "u64",
            NumericKind::U128 => "u128",
            NumericKind::Usize => "usize",
            NumericKind::F16 => "f16",
            NumericKind::F32 => "f32",
            NumericKind::F64 => "f64",
            NumericKind::BigInt => "bigint",
            NumericKind::Decimal => "decimal",
            NumericKind::Char => "char",
        }
    }

    /// Looks a kind up by the name returned from [`NumericKind::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An enumeration type: a name plus its members in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    name: String,
    members: Vec<(String, i64)>,
}

impl EnumType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Builds an enum whose members take their position as underlying value.
    pub fn from_names<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ty = Self::new(name);
        for (index, member) in members.into_iter().enumerate() {
            ty.members.push((member.into(), index as i64));
        }
        ty
    }

    pub fn with_member(mut self, name: impl Into<String>, value: i64) -> Self {
        self.members.push((name.into(), value));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = EnumMember> + '_ {
        self.members
            .iter()
            .map(|(member, value)| EnumMember::new(self.name.clone(), member.clone(), *value))
    }

    pub fn member_named(&self, name: &str) -> Option<EnumMember> {
        self.members().find(|member| member.name == name)
    }

    /// First member declared with the given underlying value.
    pub fn member_with_value(&self, value: i64) -> Option<EnumMember> {
        self.members().find(|member| member.value == value)
    }
}

/// The static declared type of a test parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Bool,
    Char,
    String,
    Numeric(NumericKind),
    Enum(EnumType),
    Nullable(Box<ParamType>),
    /// Any type this crate has no knowledge of, identified by name.
    Other(String),
}

impl ParamType {
    pub fn nullable(inner: ParamType) -> Self {
        ParamType::Nullable(Box::new(inner))
    }

    /// The range kind, if this is exactly a numeric or `char` type (not a nullable one).
    pub fn numeric_kind(&self) -> Option<NumericKind> {
        match self {
            ParamType::Numeric(kind) => Some(*kind),
            ParamType::Char => Some(NumericKind::Char),
            _ => None,
        }
    }
}

impl From<NumericKind> for ParamType {
    fn from(kind: NumericKind) -> Self {
        match kind {
            NumericKind::Char => ParamType::Char,
            kind => ParamType::Numeric(kind),
        }
    }
}

impl From<EnumType> for ParamType {
    fn from(ty: EnumType) -> Self {
        ParamType::Enum(ty)
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Bool => write!(f, "bool"),
            ParamType::Char => write!(f, "char"),
            ParamType::String => write!(f, "string"),
            ParamType::Numeric(kind) => write!(f, "{kind}"),
            ParamType::Enum(ty) => write!(f, "{}", ty.name()),
            ParamType::Nullable(inner) => write!(f, "{inner}?"),
            ParamType::Other(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip() {
        for kind in NumericKind::ALL {
            assert_eq!(NumericKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(NumericKind::from_name("f128"), None);
    }

    #[test]
    fn nullable_is_not_numeric() {
        assert_eq!(ParamType::Numeric(NumericKind::U8).numeric_kind(), Some(NumericKind::U8));
        assert_eq!(ParamType::nullable(NumericKind::U8.into()).numeric_kind(), None);
        assert_eq!(ParamType::nullable(NumericKind::U8.into()).to_string(), "u8?");
    }

    #[test]
    fn char_is_a_range_kind() {
        assert_eq!(ParamType::from(NumericKind::Char), ParamType::Char);
        assert_eq!(ParamType::Char.numeric_kind(), Some(NumericKind::Char));
        assert_eq!(ParamType::Bool.numeric_kind(), None);
    }

    #[test]
    fn enum_members_keep_declaration_order() {
        let ty = EnumType::new("Color").with_member("Red", 4).with_member("Blue", 1);
        let names: Vec<_> = ty.members().map(|m| m.name).collect();
        assert_eq!(names, ["Red", "Blue"]);
        assert_eq!(ty.member_with_value(1).map(|m| m.name), Some("Blue".to_string()));
    }
}
