//! # Test Plans
//!
//! A plan is a YAML or JSON file declaring the parameters of one test and the
//! value sources attached to each. Loading a plan builds [`Parameter`]s; every
//! range in the plan is validated while the plan is loaded, before any values
//! are resolved.
//!
//! ```yaml
//! name: parse_header
//! parameters:
//!   - name: width
//!     type: u32
//!     range: { from: 0, count: 5 }
//!   - name: mode
//!     type: { enum: { name: Mode, members: [Fast, Slow] } }
//!   - name: label
//!     type: string?
//!     values: [a, b, null]
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use half::f16;
use num_bigint::BigInt;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::parameter::Parameter;
use crate::range::{AnyRange, CombinatorialRange, RangeNumber};
use crate::source::{MemberData, RandomData, RandomDataOptions};
use crate::types::{EnumType, NumericKind, ParamType};
use crate::value::Value;
use crate::{plan_err, CombinatorialError};

// ============================================================================
// FILE MODEL
// ============================================================================

/// A deserialized plan file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestPlan {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
}

/// One parameter entry of a plan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterSpec {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: Option<TypeSpec>,
    pub values: Option<Vec<Option<Literal>>>,
    pub range: Option<RangeSpec>,
    pub random: Option<RandomDataOptions>,
    pub member: Option<String>,
}

/// A parameter type: a type name, or a compound type.
///
/// Names are `bool`, `char`, `string`, or a numeric kind (`i8` .. `u128`,
/// `isize`, `usize`, `f16`, `f32`, `f64`, `bigint`, `decimal`). A trailing `?`
/// makes the type nullable. Any other name is kept as an opaque type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TypeSpec {
    Named(String),
    Compound(CompoundType),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum CompoundType {
    Enum(EnumSpec),
    Nullable(Box<TypeSpec>),
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumSpec {
    pub name: String,
    #[serde(default)]
    pub members: Vec<EnumMemberSpec>,
}

/// An enum member. Members without a value take the previous value plus one,
/// starting from zero.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnumMemberSpec {
    Name(String),
    Valued { name: String, value: i64 },
}

/// A range entry: `from` plus either `count` or `to` and `step`.
///
/// For `char` ranges a one-character string is that character and an integer
/// is a scalar value: `{ from: a, count: 3 }` is `a`, `b`, `c`.
///
/// The range is typed to the parameter's numeric kind unless `kind` names
/// another one, in which case it only applies to parameters of that kind.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeSpec {
    pub kind: Option<String>,
    pub from: Literal,
    pub count: Option<Literal>,
    pub to: Option<Literal>,
    pub step: Option<Literal>,
}

/// A scalar written in a plan file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    String(String),
}

impl Literal {
    fn number_text(&self) -> Option<String> {
        match self {
            Literal::Integer(n) => Some(n.to_string()),
            Literal::Unsigned(n) => Some(n.to_string()),
            Literal::Float(n) => Some(n.to_string()),
            Literal::String(s) => Some(s.trim().to_string()),
            Literal::Bool(_) => None,
        }
    }

    /// The value this literal denotes when the parameter type says nothing more.
    pub fn natural_value(&self) -> Value {
        match self {
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Integer(n) => Value::I64(*n),
            Literal::Unsigned(n) => Value::U64(*n),
            Literal::Float(n) => Value::F64(*n),
            Literal::String(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Integer(n) => write!(f, "{n}"),
            Literal::Unsigned(n) => write!(f, "{n}"),
            Literal::Float(n) => write!(f, "{n}"),
            Literal::String(s) => write!(f, "{s:?}"),
        }
    }
}

// ============================================================================
// MEMBER REGISTRY
// ============================================================================

/// Member data sources a plan may refer to by name.
#[derive(Debug, Clone, Default)]
pub struct MemberRegistry {
    members: HashMap<String, MemberData>,
}

impl MemberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `data` under its own name, replacing any earlier source with that name.
    pub fn register(&mut self, data: MemberData) -> &mut Self {
        self.members.insert(data.name().to_string(), data);
        self
    }

    pub fn get(&self, name: &str) -> Option<&MemberData> {
        self.members.get(name)
    }
}

// ============================================================================
// LOADING
// ============================================================================

impl TestPlan {
    /// Reads a plan file; `.json` files are parsed as JSON, anything else as YAML.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CombinatorialError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| CombinatorialError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        tracing::debug!(path = %path.display(), is_json, "loading plan");
        if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_yaml_str(&source)
        }
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, CombinatorialError> {
        serde_yaml::from_str(source).map_err(|e| plan_err!("invalid YAML plan").with_source(e))
    }

    pub fn from_json_str(source: &str) -> Result<Self, CombinatorialError> {
        serde_json::from_str(source).map_err(|e| plan_err!("invalid JSON plan").with_source(e))
    }

    /// Builds every parameter of the plan, validating its declarations.
    pub fn parameters(&self, members: &MemberRegistry) -> Result<Vec<Parameter>, CombinatorialError> {
        self.parameters
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                spec.to_parameter(members)
                    .map_err(|e| e.with_note(format!("while loading parameter #{}", index + 1)))
            })
            .collect()
    }
}

impl ParameterSpec {
    pub fn to_parameter(&self, members: &MemberRegistry) -> Result<Parameter, CombinatorialError> {
        let name = self
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| CombinatorialError::missing_argument("name"))?;
        let ty = self
            .ty
            .as_ref()
            .ok_or_else(|| CombinatorialError::missing_argument("type"))?
            .to_param_type()?;

        let mut parameter = Parameter::new(name, ty.clone());

        if let Some(values) = &self.values {
            let converted: Vec<Value> = values
                .iter()
                .map(|literal| convert_literal(literal.as_ref(), &ty))
                .collect();
            parameter = parameter.with_values(converted);
        }

        if let Some(range) = &self.range {
            let kind = match &range.kind {
                Some(kind_name) => NumericKind::from_name(kind_name)
                    .ok_or_else(|| plan_err!("unknown numeric kind `{}` in range of `{}`", kind_name, name))?,
                None => ty.numeric_kind().ok_or_else(|| {
                    plan_err!(
                        "parameter `{}` of type `{}` cannot take a range without an explicit `kind`",
                        name,
                        ty
                    )
                })?,
            };
            parameter = parameter.with_range(build_range(kind, range)?);
        }

        if let Some(options) = self.random {
            parameter = parameter.with_random_data(RandomData::generate(options)?);
        }

        if let Some(member) = &self.member {
            let data = members
                .get(member)
                .ok_or_else(|| plan_err!("no member data source named `{}`", member))?;
            parameter = parameter.with_member_data(data.clone());
        }

        Ok(parameter)
    }
}

impl TypeSpec {
    pub fn to_param_type(&self) -> Result<ParamType, CombinatorialError> {
        match self {
            TypeSpec::Named(name) => Ok(named_type(name.trim())),
            TypeSpec::Compound(CompoundType::Nullable(inner)) => Ok(ParamType::nullable(inner.to_param_type()?)),
            TypeSpec::Compound(CompoundType::Other(name)) => Ok(ParamType::Other(name.clone())),
            TypeSpec::Compound(CompoundType::Enum(spec)) => {
                let mut ty = EnumType::new(spec.name.clone());
                let mut next = 0i64;
                for member in &spec.members {
                    let (name, value) = match member {
                        EnumMemberSpec::Name(name) => (name, next),
                        EnumMemberSpec::Valued { name, value } => (name, *value),
                    };
                    if ty.member_named(name).is_some() {
                        return Err(plan_err!("enum `{}` declares `{}` twice", spec.name, name));
                    }
                    ty = ty.with_member(name.clone(), value);
                    next = value.wrapping_add(1);
                }
                Ok(ParamType::Enum(ty))
            }
        }
    }
}

fn named_type(name: &str) -> ParamType {
    if let Some(inner) = name.strip_suffix('?') {
        return ParamType::nullable(named_type(inner));
    }
    match name {
        "bool" => ParamType::Bool,
        "char" => ParamType::Char,
        "string" => ParamType::String,
        other => NumericKind::from_name(other)
            .map(ParamType::from)
            .unwrap_or_else(|| ParamType::Other(other.to_string())),
    }
}

// ============================================================================
// LITERAL CONVERSION
// ============================================================================

/// Reads a plan literal as one range domain.
trait FromLiteral: Sized {
    fn from_literal(literal: &Literal) -> Option<Self>;
}

macro_rules! impl_from_literal {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromLiteral for $t {
                fn from_literal(literal: &Literal) -> Option<Self> {
                    literal.number_text()?.parse().ok()
                }
            }
        )*
    };
}

impl_from_literal!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f16, f32, f64, BigInt, Decimal);

// A string is the character itself; an integer is a scalar value, so
// `count: 3` means three characters rather than the digit '3'.
impl FromLiteral for char {
    fn from_literal(literal: &Literal) -> Option<Self> {
        match literal {
            Literal::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            }
            Literal::Integer(n) => u32::try_from(*n).ok().and_then(char::from_u32),
            Literal::Unsigned(n) => u32::try_from(*n).ok().and_then(char::from_u32),
            Literal::Bool(_) | Literal::Float(_) => None,
        }
    }
}

fn parse_number<T: FromLiteral>(literal: &Literal, kind: NumericKind, argument: &str) -> Result<T, CombinatorialError> {
    T::from_literal(literal).ok_or_else(|| plan_err!("range `{}` value {} is not a valid {}", argument, literal, kind))
}

fn build_typed<T>(kind: NumericKind, spec: &RangeSpec) -> Result<CombinatorialRange<T>, CombinatorialError>
where
    T: RangeNumber + FromLiteral,
{
    let from = parse_number::<T>(&spec.from, kind, "from")?;
    match (&spec.count, &spec.to, &spec.step) {
        (Some(count), None, None) => CombinatorialRange::count(from, parse_number(count, kind, "count")?),
        (None, Some(to), Some(step)) => {
            CombinatorialRange::stepped(from, parse_number(to, kind, "to")?, parse_number(step, kind, "step")?)
        }
        (Some(_), _, _) => Err(plan_err!("a range takes either `count` or `to` and `step`, not both")),
        (None, Some(_), None) => Err(CombinatorialError::missing_argument("step")),
        (None, None, Some(_)) => Err(CombinatorialError::missing_argument("to")),
        (None, None, None) => Err(CombinatorialError::missing_argument("count")),
    }
}

/// Builds a range over `kind` from its plan entry.
pub fn build_range(kind: NumericKind, spec: &RangeSpec) -> Result<AnyRange, CombinatorialError> {
    let range: AnyRange = match kind {
        NumericKind::I8 => build_typed::<i8>(kind, spec)?.into(),
        NumericKind::I16 => build_typed::<i16>(kind, spec)?.into(),
        NumericKind::I32 => build_typed::<i32>(kind, spec)?.into(),
        NumericKind::I64 => build_typed::<i64>(kind, spec)?.into(),
        NumericKind::I128 => build_typed::<i128>(kind, spec)?.into(),
        NumericKind::Isize => build_typed::<isize>(kind, spec)?.into(),
        NumericKind::U8 => build_typed::<u8>(kind, spec)?.into(),
        NumericKind::U16 => build_typed::<u16>(kind, spec)?.into(),
        NumericKind::U32 => build_typed::<u32>(kind, spec)?.into(),
        NumericKind::U64 => build_typed::<u64>(kind, spec)?.into(),
        NumericKind::U128 => build_typed::<u128>(kind, spec)?.into(),
        NumericKind::Usize => build_typed::<usize>(kind, spec)?.into(),
        NumericKind::F16 => build_typed::<f16>(kind, spec)?.into(),
        NumericKind::F32 => build_typed::<f32>(kind, spec)?.into(),
        NumericKind::F64 => build_typed::<f64>(kind, spec)?.into(),
        NumericKind::BigInt => build_typed::<BigInt>(kind, spec)?.into(),
        NumericKind::Decimal => build_typed::<Decimal>(kind, spec)?.into(),
        NumericKind::Char => build_typed::<char>(kind, spec)?.into(),
    };
    Ok(range)
}

fn numeric_value(literal: &Literal, kind: NumericKind) -> Option<Value> {
    match kind {
        NumericKind::I8 => i8::from_literal(literal).map(Value::I8),
        NumericKind::I16 => i16::from_literal(literal).map(Value::I16),
        NumericKind::I32 => i32::from_literal(literal).map(Value::I32),
        NumericKind::I64 => i64::from_literal(literal).map(Value::I64),
        NumericKind::I128 => i128::from_literal(literal).map(Value::I128),
        NumericKind::Isize => isize::from_literal(literal).map(Value::Isize),
        NumericKind::U8 => u8::from_literal(literal).map(Value::U8),
        NumericKind::U16 => u16::from_literal(literal).map(Value::U16),
        NumericKind::U32 => u32::from_literal(literal).map(Value::U32),
        NumericKind::U64 => u64::from_literal(literal).map(Value::U64),
        NumericKind::U128 => u128::from_literal(literal).map(Value::U128),
        NumericKind::Usize => usize::from_literal(literal).map(Value::Usize),
        NumericKind::F16 => f16::from_literal(literal).map(Value::F16),
        NumericKind::F32 => f32::from_literal(literal).map(Value::F32),
        NumericKind::F64 => f64::from_literal(literal).map(Value::F64),
        NumericKind::BigInt => BigInt::from_literal(literal).map(Value::BigInt),
        NumericKind::Decimal => Decimal::from_literal(literal).map(Value::Decimal),
        NumericKind::Char => char::from_literal(literal).map(Value::Char),
    }
}

/// Converts an explicit plan value into the parameter's type where that is
/// unambiguous. Anything else keeps its natural value: explicit lists may be
/// heterogeneous.
fn convert_literal(literal: Option<&Literal>, ty: &ParamType) -> Value {
    let Some(literal) = literal else {
        return Value::Null;
    };
    let converted = match (literal, ty) {
        (_, ParamType::Nullable(inner)) => return convert_literal(Some(literal), inner),
        (_, ParamType::Numeric(kind)) => numeric_value(literal, *kind),
        (Literal::String(name), ParamType::Enum(enum_type)) => enum_type.member_named(name).map(Value::Enum),
        (Literal::Integer(n), ParamType::Enum(enum_type)) => enum_type.member_with_value(*n).map(Value::Enum),
        (Literal::String(_), ParamType::Char) => char::from_literal(literal).map(Value::Char),
        (Literal::Bool(b), ParamType::Bool) => Some(Value::Bool(*b)),
        (Literal::String(s), ParamType::String) => Some(Value::String(s.clone())),
        _ => None,
    };
    converted.unwrap_or_else(|| {
        let natural = literal.natural_value();
        tracing::warn!(
            %literal,
            %ty,
            kept_as = natural.type_name(),
            "explicit value does not match the parameter type; keeping it as written"
        );
        natural
    })
}
