//! # Value Resolution
//!
//! Resolves one [`Parameter`] to its candidate values. When several sources are
//! declared, the first match in this order wins, independent of the order they
//! were attached in:
//!
//! 1. explicit values;
//! 2. a range typed to exactly the parameter's numeric kind;
//! 3. random data;
//! 4. member data;
//! 5. default enumeration of the parameter's type.
//!
//! Default enumeration covers `bool`, the full `i32` domain, enums, and nullable
//! wrappers over those. The `i32` domain is produced lazily; consumers bound
//! their own iteration.

use std::fmt;
use std::iter;
use std::sync::Arc;

use dyn_clone::DynClone;

use crate::parameter::Parameter;
use crate::types::{NumericKind, ParamType};
use crate::value::Value;
use crate::CombinatorialError;

/// A cloneable, thread-safe iterator of values.
pub trait ValueIter: Iterator<Item = Value> + DynClone + Send + Sync {}

impl<I> ValueIter for I where I: Iterator<Item = Value> + Clone + Send + Sync {}

dyn_clone::clone_trait_object!(ValueIter);

/// Which declaration a parameter's values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Values,
    Range(NumericKind),
    RandomData,
    MemberData,
    Default,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Values => write!(f, "values"),
            SourceKind::Range(kind) => write!(f, "range<{kind}>"),
            SourceKind::RandomData => write!(f, "random"),
            SourceKind::MemberData => write!(f, "member"),
            SourceKind::Default => write!(f, "default"),
        }
    }
}

/// The ordered candidate values of one parameter.
///
/// Cloning a sequence restarts nothing: the clone continues from the same
/// position, which is what the Cartesian product relies on.
#[derive(Clone)]
pub struct ValueSequence {
    source: SourceKind,
    inner: Box<dyn ValueIter>,
}

impl ValueSequence {
    pub fn new(source: SourceKind, inner: impl ValueIter + 'static) -> Self {
        Self {
            source,
            inner: Box::new(inner),
        }
    }

    fn from_shared(source: SourceKind, values: Arc<[Value]>) -> Self {
        let len = values.len();
        Self::new(source, (0..len).map(move |index| values[index].clone()))
    }

    /// Which declaration produced these values.
    pub fn source(&self) -> SourceKind {
        self.source
    }
}

impl Iterator for ValueSequence {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl fmt::Debug for ValueSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueSequence")
            .field("source", &self.source)
            .field("size_hint", &self.inner.size_hint())
            .finish()
    }
}

/// Resolves the candidate values of `parameter`.
pub fn resolve_values(parameter: &Parameter) -> Result<ValueSequence, CombinatorialError> {
    let name = parameter.name();

    if let Some(values) = parameter.explicit_values() {
        tracing::debug!(parameter = name, count = values.len(), "using explicit values");
        return Ok(ValueSequence::from_shared(SourceKind::Values, Arc::clone(values)));
    }

    if let Some(kind) = parameter.ty().numeric_kind() {
        if let Some(range) = parameter.ranges().find(|range| range.kind() == kind) {
            tracing::debug!(parameter = name, %kind, "using range");
            return Ok(ValueSequence::new(SourceKind::Range(kind), range.iter()));
        }
    }
    for range in parameter.ranges() {
        tracing::warn!(
            parameter = name,
            declared = %range.kind(),
            ty = %parameter.ty(),
            "ignoring range declared for a different type"
        );
    }

    if let Some(data) = parameter.random_data() {
        tracing::debug!(parameter = name, count = data.values().len(), seed = ?data.seed(), "using random data");
        return Ok(ValueSequence::from_shared(SourceKind::RandomData, Arc::clone(data.values())));
    }

    if let Some(member) = parameter.member_data() {
        tracing::debug!(parameter = name, member = member.name(), "using member data");
        let values: Arc<[Value]> = member.values(parameter)?.into();
        return Ok(ValueSequence::from_shared(SourceKind::MemberData, values));
    }

    tracing::debug!(parameter = name, ty = %parameter.ty(), "using default values");
    default_values(parameter.ty())
}

/// Enumerates every value of `ty` when no source is declared.
///
/// # Examples
///
/// ```rust
/// use combinatorial::{default_values, ParamType, Value};
/// let values: Vec<Value> = default_values(&ParamType::Bool).unwrap().collect();
/// assert_eq!(values, [Value::Bool(true), Value::Bool(false)]);
/// assert!(default_values(&ParamType::String).is_err());
/// ```
pub fn default_values(ty: &ParamType) -> Result<ValueSequence, CombinatorialError> {
    Ok(ValueSequence::new(SourceKind::Default, default_iter(ty)?))
}

fn default_iter(ty: &ParamType) -> Result<Box<dyn ValueIter>, CombinatorialError> {
    let values: Box<dyn ValueIter> = match ty {
        ParamType::Bool => Box::new([true, false].into_iter().map(Value::Bool)),
        ParamType::Numeric(NumericKind::I32) => Box::new((i32::MIN..=i32::MAX).map(Value::I32)),
        ParamType::Enum(enum_type) => {
            let members: Vec<Value> = enum_type.members().map(Value::Enum).collect();
            Box::new(members.into_iter())
        }
        ParamType::Nullable(inner) => Box::new(iter::once(Value::Null).chain(default_iter(inner)?)),
        other => return Err(CombinatorialError::unsupported_type(other.to_string())),
    };
    Ok(values)
}
