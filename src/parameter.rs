use crate::range::AnyRange;
use crate::source::{MemberData, RandomData, ValueSource};
use crate::types::ParamType;
use crate::value::Value;

/// One formal parameter of a test function: its name, static type, and the
/// value sources declared for it.
///
/// # Examples
///
/// ```rust
/// use combinatorial::{CombinatorialRange, NumericKind, Parameter, ParamType};
/// let width = Parameter::new("width", ParamType::Numeric(NumericKind::U32))
///     .with_range(CombinatorialRange::count(0u32, 5).unwrap());
/// assert_eq!(width.sources().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    ty: ParamType,
    sources: Vec<ValueSource>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            sources: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<ValueSource>) -> Self {
        self.sources.push(source.into());
        self
    }

    pub fn with_values<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with_source(ValueSource::values(values))
    }

    pub fn with_range(self, range: impl Into<AnyRange>) -> Self {
        self.with_source(ValueSource::Range(range.into()))
    }

    pub fn with_random_data(self, data: RandomData) -> Self {
        self.with_source(data)
    }

    pub fn with_member_data(self, data: MemberData) -> Self {
        self.with_source(data)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &ParamType {
        &self.ty
    }

    pub fn sources(&self) -> &[ValueSource] {
        &self.sources
    }

    pub(crate) fn explicit_values(&self) -> Option<&std::sync::Arc<[Value]>> {
        self.sources.iter().find_map(|source| match source {
            ValueSource::Values(values) => Some(values),
            _ => None,
        })
    }

    pub(crate) fn ranges(&self) -> impl Iterator<Item = &AnyRange> {
        self.sources.iter().filter_map(|source| match source {
            ValueSource::Range(range) => Some(range),
            _ => None,
        })
    }

    pub(crate) fn random_data(&self) -> Option<&RandomData> {
        self.sources.iter().find_map(|source| match source {
            ValueSource::RandomData(data) => Some(data),
            _ => None,
        })
    }

    pub(crate) fn member_data(&self) -> Option<&MemberData> {
        self.sources.iter().find_map(|source| match source {
            ValueSource::MemberData(data) => Some(data),
            _ => None,
        })
    }
}
