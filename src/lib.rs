//! Value resolution and combination generation for parameterized tests.
//!
//! Every parameter of a test function carries a static [`ParamType`] and zero or
//! more [`ValueSource`] declarations. [`resolve_values`] turns one parameter into
//! its ordered candidate sequence, and [`Combinations`] walks the Cartesian
//! product across all parameters of a test.

pub use crate::combinations::Combinations;
pub use crate::diagnostics::{CombinatorialError, ErrorContext, ErrorType};
pub use crate::parameter::Parameter;
pub use crate::range::{AnyRange, CombinatorialRange, RangeNumber};
pub use crate::resolver::{default_values, resolve_values, SourceKind, ValueSequence};
pub use crate::source::{MemberData, MemberDataSource, RandomData, RandomDataOptions, ValueSource};
pub use crate::types::{EnumType, NumericKind, ParamType};
pub use crate::value::{EnumMember, Value};

pub mod cli;
pub mod combinations;
pub mod diagnostics;
pub mod parameter;
pub mod plan;
pub mod range;
pub mod resolver;
pub mod source;
pub mod types;
pub mod value;
