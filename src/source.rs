//! Value source declarations.
//!
//! A parameter carries any number of [`ValueSource`]s; the resolver picks one
//! by a fixed precedence, so the order they were attached in never matters.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use serde::Deserialize;

use crate::parameter::Parameter;
use crate::range::AnyRange;
use crate::range_err;
use crate::value::Value;
use crate::CombinatorialError;

// Concrete, seedable PRNG so a recorded seed reproduces the same values.
type SmallRng = Xoshiro256StarStar;

/// One declared way of producing candidate values for a parameter.
#[derive(Debug, Clone)]
pub enum ValueSource {
    /// Literal values, in order. `Null` entries are kept.
    Values(Arc<[Value]>),
    /// A numeric range typed to one numeric kind.
    Range(AnyRange),
    /// Values generated ahead of time.
    RandomData(RandomData),
    /// Values produced by an external named source.
    MemberData(MemberData),
}

impl ValueSource {
    pub fn values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        ValueSource::Values(values.into_iter().map(Into::into).collect())
    }
}

impl From<AnyRange> for ValueSource {
    fn from(range: AnyRange) -> Self {
        ValueSource::Range(range)
    }
}

impl From<RandomData> for ValueSource {
    fn from(data: RandomData) -> Self {
        ValueSource::RandomData(data)
    }
}

impl From<MemberData> for ValueSource {
    fn from(data: MemberData) -> Self {
        ValueSource::MemberData(data)
    }
}

// ============================================================================
// RANDOM DATA
// ============================================================================

/// Settings for [`RandomData::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RandomDataOptions {
    /// Number of distinct values to draw.
    pub count: usize,
    /// Smallest value that may be drawn.
    pub minimum: i32,
    /// Largest value that may be drawn.
    pub maximum: i32,
    /// Seed for reproducible draws; drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for RandomDataOptions {
    fn default() -> Self {
        Self {
            count: 5,
            minimum: 0,
            maximum: i32::MAX - 1,
            seed: None,
        }
    }
}

/// A list of randomly generated values, resolved when declared.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomData {
    values: Arc<[Value]>,
    seed: Option<u64>,
}

impl RandomData {
    /// Draws `options.count` distinct `i32` values from `[minimum, maximum]`.
    pub fn generate(options: RandomDataOptions) -> Result<Self, CombinatorialError> {
        let RandomDataOptions {
            count,
            minimum,
            maximum,
            seed,
        } = options;

        if count < 1 {
            return Err(range_err!("count", "count must be at least one, got {}", count));
        }
        if maximum < minimum {
            return Err(range_err!(
                "maximum",
                "maximum {} is less than minimum {}",
                maximum,
                minimum
            ));
        }
        let available = (i64::from(maximum) - i64::from(minimum) + 1) as u64;
        if count as u64 > available {
            return Err(range_err!(
                "count",
                "cannot draw {} distinct values from the {} values in [{}, {}]",
                count,
                available,
                minimum,
                maximum
            ));
        }

        let mut rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut seen = HashSet::with_capacity(count);
        let mut values = Vec::with_capacity(count);
        while values.len() < count {
            let candidate = rng.gen_range(minimum..=maximum);
            if seen.insert(candidate) {
                values.push(Value::I32(candidate));
            }
        }

        tracing::trace!(count, minimum, maximum, ?seed, "generated random data");
        Ok(Self {
            values: values.into(),
            seed,
        })
    }

    /// Wraps values generated elsewhere.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            seed: None,
        }
    }

    pub fn values(&self) -> &Arc<[Value]> {
        &self.values
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

// ============================================================================
// MEMBER DATA
// ============================================================================

/// An external, named provider of parameter values.
pub trait MemberDataSource: Send + Sync {
    /// Name used in diagnostics and plan files.
    fn name(&self) -> &str;

    /// Produces the values for `parameter`. The result is used as-is.
    fn values(&self, parameter: &Parameter) -> Result<Vec<Value>, CombinatorialError>;
}

struct FnMemberData<F> {
    name: String,
    produce: F,
}

impl<F> MemberDataSource for FnMemberData<F>
where
    F: Fn(&Parameter) -> Result<Vec<Value>, CombinatorialError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn values(&self, parameter: &Parameter) -> Result<Vec<Value>, CombinatorialError> {
        (self.produce)(parameter)
    }
}

/// A shared handle to a [`MemberDataSource`].
#[derive(Clone)]
pub struct MemberData(Arc<dyn MemberDataSource>);

impl MemberData {
    pub fn new(source: impl MemberDataSource + 'static) -> Self {
        Self(Arc::new(source))
    }

    /// Adapts a closure into a named member data source.
    pub fn from_fn<F>(name: impl Into<String>, produce: F) -> Self
    where
        F: Fn(&Parameter) -> Result<Vec<Value>, CombinatorialError> + Send + Sync + 'static,
    {
        Self::new(FnMemberData {
            name: name.into(),
            produce,
        })
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn values(&self, parameter: &Parameter) -> Result<Vec<Value>, CombinatorialError> {
        self.0.values(parameter)
    }
}

impl fmt::Debug for MemberData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MemberData").field(&self.name()).finish()
    }
}
