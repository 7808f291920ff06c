//! # Range Expansion
//!
//! Numeric ranges are written once, generically, over any [`RangeNumber`]. A
//! range is validated when it is declared; expanding it afterwards never fails.
//!
//! ## Shapes
//!
//! - **Count**: `(from, count)` yields `from, from + 1, ..., from + (count - 1)`.
//! - **Stepped**: `(from, to, step)` walks from `from` towards `to` by `step`,
//!   including `to` only when the step lands on it exactly.
//!
//! ## Overflow
//!
//! The count form adds with wraparound, so an unsigned range that runs past the
//! type's maximum wraps silently. Callers own that bound. The stepped form
//! stops as soon as the next step would leave the type's domain.

mod any;

pub use any::{AnyRange, AnyRangeIter};

use std::cmp::Ordering;
use std::fmt;

use half::f16;
use num_bigint::BigInt;
use num_traits::{One, Zero};
use rust_decimal::Decimal;

use crate::range_err;
use crate::value::Value;
use crate::CombinatorialError;

/// A numeric domain a range can be expanded over.
pub trait RangeNumber: Clone + PartialOrd + fmt::Debug + Send + Sync + 'static {
    fn zero() -> Self;

    fn one() -> Self;

    /// `self + by`, wrapping at the type's bounds where the type has any.
    fn wrapping_advance(&self, by: &Self) -> Self;

    /// `self + by`, or `None` if the result leaves the domain or makes no progress.
    fn checked_advance(&self, by: &Self) -> Option<Self>;

    /// False for NaN and the infinities.
    fn is_finite(&self) -> bool {
        true
    }

    fn into_value(self) -> Value;
}

macro_rules! impl_range_integer {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl RangeNumber for $t {
                fn zero() -> Self {
                    0
                }

                fn one() -> Self {
                    1
                }

                fn wrapping_advance(&self, by: &Self) -> Self {
                    self.wrapping_add(*by)
                }

                fn checked_advance(&self, by: &Self) -> Option<Self> {
                    self.checked_add(*by)
                }

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }
            }
        )*
    };
}

impl_range_integer! {
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
}

macro_rules! impl_range_float {
    ($($t:ty => $variant:ident { $zero:expr, $one:expr }),* $(,)?) => {
        $(
            impl RangeNumber for $t {
                fn zero() -> Self {
                    $zero
                }

                fn one() -> Self {
                    $one
                }

                fn wrapping_advance(&self, by: &Self) -> Self {
                    *self + *by
                }

                // A step below the float's resolution at `self` would never reach `to`.
                fn checked_advance(&self, by: &Self) -> Option<Self> {
                    let next = *self + *by;
                    (next != *self).then_some(next)
                }

                fn is_finite(&self) -> bool {
                    <$t>::is_finite(*self)
                }

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }
            }
        )*
    };
}

impl_range_float! {
    f16 => F16 { f16::ZERO, f16::ONE },
    f32 => F32 { 0.0, 1.0 },
    f64 => F64 { 0.0, 1.0 },
}

impl RangeNumber for BigInt {
    fn zero() -> Self {
        <BigInt as Zero>::zero()
    }

    fn one() -> Self {
        <BigInt as One>::one()
    }

    fn wrapping_advance(&self, by: &Self) -> Self {
        self + by
    }

    fn checked_advance(&self, by: &Self) -> Option<Self> {
        Some(self + by)
    }

    fn into_value(self) -> Value {
        Value::BigInt(self)
    }
}

impl RangeNumber for Decimal {
    fn zero() -> Self {
        Decimal::ZERO
    }

    fn one() -> Self {
        Decimal::ONE
    }

    // Decimal has no wraparound; the count form saturates at its bounds.
    fn wrapping_advance(&self, by: &Self) -> Self {
        self.saturating_add(*by)
    }

    fn checked_advance(&self, by: &Self) -> Option<Self> {
        self.checked_add(*by)
    }

    fn into_value(self) -> Value {
        Value::Decimal(self)
    }
}

// Chars advance by scalar value, so the surrogate block D800..=DFFF is skipped:
// '\u{D7FF}' + 1 is '\u{E000}'. Steps and counts are chars read the same way.
const SURROGATE_START: u32 = 0xD800;
const SURROGATE_LEN: u32 = 0x800;
const SCALAR_COUNT: u32 = 0x11_0000 - SURROGATE_LEN;

fn scalar_index(c: char) -> u32 {
    let code = u32::from(c);
    if code >= SURROGATE_START {
        code - SURROGATE_LEN
    } else {
        code
    }
}

fn scalar_at(index: u32) -> Option<char> {
    if index >= SCALAR_COUNT {
        return None;
    }
    let code = if index >= SURROGATE_START {
        index + SURROGATE_LEN
    } else {
        index
    };
    char::from_u32(code)
}

impl RangeNumber for char {
    fn zero() -> Self {
        '\0'
    }

    fn one() -> Self {
        '\u{1}'
    }

    fn wrapping_advance(&self, by: &Self) -> Self {
        let index = (scalar_index(*self) + scalar_index(*by)) % SCALAR_COUNT;
        scalar_at(index).unwrap_or_default()
    }

    fn checked_advance(&self, by: &Self) -> Option<Self> {
        scalar_at(scalar_index(*self) + scalar_index(*by))
    }

    fn into_value(self) -> Value {
        Value::Char(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum RangeShape<T> {
    Count { from: T, count: T },
    Stepped { from: T, to: T, step: T },
}

/// A validated numeric range declaration.
///
/// # Examples
///
/// ```rust
/// use combinatorial::{CombinatorialRange, Value};
/// let range = CombinatorialRange::stepped(7i32, 0, -2).unwrap();
/// let values: Vec<i32> = range.iter().collect();
/// assert_eq!(values, [7, 5, 3, 1]);
/// assert!(CombinatorialRange::stepped(4i32, 2, 1).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CombinatorialRange<T> {
    shape: RangeShape<T>,
}

fn require_finite<T: RangeNumber>(argument: &'static str, value: &T) -> Result<(), CombinatorialError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(range_err!(argument, "{} must be finite, got {:?}", argument, value))
    }
}

impl<T: RangeNumber> CombinatorialRange<T> {
    /// Declares `count` consecutive values starting at `from`.
    ///
    /// Fails naming `count` unless `count` is at least one, and naming the
    /// argument when `from` or `count` is NaN or infinite.
    pub fn count(from: T, count: T) -> Result<Self, CombinatorialError> {
        require_finite("from", &from)?;
        if !matches!(count.partial_cmp(&T::one()), Some(Ordering::Greater | Ordering::Equal)) {
            return Err(range_err!("count", "count must be at least one, got {:?}", count)
                .with_help("a range of zero values would produce zero test cases"));
        }
        require_finite("count", &count)?;

        tracing::trace!(?from, ?count, "declared count range");
        Ok(Self {
            shape: RangeShape::Count { from, count },
        })
    }

    /// Declares the values from `from` towards `to`, advancing by `step`.
    ///
    /// A positive step needs `to >= from`, a negative step needs `to <= from`,
    /// and a zero step is always rejected. When `from == to` the range holds
    /// the single value `from`. NaN and infinite arguments are rejected.
    pub fn stepped(from: T, to: T, step: T) -> Result<Self, CombinatorialError> {
        require_finite("from", &from)?;
        require_finite("to", &to)?;
        let zero = T::zero();
        if step > zero {
            require_finite("step", &step)?;
            if to < from {
                return Err(range_err!(
                    "to",
                    "an ascending step of {:?} cannot reach {:?} from {:?}",
                    step,
                    to,
                    from
                ));
            }
        } else if step < zero {
            require_finite("step", &step)?;
            if to > from {
                return Err(range_err!(
                    "to",
                    "a descending step of {:?} cannot reach {:?} from {:?}",
                    step,
                    to,
                    from
                ));
            }
        } else {
            return Err(range_err!("step", "step must be positive or negative, got {:?}", step)
                .with_help("stepping by zero never reaches the end of the range"));
        }

        tracing::trace!(?from, ?to, ?step, "declared stepped range");
        Ok(Self {
            shape: RangeShape::Stepped { from, to, step },
        })
    }

    /// Lazily expands the range.
    pub fn iter(&self) -> RangeIter<T> {
        let cursor = match &self.shape {
            RangeShape::Count { from, count } => Cursor::Count {
                from: from.clone(),
                count: count.clone(),
                index: Some(T::zero()),
            },
            RangeShape::Stepped { from, to, step } => Cursor::Stepped {
                ascending: *step > T::zero(),
                to: to.clone(),
                step: step.clone(),
                current: Some(from.clone()),
            },
        };
        RangeIter { cursor }
    }

    /// Eagerly expands the range into dynamically typed values.
    pub fn values(&self) -> Vec<Value> {
        self.iter().map(RangeNumber::into_value).collect()
    }
}

#[derive(Debug, Clone)]
enum Cursor<T> {
    Count {
        from: T,
        count: T,
        // `None` once the index can no longer be advanced exactly.
        index: Option<T>,
    },
    Stepped {
        ascending: bool,
        to: T,
        step: T,
        current: Option<T>,
    },
}

/// Lazy iterator over the values of a [`CombinatorialRange`].
#[derive(Debug, Clone)]
pub struct RangeIter<T> {
    cursor: Cursor<T>,
}

impl<T: RangeNumber> Iterator for RangeIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match &mut self.cursor {
            Cursor::Count { from, count, index } => {
                let position = index.take()?;
                if position >= *count {
                    return None;
                }
                let value = from.wrapping_advance(&position);
                *index = position.checked_advance(&T::one());
                Some(value)
            }
            Cursor::Stepped {
                ascending,
                to,
                step,
                current,
            } => {
                let value = current.take()?;
                let in_bounds = if *ascending { value <= *to } else { value >= *to };
                if !in_bounds {
                    return None;
                }
                *current = value.checked_advance(step);
                Some(value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand<T: RangeNumber>(range: Result<CombinatorialRange<T>, CombinatorialError>) -> Vec<T> {
        range.unwrap().iter().collect()
    }

    #[test]
    fn count_range_starts_at_from() {
        assert_eq!(expand(CombinatorialRange::count(0i32, 5)), [0, 1, 2, 3, 4]);
        assert_eq!(expand(CombinatorialRange::count(-2i64, 3)), [-2, -1, 0]);
    }

    #[test]
    fn count_below_one_names_count() {
        let err = CombinatorialRange::count(0i32, -2).unwrap_err();
        assert_eq!(err.argument(), Some("count"));
        let err = CombinatorialRange::count(0u32, 0).unwrap_err();
        assert_eq!(err.argument(), Some("count"));
    }

    #[test]
    fn count_range_wraps_unsigned_silently() {
        assert_eq!(expand(CombinatorialRange::count(254u8, 4)), [254, 255, 0, 1]);
    }

    #[test]
    fn stepped_range_excludes_overshoot() {
        assert_eq!(expand(CombinatorialRange::stepped(0i32, 7, 2)), [0, 2, 4, 6]);
        assert_eq!(expand(CombinatorialRange::stepped(0i32, 8, 2)), [0, 2, 4, 6, 8]);
    }

    #[test]
    fn stepped_range_descends() {
        assert_eq!(expand(CombinatorialRange::stepped(7i32, 0, -2)), [7, 5, 3, 1]);
        assert_eq!(expand(CombinatorialRange::stepped(0i32, -8, -2)), [0, -2, -4, -6, -8]);
    }

    #[test]
    fn equal_bounds_yield_a_single_value() {
        assert_eq!(expand(CombinatorialRange::stepped(3i32, 3, 1)), [3]);
        assert_eq!(expand(CombinatorialRange::stepped(3i32, 3, -1)), [3]);
    }

    #[test]
    fn stepped_range_stops_at_type_bounds() {
        assert_eq!(expand(CombinatorialRange::stepped(250u8, 255, 2)), [250, 252, 254]);
        assert_eq!(expand(CombinatorialRange::stepped(253u8, 255, 1)), [253, 254, 255]);
        assert_eq!(
            expand(CombinatorialRange::stepped(i8::MIN + 2, i8::MIN, -1)),
            [-126, -127, -128]
        );
    }

    #[test]
    fn invalid_step_names_the_cause() {
        assert_eq!(CombinatorialRange::stepped(4i32, 2, 1).unwrap_err().argument(), Some("to"));
        assert_eq!(CombinatorialRange::stepped(1i32, 5, -1).unwrap_err().argument(), Some("to"));
        assert_eq!(CombinatorialRange::stepped(1u32, 5, 0).unwrap_err().argument(), Some("step"));
        assert_eq!(CombinatorialRange::stepped(0.0f64, 1.0, f64::NAN).unwrap_err().argument(), Some("step"));
    }

    #[test]
    fn float_ranges_step_fractionally() {
        assert_eq!(expand(CombinatorialRange::stepped(0.0f64, 1.0, 0.25)), [0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(expand(CombinatorialRange::count(0.5f32, 3.0)), [0.5, 1.5, 2.5]);
    }

    #[test]
    fn bigint_ranges_exceed_primitive_widths() {
        let from = BigInt::from(u128::MAX);
        let values = expand(CombinatorialRange::count(from.clone(), BigInt::from(2)));
        assert_eq!(values, [from.clone(), from + 1]);
    }

    #[test]
    fn iteration_is_restartable() {
        let range = CombinatorialRange::count(10u16, 3).unwrap();
        assert_eq!(range.iter().count(), 3);
        assert_eq!(range.values(), [Value::U16(10), Value::U16(11), Value::U16(12)]);
        assert_eq!(range.iter().collect::<Vec<_>>(), [10, 11, 12]);
    }
}
