use half::f16;
use num_bigint::BigInt;
use rust_decimal::Decimal;

use super::{CombinatorialRange, RangeIter, RangeNumber};
use crate::types::NumericKind;
use crate::value::Value;

macro_rules! any_range {
    ($($variant:ident($t:ty)),* $(,)?) => {
        /// A range declaration typed to exactly one [`NumericKind`].
        #[derive(Debug, Clone, PartialEq)]
        pub enum AnyRange {
            $($variant(CombinatorialRange<$t>),)*
        }

        impl AnyRange {
            /// The numeric domain this range was declared over.
            pub fn kind(&self) -> NumericKind {
                match self {
                    $(AnyRange::$variant(_) => NumericKind::$variant,)*
                }
            }

            pub fn iter(&self) -> AnyRangeIter {
                match self {
                    $(AnyRange::$variant(range) => AnyRangeIter::$variant(range.iter()),)*
                }
            }
        }

        /// Lazy iterator over an [`AnyRange`], yielding dynamically typed values.
        #[derive(Debug, Clone)]
        pub enum AnyRangeIter {
            $($variant(RangeIter<$t>),)*
        }

        impl Iterator for AnyRangeIter {
            type Item = Value;

            fn next(&mut self) -> Option<Value> {
                match self {
                    $(AnyRangeIter::$variant(iter) => iter.next().map(RangeNumber::into_value),)*
                }
            }
        }

        $(
            impl From<CombinatorialRange<$t>> for AnyRange {
                fn from(range: CombinatorialRange<$t>) -> Self {
                    AnyRange::$variant(range)
                }
            }
        )*
    };
}

any_range! {
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
    F16(f16),
    F32(f32),
    F64(f64),
    BigInt(BigInt),
    Decimal(Decimal),
    Char(char),
}
