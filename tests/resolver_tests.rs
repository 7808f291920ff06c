//! Value Resolver Tests
//!
//! Precedence between declared sources, range kind matching, member data and
//! default enumeration by type.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use combinatorial::{
    default_values, resolve_values, CombinatorialError, CombinatorialRange, EnumMember, EnumType, ErrorType,
    MemberData, NumericKind, ParamType, Parameter, RandomData, RandomDataOptions, SourceKind, Value,
};

fn collect(parameter: &Parameter) -> Vec<Value> {
    resolve_values(parameter).unwrap().collect()
}

fn abc() -> EnumType {
    EnumType::from_names("Letter", ["A", "B"])
}

#[cfg(test)]
mod precedence_tests {
    use super::*;

    #[test]
    fn test_explicit_values_beat_a_matching_range() {
        let parameter = Parameter::new("n", ParamType::Numeric(NumericKind::I32))
            .with_range(CombinatorialRange::count(0i32, 5).unwrap())
            .with_values([Value::I32(42), Value::Null]);
        let values = resolve_values(&parameter).unwrap();
        assert_eq!(values.source(), SourceKind::Values);
        assert_eq!(values.collect::<Vec<_>>(), [Value::I32(42), Value::Null]);
    }

    #[test]
    fn test_range_beats_random_and_member_data() {
        let member = MemberData::from_fn("never", |_| panic!("member data must not be consulted"));
        let parameter = Parameter::new("n", ParamType::Numeric(NumericKind::U32))
            .with_member_data(member)
            .with_random_data(RandomData::from_values([Value::U32(99)]))
            .with_range(CombinatorialRange::count(0u32, 5).unwrap());
        assert_eq!(collect(&parameter), (0u32..5).map(Value::U32).collect::<Vec<_>>());
    }

    #[test]
    fn test_random_data_beats_member_data() {
        let member = MemberData::from_fn("never", |_| panic!("member data must not be consulted"));
        let random = RandomData::generate(RandomDataOptions {
            count: 3,
            minimum: 1,
            maximum: 3,
            seed: Some(9),
        })
        .unwrap();
        let parameter = Parameter::new("n", ParamType::Numeric(NumericKind::I32))
            .with_member_data(member)
            .with_random_data(random.clone());
        let values = resolve_values(&parameter).unwrap();
        assert_eq!(values.source(), SourceKind::RandomData);
        assert_eq!(values.collect::<Vec<_>>(), random.values().to_vec());
    }

    #[test]
    fn test_declaration_order_does_not_matter() {
        let range = CombinatorialRange::stepped(10i64, 0, -5).unwrap();
        let first = Parameter::new("n", ParamType::Numeric(NumericKind::I64))
            .with_values([1i64])
            .with_range(range.clone());
        let second = Parameter::new("n", ParamType::Numeric(NumericKind::I64))
            .with_range(range)
            .with_values([1i64]);
        assert_eq!(collect(&first), collect(&second));
        assert_eq!(collect(&first), [Value::I64(1)]);
    }
}

#[cfg(test)]
mod range_kind_tests {
    use super::*;

    #[test]
    fn test_unsigned_parameter_resolves_its_range() {
        let parameter = Parameter::new("n", ParamType::Numeric(NumericKind::U32))
            .with_range(CombinatorialRange::count(0u32, 5).unwrap());
        let values = resolve_values(&parameter).unwrap();
        assert_eq!(values.source(), SourceKind::Range(NumericKind::U32));
        assert_eq!(
            values.collect::<Vec<_>>(),
            [Value::U32(0), Value::U32(1), Value::U32(2), Value::U32(3), Value::U32(4)]
        );
    }

    #[test]
    fn test_range_of_another_kind_is_ignored() {
        let parameter = Parameter::new("flag", ParamType::Numeric(NumericKind::I64))
            .with_range(CombinatorialRange::count(0u8, 3).unwrap())
            .with_random_data(RandomData::from_values([7i64]));
        assert_eq!(collect(&parameter), [Value::I64(7)]);
    }

    #[test]
    fn test_matching_range_is_found_among_mismatched_ones() {
        let parameter = Parameter::new("n", ParamType::Numeric(NumericKind::I16))
            .with_range(CombinatorialRange::count(0u8, 3).unwrap())
            .with_range(CombinatorialRange::stepped(4i16, 0, -2).unwrap());
        assert_eq!(collect(&parameter), [Value::I16(4), Value::I16(2), Value::I16(0)]);
    }

    #[test]
    fn test_first_range_of_the_matching_kind_wins() {
        let parameter = Parameter::new("n", ParamType::Numeric(NumericKind::I32))
            .with_range(CombinatorialRange::count(10i32, 2).unwrap())
            .with_range(CombinatorialRange::count(0i32, 5).unwrap());
        assert_eq!(collect(&parameter), [Value::I32(10), Value::I32(11)]);
    }

    #[test]
    fn test_char_parameter_resolves_a_char_range() {
        let parameter = Parameter::new("c", ParamType::Char).with_range(CombinatorialRange::count('x', '\u{2}').unwrap());
        let values = resolve_values(&parameter).unwrap();
        assert_eq!(values.source(), SourceKind::Range(NumericKind::Char));
        assert_eq!(values.collect::<Vec<_>>(), [Value::Char('x'), Value::Char('y')]);
    }

    #[test]
    fn test_nullable_numeric_ignores_range_and_enumerates() {
        let parameter = Parameter::new("n", ParamType::nullable(ParamType::Numeric(NumericKind::I32)))
            .with_range(CombinatorialRange::count(0i32, 2).unwrap());
        let first: Vec<Value> = resolve_values(&parameter).unwrap().take(3).collect();
        assert!(first[0].is_null());
        assert_eq!(first, [Value::Null, Value::I32(i32::MIN), Value::I32(i32::MIN + 1)]);
    }

    #[test]
    fn test_mismatched_range_without_default_fails() {
        let parameter = Parameter::new("n", ParamType::Numeric(NumericKind::U64))
            .with_range(CombinatorialRange::count(0u32, 2).unwrap());
        let err = resolve_values(&parameter).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::UnsupportedType);
    }
}

#[cfg(test)]
mod member_data_tests {
    use super::*;

    #[test]
    fn test_member_data_receives_the_parameter() {
        let member = MemberData::from_fn("by_name", |parameter| {
            Ok(vec![Value::from(parameter.name()), Value::from(parameter.ty().to_string())])
        });
        let parameter = Parameter::new("path", ParamType::Other("PathBuf".into())).with_member_data(member);
        let values = resolve_values(&parameter).unwrap();
        assert_eq!(values.source(), SourceKind::MemberData);
        assert_eq!(values.collect::<Vec<_>>(), [Value::from("path"), Value::from("PathBuf")]);
    }

    #[test]
    fn test_member_data_is_not_validated() {
        let member = MemberData::from_fn("mixed", |_| Ok(vec![Value::from("not a bool"), Value::Null]));
        let parameter = Parameter::new("flag", ParamType::Bool).with_member_data(member);
        assert_eq!(collect(&parameter), [Value::from("not a bool"), Value::Null]);
    }

    #[test]
    fn test_member_data_errors_propagate() {
        let member = MemberData::from_fn("broken", |_| {
            Err(CombinatorialError::member_data("broken", "source is not enumerable"))
        });
        let parameter = Parameter::new("x", ParamType::Bool).with_member_data(member);
        let err = resolve_values(&parameter).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::MemberData);
        assert!(err.to_string().contains("source is not enumerable"));
    }

    #[test]
    fn test_member_data_is_invoked_on_each_resolution() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let member = MemberData::from_fn("counted", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Value::U8(1)])
        });
        let parameter = Parameter::new("x", ParamType::Numeric(NumericKind::U8)).with_member_data(member);
        collect(&parameter);
        collect(&parameter);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}

#[cfg(test)]
mod default_enumeration_tests {
    use super::*;

    #[test]
    fn test_bool_defaults_to_true_then_false() {
        assert_eq!(collect(&Parameter::new("b", ParamType::Bool)), [Value::Bool(true), Value::Bool(false)]);
    }

    #[test]
    fn test_enum_defaults_to_members_in_order() {
        let ty = EnumType::new("Color").with_member("Red", 2).with_member("Green", 0);
        let values = collect(&Parameter::new("c", ParamType::Enum(ty)));
        assert_eq!(
            values,
            [
                Value::Enum(EnumMember::new("Color", "Red", 2)),
                Value::Enum(EnumMember::new("Color", "Green", 0)),
            ]
        );
    }

    #[test]
    fn test_nullable_enum_puts_null_first() {
        let values = collect(&Parameter::new("e", ParamType::nullable(ParamType::Enum(abc()))));
        assert_eq!(
            values,
            [
                Value::Null,
                Value::Enum(EnumMember::new("Letter", "A", 0)),
                Value::Enum(EnumMember::new("Letter", "B", 1)),
            ]
        );
    }

    #[test]
    fn test_i32_default_starts_at_minimum_and_is_ascending() {
        let first: Vec<Value> = default_values(&ParamType::Numeric(NumericKind::I32)).unwrap().take(3).collect();
        assert_eq!(first, [Value::I32(i32::MIN), Value::I32(i32::MIN + 1), Value::I32(i32::MIN + 2)]);
    }

    #[test]
    fn test_unsupported_types_fail() {
        for ty in [
            ParamType::String,
            ParamType::Char,
            ParamType::Other("Widget".into()),
            ParamType::Numeric(NumericKind::F64),
            ParamType::nullable(ParamType::String),
        ] {
            let err = resolve_values(&Parameter::new("p", ty.clone())).unwrap_err();
            assert_eq!(err.error_type(), ErrorType::UnsupportedType, "{ty}");
        }
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let parameter = Parameter::new("e", ParamType::nullable(ParamType::Bool));
        assert_eq!(collect(&parameter), collect(&parameter));
    }
}
