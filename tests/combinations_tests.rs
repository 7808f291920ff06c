//! Combination Generation Tests

use combinatorial::{
    Combinations, CombinatorialRange, EnumType, ErrorType, NumericKind, ParamType, Parameter, Value,
};

#[test]
fn test_full_product_with_last_parameter_fastest() {
    let parameters = [
        Parameter::new("flag", ParamType::Bool),
        Parameter::new("n", ParamType::Numeric(NumericKind::U8)).with_range(CombinatorialRange::count(1u8, 3).unwrap()),
    ];
    let combinations: Vec<Vec<Value>> = Combinations::new(&parameters).unwrap().collect();
    assert_eq!(combinations.len(), 6);
    assert_eq!(combinations[0], [Value::Bool(true), Value::U8(1)]);
    assert_eq!(combinations[2], [Value::Bool(true), Value::U8(3)]);
    assert_eq!(combinations[3], [Value::Bool(false), Value::U8(1)]);
}

#[test]
fn test_names_follow_parameter_order() {
    let parameters = [
        Parameter::new("b", ParamType::Bool),
        Parameter::new("a", ParamType::Enum(EnumType::from_names("Side", ["L", "R"]))),
    ];
    let combinations = Combinations::new(&parameters).unwrap();
    assert_eq!(combinations.names(), ["b", "a"]);
}

#[test]
fn test_no_parameters_yield_one_empty_combination() {
    let combinations: Vec<Vec<Value>> = Combinations::new(&[]).unwrap().collect();
    assert_eq!(combinations, vec![Vec::<Value>::new()]);
}

#[test]
fn test_empty_value_list_yields_no_combinations() {
    let parameters = [
        Parameter::new("flag", ParamType::Bool),
        Parameter::new("none", ParamType::String).with_values(Vec::<Value>::new()),
    ];
    assert_eq!(Combinations::new(&parameters).unwrap().count(), 0);
}

#[test]
fn test_product_over_i32_default_is_lazy() {
    let parameters = [
        Parameter::new("n", ParamType::Numeric(NumericKind::I32)),
        Parameter::new("flag", ParamType::Bool),
    ];
    let first: Vec<Vec<Value>> = Combinations::new(&parameters).unwrap().take(3).collect();
    assert_eq!(
        first,
        [
            vec![Value::I32(i32::MIN), Value::Bool(true)],
            vec![Value::I32(i32::MIN), Value::Bool(false)],
            vec![Value::I32(i32::MIN + 1), Value::Bool(true)],
        ]
    );
}

#[test]
fn test_unresolvable_parameter_fails_up_front() {
    let parameters = [
        Parameter::new("flag", ParamType::Bool),
        Parameter::new("text", ParamType::String),
    ];
    let err = Combinations::new(&parameters).unwrap_err();
    assert_eq!(err.error_type(), ErrorType::UnsupportedType);
}
