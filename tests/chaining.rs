use stencil::{chain, Chained, EvalError, NativeFn, Operand, Value, __};

fn to_str() -> NativeFn {
    NativeFn::new(|v| Ok(Value::Str(v.to_string().into())))
}

fn double() -> NativeFn {
    NativeFn::new(|v| Ok(Value::Integer(v.as_integer()? * 2)))
}

#[test]
fn two_expressions_compose_lazily() {
    let pipeline = (__ + 1) >> (__ * 2);
    // Nothing has been evaluated yet; application order is left to right.
    assert_eq!(pipeline.eval(5).unwrap(), Value::Integer(12));

    let reversed = (__ * 2) >> (__ + 1);
    assert_eq!(reversed.eval(5).unwrap(), Value::Integer(11));
}

#[test]
fn compositions_compose_further() {
    let pipeline = ((__ + 1) >> (__ * 2)) >> (__ - 3);
    assert_eq!(pipeline.eval(5).unwrap(), Value::Integer(9));
}

#[test]
fn data_on_the_left_evaluates_immediately() {
    assert_eq!(3 >> (__ * __), Ok(Value::Integer(9)));
    assert_eq!("hi" >> __.method("upper", vec![]), Ok(Value::Str("HI".into())));
    assert_eq!(2.5 >> (__ * 2), Ok(Value::Real(5.0)));
}

#[test]
fn data_on_the_right_evaluates_immediately() {
    assert_eq!((__ * __) >> 3, Ok(Value::Integer(9)));
    assert_eq!(__.method("upper", vec![]) >> "hi", Ok(Value::Str("HI".into())));
}

#[test]
fn the_placeholder_alone_is_the_identity_stage() {
    assert_eq!(5 >> __, Ok(Value::Integer(5)));
    assert_eq!((__ >> 5), Ok(Value::Integer(5)));
    let through = ((__ + 1) >> __).eval(1).unwrap();
    assert_eq!(through, Value::Integer(2));
}

#[test]
fn data_on_both_sides_keeps_the_intrinsic_shift() {
    // Primitive `>>` between two integers never enters the protocol.
    assert_eq!(40 >> 2, 10);
}

#[test]
fn pipelines_continue_through_results() {
    let result = 2 >> (__ + 1) >> (__ * 10);
    assert_eq!(result, Ok(Value::Integer(30)));

    let with_identity = 2 >> (__ + 1) >> __;
    assert_eq!(with_identity, Ok(Value::Integer(3)));
}

#[test]
fn errors_short_circuit_remaining_stages() {
    let result = 1 >> (__ / 0) >> (__ + 1);
    assert_eq!(result, Err(EvalError::DivisionByZero));

    let pipeline = (__ / 0) >> (__ + 1);
    assert_eq!(pipeline.eval(1), Err(EvalError::DivisionByZero));
}

#[test]
fn native_functions_are_composition_stages() {
    let pipeline = (__ * 2 + 1) >> __.abs() >> to_str();
    assert_eq!(pipeline.eval(-3).unwrap(), Value::Str("5".into()));

    // Function-first composition works the same way.
    let pipeline = double() >> (__ + 1);
    assert_eq!(pipeline.eval(10).unwrap(), Value::Integer(21));

    assert_eq!(7 >> double(), Ok(Value::Integer(14)));
    assert_eq!(double() >> 7, Ok(Value::Integer(14)));
}

#[test]
fn composition_order_is_observable() {
    let add_then_double = (__ + 1) >> double();
    let double_then_add = double() >> (__ + 1);
    assert_eq!(add_then_double.eval(5).unwrap(), Value::Integer(12));
    assert_eq!(double_then_add.eval(5).unwrap(), Value::Integer(11));
}

#[test]
fn runtime_chaining_classifies_by_value() {
    // A function value counts as callable even though it is typed as data.
    let stage = Operand::from(Value::Function(double()));
    let chained = chain(stage, Operand::from(21)).unwrap();
    assert_eq!(chained.into_value(), Some(Value::Integer(42)));

    // Data fed in from the left behaves identically.
    let chained = chain(Operand::from(21), Operand::from(double())).unwrap();
    assert_eq!(chained.into_value(), Some(Value::Integer(42)));
}

#[test]
fn runtime_chaining_of_two_callables_stays_lazy() {
    let chained = chain(Operand::from(__ + 1), Operand::from(double())).unwrap();
    let Some(expr) = chained.into_expr() else {
        panic!("two callables should produce a deferred composition");
    };
    assert_eq!(expr.eval(4).unwrap(), Value::Integer(10));
}

#[test]
fn runtime_chaining_of_two_data_operands_shifts() {
    let chained = chain(Operand::from(40), Operand::from(2)).unwrap();
    assert_eq!(chained.into_value(), Some(Value::Integer(10)));

    // Unshiftable data surfaces the usual evaluation error.
    let err = chain(Operand::from(1.5), Operand::from(2)).unwrap_err();
    assert!(matches!(err, EvalError::TypeError { .. }), "unexpected error: {err}");
}

#[test]
fn chained_results_expose_their_variant() {
    let lazy = chain(Operand::from(__), Operand::from(__)).unwrap();
    assert!(matches!(lazy, Chained::Expr(_)));
    assert!(lazy.into_value().is_none());

    let eager = chain(Operand::from(1), Operand::from(__)).unwrap();
    assert_eq!(eager.into_value(), Some(Value::Integer(1)));
}

#[test]
fn compositions_render_with_the_chain_marker() {
    let pipeline = (__ + 1) >> (__ * 2);
    assert_eq!(pipeline.to_string(), "(__ + 1) >> (__ * 2)");
}
