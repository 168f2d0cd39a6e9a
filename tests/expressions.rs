use indexmap::IndexMap;
use stencil::{EvalError, Expr, MapKey, Slice, Value, __};

fn eval_ok(expr: &Expr, argument: impl Into<Value>) -> Value {
    match expr.eval(argument) {
        Ok(value) => value,
        Err(e) => panic!("Evaluation failed: {e}"),
    }
}

fn eval_err(expr: &Expr, argument: impl Into<Value>) -> EvalError {
    match expr.eval(argument) {
        Ok(value) => panic!("Evaluation succeeded with {value} but was expected to fail"),
        Err(e) => e,
    }
}

fn sample_map() -> Value {
    let mut map = IndexMap::new();
    map.insert(MapKey::from("a"), Value::Integer(1));
    map.insert(MapKey::from("b"), Value::Integer(2));
    Value::from(map)
}

#[test]
fn arithmetic_substitutes_the_argument() {
    assert_eq!(eval_ok(&(__ + 3), 4), Value::Integer(7));
    assert_eq!(eval_ok(&(__ - 3), 4), Value::Integer(1));
    assert_eq!(eval_ok(&(__ * 3), 4), Value::Integer(12));
    assert_eq!(eval_ok(&(3 - __), 4), Value::Integer(-1));
    assert_eq!(eval_ok(&(__ + 0.5), 1.25), Value::Real(1.75));
}

#[test]
fn division_always_produces_a_real() {
    assert_eq!(eval_ok(&(__ / 2), 8), Value::Real(4.0));
    assert_eq!(eval_ok(&(__ / 2), 7), Value::Real(3.5));
}

#[test]
fn flooring_division_and_modulo_round_toward_negative_infinity() {
    assert_eq!(eval_ok(&__.floor_div(2), 7), Value::Integer(3));
    assert_eq!(eval_ok(&__.floor_div(2), -7), Value::Integer(-4));
    assert_eq!(eval_ok(&(__ % 3), 7), Value::Integer(1));
    assert_eq!(eval_ok(&(__ % 3), -7), Value::Integer(2));
    assert_eq!(eval_ok(&(__ % -3), 7), Value::Integer(-2));
    // Remainder at the edge of the integer range is 0, not an overflow trap.
    assert_eq!(eval_ok(&(__ % -1), i64::MIN), Value::Integer(0));
}

#[test]
fn exponentiation() {
    assert_eq!(eval_ok(&__.pow(2), 3), Value::Integer(9));
    assert_eq!(eval_ok(&__.pow(0), 0), Value::Integer(1));
    // A negative exponent leaves the integer domain.
    assert_eq!(eval_ok(&__.pow(-1), 2), Value::Real(0.5));
    assert_eq!(eval_ok(&__.pow(2.0), 3.0), Value::Real(9.0));
}

#[test]
fn mixed_integer_and_real_operands_promote() {
    assert_eq!(eval_ok(&(__ + 1), 0.5), Value::Real(1.5));
    assert_eq!(eval_ok(&(__ * 2), 1.5), Value::Real(3.0));
}

#[test]
fn string_concatenation_and_repetition() {
    assert_eq!(eval_ok(&(__ + " world"), "hello"), Value::Str("hello world".into()));
    assert_eq!(eval_ok(&(__ * 3), "ab"), Value::Str("ababab".into()));
    assert_eq!(eval_ok(&(3 * __), "ab"), Value::Str("ababab".into()));
    assert_eq!(eval_ok(&(__ * -1), "ab"), Value::Str("".into()));
}

#[test]
fn every_placeholder_occurrence_receives_the_same_argument() {
    assert_eq!(eval_ok(&(__ * __), 6), Value::Integer(36));
    assert_eq!(eval_ok(&(__ * __ - __), 5), Value::Integer(20));
    assert_eq!(eval_ok(&(__ + __), "ab"), Value::Str("abab".into()));
}

#[test]
fn trees_are_immutable_and_reusable() {
    let inc = __ + 1;
    let doubled = inc.clone() * 2;
    let squared = inc.clone() * inc.clone();

    assert_eq!(eval_ok(&doubled, 3), Value::Integer(8));
    assert_eq!(eval_ok(&squared, 3), Value::Integer(16));
    // The shared subtree is untouched by either use.
    assert_eq!(eval_ok(&inc, 3), Value::Integer(4));
    assert_eq!(eval_ok(&inc, 3), Value::Integer(4));
}

#[test]
fn constant_trees_ignore_the_argument() {
    let expr = Expr::constant(10) + 5;
    assert_eq!(eval_ok(&expr, 999), Value::Integer(15));
    assert_eq!(eval_ok(&expr, "unused"), Value::Integer(15));
}

#[test]
fn comparisons_produce_booleans() {
    assert_eq!(eval_ok(&__.lt(5), 3), Value::Bool(true));
    assert_eq!(eval_ok(&__.ge(5), 3), Value::Bool(false));
    assert_eq!(eval_ok(&__.equals(5), 5), Value::Bool(true));
    assert_eq!(eval_ok(&__.not_equals(5), 5), Value::Bool(false));
    // Cross-type numeric equality.
    assert_eq!(eval_ok(&__.equals(5.0), 5), Value::Bool(true));
    assert_eq!(eval_ok(&__.lt(2.5), 2), Value::Bool(true));
    // Strings compare lexicographically.
    assert_eq!(eval_ok(&__.lt("banana"), "apple"), Value::Bool(true));
}

#[test]
fn huge_integers_compare_exactly_against_reals() {
    // No promotion through f64: the ordering holds past the safe-float range.
    assert_eq!(eval_ok(&__.lt(1.5), i64::MAX), Value::Bool(false));
    assert_eq!(eval_ok(&__.gt(1.5), i64::MAX), Value::Bool(true));
    assert_eq!(eval_ok(&__.lt(f64::INFINITY), i64::MAX), Value::Bool(true));
    assert_eq!(eval_ok(&__.gt(f64::NEG_INFINITY), i64::MIN), Value::Bool(true));

    let huge = 1i64 << 60;
    assert_eq!(eval_ok(&__.equals((1u64 << 60) as f64), huge), Value::Bool(true));
    assert_eq!(eval_ok(&__.lt(((1u64 << 60) + 1024) as f64), huge), Value::Bool(true));
}

#[test]
fn nan_is_unordered() {
    assert_eq!(eval_ok(&__.lt(f64::NAN), 1), Value::Bool(false));
    assert_eq!(eval_ok(&__.ge(f64::NAN), 1), Value::Bool(false));
    assert_eq!(eval_ok(&__.equals(f64::NAN), f64::NAN), Value::Bool(false));
}

#[test]
fn equality_between_unrelated_types_is_false_not_an_error() {
    assert_eq!(eval_ok(&__.equals("5"), 5), Value::Bool(false));
    assert_eq!(eval_ok(&__.not_equals(true), 1), Value::Bool(true));
}

#[test]
fn bitwise_operators_on_integers() {
    assert_eq!(eval_ok(&(__ & 0b1100), 0b1010), Value::Integer(0b1000));
    assert_eq!(eval_ok(&(__ | 0b1100), 0b1010), Value::Integer(0b1110));
    assert_eq!(eval_ok(&(__ ^ 0b1100), 0b1010), Value::Integer(0b0110));
    assert_eq!(eval_ok(&(__ << 3), 1), Value::Integer(8));
}

#[test]
fn bitwise_operators_on_booleans() {
    assert_eq!(eval_ok(&(__ & true), true), Value::Bool(true));
    assert_eq!(eval_ok(&(__ | false), false), Value::Bool(false));
    assert_eq!(eval_ok(&(__ ^ true), true), Value::Bool(false));
}

#[test]
fn shift_edge_cases() {
    assert_eq!(eval_err(&(__ << -1), 1), EvalError::InvalidArgument { details: "negative shift count".to_string() });
    assert_eq!(eval_err(&(__ << 1), i64::MAX), EvalError::Overflow);
    assert_eq!(eval_err(&(__ << 64), 1), EvalError::Overflow);
}

#[test]
fn unary_operators() {
    assert_eq!(eval_ok(&(-__), 5), Value::Integer(-5));
    assert_eq!(eval_ok(&(-__), -2.5), Value::Real(2.5));
    assert_eq!(eval_ok(&__.abs(), -7), Value::Integer(7));
    assert_eq!(eval_ok(&(!__), 0), Value::Integer(-1));
    assert_eq!(eval_ok(&(!__), true), Value::Bool(false));
}

#[test]
fn elementwise_array_arithmetic() {
    let doubled = __ * 2;
    assert_eq!(eval_ok(&doubled, vec![1i64, 2, 3]),
               Value::from(vec![2i64, 4, 6]));

    let summed = __ + __;
    assert_eq!(eval_ok(&summed, vec![1i64, 2]), Value::from(vec![2i64, 4]));

    // Non-commutative broadcast keeps operand order.
    assert_eq!(eval_ok(&(10 - __), vec![1i64, 2]), Value::from(vec![9i64, 8]));
    assert_eq!(eval_ok(&(-__), vec![1i64, -2]), Value::from(vec![-1i64, 2]));
}

#[test]
fn array_length_mismatch_is_a_type_error() {
    let err = eval_err(&(__ + Expr::constant(vec![1i64, 2, 3])), vec![1i64, 2]);
    assert!(matches!(err, EvalError::TypeError { .. }), "unexpected error: {err}");
}

#[test]
fn numeric_attributes() {
    assert_eq!(eval_ok(&__.attr("real"), 5), Value::Integer(5));
    assert_eq!(eval_ok(&__.attr("imag"), 5), Value::Integer(0));
    assert_eq!(eval_ok(&__.attr("imag"), 2.5), Value::Real(0.0));
}

#[test]
fn string_methods() {
    assert_eq!(eval_ok(&__.method("upper", vec![]), "hi"), Value::Str("HI".into()));
    assert_eq!(eval_ok(&__.method("lower", vec![]), "HI"), Value::Str("hi".into()));
    assert_eq!(eval_ok(&__.method("strip", vec![]), "  x  "), Value::Str("x".into()));
    assert_eq!(eval_ok(&__.method("len", vec![]), "héllo"), Value::Integer(5));
    assert_eq!(eval_ok(&__.method("replace", vec!["l".into(), "L".into()]), "hello"),
               Value::Str("heLLo".into()));
    assert_eq!(eval_ok(&__.method("split", vec![",".into()]), "a,b,c"),
               Value::from(vec!["a", "b", "c"]));
    assert_eq!(eval_ok(&__.method("split", vec![]), "  a  b "),
               Value::from(vec!["a", "b"]));
}

#[test]
fn array_methods() {
    let numbers = vec![3i64, 1, 2];
    assert_eq!(eval_ok(&__.method("len", vec![]), numbers.clone()), Value::Integer(3));
    assert_eq!(eval_ok(&__.method("sum", vec![]), numbers.clone()), Value::Integer(6));
    assert_eq!(eval_ok(&__.method("reverse", vec![]), numbers.clone()),
               Value::from(vec![2i64, 1, 3]));
    assert_eq!(eval_ok(&__.method("contains", vec![2.into()]), numbers.clone()),
               Value::Bool(true));
    assert_eq!(eval_ok(&__.method("contains", vec![9.into()]), numbers.clone()),
               Value::Bool(false));
    assert_eq!(eval_ok(&__.method("copy", vec![]), numbers.clone()), Value::from(numbers));
}

#[test]
fn map_methods() {
    let map = sample_map();
    assert_eq!(eval_ok(&__.method("len", vec![]), map.clone()), Value::Integer(2));
    assert_eq!(eval_ok(&__.method("keys", vec![]), map.clone()),
               Value::from(vec!["a", "b"]));
    assert_eq!(eval_ok(&__.method("values", vec![]), map.clone()),
               Value::from(vec![1i64, 2]));
    assert_eq!(eval_ok(&__.method("contains", vec!["a".into()]), map.clone()),
               Value::Bool(true));
    assert_eq!(eval_ok(&__.method("get", vec!["b".into()]), map.clone()), Value::Integer(2));
    assert_eq!(eval_ok(&__.method("get", vec!["z".into()]), map.clone()), Value::Unit);
    assert_eq!(eval_ok(&__.method("get", vec!["z".into(), 0.into()]), map.clone()),
               Value::Integer(0));
    let with_default = __.method_with("get", vec!["z".into()], vec![("default", (-1).into())]);
    assert_eq!(eval_ok(&with_default, map), Value::Integer(-1));
}

#[test]
fn number_methods() {
    assert_eq!(eval_ok(&__.method("abs", vec![]), -4), Value::Integer(4));
    assert_eq!(eval_ok(&__.method("floor", vec![]), 2.7), Value::Integer(2));
    assert_eq!(eval_ok(&__.method("ceil", vec![]), 2.1), Value::Integer(3));
    assert_eq!(eval_ok(&__.method("round", vec![]), 2.6), Value::Integer(3));
    // Ties round to even.
    assert_eq!(eval_ok(&__.method("round", vec![]), 2.5), Value::Integer(2));
    assert_eq!(eval_ok(&__.method("round", vec![]), 3.5), Value::Integer(4));
    assert_eq!(eval_ok(&__.method("round", vec![]), 7), Value::Integer(7));
}

#[test]
fn attribute_reads_produce_bound_methods() {
    // Reading the attribute without calling it yields a callable value.
    let bound = eval_ok(&__.attr("upper"), "hi");
    assert!(bound.is_function());
}

#[test]
fn indexing_arrays_and_strings() {
    let items = vec![10i64, 20, 30];
    assert_eq!(eval_ok(&__.index(0), items.clone()), Value::Integer(10));
    assert_eq!(eval_ok(&__.index(-1), items.clone()), Value::Integer(30));
    assert_eq!(eval_ok(&__.index(1), "abc"), Value::Str("b".into()));
    assert_eq!(eval_ok(&__.index(-1), "abc"), Value::Str("c".into()));

    assert_eq!(eval_err(&__.index(3), items), EvalError::IndexOutOfBounds { len: 3, index: 3 });
}

#[test]
fn slicing_follows_sequence_conventions() {
    let items = vec![1i64, 2, 3, 4];
    assert_eq!(eval_ok(&__.slice(1, 3), items.clone()), Value::from(vec![2i64, 3]));
    assert_eq!(eval_ok(&__.slice(None, 2), items.clone()), Value::from(vec![1i64, 2]));
    assert_eq!(eval_ok(&__.slice(-2, None), items.clone()), Value::from(vec![3i64, 4]));
    // Out-of-range bounds clamp instead of failing.
    assert_eq!(eval_ok(&__.slice(0, 100), items.clone()), Value::from(vec![1i64, 2, 3, 4]));
    assert_eq!(eval_ok(&__.slice(3, 1), items.clone()), Value::from(Vec::<i64>::new()));

    let stepped = __.index(Slice::with_step(None, None, Some(2)));
    assert_eq!(eval_ok(&stepped, items.clone()), Value::from(vec![1i64, 3]));
    let reversed = __.index(Slice::with_step(None, None, Some(-1)));
    assert_eq!(eval_ok(&reversed, items.clone()), Value::from(vec![4i64, 3, 2, 1]));

    // Steps near the integer limits select only the entry point.
    let giant_step = __.index(Slice::with_step(Some(1), None, Some(i64::MAX)));
    assert_eq!(eval_ok(&giant_step, items.clone()), Value::from(vec![2i64]));
    let giant_back = __.index(Slice::with_step(None, None, Some(i64::MIN)));
    assert_eq!(eval_ok(&giant_back, items), Value::from(vec![4i64]));

    assert_eq!(eval_ok(&__.slice(1, 3), "abcd"), Value::Str("bc".into()));
}

#[test]
fn map_subscripting() {
    let map = sample_map();
    assert_eq!(eval_ok(&__.index("a"), map.clone()), Value::Integer(1));
    assert_eq!(eval_err(&__.index("missing"), map),
               EvalError::KeyNotFound { key: "missing".to_string() });
}

#[test]
fn index_keys_may_be_expressions() {
    // The key subtree sees the same argument as the base subtree.
    let expr = Expr::constant(vec![10i64, 20, 30]).index(__ - 1);
    assert_eq!(eval_ok(&expr, 2), Value::Integer(20));
}

#[test]
fn division_by_zero_propagates() {
    assert_eq!(eval_err(&(__ / 0), 1), EvalError::DivisionByZero);
    assert_eq!(eval_err(&(__ % 0), 1), EvalError::DivisionByZero);
    assert_eq!(eval_err(&(__ / 0.0), 1.0), EvalError::DivisionByZero);
    assert_eq!(eval_err(&__.floor_div(0), 1), EvalError::DivisionByZero);
}

#[test]
fn integer_overflow_is_detected() {
    assert_eq!(eval_err(&(__ + 1), i64::MAX), EvalError::Overflow);
    assert_eq!(eval_err(&(__ * 2), i64::MIN), EvalError::Overflow);
    assert_eq!(eval_err(&(-__), i64::MIN), EvalError::Overflow);
}

#[test]
fn type_errors_name_the_offending_types() {
    let err = eval_err(&(__ + 1), "text");
    assert!(matches!(err, EvalError::TypeError { .. }), "unexpected error: {err}");

    let err = eval_err(&(__ & 1), 1.5);
    assert!(matches!(err, EvalError::TypeError { .. }), "unexpected error: {err}");
}

#[test]
fn unknown_attributes_and_methods() {
    assert_eq!(eval_err(&__.attr("nope"), 5),
               EvalError::UnknownAttribute { type_name: "integer",
                                             name:      "nope".to_string(), });
    assert_eq!(eval_err(&__.method("nope", vec![]), "s"),
               EvalError::UnknownAttribute { type_name: "string",
                                             name:      "nope".to_string(), });
}

#[test]
fn calling_a_non_function_fails() {
    let expr = Expr::constant(5).call(vec![]);
    assert_eq!(eval_err(&expr, 0), EvalError::NotCallable { type_name: "integer" });
}

#[test]
fn method_arity_and_keyword_checking() {
    assert_eq!(eval_err(&__.method("upper", vec![1.into()]), "s"),
               EvalError::ArgumentCountMismatch { name:     "upper".to_string(),
                                                  expected: 0,
                                                  found:    1, });
    let kwarg = __.method_with("upper", vec![], vec![("loud", true.into())]);
    assert_eq!(eval_err(&kwarg, "s"), EvalError::UnexpectedKeyword { name: "loud".to_string() });
}

#[test]
fn errors_in_subtrees_short_circuit() {
    // The failing left operand prevents the right from mattering.
    let expr = (__ / 0) + __.attr("nope");
    assert_eq!(eval_err(&expr, 1), EvalError::DivisionByZero);
}

#[test]
fn display_renders_the_recorded_tree() {
    assert_eq!((__ + 1).to_string(), "(__ + 1)");
    assert_eq!((__ * __ - 1).to_string(), "((__ * __) - 1)");
    assert_eq!(__.abs().to_string(), "abs(__)");
    assert_eq!(__.attr("real").to_string(), "__.real");
    assert_eq!(__.method("replace", vec!["a".into(), "b".into()]).to_string(),
               "__.replace(\"a\", \"b\")");
    assert_eq!(__.index(0).to_string(), "__[0]");
}
