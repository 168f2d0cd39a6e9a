use std::rc::Rc;

use crate::{
    error::{EvalError, EvalResult},
    expr::UnaryOperator,
    value::core::Value,
};

/// Evaluates a unary operation on a value.
///
/// Supported operators:
/// - `Neg`: numeric negation for integers and reals; elementwise for arrays.
/// - `Abs`: absolute value for integers and reals; elementwise for arrays.
/// - `Invert`: bitwise complement for integers (`~n == -n - 1`), logical
///   negation for booleans.
///
/// Checked integer arithmetic surfaces `Overflow` (e.g. negating
/// `i64::MIN`); unsupported value kinds produce a type error.
///
/// # Example
/// ```
/// use stencil::{eval::unary::eval_unary, UnaryOperator, Value};
///
/// let v = eval_unary(UnaryOperator::Neg, &Value::Integer(5)).unwrap();
/// assert_eq!(v, Value::Integer(-5));
///
/// let v = eval_unary(UnaryOperator::Invert, &Value::Integer(5)).unwrap();
/// assert_eq!(v, Value::Integer(-6));
/// ```
pub fn eval_unary(op: UnaryOperator, value: &Value) -> EvalResult<Value> {
    match (op, value) {
        (UnaryOperator::Neg, Value::Integer(n)) => {
            n.checked_neg().map(Value::Integer).ok_or(EvalError::Overflow)
        },
        (UnaryOperator::Neg, Value::Real(r)) => Ok(Value::Real(-r)),

        (UnaryOperator::Abs, Value::Integer(n)) => {
            n.checked_abs().map(Value::Integer).ok_or(EvalError::Overflow)
        },
        (UnaryOperator::Abs, Value::Real(r)) => Ok(Value::Real(r.abs())),

        (UnaryOperator::Invert, Value::Integer(n)) => Ok(Value::Integer(!n)),
        (UnaryOperator::Invert, Value::Bool(b)) => Ok(Value::Bool(!b)),

        (UnaryOperator::Neg | UnaryOperator::Abs, Value::Array(items)) => {
            let mapped = items.iter()
                              .map(|item| eval_unary(op, item))
                              .collect::<EvalResult<Vec<_>>>()?;
            Ok(Value::Array(Rc::new(mapped)))
        },

        _ => Err(EvalError::TypeError { details: format!("Cannot use {op} on {}",
                                                         value.type_name()) }),
    }
}
