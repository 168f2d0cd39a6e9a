use std::rc::Rc;

use crate::{
    error::{EvalError, EvalResult},
    eval::binary::eval_binary,
    expr::BinaryOperator,
    value::core::Value,
};

/// Evaluates an elementwise operation between two arrays.
///
/// Arrays must have the same length; corresponding elements are combined
/// with the operator, recursing through [`eval_binary`] so nested arrays
/// broadcast as well.
///
/// # Example
/// ```
/// use stencil::{eval::binary::array::eval_array_array, BinaryOperator, Value};
///
/// let a = vec![Value::Integer(1), Value::Integer(2)];
/// let b = vec![Value::Integer(10), Value::Integer(20)];
///
/// let result = eval_array_array(BinaryOperator::Add, &a, &b).unwrap();
/// assert_eq!(result, Value::from(vec![11i64, 22]));
/// ```
pub fn eval_array_array(op: BinaryOperator, a: &[Value], b: &[Value]) -> EvalResult<Value> {
    if a.len() != b.len() {
        return Err(EvalError::TypeError { details: format!("Cannot use {op} on arrays of lengths {} and {}",
                                                           a.len(),
                                                           b.len()) });
    }

    let combined = a.iter()
                    .zip(b.iter())
                    .map(|(x, y)| eval_binary(op, x, y))
                    .collect::<EvalResult<Vec<_>>>()?;
    Ok(Value::Array(Rc::new(combined)))
}

/// Evaluates `array op scalar`, broadcasting the scalar across every
/// element.
pub fn eval_array_scalar(op: BinaryOperator, a: &[Value], scalar: &Value) -> EvalResult<Value> {
    let combined = a.iter()
                    .map(|x| eval_binary(op, x, scalar))
                    .collect::<EvalResult<Vec<_>>>()?;
    Ok(Value::Array(Rc::new(combined)))
}

/// Evaluates `scalar op array`, broadcasting the scalar across every
/// element. Kept separate from [`eval_array_scalar`] so non-commutative
/// operators keep their operand order.
pub fn eval_scalar_array(op: BinaryOperator, scalar: &Value, b: &[Value]) -> EvalResult<Value> {
    let combined = b.iter()
                    .map(|y| eval_binary(op, scalar, y))
                    .collect::<EvalResult<Vec<_>>>()?;
    Ok(Value::Array(Rc::new(combined)))
}
