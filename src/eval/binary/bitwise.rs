use crate::{
    error::{EvalError, EvalResult},
    expr::BinaryOperator,
    value::core::Value,
};

/// Evaluates a bitwise or shift operation.
///
/// `& | ^` are defined on integer pairs and boolean pairs; `<< >>` on
/// integer pairs only. Negative shift counts are invalid arguments, shift
/// counts of 64 or more overflow, and a left shift that would discard
/// significant bits also overflows.
///
/// # Example
/// ```
/// use stencil::{eval::binary::bitwise::eval_bitwise, BinaryOperator, Value};
///
/// let result = eval_bitwise(BinaryOperator::BitAnd, &Value::Integer(7), &Value::Integer(3));
/// assert_eq!(result.unwrap(), Value::Integer(3));
/// ```
pub fn eval_bitwise(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    use BinaryOperator::{BitAnd, BitOr, BitXor, Shl, Shr};
    use Value::{Bool, Integer};

    match (left, right) {
        (Integer(a), Integer(b)) => match op {
            BitAnd => Ok(Integer(a & b)),
            BitOr => Ok(Integer(a | b)),
            BitXor => Ok(Integer(a ^ b)),
            Shl | Shr => shift(op, *a, *b),
            _ => unreachable!("eval_bitwise used with non bitwise operator"),
        },

        (Bool(a), Bool(b)) => match op {
            BitAnd => Ok(Bool(*a && *b)),
            BitOr => Ok(Bool(*a || *b)),
            BitXor => Ok(Bool(a ^ b)),
            _ => Err(type_error(op, left, right)),
        },

        _ => Err(type_error(op, left, right)),
    }
}

fn shift(op: BinaryOperator, value: i64, count: i64) -> EvalResult<Value> {
    if count < 0 {
        return Err(EvalError::InvalidArgument { details: "negative shift count".to_string() });
    }
    let count = u32::try_from(count).map_err(|_| EvalError::Overflow)?;
    if count >= 64 {
        return Err(EvalError::Overflow);
    }

    if op == BinaryOperator::Shr {
        return Ok(Value::Integer(value >> count));
    }

    let shifted = value << count;
    // A left shift that cannot be undone has discarded significant bits.
    if (shifted >> count) == value {
        Ok(Value::Integer(shifted))
    } else {
        Err(EvalError::Overflow)
    }
}

fn type_error(op: BinaryOperator, left: &Value, right: &Value) -> EvalError {
    EvalError::TypeError { details: format!("Cannot use {op} on {} and {}",
                                            left.type_name(),
                                            right.type_name()) }
}
