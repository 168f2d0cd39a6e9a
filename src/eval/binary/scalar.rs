use crate::{
    error::{EvalError, EvalResult},
    expr::BinaryOperator,
    value::core::{int_to_real, Value},
};

/// Evaluates a scalar arithmetic operation.
///
/// Handles integer, real and string operands. Mixed integer/real operands
/// are promoted to real. Integer arithmetic is checked and surfaces
/// `Overflow`; division by zero is checked explicitly for all numeric
/// categories. True division always produces a real number; flooring
/// division and modulo round toward negative infinity, with the modulo
/// result taking the sign of the divisor. The operator must be one of the
/// arithmetic opcodes; comparisons and bitwise operations are not processed
/// here.
///
/// # Example
/// ```
/// use stencil::{eval::binary::scalar::eval_scalar, BinaryOperator, Value};
///
/// let result = eval_scalar(BinaryOperator::Div, &Value::Integer(7), &Value::Integer(2));
/// assert_eq!(result.unwrap(), Value::Real(3.5));
/// ```
pub fn eval_scalar(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    use Value::{Integer, Real, Str};

    match (left, right) {
        (Integer(a), Integer(b)) => int_op(op, *a, *b),
        (Real(a), Real(b)) => real_op(op, *a, *b),
        (Integer(a), Real(b)) => real_op(op, int_to_real(*a)?, *b),
        (Real(a), Integer(b)) => real_op(op, *a, int_to_real(*b)?),

        (Str(a), Str(b)) if op == BinaryOperator::Add => {
            let mut joined = a.clone();
            joined.push_str(b);
            Ok(Str(joined))
        },
        (Str(s), Integer(n)) | (Integer(n), Str(s)) if op == BinaryOperator::Mul => {
            repeat_str(s, *n)
        },

        _ => Err(EvalError::TypeError { details: format!("Cannot use {op} on {} and {}",
                                                         left.type_name(),
                                                         right.type_name()) }),
    }
}

fn int_op(op: BinaryOperator, a: i64, b: i64) -> EvalResult<Value> {
    use BinaryOperator::{Add, Div, FloorDiv, Mod, Mul, Pow, Sub};

    match op {
        Add => a.checked_add(b).map(Value::Integer).ok_or(EvalError::Overflow),
        Sub => a.checked_sub(b).map(Value::Integer).ok_or(EvalError::Overflow),
        Mul => a.checked_mul(b).map(Value::Integer).ok_or(EvalError::Overflow),
        Div => {
            if b == 0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(Value::Real(int_to_real(a)? / int_to_real(b)?))
        },
        FloorDiv => {
            if b == 0 {
                return Err(EvalError::DivisionByZero);
            }
            let quotient = a.checked_div(b).ok_or(EvalError::Overflow)?;
            let remainder = a % b;
            // Rust truncates toward zero; adjust to floor toward negative
            // infinity when the signs differ.
            if remainder != 0 && (remainder < 0) != (b < 0) {
                Ok(Value::Integer(quotient - 1))
            } else {
                Ok(Value::Integer(quotient))
            }
        },
        Mod => {
            if b == 0 {
                return Err(EvalError::DivisionByZero);
            }
            // `i64::MIN % -1` overflows the hardware remainder; the value is 0.
            let remainder = a.checked_rem(b).unwrap_or(0);
            if remainder != 0 && (remainder < 0) != (b < 0) {
                Ok(Value::Integer(remainder + b))
            } else {
                Ok(Value::Integer(remainder))
            }
        },
        Pow => int_pow(a, b),
        _ => unreachable!("eval_scalar used with non arithmetic operator"),
    }
}

fn real_op(op: BinaryOperator, a: f64, b: f64) -> EvalResult<Value> {
    use BinaryOperator::{Add, Div, FloorDiv, Mod, Mul, Pow, Sub};

    match op {
        Add => Ok(Value::Real(a + b)),
        Sub => Ok(Value::Real(a - b)),
        Mul => Ok(Value::Real(a * b)),
        Div => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(Value::Real(a / b))
        },
        FloorDiv => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(Value::Real((a / b).floor()))
        },
        Mod => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            let remainder = a % b;
            if remainder != 0.0 && (remainder < 0.0) != (b < 0.0) {
                Ok(Value::Real(remainder + b))
            } else {
                Ok(Value::Real(remainder))
            }
        },
        Pow => Ok(Value::Real(a.powf(b))),
        _ => unreachable!("real_op used with non arithmetic operator"),
    }
}

/// Integer exponentiation; negative exponents fall back to real arithmetic.
fn int_pow(base: i64, exponent: i64) -> EvalResult<Value> {
    if exponent < 0 {
        if base == 0 {
            return Err(EvalError::DivisionByZero);
        }
        return Ok(Value::Real(int_to_real(base)?.powi(i32::try_from(exponent).map_err(|_| EvalError::Overflow)?)));
    }
    let exponent = u32::try_from(exponent).map_err(|_| EvalError::Overflow)?;
    base.checked_pow(exponent).map(Value::Integer).ok_or(EvalError::Overflow)
}

fn repeat_str(s: &ecow::EcoString, count: i64) -> EvalResult<Value> {
    if count <= 0 {
        return Ok(Value::Str(ecow::EcoString::new()));
    }
    let count = usize::try_from(count).map_err(|_| EvalError::Overflow)?;
    s.len()
     .checked_mul(count)
     .filter(|total| *total <= isize::MAX as usize)
     .ok_or(EvalError::Overflow)?;
    Ok(Value::Str(s.as_str().repeat(count).into()))
}
