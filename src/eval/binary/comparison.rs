use std::cmp::Ordering;

use crate::{
    error::{EvalError, EvalResult},
    expr::BinaryOperator,
    value::core::Value,
};

/// Maps an equality-style operator and a boolean equality result to the
/// final boolean value. Inverts the result for `Ne`.
#[must_use]
pub fn equality_op_result(op: BinaryOperator, is_equal: bool) -> bool {
    match op {
        BinaryOperator::Eq => is_equal,
        BinaryOperator::Ne => !is_equal,
        _ => unreachable!("equality_op_result used with non equality operator"),
    }
}

/// Structural equality with cross-type numeric comparison.
///
/// Integers and reals compare equal when they denote the same number;
/// arrays and maps compare their contents; every other pair compares by
/// variant. Never fails: values of incomparable types are simply unequal.
#[must_use]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    use Value::{Array, Integer, Real};

    match (left, right) {
        (Integer(_), Real(_)) | (Real(_), Integer(_)) => {
            number_cmp(left, right) == Some(Ordering::Equal)
        },
        (Array(a), Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| values_equal(x, y))
        },
        _ => left == right,
    }
}

/// Orders two numeric values exactly.
///
/// Mixed integer/real pairs are not promoted through `f64` (which would lose
/// precision, or reject magnitudes beyond the safe conversion range); the
/// integer is compared against the real's whole part instead. Returns `None`
/// only when a NaN is involved.
fn number_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    use Value::{Integer, Real};

    match (left, right) {
        (Integer(a), Integer(b)) => Some(a.cmp(b)),
        (Real(a), Real(b)) => a.partial_cmp(b),
        (Integer(a), Real(b)) => int_real_cmp(*a, *b),
        (Real(a), Integer(b)) => int_real_cmp(*b, *a).map(Ordering::reverse),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn int_real_cmp(a: i64, b: f64) -> Option<Ordering> {
    if b.is_nan() {
        return None;
    }
    // 2^63 is exact as f64, so every i64 lies strictly inside these bounds.
    if b >= 9_223_372_036_854_775_808.0 {
        return Some(Ordering::Less);
    }
    if b < -9_223_372_036_854_775_808.0 {
        return Some(Ordering::Greater);
    }

    let whole = b.floor();
    match a.cmp(&(whole as i64)) {
        // Equal whole parts: any fractional remainder puts the real above.
        Ordering::Equal if b > whole => Some(Ordering::Less),
        ordering => Some(ordering),
    }
}

/// Evaluates a comparison of the form `Value <Operator> Value`.
///
/// `Eq` and `Ne` use structural equality with cross-type numeric comparison
/// and never fail. Relational operators are defined for numbers (compared
/// exactly, whatever their representation) and for strings (lexicographic);
/// any other pairing is a type error.
///
/// # Example
/// ```
/// use stencil::{eval::binary::comparison::eval_comparison, BinaryOperator, Value};
///
/// let a = Value::Integer(3);
/// let b = Value::Real(5.0);
///
/// let result = eval_comparison(BinaryOperator::Lt, &a, &b);
/// assert_eq!(result.unwrap(), Value::Bool(true));
/// ```
pub fn eval_comparison(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    use BinaryOperator::{Eq, Ge, Gt, Le, Lt, Ne};
    use Value::Str;

    Ok(Value::Bool(match op {
                       Eq | Ne => equality_op_result(op, values_equal(left, right)),

                       Lt | Gt | Le | Ge => match (left, right) {
                           (Str(a), Str(b)) => relational_op_result(op, a.cmp(b)),
                           _ if left.is_number() && right.is_number() => {
                               // NaN is unordered: every relational test fails.
                               number_cmp(left, right).is_some_and(|ordering| {
                                                          relational_op_result(op, ordering)
                                                      })
                           },
                           _ => {
                               return Err(EvalError::TypeError { details: format!("Cannot compare {} and {}",
                                                                                  left.type_name(),
                                                                                  right.type_name()) });
                           },
                       },

                       _ => unreachable!("eval_comparison used with non comparison operator"),
                   }))
}

fn relational_op_result(op: BinaryOperator, ordering: std::cmp::Ordering) -> bool {
    match op {
        BinaryOperator::Lt => ordering.is_lt(),
        BinaryOperator::Gt => ordering.is_gt(),
        BinaryOperator::Le => ordering.is_le(),
        BinaryOperator::Ge => ordering.is_ge(),
        _ => unreachable!("relational_op_result used with non relational operator"),
    }
}
