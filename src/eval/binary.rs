use crate::{error::EvalResult, expr::BinaryOperator, value::core::Value};

/// Elementwise array arithmetic.
pub mod array;
/// Bitwise and shift operations.
pub mod bitwise;
/// Equality and relational comparisons.
pub mod comparison;
/// Scalar arithmetic on numbers and strings.
pub mod scalar;

/// Evaluates a binary operation between two values.
///
/// Arithmetic operations route to elementwise array evaluation when either
/// side is an array (array with array, or array with scalar broadcast in
/// either order) and to scalar evaluation otherwise. Comparisons and bitwise
/// operations have their own handlers. The dispatch never inspects value
/// internals beyond the variant; each handler defers to the operand types'
/// own semantics.
///
/// # Example
/// ```
/// use stencil::{eval::binary::eval_binary, BinaryOperator, Value};
///
/// let left = Value::Integer(3);
/// let right = Value::Integer(4);
///
/// let result = eval_binary(BinaryOperator::Add, &left, &right);
/// assert_eq!(result.unwrap(), Value::Integer(7));
/// ```
pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    use BinaryOperator::{
        Add, BitAnd, BitOr, BitXor, Div, Eq, FloorDiv, Ge, Gt, Le, Lt, Mod, Mul, Ne, Pow, Shl,
        Shr, Sub,
    };
    use Value::Array;

    match op {
        Add | Sub | Mul | Div | FloorDiv | Mod | Pow => match (left, right) {
            (Array(a), Array(b)) => array::eval_array_array(op, a, b),
            (Array(a), b) => array::eval_array_scalar(op, a, b),
            (a, Array(b)) => array::eval_scalar_array(op, a, b),
            _ => scalar::eval_scalar(op, left, right),
        },

        Eq | Ne | Lt | Gt | Le | Ge => comparison::eval_comparison(op, left, right),

        BitAnd | BitOr | BitXor | Shl | Shr => bitwise::eval_bitwise(op, left, right),
    }
}
