//! Runtime side of the chaining operator.
//!
//! The `>>` operator on expressions is resolved statically by the operator
//! impls in [`crate::ops`]: the compiler already knows whether each side is a
//! deferred expression or plain data. This module is the dynamic counterpart
//! for operands that only exist at runtime, such as a function value pulled
//! out of a map or returned by an earlier evaluation. [`chain`] classifies
//! both operands and applies the same protocol:
//!
//! - callable and callable fuse into a lazy composition;
//! - callable and data (in either order) evaluate immediately;
//! - data and data fall back to the ordinary binary shift.

use crate::{
    error::EvalResult,
    eval::binary,
    expr::{BinaryOperator, Callable, Expr, Placeholder},
    value::{core::Value, func::NativeFn},
};

/// One side of a runtime chain, classified as callable or data.
///
/// The conversion from [`Value`] performs the classification: a function
/// value becomes [`Operand::Callable`], everything else is data.
#[derive(Debug, Clone)]
pub enum Operand {
    /// A composition stage: a deferred expression or a host function.
    Callable(Callable),
    /// A concrete value to feed into, or shift against, the other side.
    Data(Value),
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        match value {
            Value::Function(func) => Self::Callable(Callable::Native(func)),
            other => Self::Data(other),
        }
    }
}

impl From<Expr> for Operand {
    fn from(expr: Expr) -> Self {
        Self::Callable(Callable::from(expr))
    }
}

impl From<Placeholder> for Operand {
    fn from(placeholder: Placeholder) -> Self {
        Self::Callable(Callable::from(placeholder))
    }
}

impl From<NativeFn> for Operand {
    fn from(func: NativeFn) -> Self {
        Self::Callable(Callable::Native(func))
    }
}

impl From<Callable> for Operand {
    fn from(callable: Callable) -> Self {
        Self::Callable(callable)
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Self::Data(v.into())
    }
}

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Self::Data(v.into())
    }
}

impl From<bool> for Operand {
    fn from(v: bool) -> Self {
        Self::Data(v.into())
    }
}

impl From<&str> for Operand {
    fn from(v: &str) -> Self {
        Self::Data(v.into())
    }
}

/// The outcome of chaining two runtime operands.
#[derive(Debug, Clone)]
pub enum Chained {
    /// A fused composition, still waiting for an argument.
    Expr(Expr),
    /// An already-computed result.
    Value(Value),
}

impl Chained {
    /// Returns the computed value, if the chain evaluated immediately.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Expr(_) => None,
        }
    }
    /// Returns the fused expression, if the chain stayed lazy.
    #[must_use]
    pub fn into_expr(self) -> Option<Expr> {
        match self {
            Self::Expr(expr) => Some(expr),
            Self::Value(_) => None,
        }
    }
}

/// Chains two runtime operands.
///
/// Two callables produce a lazy [`Chained::Expr`] composition; the result
/// never fails. A callable paired with data evaluates right away, feeding the
/// data through the callable regardless of which side it appears on. Two data
/// operands are shifted with the intrinsic `>>`.
///
/// # Errors
/// Immediate evaluation and the intrinsic shift surface their usual
/// evaluation errors; composition itself never fails.
///
/// # Example
/// ```
/// use stencil::{chain, Operand, Value, __};
///
/// let stage = Operand::from(__ + 1);
/// let result = chain(stage, Operand::from(4)).unwrap();
/// assert_eq!(result.into_value(), Some(Value::Integer(5)));
/// ```
pub fn chain(left: Operand, right: Operand) -> EvalResult<Chained> {
    use Operand::{Callable, Data};

    match (left, right) {
        (Callable(first), Callable(second)) => {
            Ok(Chained::Expr(Expr::Composition { first, second }))
        },
        (Data(value), Callable(stage)) | (Callable(stage), Data(value)) => {
            Ok(Chained::Value(stage.apply(value)?))
        },
        (Data(left), Data(right)) => {
            Ok(Chained::Value(binary::eval_binary(BinaryOperator::Shr, &left, &right)?))
        },
    }
}
