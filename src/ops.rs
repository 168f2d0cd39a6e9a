//! Operator overloads that record into expression trees.
//!
//! Applying a Rust operator to a [`Placeholder`] or an [`Expr`] never
//! computes anything; it allocates a new tree node capturing the operator and
//! both operands. All impls here are concrete per right-hand type — exactly
//! one integer type (`i64`) and one float type (`f64`) are accepted, so an
//! unsuffixed literal like the `2` in `__ * 2` resolves without annotations.
//!
//! The `>>` operator is the exception to "record only": its impls implement
//! the chaining protocol at the type level. Expression-to-expression (or
//! expression-to-function) chains stay lazy and build an
//! [`Expr::Composition`]; chaining an expression with plain data evaluates
//! immediately, on whichever side the data appears. Plain data on both sides
//! never reaches this module — primitive `>>` keeps its intrinsic meaning —
//! and operands typed as [`crate::Value`] are classified at runtime by
//! [`crate::chain`] instead.

use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Shl, Shr, Sub};

use crate::{
    error::EvalResult,
    expr::{BinaryOperator, Expr, Placeholder, UnaryOperator},
    value::{core::Value, func::NativeFn},
};

/// Implements one recording operator for every left/right operand pairing.
macro_rules! recording_operator {
    ($op_trait:ident, $method:ident, $operator:ident) => {
        recording_operator!(@lhs $op_trait, $method, $operator, Expr);
        recording_operator!(@lhs $op_trait, $method, $operator, Placeholder);
        recording_operator!(@reflected $op_trait, $method, $operator, i64);
        recording_operator!(@reflected $op_trait, $method, $operator, f64);
        recording_operator!(@reflected $op_trait, $method, $operator, bool);
        recording_operator!(@reflected $op_trait, $method, $operator, &str);
    };
    (@lhs $op_trait:ident, $method:ident, $operator:ident, $lhs:ty) => {
        recording_operator!(@one $op_trait, $method, $operator, $lhs, Expr);
        recording_operator!(@one $op_trait, $method, $operator, $lhs, Placeholder);
        recording_operator!(@one $op_trait, $method, $operator, $lhs, Value);
        recording_operator!(@one $op_trait, $method, $operator, $lhs, i64);
        recording_operator!(@one $op_trait, $method, $operator, $lhs, f64);
        recording_operator!(@one $op_trait, $method, $operator, $lhs, bool);
        recording_operator!(@one $op_trait, $method, $operator, $lhs, &str);
    };
    (@one $op_trait:ident, $method:ident, $operator:ident, $lhs:ty, $rhs:ty) => {
        impl $op_trait<$rhs> for $lhs {
            type Output = Expr;

            fn $method(self, rhs: $rhs) -> Expr {
                Expr::binary(BinaryOperator::$operator, self, rhs)
            }
        }
    };
    (@reflected $op_trait:ident, $method:ident, $operator:ident, $lhs:ty) => {
        recording_operator!(@one $op_trait, $method, $operator, $lhs, Expr);
        recording_operator!(@one $op_trait, $method, $operator, $lhs, Placeholder);
    };
}

recording_operator!(Add, add, Add);
recording_operator!(Sub, sub, Sub);
recording_operator!(Mul, mul, Mul);
recording_operator!(Div, div, Div);
recording_operator!(Rem, rem, Mod);
recording_operator!(BitAnd, bitand, BitAnd);
recording_operator!(BitOr, bitor, BitOr);
recording_operator!(BitXor, bitxor, BitXor);
recording_operator!(Shl, shl, Shl);

impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self {
        Self::unary(UnaryOperator::Neg, self)
    }
}

impl Neg for Placeholder {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::unary(UnaryOperator::Neg, self)
    }
}

impl Not for Expr {
    type Output = Self;

    fn not(self) -> Self {
        Self::unary(UnaryOperator::Invert, self)
    }
}

impl Not for Placeholder {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::unary(UnaryOperator::Invert, self)
    }
}

/// Implements the lazy half of the chaining protocol: both sides callable, so
/// `>>` fuses them into a composition without evaluating anything.
macro_rules! composition_operator {
    ($($lhs:ty),+) => {
        $(
            impl Shr<Expr> for $lhs {
                type Output = Expr;

                fn shr(self, rhs: Expr) -> Expr {
                    Expr::compose(self, rhs)
                }
            }

            impl Shr<Placeholder> for $lhs {
                type Output = Expr;

                fn shr(self, rhs: Placeholder) -> Expr {
                    Expr::compose(self, rhs)
                }
            }

            impl Shr<NativeFn> for $lhs {
                type Output = Expr;

                fn shr(self, rhs: NativeFn) -> Expr {
                    Expr::compose(self, rhs)
                }
            }
        )+
    };
}

composition_operator!(Expr, Placeholder, NativeFn);

/// Implements the eager half of the chaining protocol: one side is plain
/// data, so `>>` feeds it through the callable side immediately, whichever
/// side the data appears on.
macro_rules! pipeline_operator {
    ($($data:ty),+) => {
        $(
            impl Shr<$data> for Expr {
                type Output = EvalResult<Value>;

                fn shr(self, rhs: $data) -> EvalResult<Value> {
                    self.eval(rhs)
                }
            }

            impl Shr<$data> for Placeholder {
                type Output = EvalResult<Value>;

                fn shr(self, rhs: $data) -> EvalResult<Value> {
                    Expr::Placeholder.eval(rhs)
                }
            }

            impl Shr<$data> for NativeFn {
                type Output = EvalResult<Value>;

                fn shr(self, rhs: $data) -> EvalResult<Value> {
                    self.apply(rhs.into())
                }
            }

            impl Shr<Expr> for $data {
                type Output = EvalResult<Value>;

                fn shr(self, rhs: Expr) -> EvalResult<Value> {
                    rhs.eval(self)
                }
            }

            impl Shr<Placeholder> for $data {
                type Output = EvalResult<Value>;

                fn shr(self, _: Placeholder) -> EvalResult<Value> {
                    Ok(self.into())
                }
            }

            impl Shr<NativeFn> for $data {
                type Output = EvalResult<Value>;

                fn shr(self, rhs: NativeFn) -> EvalResult<Value> {
                    rhs.apply(self.into())
                }
            }
        )+
    };
}

pipeline_operator!(i64, f64, bool, &str);

// Continuations: a pipeline already produced a result (or an error), and
// another callable stage follows. Errors short-circuit the remaining stages.

impl Shr<Expr> for EvalResult<Value> {
    type Output = Self;

    fn shr(self, rhs: Expr) -> Self {
        self.and_then(|value| rhs.eval_value(&value))
    }
}

impl Shr<Placeholder> for EvalResult<Value> {
    type Output = Self;

    fn shr(self, _: Placeholder) -> Self {
        self
    }
}

impl Shr<NativeFn> for EvalResult<Value> {
    type Output = Self;

    fn shr(self, rhs: NativeFn) -> Self {
        self.and_then(|value| rhs.apply(value))
    }
}
