//! # stencil
//!
//! stencil is a deferred-expression engine. A placeholder value, conventionally
//! imported as `__`, records every operation applied to it into an immutable
//! expression tree instead of computing anything; the tree is evaluated later
//! by substituting one concrete argument for every placeholder occurrence.
//! Expressions chain with `>>` into pipelines and compositions.
//!
//! ```
//! use stencil::{Value, __};
//!
//! let expr = (__ + 1) * 2;
//! assert_eq!(expr.eval(20).unwrap(), Value::Integer(42));
//!
//! // `>>` with data on one side evaluates immediately...
//! assert_eq!((3 >> (__ * __)).unwrap(), Value::Integer(9));
//!
//! // ...and with callables on both sides it stays lazy.
//! let pipeline = (__ * 2 + 1) >> __.abs();
//! assert_eq!(pipeline.eval(-3).unwrap(), Value::Integer(5));
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Implements the runtime side of the chaining operator.
///
/// This module classifies operands that are only known at runtime — such as a
/// function value read out of a map — as callable or data, and applies the
/// same composition-versus-pipeline protocol that the static `>>` impls apply
/// at the type level.
///
/// # Responsibilities
/// - Classifies runtime values as composition stages or plain data.
/// - Fuses two callables into a lazy composition.
/// - Evaluates callable/data pairs immediately, on either side.
pub mod chain;
/// Provides the error type shared by every evaluation path.
///
/// This module defines all errors that can be raised while resolving a
/// recorded operation against concrete values. Building a tree is total and
/// never fails; every failure mode here is an evaluation-time one.
///
/// # Responsibilities
/// - Defines the error enum for all failure modes (type mismatches, division
///   by zero, overflow, missing attributes, keys and indices).
/// - Carries enough detail for actionable messages.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Evaluates recorded expression trees against concrete arguments.
///
/// This module walks a tree bottom-up, substituting the bound argument for
/// every placeholder leaf and resolving each recorded operation against the
/// values that reach it: scalar and elementwise arithmetic, comparisons,
/// bitwise operations, attribute reads, method calls, and indexing.
///
/// # Responsibilities
/// - Implements `Expr::eval`, the single entry point for evaluation.
/// - Resolves every operator against the operand types it receives.
/// - Propagates evaluation errors unchanged through nested trees.
pub mod eval;
/// Defines the structure of recorded expressions.
///
/// This module declares the placeholder, the `Expr` tree and the operator
/// enums that represent deferred computations. Nodes are immutable and share
/// subtrees by reference counting, so one tree can appear inside many others.
///
/// # Responsibilities
/// - Defines expression node types for every recordable operation.
/// - Provides builder methods for operations Rust operators cannot spell.
/// - Converts plain values into captured constants.
pub mod expr;
/// Implements the operator overloads that record into trees.
///
/// This module makes `__ + 1`, `-__`, `__ * __` and friends build expression
/// nodes, and implements the static half of the chaining protocol for `>>`.
///
/// # Responsibilities
/// - Records arithmetic, bitwise and shift operators as tree nodes.
/// - Keeps unsuffixed numeric literals inferable by accepting exactly one
///   integer and one float type.
/// - Resolves `>>` into composition or immediate evaluation by operand type.
pub mod ops;
/// Defines the runtime values that flow through evaluation.
///
/// This module declares the `Value` enum together with its supporting types:
/// hashable map keys, slice descriptors, and reference-counted host
/// functions.
///
/// # Responsibilities
/// - Models every type usable as an argument, constant, or result.
/// - Converts transparently from plain Rust values.
/// - Provides safe numeric conversion between integers and reals.
pub mod value;

pub use crate::{
    chain::{chain, Chained, Operand},
    error::{EvalError, EvalResult},
    expr::{BinaryOperator, Callable, Expr, Placeholder, UnaryOperator, __},
    value::{core::Value, func::NativeFn, key::MapKey, slice::Slice},
};
