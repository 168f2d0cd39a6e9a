/// Core evaluation logic.
///
/// Contains the tree walk that substitutes the bound argument for every
/// placeholder and replays the recorded operations bottom-up, including the
/// staging of compositions.
pub mod core;

/// Binary operator evaluation logic.
///
/// Routes each binary operation to the per-domain handlers: scalar
/// arithmetic, elementwise array math, comparisons, and bitwise operations.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements negation, absolute value, and bitwise complement.
pub mod unary;

/// Attribute and subscript evaluation.
///
/// Resolves attribute reads (data attributes and bound methods) and index or
/// slice access against the receiving value.
pub mod access;

/// Per-type method dispatch.
///
/// Implements the method tables for strings, arrays, maps and numbers, with
/// arity and keyword checking.
pub mod method;
