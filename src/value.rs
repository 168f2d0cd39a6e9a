/// Core value representation used during evaluation.
///
/// Defines the `Value` enum covering every type an evaluated expression can
/// produce or consume, together with conversions from host types, accessor
/// helpers, and display formatting.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements conversions between host types and values.
/// - Provides checked accessors and numeric promotion helpers.
pub mod core;
/// Type-erased function values.
///
/// A `NativeFn` wraps an ordinary host closure behind reference counting so
/// functions can flow through the evaluator like any other value: captured in
/// constants, produced by attribute reads (bound methods), and used as
/// composition stages.
pub mod func;
/// Hashable key form of values, used by map values.
///
/// Only scalar values can be map keys; real numbers are made hashable through
/// `OrderedFloat`.
pub mod key;
/// Slice descriptors for subscript access.
///
/// A slice captures optional start/stop/step bounds and normalizes them
/// against a concrete sequence length at evaluation time.
pub mod slice;
