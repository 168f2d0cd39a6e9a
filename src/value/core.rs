use std::rc::Rc;

use ecow::EcoString;
use indexmap::IndexMap;

use crate::{
    error::{EvalError, EvalResult},
    value::{func::NativeFn, key::MapKey, slice::Slice},
};

/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INT: i64 = 9_007_199_254_740_991;

/// Represents a runtime value flowing through evaluation.
///
/// This enum models every type that can appear as an evaluation argument, a
/// captured constant, or an evaluation result. The evaluator imposes no
/// schema beyond "supports the operations recorded in the tree"; each
/// operation is resolved against the variant's own semantics.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double precision floating-point number.
    Real(f64),
    /// A boolean value (`true` or `false`), produced by comparison operators.
    Bool(bool),
    /// An immutable string.
    Str(EcoString),
    /// An array of values. Arithmetic on arrays is elementwise, with scalar
    /// broadcast on either side.
    Array(Rc<Vec<Value>>),
    /// An insertion-ordered mapping from hashable keys to values.
    Map(Rc<IndexMap<MapKey, Value>>),
    /// A slice descriptor, usable as a subscript key.
    Slice(Slice),
    /// A host function value; callable, and a valid composition stage.
    Function(NativeFn),
    /// The absence of a value, e.g. a missing map entry default.
    Unit,
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v.into())
    }
}

impl From<EcoString> for Value {
    fn from(v: EcoString) -> Self {
        Self::Str(v)
    }
}

impl From<Slice> for Value {
    fn from(v: Slice) -> Self {
        Self::Slice(v)
    }
}

impl From<NativeFn> for Value {
    fn from(v: NativeFn) -> Self {
        Self::Function(v)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Unit
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Array(Rc::new(v.into_iter().map(Into::into).collect()))
    }
}

impl From<IndexMap<MapKey, Self>> for Value {
    fn from(v: IndexMap<MapKey, Self>) -> Self {
        Self::Map(Rc::new(v))
    }
}

/// Converts an `i64` to `f64` if and only if it is exactly representable.
///
/// # Errors
/// Returns `EvalError::Overflow` if the magnitude exceeds [`MAX_SAFE_INT`].
///
/// # Example
/// ```
/// use stencil::value::core::int_to_real;
///
/// assert_eq!(int_to_real(42).unwrap(), 42.0);
/// assert!(int_to_real(i64::MAX).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub const fn int_to_real(value: i64) -> EvalResult<f64> {
    if value.unsigned_abs() > MAX_SAFE_INT as u64 {
        return Err(EvalError::Overflow);
    }
    Ok(value as f64)
}

impl Value {
    /// Returns the name of this value's type, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Bool(_) => "boolean",
            Self::Str(_) => "string",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Slice(_) => "slice",
            Self::Function(_) => "function",
            Self::Unit => "unit",
        }
    }
    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// Accepts `Value::Real` and `Value::Integer`. For integers, conversion
    /// fails if the value is too large to be represented as `f64` exactly.
    ///
    /// # Example
    /// ```
    /// use stencil::Value;
    ///
    /// assert_eq!(Value::Integer(10).as_real().unwrap(), 10.0);
    /// ```
    pub fn as_real(&self) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            Self::Integer(n) => int_to_real(*n),
            _ => Err(EvalError::TypeError { details: format!("Expected a number, found {}",
                                                             self.type_name()) }),
        }
    }
    /// Converts the value to `i64`, or returns an error if not an integer.
    pub fn as_integer(&self) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            _ => Err(EvalError::TypeError { details: format!("Expected an integer, found {}",
                                                             self.type_name()) }),
        }
    }
    /// Converts the value to `bool`, or returns an error if not boolean.
    pub fn as_bool(&self) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(EvalError::TypeError { details: format!("Expected a boolean, found {}",
                                                             self.type_name()) }),
        }
    }
    /// Borrows the value as a string, or returns an error.
    pub fn as_str(&self) -> EvalResult<&EcoString> {
        match self {
            Self::Str(s) => Ok(s),
            _ => Err(EvalError::TypeError { details: format!("Expected a string, found {}",
                                                             self.type_name()) }),
        }
    }
    /// Borrows the value as an array of values, or returns an error.
    pub fn as_array(&self) -> EvalResult<&[Self]> {
        match self {
            Self::Array(v) => Ok(v),
            _ => Err(EvalError::TypeError { details: format!("Expected an array, found {}",
                                                             self.type_name()) }),
        }
    }
    /// Returns `true` if the value is numeric (integer or real).
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Real(_))
    }
    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }
    /// Returns `true` if the value is [`Function`].
    ///
    /// [`Function`]: Value::Function
    #[must_use]
    pub const fn is_function(&self) -> bool {
        matches!(self, Self::Function(_))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Array(items) => {
                write!(f, "[")?;
                for (index, value) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            },
            Self::Map(entries) => {
                write!(f, "{{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            },
            Self::Slice(s) => write!(f, "{s}"),
            Self::Function(func) => write!(f, "{func}"),
            Self::Unit => write!(f, "()"),
        }
    }
}
