use ecow::EcoString;
use ordered_float::OrderedFloat;

use crate::{
    error::{EvalError, EvalResult},
    value::core::Value,
};

/// The hashable key form of a [`Value`], used by map values.
///
/// Only scalar value kinds can act as map keys; containers and functions are
/// rejected at lookup time. Real keys are made hashable through
/// [`OrderedFloat`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    /// An integer key such as `42`.
    Integer(i64),
    /// A boolean key.
    Bool(bool),
    /// A string key such as `"name"`.
    Str(EcoString),
    /// A real key such as `2.5`.
    Real(OrderedFloat<f64>),
}

impl MapKey {
    /// Converts a value into its key form.
    ///
    /// # Errors
    /// Returns a `TypeError` for value kinds that cannot be hashed (arrays,
    /// maps, slices, functions, unit).
    pub fn from_value(value: &Value) -> EvalResult<Self> {
        match value {
            Value::Integer(n) => Ok(Self::Integer(*n)),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Str(s) => Ok(Self::Str(s.clone())),
            Value::Real(r) => Ok(Self::Real(OrderedFloat(*r))),
            _ => Err(EvalError::TypeError { details: format!("Value of type {} cannot be used as a map key",
                                                             value.type_name()) }),
        }
    }
}

impl From<MapKey> for Value {
    fn from(key: MapKey) -> Self {
        match key {
            MapKey::Integer(n) => Self::Integer(n),
            MapKey::Bool(b) => Self::Bool(b),
            MapKey::Str(s) => Self::Str(s),
            MapKey::Real(r) => Self::Real(r.into_inner()),
        }
    }
}

impl From<i64> for MapKey {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<&str> for MapKey {
    fn from(v: &str) -> Self {
        Self::Str(v.into())
    }
}

impl std::fmt::Display for MapKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value: Value = self.clone().into();
        write!(f, "{value}")
    }
}
