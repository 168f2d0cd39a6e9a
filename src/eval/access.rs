use std::rc::Rc;

use ecow::EcoString;

use crate::{
    error::{EvalError, EvalResult},
    eval::method,
    value::{core::Value, key::MapKey},
};

/// Evaluates an attribute read on a value.
///
/// Data attributes (`real` and `imag` on numbers) produce their value
/// directly; any other known name resolves through the method table to a
/// bound method — a function value capturing the receiver. Unknown names
/// produce an `UnknownAttribute` error.
///
/// # Example
/// ```
/// use stencil::{Value, __};
///
/// let expr = __.attr("real");
/// assert_eq!(expr.eval(5).unwrap(), Value::Integer(5));
/// ```
pub fn eval_attribute(receiver: &Value, name: &str) -> EvalResult<Value> {
    match (receiver, name) {
        (Value::Integer(_) | Value::Real(_), "real") => Ok(receiver.clone()),
        (Value::Integer(_), "imag") => Ok(Value::Integer(0)),
        (Value::Real(_), "imag") => Ok(Value::Real(0.0)),
        _ => method::bound_method(receiver, name),
    }
}

/// Evaluates a subscript access.
///
/// Arrays and strings accept integer keys (negative counts from the end)
/// and slice descriptors; maps accept any hashable key. The error surfaced
/// is the one the container itself defines: `IndexOutOfBounds` for
/// sequences, `KeyNotFound` for maps, and a `TypeError` for unsupported
/// base or key types.
///
/// # Example
/// ```
/// use stencil::{Value, __};
///
/// let last = __.index(-1);
/// assert_eq!(last.eval(vec![1i64, 2, 3]).unwrap(), Value::Integer(3));
/// ```
pub fn eval_index(base: &Value, key: &Value) -> EvalResult<Value> {
    match (base, key) {
        (Value::Array(items), Value::Integer(index)) => {
            let position = normalize_index(*index, items.len())?;
            Ok(items[position].clone())
        },
        (Value::Array(items), Value::Slice(slice)) => {
            let selected = slice.resolve(items.len())?
                                .into_iter()
                                .map(|position| items[position].clone())
                                .collect();
            Ok(Value::Array(Rc::new(selected)))
        },

        (Value::Str(s), Value::Integer(index)) => {
            let chars: Vec<char> = s.chars().collect();
            let position = normalize_index(*index, chars.len())?;
            Ok(Value::Str(EcoString::from(chars[position])))
        },
        (Value::Str(s), Value::Slice(slice)) => {
            let chars: Vec<char> = s.chars().collect();
            let selected: EcoString = slice.resolve(chars.len())?
                                           .into_iter()
                                           .map(|position| chars[position])
                                           .collect();
            Ok(Value::Str(selected))
        },

        (Value::Map(entries), _) => {
            let key = MapKey::from_value(key)?;
            entries.get(&key)
                   .cloned()
                   .ok_or_else(|| EvalError::KeyNotFound { key: key.to_string() })
        },

        (Value::Array(_) | Value::Str(_), _) => {
            Err(EvalError::TypeError { details: format!("{} indices must be integers or slices, not {}",
                                                        base.type_name(),
                                                        key.type_name()) })
        },
        _ => Err(EvalError::TypeError { details: format!("Value of type {} is not subscriptable",
                                                         base.type_name()) }),
    }
}

/// Normalizes a possibly-negative index against a sequence length.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn normalize_index(index: i64, len: usize) -> EvalResult<usize> {
    let len_i = len as i64;
    let position = if index < 0 { index + len_i } else { index };

    if position < 0 || position >= len_i {
        return Err(EvalError::IndexOutOfBounds { len, index });
    }
    Ok(position as usize)
}
