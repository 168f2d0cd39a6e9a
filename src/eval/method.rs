use std::rc::Rc;

use ecow::EcoString;
use indexmap::IndexMap;

use crate::{
    error::{EvalError, EvalResult},
    eval::binary::{self, comparison},
    expr::BinaryOperator,
    value::{core::Value, func::NativeFn, key::MapKey},
};

const STR_METHODS: &[&str] = &["upper", "lower", "strip", "split", "replace", "len"];
const ARRAY_METHODS: &[&str] = &["len", "copy", "reverse", "contains", "sum"];
const MAP_METHODS: &[&str] = &["len", "keys", "values", "get", "contains"];
const NUMBER_METHODS: &[&str] = &["abs", "round", "floor", "ceil"];

/// Resolves an attribute name to a bound method on the receiver.
///
/// The returned function value captures a clone of the receiver, so it stays
/// callable independently of the expression it was read from. Names that the
/// receiver's type does not define produce an `UnknownAttribute` error at
/// read time, not at call time.
pub fn bound_method(receiver: &Value, name: &str) -> EvalResult<Value> {
    let table = match receiver {
        Value::Str(_) => STR_METHODS,
        Value::Array(_) => ARRAY_METHODS,
        Value::Map(_) => MAP_METHODS,
        Value::Integer(_) | Value::Real(_) => NUMBER_METHODS,
        _ => &[],
    };
    let Some(method) = table.iter().copied().find(|known| *known == name) else {
        return Err(EvalError::UnknownAttribute { type_name: receiver.type_name(),
                                                 name:      name.to_string(), });
    };

    let receiver = receiver.clone();
    Ok(Value::Function(NativeFn::named(method, move |args| {
        call_method(&receiver, method, args, &[])
    })))
}

/// Invokes a named method directly on a receiver value.
///
/// This is the dispatch point for call nodes whose base is an attribute
/// read; it sees keyword arguments, which plain function values never
/// accept. Every method checks its own arity, so a wrong argument count is
/// reported against the method's name.
pub fn call_method(receiver: &Value,
                   name: &str,
                   args: &[Value],
                   kwargs: &[(EcoString, Value)])
                   -> EvalResult<Value> {
    match receiver {
        Value::Str(s) => str_method(s, name, args, kwargs),
        Value::Array(items) => array_method(items, name, args, kwargs),
        Value::Map(entries) => map_method(entries, name, args, kwargs),
        Value::Integer(_) | Value::Real(_) => number_method(receiver, name, args, kwargs),
        _ => Err(unknown(receiver, name)),
    }
}

fn str_method(s: &EcoString,
              name: &str,
              args: &[Value],
              kwargs: &[(EcoString, Value)])
              -> EvalResult<Value> {
    reject_kwargs(kwargs)?;
    match name {
        "upper" => {
            check_arity(name, 0, args)?;
            Ok(Value::Str(s.to_uppercase()))
        },
        "lower" => {
            check_arity(name, 0, args)?;
            Ok(Value::Str(s.to_lowercase()))
        },
        "strip" => {
            check_arity(name, 0, args)?;
            Ok(Value::Str(s.trim().into()))
        },
        "split" => match args {
            [] => Ok(s.split_whitespace().map(Value::from).collect::<Vec<_>>().into()),
            [separator] => {
                let separator = separator.as_str()?;
                Ok(s.split(separator.as_str()).map(Value::from).collect::<Vec<_>>().into())
            },
            _ => Err(arity_error(name, 1, args.len())),
        },
        "replace" => {
            check_arity(name, 2, args)?;
            let from = args[0].as_str()?;
            let to = args[1].as_str()?;
            Ok(Value::Str(s.replace(from.as_str(), to.as_str()).into()))
        },
        "len" => {
            check_arity(name, 0, args)?;
            length(s.chars().count())
        },
        _ => Err(unknown(&Value::Str(s.clone()), name)),
    }
}

fn array_method(items: &Rc<Vec<Value>>,
                name: &str,
                args: &[Value],
                kwargs: &[(EcoString, Value)])
                -> EvalResult<Value> {
    reject_kwargs(kwargs)?;
    match name {
        "len" => {
            check_arity(name, 0, args)?;
            length(items.len())
        },
        "copy" => {
            check_arity(name, 0, args)?;
            Ok(Value::Array(Rc::new(items.as_ref().clone())))
        },
        "reverse" => {
            check_arity(name, 0, args)?;
            let reversed = items.iter().rev().cloned().collect();
            Ok(Value::Array(Rc::new(reversed)))
        },
        "contains" => {
            check_arity(name, 1, args)?;
            let found = items.iter().any(|item| comparison::values_equal(item, &args[0]));
            Ok(Value::Bool(found))
        },
        "sum" => {
            check_arity(name, 0, args)?;
            let mut total = Value::Integer(0);
            for item in items.iter() {
                total = binary::eval_binary(BinaryOperator::Add, &total, item)?;
            }
            Ok(total)
        },
        _ => Err(unknown(&Value::Array(Rc::clone(items)), name)),
    }
}

fn map_method(entries: &Rc<IndexMap<MapKey, Value>>,
              name: &str,
              args: &[Value],
              kwargs: &[(EcoString, Value)])
              -> EvalResult<Value> {
    match name {
        "len" => {
            reject_kwargs(kwargs)?;
            check_arity(name, 0, args)?;
            length(entries.len())
        },
        "keys" => {
            reject_kwargs(kwargs)?;
            check_arity(name, 0, args)?;
            let keys = entries.keys().cloned().map(Value::from).collect();
            Ok(Value::Array(Rc::new(keys)))
        },
        "values" => {
            reject_kwargs(kwargs)?;
            check_arity(name, 0, args)?;
            Ok(Value::Array(Rc::new(entries.values().cloned().collect())))
        },
        "get" => {
            // `get(key)`, `get(key, default)`, or `get(key, default=...)`.
            let default = match (args, kwargs) {
                ([_], []) => Value::Unit,
                ([_, default], []) => default.clone(),
                ([_], [(keyword, default)]) if keyword == "default" => default.clone(),
                ([_], [(keyword, _)]) => {
                    return Err(EvalError::UnexpectedKeyword { name: keyword.to_string() })
                },
                _ => return Err(arity_error(name, 1, args.len())),
            };
            let key = MapKey::from_value(&args[0])?;
            Ok(entries.get(&key).cloned().unwrap_or(default))
        },
        "contains" => {
            reject_kwargs(kwargs)?;
            check_arity(name, 1, args)?;
            let key = MapKey::from_value(&args[0])?;
            Ok(Value::Bool(entries.contains_key(&key)))
        },
        _ => Err(unknown(&Value::Map(Rc::clone(entries)), name)),
    }
}

fn number_method(receiver: &Value,
                 name: &str,
                 args: &[Value],
                 kwargs: &[(EcoString, Value)])
                 -> EvalResult<Value> {
    reject_kwargs(kwargs)?;
    check_arity(name, 0, args)?;
    match (receiver, name) {
        (Value::Integer(n), "abs") => {
            n.checked_abs().map(Value::Integer).ok_or(EvalError::Overflow)
        },
        (Value::Integer(n), "round" | "floor" | "ceil") => Ok(Value::Integer(*n)),

        (Value::Real(x), "abs") => Ok(Value::Real(x.abs())),
        (Value::Real(x), "round") => real_to_int(x.round_ties_even()),
        (Value::Real(x), "floor") => real_to_int(x.floor()),
        (Value::Real(x), "ceil") => real_to_int(x.ceil()),

        _ => Err(unknown(receiver, name)),
    }
}

/// Converts an already-rounded real to an integer, rejecting values outside
/// the integer range.
#[allow(clippy::cast_possible_truncation)]
fn real_to_int(value: f64) -> EvalResult<Value> {
    if !value.is_finite() || value < i64::MIN as f64 || value > i64::MAX as f64 {
        return Err(EvalError::Overflow);
    }
    Ok(Value::Integer(value as i64))
}

fn length(len: usize) -> EvalResult<Value> {
    i64::try_from(len).map(Value::Integer).map_err(|_| EvalError::Overflow)
}

fn check_arity(name: &str, expected: usize, args: &[Value]) -> EvalResult<()> {
    if args.len() == expected {
        return Ok(());
    }
    Err(arity_error(name, expected, args.len()))
}

fn arity_error(name: &str, expected: usize, found: usize) -> EvalError {
    EvalError::ArgumentCountMismatch { name: name.to_string(),
                                       expected,
                                       found }
}

fn reject_kwargs(kwargs: &[(EcoString, Value)]) -> EvalResult<()> {
    match kwargs.first() {
        Some((name, _)) => Err(EvalError::UnexpectedKeyword { name: name.to_string() }),
        None => Ok(()),
    }
}

fn unknown(receiver: &Value, name: &str) -> EvalError {
    EvalError::UnknownAttribute { type_name: receiver.type_name(),
                                  name:      name.to_string(), }
}
