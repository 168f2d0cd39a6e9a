use std::rc::Rc;

use crate::{
    error::{EvalError, EvalResult},
    value::core::Value,
};

/// A reference-counted, type-erased host function value.
///
/// Native functions are the "opaque callable" side of the engine: they can be
/// captured as constants, returned by attribute reads (bound methods), and
/// chained into compositions alongside deferred expressions. The underlying
/// closure receives its arguments as a slice; the common unary case is
/// wrapped by [`NativeFn::new`].
///
/// # Example
/// ```
/// use stencil::{NativeFn, Value, __};
///
/// let double = NativeFn::new(|v| Ok(Value::Integer(v.as_integer()? * 2)));
/// let expr = (__ + 1) >> double;
/// assert_eq!(expr.eval(5).unwrap(), Value::Integer(12));
/// ```
#[derive(Clone)]
pub struct NativeFn {
    name: &'static str,
    func: Rc<dyn Fn(&[Value]) -> EvalResult<Value>>,
}

impl NativeFn {
    /// Wraps a unary host closure.
    ///
    /// The resulting function accepts exactly one argument; any other arity
    /// produces an `ArgumentCountMismatch` error.
    pub fn new<F>(func: F) -> Self
        where F: Fn(Value) -> EvalResult<Value> + 'static
    {
        Self::variadic(move |args| match args {
            [arg] => func(arg.clone()),
            _ => Err(EvalError::ArgumentCountMismatch { name:     "<function>".to_string(),
                                                        expected: 1,
                                                        found:    args.len(), }),
        })
    }
    /// Wraps a host closure receiving its arguments as a slice.
    pub fn variadic<F>(func: F) -> Self
        where F: Fn(&[Value]) -> EvalResult<Value> + 'static
    {
        Self { name: "<function>",
               func: Rc::new(func) }
    }
    /// Like [`NativeFn::variadic`], but with a name used in display output
    /// and error messages. Used for bound methods.
    pub fn named<F>(name: &'static str, func: F) -> Self
        where F: Fn(&[Value]) -> EvalResult<Value> + 'static
    {
        Self { name,
               func: Rc::new(func) }
    }
    /// Calls the function with a slice of arguments.
    pub fn call(&self, args: &[Value]) -> EvalResult<Value> {
        (self.func)(args)
    }
    /// Applies the function to a single argument.
    ///
    /// This is the application form used by pipelines and compositions.
    pub fn apply(&self, arg: Value) -> EvalResult<Value> {
        (self.func)(std::slice::from_ref(&arg))
    }
    /// Returns the function's display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeFn").field("name", &self.name).finish_non_exhaustive()
    }
}

impl std::fmt::Display for NativeFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq for NativeFn {
    /// Two function values are equal only if they share the same underlying
    /// closure.
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}
