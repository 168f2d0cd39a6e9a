use ecow::EcoString;

use crate::{
    error::{EvalError, EvalResult},
    eval::{access, binary, method, unary},
    expr::{Callable, Expr},
    value::core::Value,
};

impl Expr {
    /// Evaluates the expression against a concrete argument.
    ///
    /// Every [`Expr::Placeholder`] leaf in the tree receives the same
    /// argument; there is no mechanism to bind distinct values to distinct
    /// occurrences. Evaluation is bottom-up and left-before-right, and the
    /// result is always a plain [`Value`], never a further-deferred node —
    /// which is what makes expressions usable wherever a unary function is
    /// expected.
    ///
    /// # Errors
    /// Evaluation is a transparent relay: any failure raised while resolving
    /// an operation against the bound value (type mismatch, division by
    /// zero, missing attribute, out-of-range index, ...) propagates
    /// unchanged.
    ///
    /// # Example
    /// ```
    /// use stencil::{Value, __};
    ///
    /// let expr = __ * __ - 1;
    /// assert_eq!(expr.eval(4).unwrap(), Value::Integer(15));
    ///
    /// let lengths: Vec<_> = ["a", "bc", "def"].iter()
    ///                                         .map(|s| __.method("len", vec![]).eval(*s))
    ///                                         .collect::<Result<_, _>>()
    ///                                         .unwrap();
    /// assert_eq!(lengths,
    ///            vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
    /// ```
    pub fn eval(&self, argument: impl Into<Value>) -> EvalResult<Value> {
        self.eval_value(&argument.into())
    }

    /// Evaluates the expression against an already-converted argument.
    ///
    /// This is the recursive worker behind [`Expr::eval`]; it borrows the
    /// argument so subtrees can share it without cloning at every level.
    pub fn eval_value(&self, argument: &Value) -> EvalResult<Value> {
        match self {
            Self::Placeholder => Ok(argument.clone()),
            Self::Constant(value) => Ok(value.clone()),
            Self::Unary { op, operand } => {
                let value = operand.eval_value(argument)?;
                unary::eval_unary(*op, &value)
            },
            Self::Binary { op, left, right } => {
                let left = left.eval_value(argument)?;
                let right = right.eval_value(argument)?;
                binary::eval_binary(*op, &left, &right)
            },
            Self::Attribute { base, name } => {
                let receiver = base.eval_value(argument)?;
                access::eval_attribute(&receiver, name)
            },
            Self::Call { base, args, kwargs } => eval_call(base, args, kwargs, argument),
            Self::Index { base, key } => {
                let base = base.eval_value(argument)?;
                let key = key.eval_value(argument)?;
                access::eval_index(&base, &key)
            },
            Self::Composition { first, second } => {
                let intermediate = first.apply(argument.clone())?;
                second.apply(intermediate)
            },
        }
    }
}

impl Callable {
    /// Applies this composition stage to a single value.
    pub fn apply(&self, value: Value) -> EvalResult<Value> {
        match self {
            Self::Expr(expr) => expr.eval_value(&value),
            Self::Native(func) => func.apply(value),
        }
    }
}

/// Evaluates a call node: arguments first (positional before keyword, each in
/// order), then the callee.
///
/// A call whose base is an attribute read is dispatched as a method on the
/// receiver, so keyword arguments reach the method table. Any other base must
/// evaluate to a function value.
fn eval_call(base: &Expr,
             args: &[Expr],
             kwargs: &[(EcoString, Expr)],
             argument: &Value)
             -> EvalResult<Value> {
    let mut arg_values = Vec::with_capacity(args.len());
    for arg in args {
        arg_values.push(arg.eval_value(argument)?);
    }
    let mut kwarg_values = Vec::with_capacity(kwargs.len());
    for (name, arg) in kwargs {
        kwarg_values.push((name.clone(), arg.eval_value(argument)?));
    }

    if let Expr::Attribute { base, name } = base {
        let receiver = base.eval_value(argument)?;
        return method::call_method(&receiver, name, &arg_values, &kwarg_values);
    }

    let callee = base.eval_value(argument)?;
    match callee {
        Value::Function(func) => {
            if let Some((name, _)) = kwarg_values.first() {
                return Err(EvalError::UnexpectedKeyword { name: name.to_string() });
            }
            func.call(&arg_values)
        },
        other => Err(EvalError::NotCallable { type_name: other.type_name() }),
    }
}
