use std::rc::Rc;

use ecow::EcoString;

use crate::value::{core::Value, func::NativeFn, slice::Slice};

/// The canonical placeholder, conventionally imported as `__`.
///
/// Every operation applied to the placeholder produces an [`Expr`] recording
/// that operation; nothing is computed until the resulting expression is
/// evaluated with a concrete argument. The placeholder itself is a stateless
/// unit value, so the shared [`__`] constant can be used from any number of
/// expressions (or threads) without synchronization.
///
/// # Example
/// ```
/// use stencil::{__, Value};
///
/// let double = __ * 2;
/// assert_eq!(double.eval(21).unwrap(), Value::Integer(42));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placeholder;

/// The shared placeholder singleton used to start building expressions.
pub const __: Placeholder = Placeholder;

/// Represents a binary operator recorded in an expression tree.
///
/// The operation set is defined by this enum alone; it is not inherited from
/// any host operator protocol. Operators that Rust cannot overload (`**`,
/// `//`, comparisons) are reachable through the named builder methods on
/// [`Expr`] and [`Placeholder`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// True division (`/`); always produces a real number.
    Div,
    /// Flooring division (`//`)
    FloorDiv,
    /// Modulo (`%`); the result takes the sign of the divisor.
    Mod,
    /// Exponentiation (`**`)
    Pow,
    /// Equal to (`==`)
    Eq,
    /// Not equal to (`!=`)
    Ne,
    /// Less than (`<`)
    Lt,
    /// Greater than (`>`)
    Gt,
    /// Less than or equal (`<=`)
    Le,
    /// Greater than or equal (`>=`)
    Ge,
    /// Bitwise and (`&`)
    BitAnd,
    /// Bitwise or (`|`)
    BitOr,
    /// Bitwise exclusive or (`^`)
    BitXor,
    /// Left shift (`<<`)
    Shl,
    /// Right shift (`>>`). Only ever evaluated between two data values: with
    /// an expression on either side, `>>` is the chaining operator instead.
    Shr,
}

/// Represents a unary operator recorded in an expression tree.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (`-x`).
    Neg,
    /// Absolute value.
    Abs,
    /// Bitwise complement (`~x`); logical negation for booleans.
    Invert,
}

/// One side of a [`Expr::Composition`] node.
///
/// A composition stage is either a deferred expression or an opaque native
/// function; both are applied to exactly one value and produce a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Callable {
    /// A deferred expression stage.
    Expr(Rc<Expr>),
    /// An opaque host function stage.
    Native(NativeFn),
}

/// An immutable node representing a deferred computation.
///
/// `Expr` covers every operation the engine can record: placeholder
/// substitution, captured constants, unary and binary operators, attribute
/// reads, calls, indexing and composition. Construction is total — building
/// any tree succeeds, even ones guaranteed to fail at evaluation time such as
/// `__ / 0` — and never mutates an existing node: every builder returns a new
/// node that shares its subtrees through `Rc`. Evaluating a tree substitutes
/// one argument for every `Placeholder` leaf and replays the recorded
/// operations bottom-up.
///
/// # Example
/// ```
/// use stencil::{__, Value};
///
/// let expr = (__ + 1) * (__ - 1);
/// assert_eq!(expr.eval(5).unwrap(), Value::Integer(24));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Substitute the bound argument here. Every occurrence in a tree
    /// receives the same argument.
    Placeholder,
    /// A captured literal value (e.g. the `5` in `__ + 5`).
    Constant(Value),
    /// A unary operation.
    Unary {
        /// The unary operator to apply.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Rc<Expr>,
    },
    /// A binary operation; either side may be any nested node.
    Binary {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Rc<Expr>,
        /// Right operand.
        right: Rc<Expr>,
    },
    /// An attribute or property read (`__.real`).
    Attribute {
        /// The expression the attribute is read from.
        base: Rc<Expr>,
        /// The attribute name.
        name: EcoString,
    },
    /// A call (`__.upper()` becomes `Call(Attribute(Placeholder, "upper"))`).
    Call {
        /// The expression being invoked.
        base:   Rc<Expr>,
        /// Positional argument expressions, in order.
        args:   Vec<Expr>,
        /// Keyword argument expressions, in order of appearance.
        kwargs: Vec<(EcoString, Expr)>,
    },
    /// A subscript access; the key may be a constant, a slice descriptor, or
    /// a nested expression.
    Index {
        /// The expression being subscripted.
        base: Rc<Expr>,
        /// The key expression.
        key:  Rc<Expr>,
    },
    /// Sequential application: evaluating with `x` computes
    /// `second(first(x))`.
    Composition {
        /// The stage applied first.
        first:  Callable,
        /// The stage applied to the first stage's result.
        second: Callable,
    },
}

impl Expr {
    /// Builds a constant node from any value convertible to [`Value`].
    #[must_use]
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Constant(value.into())
    }
    /// Builds a binary node. Construction is total; operand validity is only
    /// checked at evaluation time.
    ///
    /// # Example
    /// ```
    /// use stencil::{BinaryOperator, Expr, Value, __};
    ///
    /// let expr = Expr::binary(BinaryOperator::Pow, __, 2);
    /// assert_eq!(expr.eval(3).unwrap(), Value::Integer(9));
    /// ```
    #[must_use]
    pub fn binary(op: BinaryOperator, left: impl Into<Self>, right: impl Into<Self>) -> Self {
        Self::Binary { op,
                       left: Rc::new(left.into()),
                       right: Rc::new(right.into()) }
    }
    /// Builds a unary node.
    #[must_use]
    pub fn unary(op: UnaryOperator, operand: impl Into<Self>) -> Self {
        Self::Unary { op,
                      operand: Rc::new(operand.into()) }
    }
    /// Builds a composition node applying `first`, then `second`.
    ///
    /// Either stage may be a deferred expression or a native function; the
    /// result is an ordinary expression and composes further.
    #[must_use]
    pub fn compose(first: impl Into<Callable>, second: impl Into<Callable>) -> Self {
        Self::Composition { first:  first.into(),
                            second: second.into(), }
    }
    /// Records an attribute read on this expression.
    #[must_use]
    pub fn attr(self, name: &str) -> Self {
        Self::Attribute { base: Rc::new(self),
                          name: name.into() }
    }
    /// Records a call of this expression with positional arguments.
    #[must_use]
    pub fn call(self, args: Vec<Self>) -> Self {
        Self::Call { base: Rc::new(self),
                     args,
                     kwargs: Vec::new() }
    }
    /// Records a method call: an attribute read followed by a call.
    ///
    /// # Example
    /// ```
    /// use stencil::{Value, __};
    ///
    /// let expr = __.method("upper", vec![]);
    /// assert_eq!(expr.eval("hi").unwrap(), Value::Str("HI".into()));
    /// ```
    #[must_use]
    pub fn method(self, name: &str, args: Vec<Self>) -> Self {
        self.attr(name).call(args)
    }
    /// Records a method call with keyword arguments.
    #[must_use]
    pub fn method_with(self, name: &str, args: Vec<Self>, kwargs: Vec<(&str, Self)>) -> Self {
        Self::Call { base:   Rc::new(self.attr(name)),
                     args,
                     kwargs: kwargs.into_iter().map(|(n, e)| (n.into(), e)).collect(), }
    }
    /// Records a subscript access with the given key.
    ///
    /// # Example
    /// ```
    /// use stencil::{Value, __};
    ///
    /// let first = __.index(0);
    /// let v = first.eval(vec![7i64, 8, 9]).unwrap();
    /// assert_eq!(v, Value::Integer(7));
    /// ```
    #[must_use]
    pub fn index(self, key: impl Into<Self>) -> Self {
        Self::Index { base: Rc::new(self),
                      key:  Rc::new(key.into()), }
    }
    /// Records a slice access with optional start and stop bounds.
    ///
    /// Bounds follow sequence-slicing conventions: negative bounds count from
    /// the end and out-of-range bounds are clamped. Use
    /// [`Expr::index`] with a [`Slice`] value for stepped slices.
    #[must_use]
    pub fn slice(self, start: impl Into<Option<i64>>, stop: impl Into<Option<i64>>) -> Self {
        self.index(Slice::new(start.into(), stop.into()))
    }
    /// Records taking the absolute value of this expression.
    #[must_use]
    pub fn abs(self) -> Self {
        Self::unary(UnaryOperator::Abs, self)
    }
    /// Records exponentiation (`self ** rhs`).
    #[must_use]
    pub fn pow(self, rhs: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::Pow, self, rhs)
    }
    /// Records flooring division (`self // rhs`).
    #[must_use]
    pub fn floor_div(self, rhs: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::FloorDiv, self, rhs)
    }
    /// Records a less-than comparison.
    #[must_use]
    pub fn lt(self, rhs: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::Lt, self, rhs)
    }
    /// Records a less-than-or-equal comparison.
    #[must_use]
    pub fn le(self, rhs: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::Le, self, rhs)
    }
    /// Records a greater-than comparison.
    #[must_use]
    pub fn gt(self, rhs: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::Gt, self, rhs)
    }
    /// Records a greater-than-or-equal comparison.
    #[must_use]
    pub fn ge(self, rhs: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::Ge, self, rhs)
    }
    /// Records an equality comparison.
    ///
    /// Named `equals` to stay clear of [`PartialEq::eq`], which compares the
    /// trees themselves.
    #[must_use]
    pub fn equals(self, rhs: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::Eq, self, rhs)
    }
    /// Records an inequality comparison.
    #[must_use]
    pub fn not_equals(self, rhs: impl Into<Self>) -> Self {
        Self::binary(BinaryOperator::Ne, self, rhs)
    }
}

impl Placeholder {
    /// Records an attribute read on the placeholder.
    #[must_use]
    pub fn attr(self, name: &str) -> Expr {
        Expr::Placeholder.attr(name)
    }
    /// Records a method call on the placeholder.
    #[must_use]
    pub fn method(self, name: &str, args: Vec<Expr>) -> Expr {
        Expr::Placeholder.method(name, args)
    }
    /// Records a method call with keyword arguments on the placeholder.
    #[must_use]
    pub fn method_with(self, name: &str, args: Vec<Expr>, kwargs: Vec<(&str, Expr)>) -> Expr {
        Expr::Placeholder.method_with(name, args, kwargs)
    }
    /// Records a subscript access on the placeholder.
    #[must_use]
    pub fn index(self, key: impl Into<Expr>) -> Expr {
        Expr::Placeholder.index(key)
    }
    /// Records a slice access on the placeholder.
    #[must_use]
    pub fn slice(self, start: impl Into<Option<i64>>, stop: impl Into<Option<i64>>) -> Expr {
        Expr::Placeholder.slice(start, stop)
    }
    /// Records taking the absolute value of the argument.
    #[must_use]
    pub fn abs(self) -> Expr {
        Expr::Placeholder.abs()
    }
    /// Records exponentiation of the argument.
    #[must_use]
    pub fn pow(self, rhs: impl Into<Expr>) -> Expr {
        Expr::Placeholder.pow(rhs)
    }
    /// Records flooring division of the argument.
    #[must_use]
    pub fn floor_div(self, rhs: impl Into<Expr>) -> Expr {
        Expr::Placeholder.floor_div(rhs)
    }
    /// Records a less-than comparison of the argument.
    #[must_use]
    pub fn lt(self, rhs: impl Into<Expr>) -> Expr {
        Expr::Placeholder.lt(rhs)
    }
    /// Records a less-than-or-equal comparison of the argument.
    #[must_use]
    pub fn le(self, rhs: impl Into<Expr>) -> Expr {
        Expr::Placeholder.le(rhs)
    }
    /// Records a greater-than comparison of the argument.
    #[must_use]
    pub fn gt(self, rhs: impl Into<Expr>) -> Expr {
        Expr::Placeholder.gt(rhs)
    }
    /// Records a greater-than-or-equal comparison of the argument.
    #[must_use]
    pub fn ge(self, rhs: impl Into<Expr>) -> Expr {
        Expr::Placeholder.ge(rhs)
    }
    /// Records an equality comparison of the argument.
    #[must_use]
    pub fn equals(self, rhs: impl Into<Expr>) -> Expr {
        Expr::Placeholder.equals(rhs)
    }
    /// Records an inequality comparison of the argument.
    #[must_use]
    pub fn not_equals(self, rhs: impl Into<Expr>) -> Expr {
        Expr::Placeholder.not_equals(rhs)
    }
}

impl From<Placeholder> for Expr {
    fn from(_: Placeholder) -> Self {
        Self::Placeholder
    }
}

impl From<Value> for Expr {
    fn from(v: Value) -> Self {
        Self::Constant(v)
    }
}

impl From<i64> for Expr {
    fn from(v: i64) -> Self {
        Self::Constant(v.into())
    }
}

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        Self::Constant(v.into())
    }
}

impl From<bool> for Expr {
    fn from(v: bool) -> Self {
        Self::Constant(v.into())
    }
}

impl From<&str> for Expr {
    fn from(v: &str) -> Self {
        Self::Constant(v.into())
    }
}

impl From<String> for Expr {
    fn from(v: String) -> Self {
        Self::Constant(v.into())
    }
}

impl From<EcoString> for Expr {
    fn from(v: EcoString) -> Self {
        Self::Constant(v.into())
    }
}

impl From<Slice> for Expr {
    fn from(v: Slice) -> Self {
        Self::Constant(v.into())
    }
}

impl From<NativeFn> for Expr {
    fn from(v: NativeFn) -> Self {
        Self::Constant(v.into())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Expr {
    fn from(v: Vec<T>) -> Self {
        Self::Constant(v.into())
    }
}

impl From<Expr> for Callable {
    fn from(e: Expr) -> Self {
        Self::Expr(Rc::new(e))
    }
}

impl From<Rc<Expr>> for Callable {
    fn from(e: Rc<Expr>) -> Self {
        Self::Expr(e)
    }
}

impl From<Placeholder> for Callable {
    fn from(_: Placeholder) -> Self {
        Self::Expr(Rc::new(Expr::Placeholder))
    }
}

impl From<NativeFn> for Callable {
    fn from(f: NativeFn) -> Self {
        Self::Native(f)
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, BitAnd, BitOr, BitXor, Div, Eq, FloorDiv, Ge, Gt, Le, Lt, Mod, Mul, Ne, Pow, Shl,
            Shr, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            FloorDiv => "//",
            Mod => "%",
            Pow => "**",
            Eq => "==",
            Ne => "!=",
            Lt => "<",
            Gt => ">",
            Le => "<=",
            Ge => ">=",
            BitAnd => "&",
            BitOr => "|",
            BitXor => "^",
            Shl => "<<",
            Shr => ">>",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Neg => "-",
            Self::Abs => "abs",
            Self::Invert => "~",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for Placeholder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__")
    }
}

impl std::fmt::Display for Callable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expr(e) => write!(f, "{e}"),
            Self::Native(func) => write!(f, "{func}"),
        }
    }
}

impl std::fmt::Display for Expr {
    /// Renders the tree for debugging. Compositions are made visible by
    /// joining their sides with the chain marker; the output is not meant to
    /// be parsed back.
    ///
    /// # Example
    /// ```
    /// use stencil::__;
    ///
    /// let expr = (__ + 1) >> (__ * 2);
    /// assert_eq!(expr.to_string(), "(__ + 1) >> (__ * 2)");
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Placeholder => write!(f, "__"),
            Self::Constant(Value::Str(s)) => write!(f, "\"{s}\""),
            Self::Constant(v) => write!(f, "{v}"),
            Self::Unary { op: UnaryOperator::Abs,
                          operand, } => write!(f, "abs({operand})"),
            Self::Unary { op, operand } => write!(f, "({op}{operand})"),
            Self::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
            Self::Attribute { base, name } => write!(f, "{base}.{name}"),
            Self::Call { base, args, kwargs } => {
                write!(f, "{base}(")?;
                let mut first = true;
                for arg in args {
                    if !first {
                        write!(f, ", ")?;
                    }
                    first = false;
                    write!(f, "{arg}")?;
                }
                for (name, arg) in kwargs {
                    if !first {
                        write!(f, ", ")?;
                    }
                    first = false;
                    write!(f, "{name}={arg}")?;
                }
                write!(f, ")")
            },
            Self::Index { base, key } => write!(f, "{base}[{key}]"),
            Self::Composition { first, second } => write!(f, "{first} >> {second}"),
        }
    }
}
