/// Result type used throughout evaluation.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while evaluating an expression.
///
/// Building an expression never fails; every variant here surfaces only when
/// a tree is evaluated against a concrete argument and one of the recorded
/// operations is not supported by that argument. The evaluator performs no
/// wrapping or translation: the error kind is exactly the one the underlying
/// value operation defines.
pub enum EvalError {
    /// An operation was applied to values of incompatible types.
    TypeError {
        /// Details about the type mismatch.
        details: String,
    },
    /// Attempted division (or modulo) by zero.
    DivisionByZero,
    /// Integer arithmetic overflowed or a conversion would lose precision.
    Overflow,
    /// Tried to access a sequence element outside the allowed bounds.
    IndexOutOfBounds {
        /// The length of the indexed sequence.
        len:   usize,
        /// The index that was actually requested.
        index: i64,
    },
    /// Tried to look up a key that is not present in a map.
    KeyNotFound {
        /// The missing key, rendered as text.
        key: String,
    },
    /// Read an attribute or method that the receiver type does not define.
    UnknownAttribute {
        /// The name of the receiver type.
        type_name: &'static str,
        /// The attribute name that was requested.
        name:      String,
    },
    /// Tried to invoke a value that is not a function.
    NotCallable {
        /// The name of the value's type.
        type_name: &'static str,
    },
    /// The wrong number of arguments was supplied to a function or method.
    ArgumentCountMismatch {
        /// The name of the function or method.
        name:     String,
        /// How many arguments the callee accepts.
        expected: usize,
        /// How many arguments were supplied.
        found:    usize,
    },
    /// A keyword argument was supplied that the callee does not accept.
    UnexpectedKeyword {
        /// The keyword name.
        name: String,
    },
    /// An argument was invalid or out of range.
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
    },
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeError { details } => write!(f, "Type error: {details}."),
            Self::DivisionByZero => write!(f, "Division by zero."),
            Self::Overflow => {
                write!(f, "Integer overflow while trying to compute result.")
            },
            Self::IndexOutOfBounds { len, index } => write!(f,
                                                            "Index {index} out of bounds for length {len}."),
            Self::KeyNotFound { key } => write!(f, "Key {key} not found."),
            Self::UnknownAttribute { type_name, name } => write!(f,
                                                                 "Value of type {type_name} has no attribute '{name}'."),
            Self::NotCallable { type_name } => {
                write!(f, "Value of type {type_name} is not callable.")
            },
            Self::ArgumentCountMismatch { name,
                                          expected,
                                          found, } => write!(f,
                                                             "'{name}' takes {expected} argument(s), but {found} were supplied."),
            Self::UnexpectedKeyword { name } => {
                write!(f, "Unexpected keyword argument '{name}'.")
            },
            Self::InvalidArgument { details } => write!(f, "Invalid argument: {details}."),
        }
    }
}

impl std::error::Error for EvalError {}
