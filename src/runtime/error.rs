use thiserror::Error;

/// Everything that can go wrong while evaluating a program. The message
/// texts are part of the observable surface; the driver prefixes them with
/// `interpreter error: `.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("'{0}' already defined")]
    AlreadyDefined(String),

    #[error("reference to undefined variable '{0}'")]
    UnboundName(String),

    #[error("unidentified variable: '{0}'")]
    UpdateUnbound(String),

    #[error("cannot reassign const value '{0}'")]
    ConstReassign(String),

    #[error("incorrect number of params specified for fn {name}, got {got} want {want}")]
    ArityMismatch {
        name: String,
        want: usize,
        got: usize,
    },

    #[error("invalid operand types for operator '{operator}', got {left} and {right}")]
    TypeMismatch {
        operator: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("conditions must evaluate to a bool value, got {0}")]
    BadCondition(&'static str),

    #[error("invalid lhs in assignment expression")]
    InvalidAssignTarget,

    #[error("invalid type used for operator {0}")]
    ShorthandOperand(&'static str),

    #[error("index out of bounds for index {0}")]
    IndexOutOfBounds(i64),

    #[error("array index must be of type int")]
    ArrayIndexType,

    #[error("key `{key}` does not exist for map: {map}")]
    MissingKey { key: String, map: String },

    #[error("invalid type provided for map key: {0}")]
    BadMapKey(&'static str),

    #[error("unrecognised datastructure provided: {0}")]
    IndexingUnsupported(&'static str),

    #[error("property '{0}' does not exist")]
    NoProperty(String),

    #[error("cannot access properties of {0}")]
    NotAnObject(&'static str),

    #[error("unrecognised namespace: {0}")]
    UnknownNamespace(String),

    #[error("undefined function: {function} for namespace: {namespace}")]
    UnknownNamespaceFunction {
        namespace: &'static str,
        function: String,
    },

    #[error("unexpected value in place of function: {0}")]
    NotCallable(&'static str),

    #[error("unexpected number of args for {function}, expected {want} got {got}")]
    WrongArgCount {
        function: &'static str,
        want: usize,
        got: usize,
    },

    #[error("{function} must be used on {want} type, {got} type given")]
    WrongArgType {
        function: &'static str,
        want: &'static str,
        got: &'static str,
    },

    #[error("invalid argument for format verb %{verb}, got {got}")]
    FormatArg { verb: char, got: &'static str },

    #[error("cannot pop an empty array")]
    PopEmptyArray,

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("file already closed: {0}")]
    FileAlreadyClosed(String),

    #[error("invalid mode '{mode}' for file: {path}")]
    FileWrongMode { path: String, mode: String },

    #[error("line {0} out of bounds")]
    LineOutOfBounds(i64),

    #[error("{0}")]
    Io(String),
}

impl From<std::io::Error> for RuntimeError {
    fn from(value: std::io::Error) -> Self {
        RuntimeError::Io(value.to_string())
    }
}
