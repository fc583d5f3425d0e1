use thiserror::Error;

use crate::value::ValueType;

/// エラー型の定義
#[derive(Error, Debug)]
pub enum Error {
    #[error("index out of bounds: index {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("length mismatch: expected {expected}, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("column {0} is borrowed and cannot be appended to")]
    ColumnBusy(String),

    #[error("type mismatch in column {column}: expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: ValueType,
        found: ValueType,
    },

    #[error("operation `{op}` is not supported for {value_type} values")]
    UnsupportedOperation { op: String, value_type: ValueType },

    #[error("operation `{op}` cannot combine {left} and {right} values")]
    IncompatibleTypes {
        op: String,
        left: ValueType,
        right: ValueType,
    },

    #[error("cannot parse {text:?} as {value_type}: {reason}")]
    Parse {
        value_type: ValueType,
        text: String,
        reason: String,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in `{0}`")]
    Overflow(String),

    #[error("empty data: {0}")]
    EmptyData(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("data format error: {0}")]
    Format(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error")]
    Io(#[source] std::io::Error),

    #[error("CSV error")]
    Csv(#[source] csv::Error),

    #[error("JSON error")]
    Json(#[source] serde_json::Error),

    #[error("TOML error")]
    Toml(#[source] toml::de::Error),

    #[error("YAML error")]
    Yaml(#[source] serde_yaml::Error),
}

// 旧エラー型との互換性
pub type FrameError = Error;

/// Resultの型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml(err)
    }
}

impl Error {
    pub(crate) fn unsupported(op: &str, value_type: ValueType) -> Self {
        Error::UnsupportedOperation {
            op: op.to_string(),
            value_type,
        }
    }

    pub(crate) fn incompatible(op: &str, left: ValueType, right: ValueType) -> Self {
        Error::IncompatibleTypes {
            op: op.to_string(),
            left,
            right,
        }
    }

    /// Whether this error reports a value variant lacking a capability
    /// (arithmetic, numeric reconstruction) rather than bad data.
    pub fn is_type_capability(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedOperation { .. } | Error::IncompatibleTypes { .. }
        )
    }
}
