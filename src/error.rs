use thiserror::Error;

// =============================================================================
// Error kinds surfaced by list operations
// =============================================================================

#[derive(Error, Debug)]
pub enum ListError {
    #[error("position {position} is out of range for a list of length {len}")]
    OutOfRange { position: isize, len: usize },

    #[error("operation requires a non-empty list")]
    EmptyContainer,

    #[error("'{operation}' requires a callback")]
    MissingCallback { operation: String },

    #[error("'{operation}' requires a value")]
    MissingValue { operation: String },

    #[error("'{operation}' expected {expected}, got {found}")]
    TypeMismatch {
        operation: String,
        expected: String,
        found: String,
    },

    #[error("cannot build a list from {found}; expected an array or an object")]
    UnsupportedSource { found: String },

    #[error("unknown callback '{name}'")]
    UnknownCallback { name: String },

    #[error("unknown command '{name}'")]
    UnknownCommand { name: String },

    #[error("invalid argument for '{operation}': {reason}")]
    InvalidArgument { operation: String, reason: String },

    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ListError>;

impl ListError {
    pub fn out_of_range(position: usize, len: usize) -> Self {
        Self::OutOfRange {
            position: isize::try_from(position).unwrap_or(isize::MAX),
            len,
        }
    }

    pub fn missing_callback(operation: impl Into<String>) -> Self {
        Self::MissingCallback {
            operation: operation.into(),
        }
    }

    pub fn missing_value(operation: impl Into<String>) -> Self {
        Self::MissingValue {
            operation: operation.into(),
        }
    }

    pub fn type_mismatch(
        operation: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            operation: operation.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn invalid_argument(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}
