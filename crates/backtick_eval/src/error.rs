use ecow::EcoString;
use thiserror::Error as ThisError;

#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] backtick_parser::error::Error),

    #[error("ReferenceError: {0} is not defined")]
    ReferenceError(EcoString),

    #[error("TypeError: {0}")]
    TypeError(String),

    #[error("IndexError: index {0} out of range")]
    IndexError(i64),

    #[error("KeyError: {0:?}")]
    KeyError(EcoString),

    #[error("ZeroDivisionError: division by zero")]
    ZeroDivision,

    /// Raised by a native function.
    #[error("{0}")]
    Native(String),
}

impl Error {
    pub fn type_error(msg: impl Into<String>) -> Self {
        Self::TypeError(msg.into())
    }
}
