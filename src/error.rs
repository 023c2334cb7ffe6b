//! Error handling
//!
//! One error type for the whole engine. Each variant maps to a distinct
//! failure kind so the presentation layer can tell them apart.

use serde::Serialize;
use thiserror::Error;

pub type AgriResult<T> = Result<T, AgriError>;

#[derive(Debug, Error)]
pub enum AgriError {
    /// Malformed or non-numeric user-supplied values
    #[error("InputError: {0}")]
    Input(String),

    /// Malformed or empty training / configuration data
    #[error("DataError: {0}")]
    Data(String),

    /// Unreadable image, unwritable log, unreachable endpoint
    #[error("IOError: {0}")]
    Io(String),

    /// Classifier execution failure
    #[error("InferenceError: {0}")]
    Inference(String),
}

/// Failure kind, without the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    Input,
    Data,
    Io,
    Inference,
}

impl AgriError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AgriError::Input(_) => ErrorKind::Input,
            AgriError::Data(_) => ErrorKind::Data,
            AgriError::Io(_) => ErrorKind::Io,
            AgriError::Inference(_) => ErrorKind::Inference,
        }
    }

    pub fn is_input(&self) -> bool {
        self.kind() == ErrorKind::Input
    }
}

impl From<std::io::Error> for AgriError {
    fn from(err: std::io::Error) -> Self {
        AgriError::Io(err.to_string())
    }
}

impl From<csv::Error> for AgriError {
    fn from(err: csv::Error) -> Self {
        AgriError::Io(err.to_string())
    }
}

impl From<image::ImageError> for AgriError {
    fn from(err: image::ImageError) -> Self {
        AgriError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(AgriError::Input("x".into()).kind(), ErrorKind::Input);
        assert_eq!(AgriError::Data("x".into()).kind(), ErrorKind::Data);
        assert_eq!(AgriError::Io("x".into()).kind(), ErrorKind::Io);
        assert_eq!(AgriError::Inference("x".into()).kind(), ErrorKind::Inference);
    }

    #[test]
    fn test_io_error_conversion() {
        let err: AgriError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().starts_with("IOError"));
    }
}
