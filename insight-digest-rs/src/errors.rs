//! Error handling for the digest library
//!
//! The text operations themselves are total. Errors only surface when loading
//! record documents and from the explanatory display validator.

use std::fmt;
use thiserror::Error;

/// Result type for digest operations
pub type DigestResult<T> = Result<T, DigestError>;

/// Enum representing the ways a digest operation can be rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DigestError {
    /// Text is shorter than the minimum display length
    #[error("Input is shorter than minimum length: {0}")]
    TooShort(String),

    /// Text still carries characters that must never reach display
    #[error("Contains invalid characters: {0}")]
    InvalidCharacters(String),

    /// Document could not be read as records
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Document parsed but has the wrong shape
    #[error("Invalid type: {0}")]
    InvalidType(String),

    /// Composite error (multiple errors)
    #[error("{0}")]
    Composite(CompositeError),

    /// Generic error
    #[error("{0}")]
    Generic(String),
}

/// Container for multiple digest errors
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeError {
    /// Collection of errors
    pub errors: Vec<DigestError>,
    /// Field path information
    pub path: Option<String>,
}

impl fmt::Display for CompositeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} errors:", self.errors.len())?;

        for (idx, err) in self.errors.iter().enumerate() {
            match &self.path {
                Some(path) => write!(f, " {}. at {}: {};", idx + 1, path, err)?,
                None => write!(f, " {}. {};", idx + 1, err)?,
            }
        }

        Ok(())
    }
}

impl DigestError {
    /// Create a new generic error with a message
    pub fn new<S: Into<String>>(message: S) -> Self {
        DigestError::Generic(message.into())
    }

    /// Collapse a list of errors, returning the only one directly when there is a single entry
    pub fn composite<I>(errors: I) -> Self
    where
        I: IntoIterator<Item = DigestError>,
    {
        Self::collect(errors, None)
    }

    /// Same as [`DigestError::composite`] but records which field failed
    pub fn composite_at<I, S>(errors: I, path: S) -> Self
    where
        I: IntoIterator<Item = DigestError>,
        S: Into<String>,
    {
        Self::collect(errors, Some(path.into()))
    }

    fn collect<I>(errors: I, path: Option<String>) -> Self
    where
        I: IntoIterator<Item = DigestError>,
    {
        let mut errors: Vec<DigestError> = errors.into_iter().collect();
        if errors.len() == 1 {
            if let Some(only) = errors.pop() {
                return only;
            }
        }
        DigestError::Composite(CompositeError { errors, path })
    }

    /// Returns true if the error was raised while reading a record document
    pub fn is_load_error(&self) -> bool {
        matches!(self, DigestError::InvalidFormat(_) | DigestError::InvalidType(_))
    }
}

impl From<serde_json::Error> for DigestError {
    fn from(err: serde_json::Error) -> Self {
        DigestError::InvalidFormat(format!(
            "line {}, column {}: {}",
            err.line(),
            err.column(),
            err
        ))
    }
}
