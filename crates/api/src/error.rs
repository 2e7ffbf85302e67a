//! Client-facing error categories
//!
//! The response layer turns catalog errors into status codes through
//! [`ErrorCategory`]; it never matches on [`Error`] variants itself.

use geocatalog_core::Error;

/// Client-facing class of a catalog error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Referenced record does not exist (404)
    NotFound,
    /// Record already exists (409)
    Conflict,
    /// Request cannot be served as given (400)
    BadRequest,
    /// Store or server failure (500)
    Internal,
}

impl ErrorCategory {
    /// Classify a catalog error
    pub fn of(error: &Error) -> Self {
        match error {
            Error::NotFound { .. } => ErrorCategory::NotFound,
            Error::Conflict { .. } => ErrorCategory::Conflict,
            Error::InvalidInput(_) | Error::Unsupported(_) => ErrorCategory::BadRequest,
            Error::StoreUnavailable(_) | Error::Serialization(_) => ErrorCategory::Internal,
        }
    }

    /// HTTP status code equivalent
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorCategory::NotFound => 404,
            ErrorCategory::Conflict => 409,
            ErrorCategory::BadRequest => 400,
            ErrorCategory::Internal => 500,
        }
    }
}

impl From<&Error> for ErrorCategory {
    fn from(error: &Error) -> Self {
        ErrorCategory::of(error)
    }
}
