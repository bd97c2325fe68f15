//! Error types for the Leadbox core library.
//!
//! Validation failures and duplicate rejections are not errors; they are
//! terminal outcomes carried by [`crate::SubmitOutcome`]. Everything here
//! is a service-side failure that the API layer collapses into one
//! generic "try again later" response.

/// Errors that can occur while handling a contact-form submission.
///
/// The enum is `#[non_exhaustive]` to allow adding new error types
/// without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// CRM contact creation failed (transport error, auth rejection,
    /// rate limit — all treated identically by the fallback chain).
    #[error("CRM error: {message}")]
    Crm {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Transactional email send failed.
    #[error("mail error: {message}")]
    Mail {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O error (socket binding, serving)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type alias for Leadbox operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new CRM error with a message.
    pub fn crm<S: Into<String>>(message: S) -> Self {
        Error::Crm {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new CRM error with a message and source error.
    pub fn crm_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Crm {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new mail error with a message.
    pub fn mail<S: Into<String>>(message: S) -> Self {
        Error::Mail {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new mail error with a message and source error.
    pub fn mail_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Mail {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::crm("contact creation rejected");
        assert_eq!(err.to_string(), "CRM error: contact creation rejected");
        let err = Error::mail("notification rejected");
        assert_eq!(err.to_string(), "mail error: notification rejected");
    }

    #[test]
    fn test_crm_error_with_source() {
        let io_error = std::io::Error::other("connection reset");
        let err = Error::crm_with_source("create contact failed", io_error);
        assert!(err.to_string().contains("create contact failed"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_mail_error_with_source() {
        let io_error = std::io::Error::other("connection reset");
        let err = Error::mail_with_source("notification send failed", io_error);
        assert!(err.to_string().contains("notification send failed"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }

    #[test]
    fn test_io_error_converts() {
        let err: Error = std::io::Error::other("bind failed").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
