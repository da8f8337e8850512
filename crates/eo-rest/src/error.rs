//! Error types for exact-online-rest.

/// Result type alias for exact-online-rest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for exact-online-rest operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// The underlying HTTP client error, if this is one.
    pub fn client_error(&self) -> Option<&exact_online_client::Error> {
        match &self.kind {
            ErrorKind::Client(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u16> {
        self.client_error().and_then(|e| e.status())
    }

    /// URL of the failed request, if known.
    pub fn url(&self) -> Option<&str> {
        self.client_error().and_then(|e| e.url.as_deref())
    }

    /// Returns true if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.client_error().is_some_and(|e| e.is_not_found())
    }

    /// Returns true if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        self.client_error().is_some_and(|e| e.is_rate_limited())
    }

    /// Returns true if retrying could succeed. Advisory only.
    pub fn is_retryable(&self) -> bool {
        self.client_error().is_some_and(|e| e.is_retryable())
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Transport, HTTP status or decode failure.
    #[error("{0}")]
    Client(exact_online_client::Error),

    /// Field or resource name rejected before building a URL.
    #[error("Invalid field name: {0}")]
    InvalidField(String),
}

impl From<exact_online_client::Error> for Error {
    fn from(err: exact_online_client::Error) -> Self {
        Error::new(ErrorKind::Client(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exact_online_client::ErrorKind as ClientErrorKind;

    #[test]
    fn test_client_error_helpers() {
        let client = exact_online_client::Error::new(ClientErrorKind::NotFound(
            "no such entity".to_string(),
        ))
        .at_url("https://start.exactonline.nl/api/v1/1/budget/Budgets");
        let err = Error::from(client);

        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.url(),
            Some("https://start.exactonline.nl/api/v1/1/budget/Budgets")
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_invalid_field_display() {
        let err = Error::new(ErrorKind::InvalidField("Code,ID".to_string()));
        assert_eq!(err.to_string(), "Invalid field name: Code,ID");
        assert!(err.client_error().is_none());
    }
}
