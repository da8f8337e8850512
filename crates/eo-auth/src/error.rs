//! Error types for exact-online-auth.
//!
//! Error messages never include token or secret values.

/// Result type alias for exact-online-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for exact-online-auth operations.
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

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// OAuth error response from the token endpoint.
    #[error("OAuth error: {error} - {description}")]
    OAuth { error: String, description: String },

    /// The access token is stale and there is no refresh token to renew it.
    #[error("No refresh token available")]
    NoRefreshToken,

    /// No token has been stored or supplied yet.
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    /// HTTP error during authentication.
    #[error("HTTP error: {0}")]
    Http(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token storage failure.
    #[error("Token storage error: {0}")]
    Storage(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Token endpoint URLs may carry codes in their query string.
        let err = err.without_url();
        Error::with_source(ErrorKind::Http(err.to_string()), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Error::with_source(ErrorKind::Serialization(err.to_string()), err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_source(ErrorKind::Io(err.to_string()), err)
    }
}

impl From<Error> for exact_online_client::Error {
    fn from(err: Error) -> Self {
        exact_online_client::Error::with_source(
            exact_online_client::ErrorKind::Authentication(err.kind.to_string()),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        let err = ErrorKind::OAuth {
            error: "invalid_grant".to_string(),
            description: "refresh token is expired".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "OAuth error: invalid_grant - refresh token is expired"
        );
    }

    #[test]
    fn test_converts_into_client_auth_error() {
        let err: exact_online_client::Error = Error::new(ErrorKind::NoRefreshToken).into();
        assert!(err.is_auth_error());
        assert!(err.to_string().contains("No refresh token available"));
    }
}
