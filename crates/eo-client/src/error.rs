//! Error types for exact-online-client.
//!
//! Every failure the core can hit (transport, HTTP status, JSON decode,
//! payload serialization) is represented by the single [`Error`] type so
//! callers handle them identically.

use std::time::Duration;

/// Result type alias for exact-online-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for exact-online-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}{}", url.as_deref().map(|u| format!(" [{u}]")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// URL of the request that failed, when known.
    pub url: Option<String>,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            url: None,
            source: None,
        }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            url: None,
            source: Some(Box::new(source)),
        }
    }

    /// Attach the request URL, keeping an already recorded one.
    pub fn at_url(mut self, url: impl Into<String>) -> Self {
        if self.url.is_none() {
            self.url = Some(url.into());
        }
        self
    }

    /// Returns true if retrying the same request could succeed.
    ///
    /// Nothing in this workspace retries on its own; this is a hint for
    /// callers that implement their own policy.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// Returns true if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.kind, ErrorKind::RateLimited { .. })
    }

    /// Returns true if this is an authentication error, including a 401
    /// that came with an Exact error body.
    pub fn is_auth_error(&self) -> bool {
        self.status() == Some(401)
    }

    /// Returns true if the server answered 404, with or without an Exact
    /// error body.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// HTTP status code associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Http { status, .. } => Some(*status),
            ErrorKind::ExactApi { status, .. } => Some(*status),
            ErrorKind::RateLimited { .. } => Some(429),
            ErrorKind::Authentication(_) => Some(401),
            ErrorKind::Authorization(_) => Some(403),
            ErrorKind::NotFound(_) => Some(404),
            _ => None,
        }
    }

    /// Returns the retry-after duration if this is a rate limit error.
    pub fn retry_after(&self) -> Option<Duration> {
        match &self.kind {
            ErrorKind::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Non-success HTTP status without a parseable Exact error body.
    #[error("HTTP error: {status} {message}")]
    Http { status: u16, message: String },

    /// Rate limit exceeded (HTTP 429).
    #[error("Rate limited{}", retry_after.map(|d| format!(", retry after {:?}", d)).unwrap_or_default())]
    RateLimited { retry_after: Option<Duration> },

    /// Authentication error (HTTP 401 or token provider failure).
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Authorization error (HTTP 403).
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Resource not found (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(String),

    /// Outgoing payload could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error body returned by the Exact Online API.
    #[error("Exact Online API error ({status}): {code} - {message}")]
    ExactApi {
        status: u16,
        code: String,
        message: String,
    },

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl ErrorKind {
    /// Returns true if this error kind is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ErrorKind::RateLimited { .. } => true,
            ErrorKind::Timeout => true,
            ErrorKind::Connection(_) => true,
            ErrorKind::Http { status, .. } => is_retryable_status(*status),
            ErrorKind::ExactApi { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is typically retryable.
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            ErrorKind::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            ErrorKind::Json(err.to_string())
        } else {
            ErrorKind::Other(err.to_string())
        };

        let url = err.url().map(|u| u.to_string());
        let mut error = Error::with_source(kind, err);
        error.url = url;
        error
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_retryable() {
        let err = Error::new(ErrorKind::RateLimited { retry_after: None });
        assert!(err.is_retryable());

        let err = Error::new(ErrorKind::Timeout);
        assert!(err.is_retryable());

        let err = Error::new(ErrorKind::Http {
            status: 503,
            message: "Service unavailable".to_string(),
        });
        assert!(err.is_retryable());

        let err = Error::new(ErrorKind::NotFound("resource".to_string()));
        assert!(!err.is_retryable());

        let err = Error::new(ErrorKind::Json("expected value".to_string()));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_error_is_rate_limited() {
        let err = Error::new(ErrorKind::RateLimited {
            retry_after: Some(Duration::from_secs(30)),
        });
        assert!(err.is_rate_limited());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
        assert_eq!(err.status(), Some(429));

        let err = Error::new(ErrorKind::Timeout);
        assert!(!err.is_rate_limited());
        assert_eq!(err.retry_after(), None);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_exact_api_error() {
        let err = Error::new(ErrorKind::ExactApi {
            status: 400,
            code: "".to_string(),
            message: "Mandatory: Code".to_string(),
        })
        .at_url("https://start.exactonline.nl/api/v1/1/subscription/SubscriptionTypes");

        assert!(!err.is_retryable());
        assert_eq!(err.status(), Some(400));
        let display = err.to_string();
        assert!(display.contains("Mandatory: Code"));
        assert!(display.contains("[https://start.exactonline.nl/api/v1/1/subscription/SubscriptionTypes]"));
    }

    #[test]
    fn test_status_helpers_cover_exact_error_bodies() {
        let not_found = Error::new(ErrorKind::ExactApi {
            status: 404,
            code: "".to_string(),
            message: "Record not found".to_string(),
        });
        assert!(not_found.is_not_found());
        assert!(!not_found.is_auth_error());

        let unauthorized = Error::new(ErrorKind::ExactApi {
            status: 401,
            code: "".to_string(),
            message: "Access denied".to_string(),
        });
        assert!(unauthorized.is_auth_error());

        assert!(Error::new(ErrorKind::NotFound("gone".to_string())).is_not_found());
        assert!(Error::new(ErrorKind::Authentication("expired".to_string())).is_auth_error());
        assert!(!Error::new(ErrorKind::Timeout).is_not_found());
    }

    #[test]
    fn test_at_url_keeps_first_url() {
        let err = Error::new(ErrorKind::Timeout)
            .at_url("https://first.example")
            .at_url("https://second.example");
        assert_eq!(err.url.as_deref(), Some("https://first.example"));
    }

    #[test]
    fn test_error_kind_display_messages() {
        let cases: Vec<(ErrorKind, &str)> = vec![
            (
                ErrorKind::Http {
                    status: 500,
                    message: "Internal Server Error".into(),
                },
                "HTTP error: 500 Internal Server Error",
            ),
            (
                ErrorKind::RateLimited {
                    retry_after: Some(Duration::from_secs(30)),
                },
                "retry after",
            ),
            (ErrorKind::RateLimited { retry_after: None }, "Rate limited"),
            (
                ErrorKind::Authentication("expired token".into()),
                "Authentication error: expired token",
            ),
            (
                ErrorKind::Authorization("no access to division".into()),
                "Authorization error: no access to division",
            ),
            (ErrorKind::NotFound("Budgets".into()), "Not found: Budgets"),
            (ErrorKind::Timeout, "Request timeout"),
            (
                ErrorKind::Connection("refused".into()),
                "Connection error: refused",
            ),
            (
                ErrorKind::Json("unexpected EOF".into()),
                "JSON error: unexpected EOF",
            ),
            (
                ErrorKind::Serialization("not a map".into()),
                "Serialization error: not a map",
            ),
            (
                ErrorKind::InvalidUrl("no scheme".into()),
                "Invalid URL: no scheme",
            ),
            (
                ErrorKind::Config("missing division".into()),
                "Configuration error: missing division",
            ),
            (ErrorKind::Other("something else".into()), "something else"),
        ];

        for (kind, expected_substring) in cases {
            let display = kind.to_string();
            assert!(
                display.contains(expected_substring),
                "Expected '{display}' to contain '{expected_substring}'"
            );
        }
    }

    #[test]
    fn test_retryable_http_status_codes() {
        for status in [429, 500, 502, 503, 504] {
            let err = Error::new(ErrorKind::Http {
                status,
                message: "error".into(),
            });
            assert!(err.is_retryable(), "HTTP {status} should be retryable");
        }

        for status in [400, 401, 403, 404, 405, 409, 422] {
            let err = Error::new(ErrorKind::Http {
                status,
                message: "error".into(),
            });
            assert!(!err.is_retryable(), "HTTP {status} should NOT be retryable");
        }
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err.kind, ErrorKind::Json(_)));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_from_url_parse_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert!(matches!(err.kind, ErrorKind::InvalidUrl(_)));
    }
}
