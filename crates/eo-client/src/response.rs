//! HTTP response handling with Exact Online specific extensions.

use std::sync::LazyLock;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;

use crate::error::{Error, ErrorKind, Result};

/// Wrapper around an HTTP response with additional functionality.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
    url: String,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        let url = inner.url().to_string();
        Self { inner, url }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// URL the response was served from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// Get the Retry-After header as a Duration.
    pub fn retry_after(&self) -> Option<Duration> {
        self.header("retry-after")?
            .trim()
            .parse::<u64>()
            .ok()
            .map(Duration::from_secs)
    }

    /// Rate limit state reported by the `X-RateLimit-*` headers.
    pub fn rate_limit(&self) -> Option<RateLimitInfo> {
        let daily = self.window("x-ratelimit-limit", "x-ratelimit-remaining", "x-ratelimit-reset");
        let minutely = self.window(
            "x-ratelimit-minutely-limit",
            "x-ratelimit-minutely-remaining",
            "x-ratelimit-minutely-reset",
        );

        if daily.is_none() && minutely.is_none() {
            None
        } else {
            Some(RateLimitInfo { daily, minutely })
        }
    }

    fn window(&self, limit: &str, remaining: &str, reset: &str) -> Option<RateLimitWindow> {
        let limit = self.header(limit)?.trim().parse().ok()?;
        let remaining = self.header(remaining)?.trim().parse().ok()?;
        let reset = self
            .header(reset)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single());

        Some(RateLimitWindow {
            limit,
            remaining,
            reset,
        })
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        let url = self.url;
        self.inner
            .text()
            .await
            .map_err(|e| Error::from(e).at_url(url))
    }

    /// Deserialize the response body as JSON.
    ///
    /// Decode failures carry the URL and a sanitized snippet of the body.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let url = self.url.clone();
        let body = self.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            let message = format!("{e}; body: {}", sanitize_error_message(&body));
            Error::with_source(ErrorKind::Json(message), e).at_url(url)
        })
    }
}

/// Usage of one Exact Online rate-limit window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitWindow {
    /// Calls allowed in the window.
    pub limit: u64,
    /// Calls left in the window.
    pub remaining: u64,
    /// When the window resets.
    pub reset: Option<DateTime<Utc>>,
}

impl RateLimitWindow {
    /// Number of calls already used in this window.
    pub fn used(&self) -> u64 {
        self.limit.saturating_sub(self.remaining)
    }

    /// Get the usage percentage.
    pub fn percentage(&self) -> f64 {
        if self.limit == 0 {
            100.0
        } else {
            (self.used() as f64 / self.limit as f64) * 100.0
        }
    }
}

/// Daily and minutely rate-limit windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub daily: Option<RateLimitWindow>,
    pub minutely: Option<RateLimitWindow>,
}

impl RateLimitInfo {
    /// Returns true if either window has fewer than `threshold` calls left.
    pub fn is_below(&self, threshold: u64) -> bool {
        [self.daily, self.minutely]
            .iter()
            .flatten()
            .any(|w| w.remaining < threshold)
    }
}

/// Extension trait for processing Exact Online API responses.
pub trait ResponseExt {
    /// Turn non-success responses into errors.
    fn check_exact_error(self) -> impl std::future::Future<Output = Result<Response>> + Send;
}

impl ResponseExt for Response {
    async fn check_exact_error(self) -> Result<Response> {
        if self.is_success() {
            return Ok(self);
        }

        let status = self.status();
        let retry_after = self.retry_after();
        let url = self.url.clone();
        let body = self.text().await.unwrap_or_default();

        let error = if status == 429 {
            Error::new(ErrorKind::RateLimited { retry_after })
        } else {
            parse_error_response(status, &body)
        };
        Err(error.at_url(url))
    }
}

/// Parse an error response body and convert to the appropriate error kind.
fn parse_error_response(status: u16, body: &str) -> Error {
    if let Ok(envelope) = serde_json::from_str::<ExactErrorEnvelope>(body) {
        let message = envelope.error.message.value;
        if !message.is_empty() {
            return Error::new(ErrorKind::ExactApi {
                status,
                code: envelope.error.code,
                message: sanitize_error_message(&message),
            });
        }
    }

    let sanitized = sanitize_error_message(body);
    let kind = match status {
        401 => ErrorKind::Authentication(sanitized),
        403 => ErrorKind::Authorization(sanitized),
        404 => ErrorKind::NotFound(sanitized),
        _ => ErrorKind::Http {
            status,
            message: sanitized,
        },
    };

    Error::new(kind)
}

static BEARER_PATTERN: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"(?i)bearer\s+[A-Za-z0-9\-._~+/!]+=*").expect("valid regex")
});

static TOKEN_PARAM_PATTERN: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"(access_token|refresh_token|code)=[^&\s]+").expect("valid regex")
});

/// Sanitize an error message before it lands in an [`Error`].
///
/// Bearer tokens and token-bearing query parameters are redacted and the
/// message is cut to 500 characters.
pub(crate) fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let sanitized = BEARER_PATTERN.replace_all(message, "Bearer [REDACTED]");
    let mut sanitized = TOKEN_PARAM_PATTERN
        .replace_all(&sanitized, "$1=[REDACTED]")
        .into_owned();

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}

/// Exact Online error body: `{"error": {"code": "", "message": {"value": ""}}}`.
#[derive(Debug, serde::Deserialize)]
struct ExactErrorEnvelope {
    error: ExactErrorBody,
}

#[derive(Debug, serde::Deserialize)]
struct ExactErrorBody {
    #[serde(default)]
    code: String,
    message: ExactErrorMessage,
}

#[derive(Debug, serde::Deserialize)]
struct ExactErrorMessage {
    #[serde(default)]
    value: String,
}
