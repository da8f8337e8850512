//! Client configuration.
//!
//! [`ClientConfig`] tunes the underlying transport. [`ExactConfig`] says
//! which Exact Online environment and division to talk to.

use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Pool idle timeout.
    pub pool_idle_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_max_idle_per_host: usize,
    /// User-Agent header value.
    pub user_agent: String,
    /// Accept gzip/deflate compressed responses.
    pub accept_compressed: bool,
    /// Whether to enable request/response tracing.
    pub enable_tracing: bool,
    /// Log a warning once fewer than this many calls remain in the
    /// minutely rate-limit window.
    pub rate_limit_warning_threshold: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 10,
            user_agent: crate::USER_AGENT.to_string(),
            accept_compressed: true,
            enable_tracing: true,
            rate_limit_warning_threshold: 10,
        }
    }
}

impl ClientConfig {
    /// Create a new client config builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for ClientConfig.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set pool idle timeout.
    pub fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    pub fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = max;
        self
    }

    /// Set custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Accept or refuse compressed responses.
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.config.accept_compressed = enabled;
        self
    }

    /// Enable or disable request/response tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    /// Set the remaining-calls threshold that triggers a rate-limit warning.
    pub fn with_rate_limit_warning_threshold(mut self, remaining: u64) -> Self {
        self.config.rate_limit_warning_threshold = remaining;
        self
    }

    /// Build the client configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Exact Online data centres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    #[default]
    Netherlands,
    Belgium,
    UnitedKingdom,
    Germany,
    UnitedStates,
    Spain,
    France,
}

impl Region {
    /// Base URL of the region's API host.
    pub fn base_url(&self) -> &'static str {
        match self {
            Region::Netherlands => "https://start.exactonline.nl",
            Region::Belgium => "https://start.exactonline.be",
            Region::UnitedKingdom => "https://start.exactonline.co.uk",
            Region::Germany => "https://start.exactonline.de",
            Region::UnitedStates => "https://start.exactonline.com",
            Region::Spain => "https://start.exactonline.es",
            Region::France => "https://start.exactonline.fr",
        }
    }

    /// Parse a region from its country code (`nl`, `be`, `uk`, ...).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "nl" => Some(Region::Netherlands),
            "be" => Some(Region::Belgium),
            "uk" | "gb" => Some(Region::UnitedKingdom),
            "de" => Some(Region::Germany),
            "us" | "com" => Some(Region::UnitedStates),
            "es" => Some(Region::Spain),
            "fr" => Some(Region::France),
            _ => None,
        }
    }
}

/// Target environment for an [`ExactClient`](crate::ExactClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactConfig {
    base_url: String,
    division: i32,
}

impl ExactConfig {
    /// Configuration for a division in the default (Dutch) region.
    pub fn new(division: i32) -> Self {
        Self::for_region(Region::default(), division)
    }

    /// Configuration for a division hosted in `region`.
    pub fn for_region(region: Region, division: i32) -> Self {
        Self {
            base_url: region.base_url().to_string(),
            division,
        }
    }

    /// Configuration against an explicit host, e.g. a mock server.
    pub fn with_base_url(base_url: impl Into<String>, division: i32) -> Result<Self> {
        let base_url = base_url.into();
        let parsed = url::Url::parse(&base_url)?;
        if parsed.cannot_be_a_base() {
            return Err(Error::new(ErrorKind::InvalidUrl(base_url)));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            division,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `EXACT_DIVISION`
    ///
    /// Optional:
    /// - `EXACT_BASE_URL` (takes precedence over `EXACT_REGION`)
    /// - `EXACT_REGION` (`nl`, `be`, `uk`, `de`, `us`, `es`, `fr`; default `nl`)
    pub fn from_env() -> Result<Self> {
        let division = std::env::var("EXACT_DIVISION")
            .map_err(|_| Error::new(ErrorKind::Config("EXACT_DIVISION is not set".to_string())))?;
        let division: i32 = division.trim().parse().map_err(|_| {
            Error::new(ErrorKind::Config(format!(
                "EXACT_DIVISION is not a number: {division}"
            )))
        })?;

        if let Ok(base_url) = std::env::var("EXACT_BASE_URL") {
            return Self::with_base_url(base_url, division);
        }

        let region = match std::env::var("EXACT_REGION") {
            Ok(code) => Region::from_code(&code).ok_or_else(|| {
                Error::new(ErrorKind::Config(format!("Unknown EXACT_REGION: {code}")))
            })?,
            Err(_) => Region::default(),
        };

        Ok(Self::for_region(region, division))
    }

    /// Host base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Division (administration) number.
    pub fn division(&self) -> i32 {
        self.division
    }

    /// REST service root: `{base}/api/v1/{division}`.
    pub fn service_root(&self) -> String {
        format!("{}/api/v1/{}", self.base_url, self.division)
    }
}
