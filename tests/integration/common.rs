use std::sync::Arc;

use exact_online_api::{ClientConfig, ExactConfig, ExactOnline, StaticToken, TokenProvider};
use wiremock::MockServer;

pub const DIVISION: i32 = 4242;

/// Facade pointed at `server` with a fixed bearer token.
pub fn facade(server: &MockServer) -> ExactOnline {
    facade_with_tokens(server, Arc::new(StaticToken::new("test-token")))
}

pub fn facade_with_tokens(server: &MockServer, tokens: Arc<dyn TokenProvider>) -> ExactOnline {
    let config = ExactConfig::with_base_url(server.uri(), DIVISION).expect("valid mock URL");
    ExactOnline::with_http_config(
        config,
        tokens,
        ClientConfig::builder().with_tracing(false).build(),
    )
    .expect("Failed to create facade")
}

/// Path under the division's service root.
pub fn api_path(resource: &str) -> String {
    format!("/api/v1/{DIVISION}/{resource}")
}

/// OData collection body with an optional continuation link.
pub fn collection(results: serde_json::Value, next: Option<String>) -> serde_json::Value {
    match next {
        Some(next) => serde_json::json!({"d": {"results": results, "__next": next}}),
        None => serde_json::json!({"d": {"results": results}}),
    }
}
