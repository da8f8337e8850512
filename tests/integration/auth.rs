//! Refreshing token provider wired into the facade.

use std::sync::Arc;

use super::common::{api_path, collection, facade_with_tokens};
use chrono::Utc;
use exact_online_api::auth::{
    MemoryTokenStorage, OAuthClient, OAuthConfig, RefreshingTokenProvider, TokenSet, TokenStorage,
};
use exact_online_api::ListParams;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn oauth(server: &MockServer) -> OAuthClient {
    OAuthClient::new(
        OAuthConfig::new("client-id").with_secret("client-secret"),
        server.uri(),
    )
}

#[tokio::test]
async fn test_expired_token_is_refreshed_before_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/oauth2/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=stored-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "fresh-access",
            "refresh_token": "rotated-refresh",
            "token_type": "bearer",
            "expires_in": "600"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(api_path("subscription/SubscriptionTypes").as_str()))
        .and(header("authorization", "Bearer fresh-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(
            serde_json::json!([{"ID": "0b9f9b5e-2a47-4d1b-8c1e-6a0d2c3e4f51", "Code": "GOLD"}]),
            None,
        )))
        .expect(2)
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryTokenStorage::new());
    storage
        .save(
            "division-4242",
            &TokenSet::new("stale-access")
                .with_refresh_token("stored-refresh")
                .with_expires_at(Utc::now() - chrono::Duration::minutes(1)),
        )
        .unwrap();

    let provider = RefreshingTokenProvider::new(oauth(&server), storage.clone(), "division-4242");
    let eo = facade_with_tokens(&server, Arc::new(provider));

    // The second call reuses the refreshed token.
    for _ in 0..2 {
        let types = eo
            .subscription_types()
            .list_all(&ListParams::new())
            .await
            .expect("list should succeed with refreshed token");
        assert_eq!(types.len(), 1);
    }

    let stored = storage.load("division-4242").unwrap().unwrap();
    assert_eq!(stored.access_token, "fresh-access");
    assert_eq!(stored.refresh_token.as_deref(), Some("rotated-refresh"));
}

#[tokio::test]
async fn test_refresh_failure_surfaces_as_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "refresh token revoked"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = RefreshingTokenProvider::new(
        oauth(&server),
        Arc::new(MemoryTokenStorage::new()),
        "division-4242",
    )
    .with_tokens(TokenSet::from_refresh_token("revoked"));
    let eo = facade_with_tokens(&server, Arc::new(provider));

    let err = eo.budgets().count(None).await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("invalid_grant"));
}
