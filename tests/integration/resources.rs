//! Resource operations through the facade.

use super::common::{api_path, collection, facade};
use chrono::{TimeZone, Utc};
use exact_online_api::rest::{Filter, SubscriptionTypeUpdate};
use exact_online_api::{ListParams, SalesOrder};
use futures::TryStreamExt;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TYPE_ID: &str = "0b9f9b5e-2a47-4d1b-8c1e-6a0d2c3e4f51";

fn order(number: i32) -> serde_json::Value {
    serde_json::json!({
        "OrderID": Uuid::new_v4(),
        "OrderNumber": number,
        "Created": "/Date(1704067200000)/",
        "Status": 12
    })
}

fn keyed_type_path() -> String {
    format!("{}(guid'{TYPE_ID}')", api_path("subscription/SubscriptionTypes"))
}

// ============================================================================
// Reads
// ============================================================================

#[tokio::test]
async fn test_sales_orders_follow_next_links() {
    let server = MockServer::start().await;
    let orders = api_path("salesorder/SalesOrders");
    let next = format!("{}{orders}?$skiptoken=guid'page-2'", server.uri());

    Mock::given(method("GET"))
        .and(path(orders.as_str()))
        .and(query_param_is_missing("$skiptoken"))
        .and(query_param(
            "$filter",
            "Modified gt datetime'2024-01-01T00:00:00'",
        ))
        .and(header("authorization", "Bearer test-token"))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(collection(serde_json::json!([order(1), order(2)]), Some(next))),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(orders.as_str()))
        .and(query_param("$skiptoken", "guid'page-2'"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(collection(serde_json::json!([order(3)]), None)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let eo = facade(&server);
    let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let all: Vec<SalesOrder> = eo
        .sales_orders()
        .list_all(&ListParams::new().modified_after(since))
        .await
        .expect("list_all should succeed");

    let numbers: Vec<i32> = all.iter().map(|o| o.order_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert!(all.iter().all(|o| o.created.is_some()));
}

#[tokio::test]
async fn test_stream_yields_records_across_pages() {
    let server = MockServer::start().await;
    let budgets = api_path("budget/Budgets");
    let next = format!("{}{budgets}?$skiptoken=2", server.uri());

    let budget = |code: &str| serde_json::json!({"ID": Uuid::new_v4(), "GLAccountCode": code});

    Mock::given(method("GET"))
        .and(path(budgets.as_str()))
        .and(query_param_is_missing("$skiptoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(
            serde_json::json!([budget("8000"), budget("8010")]),
            Some(next),
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(budgets.as_str()))
        .and(query_param("$skiptoken", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(collection(serde_json::json!([budget("8020")]), None)),
        )
        .mount(&server)
        .await;

    let eo = facade(&server);
    let stream = eo
        .budgets()
        .list(&ListParams::new())
        .expect("valid list path")
        .into_stream();
    let all: Vec<_> = stream.try_collect().await.expect("stream should succeed");

    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_extra_filters_are_combined() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("salesorder/SalesOrders").as_str()))
        .and(query_param(
            "$filter",
            "Created lt datetime'2024-06-01T00:00:00' AND Status eq 12",
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(collection(serde_json::json!([]), None)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let eo = facade(&server);
    let before = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let params = ListParams::new()
        .created_before(before)
        .filter(Filter::eq("Status", 12));

    let all = eo.sales_orders().list_all(&params).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_count_with_created_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("salesorder/SalesOrders/$count").as_str()))
        .and(query_param(
            "$filter",
            "Created lt datetime'2024-06-01T00:00:00'",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("57"))
        .expect(1)
        .mount(&server)
        .await;

    let eo = facade(&server);
    let before = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let total = eo.sales_orders().count(Some(before)).await.unwrap();

    assert_eq!(total, 57);
}

// ============================================================================
// Mutations
// ============================================================================

#[tokio::test]
async fn test_subscription_type_lifecycle() {
    let server = MockServer::start().await;
    let id = Uuid::parse_str(TYPE_ID).unwrap();

    Mock::given(method("POST"))
        .and(path(api_path("subscription/SubscriptionTypes").as_str()))
        .and(body_json(serde_json::json!({"Code": "GOLD", "Description": "Gold tier"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "d": {"ID": TYPE_ID, "Code": "GOLD", "Description": "Gold tier", "Division": 4242}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(keyed_type_path().as_str()))
        .and(body_json(serde_json::json!({"Description": "Gold tier 2025"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(keyed_type_path().as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let types = facade(&server).subscription_types();

    let created = types
        .create(&SubscriptionTypeUpdate::new().code("GOLD").description("Gold tier"))
        .await
        .expect("create should succeed");
    assert_eq!(created.id, id);
    assert_eq!(created.division, 4242);

    types
        .update(&id, &SubscriptionTypeUpdate::new().description("Gold tier 2025"))
        .await
        .expect("update should succeed");

    types.delete(&id).await.expect("delete should succeed");
}

#[tokio::test]
async fn test_get_by_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(keyed_type_path().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "d": {"results": [{"ID": TYPE_ID, "Code": "SILVER"}]}
        })))
        .mount(&server)
        .await;

    let id = Uuid::parse_str(TYPE_ID).unwrap();
    let found = facade(&server)
        .subscription_types()
        .get(&id)
        .await
        .unwrap()
        .expect("record should be present");

    assert_eq!(found.code, "SILVER");
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_api_error_carries_status_and_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("budget/Budgets").as_str()))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {"code": "", "message": {"lang": "", "value": "Invalid filter"}}
        })))
        .mount(&server)
        .await;

    let err = facade(&server)
        .budgets()
        .list_all(&ListParams::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("Invalid filter"));
    let url = err.url().expect("error should record the URL");
    assert!(url.contains("/budget/Budgets"));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_rate_limited_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("salesorder/SalesOrders/$count").as_str()))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "30")
                .set_body_string("Too many requests"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = facade(&server).sales_orders().count(None).await.unwrap_err();

    assert!(err.is_rate_limited());
    assert!(err.is_retryable());
}
