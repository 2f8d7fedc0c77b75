use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use crate::modules::smart_meters::adapters::outbound::meter_store_sqlite::SqliteMeterStore;
use crate::modules::smart_meters::core::ports::MeterStore;
use crate::shared::infrastructure::sqlite::connect_pool;
use crate::shell::http::router;
use crate::shell::state::AppState;

async fn seeded_app() -> Router {
    let pool = connect_pool("sqlite::memory:", 1).await.unwrap();
    let store = Arc::new(SqliteMeterStore::new(pool));
    store.initialize().await.unwrap();
    router(AppState::new(store))
}

async fn call_tool(app: &Router, name: &str, meter_id: i64) -> Value {
    let body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": { "name": name, "arguments": { "meter_id": meter_id } }
    });
    let response = app
        .clone()
        .oneshot(
            Request::post("/mcp")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    json["result"]["structuredContent"]["result"].clone()
}

#[tokio::test]
async fn seeded_meters_answer_every_tool_consistently() {
    let app = seeded_app().await;

    for meter_id in [101, 102, 103] {
        let usage = call_tool(&app, "get_usage", meter_id).await.as_f64().unwrap();
        assert!((150.0..=750.0).contains(&usage), "usage {usage} out of range");

        let bill = call_tool(&app, "get_bill", meter_id).await.as_i64().unwrap();
        assert_eq!(bill, (usage * 7.0).floor() as i64);

        let expected_status = if usage > 400.0 { "High Usage" } else { "OK" };
        assert_eq!(call_tool(&app, "get_status", meter_id).await, expected_status);

        let info = call_tool(&app, "get_meter_info", meter_id).await;
        assert_eq!(info["status"], expected_status);
    }

    assert_eq!(call_tool(&app, "get_customer_info", 101).await, "Ravi Kumar");
    assert_eq!(call_tool(&app, "get_customer_info", 102).await, "Asha Singh");
    assert_eq!(call_tool(&app, "get_customer_info", 103).await, "Mohit Verma");
}

#[tokio::test]
async fn an_unseeded_meter_degrades_to_sentinels() {
    let app = seeded_app().await;

    assert_eq!(
        call_tool(&app, "get_meter_info", 999).await,
        json!({"name": "Unknown", "status": "Unknown"})
    );
    assert_eq!(call_tool(&app, "get_usage", 999).await, json!(0.0));
    assert_eq!(call_tool(&app, "get_bill", 999).await, json!(0));
    assert_eq!(call_tool(&app, "get_status", 999).await, "Unknown");
    assert_eq!(call_tool(&app, "get_customer_info", 999).await, "Unknown Customer");
}
