//! Integration tests for the health check and documentation endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, test_config};
use seat_booking_back::{routes, state::AppState};
use serde_json::json;

#[tokio::test]
async fn healthcheck_reports_lazy_seat_map() {
    let state = AppState::new(test_config());
    let app = routes::app(state);

    let response = get(app.clone(), "/healthcheck").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, json!({ "status": "ok", "seat_map_ready": false }));

    let response = get(app.clone(), "/api/seat-availability").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app, "/healthcheck").await).await;
    assert_eq!(json, json!({ "status": "ok", "seat_map_ready": true }));
}

#[tokio::test]
async fn openapi_document_lists_booking_routes() {
    let app = routes::app(AppState::new(test_config()));
    let response = get(app, "/api-doc/openapi.json").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["paths"]["/api/seat-availability"]["get"].is_object());
    assert!(json["paths"]["/api/book-seat"]["post"].is_object());
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = routes::app(AppState::new(test_config()));
    let response = get(app, "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
