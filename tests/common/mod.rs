#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, Response, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use seat_booking_back::{
    config::AppConfig,
    routes,
    state::{
        AppState, SharedState,
        latency::ArtificialDelay,
        seat_map::{SeatId, SeatMap},
    },
};
use serde_json::Value;
use tower::ServiceExt;

/// Default configuration without any artificial latency.
pub fn test_config() -> AppConfig {
    AppConfig {
        availability_delay: ArtificialDelay::NONE,
        booking_delay: ArtificialDelay::NONE,
        ..AppConfig::default()
    }
}

/// Build the full application with every seat free except `booked`.
pub fn build_test_app(config: AppConfig, booked: &[&str]) -> (Router, SharedState) {
    let mut map = SeatMap::unbooked(config.layout());
    for id in booked {
        let id: SeatId = id.parse().expect("valid seat id");
        map.get_mut(&id).expect("seat in layout").is_booked = true;
    }
    let state = AppState::with_seat_map(config, map);
    (routes::app(state.clone()), state)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

/// Post arbitrary bytes labelled as JSON.
pub async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
