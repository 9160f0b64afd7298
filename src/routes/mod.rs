use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::SharedState;

pub mod booking;
pub mod docs;
pub mod health;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(booking::router())
        .merge(docs::router())
        .with_state(state)
}

/// Build the top-level router and attach cross-cutting middleware layers.
pub fn app(state: SharedState) -> Router<()> {
    router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
