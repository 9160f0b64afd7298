use tracing::debug;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Respond with a static health payload, noting whether the seat map exists yet.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let ready = state.is_seat_map_initialized();
    if !ready {
        debug!("seat map not generated yet; it will be on first request");
    }
    HealthResponse::ok(ready)
}
