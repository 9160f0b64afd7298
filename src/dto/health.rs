use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status, always "ok" once the server accepts requests.
    pub status: String,
    /// Whether the seat map has been generated yet.
    pub seat_map_ready: bool,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(seat_map_ready: bool) -> Self {
        Self {
            status: "ok".to_string(),
            seat_map_ready,
        }
    }
}
