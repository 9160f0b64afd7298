use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};

use crate::{
    dto::booking::{BookSeatRequest, BookSeatResponse, SeatAvailabilityResponse},
    error::AppError,
    services::booking_service,
    state::SharedState,
};

/// Endpoints consumed by the seat grid and the purchase dialog.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/seat-availability", get(seat_availability))
        .route("/api/book-seat", post(book_seat))
}

#[utoipa::path(
    get,
    path = "/api/seat-availability",
    tag = "booking",
    responses((status = 200, description = "Every seat with its price and availability", body = SeatAvailabilityResponse))
)]
/// Return the seat map along with the grid dimensions.
pub async fn seat_availability(
    State(state): State<SharedState>,
) -> Json<SeatAvailabilityResponse> {
    Json(booking_service::get_availability(&state).await)
}

#[utoipa::path(
    post,
    path = "/api/book-seat",
    tag = "booking",
    request_body = BookSeatRequest,
    responses(
        (status = 200, description = "Seat booked", body = BookSeatResponse),
        (status = 400, description = "Unreadable body, missing payment details or seat already booked"),
        (status = 404, description = "Unknown seat"),
        (status = 500, description = "Simulated transient failure; retry the request")
    )
)]
/// Book a seat, paying with the supplied credit card.
pub async fn book_seat(
    State(state): State<SharedState>,
    payload: Result<Json<BookSeatRequest>, JsonRejection>,
) -> Result<Json<BookSeatResponse>, AppError> {
    let Json(payload) = payload?;
    let response = booking_service::book_seat(&state, payload).await?;
    Ok(Json(response))
}
