//! Seat availability and the booking workflow.
//!
//! A booking attempt runs through a fixed sequence: capture whether the seat is already
//! booked, wait for the artificial delay, then reject missing payment details, unknown seats,
//! already booked seats and (every other time) a simulated server failure before finally
//! marking the seat as booked.

use tracing::{debug, info, warn};

use crate::{
    config::{BookingMode, FailureSimulation},
    dto::booking::{BookSeatRequest, BookSeatResponse, SeatAvailabilityResponse},
    error::ServiceError,
    state::{SharedState, seat_map::SeatId},
};

/// Return the whole seat map, generating it on first use.
pub async fn get_availability(state: &SharedState) -> SeatAvailabilityResponse {
    let seats = state.seat_map().await;
    state.config().availability_delay.wait().await;

    let map = seats.read().await;
    SeatAvailabilityResponse::from(&*map)
}

/// Attempt to book a seat on behalf of a customer.
pub async fn book_seat(
    state: &SharedState,
    request: BookSeatRequest,
) -> Result<BookSeatResponse, ServiceError> {
    let seats = state.seat_map().await;
    let seat_id = request.seat_id.parse::<SeatId>().ok();

    // Held until the function returns so the check below cannot go stale.
    let _seat_guard = match (state.config().booking_mode, seat_id) {
        (BookingMode::Atomic, Some(id)) => state.lock_seat(id).await,
        _ => None,
    };

    // Read before the delay: in racy mode a concurrent booking can land in between.
    let captured = match seat_id {
        Some(id) => seats
            .read()
            .await
            .get(&id)
            .map(|seat| (id, seat.is_booked)),
        None => None,
    };

    state.config().booking_delay.wait().await;

    if !request.has_payment_details() {
        debug!(seat_id = %request.seat_id, "booking rejected: missing payment details");
        return Err(ServiceError::MissingPaymentInfo);
    }

    let Some((seat_id, is_already_booked)) = captured else {
        debug!(seat_id = %request.seat_id, "booking rejected: unknown seat");
        return Err(ServiceError::SeatNotFound(request.seat_id));
    };

    if is_already_booked {
        debug!(%seat_id, "booking rejected: seat already booked");
        return Err(ServiceError::AlreadyBooked);
    }

    if state.config().failure_simulation == FailureSimulation::Alternating
        && state.flip_booking_outcome()
    {
        warn!(%seat_id, "simulated booking failure");
        return Err(ServiceError::Transient);
    }

    let mut map = seats.write().await;
    if let Some(seat) = map.get_mut(&seat_id) {
        seat.is_booked = true;
    }
    info!(%seat_id, "seat booked");

    Ok(BookSeatResponse::booked())
}
