use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Seat Booking Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::booking::seat_availability,
        crate::routes::booking::book_seat,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::booking::SeatSnapshot,
            crate::dto::booking::SeatAvailabilityResponse,
            crate::dto::booking::BookSeatRequest,
            crate::dto::booking::BookSeatResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "booking", description = "Seat availability and ticket purchase"),
    )
)]
pub struct ApiDoc;
