/// Seat availability and booking workflow.
pub mod booking_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
