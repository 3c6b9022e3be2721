//! HTTP API
//!
//! Thin handlers over the engine components. Every mutating call returns
//! the updated entity inside the unified [`shared::error::ApiResponse`]
//! envelope, or a structured `{code, message}` error.

pub mod bookings;
pub mod health;
pub mod payments;
pub mod rooms;

use axum::routing::{get, post, put};
use axum::Router;

use crate::core::ServerState;

/// Build the `/api` router
pub fn router(state: ServerState) -> Router {
    Router::new()
        // Rooms
        .route("/rooms", get(rooms::list).post(rooms::create))
        .route("/rooms/{id}", get(rooms::get_by_id))
        .route("/rooms/{id}/availability", get(rooms::availability))
        .route("/rooms/{id}/status", put(rooms::set_status))
        .route("/rooms/{id}/cleaner", put(rooms::assign_cleaner))
        .route("/rooms/{id}/housekeeping", post(rooms::advance_housekeeping))
        // Bookings
        .route("/bookings", get(bookings::list).post(bookings::create))
        .route("/bookings/{id}", get(bookings::get_by_id))
        .route("/bookings/{id}/check-in", post(bookings::check_in))
        .route("/bookings/{id}/check-out", post(bookings::check_out))
        .route("/bookings/{id}/cancel", post(bookings::cancel))
        // Payments
        .route(
            "/bookings/{id}/payments",
            get(payments::list).post(payments::create),
        )
        .route("/bookings/{id}/payments/summary", get(payments::summary))
        .route(
            "/payments/{id}",
            get(payments::get_by_id)
                .patch(payments::update)
                .delete(payments::remove),
        )
        // Health
        .route("/health", get(health::health))
        .with_state(state)
}
