//! Booking API handlers

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{Booking, BookingCreate, CheckInRequest, CheckOutRequest};

use crate::auth::CurrentActor;
use crate::bookings::CheckInOutcome;
use crate::core::ServerState;

/// GET /api/bookings - list bookings (guests see only their own)
pub async fn list(
    State(state): State<ServerState>,
    actor: CurrentActor,
) -> AppResult<ApiResponse<Vec<Booking>>> {
    let bookings = state.bookings.list_bookings(&actor).map_err(AppError::from)?;
    Ok(ApiResponse::success(bookings))
}

/// GET /api/bookings/{id} - fetch one booking
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    actor: CurrentActor,
) -> AppResult<ApiResponse<Booking>> {
    let booking = state
        .bookings
        .get_booking(id, &actor)
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(booking))
}

/// POST /api/bookings - create a booking
///
/// The availability check runs inside the same exclusive transaction as the
/// insert; an overlap is rejected with the conflict code.
pub async fn create(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Json(payload): Json<BookingCreate>,
) -> AppResult<ApiResponse<Booking>> {
    let booking = state
        .bookings
        .create_booking(payload, &actor)
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(booking))
}

/// POST /api/bookings/{id}/check-in - check in with its payment, atomically
pub async fn check_in(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    actor: CurrentActor,
    Json(payload): Json<CheckInRequest>,
) -> AppResult<ApiResponse<CheckInOutcome>> {
    let outcome = state
        .bookings
        .check_in(id, payload, &actor)
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(outcome))
}

/// POST /api/bookings/{id}/check-out - check out (early flag optional)
pub async fn check_out(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    actor: CurrentActor,
    Json(payload): Json<CheckOutRequest>,
) -> AppResult<ApiResponse<Booking>> {
    let booking = state
        .bookings
        .check_out(id, payload, &actor)
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(booking))
}

/// POST /api/bookings/{id}/cancel - cancel a booking
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    actor: CurrentActor,
) -> AppResult<ApiResponse<Booking>> {
    let booking = state.bookings.cancel(id, &actor).map_err(AppError::from)?;
    Ok(ApiResponse::success(booking))
}
