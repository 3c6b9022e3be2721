//! Room API handlers

use axum::extract::{Path, Query, State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{CleanerAssignment, HousekeepingAdvance, Room, RoomCreate, RoomStatusUpdate};

use crate::auth::CurrentActor;
use crate::core::ServerState;
use axum::Json;

/// GET /api/rooms - list all rooms
pub async fn list(
    State(state): State<ServerState>,
    _actor: CurrentActor,
) -> AppResult<ApiResponse<Vec<Room>>> {
    let rooms = state.rooms.list_rooms().map_err(AppError::from)?;
    Ok(ApiResponse::success(rooms))
}

/// GET /api/rooms/{id} - fetch one room
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    _actor: CurrentActor,
) -> AppResult<ApiResponse<Room>> {
    let room = state.rooms.get_room(id).map_err(AppError::from)?;
    Ok(ApiResponse::success(room))
}

/// POST /api/rooms - create a room (admin)
pub async fn create(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Json(payload): Json<RoomCreate>,
) -> AppResult<ApiResponse<Room>> {
    let room = state
        .rooms
        .create_room(payload, &actor)
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(room))
}

/// PUT /api/rooms/{id}/status - admin status override
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    actor: CurrentActor,
    Json(payload): Json<RoomStatusUpdate>,
) -> AppResult<ApiResponse<Room>> {
    let room = state
        .rooms
        .update_status(id, payload.status, &actor)
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(room))
}

/// PUT /api/rooms/{id}/cleaner - assign a cleaner (admin)
pub async fn assign_cleaner(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    actor: CurrentActor,
    Json(payload): Json<CleanerAssignment>,
) -> AppResult<ApiResponse<Room>> {
    let room = state
        .rooms
        .assign_cleaner(id, payload.cleaner_id, &actor)
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(room))
}

/// POST /api/rooms/{id}/housekeeping - advance the cleanliness sub-machine
pub async fn advance_housekeeping(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    actor: CurrentActor,
    Json(payload): Json<HousekeepingAdvance>,
) -> AppResult<ApiResponse<Room>> {
    let room = state
        .housekeeping
        .advance(id, payload.status, &actor)
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(room))
}

/// Availability browse query
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub exclude_booking_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct Availability {
    pub available: bool,
}

/// GET /api/rooms/{id}/availability - advisory availability check
///
/// Non-locking browse; the authoritative check runs inside the booking
/// creation transaction.
pub async fn availability(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
    _actor: CurrentActor,
) -> AppResult<ApiResponse<Availability>> {
    let available = state
        .bookings
        .is_available(
            id,
            query.check_in,
            query.check_out,
            query.exclude_booking_id,
        )
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(Availability { available }))
}
