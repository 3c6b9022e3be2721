//! Payment API handlers

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{Payment, PaymentCreate, PaymentSummary, PaymentUpdate};

use crate::auth::CurrentActor;
use crate::core::ServerState;

/// POST /api/bookings/{id}/payments - record a payment (staff)
pub async fn create(
    State(state): State<ServerState>,
    Path(booking_id): Path<Uuid>,
    actor: CurrentActor,
    Json(payload): Json<PaymentCreate>,
) -> AppResult<ApiResponse<Payment>> {
    let payment = state
        .payments
        .create_payment(booking_id, payload, &actor)
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(payment))
}

/// GET /api/bookings/{id}/payments - list a booking's payments, newest first
pub async fn list(
    State(state): State<ServerState>,
    Path(booking_id): Path<Uuid>,
    actor: CurrentActor,
) -> AppResult<ApiResponse<Vec<Payment>>> {
    let payments = state
        .payments
        .list_payments(booking_id, &actor)
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(payments))
}

/// GET /api/bookings/{id}/payments/summary - derived summary
///
/// Recomputed from the full history inside one snapshot on every call;
/// nothing here is cached.
pub async fn summary(
    State(state): State<ServerState>,
    Path(booking_id): Path<Uuid>,
    actor: CurrentActor,
) -> AppResult<ApiResponse<PaymentSummary>> {
    let summary = state
        .payments
        .get_summary(booking_id, &actor)
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(summary))
}

/// GET /api/payments/{id} - fetch one payment
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    actor: CurrentActor,
) -> AppResult<ApiResponse<Payment>> {
    let payment = state
        .payments
        .get_payment(id, &actor)
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(payment))
}

/// PATCH /api/payments/{id} - correct a payment (staff)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    actor: CurrentActor,
    Json(payload): Json<PaymentUpdate>,
) -> AppResult<ApiResponse<Payment>> {
    let payment = state
        .payments
        .update_payment(id, payload, &actor)
        .map_err(AppError::from)?;
    Ok(ApiResponse::success(payment))
}

/// DELETE /api/payments/{id} - delete a payment (staff)
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    actor: CurrentActor,
) -> AppResult<ApiResponse<()>> {
    state
        .payments
        .delete_payment(id, &actor)
        .map_err(AppError::from)?;
    Ok(ApiResponse::ok())
}
