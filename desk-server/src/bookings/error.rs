//! Booking manager errors

use chrono::NaiveDate;
use shared::error::{AppError, ErrorCode};
use shared::models::BookingStatus;
use thiserror::Error;
use uuid::Uuid;

use crate::payments::LedgerError;
use crate::store::StoreError;

/// Errors raised by the booking lifecycle manager
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Room not found: {0}")]
    RoomNotFound(Uuid),

    #[error("Booking not found: {0}")]
    BookingNotFound(Uuid),

    #[error("Invalid date range: check-out {check_out} is not after check-in {check_in}")]
    InvalidDateRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Room cannot be booked: {0}")]
    RoomUnavailable(String),

    #[error("Date range conflicts with booking {0}")]
    Conflict(String),

    #[error("Transition from {from} to {to} is not permitted")]
    IllegalTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// Benign signal: the booking already reached a terminal state
    #[error("Booking is already {0}")]
    AlreadyInState(BookingStatus),

    #[error("Date guard failed: {0}")]
    DateGuard(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Guest acted on a booking created by someone else
    #[error("Booking belongs to another guest")]
    NotOwner,

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Store(e) => {
                tracing::error!(error = %e, "Booking storage error");
                AppError::with_message(ErrorCode::StorageFailure, e.to_string())
            }
            BookingError::Validation(msg) => {
                AppError::with_message(ErrorCode::ValidationFailed, msg)
            }
            BookingError::RoomNotFound(id) => {
                AppError::with_message(ErrorCode::RoomNotFound, format!("Room {} not found", id))
            }
            BookingError::BookingNotFound(id) => AppError::with_message(
                ErrorCode::BookingNotFound,
                format!("Booking {} not found", id),
            ),
            BookingError::InvalidDateRange { check_in, check_out } => AppError::with_message(
                ErrorCode::InvalidDateRange,
                format!(
                    "Check-out {} must be after check-in {}",
                    check_out, check_in
                ),
            ),
            BookingError::RoomUnavailable(msg) => {
                AppError::with_message(ErrorCode::RoomUnavailable, msg)
            }
            BookingError::Conflict(reference) => AppError::with_message(
                ErrorCode::BookingConflict,
                format!("Date range overlaps booking {}", reference),
            )
            .with_detail("conflicting_reference", reference),
            BookingError::IllegalTransition { from, to } => AppError::with_message(
                ErrorCode::IllegalTransition,
                format!("Cannot move booking from {} to {}", from, to),
            ),
            BookingError::AlreadyInState(status) => AppError::with_message(
                ErrorCode::AlreadyInState,
                format!("Booking is already {}", status),
            )
            .with_detail("status", status.as_str()),
            BookingError::DateGuard(msg) => AppError::with_message(ErrorCode::DateGuardFailed, msg),
            BookingError::Forbidden(msg) => AppError::with_message(ErrorCode::PermissionDenied, msg),
            BookingError::NotOwner => AppError::new(ErrorCode::NotBookingOwner),
            BookingError::Ledger(e) => e.into(),
            BookingError::Internal(msg) => AppError::with_message(ErrorCode::InternalError, msg),
        }
    }
}
