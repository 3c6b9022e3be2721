//! Room registry and housekeeping errors

use shared::error::{AppError, ErrorCode};
use shared::models::RoomStatus;
use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// Errors raised by the room registry and housekeeping workflow
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Room not found: {0}")]
    RoomNotFound(Uuid),

    #[error("Room number already taken: {0}")]
    NumberTaken(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Cleaner assignment is only valid for dirty or cleaning rooms
    #[error("Cannot assign a cleaner to a {0:?} room")]
    AssignmentGuard(RoomStatus),

    #[error("Housekeeping cannot move a room from {from:?} to {to:?}")]
    HousekeepingGuard { from: RoomStatus, to: RoomStatus },

    #[error("Room is not assigned to the acting cleaner")]
    NotAssignedCleaner,

    /// Benign signal: the room already has the requested status
    #[error("Room is already {0:?}")]
    AlreadyInStatus(RoomStatus),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Store(e) => {
                tracing::error!(error = %e, "Room storage error");
                AppError::with_message(ErrorCode::StorageFailure, e.to_string())
            }
            RegistryError::Validation(msg) => {
                AppError::with_message(ErrorCode::ValidationFailed, msg)
            }
            RegistryError::RoomNotFound(id) => {
                AppError::with_message(ErrorCode::RoomNotFound, format!("Room {} not found", id))
            }
            RegistryError::NumberTaken(number) => AppError::with_message(
                ErrorCode::RoomNumberExists,
                format!("Room number {} already exists", number),
            ),
            RegistryError::Forbidden(msg) => {
                AppError::with_message(ErrorCode::PermissionDenied, msg)
            }
            RegistryError::AssignmentGuard(status) => AppError::with_message(
                ErrorCode::CleanerAssignmentInvalid,
                format!("Cannot assign a cleaner to a {:?} room", status),
            ),
            RegistryError::HousekeepingGuard { from, to } => AppError::with_message(
                ErrorCode::HousekeepingGuard,
                format!("Housekeeping cannot move a room from {:?} to {:?}", from, to),
            ),
            RegistryError::NotAssignedCleaner => AppError::new(ErrorCode::NotAssignedCleaner),
            RegistryError::AlreadyInStatus(status) => AppError::with_message(
                ErrorCode::AlreadyInState,
                format!("Room is already {:?}", status),
            ),
        }
    }
}
