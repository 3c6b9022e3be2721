//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // AlreadyInState is a benign no-op signal, not a failure: callers
            // get 200 with the distinct code so they can show a notice
            Self::AlreadyInState => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::BookingNotFound
            | Self::PaymentNotFound
            | Self::RoomNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::BookingConflict
            | Self::IllegalTransition
            | Self::RoomUnavailable
            | Self::RoomNumberExists
            | Self::HousekeepingGuard
            | Self::CleanerAssignmentInvalid => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::ActorIdentityInvalid => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::RoleRequired
            | Self::NotBookingOwner
            | Self::NotAssignedCleaner => StatusCode::FORBIDDEN,

            // 422 Unprocessable Entity (business rule violations)
            Self::RefundExceedsPaid | Self::DateGuardFailed => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            Self::InternalError | Self::StorageFailure => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
