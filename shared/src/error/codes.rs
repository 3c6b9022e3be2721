//! Unified error codes for the Harbor front-desk core
//!
//! Error codes are shared between desk-server and its clients and are
//! organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Booking errors
//! - 5xxx: Payment errors
//! - 7xxx: Room errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,
    /// Actor identity headers are missing or malformed
    ActorIdentityInvalid = 1002,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// A specific role is required for this operation
    RoleRequired = 2002,
    /// Caller does not own the booking
    NotBookingOwner = 2003,
    /// Room is not assigned to the acting cleaner
    NotAssignedCleaner = 2004,

    // ==================== 4xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 4001,
    /// Requested date range overlaps an active booking on the room
    BookingConflict = 4002,
    /// Requested state transition is not permitted
    IllegalTransition = 4003,
    /// Booking is already in the requested terminal state (benign)
    AlreadyInState = 4004,
    /// Check-out date is not after check-in date
    InvalidDateRange = 4005,
    /// Room cannot be booked in its current status
    RoomUnavailable = 4006,
    /// Transition blocked by its date guard
    DateGuardFailed = 4007,

    // ==================== 5xxx: Payment ====================
    /// Payment not found
    PaymentNotFound = 5001,
    /// Payment amount violates the sign rules for its type
    InvalidAmount = 5002,
    /// Payment method is not in the accepted set
    InvalidPaymentMethod = 5003,
    /// Refund magnitude exceeds the net amount received
    RefundExceedsPaid = 5004,

    // ==================== 7xxx: Room ====================
    /// Room not found
    RoomNotFound = 7001,
    /// Room number is already taken
    RoomNumberExists = 7002,
    /// Housekeeping sub-machine guard violated
    HousekeepingGuard = 7003,
    /// Cleaner can only be assigned to a dirty or cleaning room
    CleanerAssignmentInvalid = 7004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Storage engine failure
    StorageFailure = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",

            Self::NotAuthenticated => "Not authenticated",
            Self::ActorIdentityInvalid => "Actor identity headers missing or malformed",

            Self::PermissionDenied => "Permission denied",
            Self::RoleRequired => "Required role missing",
            Self::NotBookingOwner => "Booking belongs to another guest",
            Self::NotAssignedCleaner => "Room is not assigned to this cleaner",

            Self::BookingNotFound => "Booking not found",
            Self::BookingConflict => "Date range overlaps an existing booking",
            Self::IllegalTransition => "State transition not permitted",
            Self::AlreadyInState => "Booking already in requested state",
            Self::InvalidDateRange => "Check-out date must be after check-in date",
            Self::RoomUnavailable => "Room cannot be booked in its current status",
            Self::DateGuardFailed => "Transition blocked by its date guard",

            Self::PaymentNotFound => "Payment not found",
            Self::InvalidAmount => "Payment amount violates the sign rules for its type",
            Self::InvalidPaymentMethod => "Payment method not accepted",
            Self::RefundExceedsPaid => "Refund exceeds the net amount received",

            Self::RoomNotFound => "Room not found",
            Self::RoomNumberExists => "Room number already taken",
            Self::HousekeepingGuard => "Housekeeping transition not permitted",
            Self::CleanerAssignmentInvalid => "Cleaner can only be assigned to a dirty or cleaning room",

            Self::InternalError => "Internal server error",
            Self::StorageFailure => "Storage engine failure",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code.code()
    }
}

/// Error returned when converting an unknown u16 to an [`ErrorCode`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,

            1001 => Self::NotAuthenticated,
            1002 => Self::ActorIdentityInvalid,

            2001 => Self::PermissionDenied,
            2002 => Self::RoleRequired,
            2003 => Self::NotBookingOwner,
            2004 => Self::NotAssignedCleaner,

            4001 => Self::BookingNotFound,
            4002 => Self::BookingConflict,
            4003 => Self::IllegalTransition,
            4004 => Self::AlreadyInState,
            4005 => Self::InvalidDateRange,
            4006 => Self::RoomUnavailable,
            4007 => Self::DateGuardFailed,

            5001 => Self::PaymentNotFound,
            5002 => Self::InvalidAmount,
            5003 => Self::InvalidPaymentMethod,
            5004 => Self::RefundExceedsPaid,

            7001 => Self::RoomNotFound,
            7002 => Self::RoomNumberExists,
            7003 => Self::HousekeepingGuard,
            7004 => Self::CleanerAssignmentInvalid,

            9001 => Self::InternalError,
            9002 => Self::StorageFailure,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::AlreadyInState.code(), 4004);
        assert_eq!(ErrorCode::RefundExceedsPaid.code(), 5004);
        assert_eq!(ErrorCode::RoomNumberExists.code(), 7002);
        assert_eq!(ErrorCode::StorageFailure.code(), 9002);
    }

    #[test]
    fn test_try_from_round_trip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::NotAuthenticated,
            ErrorCode::NotBookingOwner,
            ErrorCode::BookingConflict,
            ErrorCode::AlreadyInState,
            ErrorCode::InvalidPaymentMethod,
            ErrorCode::HousekeepingGuard,
            ErrorCode::InternalError,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()).unwrap(), code);
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(3100), Err(InvalidErrorCode(3100)));
        assert_eq!(ErrorCode::try_from(u16::MAX), Err(InvalidErrorCode(u16::MAX)));
    }

    #[test]
    fn test_serialize_as_u16() {
        let json = serde_json::to_string(&ErrorCode::BookingConflict).unwrap();
        assert_eq!(json, "4002");
        let code: ErrorCode = serde_json::from_str("5004").unwrap();
        assert_eq!(code, ErrorCode::RefundExceedsPaid);
    }

    #[test]
    fn test_default_messages() {
        assert_eq!(ErrorCode::Success.message(), "Success");
        assert_eq!(ErrorCode::BookingNotFound.message(), "Booking not found");
        assert!(ErrorCode::RefundExceedsPaid.message().contains("Refund"));
    }
}
