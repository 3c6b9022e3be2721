//! Payment ledger errors

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::PaymentType;
use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// Errors raised by the payment ledger
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Booking not found: {0}")]
    BookingNotFound(Uuid),

    #[error("Payment not found: {0}")]
    PaymentNotFound(Uuid),

    #[error("Payment amount cannot be zero")]
    ZeroAmount,

    #[error("{0:?} payments must have a positive amount")]
    NonPositiveAmount(PaymentType),

    #[error("Refund amount must be negative")]
    PositiveRefund,

    #[error("Invalid payment method: {0}")]
    InvalidMethod(String),

    #[error("Refund of {requested} exceeds net received {net_received}")]
    OverRefund {
        requested: Decimal,
        net_received: Decimal,
    },

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Store(e) => {
                tracing::error!(error = %e, "Ledger storage error");
                AppError::with_message(ErrorCode::StorageFailure, e.to_string())
            }
            LedgerError::BookingNotFound(id) => AppError::with_message(
                ErrorCode::BookingNotFound,
                format!("Booking {} not found", id),
            ),
            LedgerError::PaymentNotFound(id) => AppError::with_message(
                ErrorCode::PaymentNotFound,
                format!("Payment {} not found", id),
            ),
            LedgerError::ZeroAmount => {
                AppError::with_message(ErrorCode::InvalidAmount, "Payment amount cannot be zero")
            }
            LedgerError::NonPositiveAmount(ty) => AppError::with_message(
                ErrorCode::InvalidAmount,
                format!(
                    "Payment amount must be positive (got non-positive for {:?} type)",
                    ty
                ),
            ),
            LedgerError::PositiveRefund => AppError::with_message(
                ErrorCode::InvalidAmount,
                "Refund amount must be negative",
            ),
            LedgerError::InvalidMethod(method) => AppError::with_message(
                ErrorCode::InvalidPaymentMethod,
                format!("Invalid payment method: {}", method),
            ),
            LedgerError::OverRefund {
                requested,
                net_received,
            } => AppError::with_message(
                ErrorCode::RefundExceedsPaid,
                format!(
                    "Refund of {} exceeds the net amount received ({})",
                    requested, net_received
                ),
            ),
            LedgerError::Forbidden(msg) => {
                AppError::with_message(ErrorCode::PermissionDenied, msg)
            }
        }
    }
}
