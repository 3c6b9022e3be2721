//! Payment model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment type
///
/// `refund` entries carry a non-positive amount; every other type must be
/// positive. Zero is never a valid amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Deposit,
    Partial,
    Full,
    Refund,
}

impl PaymentType {
    pub fn is_refund(&self) -> bool {
        matches!(self, PaymentType::Refund)
    }
}

/// Accepted payment methods
pub const PAYMENT_METHODS: &[&str] = &["cash", "card", "bank_transfer", "other"];

/// Whether `method` is in the accepted set
pub fn is_valid_payment_method(method: &str) -> bool {
    PAYMENT_METHODS.contains(&method)
}

/// Signed monetary ledger entry against a booking
///
/// Mutable and deletable (corrections happen); the booking summary is always
/// recomputed from the surviving entries, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: Uuid,
    /// Signed amount; negative only for refunds, never zero
    pub amount: Decimal,
    pub payment_type: PaymentType,
    pub method: String,
    pub notes: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreate {
    pub amount: Decimal,
    pub payment_type: PaymentType,
    pub method: String,
    pub notes: Option<String>,
}

/// Update payment payload (correction)
///
/// `notes` is double-optional so a present value can clear the field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentUpdate {
    pub amount: Option<Decimal>,
    pub payment_type: Option<PaymentType>,
    pub method: Option<String>,
    pub notes: Option<Option<String>>,
}

/// Derived payment summary for a booking
///
/// Never stored; computed from the booking price and the full payment
/// history inside one read snapshot. A negative `remaining_balance` means
/// the booking is overpaid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub booking_id: Uuid,
    pub total_price: Decimal,
    pub total_paid: Decimal,
    pub remaining_balance: Decimal,
    pub payment_count: u64,
}
