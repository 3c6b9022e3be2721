//! Booking model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::payment::PaymentCreate;

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Upcoming,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    /// Terminal states never leave
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::CheckedOut | BookingStatus::Cancelled)
    }

    /// Active bookings block the room's date range in the availability index
    pub fn blocks_availability(&self) -> bool {
        matches!(self, BookingStatus::Upcoming | BookingStatus::CheckedIn)
    }

    /// Whether the lifecycle permits moving from `self` to `target`
    /// (role and date guards are enforced separately by the manager)
    pub fn can_transition_to(&self, target: BookingStatus) -> bool {
        matches!(
            (self, target),
            (BookingStatus::Upcoming, BookingStatus::CheckedIn)
                | (BookingStatus::Upcoming, BookingStatus::Cancelled)
                | (BookingStatus::CheckedIn, BookingStatus::CheckedOut)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Upcoming => "upcoming",
            BookingStatus::CheckedIn => "checked_in",
            BookingStatus::CheckedOut => "checked_out",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel a booking was created through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationSource {
    Staff,
    Guest,
}

/// Reservation of one room for one stay
///
/// Never deleted: cancellation is a terminal status, not a removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    /// Human-facing reference, format `BK-YYYYMMDD-XXXX`, unique
    pub reference: String,
    pub guest_name: String,
    pub room_id: Uuid,
    pub check_in_date: NaiveDate,
    /// Strictly after `check_in_date`; the check-out day itself is free
    pub check_out_date: NaiveDate,
    pub status: BookingStatus,
    /// Room price snapshotted at creation; immutable afterwards
    pub price: Decimal,
    pub created_by: Uuid,
    pub creation_source: CreationSource,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub room_id: Uuid,
    pub guest_name: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

/// Check-in payload: the payment recorded atomically with the transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInRequest {
    pub payment: PaymentCreate,
    /// Confirms the payment-backed early-arrival flow (today before check-in)
    #[serde(default)]
    pub early_check_in: bool,
}

/// Check-out payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckOutRequest {
    /// Confirms checking out before the booked check-out date
    #[serde(default)]
    pub early_checkout_confirmed: bool,
}
