//! Room model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Room type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Single,
    Double,
    Suite,
}

/// Room status
///
/// `available`, `dirty` and `cleaning` form the housekeeping sub-machine;
/// `occupied` is driven by the booking lifecycle and `maintenance` by the
/// admin override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
    Dirty,
    Cleaning,
}

impl RoomStatus {
    /// Statuses reachable by the housekeeping sub-machine
    pub fn in_housekeeping_machine(&self) -> bool {
        matches!(self, RoomStatus::Dirty | RoomStatus::Cleaning | RoomStatus::Available)
    }

    /// Statuses a cleaner may be assigned in
    pub fn accepts_cleaner_assignment(&self) -> bool {
        matches!(self, RoomStatus::Dirty | RoomStatus::Cleaning)
    }
}

/// Physical room entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    /// Unique human-facing room number, e.g. "101"
    pub number: String,
    pub room_type: RoomType,
    /// Nightly price; snapshotted onto bookings at creation
    pub price: Decimal,
    pub status: RoomStatus,
    /// Cleaner currently responsible for this room, if any
    pub assigned_cleaner: Option<Uuid>,
    /// Booking that caused the current occupancy; `None` unless `occupied`
    pub occupied_booking_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create room payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCreate {
    pub number: String,
    pub room_type: RoomType,
    pub price: Decimal,
}

/// Set room status payload (admin override)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomStatusUpdate {
    pub status: RoomStatus,
}

/// Assign cleaner payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanerAssignment {
    pub cleaner_id: Uuid,
}

/// Housekeeping advance payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousekeepingAdvance {
    pub status: RoomStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&RoomStatus::Cleaning).unwrap(),
            "\"cleaning\""
        );
        let status: RoomStatus = serde_json::from_str("\"maintenance\"").unwrap();
        assert_eq!(status, RoomStatus::Maintenance);
    }

    #[test]
    fn test_housekeeping_machine_membership() {
        assert!(RoomStatus::Dirty.in_housekeeping_machine());
        assert!(RoomStatus::Cleaning.in_housekeeping_machine());
        assert!(RoomStatus::Available.in_housekeeping_machine());
        assert!(!RoomStatus::Occupied.in_housekeeping_machine());
        assert!(!RoomStatus::Maintenance.in_housekeeping_machine());
    }

    #[test]
    fn test_cleaner_assignment_statuses() {
        assert!(RoomStatus::Dirty.accepts_cleaner_assignment());
        assert!(RoomStatus::Cleaning.accepts_cleaner_assignment());
        assert!(!RoomStatus::Available.accepts_cleaner_assignment());
        assert!(!RoomStatus::Occupied.accepts_cleaner_assignment());
    }
}
