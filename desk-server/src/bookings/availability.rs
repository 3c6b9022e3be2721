//! Availability index
//!
//! The authority that prevents double-booking. Ranges are half-open: a stay
//! occupies the nights [check_in, check_out), so a booking ending on a date
//! never conflicts with one starting that same date.
//!
//! The predicate is pure; callers decide which view of the bookings table it
//! runs against. Inside the creation write transaction it is authoritative,
//! against a read snapshot it is advisory browsing only.

use chrono::NaiveDate;
use shared::models::Booking;
use uuid::Uuid;

use super::error::BookingError;

/// Reject inverted or empty ranges
pub fn validate_range(check_in: NaiveDate, check_out: NaiveDate) -> Result<(), BookingError> {
    if check_out <= check_in {
        return Err(BookingError::InvalidDateRange {
            check_in,
            check_out,
        });
    }
    Ok(())
}

/// Half-open interval intersection
pub fn ranges_overlap(
    a_in: NaiveDate,
    a_out: NaiveDate,
    b_in: NaiveDate,
    b_out: NaiveDate,
) -> bool {
    a_in < b_out && a_out > b_in
}

/// Find a booking that blocks the requested range, if any
///
/// Only `upcoming` and `checked_in` bookings block; cancelled and
/// checked-out ones release their range. `exclude` skips the caller's own
/// booking when re-checking around an edit.
pub fn find_conflict<'a>(
    existing: &'a [Booking],
    check_in: NaiveDate,
    check_out: NaiveDate,
    exclude: Option<Uuid>,
) -> Option<&'a Booking> {
    existing.iter().find(|booking| {
        booking.status.blocks_availability()
            && Some(booking.id) != exclude
            && ranges_overlap(
                check_in,
                check_out,
                booking.check_in_date,
                booking.check_out_date,
            )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use shared::models::{BookingStatus, CreationSource};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(status: BookingStatus, check_in: NaiveDate, check_out: NaiveDate) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            reference: "BK-20240601-TEST".to_string(),
            guest_name: "Test Guest".to_string(),
            room_id: Uuid::new_v4(),
            check_in_date: check_in,
            check_out_date: check_out,
            status,
            price: Decimal::new(10000, 2),
            created_by: Uuid::new_v4(),
            creation_source: CreationSource::Staff,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_range_rejects_inverted_and_empty() {
        assert!(validate_range(date(2024, 6, 1), date(2024, 6, 2)).is_ok());
        assert!(matches!(
            validate_range(date(2024, 6, 2), date(2024, 6, 2)),
            Err(BookingError::InvalidDateRange { .. })
        ));
        assert!(matches!(
            validate_range(date(2024, 6, 3), date(2024, 6, 1)),
            Err(BookingError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_half_open_overlap() {
        // Overlapping interiors
        assert!(ranges_overlap(
            date(2024, 6, 2),
            date(2024, 6, 4),
            date(2024, 6, 1),
            date(2024, 6, 3)
        ));
        // Back-to-back stays share a date but not a night
        assert!(!ranges_overlap(
            date(2024, 6, 3),
            date(2024, 6, 5),
            date(2024, 6, 1),
            date(2024, 6, 3)
        ));
        // Containment
        assert!(ranges_overlap(
            date(2024, 6, 1),
            date(2024, 6, 10),
            date(2024, 6, 4),
            date(2024, 6, 5)
        ));
    }

    #[test]
    fn test_only_active_bookings_block() {
        let existing = vec![
            booking(BookingStatus::Cancelled, date(2024, 6, 1), date(2024, 6, 5)),
            booking(BookingStatus::CheckedOut, date(2024, 6, 1), date(2024, 6, 5)),
        ];
        assert!(find_conflict(&existing, date(2024, 6, 2), date(2024, 6, 4), None).is_none());

        let existing = vec![booking(
            BookingStatus::CheckedIn,
            date(2024, 6, 1),
            date(2024, 6, 5),
        )];
        assert!(find_conflict(&existing, date(2024, 6, 2), date(2024, 6, 4), None).is_some());
    }

    #[test]
    fn test_exclusion_skips_own_booking() {
        let mine = booking(BookingStatus::Upcoming, date(2024, 6, 1), date(2024, 6, 5));
        let existing = vec![mine.clone()];
        assert!(find_conflict(&existing, date(2024, 6, 2), date(2024, 6, 6), Some(mine.id)).is_none());
        assert!(find_conflict(&existing, date(2024, 6, 2), date(2024, 6, 6), None).is_some());
    }
}
