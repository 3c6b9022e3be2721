//! BookingManager - reservation lifecycle operations

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use shared::actor::{Actor, Role};
use shared::models::{
    Booking, BookingCreate, BookingStatus, CheckInRequest, CheckOutRequest, CreationSource,
    Payment, RoomStatus,
};
use uuid::Uuid;

use super::availability::{find_conflict, validate_range};
use super::error::{BookingError, BookingResult};
use super::transitions::authorize;
use crate::payments::PaymentLedger;
use crate::store::Store;
use redb::WriteTransaction;

/// Attempts before giving up on a free reference suffix
const MAX_REFERENCE_ATTEMPTS: usize = 16;

/// Result of a successful check-in: the booking and the ledger entry that
/// committed with it
#[derive(Debug, Clone, Serialize)]
pub struct CheckInOutcome {
    pub booking: Booking,
    pub payment: Payment,
}

/// Reservation lifecycle manager
///
/// Owns every booking mutation. Each operation runs in one exclusive write
/// transaction, so a transition and its side effects (ledger entry, room
/// status) are visible either completely or not at all.
#[derive(Clone)]
pub struct BookingManager {
    store: Store,
    ledger: PaymentLedger,
    /// Business timezone; date guards compare against "today" in this zone
    tz: Tz,
    #[cfg(test)]
    today_override: Option<NaiveDate>,
}

impl std::fmt::Debug for BookingManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingManager").field("tz", &self.tz).finish()
    }
}

impl BookingManager {
    pub fn new(store: Store, tz: Tz) -> Self {
        let ledger = PaymentLedger::new(store.clone());
        Self {
            store,
            ledger,
            tz,
            #[cfg(test)]
            today_override: None,
        }
    }

    /// Create a manager with a pinned business date (for testing)
    #[cfg(test)]
    pub fn with_today(store: Store, tz: Tz, today: NaiveDate) -> Self {
        let mut manager = Self::new(store, tz);
        manager.today_override = Some(today);
        manager
    }

    /// Today in the business timezone
    fn business_today(&self) -> NaiveDate {
        #[cfg(test)]
        if let Some(today) = self.today_override {
            return today;
        }
        crate::utils::time::business_today(self.tz)
    }

    /// Generate a unique booking reference, `BK-YYYYMMDD-XXXX`
    fn generate_reference(&self, txn: &WriteTransaction) -> BookingResult<String> {
        let date_str = self.business_today().format("%Y%m%d").to_string();
        for _ in 0..MAX_REFERENCE_ATTEMPTS {
            let suffix: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(4)
                .map(|c| (c as char).to_ascii_uppercase())
                .collect();
            let reference = format!("BK-{}-{}", date_str, suffix);
            if !self.store.reference_exists(txn, &reference)? {
                return Ok(reference);
            }
        }
        Err(BookingError::Internal(
            "exhausted booking reference attempts".to_string(),
        ))
    }

    /// Create a booking
    ///
    /// The conflict check and the insert share the exclusive transaction, so
    /// a concurrent creation for the same room cannot slip between them.
    pub fn create_booking(&self, req: BookingCreate, actor: &Actor) -> BookingResult<Booking> {
        validate_range(req.check_in_date, req.check_out_date)?;
        let guest_name = req.guest_name.trim();
        if guest_name.is_empty() {
            return Err(BookingError::Validation(
                "guest_name must not be empty".to_string(),
            ));
        }
        let creation_source = match actor.role {
            Role::Admin | Role::Receptionist => CreationSource::Staff,
            Role::Guest => CreationSource::Guest,
            Role::Cleaner => {
                return Err(BookingError::Forbidden(
                    "cleaners may not create bookings".to_string(),
                ));
            }
        };

        let txn = self.store.begin_write()?;
        let room = self
            .store
            .room_by_id_txn(&txn, req.room_id)?
            .ok_or(BookingError::RoomNotFound(req.room_id))?;
        if room.status == RoomStatus::Maintenance {
            return Err(BookingError::RoomUnavailable(format!(
                "room {} is under maintenance",
                room.number
            )));
        }

        let existing = self.store.bookings_for_room_txn(&txn, room.id)?;
        if let Some(conflict) =
            find_conflict(&existing, req.check_in_date, req.check_out_date, None)
        {
            return Err(BookingError::Conflict(conflict.reference.clone()));
        }

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            reference: self.generate_reference(&txn)?,
            guest_name: guest_name.to_string(),
            room_id: room.id,
            check_in_date: req.check_in_date,
            check_out_date: req.check_out_date,
            status: BookingStatus::Upcoming,
            price: room.price,
            created_by: actor.user_id,
            creation_source,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_booking(&txn, &booking)?;
        txn.commit().map_err(crate::store::StoreError::from)?;

        tracing::info!(
            booking_id = %booking.id,
            reference = %booking.reference,
            room = %room.number,
            check_in = %booking.check_in_date,
            check_out = %booking.check_out_date,
            source = ?booking.creation_source,
            "Booking created"
        );
        Ok(booking)
    }

    /// Check a guest in
    ///
    /// Exactly one ledger entry, the booking flip to `checked_in` and the
    /// room flip to `occupied` commit together or not at all.
    pub fn check_in(
        &self,
        booking_id: Uuid,
        req: CheckInRequest,
        actor: &Actor,
    ) -> BookingResult<CheckInOutcome> {
        let txn = self.store.begin_write()?;
        let mut booking = self
            .store
            .booking_by_id_txn(&txn, booking_id)?
            .ok_or(BookingError::BookingNotFound(booking_id))?;
        authorize(booking.status, BookingStatus::CheckedIn, actor.role)?;

        let today = self.business_today();
        if today < booking.check_in_date && !req.early_check_in {
            return Err(BookingError::DateGuard(format!(
                "today {} is before check-in date {}; early arrival requires the confirmed payment flow",
                today, booking.check_in_date
            )));
        }
        if today >= booking.check_out_date {
            return Err(BookingError::DateGuard(format!(
                "stay already ended on {}",
                booking.check_out_date
            )));
        }

        let mut room = self
            .store
            .room_by_id_txn(&txn, booking.room_id)?
            .ok_or(BookingError::RoomNotFound(booking.room_id))?;

        let payment = self
            .ledger
            .record_in_txn(&txn, &booking, &req.payment, actor)?;

        let now = Utc::now();
        booking.status = BookingStatus::CheckedIn;
        booking.updated_at = now;
        self.store.update_booking(&txn, &booking)?;

        room.status = RoomStatus::Occupied;
        room.occupied_booking_id = Some(booking.id);
        room.updated_at = now;
        self.store.update_room(&txn, &room)?;
        txn.commit().map_err(crate::store::StoreError::from)?;

        tracing::info!(
            booking_id = %booking.id,
            reference = %booking.reference,
            room = %room.number,
            payment_id = %payment.id,
            amount = %payment.amount,
            "Guest checked in"
        );
        Ok(CheckInOutcome { booking, payment })
    }

    /// Check a guest out
    ///
    /// The room goes to `dirty`, never straight to `available`; housekeeping
    /// walks it back. Re-invocation on a terminal booking is the benign
    /// [`BookingError::AlreadyInState`] signal.
    pub fn check_out(
        &self,
        booking_id: Uuid,
        req: CheckOutRequest,
        actor: &Actor,
    ) -> BookingResult<Booking> {
        let txn = self.store.begin_write()?;
        let mut booking = self
            .store
            .booking_by_id_txn(&txn, booking_id)?
            .ok_or(BookingError::BookingNotFound(booking_id))?;
        authorize(booking.status, BookingStatus::CheckedOut, actor.role)?;

        let today = self.business_today();
        if today < booking.check_out_date && !req.early_checkout_confirmed {
            return Err(BookingError::DateGuard(format!(
                "today {} is before check-out date {}; early checkout requires confirmation",
                today, booking.check_out_date
            )));
        }

        let mut room = self
            .store
            .room_by_id_txn(&txn, booking.room_id)?
            .ok_or(BookingError::RoomNotFound(booking.room_id))?;

        let now = Utc::now();
        booking.status = BookingStatus::CheckedOut;
        booking.updated_at = now;
        self.store.update_booking(&txn, &booking)?;

        room.status = RoomStatus::Dirty;
        room.occupied_booking_id = None;
        room.updated_at = now;
        self.store.update_room(&txn, &room)?;
        txn.commit().map_err(crate::store::StoreError::from)?;

        tracing::info!(
            booking_id = %booking.id,
            reference = %booking.reference,
            room = %room.number,
            "Guest checked out, room marked dirty"
        );
        Ok(booking)
    }

    /// Cancel a booking
    ///
    /// Staff may cancel any upcoming booking; a guest only their own. The
    /// room is released only if this booking is the one occupying it,
    /// otherwise cancellation has no room side effect.
    pub fn cancel(&self, booking_id: Uuid, actor: &Actor) -> BookingResult<Booking> {
        let txn = self.store.begin_write()?;
        let mut booking = self
            .store
            .booking_by_id_txn(&txn, booking_id)?
            .ok_or(BookingError::BookingNotFound(booking_id))?;
        authorize(booking.status, BookingStatus::Cancelled, actor.role)?;
        if actor.is_guest() && booking.created_by != actor.user_id {
            return Err(BookingError::NotOwner);
        }

        let now = Utc::now();
        booking.status = BookingStatus::Cancelled;
        booking.updated_at = now;
        self.store.update_booking(&txn, &booking)?;

        let mut room = self
            .store
            .room_by_id_txn(&txn, booking.room_id)?
            .ok_or(BookingError::RoomNotFound(booking.room_id))?;
        if room.occupied_booking_id == Some(booking.id) {
            room.status = RoomStatus::Available;
            room.occupied_booking_id = None;
            room.updated_at = now;
            self.store.update_room(&txn, &room)?;
        }
        txn.commit().map_err(crate::store::StoreError::from)?;

        tracing::info!(
            booking_id = %booking.id,
            reference = %booking.reference,
            "Booking cancelled"
        );
        Ok(booking)
    }

    /// Fetch a booking
    ///
    /// A guest asking for someone else's booking gets not-found, not
    /// forbidden, so existence is not leaked.
    pub fn get_booking(&self, booking_id: Uuid, actor: &Actor) -> BookingResult<Booking> {
        let txn = self.store.begin_read()?;
        let booking = self
            .store
            .booking_by_id_read(&txn, booking_id)?
            .ok_or(BookingError::BookingNotFound(booking_id))?;
        if actor.is_guest() && booking.created_by != actor.user_id {
            return Err(BookingError::BookingNotFound(booking_id));
        }
        Ok(booking)
    }

    /// List bookings, most recent check-in date first
    ///
    /// Guests see only their own.
    pub fn list_bookings(&self, actor: &Actor) -> BookingResult<Vec<Booking>> {
        let txn = self.store.begin_read()?;
        let mut bookings = self.store.list_bookings(&txn)?;
        if actor.is_guest() {
            bookings.retain(|b| b.created_by == actor.user_id);
        }
        bookings.sort_by(|a, b| b.check_in_date.cmp(&a.check_in_date));
        Ok(bookings)
    }

    /// Advisory availability check over a read snapshot
    ///
    /// For browsing only; it may be stale the moment it returns. The write
    /// path re-checks inside its own exclusive transaction.
    pub fn is_available(
        &self,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_booking_id: Option<Uuid>,
    ) -> BookingResult<bool> {
        validate_range(check_in, check_out)?;
        let txn = self.store.begin_read()?;
        if self.store.room_by_id_read(&txn, room_id)?.is_none() {
            return Err(BookingError::RoomNotFound(room_id));
        }
        let existing = self.store.bookings_for_room_read(&txn, room_id)?;
        Ok(find_conflict(&existing, check_in, check_out, exclude_booking_id).is_none())
    }
}
