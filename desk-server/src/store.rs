//! redb-based storage layer for the front-desk engine
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `rooms` | `room_id` | `Room` | Room registry |
//! | `room_numbers` | `number` | `room_id` | Room-number uniqueness index |
//! | `bookings` | `booking_id` | `Booking` | Reservations (never deleted) |
//! | `booking_refs` | `reference` | `booking_id` | Reference uniqueness index |
//! | `room_bookings` | `(room_id, booking_id)` | `()` | Per-room booking index |
//! | `payments` | `payment_id` | `Payment` | Payment ledger entries |
//! | `booking_payments` | `(booking_id, payment_id)` | `()` | Per-booking payment index |
//!
//! # Serialization
//!
//! Every mutating operation spans one exclusive write transaction, so the
//! availability check and the booking insert (or a payment entry and a
//! status flip) observe and produce a single consistent state. Read
//! transactions are MVCC snapshots: browsing never blocks writers and a
//! derived summary can never see a half-applied edit.

use redb::{
    Database, ReadTransaction, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction,
};
use shared::models::{Booking, Payment, Room};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Room registry: key = room_id, value = JSON-serialized Room
const ROOMS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("rooms");

/// Room-number uniqueness index: key = number, value = room_id
const ROOM_NUMBERS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("room_numbers");

/// Bookings: key = booking_id, value = JSON-serialized Booking
const BOOKINGS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("bookings");

/// Booking-reference uniqueness index: key = reference, value = booking_id
const BOOKING_REFS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("booking_refs");

/// Per-room booking index: key = (room_id, booking_id), value = empty
const ROOM_BOOKINGS_TABLE: TableDefinition<(&str, &str), ()> =
    TableDefinition::new("room_bookings");

/// Payment ledger: key = payment_id, value = JSON-serialized Payment
const PAYMENTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("payments");

/// Per-booking payment index: key = (booking_id, payment_id), value = empty
const BOOKING_PAYMENTS_TABLE: TableDefinition<(&str, &str), ()> =
    TableDefinition::new("booking_payments");

/// Upper bound for the second element of a tuple-key range scan.
/// All ids are ASCII uuid strings, so this single code point sorts last.
const KEY_MAX: &str = "\u{10FFFF}";

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Front-desk storage backed by redb
///
/// `begin_write` hands out the exclusive write transaction that serializes
/// every mutating path; helpers take the transaction by reference so a
/// manager can compose multi-entity updates that commit or roll back as one.
#[derive(Clone)]
pub struct Store {
    db: Arc<Database>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish()
    }
}

impl Store {
    /// Open or create the database at the given path
    ///
    /// redb commits with `Durability::Immediate`: once `commit()` returns
    /// the state is on disk, and copy-on-write keeps the file consistent
    /// across crashes mid-transaction.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    fn init_tables(&self) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(ROOMS_TABLE)?;
            let _ = write_txn.open_table(ROOM_NUMBERS_TABLE)?;
            let _ = write_txn.open_table(BOOKINGS_TABLE)?;
            let _ = write_txn.open_table(BOOKING_REFS_TABLE)?;
            let _ = write_txn.open_table(ROOM_BOOKINGS_TABLE)?;
            let _ = write_txn.open_table(PAYMENTS_TABLE)?;
            let _ = write_txn.open_table(BOOKING_PAYMENTS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Begin an exclusive write transaction
    pub fn begin_write(&self) -> StoreResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    /// Begin a non-locking read snapshot
    pub fn begin_read(&self) -> StoreResult<ReadTransaction> {
        Ok(self.db.begin_read()?)
    }

    // ==================== Rooms ====================

    /// Insert a room and its number-index entry
    pub fn insert_room(&self, txn: &WriteTransaction, room: &Room) -> StoreResult<()> {
        let key = room.id.to_string();
        let bytes = serde_json::to_vec(room)?;
        {
            let mut table = txn.open_table(ROOMS_TABLE)?;
            table.insert(key.as_str(), bytes.as_slice())?;
        }
        {
            let mut index = txn.open_table(ROOM_NUMBERS_TABLE)?;
            index.insert(room.number.as_str(), key.as_str())?;
        }
        Ok(())
    }

    /// Overwrite an existing room record (number is immutable)
    pub fn update_room(&self, txn: &WriteTransaction, room: &Room) -> StoreResult<()> {
        let key = room.id.to_string();
        let bytes = serde_json::to_vec(room)?;
        let mut table = txn.open_table(ROOMS_TABLE)?;
        table.insert(key.as_str(), bytes.as_slice())?;
        Ok(())
    }

    /// Look up the room id registered under a number, if any
    pub fn room_id_by_number(
        &self,
        txn: &WriteTransaction,
        number: &str,
    ) -> StoreResult<Option<Uuid>> {
        let index = txn.open_table(ROOM_NUMBERS_TABLE)?;
        let found = index
            .get(number)?
            .and_then(|guard| guard.value().parse().ok());
        Ok(found)
    }

    /// Load a room inside a write transaction
    pub fn room_by_id_txn(&self, txn: &WriteTransaction, id: Uuid) -> StoreResult<Option<Room>> {
        let table = txn.open_table(ROOMS_TABLE)?;
        let key = id.to_string();
        match table.get(key.as_str())? {
            Some(raw) => Ok(Some(serde_json::from_slice(raw.value())?)),
            None => Ok(None),
        }
    }

    /// Load a room from a read snapshot
    pub fn room_by_id_read(&self, txn: &ReadTransaction, id: Uuid) -> StoreResult<Option<Room>> {
        let table = txn.open_table(ROOMS_TABLE)?;
        let key = id.to_string();
        match table.get(key.as_str())? {
            Some(raw) => Ok(Some(serde_json::from_slice(raw.value())?)),
            None => Ok(None),
        }
    }

    /// List all rooms from a read snapshot
    pub fn list_rooms(&self, txn: &ReadTransaction) -> StoreResult<Vec<Room>> {
        let table = txn.open_table(ROOMS_TABLE)?;
        let mut rooms = Vec::new();
        for entry in table.iter()? {
            let (_, raw) = entry?;
            rooms.push(serde_json::from_slice(raw.value())?);
        }
        Ok(rooms)
    }

    // ==================== Bookings ====================

    /// Insert a booking plus its reference and per-room index entries
    pub fn insert_booking(&self, txn: &WriteTransaction, booking: &Booking) -> StoreResult<()> {
        let key = booking.id.to_string();
        let room_key = booking.room_id.to_string();
        let bytes = serde_json::to_vec(booking)?;
        {
            let mut table = txn.open_table(BOOKINGS_TABLE)?;
            table.insert(key.as_str(), bytes.as_slice())?;
        }
        {
            let mut refs = txn.open_table(BOOKING_REFS_TABLE)?;
            refs.insert(booking.reference.as_str(), key.as_str())?;
        }
        {
            let mut index = txn.open_table(ROOM_BOOKINGS_TABLE)?;
            index.insert((room_key.as_str(), key.as_str()), ())?;
        }
        Ok(())
    }

    /// Overwrite an existing booking record (reference and room are immutable)
    pub fn update_booking(&self, txn: &WriteTransaction, booking: &Booking) -> StoreResult<()> {
        let key = booking.id.to_string();
        let bytes = serde_json::to_vec(booking)?;
        let mut table = txn.open_table(BOOKINGS_TABLE)?;
        table.insert(key.as_str(), bytes.as_slice())?;
        Ok(())
    }

    /// Whether a booking reference is already taken
    pub fn reference_exists(&self, txn: &WriteTransaction, reference: &str) -> StoreResult<bool> {
        let refs = txn.open_table(BOOKING_REFS_TABLE)?;
        Ok(refs.get(reference)?.is_some())
    }

    /// Load a booking inside a write transaction
    pub fn booking_by_id_txn(
        &self,
        txn: &WriteTransaction,
        id: Uuid,
    ) -> StoreResult<Option<Booking>> {
        let table = txn.open_table(BOOKINGS_TABLE)?;
        let key = id.to_string();
        match table.get(key.as_str())? {
            Some(raw) => Ok(Some(serde_json::from_slice(raw.value())?)),
            None => Ok(None),
        }
    }

    /// Load a booking from a read snapshot
    pub fn booking_by_id_read(
        &self,
        txn: &ReadTransaction,
        id: Uuid,
    ) -> StoreResult<Option<Booking>> {
        let table = txn.open_table(BOOKINGS_TABLE)?;
        let key = id.to_string();
        match table.get(key.as_str())? {
            Some(raw) => Ok(Some(serde_json::from_slice(raw.value())?)),
            None => Ok(None),
        }
    }

    /// All bookings on a room, loaded inside a write transaction
    ///
    /// This is the authoritative read of the availability check: it sees
    /// every booking committed before this transaction began, and the
    /// exclusive transaction guarantees no other writer commits in between.
    pub fn bookings_for_room_txn(
        &self,
        txn: &WriteTransaction,
        room_id: Uuid,
    ) -> StoreResult<Vec<Booking>> {
        let index = txn.open_table(ROOM_BOOKINGS_TABLE)?;
        let table = txn.open_table(BOOKINGS_TABLE)?;
        let room_key = room_id.to_string();
        let mut bookings = Vec::new();
        for entry in index.range((room_key.as_str(), "")..=(room_key.as_str(), KEY_MAX))? {
            let (key, _) = entry?;
            let (_, booking_id) = key.value();
            if let Some(raw) = table.get(booking_id)? {
                bookings.push(serde_json::from_slice(raw.value())?);
            }
        }
        Ok(bookings)
    }

    /// All bookings on a room from a read snapshot (advisory)
    pub fn bookings_for_room_read(
        &self,
        txn: &ReadTransaction,
        room_id: Uuid,
    ) -> StoreResult<Vec<Booking>> {
        let index = txn.open_table(ROOM_BOOKINGS_TABLE)?;
        let table = txn.open_table(BOOKINGS_TABLE)?;
        let room_key = room_id.to_string();
        let mut bookings = Vec::new();
        for entry in index.range((room_key.as_str(), "")..=(room_key.as_str(), KEY_MAX))? {
            let (key, _) = entry?;
            let (_, booking_id) = key.value();
            if let Some(raw) = table.get(booking_id)? {
                bookings.push(serde_json::from_slice(raw.value())?);
            }
        }
        Ok(bookings)
    }

    /// List all bookings from a read snapshot
    pub fn list_bookings(&self, txn: &ReadTransaction) -> StoreResult<Vec<Booking>> {
        let table = txn.open_table(BOOKINGS_TABLE)?;
        let mut bookings = Vec::new();
        for entry in table.iter()? {
            let (_, raw) = entry?;
            bookings.push(serde_json::from_slice(raw.value())?);
        }
        Ok(bookings)
    }

    // ==================== Payments ====================

    /// Insert a payment plus its per-booking index entry
    pub fn insert_payment(&self, txn: &WriteTransaction, payment: &Payment) -> StoreResult<()> {
        let key = payment.id.to_string();
        let booking_key = payment.booking_id.to_string();
        let bytes = serde_json::to_vec(payment)?;
        {
            let mut table = txn.open_table(PAYMENTS_TABLE)?;
            table.insert(key.as_str(), bytes.as_slice())?;
        }
        {
            let mut index = txn.open_table(BOOKING_PAYMENTS_TABLE)?;
            index.insert((booking_key.as_str(), key.as_str()), ())?;
        }
        Ok(())
    }

    /// Overwrite an existing payment record (booking link is immutable)
    pub fn update_payment(&self, txn: &WriteTransaction, payment: &Payment) -> StoreResult<()> {
        let key = payment.id.to_string();
        let bytes = serde_json::to_vec(payment)?;
        let mut table = txn.open_table(PAYMENTS_TABLE)?;
        table.insert(key.as_str(), bytes.as_slice())?;
        Ok(())
    }

    /// Delete a payment and its index entry
    pub fn delete_payment(&self, txn: &WriteTransaction, payment: &Payment) -> StoreResult<()> {
        let key = payment.id.to_string();
        let booking_key = payment.booking_id.to_string();
        {
            let mut table = txn.open_table(PAYMENTS_TABLE)?;
            table.remove(key.as_str())?;
        }
        {
            let mut index = txn.open_table(BOOKING_PAYMENTS_TABLE)?;
            index.remove((booking_key.as_str(), key.as_str()))?;
        }
        Ok(())
    }

    /// Load a payment inside a write transaction
    pub fn payment_by_id_txn(
        &self,
        txn: &WriteTransaction,
        id: Uuid,
    ) -> StoreResult<Option<Payment>> {
        let table = txn.open_table(PAYMENTS_TABLE)?;
        let key = id.to_string();
        match table.get(key.as_str())? {
            Some(raw) => Ok(Some(serde_json::from_slice(raw.value())?)),
            None => Ok(None),
        }
    }

    /// Load a payment from a read snapshot
    pub fn payment_by_id_read(
        &self,
        txn: &ReadTransaction,
        id: Uuid,
    ) -> StoreResult<Option<Payment>> {
        let table = txn.open_table(PAYMENTS_TABLE)?;
        let key = id.to_string();
        match table.get(key.as_str())? {
            Some(raw) => Ok(Some(serde_json::from_slice(raw.value())?)),
            None => Ok(None),
        }
    }

    /// All payments for a booking, loaded inside a write transaction
    ///
    /// Used by the refund bound and the check-in entry so the sum they see
    /// is the one the transaction commits against.
    pub fn payments_for_booking_txn(
        &self,
        txn: &WriteTransaction,
        booking_id: Uuid,
    ) -> StoreResult<Vec<Payment>> {
        let index = txn.open_table(BOOKING_PAYMENTS_TABLE)?;
        let table = txn.open_table(PAYMENTS_TABLE)?;
        let booking_key = booking_id.to_string();
        let mut payments = Vec::new();
        for entry in index.range((booking_key.as_str(), "")..=(booking_key.as_str(), KEY_MAX))? {
            let (key, _) = entry?;
            let (_, payment_id) = key.value();
            if let Some(raw) = table.get(payment_id)? {
                payments.push(serde_json::from_slice(raw.value())?);
            }
        }
        Ok(payments)
    }

    /// All payments for a booking from a read snapshot
    pub fn payments_for_booking_read(
        &self,
        txn: &ReadTransaction,
        booking_id: Uuid,
    ) -> StoreResult<Vec<Payment>> {
        let index = txn.open_table(BOOKING_PAYMENTS_TABLE)?;
        let table = txn.open_table(PAYMENTS_TABLE)?;
        let booking_key = booking_id.to_string();
        let mut payments = Vec::new();
        for entry in index.range((booking_key.as_str(), "")..=(booking_key.as_str(), KEY_MAX))? {
            let (key, _) = entry?;
            let (_, payment_id) = key.value();
            if let Some(raw) = table.get(payment_id)? {
                payments.push(serde_json::from_slice(raw.value())?);
            }
        }
        Ok(payments)
    }
}
