//! RoomRegistry - room identity, pricing, status override, assignment

use chrono::Utc;
use rust_decimal::Decimal;
use shared::actor::Actor;
use shared::models::{Room, RoomCreate, RoomStatus};
use uuid::Uuid;

use super::error::{RegistryError, RegistryResult};
use crate::store::Store;

/// Registry over the physical room set
///
/// Rooms are created by administrators; status changes here are the blunt
/// override (e.g. taking a room into maintenance). Lifecycle-driven changes
/// come from the booking manager, cleanliness changes from housekeeping.
#[derive(Clone)]
pub struct RoomRegistry {
    store: Store,
}

impl RoomRegistry {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    fn require_admin(actor: &Actor, action: &str) -> RegistryResult<()> {
        if !actor.is_admin() {
            return Err(RegistryError::Forbidden(format!(
                "only admins may {}",
                action
            )));
        }
        Ok(())
    }

    /// Create a room with a unique number
    pub fn create_room(&self, req: RoomCreate, actor: &Actor) -> RegistryResult<Room> {
        Self::require_admin(actor, "create rooms")?;
        let number = req.number.trim();
        if number.is_empty() {
            return Err(RegistryError::Validation(
                "room number must not be empty".to_string(),
            ));
        }
        if req.price <= Decimal::ZERO {
            return Err(RegistryError::Validation(
                "room price must be positive".to_string(),
            ));
        }

        let txn = self.store.begin_write()?;
        if self.store.room_id_by_number(&txn, number)?.is_some() {
            return Err(RegistryError::NumberTaken(number.to_string()));
        }

        let now = Utc::now();
        let room = Room {
            id: Uuid::new_v4(),
            number: number.to_string(),
            room_type: req.room_type,
            price: req.price,
            status: RoomStatus::Available,
            assigned_cleaner: None,
            occupied_booking_id: None,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_room(&txn, &room)?;
        txn.commit().map_err(crate::store::StoreError::from)?;

        tracing::info!(room_id = %room.id, number = %room.number, "Room created");
        Ok(room)
    }

    /// Admin status override
    ///
    /// Clears the occupancy marker whenever the room leaves `occupied`, so a
    /// later cancellation cannot release a room on behalf of a stale booking.
    pub fn update_status(
        &self,
        room_id: Uuid,
        status: RoomStatus,
        actor: &Actor,
    ) -> RegistryResult<Room> {
        Self::require_admin(actor, "override room status")?;

        let txn = self.store.begin_write()?;
        let mut room = self
            .store
            .room_by_id_txn(&txn, room_id)?
            .ok_or(RegistryError::RoomNotFound(room_id))?;
        if room.status == status {
            return Err(RegistryError::AlreadyInStatus(status));
        }

        room.status = status;
        if status != RoomStatus::Occupied {
            room.occupied_booking_id = None;
        }
        room.updated_at = Utc::now();
        self.store.update_room(&txn, &room)?;
        txn.commit().map_err(crate::store::StoreError::from)?;

        tracing::info!(room_id = %room.id, number = %room.number, status = ?status, "Room status overridden");
        Ok(room)
    }

    /// Assign a cleaner to a room currently in the housekeeping backlog
    pub fn assign_cleaner(
        &self,
        room_id: Uuid,
        cleaner_id: Uuid,
        actor: &Actor,
    ) -> RegistryResult<Room> {
        Self::require_admin(actor, "assign cleaners")?;

        let txn = self.store.begin_write()?;
        let mut room = self
            .store
            .room_by_id_txn(&txn, room_id)?
            .ok_or(RegistryError::RoomNotFound(room_id))?;
        if !room.status.accepts_cleaner_assignment() {
            return Err(RegistryError::AssignmentGuard(room.status));
        }

        room.assigned_cleaner = Some(cleaner_id);
        room.updated_at = Utc::now();
        self.store.update_room(&txn, &room)?;
        txn.commit().map_err(crate::store::StoreError::from)?;

        tracing::info!(room_id = %room.id, cleaner_id = %cleaner_id, "Cleaner assigned");
        Ok(room)
    }

    /// Fetch a room
    pub fn get_room(&self, room_id: Uuid) -> RegistryResult<Room> {
        let txn = self.store.begin_read()?;
        self.store
            .room_by_id_read(&txn, room_id)?
            .ok_or(RegistryError::RoomNotFound(room_id))
    }

    /// List all rooms, sorted by number
    pub fn list_rooms(&self) -> RegistryResult<Vec<Room>> {
        let txn = self.store.begin_read()?;
        let mut rooms = self.store.list_rooms(&txn)?;
        rooms.sort_by(|a, b| a.number.cmp(&b.number));
        Ok(rooms)
    }
}
