//! Housekeeping workflow - the dirty → cleaning → available sub-machine

use chrono::Utc;
use shared::actor::{Actor, Role};
use shared::models::{Room, RoomStatus};
use uuid::Uuid;

use super::error::{RegistryError, RegistryResult};
use crate::store::Store;

/// Single forward step a cleaner may take
fn is_forward_step(from: RoomStatus, to: RoomStatus) -> bool {
    matches!(
        (from, to),
        (RoomStatus::Dirty, RoomStatus::Cleaning) | (RoomStatus::Cleaning, RoomStatus::Available)
    )
}

/// Housekeeping workflow over the shared store
///
/// Cleaners advance rooms assigned to them one step at a time; admins may
/// move a room anywhere within the sub-machine, including backwards.
#[derive(Clone)]
pub struct Housekeeping {
    store: Store,
}

impl Housekeeping {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Advance (or, for admins, move) a room within the sub-machine
    pub fn advance(&self, room_id: Uuid, target: RoomStatus, actor: &Actor) -> RegistryResult<Room> {
        let txn = self.store.begin_write()?;
        let mut room = self
            .store
            .room_by_id_txn(&txn, room_id)?
            .ok_or(RegistryError::RoomNotFound(room_id))?;

        match actor.role {
            Role::Cleaner => {
                if room.assigned_cleaner != Some(actor.user_id) {
                    return Err(RegistryError::NotAssignedCleaner);
                }
                if !is_forward_step(room.status, target) {
                    return Err(RegistryError::HousekeepingGuard {
                        from: room.status,
                        to: target,
                    });
                }
            }
            Role::Admin => {
                if !room.status.in_housekeeping_machine() || !target.in_housekeeping_machine() {
                    return Err(RegistryError::HousekeepingGuard {
                        from: room.status,
                        to: target,
                    });
                }
                if room.status == target {
                    return Err(RegistryError::AlreadyInStatus(target));
                }
            }
            Role::Receptionist | Role::Guest => {
                return Err(RegistryError::Forbidden(format!(
                    "role {} may not drive housekeeping",
                    actor.role
                )));
            }
        }

        room.status = target;
        room.updated_at = Utc::now();
        self.store.update_room(&txn, &room)?;
        txn.commit().map_err(crate::store::StoreError::from)?;

        tracing::info!(
            room_id = %room.id,
            number = %room.number,
            status = ?target,
            actor = %actor.role,
            "Housekeeping status advanced"
        );
        Ok(room)
    }
}
