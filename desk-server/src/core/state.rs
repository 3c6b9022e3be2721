//! Shared server state

use crate::bookings::BookingManager;
use crate::core::Config;
use crate::payments::PaymentLedger;
use crate::rooms::{Housekeeping, RoomRegistry};
use crate::store::{Store, StoreError};

/// Server state - shared references to the engine components
///
/// Every component clones the same [`Store`] (an `Arc` over one embedded
/// database), so all of them serialize on the same write transaction and
/// read from the same snapshots.
///
/// | Field | Purpose |
/// |-------|---------|
/// | config | Immutable configuration |
/// | store | Embedded redb database |
/// | rooms | Room registry (create, override, assign) |
/// | housekeeping | dirty → cleaning → available sub-machine |
/// | bookings | Reservation lifecycle manager |
/// | payments | Payment ledger |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: Store,
    pub rooms: RoomRegistry,
    pub housekeeping: Housekeeping,
    pub bookings: BookingManager,
    pub payments: PaymentLedger,
}

impl ServerState {
    /// Open the store and wire up the engine components
    pub fn initialize(config: &Config) -> Result<Self, StoreError> {
        let store = Store::open(config.db_path())?;
        tracing::info!(path = %config.db_path().display(), "Store opened");
        Ok(Self::with_store(config.clone(), store))
    }

    /// Build state over an existing store (used by tests)
    pub fn with_store(config: Config, store: Store) -> Self {
        Self {
            rooms: RoomRegistry::new(store.clone()),
            housekeeping: Housekeeping::new(store.clone()),
            bookings: BookingManager::new(store.clone(), config.timezone),
            payments: PaymentLedger::new(store.clone()),
            store,
            config,
        }
    }
}
