//! Harbor Desk Server - hotel front-desk allocation engine
//!
//! # Architecture
//!
//! The server owns a single embedded store and four engine components
//! layered over it:
//!
//! - **store**: redb-backed persistence; every mutating operation runs in
//!   one exclusive write transaction, every browse in an MVCC read snapshot
//! - **rooms**: room registry and the housekeeping sub-machine
//! - **bookings**: reservation lifecycle manager and availability index
//! - **payments**: append/edit/delete ledger with derived summaries
//! - **api**: thin axum handlers over the engine
//!
//! # Module structure
//!
//! ```text
//! desk-server/src/
//! ├── core/          # config, state, server runner
//! ├── auth/          # trusted actor identity extraction
//! ├── store.rs       # redb tables and transaction plumbing
//! ├── rooms/         # registry + housekeeping
//! ├── bookings/      # lifecycle manager + availability index
//! ├── payments/      # payment ledger
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logger, time helpers
//! ```

pub mod api;
pub mod auth;
pub mod bookings;
pub mod core;
pub mod payments;
pub mod rooms;
pub mod store;
pub mod utils;

// Re-export public types
pub use auth::CurrentActor;
pub use bookings::BookingManager;
pub use crate::core::{Config, Server, ServerState};
pub use payments::PaymentLedger;
pub use rooms::{Housekeeping, RoomRegistry};
pub use store::Store;
pub use utils::logger::{init_logger, init_logger_with_file};
