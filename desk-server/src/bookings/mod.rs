//! Booking lifecycle and availability
//!
//! The reservation state machine and the authority that prevents
//! double-booking:
//!
//! - **transitions**: the explicit `(from, to) → roles` table
//! - **availability**: half-open interval conflict detection
//! - **manager**: the lifecycle operations, each one exclusive write
//!   transaction spanning all of its checks and writes
//!
//! # Creation flow
//!
//! ```text
//! create_booking(req)
//!     ├─ 1. Validate range and actor role
//!     ├─ 2. Begin exclusive write transaction
//!     ├─ 3. Load room, reject maintenance
//!     ├─ 4. Conflict check against committed bookings on the room
//!     ├─ 5. Generate unique reference
//!     ├─ 6. Insert booking (price snapshotted from the room)
//!     └─ 7. Commit
//! ```
//!
//! Because the write transaction is exclusive, two concurrent creations for
//! the same room serialize at step 2 and the second observes the first's
//! committed range at step 4.

pub mod availability;
mod error;
mod manager;
pub mod transitions;

pub use error::{BookingError, BookingResult};
pub use manager::{BookingManager, CheckInOutcome};

#[cfg(test)]
mod tests;
