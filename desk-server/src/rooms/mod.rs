//! Room registry and housekeeping
//!
//! The registry owns room identity, pricing, status overrides and cleaner
//! assignment. The housekeeping workflow is a small sub-machine over room
//! status (`dirty → cleaning → available`) driven by assigned cleaners, with
//! an admin override in any direction inside the sub-machine.

mod error;
mod housekeeping;
mod registry;

pub use error::{RegistryError, RegistryResult};
pub use housekeeping::Housekeeping;
pub use registry::RoomRegistry;
