//! Actor identity extraction
//!
//! Session issuance lives in the upstream identity service; this server
//! trusts the identity headers that service injects and only applies the
//! role and ownership guards of the engine.

mod extractor;

pub use extractor::{CurrentActor, ACTOR_ID_HEADER, ACTOR_ROLE_HEADER};
