//! Payment ledger
//!
//! Append/edit/delete of signed monetary entries per booking. The derived
//! summary is recomputed from the surviving history on every read; no
//! running balance is ever persisted, so the number a caller sees can never
//! drift from the event history.

mod error;
mod ledger;

pub use error::{LedgerError, LedgerResult};
pub use ledger::{total_paid, PaymentLedger};
