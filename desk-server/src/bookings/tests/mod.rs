//! Booking manager tests
//!
//! Shared fixtures live here; the scenarios are split across:
//! - `test_lifecycle`: transitions, guards, atomicity
//! - `test_availability`: conflict detection through the manager
//! - `test_properties`: randomized no-overlap property and the
//!   double-booking race


use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use shared::actor::{Actor, Role};
use shared::models::{
    BookingCreate, CheckInRequest, PaymentCreate, PaymentType, Room, RoomCreate, RoomType,
};
use uuid::Uuid;

use crate::bookings::BookingManager;
use crate::payments::PaymentLedger;
use crate::rooms::{Housekeeping, RoomRegistry};
use crate::store::Store;

pub(crate) const TZ: Tz = chrono_tz::UTC;

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Engine wired over one in-memory store, with the business date pinned
pub(crate) struct Fixture {
    pub store: Store,
    pub registry: RoomRegistry,
    pub housekeeping: Housekeeping,
    pub ledger: PaymentLedger,
    pub manager: BookingManager,
    pub admin: Actor,
    pub receptionist: Actor,
}

pub(crate) fn fixture_at(today: NaiveDate) -> Fixture {
    let store = Store::open_in_memory().unwrap();
    Fixture {
        registry: RoomRegistry::new(store.clone()),
        housekeeping: Housekeeping::new(store.clone()),
        ledger: PaymentLedger::new(store.clone()),
        manager: BookingManager::with_today(store.clone(), TZ, today),
        admin: Actor::new(Uuid::new_v4(), Role::Admin),
        receptionist: Actor::new(Uuid::new_v4(), Role::Receptionist),
        store,
    }
}

/// Room priced 100.00
pub(crate) fn standard_room(fx: &Fixture, number: &str) -> Room {
    fx.registry
        .create_room(
            RoomCreate {
                number: number.to_string(),
                room_type: RoomType::Double,
                price: money(10_000),
            },
            &fx.admin,
        )
        .unwrap()
}

pub(crate) fn stay(room_id: Uuid, check_in: NaiveDate, check_out: NaiveDate) -> BookingCreate {
    BookingCreate {
        room_id,
        guest_name: "Grace Hopper".to_string(),
        check_in_date: check_in,
        check_out_date: check_out,
    }
}

pub(crate) fn deposit(cents: i64) -> PaymentCreate {
    PaymentCreate {
        amount: money(cents),
        payment_type: PaymentType::Deposit,
        method: "cash".to_string(),
        notes: None,
    }
}

pub(crate) fn check_in_with_deposit(cents: i64) -> CheckInRequest {
    CheckInRequest {
        payment: deposit(cents),
        early_check_in: false,
    }
}
