//! End-to-end front-desk flows over a real on-disk store
//!
//! Uses live dates (business timezone pinned to UTC) so the date guards
//! exercise the same paths production requests take.

use chrono::{Duration, Utc};
use desk_server::core::{Config, ServerState};
use desk_server::store::Store;
use rust_decimal::Decimal;
use shared::actor::{Actor, Role};
use shared::error::ErrorCode;
use shared::models::{
    BookingCreate, BookingStatus, CheckInRequest, CheckOutRequest, PaymentCreate, PaymentType,
    RoomCreate, RoomStatus, RoomType,
};
use uuid::Uuid;

fn test_config(work_dir: &str) -> Config {
    Config {
        work_dir: work_dir.to_string(),
        http_port: 0,
        http_host: "127.0.0.1".to_string(),
        timezone: chrono_tz::UTC,
        request_timeout_ms: 30_000,
        allowed_origin: "*".to_string(),
        environment: "test".to_string(),
    }
}

fn state_in(dir: &tempfile::TempDir) -> ServerState {
    let config = test_config(dir.path().to_str().unwrap());
    let store = Store::open(config.db_path()).unwrap();
    ServerState::with_store(config, store)
}

fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn admin() -> Actor {
    Actor::new(Uuid::new_v4(), Role::Admin)
}

fn receptionist() -> Actor {
    Actor::new(Uuid::new_v4(), Role::Receptionist)
}

fn deposit(cents: i64) -> PaymentCreate {
    PaymentCreate {
        amount: money(cents),
        payment_type: PaymentType::Deposit,
        method: "cash".to_string(),
        notes: None,
    }
}

/// The core desk flow: room, booking, conflicting booking, deposit-backed
/// check-in, early checkout, housekeeping back to available.
#[test]
fn test_full_stay_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(&dir);
    let admin = admin();
    let desk = receptionist();
    let today = Utc::now().date_naive();

    // Room 101 priced 100.00
    let room = state
        .rooms
        .create_room(
            RoomCreate {
                number: "101".to_string(),
                room_type: RoomType::Double,
                price: money(10_000),
            },
            &admin,
        )
        .unwrap();

    // Booking A, today .. today+2
    let booking = state
        .bookings
        .create_booking(
            BookingCreate {
                room_id: room.id,
                guest_name: "Margaret Hamilton".to_string(),
                check_in_date: today,
                check_out_date: today + Duration::days(2),
            },
            &desk,
        )
        .unwrap();
    assert_eq!(booking.status, BookingStatus::Upcoming);

    // An overlapping second booking is rejected with the conflict code
    let overlap = state.bookings.create_booking(
        BookingCreate {
            room_id: room.id,
            guest_name: "Second Guest".to_string(),
            check_in_date: today + Duration::days(1),
            check_out_date: today + Duration::days(3),
        },
        &desk,
    );
    let app_error: shared::error::AppError = overlap.unwrap_err().into();
    assert_eq!(app_error.code, ErrorCode::BookingConflict);

    // Check-in on the check-in date, deposit 30.00 recorded atomically
    let outcome = state
        .bookings
        .check_in(
            booking.id,
            CheckInRequest {
                payment: deposit(3_000),
                early_check_in: false,
            },
            &desk,
        )
        .unwrap();
    assert_eq!(outcome.booking.status, BookingStatus::CheckedIn);

    let room_now = state.rooms.get_room(room.id).unwrap();
    assert_eq!(room_now.status, RoomStatus::Occupied);

    let summary = state.payments.get_summary(booking.id, &desk).unwrap();
    assert_eq!(summary.remaining_balance, money(7_000));

    // Early checkout needs the confirmation flag
    let refused = state
        .bookings
        .check_out(booking.id, CheckOutRequest::default(), &desk);
    let app_error: shared::error::AppError = refused.unwrap_err().into();
    assert_eq!(app_error.code, ErrorCode::DateGuardFailed);

    let checked_out = state
        .bookings
        .check_out(
            booking.id,
            CheckOutRequest {
                early_checkout_confirmed: true,
            },
            &desk,
        )
        .unwrap();
    assert_eq!(checked_out.status, BookingStatus::CheckedOut);

    // Room must pass through housekeeping, never straight to available
    let room_now = state.rooms.get_room(room.id).unwrap();
    assert_eq!(room_now.status, RoomStatus::Dirty);

    // Re-invoking check-out is the benign distinct signal
    let again = state
        .bookings
        .check_out(booking.id, CheckOutRequest::default(), &desk);
    let app_error: shared::error::AppError = again.unwrap_err().into();
    assert_eq!(app_error.code, ErrorCode::AlreadyInState);
    assert_eq!(app_error.http_status(), http::StatusCode::OK);

    // Cleaner X walks the sub-machine; cleaner Y is rejected
    let cleaner_x = Actor::new(Uuid::new_v4(), Role::Cleaner);
    let cleaner_y = Actor::new(Uuid::new_v4(), Role::Cleaner);
    state
        .rooms
        .assign_cleaner(room.id, cleaner_x.user_id, &admin)
        .unwrap();

    let rejected = state
        .housekeeping
        .advance(room.id, RoomStatus::Cleaning, &cleaner_y);
    let app_error: shared::error::AppError = rejected.unwrap_err().into();
    assert_eq!(app_error.code, ErrorCode::NotAssignedCleaner);
    assert_eq!(app_error.http_status(), http::StatusCode::FORBIDDEN);

    state
        .housekeeping
        .advance(room.id, RoomStatus::Cleaning, &cleaner_x)
        .unwrap();
    let done = state
        .housekeeping
        .advance(room.id, RoomStatus::Available, &cleaner_x)
        .unwrap();
    assert_eq!(done.status, RoomStatus::Available);
}

/// Refunds above net received are rejected and leave the ledger untouched.
#[test]
fn test_refund_guard_through_state() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(&dir);
    let admin = admin();
    let desk = receptionist();
    let today = Utc::now().date_naive();

    let room = state
        .rooms
        .create_room(
            RoomCreate {
                number: "102".to_string(),
                room_type: RoomType::Single,
                price: money(8_000),
            },
            &admin,
        )
        .unwrap();
    let booking = state
        .bookings
        .create_booking(
            BookingCreate {
                room_id: room.id,
                guest_name: "Katherine Johnson".to_string(),
                check_in_date: today + Duration::days(5),
                check_out_date: today + Duration::days(7),
            },
            &desk,
        )
        .unwrap();

    state
        .payments
        .create_payment(booking.id, deposit(2_000), &desk)
        .unwrap();

    let over_refund = state.payments.create_payment(
        booking.id,
        PaymentCreate {
            amount: money(-2_500),
            payment_type: PaymentType::Refund,
            method: "cash".to_string(),
            notes: Some("cancellation".to_string()),
        },
        &desk,
    );
    let app_error: shared::error::AppError = over_refund.unwrap_err().into();
    assert_eq!(app_error.code, ErrorCode::RefundExceedsPaid);

    let summary = state.payments.get_summary(booking.id, &desk).unwrap();
    assert_eq!(summary.total_paid, money(2_000));
    assert_eq!(summary.payment_count, 1);
}

/// Guest ownership rules hold through the public surface.
#[test]
fn test_guest_ownership_rules() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(&dir);
    let admin = admin();
    let today = Utc::now().date_naive();

    let room = state
        .rooms
        .create_room(
            RoomCreate {
                number: "103".to_string(),
                room_type: RoomType::Suite,
                price: money(20_000),
            },
            &admin,
        )
        .unwrap();

    let owner = Actor::new(Uuid::new_v4(), Role::Guest);
    let booking = state
        .bookings
        .create_booking(
            BookingCreate {
                room_id: room.id,
                guest_name: "Owner Guest".to_string(),
                check_in_date: today + Duration::days(1),
                check_out_date: today + Duration::days(3),
            },
            &owner,
        )
        .unwrap();

    // A stranger cannot see or cancel it
    let stranger = Actor::new(Uuid::new_v4(), Role::Guest);
    let fetched = state.bookings.get_booking(booking.id, &stranger);
    let app_error: shared::error::AppError = fetched.unwrap_err().into();
    assert_eq!(app_error.code, ErrorCode::BookingNotFound);

    let cancelled = state.bookings.cancel(booking.id, &stranger);
    let app_error: shared::error::AppError = cancelled.unwrap_err().into();
    assert_eq!(app_error.code, ErrorCode::NotBookingOwner);

    // The owner cancels their own upcoming booking
    let done = state.bookings.cancel(booking.id, &owner).unwrap();
    assert_eq!(done.status, BookingStatus::Cancelled);
}

/// The store survives a process restart: state is rebuilt from disk.
#[test]
fn test_reopen_preserves_state() {
    let dir = tempfile::tempdir().unwrap();
    let admin = admin();
    let room_id;
    {
        let state = state_in(&dir);
        let room = state
            .rooms
            .create_room(
                RoomCreate {
                    number: "104".to_string(),
                    room_type: RoomType::Single,
                    price: money(6_000),
                },
                &admin,
            )
            .unwrap();
        room_id = room.id;
    }

    let state = state_in(&dir);
    let room = state.rooms.get_room(room_id).unwrap();
    assert_eq!(room.number, "104");
    assert_eq!(room.status, RoomStatus::Available);
}
