//! PaymentLedger - signed ledger entries and derived summaries

use chrono::Utc;
use rust_decimal::Decimal;
use shared::actor::Actor;
use shared::models::{
    is_valid_payment_method, Booking, Payment, PaymentCreate, PaymentSummary, PaymentType,
    PaymentUpdate,
};
use uuid::Uuid;

use super::error::{LedgerError, LedgerResult};
use crate::store::Store;
use redb::WriteTransaction;

/// Sum of all signed amounts for a booking (refunds subtract)
pub fn total_paid(payments: &[Payment]) -> Decimal {
    payments.iter().map(|p| p.amount).sum()
}

/// Sign and method rules for one ledger entry
fn validate_entry(amount: Decimal, payment_type: PaymentType, method: &str) -> LedgerResult<()> {
    if amount.is_zero() {
        return Err(LedgerError::ZeroAmount);
    }
    if payment_type.is_refund() {
        if amount > Decimal::ZERO {
            return Err(LedgerError::PositiveRefund);
        }
    } else if amount < Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount(payment_type));
    }
    if !is_valid_payment_method(method) {
        return Err(LedgerError::InvalidMethod(method.to_string()));
    }
    Ok(())
}

/// Payment ledger over the shared store
///
/// Each mutation runs inside one exclusive write transaction; the refund
/// bound is always computed from the history that transaction will commit
/// against, and summaries are derived inside a single read snapshot.
#[derive(Clone)]
pub struct PaymentLedger {
    store: Store,
}

impl PaymentLedger {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    fn require_staff(actor: &Actor) -> LedgerResult<()> {
        if !actor.is_staff() {
            return Err(LedgerError::Forbidden(format!(
                "role {} may not modify the payment ledger",
                actor.role
            )));
        }
        Ok(())
    }

    /// Record a new payment against a booking
    pub fn create_payment(
        &self,
        booking_id: Uuid,
        req: PaymentCreate,
        actor: &Actor,
    ) -> LedgerResult<Payment> {
        Self::require_staff(actor)?;

        let txn = self.store.begin_write()?;
        let booking = self
            .store
            .booking_by_id_txn(&txn, booking_id)?
            .ok_or(LedgerError::BookingNotFound(booking_id))?;

        let payment = self.record_in_txn(&txn, &booking, &req, actor)?;
        txn.commit().map_err(crate::store::StoreError::from)?;

        tracing::info!(
            payment_id = %payment.id,
            booking_id = %booking_id,
            amount = %payment.amount,
            payment_type = ?payment.payment_type,
            "Payment recorded"
        );
        Ok(payment)
    }

    /// Validate and insert one ledger entry inside an open write transaction
    ///
    /// Shared with check-in, which must record its entry in the same
    /// transaction that flips the booking and room status.
    pub(crate) fn record_in_txn(
        &self,
        txn: &WriteTransaction,
        booking: &Booking,
        req: &PaymentCreate,
        actor: &Actor,
    ) -> LedgerResult<Payment> {
        validate_entry(req.amount, req.payment_type, &req.method)?;

        if req.payment_type.is_refund() {
            let history = self.store.payments_for_booking_txn(txn, booking.id)?;
            let net_received = total_paid(&history);
            if req.amount.abs() > net_received {
                return Err(LedgerError::OverRefund {
                    requested: req.amount.abs(),
                    net_received,
                });
            }
        }

        let now = Utc::now();
        let payment = Payment {
            id: Uuid::new_v4(),
            booking_id: booking.id,
            amount: req.amount,
            payment_type: req.payment_type,
            method: req.method.clone(),
            notes: req.notes.clone(),
            created_by: actor.user_id,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_payment(txn, &payment)?;
        Ok(payment)
    }

    /// Correct an existing payment
    ///
    /// The merged entry is revalidated in full; for refunds the bound is
    /// checked against the history excluding this payment's previous amount.
    pub fn update_payment(
        &self,
        payment_id: Uuid,
        update: PaymentUpdate,
        actor: &Actor,
    ) -> LedgerResult<Payment> {
        Self::require_staff(actor)?;

        let txn = self.store.begin_write()?;
        let existing = self
            .store
            .payment_by_id_txn(&txn, payment_id)?
            .ok_or(LedgerError::PaymentNotFound(payment_id))?;

        let amount = update.amount.unwrap_or(existing.amount);
        let payment_type = update.payment_type.unwrap_or(existing.payment_type);
        let method = update.method.unwrap_or_else(|| existing.method.clone());
        validate_entry(amount, payment_type, &method)?;

        if payment_type.is_refund() {
            let history = self.store.payments_for_booking_txn(&txn, existing.booking_id)?;
            let net_without_this = total_paid(&history) - existing.amount;
            if amount.abs() > net_without_this {
                return Err(LedgerError::OverRefund {
                    requested: amount.abs(),
                    net_received: net_without_this,
                });
            }
        }

        let payment = Payment {
            amount,
            payment_type,
            method,
            notes: update.notes.unwrap_or(existing.notes.clone()),
            updated_at: Utc::now(),
            ..existing
        };
        self.store.update_payment(&txn, &payment)?;
        txn.commit().map_err(crate::store::StoreError::from)?;

        tracing::info!(payment_id = %payment_id, "Payment corrected");
        Ok(payment)
    }

    /// Delete a payment entry
    pub fn delete_payment(&self, payment_id: Uuid, actor: &Actor) -> LedgerResult<()> {
        Self::require_staff(actor)?;

        let txn = self.store.begin_write()?;
        let existing = self
            .store
            .payment_by_id_txn(&txn, payment_id)?
            .ok_or(LedgerError::PaymentNotFound(payment_id))?;
        self.store.delete_payment(&txn, &existing)?;
        txn.commit().map_err(crate::store::StoreError::from)?;

        tracing::info!(payment_id = %payment_id, booking_id = %existing.booking_id, "Payment deleted");
        Ok(())
    }

    /// Fetch a single payment
    pub fn get_payment(&self, payment_id: Uuid, actor: &Actor) -> LedgerResult<Payment> {
        let txn = self.store.begin_read()?;
        let payment = self
            .store
            .payment_by_id_read(&txn, payment_id)?
            .ok_or(LedgerError::PaymentNotFound(payment_id))?;
        if actor.is_guest() {
            let owns = self
                .store
                .booking_by_id_read(&txn, payment.booking_id)?
                .map(|b| b.created_by == actor.user_id)
                .unwrap_or(false);
            if !owns {
                return Err(LedgerError::PaymentNotFound(payment_id));
            }
        }
        Ok(payment)
    }

    /// All payments for a booking, newest first
    pub fn list_payments(&self, booking_id: Uuid, actor: &Actor) -> LedgerResult<Vec<Payment>> {
        let txn = self.store.begin_read()?;
        let booking = self
            .store
            .booking_by_id_read(&txn, booking_id)?
            .ok_or(LedgerError::BookingNotFound(booking_id))?;
        if actor.is_guest() && booking.created_by != actor.user_id {
            return Err(LedgerError::BookingNotFound(booking_id));
        }
        let mut payments = self.store.payments_for_booking_read(&txn, booking_id)?;
        payments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(payments)
    }

    /// Derive the payment summary for a booking
    ///
    /// Booking price and payment history are read from the same snapshot, so
    /// a concurrent correction can never produce a torn summary.
    pub fn get_summary(&self, booking_id: Uuid, actor: &Actor) -> LedgerResult<PaymentSummary> {
        let txn = self.store.begin_read()?;
        let booking = self
            .store
            .booking_by_id_read(&txn, booking_id)?
            .ok_or(LedgerError::BookingNotFound(booking_id))?;
        if actor.is_guest() && booking.created_by != actor.user_id {
            return Err(LedgerError::BookingNotFound(booking_id));
        }
        let payments = self.store.payments_for_booking_read(&txn, booking_id)?;
        let paid = total_paid(&payments);
        Ok(PaymentSummary {
            booking_id,
            total_price: booking.price,
            total_paid: paid,
            remaining_balance: booking.price - paid,
            payment_count: payments.len() as u64,
        })
    }
}
