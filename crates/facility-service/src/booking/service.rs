//! Booking use cases.
//!
//! Every mutating operation holds the catalog lock from the limit check to
//! the final write, so two requests for the same customer or slot are decided
//! one after the other against up-to-date records.

use std::sync::Arc;

use tracing::{info, warn};

use facility_core::traits::{Clock, Repository};
use facility_core::types::{round_cents, ReservationId};
use facility_core::{AppError, AppResult};
use facility_database::{ReservationRepository, TransactionRepository, UserRepository};
use facility_engine::{
    calculate_cost, calculate_refund, limit_exceeded, Candidate, Rejection, SlotAllocator,
};
use facility_entity::{Reservation, Transaction, User};

use super::model::{BookingReceipt, EditReceipt, EditRequest, ReservationFilter, ReserveRequest};
use crate::context::RequestContext;

/// Handles reserve, edit, and cancel of single-slot reservations.
#[derive(Debug, Clone)]
pub struct BookingService {
    /// Reservation repository.
    reservation_repo: Arc<ReservationRepository>,
    /// Transaction ledger.
    transaction_repo: Arc<TransactionRepository>,
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Resource catalog.
    allocator: SlotAllocator,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(
        reservation_repo: Arc<ReservationRepository>,
        transaction_repo: Arc<TransactionRepository>,
        user_repo: Arc<UserRepository>,
        allocator: SlotAllocator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            reservation_repo,
            transaction_repo,
            user_repo,
            allocator,
            clock,
        }
    }

    async fn active_customer(&self, customer: &str) -> AppResult<User> {
        let user = self
            .user_repo
            .find_by_id(&customer.to_string())
            .await?
            .ok_or_else(|| AppError::not_found("User ID invalid"))?;
        if !user.activation {
            return Err(AppError::authorization("User deactivated"));
        }
        Ok(user)
    }

    /// Book one slot for a customer and charge their balance.
    pub async fn reserve(
        &self,
        ctx: &RequestContext,
        req: ReserveRequest,
    ) -> AppResult<BookingReceipt> {
        ctx.require_acting_for(&req.customer)?;
        let customer = self.active_customer(&req.customer).await?;
        let now = self.clock.now();

        let mut catalog = self.allocator.lock().await;

        let existing = self.reservation_repo.find_by_customer(&req.customer).await?;
        let candidate = Candidate::new(&req.resource, &req.customer, req.timestamp);
        if limit_exceeded(&existing, &candidate) {
            return Err(Rejection::CustomerLimitExceeded.into());
        }

        let admission = catalog.admit(&candidate, now)?;
        let cost = calculate_cost(admission.resource, req.timestamp, now);

        if !customer.can_afford(cost) {
            catalog.release(admission.resource, &req.customer, req.timestamp);
            return Err(AppError::validation("Not enough balance in account"));
        }

        let reservation = Reservation::new(
            req.timestamp,
            admission.resource,
            req.customer.as_str(),
            ctx.user_id.as_str(),
            cost,
        );
        self.reservation_repo.create(&reservation).await?;
        self.transaction_repo
            .create(&Transaction::new(now, req.customer.as_str(), cost))
            .await?;
        let balance = self.user_repo.adjust_balance(&req.customer, -cost).await?;

        info!(
            serial_num = %reservation.serial_num,
            resource = %reservation.resource,
            customer = %reservation.customer,
            reserver = %reservation.reserver,
            timestamp = %reservation.timestamp,
            cost = cost,
            "Reservation made"
        );

        Ok(BookingReceipt {
            serial_num: reservation.serial_num,
            cost,
            balance,
        })
    }

    /// Move a reservation to a new resource or slot, settling the difference.
    pub async fn edit(&self, ctx: &RequestContext, req: EditRequest) -> AppResult<EditReceipt> {
        ctx.require_acting_for(&req.customer)?;
        self.active_customer(&req.customer).await?;
        let now = self.clock.now();

        let mut catalog = self.allocator.lock().await;

        let old = self.find(&req.serial_num).await?;
        if old.customer != req.customer {
            return Err(AppError::authorization(
                "Reservation belongs to another customer",
            ));
        }

        let others: Vec<Reservation> = self
            .reservation_repo
            .find_by_customer(&req.customer)
            .await?
            .into_iter()
            .filter(|r| r.serial_num != old.serial_num)
            .collect();
        let candidate = Candidate::new(&req.resource, &req.customer, req.timestamp);
        if limit_exceeded(&others, &candidate) {
            return Err(Rejection::CustomerLimitExceeded.into());
        }

        // Free the old slot first so it does not count against its own cooldowns.
        catalog.release(old.resource, &old.customer, old.timestamp);
        let admission = match catalog.admit(&candidate, now) {
            Ok(admission) => admission,
            Err(rejection) => {
                catalog.restore(std::iter::once(&old));
                return Err(rejection.into());
            }
        };

        let cost = calculate_cost(admission.resource, req.timestamp, now);
        let refund = calculate_refund(&old, now);
        let net_amount = round_cents(cost - refund);

        let updated = Reservation {
            serial_num: old.serial_num,
            timestamp: req.timestamp,
            resource: admission.resource,
            customer: req.customer.clone(),
            reserver: ctx.user_id.clone(),
            cost,
        };
        self.reservation_repo.update(&updated).await?;

        if net_amount != 0.0 {
            self.transaction_repo
                .create(&Transaction::new(now, req.customer.as_str(), net_amount))
                .await?;
            self.user_repo
                .adjust_balance(&req.customer, -net_amount)
                .await?;
        }

        info!(
            serial_num = %updated.serial_num,
            resource = %updated.resource,
            timestamp = %updated.timestamp,
            net_amount = net_amount,
            "Reservation modified"
        );

        Ok(EditReceipt {
            serial_num: updated.serial_num,
            cost,
            refund,
            net_amount,
        })
    }

    /// Cancel a reservation and refund what the schedule allows.
    pub async fn cancel(
        &self,
        ctx: &RequestContext,
        customer: &str,
        serial_num: &ReservationId,
    ) -> AppResult<f64> {
        ctx.require_acting_for(customer)?;
        self.user_repo
            .find_by_id(&customer.to_string())
            .await?
            .ok_or_else(|| AppError::not_found("User ID invalid"))?;
        let now = self.clock.now();

        let mut catalog = self.allocator.lock().await;

        let reservation = self.find(serial_num).await?;
        if reservation.customer != customer {
            return Err(AppError::authorization(
                "Reservation belongs to another customer",
            ));
        }

        let refund = calculate_refund(&reservation, now);
        if refund != 0.0 {
            self.transaction_repo
                .create(&Transaction::new(now, customer, -refund))
                .await?;
            self.user_repo.adjust_balance(customer, refund).await?;
        }

        self.reservation_repo.delete(serial_num).await?;
        if !catalog.release(reservation.resource, &reservation.customer, reservation.timestamp) {
            warn!(serial_num = %serial_num, "Cancelled reservation held no catalog slot");
        }

        info!(
            serial_num = %serial_num,
            customer = %customer,
            refund = refund,
            "Reservation cancelled"
        );

        Ok(refund)
    }

    async fn find(&self, serial_num: &ReservationId) -> AppResult<Reservation> {
        self.reservation_repo
            .find_by_id(serial_num)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation not found"))
    }

    /// A single reservation by serial number.
    pub async fn get_reservation(&self, serial_num: &ReservationId) -> AppResult<Reservation> {
        self.find(serial_num).await
    }

    /// Reservations matching `filter`, in booking order.
    pub async fn list_reservations(&self, filter: &ReservationFilter) -> AppResult<Vec<Reservation>> {
        if let Some(customer) = &filter.customer {
            self.user_repo
                .find_by_id(customer)
                .await?
                .ok_or_else(|| AppError::not_found("User ID invalid"))?;
        }
        self.reservation_repo
            .find_filtered(filter.customer.as_deref(), filter.range)
            .await
    }
}
