//! Remote hold use cases.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use facility_core::traits::{Clock, Repository};
use facility_core::types::ReservationId;
use facility_core::{AppError, AppResult};
use facility_database::{ReservationRepository, UserRepository};
use facility_engine::{calculate_cost, strip_unit_suffix, translate_hold, Candidate, SlotAllocator};
use facility_entity::{Reservation, UserRole};

use crate::context::RequestContext;

/// Request from a cooperating facility to hold a resource over a time range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldRequest {
    /// Resource name, possibly with a unit number appended.
    pub resource: String,
    /// The remote facility's client the hold is for.
    pub client_name: String,
    /// Day of the hold.
    pub date: NaiveDate,
    /// First slot start.
    pub start_time: NaiveTime,
    /// End of the last slot.
    pub end_time: NaiveTime,
}

/// Result of a successful hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldReceipt {
    /// Name of this facility, as the remote side will display it.
    pub facility_name: String,
    /// One serial number per 30-minute block, in time order.
    pub serial_numbers: Vec<ReservationId>,
}

/// Places and lists holds for remote facilities.
#[derive(Debug, Clone)]
pub struct HoldService {
    /// Reservation repository.
    reservation_repo: Arc<ReservationRepository>,
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Resource catalog.
    allocator: SlotAllocator,
    /// Time source.
    clock: Arc<dyn Clock>,
    /// This facility's name.
    facility_name: String,
}

impl HoldService {
    /// Creates a new hold service.
    pub fn new(
        reservation_repo: Arc<ReservationRepository>,
        user_repo: Arc<UserRepository>,
        allocator: SlotAllocator,
        clock: Arc<dyn Clock>,
        facility_name: String,
    ) -> Self {
        Self {
            reservation_repo,
            user_repo,
            allocator,
            clock,
            facility_name,
        }
    }

    /// Book every 30-minute block of the requested range.
    ///
    /// Blocks are admitted in time order. The first rejection ends the
    /// request and is returned; blocks booked before it stay booked and must
    /// be cancelled individually if the caller wants them gone.
    pub async fn place_hold(&self, ctx: &RequestContext, req: HoldRequest) -> AppResult<HoldReceipt> {
        let reserver = self
            .user_repo
            .find_by_id(&ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User ID invalid"))?;
        if reserver.role != UserRole::RemoteFacilityManager {
            return Err(AppError::authorization(
                "Only remote facility managers may place holds",
            ));
        }

        let blocks = translate_hold(req.date, req.start_time, req.end_time)?;
        let resource = strip_unit_suffix(&req.resource);
        let now = self.clock.now();

        let mut catalog = self.allocator.lock().await;
        let mut serial_numbers = Vec::with_capacity(blocks.len());

        for timestamp in blocks {
            let candidate = Candidate::new(resource, &req.client_name, timestamp);
            let admission = match catalog.admit(&candidate, now) {
                Ok(admission) => admission,
                Err(rejection) => {
                    if !serial_numbers.is_empty() {
                        warn!(
                            reserver = %reserver.id,
                            booked = serial_numbers.len(),
                            failed_at = %timestamp,
                            reason = rejection.code(),
                            "Hold partially placed"
                        );
                    }
                    return Err(rejection.into());
                }
            };

            let cost = calculate_cost(admission.resource, timestamp, now);
            let reservation = Reservation::new(
                timestamp,
                admission.resource,
                req.client_name.as_str(),
                reserver.id.as_str(),
                cost,
            );
            self.reservation_repo.create(&reservation).await?;
            serial_numbers.push(reservation.serial_num);
        }

        info!(
            reserver = %reserver.id,
            client = %req.client_name,
            resource = %resource,
            blocks = serial_numbers.len(),
            "Hold placed"
        );

        Ok(HoldReceipt {
            facility_name: self.facility_name.clone(),
            serial_numbers,
        })
    }

    /// Remove one held block and free its catalog slot.
    ///
    /// Only the remote facility manager that placed the hold, or a facility
    /// manager, may remove it. Holds are never charged, so nothing is refunded.
    pub async fn cancel_hold(&self, ctx: &RequestContext, serial_num: &ReservationId) -> AppResult<()> {
        if !ctx.is_facility_manager() && !ctx.is_remote_facility() {
            return Err(AppError::authorization(
                "Only facility managers may cancel holds",
            ));
        }

        let mut catalog = self.allocator.lock().await;

        let reservation = self
            .reservation_repo
            .find_by_id(serial_num)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation not found"))?;
        if ctx.is_remote_facility() && reservation.reserver != ctx.user_id {
            return Err(AppError::authorization(
                "Hold was placed by another facility",
            ));
        }
        let placed_remotely = self
            .user_repo
            .find_by_id(&reservation.reserver)
            .await?
            .is_some_and(|u| u.role == UserRole::RemoteFacilityManager);
        if !placed_remotely {
            return Err(AppError::validation("Reservation is not a hold"));
        }

        self.reservation_repo.delete(serial_num).await?;
        if !catalog.release(reservation.resource, &reservation.customer, reservation.timestamp) {
            warn!(serial_num = %serial_num, "Cancelled hold held no catalog slot");
        }

        info!(
            serial_num = %serial_num,
            reserver = %reservation.reserver,
            client = %reservation.customer,
            "Hold cancelled"
        );

        Ok(())
    }

    /// Reservations made by remote facility managers.
    pub async fn list_holds(&self) -> AppResult<Vec<Reservation>> {
        let remote: HashSet<String> = self
            .user_repo
            .find_by_role(UserRole::RemoteFacilityManager)
            .await?
            .into_iter()
            .map(|u| u.id)
            .collect();
        self.reservation_repo
            .find_by_reserver(|reserver| remote.contains(reserver))
            .await
    }
}
