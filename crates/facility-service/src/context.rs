//! Request context and service wiring.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use facility_core::config::AppConfig;
use facility_core::traits::{Clock, Repository};
use facility_core::{AppError, AppResult};
use facility_database::{
    ReservationRepository, SettingsRepository, TransactionRepository, UserRepository,
};
use facility_engine::SlotAllocator;
use facility_entity::{User, UserRole};

use crate::account::AccountService;
use crate::booking::BookingService;
use crate::hold::HoldService;
use crate::ledger::LedgerService;
use crate::settings::SettingsService;

/// Who is acting on the current request.
///
/// Built by the caller after authentication, which is outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Acting user's login id.
    pub user_id: String,
    /// Acting user's role.
    pub role: UserRole,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    /// Context for an existing account.
    pub fn for_user(user: &User) -> Self {
        Self::new(user.id.clone(), user.role)
    }

    /// Returns whether the actor manages this facility.
    pub fn is_facility_manager(&self) -> bool {
        matches!(self.role, UserRole::FacilityManager)
    }

    /// Returns whether the actor represents a cooperating facility.
    pub fn is_remote_facility(&self) -> bool {
        matches!(self.role, UserRole::RemoteFacilityManager)
    }

    /// Fail unless the actor may act on behalf of `customer`.
    ///
    /// Facility managers act for anyone; clients only for themselves.
    pub fn require_acting_for(&self, customer: &str) -> AppResult<()> {
        match self.role {
            UserRole::FacilityManager => Ok(()),
            UserRole::Client if self.user_id == customer => Ok(()),
            UserRole::Client => Err(AppError::authorization(
                "Clients may only manage their own reservations",
            )),
            UserRole::RemoteFacilityManager => Err(AppError::authorization(
                "Remote facilities may only place holds",
            )),
        }
    }
}

/// Shared state every service draws from.
#[derive(Debug, Clone)]
pub struct ServiceContext {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// Time source.
    pub clock: Arc<dyn Clock>,
    /// Resource catalog behind its lock.
    pub allocator: SlotAllocator,
    /// Reservation records.
    pub reservations: Arc<ReservationRepository>,
    /// Ledger records.
    pub transactions: Arc<TransactionRepository>,
    /// User accounts.
    pub users: Arc<UserRepository>,
    /// Runtime settings flags.
    pub settings: Arc<SettingsRepository>,
}

impl ServiceContext {
    /// Wire fresh repositories and a standard catalog.
    pub fn new(config: AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config: Arc::new(config),
            clock,
            allocator: SlotAllocator::standard(),
            reservations: Arc::new(ReservationRepository::new()),
            transactions: Arc::new(TransactionRepository::new()),
            users: Arc::new(UserRepository::new()),
            settings: Arc::new(SettingsRepository::new()),
        }
    }

    /// Seed settings and rebuild the catalog from stored reservations.
    pub async fn bootstrap(&self) -> AppResult<()> {
        self.settings_service().seed_defaults().await?;

        let stored = self.reservations.find_all().await?;
        let placed = self.allocator.restore(&stored).await;
        if placed != stored.len() {
            return Err(AppError::internal(format!(
                "Only {placed} of {} stored reservations fit the catalog",
                stored.len()
            )));
        }

        info!(
            facility = %self.config.facility.name,
            reservations = stored.len(),
            "Facility services ready"
        );
        Ok(())
    }

    /// Booking service over this context.
    pub fn booking_service(&self) -> BookingService {
        BookingService::new(
            Arc::clone(&self.reservations),
            Arc::clone(&self.transactions),
            Arc::clone(&self.users),
            self.allocator.clone(),
            Arc::clone(&self.clock),
        )
    }

    /// Hold service over this context.
    pub fn hold_service(&self) -> HoldService {
        HoldService::new(
            Arc::clone(&self.reservations),
            Arc::clone(&self.users),
            self.allocator.clone(),
            Arc::clone(&self.clock),
            self.config.facility.name.clone(),
        )
    }

    /// Account service over this context.
    pub fn account_service(&self) -> AccountService {
        AccountService::new(
            Arc::clone(&self.users),
            self.settings_service(),
            self.config.facility.clone(),
        )
    }

    /// Settings service over this context.
    pub fn settings_service(&self) -> SettingsService {
        SettingsService::new(Arc::clone(&self.settings), self.config.settings.clone())
    }

    /// Ledger service over this context.
    pub fn ledger_service(&self) -> LedgerService {
        LedgerService::new(Arc::clone(&self.transactions), Arc::clone(&self.users))
    }
}
