//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use facility_core::config::AppConfig;
use facility_core::traits::FixedClock;
use facility_entity::{User, UserRole};
use facility_service::{
    AccountService, AddFundsRequest, AddUserRequest, BookingService, HoldService, LedgerService,
    RequestContext, ServiceContext, SettingsService,
};

/// Facility manager account created for every test app.
pub const MANAGER: &str = "manager";

/// Test application context
pub struct TestApp {
    /// Shared wiring
    pub ctx: ServiceContext,
    /// Clock the services read
    pub clock: FixedClock,
    pub booking: BookingService,
    pub holds: HoldService,
    pub accounts: AccountService,
    pub settings: SettingsService,
    pub ledger: LedgerService,
}

/// Monday 2024-03-04 08:00, the instant every test app starts at.
pub fn now() -> NaiveDateTime {
    at(2024, 3, 4, 8, 0)
}

/// Build a facility-local timestamp.
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid timestamp")
}

impl TestApp {
    /// Create a new test application with default configuration
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Create a new test application from `config`
    pub async fn with_config(config: AppConfig) -> Self {
        facility_core::logging::init_logging(&config.logging);

        let clock = FixedClock::new(now());
        let ctx = ServiceContext::new(config, Arc::new(clock.clone()));
        ctx.bootstrap().await.expect("Failed to bootstrap services");

        let app = Self {
            booking: ctx.booking_service(),
            holds: ctx.hold_service(),
            accounts: ctx.account_service(),
            settings: ctx.settings_service(),
            ledger: ctx.ledger_service(),
            ctx,
            clock,
        };
        app.create_user(MANAGER, UserRole::FacilityManager, 0.0).await;
        app
    }

    /// Context for the facility manager
    pub fn manager(&self) -> RequestContext {
        RequestContext::new(MANAGER, UserRole::FacilityManager)
    }

    /// Context for a client acting for themselves
    pub fn client(&self, id: &str) -> RequestContext {
        RequestContext::new(id, UserRole::Client)
    }

    /// Create an account and optionally fund it
    pub async fn create_user(&self, id: &str, role: UserRole, funds: f64) -> User {
        self.accounts
            .add_user(AddUserRequest {
                id: id.to_string(),
                name: id.to_uppercase(),
                role,
            })
            .await
            .expect("Failed to create user");

        if funds > 0.0 {
            self.accounts
                .add_funds(
                    &self.manager(),
                    AddFundsRequest {
                        user_id: id.to_string(),
                        amount: funds,
                    },
                )
                .await
                .expect("Failed to add funds");
        }

        self.accounts.get_user(id).await.expect("user exists")
    }

    /// Current balance of `id`
    pub async fn balance(&self, id: &str) -> f64 {
        self.accounts.balance(id).await.expect("balance")
    }
}
