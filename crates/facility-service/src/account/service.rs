//! Account management: creation, activation, renaming, and funds.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use facility_core::config::facility::FacilityConfig;
use facility_core::traits::Repository;
use facility_core::types::round_cents;
use facility_core::{AppError, AppResult};
use facility_database::UserRepository;
use facility_entity::{Setting, User, UserRole};

use crate::context::RequestContext;
use crate::settings::SettingsService;

/// Handles account administration and balance top-ups.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Settings, for the client-facing switches.
    settings: SettingsService,
    /// Facility configuration, for top-up bounds.
    facility: FacilityConfig,
}

/// Request to create an account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddUserRequest {
    /// Login id (unique).
    #[validate(length(min = 1, max = 64, message = "User ID is required"))]
    pub id: String,
    /// Display name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Role assignment.
    pub role: UserRole,
}

/// Request to add funds to an account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddFundsRequest {
    /// Account to credit.
    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,
    /// Amount to add.
    #[validate(range(exclusive_min = 0.0, message = "Amount must be positive"))]
    pub amount: f64,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        settings: SettingsService,
        facility: FacilityConfig,
    ) -> Self {
        Self {
            user_repo,
            settings,
            facility,
        }
    }

    /// Create a new account with an empty balance.
    pub async fn add_user(&self, req: AddUserRequest) -> AppResult<User> {
        req.validate()?;
        let user = self
            .user_repo
            .create(&User::new(req.id, req.name, req.role))
            .await?;
        info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// All accounts.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.user_repo.find_all().await
    }

    /// A single account.
    pub async fn get_user(&self, id: &str) -> AppResult<User> {
        self.user_repo
            .find_by_id(&id.to_string())
            .await?
            .ok_or_else(|| AppError::not_found("User ID invalid"))
    }

    /// Delete an account.
    pub async fn remove_user(&self, id: &str) -> AppResult<()> {
        if !self.user_repo.delete(&id.to_string()).await? {
            return Err(AppError::not_found("User ID invalid"));
        }
        info!(user_id = %id, "User removed");
        Ok(())
    }

    /// Change an account's display name.
    pub async fn rename_user(&self, id: &str, name: &str) -> AppResult<User> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Name cannot be empty"));
        }
        let mut user = self.get_user(id).await?;
        user.name = name.to_string();
        let user = self.user_repo.update(&user).await?;
        info!(user_id = %id, "User renamed");
        Ok(user)
    }

    /// Activate or deactivate an account.
    pub async fn set_activation(&self, id: &str, activation: bool) -> AppResult<User> {
        let mut user = self.get_user(id).await?;
        user.activation = activation;
        let user = self.user_repo.update(&user).await?;
        info!(user_id = %id, activation = activation, "User activation changed");
        Ok(user)
    }

    /// Current balance of an account.
    pub async fn balance(&self, id: &str) -> AppResult<f64> {
        Ok(self.get_user(id).await?.account_balance)
    }

    /// Whether `id` may sign in right now.
    ///
    /// Deactivated accounts never may; clients additionally need client
    /// logins to be switched on.
    pub async fn login_permitted(&self, id: &str) -> AppResult<bool> {
        let user = self.get_user(id).await?;
        if !user.activation {
            return Ok(false);
        }
        match user.role {
            UserRole::Client => self.settings.value(Setting::ClientLoginsAllowed).await,
            UserRole::FacilityManager | UserRole::RemoteFacilityManager => Ok(true),
        }
    }

    /// Credit an account and return the new balance.
    pub async fn add_funds(&self, ctx: &RequestContext, req: AddFundsRequest) -> AppResult<f64> {
        req.validate()?;

        let min = self.facility.min_funds_addition;
        let max = self.facility.max_funds_addition;
        if req.amount < min || req.amount > max {
            return Err(AppError::validation(format!(
                "Amount must be between ${min:.2} and ${max:.2}"
            )));
        }

        if !ctx.is_facility_manager() {
            if ctx.user_id != req.user_id {
                return Err(AppError::authorization(
                    "Only facility managers may add funds to other accounts",
                ));
            }
            if !self.settings.value(Setting::ClientAddingFundsAllowed).await? {
                return Err(AppError::authorization("Adding funds is currently disabled"));
            }
        }

        let amount = round_cents(req.amount);
        let balance = self.user_repo.adjust_balance(&req.user_id, amount).await?;
        info!(user_id = %req.user_id, amount = amount, balance = balance, "Funds added");
        Ok(balance)
    }
}
