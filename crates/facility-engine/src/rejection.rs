//! Reasons a candidate reservation is refused.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use facility_core::AppError;

/// A business rejection. Rejections are expected outcomes, not failures; each
/// one states whether the caller may offer a hold at a cooperating facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rejection {
    /// The start time is not on a :00 or :30 boundary.
    #[error("Time not :00 or :30")]
    TimeNotAligned,
    /// The slot lies outside opening hours.
    #[error("Time outside working hours")]
    OutsideWorkingHours,
    /// The slot is in the past or 30 or more days ahead.
    #[error("Date not within 30 days from now")]
    DateOutOfRange,
    /// The resource name is not in the catalog.
    #[error("Resource name invalid")]
    InvalidResourceName,
    /// No unit of the resource can take the slot.
    #[error("Resource unavailable")]
    ResourceUnavailable,
    /// The irradiator unit is cooling down from an adjacent run.
    #[error("Time invalid for irradiator")]
    IrradiatorCooldown,
    /// The crusher is recalibrating around an existing run.
    #[error("Time invalid for crusher")]
    CrusherCooldown,
    /// The customer has hit the weekly-day or concurrent-machine limit.
    #[error("Customer limit exceeded")]
    CustomerLimitExceeded,
}

impl Rejection {
    /// Stable kebab-case code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TimeNotAligned => "time-not-aligned",
            Self::OutsideWorkingHours => "outside-working-hours",
            Self::DateOutOfRange => "date-out-of-range",
            Self::InvalidResourceName => "invalid-resource-name",
            Self::ResourceUnavailable => "resource-unavailable",
            Self::IrradiatorCooldown => "irradiator-cooldown",
            Self::CrusherCooldown => "crusher-cooldown",
            Self::CustomerLimitExceeded => "customer-limit-exceeded",
        }
    }

    /// Whether a remote hold may be offered instead.
    pub fn hold_request_possible(&self) -> bool {
        match self {
            Self::TimeNotAligned | Self::DateOutOfRange | Self::InvalidResourceName => false,
            Self::OutsideWorkingHours
            | Self::ResourceUnavailable
            | Self::IrradiatorCooldown
            | Self::CrusherCooldown
            | Self::CustomerLimitExceeded => true,
        }
    }
}

impl From<Rejection> for AppError {
    fn from(rejection: Rejection) -> Self {
        AppError::rejected(
            rejection.code(),
            rejection.to_string(),
            rejection.hold_request_possible(),
        )
    }
}
