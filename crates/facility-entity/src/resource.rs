//! Bookable resource types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use facility_core::AppError;

/// The fixed set of resource types the facility rents out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Shared workshop bench.
    #[serde(rename = "workshop")]
    Workshop,
    /// Mini microvac.
    #[serde(rename = "mini microvac")]
    MiniMicrovac,
    /// Irradiator. Only one unit may run at a time and each needs to cool down.
    #[serde(rename = "irradiator")]
    Irradiator,
    /// Polymer extruder.
    #[serde(rename = "polymer extruder")]
    PolymerExtruder,
    /// High velocity crusher. Recalibrates for six hours around each run.
    #[serde(rename = "high velocity crusher")]
    HighVelocityCrusher,
    /// 1.21 gigawatt lightning harvester. Caps concurrent machines while running.
    #[serde(rename = "1.21 gigawatt lightning harvester")]
    LightningHarvester,
}

impl ResourceKind {
    /// All resource kinds.
    pub const ALL: [ResourceKind; 6] = [
        Self::Workshop,
        Self::MiniMicrovac,
        Self::Irradiator,
        Self::PolymerExtruder,
        Self::HighVelocityCrusher,
        Self::LightningHarvester,
    ];

    /// Catalog name of the resource.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Workshop => "workshop",
            Self::MiniMicrovac => "mini microvac",
            Self::Irradiator => "irradiator",
            Self::PolymerExtruder => "polymer extruder",
            Self::HighVelocityCrusher => "high velocity crusher",
            Self::LightningHarvester => "1.21 gigawatt lightning harvester",
        }
    }

    /// Base price of one 30-minute block.
    pub fn base_price(&self) -> f64 {
        match self {
            Self::Workshop => 99.0 / 2.0,
            Self::MiniMicrovac => 2000.0 / 2.0,
            Self::Irradiator => 2200.0 / 2.0,
            Self::PolymerExtruder => 500.0 / 2.0,
            Self::HighVelocityCrusher => 10_000.0,
            Self::LightningHarvester => 8800.0 / 2.0,
        }
    }

    /// Whether the resource counts toward the concurrent machine cap.
    pub fn is_machine(&self) -> bool {
        !matches!(self, Self::Workshop)
    }

    /// Look up a resource by its catalog name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
            .ok_or_else(|| AppError::validation(format!("Invalid resource name: '{s}'")))
    }
}
