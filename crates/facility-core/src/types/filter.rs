//! Filter types for list queries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date bounds for list queries. Both bounds are exclusive; a missing bound
/// leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Lower bound (exclusive).
    #[serde(default)]
    pub start: Option<NaiveDate>,
    /// Upper bound (exclusive).
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// A range open on both sides.
    pub fn all() -> Self {
        Self::default()
    }

    /// A range strictly between `start` and `end`.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Whether `date` lies inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| start < date) && self.end.is_none_or(|end| date < end)
    }
}
