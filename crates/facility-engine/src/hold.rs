//! Remote hold translation.
//!
//! A cooperating facility asks for a resource over a time range on one date.
//! The range is broken into 30-minute blocks, each of which is then admitted
//! on its own.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use facility_core::{AppError, AppResult};

use crate::slot::slot_length;

fn is_aligned(time: NaiveTime) -> bool {
    matches!(time.minute(), 0 | 30) && time.second() == 0 && time.nanosecond() == 0
}

/// Slot starts from `start` (inclusive) up to `end` (exclusive) on `date`.
pub fn translate_hold(
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> AppResult<Vec<NaiveDateTime>> {
    if !is_aligned(start) || !is_aligned(end) {
        return Err(AppError::validation("Hold times must be on :00 or :30"));
    }
    if end <= start {
        return Err(AppError::validation("Hold end must be after its start"));
    }

    let end = date.and_time(end);
    let mut blocks = Vec::new();
    let mut cursor = date.and_time(start);
    while cursor < end {
        blocks.push(cursor);
        cursor += slot_length();
    }
    Ok(blocks)
}

/// Drop the unit number a remote facility appends to a resource name,
/// e.g. `"irradiator2"` becomes `"irradiator"`.
pub fn strip_unit_suffix(name: &str) -> &str {
    name.trim_end_matches(|c: char| c.is_ascii_digit())
}
