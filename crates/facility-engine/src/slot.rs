//! Slot arithmetic.
//!
//! A slot is a 30-minute block identified by its facility-local start time.

use chrono::{Datelike, Duration, NaiveDateTime, Timelike, Weekday};

use crate::rejection::Rejection;

/// Length of one bookable block in minutes.
pub const SLOT_MINUTES: i64 = 30;

/// How far ahead a slot may be booked, in days (exclusive).
pub const BOOKING_HORIZON_DAYS: i64 = 30;

/// Duration of one bookable block.
pub fn slot_length() -> Duration {
    Duration::minutes(SLOT_MINUTES)
}

/// Whether `timestamp` starts on a :00 or :30 boundary.
pub fn is_aligned(timestamp: NaiveDateTime) -> bool {
    matches!(timestamp.minute(), 0 | 30) && timestamp.second() == 0 && timestamp.nanosecond() == 0
}

/// Whether a slot starting at `timestamp` lies inside opening hours.
///
/// Monday to Friday the first slot starts at 09:00 and the last at 16:30;
/// Saturday runs 10:00 to 15:30. Sunday is closed.
pub fn within_working_hours(timestamp: NaiveDateTime) -> bool {
    let hour = timestamp.hour();
    match timestamp.weekday() {
        Weekday::Sat => (10..16).contains(&hour),
        Weekday::Sun => false,
        _ => (9..17).contains(&hour),
    }
}

/// Whether `timestamp` lies strictly between `now` and `now + 30 days`.
pub fn within_booking_horizon(timestamp: NaiveDateTime, now: NaiveDateTime) -> bool {
    now < timestamp && timestamp < now + Duration::days(BOOKING_HORIZON_DAYS)
}

/// A single slot-level admission rule.
pub type SlotRule = fn(NaiveDateTime, NaiveDateTime) -> Result<(), Rejection>;

/// Slot-level rules, evaluated in order; the first failure wins.
pub const SLOT_RULES: [SlotRule; 3] = [require_aligned, require_working_hours, require_horizon];

fn require_aligned(timestamp: NaiveDateTime, _now: NaiveDateTime) -> Result<(), Rejection> {
    if is_aligned(timestamp) {
        Ok(())
    } else {
        Err(Rejection::TimeNotAligned)
    }
}

fn require_working_hours(timestamp: NaiveDateTime, _now: NaiveDateTime) -> Result<(), Rejection> {
    if within_working_hours(timestamp) {
        Ok(())
    } else {
        Err(Rejection::OutsideWorkingHours)
    }
}

fn require_horizon(timestamp: NaiveDateTime, now: NaiveDateTime) -> Result<(), Rejection> {
    if within_booking_horizon(timestamp, now) {
        Ok(())
    } else {
        Err(Rejection::DateOutOfRange)
    }
}

/// Run every slot-level rule against `timestamp`.
pub fn check_slot(timestamp: NaiveDateTime, now: NaiveDateTime) -> Result<(), Rejection> {
    SLOT_RULES.iter().try_for_each(|rule| rule(timestamp, now))
}

/// Slots at `offset` multiples of 30 minutes around `timestamp`, inclusive.
pub fn window(timestamp: NaiveDateTime, reach_minutes: i64) -> impl Iterator<Item = NaiveDateTime> {
    let steps = reach_minutes / SLOT_MINUTES;
    (-steps..=steps).map(move |step| timestamp + Duration::minutes(step * SLOT_MINUTES))
}
