//! Per-customer usage limits.
//!
//! A customer may book on at most three distinct days in any Sunday-based
//! week, and may not run two machines in the same slot. Workshops are never
//! subject to the concurrency limit.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};

use facility_entity::Reservation;

use crate::admission::Candidate;

/// Distinct booking days allowed per customer per week.
pub const MAX_DAYS_PER_WEEK: usize = 3;

/// First day (Sunday) of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Dates in `[start, start + 7 days)` on which `customer` already holds a reservation.
fn booked_days(existing: &[Reservation], customer: &str, start: NaiveDate) -> BTreeSet<NaiveDate> {
    let end = start + Duration::days(7);
    existing
        .iter()
        .filter(|r| r.customer == customer)
        .map(|r| r.timestamp.date())
        .filter(|day| (start..end).contains(day))
        .collect()
}

/// Whether admitting `candidate` would break the customer's limits.
///
/// `existing` is every reservation currently on the books; entries for other
/// customers are ignored.
pub fn limit_exceeded(existing: &[Reservation], candidate: &Candidate<'_>) -> bool {
    let day = candidate.timestamp.date();
    let days = booked_days(existing, candidate.customer, week_start(day));
    if !days.contains(&day) && days.len() >= MAX_DAYS_PER_WEEK {
        return true;
    }

    if candidate.is_workshop() {
        return false;
    }

    existing.iter().any(|r| {
        r.customer == candidate.customer
            && r.timestamp == candidate.timestamp
            && r.resource.is_machine()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use facility_entity::ResourceKind;

    fn at(day: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .and_then(|d| d.and_hms_opt(h, 0, 0))
            .unwrap()
    }

    fn booking(customer: &str, kind: ResourceKind, t: NaiveDateTime) -> Reservation {
        Reservation::new(t, kind, customer, customer, kind.base_price())
    }

    #[test]
    fn test_week_starts_on_sunday() {
        let sunday = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(week_start(sunday), sunday);
        let saturday = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
        assert_eq!(week_start(saturday), sunday);
        let wednesday = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        assert_eq!(week_start(wednesday), NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
    }

    #[test]
    fn test_fourth_day_in_week_is_refused() {
        let existing = vec![
            booking("alice", ResourceKind::Workshop, at(11, 10)),
            booking("alice", ResourceKind::Workshop, at(12, 10)),
            booking("alice", ResourceKind::Workshop, at(13, 10)),
        ];
        let thursday = Candidate::new("workshop", "alice", at(14, 10));
        assert!(limit_exceeded(&existing, &thursday));

        // Another slot on an already-used day is fine.
        let tuesday = Candidate::new("workshop", "alice", at(12, 14));
        assert!(!limit_exceeded(&existing, &tuesday));

        // Other customers are unaffected.
        let bob = Candidate::new("workshop", "bob", at(14, 10));
        assert!(!limit_exceeded(&existing, &bob));
    }

    #[test]
    fn test_days_in_other_weeks_do_not_count() {
        let existing = vec![
            booking("alice", ResourceKind::Workshop, at(5, 10)),
            booking("alice", ResourceKind::Workshop, at(6, 10)),
            booking("alice", ResourceKind::Workshop, at(7, 10)),
        ];
        // Monday of the following week.
        let next_week = Candidate::new("workshop", "alice", at(11, 10));
        assert!(!limit_exceeded(&existing, &next_week));
    }

    #[test]
    fn test_second_machine_in_same_slot() {
        let t = at(12, 10);
        let existing = vec![booking("alice", ResourceKind::MiniMicrovac, t)];

        assert!(limit_exceeded(&existing, &Candidate::new("polymer extruder", "alice", t)));
        assert!(!limit_exceeded(&existing, &Candidate::new("workshop", "alice", t)));
        assert!(!limit_exceeded(
            &existing,
            &Candidate::new("polymer extruder", "alice", at(12, 11))
        ));
    }

    #[test]
    fn test_workshop_booking_does_not_block_machine() {
        let t = at(12, 10);
        let existing = vec![booking("alice", ResourceKind::Workshop, t)];
        assert!(!limit_exceeded(&existing, &Candidate::new("irradiator", "alice", t)));
    }
}
