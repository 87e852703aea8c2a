//! Admission rules.
//!
//! Admission is a committing check: when a candidate passes, the slot is
//! booked on the first admissible unit before the call returns. Rules are
//! evaluated in a fixed order and the first failing rule decides the outcome:
//!
//! 1. slot alignment, opening hours, booking horizon (see [`crate::slot`])
//! 2. resource name lookup
//! 3. the harvester machine cap (workshops exempt)
//! 4. unit-by-unit rules in catalog order

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use facility_entity::ResourceKind;

use crate::catalog::{Catalog, Occupancy, ResourceUnit};
use crate::rejection::Rejection;
use crate::slot::{self, SLOT_MINUTES};

/// Machines allowed alongside a running lightning harvester.
pub const HARVESTER_MACHINE_CAP: usize = 3;

/// Minutes either side of an irradiator run during which the unit cools down.
pub const IRRADIATOR_COOLDOWN_MINUTES: i64 = 2 * SLOT_MINUTES;

/// Minutes either side of a crusher run during which it recalibrates.
pub const CRUSHER_RECALIBRATION_MINUTES: i64 = 6 * 60;

/// A proposed single-slot booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Catalog name of the requested resource.
    pub resource: &'a str,
    /// Customer the slot would be booked for.
    pub customer: &'a str,
    /// Slot start.
    pub timestamp: NaiveDateTime,
}

impl<'a> Candidate<'a> {
    /// Create a candidate.
    pub fn new(resource: &'a str, customer: &'a str, timestamp: NaiveDateTime) -> Self {
        Self {
            resource,
            customer,
            timestamp,
        }
    }

    /// Whether the candidate is exempt from machine limits.
    pub fn is_workshop(&self) -> bool {
        self.resource == ResourceKind::Workshop.as_str()
    }
}

/// A committed booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admission {
    /// Catalog index of the unit that took the slot.
    pub unit_index: usize,
    /// Resource type booked.
    pub resource: ResourceKind,
    /// Slot start.
    pub timestamp: NaiveDateTime,
}

/// What one unit's rules say about the candidate.
enum UnitVerdict {
    /// Book this unit.
    Book,
    /// This unit is taken; try the next one.
    Next,
    /// No unit of this type can take the slot.
    Exhausted,
    /// Refuse with a unit-specific reason.
    Refuse(Rejection),
}

fn judge_unit(unit: &ResourceUnit, occupancy: &Occupancy, timestamp: NaiveDateTime) -> UnitVerdict {
    match unit.kind {
        ResourceKind::Irradiator => {
            if occupancy.irradiators > 0 {
                UnitVerdict::Exhausted
            } else if unit.any_booked(slot::window(timestamp, IRRADIATOR_COOLDOWN_MINUTES)) {
                UnitVerdict::Refuse(Rejection::IrradiatorCooldown)
            } else {
                UnitVerdict::Book
            }
        }
        ResourceKind::LightningHarvester => {
            if occupancy.machines > HARVESTER_MACHINE_CAP {
                UnitVerdict::Exhausted
            } else if unit.is_booked(timestamp) {
                UnitVerdict::Next
            } else {
                UnitVerdict::Book
            }
        }
        ResourceKind::HighVelocityCrusher => {
            if unit.any_booked(slot::window(timestamp, CRUSHER_RECALIBRATION_MINUTES)) {
                UnitVerdict::Refuse(Rejection::CrusherCooldown)
            } else {
                UnitVerdict::Book
            }
        }
        ResourceKind::Workshop | ResourceKind::MiniMicrovac | ResourceKind::PolymerExtruder => {
            if unit.is_booked(timestamp) {
                UnitVerdict::Next
            } else {
                UnitVerdict::Book
            }
        }
    }
}

impl Catalog {
    /// Validate `candidate` against every rule and, if admissible, book it.
    pub fn admit(
        &mut self,
        candidate: &Candidate<'_>,
        now: NaiveDateTime,
    ) -> Result<Admission, Rejection> {
        let outcome = self.evaluate(candidate, now);
        match &outcome {
            Ok(admission) => debug!(
                resource = %admission.resource,
                unit = admission.unit_index,
                customer = %candidate.customer,
                timestamp = %candidate.timestamp,
                "Slot admitted"
            ),
            Err(rejection) => debug!(
                resource = %candidate.resource,
                customer = %candidate.customer,
                timestamp = %candidate.timestamp,
                reason = rejection.code(),
                "Slot rejected"
            ),
        }
        outcome
    }

    fn evaluate(
        &mut self,
        candidate: &Candidate<'_>,
        now: NaiveDateTime,
    ) -> Result<Admission, Rejection> {
        let timestamp = candidate.timestamp;
        slot::check_slot(timestamp, now)?;

        let occupancy = self.occupancy(timestamp);

        let kind = ResourceKind::from_name(candidate.resource)
            .filter(|kind| self.offers(*kind))
            .ok_or(Rejection::InvalidResourceName)?;

        if occupancy.harvester_running
            && kind.is_machine()
            && occupancy.machines > HARVESTER_MACHINE_CAP
        {
            return Err(Rejection::ResourceUnavailable);
        }

        let mut chosen = None;
        for unit in self.units_of(kind) {
            match judge_unit(unit, &occupancy, timestamp) {
                UnitVerdict::Book => {
                    chosen = Some(unit.index);
                    break;
                }
                UnitVerdict::Next => continue,
                UnitVerdict::Exhausted => break,
                UnitVerdict::Refuse(rejection) => return Err(rejection),
            }
        }

        let unit_index = chosen.ok_or(Rejection::ResourceUnavailable)?;
        let unit = self
            .unit_mut(unit_index)
            .ok_or(Rejection::ResourceUnavailable)?;
        unit.book(timestamp, candidate.customer);

        Ok(Admission {
            unit_index,
            resource: kind,
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    const WORKSHOP: &str = "workshop";
    const MICROVAC: &str = "mini microvac";
    const IRRADIATOR: &str = "irradiator";
    const EXTRUDER: &str = "polymer extruder";
    const CRUSHER: &str = "high velocity crusher";
    const HARVESTER: &str = "1.21 gigawatt lightning harvester";

    /// Monday 2024-03-04 08:00.
    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap()
    }

    /// A slot on Tuesday 2024-03-05.
    fn tuesday(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .unwrap()
    }

    fn admit(catalog: &mut Catalog, resource: &str, customer: &str, t: NaiveDateTime) -> Result<Admission, Rejection> {
        catalog.admit(&Candidate::new(resource, customer, t), now())
    }

    #[test]
    fn test_misaligned_times_are_rejected() {
        let mut catalog = Catalog::standard();
        for minute in [1, 15, 29, 31, 45, 59] {
            let err = admit(&mut catalog, WORKSHOP, "alice", tuesday(10, minute)).unwrap_err();
            assert_eq!(err, Rejection::TimeNotAligned);
            assert!(!err.hold_request_possible());
        }
    }

    #[test]
    fn test_closed_hours_offer_a_hold() {
        let mut catalog = Catalog::standard();
        let err = admit(&mut catalog, WORKSHOP, "alice", tuesday(17, 0)).unwrap_err();
        assert_eq!(err, Rejection::OutsideWorkingHours);
        assert!(err.hold_request_possible());

        let sunday = tuesday(12, 0) + Duration::days(5);
        assert_eq!(
            admit(&mut catalog, WORKSHOP, "alice", sunday),
            Err(Rejection::OutsideWorkingHours)
        );
    }

    #[test]
    fn test_past_and_far_future_are_out_of_range() {
        let mut catalog = Catalog::standard();
        let past = tuesday(10, 0) - Duration::days(7);
        assert_eq!(
            admit(&mut catalog, WORKSHOP, "alice", past),
            Err(Rejection::DateOutOfRange)
        );
        let far = tuesday(10, 0) + Duration::days(35);
        assert_eq!(
            admit(&mut catalog, WORKSHOP, "alice", far),
            Err(Rejection::DateOutOfRange)
        );
    }

    #[test]
    fn test_unknown_resource_name() {
        let mut catalog = Catalog::standard();
        let err = admit(&mut catalog, "flux capacitor", "alice", tuesday(10, 0)).unwrap_err();
        assert_eq!(err, Rejection::InvalidResourceName);
        assert!(!err.hold_request_possible());
    }

    #[test]
    fn test_first_free_unit_wins() {
        let mut catalog = Catalog::standard();
        let t = tuesday(10, 0);
        let first = admit(&mut catalog, WORKSHOP, "alice", t).unwrap();
        let second = admit(&mut catalog, WORKSHOP, "bob", t).unwrap();
        assert_eq!(first.unit_index, 0);
        assert_eq!(second.unit_index, 1);

        let microvac = admit(&mut catalog, MICROVAC, "carol", t).unwrap();
        assert_eq!(microvac.unit_index, 15);
        assert_eq!(catalog.units()[15].customer_at(t), Some("carol"));
    }

    #[test]
    fn test_all_units_taken_is_unavailable() {
        let mut catalog = Catalog::standard();
        let t = tuesday(11, 0);
        admit(&mut catalog, EXTRUDER, "alice", t).unwrap();
        let second = admit(&mut catalog, EXTRUDER, "bob", t).unwrap();
        assert_eq!(second.unit_index, 20);

        let err = admit(&mut catalog, EXTRUDER, "carol", t).unwrap_err();
        assert_eq!(err, Rejection::ResourceUnavailable);
        assert!(err.hold_request_possible());
    }

    #[test]
    fn test_fifteen_workshops_then_unavailable() {
        let mut catalog = Catalog::standard();
        let t = tuesday(9, 0);
        for n in 0..15 {
            let admission = admit(&mut catalog, WORKSHOP, &format!("c{n}"), t).unwrap();
            assert_eq!(admission.unit_index, n);
        }
        assert_eq!(
            admit(&mut catalog, WORKSHOP, "late", t),
            Err(Rejection::ResourceUnavailable)
        );
    }

    #[test]
    fn test_only_one_irradiator_per_slot() {
        let mut catalog = Catalog::standard();
        let t = tuesday(13, 0);
        admit(&mut catalog, IRRADIATOR, "alice", t).unwrap();
        assert_eq!(
            admit(&mut catalog, IRRADIATOR, "bob", t),
            Err(Rejection::ResourceUnavailable)
        );
    }

    #[test]
    fn test_irradiator_cooldown_window() {
        let mut catalog = Catalog::standard();
        let t = tuesday(13, 0);
        admit(&mut catalog, IRRADIATOR, "alice", t).unwrap();

        for offset in [-60, -30, 30, 60] {
            let err = admit(&mut catalog, IRRADIATOR, "bob", t + Duration::minutes(offset)).unwrap_err();
            assert_eq!(err, Rejection::IrradiatorCooldown, "offset {offset}");
            assert!(err.hold_request_possible());
        }

        let later = admit(&mut catalog, IRRADIATOR, "bob", t + Duration::minutes(90)).unwrap();
        assert_eq!(later.unit_index, 16);
        let earlier = admit(&mut catalog, IRRADIATOR, "carol", t - Duration::minutes(90)).unwrap();
        assert_eq!(earlier.unit_index, 16);
    }

    #[test]
    fn test_crusher_recalibration_window() {
        let mut catalog = Catalog::standard();
        let t = tuesday(12, 0);
        admit(&mut catalog, CRUSHER, "alice", t).unwrap();

        for step in -12..=12 {
            let candidate = t + Duration::minutes(step * 30);
            if !slot::within_working_hours(candidate) {
                continue;
            }
            assert_eq!(
                admit(&mut catalog, CRUSHER, "bob", candidate),
                Err(Rejection::CrusherCooldown),
                "step {step}"
            );
        }

        let next_day = t + Duration::days(1);
        assert!(admit(&mut catalog, CRUSHER, "bob", next_day).is_ok());
    }

    #[test]
    fn test_crusher_window_edge_is_inclusive() {
        let mut catalog = Catalog::standard();
        // Wednesday 09:00 and 15:00 are exactly six hours apart.
        let morning = tuesday(9, 0) + Duration::days(1);
        admit(&mut catalog, CRUSHER, "alice", morning).unwrap();
        assert_eq!(
            admit(&mut catalog, CRUSHER, "bob", morning + Duration::hours(6)),
            Err(Rejection::CrusherCooldown)
        );
        assert!(admit(&mut catalog, CRUSHER, "bob", morning + Duration::minutes(390)).is_ok());
    }

    #[test]
    fn test_harvester_admitted_with_three_machines() {
        let mut catalog = Catalog::standard();
        let t = tuesday(14, 0);
        admit(&mut catalog, MICROVAC, "a", t).unwrap();
        admit(&mut catalog, MICROVAC, "b", t).unwrap();
        admit(&mut catalog, EXTRUDER, "c", t).unwrap();
        assert!(admit(&mut catalog, HARVESTER, "d", t).is_ok());
    }

    #[test]
    fn test_harvester_refused_with_four_machines() {
        let mut catalog = Catalog::standard();
        let t = tuesday(14, 0);
        admit(&mut catalog, MICROVAC, "a", t).unwrap();
        admit(&mut catalog, MICROVAC, "b", t).unwrap();
        admit(&mut catalog, EXTRUDER, "c", t).unwrap();
        admit(&mut catalog, EXTRUDER, "d", t).unwrap();
        assert_eq!(
            admit(&mut catalog, HARVESTER, "e", t),
            Err(Rejection::ResourceUnavailable)
        );
    }

    #[test]
    fn test_running_harvester_caps_further_machines() {
        let mut catalog = Catalog::standard();
        let t = tuesday(15, 0);
        admit(&mut catalog, HARVESTER, "h", t).unwrap();
        admit(&mut catalog, MICROVAC, "a", t).unwrap();
        admit(&mut catalog, MICROVAC, "b", t).unwrap();
        admit(&mut catalog, EXTRUDER, "c", t).unwrap();

        assert_eq!(catalog.occupancy(t).machines, 4);
        assert_eq!(
            admit(&mut catalog, EXTRUDER, "d", t),
            Err(Rejection::ResourceUnavailable)
        );
        // Workshops do not count toward the cap.
        assert!(admit(&mut catalog, WORKSHOP, "e", t).is_ok());
    }

    #[test]
    fn test_harvester_is_not_double_booked() {
        let mut catalog = Catalog::standard();
        let t = tuesday(15, 30);
        admit(&mut catalog, HARVESTER, "h", t).unwrap();
        assert_eq!(
            admit(&mut catalog, HARVESTER, "i", t),
            Err(Rejection::ResourceUnavailable)
        );
        assert_eq!(catalog.units()[22].customer_at(t), Some("h"));
    }

    #[test]
    fn test_rejections_leave_catalog_untouched() {
        let mut catalog = Catalog::standard();
        let t = tuesday(10, 0);
        let _ = admit(&mut catalog, WORKSHOP, "alice", tuesday(10, 10));
        let _ = admit(&mut catalog, "flux capacitor", "alice", t);
        assert!(catalog.bookings_at(t).is_empty());
    }
}
