//! The facility's physical resource units and their booked slots.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use facility_entity::{Reservation, ResourceKind};

/// One physical unit of a resource type with its own slot book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceUnit {
    /// Position in the catalog, fixed at construction.
    pub index: usize,
    /// Resource type of the unit.
    pub kind: ResourceKind,
    /// Booked slots: slot start to customer.
    bookings: BTreeMap<NaiveDateTime, String>,
}

impl ResourceUnit {
    /// Create an empty unit.
    pub fn new(index: usize, kind: ResourceKind) -> Self {
        Self {
            index,
            kind,
            bookings: BTreeMap::new(),
        }
    }

    /// Whether the unit is booked at `timestamp`.
    pub fn is_booked(&self, timestamp: NaiveDateTime) -> bool {
        self.bookings.contains_key(&timestamp)
    }

    /// Customer holding the unit at `timestamp`.
    pub fn customer_at(&self, timestamp: NaiveDateTime) -> Option<&str> {
        self.bookings.get(&timestamp).map(String::as_str)
    }

    /// Whether any of `slots` is booked on this unit.
    pub fn any_booked(&self, mut slots: impl Iterator<Item = NaiveDateTime>) -> bool {
        slots.any(|slot| self.is_booked(slot))
    }

    /// All booked slots in time order.
    pub fn bookings(&self) -> impl Iterator<Item = (&NaiveDateTime, &String)> {
        self.bookings.iter()
    }

    pub(crate) fn book(&mut self, timestamp: NaiveDateTime, customer: &str) {
        self.bookings.insert(timestamp, customer.to_string());
    }

    pub(crate) fn unbook(&mut self, timestamp: NaiveDateTime) -> Option<String> {
        self.bookings.remove(&timestamp)
    }
}

/// Facility-wide usage at one slot, across every unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Occupancy {
    /// Non-workshop units booked.
    pub machines: usize,
    /// Irradiator units booked.
    pub irradiators: usize,
    /// Whether the lightning harvester is booked.
    pub harvester_running: bool,
}

/// The ordered set of resource units.
///
/// Unit order is the tie-break for admission: the first admissible unit of a
/// resource type always takes the booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    units: Vec<ResourceUnit>,
}

impl Catalog {
    /// Build a catalog from resource types in unit order.
    pub fn from_kinds(kinds: impl IntoIterator<Item = ResourceKind>) -> Self {
        let units = kinds
            .into_iter()
            .enumerate()
            .map(|(index, kind)| ResourceUnit::new(index, kind))
            .collect();
        Self { units }
    }

    /// The facility's standard fit-out.
    ///
    /// 15 workshops; two each of mini microvac, irradiator, and polymer
    /// extruder (interleaved); one high velocity crusher; one lightning
    /// harvester.
    pub fn standard() -> Self {
        let mut kinds = vec![ResourceKind::Workshop; 15];
        for _ in 0..2 {
            kinds.extend([
                ResourceKind::MiniMicrovac,
                ResourceKind::Irradiator,
                ResourceKind::PolymerExtruder,
            ]);
        }
        kinds.push(ResourceKind::HighVelocityCrusher);
        kinds.push(ResourceKind::LightningHarvester);
        Self::from_kinds(kinds)
    }

    /// All units in catalog order.
    pub fn units(&self) -> &[ResourceUnit] {
        &self.units
    }

    /// Units of one resource type in catalog order.
    pub fn units_of(&self, kind: ResourceKind) -> impl Iterator<Item = &ResourceUnit> {
        self.units.iter().filter(move |unit| unit.kind == kind)
    }

    /// Whether the catalog carries at least one unit of `kind`.
    pub fn offers(&self, kind: ResourceKind) -> bool {
        self.units_of(kind).next().is_some()
    }

    pub(crate) fn unit_mut(&mut self, index: usize) -> Option<&mut ResourceUnit> {
        self.units.get_mut(index)
    }

    /// Count facility-wide usage at `timestamp`.
    pub fn occupancy(&self, timestamp: NaiveDateTime) -> Occupancy {
        self.units
            .iter()
            .filter(|unit| unit.is_booked(timestamp))
            .fold(Occupancy::default(), |mut acc, unit| {
                if unit.kind.is_machine() {
                    acc.machines += 1;
                }
                match unit.kind {
                    ResourceKind::Irradiator => acc.irradiators += 1,
                    ResourceKind::LightningHarvester => acc.harvester_running = true,
                    _ => {}
                }
                acc
            })
    }

    /// Units booked at `timestamp` with the customer holding each.
    pub fn bookings_at(&self, timestamp: NaiveDateTime) -> Vec<(&ResourceUnit, &str)> {
        self.units
            .iter()
            .filter_map(|unit| unit.customer_at(timestamp).map(|customer| (unit, customer)))
            .collect()
    }

    /// Free a slot held by `customer` on the first matching unit.
    ///
    /// Returns `false` if no unit of `kind` holds the slot for that customer.
    pub fn release(&mut self, kind: ResourceKind, customer: &str, timestamp: NaiveDateTime) -> bool {
        let target = self
            .units
            .iter_mut()
            .find(|unit| unit.kind == kind && unit.customer_at(timestamp) == Some(customer));

        match target {
            Some(unit) => {
                unit.unbook(timestamp);
                debug!(unit = unit.index, resource = %kind, %customer, %timestamp, "Slot released");
                true
            }
            None => {
                warn!(resource = %kind, %customer, %timestamp, "Attempted to release slot that was not booked");
                false
            }
        }
    }

    /// Re-populate unit slot books from stored reservations.
    ///
    /// Rules are not re-evaluated: stored reservations were admitted when
    /// they were made. Each reservation lands on the first unit of its type
    /// that is free at its slot. Returns the number placed.
    pub fn restore<'a>(&mut self, reservations: impl IntoIterator<Item = &'a Reservation>) -> usize {
        let mut placed = 0;
        for reservation in reservations {
            let free_unit = self.units.iter_mut().find(|unit| {
                unit.kind == reservation.resource && !unit.is_booked(reservation.timestamp)
            });
            match free_unit {
                Some(unit) => {
                    unit.book(reservation.timestamp, &reservation.customer);
                    placed += 1;
                }
                None => warn!(
                    serial_num = %reservation.serial_num,
                    resource = %reservation.resource,
                    timestamp = %reservation.timestamp,
                    "No free unit for stored reservation, skipping"
                ),
            }
        }
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn slot(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .unwrap()
    }

    #[test]
    fn test_standard_fit_out() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.units().len(), 23);
        assert_eq!(catalog.units_of(ResourceKind::Workshop).count(), 15);
        assert_eq!(catalog.units_of(ResourceKind::Irradiator).count(), 2);
        assert_eq!(catalog.units_of(ResourceKind::HighVelocityCrusher).count(), 1);

        let order: Vec<_> = catalog.units()[15..].iter().map(|u| u.kind).collect();
        assert_eq!(
            order,
            vec![
                ResourceKind::MiniMicrovac,
                ResourceKind::Irradiator,
                ResourceKind::PolymerExtruder,
                ResourceKind::MiniMicrovac,
                ResourceKind::Irradiator,
                ResourceKind::PolymerExtruder,
                ResourceKind::HighVelocityCrusher,
                ResourceKind::LightningHarvester,
            ]
        );
        for (position, unit) in catalog.units().iter().enumerate() {
            assert_eq!(unit.index, position);
        }
    }

    #[test]
    fn test_occupancy_counts_machines_only() {
        let mut catalog = Catalog::standard();
        let t = slot(10, 0);
        catalog.unit_mut(0).unwrap().book(t, "alice");
        catalog.unit_mut(16).unwrap().book(t, "bob");
        catalog.unit_mut(22).unwrap().book(t, "carol");

        assert_eq!(
            catalog.occupancy(t),
            Occupancy {
                machines: 2,
                irradiators: 1,
                harvester_running: true,
            }
        );
        assert_eq!(catalog.occupancy(slot(10, 30)), Occupancy::default());
        assert_eq!(catalog.bookings_at(t).len(), 3);
    }

    #[test]
    fn test_release_frees_only_matching_customer() {
        let mut catalog = Catalog::standard();
        let t = slot(11, 0);
        catalog.unit_mut(0).unwrap().book(t, "alice");
        catalog.unit_mut(1).unwrap().book(t, "bob");

        assert!(!catalog.release(ResourceKind::Workshop, "carol", t));
        assert!(catalog.release(ResourceKind::Workshop, "bob", t));
        assert!(catalog.units()[0].is_booked(t));
        assert!(!catalog.units()[1].is_booked(t));
    }

    #[test]
    fn test_restore_places_on_first_free_unit() {
        let mut catalog = Catalog::standard();
        let t = slot(12, 0);
        let stored = vec![
            Reservation::new(t, ResourceKind::Irradiator, "alice", "alice", 1100.0),
            Reservation::new(t, ResourceKind::Irradiator, "bob", "bob", 1100.0),
            Reservation::new(t, ResourceKind::Irradiator, "carol", "carol", 1100.0),
        ];

        assert_eq!(catalog.restore(&stored), 2);
        assert_eq!(catalog.units()[16].customer_at(t), Some("alice"));
        assert_eq!(catalog.units()[19].customer_at(t), Some("bob"));
    }
}
