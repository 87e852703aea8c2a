//! Booking cost and cancellation refunds.

use chrono::{Datelike, Duration, NaiveDateTime, Weekday};

use facility_core::types::round_cents;
use facility_entity::{Reservation, ResourceKind};

/// Days ahead beyond which a booking earns the advance discount.
pub const ADVANCE_DISCOUNT_DAYS: i64 = 14;

/// Price multiplier for bookings made well in advance.
pub const ADVANCE_DISCOUNT_RATE: f64 = 0.75;

/// Cost of booking one slot of `kind` at `timestamp`, as seen at `now`.
pub fn calculate_cost(kind: ResourceKind, timestamp: NaiveDateTime, now: NaiveDateTime) -> f64 {
    let rate = if timestamp - Duration::days(ADVANCE_DISCOUNT_DAYS) > now {
        ADVANCE_DISCOUNT_RATE
    } else {
        1.0
    };
    round_cents(kind.base_price() * rate)
}

/// Refund share for cancelling a slot at `timestamp` at `now`.
///
/// Half the cost comes back when cancelling more than two days out, or more
/// than three days out for a Monday or Tuesday slot. The three-quarter tier
/// is shadowed by the half tier and never applies.
fn refund_rate(timestamp: NaiveDateTime, now: NaiveDateTime) -> f64 {
    let early_week = matches!(timestamp.weekday(), Weekday::Mon | Weekday::Tue);
    if timestamp - Duration::days(2) > now
        || (early_week && timestamp - Duration::days(3) > now)
    {
        0.5
    } else if timestamp - Duration::days(7) > now {
        0.75
    } else {
        0.0
    }
}

/// Amount refunded when `reservation` is cancelled at `now`.
pub fn calculate_refund(reservation: &Reservation, now: NaiveDateTime) -> f64 {
    round_cents(reservation.cost * refund_rate(reservation.timestamp, now))
}
