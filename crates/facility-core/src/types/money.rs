//! Currency helpers.

/// Round an amount to whole cents, halves to even.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round_ties_even() / 100.0
}
