//! # Money
//!
//! Display rounding for cart amounts.
//!
//! ## Why f64 prices with integer display totals?
//! Unit prices arrive as IEEE-754 doubles and stay that way through cart
//! math. The only money policy the sales flow carries sits at the display
//! boundary: every rendered line total and the grand total are whole
//! numbers, rounded half away from zero.
//!
//! The grand total rounds the raw sum exactly once. It is NOT the sum of
//! the already-rounded lines; with fractional prices those two numbers can
//! differ by several units.

/// Rounds a raw amount to a whole display amount.
///
/// Ties round half away from zero (`2.5` becomes `3`, `-2.5` becomes `-3`).
/// Amounts in this system are non-negative in practice, so the negative
/// tie-break never shows up on a receipt.
///
/// Non-finite input saturates through the cast (`NaN` becomes 0);
/// registration validation rejects non-finite prices before they can reach
/// cart math.
#[inline]
pub fn round_amount(amount: f64) -> i64 {
    amount.round() as i64
}

/// Raw (unrounded) line total for one cart line.
#[inline]
pub fn line_total(price: f64, quantity: i64) -> f64 {
    price * quantity as f64
}

/// Rounded line total, as rendered on a single cart row.
#[inline]
pub fn rounded_line_total(price: f64, quantity: i64) -> i64 {
    round_amount(line_total(price, quantity))
}
