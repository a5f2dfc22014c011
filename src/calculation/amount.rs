//! Row amount computation.

use rust_decimal::Decimal;

/// Computes a payable row's amount as `day_count * rate_per_day`.
///
/// Missing inputs are coerced to zero before they reach this function, so a
/// row with no day count or rate yields a zero amount rather than an error.
///
/// # Example
///
/// ```
/// use fnf_settlement::calculation::line_amount;
/// use rust_decimal::Decimal;
///
/// let amount = line_amount(Decimal::from(10), Decimal::from(50));
/// assert_eq!(amount, Decimal::from(500));
/// ```
pub fn line_amount(day_count: Decimal, rate_per_day: Decimal) -> Decimal {
    day_count * rate_per_day
}
