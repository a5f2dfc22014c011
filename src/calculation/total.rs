//! Document total computation.

use rust_decimal::Decimal;

use crate::models::PayableRow;

/// Sums the amounts of all payable rows.
///
/// This is the document's `total_payable_amount`; the controller re-derives
/// it after every bulk replace and after every row-level edit.
pub fn total_payable(rows: &[PayableRow]) -> Decimal {
    rows.iter().map(|row| row.amount).sum()
}
