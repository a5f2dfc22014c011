//! Calculation logic for the settlement controller.
//!
//! This module contains the pure functions the controller composes: row
//! amount recomputation, document total summation, and the schema-driven
//! currency fill applied to the parent document and its table rows.

mod amount;
mod currency_fill;
mod total;

pub use amount::line_amount;
pub use currency_fill::{CurrencyFieldStore, fill_currency_fields};
pub use total::total_payable;
