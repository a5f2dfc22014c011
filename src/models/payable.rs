//! The payable row model.
//!
//! A payable row is one line item of the settlement's compensation
//! breakdown. Rows hold the invariant `amount == day_count * rate_per_day`
//! at rest; the controller re-establishes it reactively after edits.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{CurrencyFieldStore, line_amount};

use super::PayableEntry;

/// Fieldname of the row's own currency link.
pub const ROW_CURRENCY_FIELD: &str = "currency";

/// One line item of the settlement's payable breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayableRow {
    /// The payable component name (e.g. "Worked Day", "Leave Encashment").
    pub component: String,
    /// Number of days the component covers. May be fractional.
    pub day_count: Decimal,
    /// Rate paid per day.
    pub rate_per_day: Decimal,
    /// Row amount; `day_count * rate_per_day` at rest.
    pub amount: Decimal,
    /// Doctype of the document this row was derived from, if any.
    pub reference_document_type: Option<String>,
    /// Name of the document this row was derived from, if any.
    pub reference_document: Option<String>,
    /// The row's currency link ([`ROW_CURRENCY_FIELD`]).
    pub currency: Option<String>,
    /// Values of schema-declared currency-reference fields not statically
    /// known to this struct, keyed by fieldname.
    #[serde(default)]
    pub extra_currencies: BTreeMap<String, Option<String>>,
}

impl From<PayableEntry> for PayableRow {
    /// Builds a row from a remote payload entry.
    ///
    /// Numeric fields default to zero, reference fields to `None`. An entry
    /// without an explicit amount gets `day_count * rate_per_day`.
    fn from(entry: PayableEntry) -> Self {
        let amount = entry
            .amount
            .unwrap_or_else(|| line_amount(entry.day_count, entry.rate_per_day));
        Self {
            component: entry.component,
            day_count: entry.day_count,
            rate_per_day: entry.rate_per_day,
            amount,
            reference_document_type: entry.reference_document_type,
            reference_document: entry.reference_document,
            currency: None,
            extra_currencies: BTreeMap::new(),
        }
    }
}

impl CurrencyFieldStore for PayableRow {
    fn currency_field(&self, fieldname: &str) -> Option<&str> {
        if fieldname == ROW_CURRENCY_FIELD {
            self.currency.as_deref()
        } else {
            self.extra_currencies.get(fieldname)?.as_deref()
        }
    }

    fn set_currency_field(&mut self, fieldname: &str, code: &str) {
        if fieldname == ROW_CURRENCY_FIELD {
            self.currency = Some(code.to_string());
        } else {
            self.extra_currencies
                .insert(fieldname.to_string(), Some(code.to_string()));
        }
    }
}
