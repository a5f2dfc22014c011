//! The settlement document model.
//!
//! This module contains the [`SettlementDocument`] type holding the state the
//! controller maintains: employee reference, transaction date, currency
//! fields, the payable rows, the computed total, and the service-duration
//! scalars written from the remote payload.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::CurrencyFieldStore;

use super::PayableRow;

/// Fieldname of the dedicated company-currency field on the parent document.
pub const PARENT_CURRENCY_FIELD: &str = "custom_company_currency";

/// Service duration written from the remote payload.
///
/// Years, months, and days are the broken-down duration between the date of
/// joining and the settlement calculation date; `total_years` is the same
/// span expressed as a fraction of years.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDuration {
    /// Whole years of service.
    pub years: u32,
    /// Whole months of service beyond the full years.
    pub months: u32,
    /// Remaining days of service beyond the full months.
    pub days: u32,
    /// The total span expressed in years (e.g. 2.29).
    pub total_years: Decimal,
}

/// The employee full-and-final settlement record being edited.
///
/// The document carries the typed fields the controller reads and writes,
/// plus a map for any additional currency-reference fields the loaded schema
/// declares beyond the known ones. Rows are wholly replaced on every
/// successful fetch; between fetches they are user-edited in place.
///
/// # Example
///
/// ```
/// use fnf_settlement::models::SettlementDocument;
/// use rust_decimal::Decimal;
///
/// let doc = SettlementDocument::default();
/// assert!(doc.employee.is_none());
/// assert!(doc.payables.is_empty());
/// assert_eq!(doc.total_payable_amount, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementDocument {
    /// The employee the settlement is for; `None` resets the document.
    pub employee: Option<String>,
    /// The settlement transaction date; defaulted to "today" on load.
    pub transaction_date: Option<NaiveDate>,
    /// The dedicated company-currency field ([`PARENT_CURRENCY_FIELD`]).
    pub company_currency: Option<String>,
    /// The ordered payable rows of the settlement breakdown.
    pub payables: Vec<PayableRow>,
    /// Sum of all row amounts.
    pub total_payable_amount: Decimal,
    /// Service duration scalars from the remote payload.
    pub service: ServiceDuration,
    /// Values of schema-declared currency-reference fields not statically
    /// known to this struct, keyed by fieldname. `None` means empty.
    #[serde(default)]
    pub extra_currencies: BTreeMap<String, Option<String>>,
}

impl SettlementDocument {
    /// Clears the payable rows and zeroes the total.
    ///
    /// Service-duration fields and currency fields are left untouched.
    pub fn reset_payables(&mut self) {
        self.payables.clear();
        self.total_payable_amount = Decimal::ZERO;
    }

    /// Returns the rows of a table-typed field by fieldname, if the document
    /// carries such a table.
    pub fn table_rows_mut(&mut self, fieldname: &str) -> Option<&mut Vec<PayableRow>> {
        match fieldname {
            "payables" => Some(&mut self.payables),
            _ => None,
        }
    }
}

impl CurrencyFieldStore for SettlementDocument {
    fn currency_field(&self, fieldname: &str) -> Option<&str> {
        if fieldname == PARENT_CURRENCY_FIELD {
            self.company_currency.as_deref()
        } else {
            self.extra_currencies.get(fieldname)?.as_deref()
        }
    }

    fn set_currency_field(&mut self, fieldname: &str, code: &str) {
        if fieldname == PARENT_CURRENCY_FIELD {
            self.company_currency = Some(code.to_string());
        } else {
            self.extra_currencies
                .insert(fieldname.to_string(), Some(code.to_string()));
        }
    }
}
