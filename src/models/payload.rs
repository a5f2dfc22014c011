//! Payload types returned by the remote settlement endpoint.
//!
//! The endpoint computes the payable breakdown and service duration
//! server-side and returns them in one JSON payload. Business rejections
//! arrive as `ok: false` with a user-facing `msg`; every other field is
//! optional and coerced with zero/`None` defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The payload of one `get_full_and_final_payload` call.
///
/// # Example
///
/// ```
/// use fnf_settlement::models::SettlementPayload;
///
/// let payload: SettlementPayload = serde_json::from_str(
///     r#"{"ok": false, "msg": "Employee is still Active."}"#,
/// ).unwrap();
/// assert!(!payload.ok);
/// assert_eq!(payload.msg.as_deref(), Some("Employee is still Active."));
/// assert!(payload.payables.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPayload {
    /// Whether the server accepted the calculation request.
    pub ok: bool,
    /// User-facing rejection message when `ok` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// Default currency of the employee's company.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_currency: Option<String>,
    /// The payable components to rebuild the child table from.
    #[serde(default)]
    pub payables: Vec<PayableEntry>,
    /// Server-side totals, cross-checked against the local sum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<PayloadTotals>,
    /// Whole years of service.
    #[serde(default)]
    pub service_years: u32,
    /// Whole months of service beyond the full years.
    #[serde(default)]
    pub service_months: u32,
    /// Remaining days of service beyond the full months.
    #[serde(default)]
    pub service_days: u32,
    /// Total service span expressed in years.
    #[serde(default)]
    pub total_years: Decimal,
}

/// Totals the server computed alongside the payable entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadTotals {
    /// The server's sum over the payable entries.
    #[serde(default)]
    pub total_payable: Decimal,
}

/// One payable component in the remote payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayableEntry {
    /// The component name.
    pub component: String,
    /// Number of days, defaulting to zero.
    #[serde(default)]
    pub day_count: Decimal,
    /// Rate per day, defaulting to zero.
    #[serde(default)]
    pub rate_per_day: Decimal,
    /// Explicit amount; absent entries get `day_count * rate_per_day`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Doctype of the backing document, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_document_type: Option<String>,
    /// Name of the backing document, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_document: Option<String>,
}
