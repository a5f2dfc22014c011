//! The settlement controller implementation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{fill_currency_fields, line_amount, total_payable};
use crate::error::{ControllerError, ControllerResult};
use crate::models::{PayableRow, ServiceDuration, SettlementDocument, SettlementPayload};
use crate::remote::SettlementApi;
use crate::schema::SchemaRegistry;
use crate::session::{CURRENCY_DEFAULT_KEY, SessionDefaults};

use super::state::{FetchOutcome, LoadState};

/// Fieldname of the payables child table on the parent document.
pub const PAYABLES_TABLE_FIELD: &str = "payables";

/// Message shown when the endpoint rejects without a message of its own.
const FALLBACK_REJECTION: &str = "Calculation failed.";

/// Explicit result of a currency-propagation pass.
///
/// Propagation reports what it resolved and filled instead of reaching into
/// ambient session state; the controller decides whether to push the
/// resolved code into the session defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyPropagation {
    /// The currency code that was propagated.
    pub resolved: String,
    /// Parent fields that were empty and got filled.
    pub parent_fields_filled: Vec<String>,
    /// Number of row fields filled across all child tables.
    pub row_fields_filled: usize,
}

/// Propagates a resolved currency code across the document.
///
/// Overwrites the dedicated parent currency field, fills every other empty
/// currency-reference field the parent schema declares, then does the same
/// for each row of every table field. Non-empty fields are never
/// overwritten. The document is untouched when a table's row schema is
/// missing from the registry.
pub fn propagate_currency(
    schema: &SchemaRegistry,
    doc: &mut SettlementDocument,
    code: &str,
) -> ControllerResult<CurrencyPropagation> {
    // Resolve every row schema up front so a bad registry cannot leave the
    // document half-propagated.
    let mut tables = Vec::new();
    for (fieldname, doctype) in schema.parent().table_fields() {
        tables.push((fieldname, schema.child(doctype)?));
    }

    doc.company_currency = Some(code.to_string());
    let parent_fields_filled = fill_currency_fields(schema.parent(), doc, code);

    let mut row_fields_filled = 0;
    for (fieldname, child) in tables {
        if let Some(rows) = doc.table_rows_mut(fieldname) {
            for row in rows.iter_mut() {
                row_fields_filled += fill_currency_fields(child, row, code).len();
            }
        }
    }

    Ok(CurrencyPropagation {
        resolved: code.to_string(),
        parent_fields_filled,
        row_fields_filled,
    })
}

/// Drives one settlement document.
///
/// The controller reacts to the host's field-change events: load, employee
/// change, and transaction-date change trigger a fetch of the remote
/// payload; edits to a payable row's day count, rate, or amount trigger
/// local recomputation. A [`LoadState`] on the instance drops re-entrant
/// fetch triggers and suppresses row recomputation while a payload is being
/// applied.
///
/// # Example
///
/// ```no_run
/// use fnf_settlement::controller::SettlementController;
/// use fnf_settlement::remote::HttpSettlementApi;
/// use fnf_settlement::schema::SchemaRegistry;
/// use fnf_settlement::session::InMemoryDefaults;
/// use chrono::NaiveDate;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let api = HttpSettlementApi::new("https://erp.example.com", "hr.api.fnf")?;
/// let schema = SchemaRegistry::load("./config/full_and_final")?;
/// let mut controller = SettlementController::new(api, InMemoryDefaults::default(), schema);
///
/// let today = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
/// controller.on_load(today).await?;
/// controller.employee_changed(Some("HR-EMP-00042".to_string())).await?;
/// # Ok(())
/// # }
/// ```
pub struct SettlementController<A, D> {
    api: A,
    defaults: D,
    schema: SchemaRegistry,
    doc: SettlementDocument,
    state: LoadState,
}

impl<A, D> SettlementController<A, D>
where
    A: SettlementApi,
    D: SessionDefaults,
{
    /// Creates a controller over an empty document.
    pub fn new(api: A, defaults: D, schema: SchemaRegistry) -> Self {
        Self {
            api,
            defaults,
            schema,
            doc: SettlementDocument::default(),
            state: LoadState::Empty,
        }
    }

    /// The document being driven.
    pub fn document(&self) -> &SettlementDocument {
        &self.doc
    }

    /// The current load state.
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// The session defaults store.
    pub fn defaults(&self) -> &D {
        &self.defaults
    }

    /// Handles the document-load event.
    ///
    /// Defaults the transaction date to `today` when unset, then fetches if
    /// an employee is already set.
    pub async fn on_load(&mut self, today: NaiveDate) -> ControllerResult<FetchOutcome> {
        if self.doc.transaction_date.is_none() {
            self.doc.transaction_date = Some(today);
        }
        if self.doc.employee.is_some() {
            self.refresh().await
        } else {
            Ok(FetchOutcome::Skipped)
        }
    }

    /// Handles an employee field change.
    ///
    /// An empty employee resets the document instead of fetching.
    pub async fn employee_changed(
        &mut self,
        employee: Option<String>,
    ) -> ControllerResult<FetchOutcome> {
        self.doc.employee = employee.filter(|name| !name.is_empty());
        if self.doc.employee.is_none() {
            return Ok(self.reset());
        }
        self.refresh().await
    }

    /// Handles a transaction-date field change.
    pub async fn transaction_date_changed(
        &mut self,
        date: NaiveDate,
    ) -> ControllerResult<FetchOutcome> {
        self.doc.transaction_date = Some(date);
        if self.doc.employee.is_none() {
            return Ok(FetchOutcome::Skipped);
        }
        self.refresh().await
    }

    /// Handles an edit to a row's day count.
    ///
    /// The value is stored either way; recomputation is suppressed while a
    /// fetch is rebuilding the table.
    pub fn day_count_changed(&mut self, index: usize, value: Decimal) -> ControllerResult<()> {
        let suppressed = self.state.is_loading();
        let row = self.row_mut(index)?;
        row.day_count = value;
        if !suppressed {
            self.recompute_row(index);
        }
        Ok(())
    }

    /// Handles an edit to a row's rate per day.
    pub fn rate_per_day_changed(&mut self, index: usize, value: Decimal) -> ControllerResult<()> {
        let suppressed = self.state.is_loading();
        let row = self.row_mut(index)?;
        row.rate_per_day = value;
        if !suppressed {
            self.recompute_row(index);
        }
        Ok(())
    }

    /// Handles a direct edit to a row's amount.
    ///
    /// Covers both user edits and the write performed by
    /// [`day_count_changed`](Self::day_count_changed) /
    /// [`rate_per_day_changed`](Self::rate_per_day_changed); only the total
    /// is re-derived.
    pub fn amount_changed(&mut self, index: usize, value: Decimal) -> ControllerResult<()> {
        let suppressed = self.state.is_loading();
        let row = self.row_mut(index)?;
        row.amount = value;
        if !suppressed {
            self.update_total();
        }
        Ok(())
    }

    fn row_mut(&mut self, index: usize) -> ControllerResult<&mut PayableRow> {
        self.doc
            .payables
            .get_mut(index)
            .ok_or(ControllerError::RowNotFound { index })
    }

    /// Recomputes one row's amount, re-aligns its currency links, and
    /// re-derives the total.
    fn recompute_row(&mut self, index: usize) {
        // Parent currency, falling back to the session default.
        let currency = self
            .doc
            .company_currency
            .clone()
            .filter(|code| !code.is_empty())
            .or_else(|| self.defaults.get_default(CURRENCY_DEFAULT_KEY));

        let child = self.schema.child_for_table(PAYABLES_TABLE_FIELD).ok();
        if let Some(row) = self.doc.payables.get_mut(index) {
            row.amount = line_amount(row.day_count, row.rate_per_day);
            if let (Some(code), Some(child)) = (currency.as_deref(), child) {
                fill_currency_fields(child, row, code);
            }
        }
        self.update_total();
    }

    fn update_total(&mut self) {
        self.doc.total_payable_amount = total_payable(&self.doc.payables);
    }

    /// Clears the payables and zeroes the total.
    fn reset(&mut self) -> FetchOutcome {
        self.doc.reset_payables();
        self.state = LoadState::Empty;
        debug!("Document reset: employee cleared");
        FetchOutcome::Reset
    }

    /// Fetches the payload and applies it to the document.
    ///
    /// A trigger while a fetch is already in flight is dropped, not queued.
    /// The load state is restored on every non-applied exit path, so a
    /// failed fetch leaves the document in its last-known state.
    async fn refresh(&mut self) -> ControllerResult<FetchOutcome> {
        if self.state.is_loading() {
            debug!("Fetch already in flight; trigger dropped");
            return Ok(FetchOutcome::Skipped);
        }
        let Some(employee) = self.doc.employee.clone() else {
            return Ok(self.reset());
        };

        let correlation_id = Uuid::new_v4();
        let prior = self.state;
        self.state = LoadState::Loading;
        info!(
            correlation_id = %correlation_id,
            employee = %employee,
            transaction_date = ?self.doc.transaction_date,
            "Fetching settlement payload"
        );

        let fetched = self
            .api
            .get_full_and_final_payload(&employee, self.doc.transaction_date)
            .await;

        let payload = match fetched {
            Ok(Some(payload)) if payload.ok => payload,
            Ok(rejected) => {
                self.state = prior;
                let message = rejected
                    .and_then(|payload| payload.msg)
                    .unwrap_or_else(|| FALLBACK_REJECTION.to_string());
                warn!(
                    correlation_id = %correlation_id,
                    message = %message,
                    "Settlement fetch rejected"
                );
                return Ok(FetchOutcome::Rejected { message });
            }
            Err(err) => {
                self.state = prior;
                warn!(
                    correlation_id = %correlation_id,
                    error = %err,
                    "Settlement fetch failed"
                );
                return Err(err);
            }
        };

        match self.apply_payload(payload) {
            Ok(()) => {
                self.state = LoadState::Populated;
                info!(
                    correlation_id = %correlation_id,
                    rows = self.doc.payables.len(),
                    total = %self.doc.total_payable_amount,
                    "Settlement payload applied"
                );
                Ok(FetchOutcome::Applied)
            }
            Err(err) => {
                self.state = prior;
                Err(err)
            }
        }
    }

    /// Applies a successful payload: currency, rows, total, service fields.
    fn apply_payload(&mut self, payload: SettlementPayload) -> ControllerResult<()> {
        if let Some(code) = payload.company_currency.as_deref() {
            let propagation = propagate_currency(&self.schema, &mut self.doc, code)?;
            debug!(
                resolved = %propagation.resolved,
                parent_fields = propagation.parent_fields_filled.len(),
                row_fields = propagation.row_fields_filled,
                "Currency propagated"
            );
            // Optional convenience; the document fields are already set.
            if let Err(err) = self
                .defaults
                .set_default(CURRENCY_DEFAULT_KEY, &propagation.resolved)
            {
                debug!(error = %err, "Session currency default not updated");
            }
        }

        // Wholly replace the payables table.
        let row_schema = self
            .schema
            .child_for_table(PAYABLES_TABLE_FIELD)
            .ok()
            .cloned();
        let row_currency = payload.company_currency.clone();
        self.doc.payables.clear();
        for entry in payload.payables {
            let mut row = PayableRow::from(entry);
            if let (Some(code), Some(child)) = (row_currency.as_deref(), row_schema.as_ref()) {
                fill_currency_fields(child, &mut row, code);
            }
            self.doc.payables.push(row);
        }

        self.update_total();
        if let Some(totals) = payload.totals
            && totals.total_payable != self.doc.total_payable_amount
        {
            warn!(
                server_total = %totals.total_payable,
                local_total = %self.doc.total_payable_amount,
                "Server total disagrees with local sum; keeping the local sum"
            );
        }

        self.doc.service = ServiceDuration {
            years: payload.service_years,
            months: payload.service_months,
            days: payload.service_days,
            total_years: payload.total_years,
        };
        Ok(())
    }
}
