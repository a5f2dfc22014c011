//! Integration tests for the settlement controller.
//!
//! These tests drive the public API end to end with schemas loaded from
//! `./config/full_and_final` and a scripted remote endpoint:
//! - Fetch-and-apply of a server payload
//! - Row edits and total recomputation
//! - Business rejections leaving prior state intact
//! - Reset on employee clearing
//! - Currency propagation across fetches
//! - The total invariant as a property over arbitrary row sets

use std::collections::VecDeque;
use std::str::FromStr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use fnf_settlement::calculation::{CurrencyFieldStore, total_payable};
use fnf_settlement::controller::{FetchOutcome, LoadState, SettlementController};
use fnf_settlement::error::ControllerResult;
use fnf_settlement::models::{PayableEntry, PayableRow, SettlementPayload};
use fnf_settlement::remote::SettlementApi;
use fnf_settlement::schema::SchemaRegistry;
use fnf_settlement::session::{CURRENCY_DEFAULT_KEY, InMemoryDefaults, SessionDefaults};

// =============================================================================
// Test Helpers
// =============================================================================

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn load_registry() -> SchemaRegistry {
    SchemaRegistry::load("./config/full_and_final").expect("Failed to load schemas")
}

fn march_31() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
}

/// Remote endpoint double serving scripted payloads in order.
struct MockApi {
    responses: Mutex<VecDeque<Option<SettlementPayload>>>,
    calls: Arc<AtomicUsize>,
}

impl MockApi {
    fn new(responses: Vec<Option<SettlementPayload>>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let api = Self {
            responses: Mutex::new(responses.into()),
            calls: Arc::clone(&calls),
        };
        (api, calls)
    }
}

#[async_trait]
impl SettlementApi for MockApi {
    async fn get_full_and_final_payload(
        &self,
        _employee: &str,
        _transaction_date: Option<NaiveDate>,
    ) -> ControllerResult<Option<SettlementPayload>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted payload left"))
    }
}

fn notice_pay_payload() -> SettlementPayload {
    serde_json::from_value(serde_json::json!({
        "ok": true,
        "company_currency": "AED",
        "payables": [
            {"component": "Notice Pay", "day_count": 10, "rate_per_day": 50}
        ],
        "service_years": 2,
        "service_months": 3,
        "service_days": 15,
        "total_years": 2.29
    }))
    .unwrap()
}

fn controller_with(
    responses: Vec<Option<SettlementPayload>>,
) -> (
    SettlementController<MockApi, InMemoryDefaults>,
    Arc<AtomicUsize>,
) {
    let (api, calls) = MockApi::new(responses);
    let controller = SettlementController::new(api, InMemoryDefaults::default(), load_registry());
    (controller, calls)
}

// =============================================================================
// Fetch-and-apply
// =============================================================================

#[tokio::test]
async fn test_worked_example_payload_is_applied() {
    let (mut controller, calls) = controller_with(vec![Some(notice_pay_payload())]);

    controller.on_load(march_31()).await.unwrap();
    let outcome = controller
        .employee_changed(Some("HR-EMP-00042".to_string()))
        .await
        .unwrap();

    assert_eq!(outcome, FetchOutcome::Applied);
    assert_eq!(controller.state(), LoadState::Populated);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let doc = controller.document();
    assert_eq!(doc.payables.len(), 1);
    assert_eq!(doc.payables[0].component, "Notice Pay");
    assert_eq!(doc.payables[0].amount, dec("500"));
    assert_eq!(doc.total_payable_amount, dec("500"));
    assert_eq!(doc.company_currency.as_deref(), Some("AED"));
    assert_eq!(doc.service.years, 2);
    assert_eq!(doc.service.months, 3);
    assert_eq!(doc.service.days, 15);
    assert_eq!(doc.service.total_years, dec("2.29"));
}

#[tokio::test]
async fn test_on_load_defaults_transaction_date_to_today() {
    let (mut controller, calls) = controller_with(vec![]);

    let outcome = controller.on_load(march_31()).await.unwrap();

    assert_eq!(outcome, FetchOutcome::Skipped);
    assert_eq!(controller.document().transaction_date, Some(march_31()));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_row_currency_links_follow_company_currency() {
    let (mut controller, _) = controller_with(vec![Some(notice_pay_payload())]);

    controller
        .employee_changed(Some("HR-EMP-00042".to_string()))
        .await
        .unwrap();

    let doc = controller.document();
    assert_eq!(doc.payables[0].currency.as_deref(), Some("AED"));
    // Non-currency links are not touched by the fill.
    assert!(doc.payables[0].reference_document_type.is_none());
    // The session display default follows the resolved currency.
    assert_eq!(
        controller.defaults().get_default(CURRENCY_DEFAULT_KEY).as_deref(),
        Some("AED")
    );
}

#[tokio::test]
async fn test_rejection_keeps_prior_state() {
    let rejection: SettlementPayload = serde_json::from_value(serde_json::json!({
        "ok": false,
        "msg": "Relieving Date is required."
    }))
    .unwrap();
    let (mut controller, calls) =
        controller_with(vec![Some(notice_pay_payload()), Some(rejection)]);
    controller
        .employee_changed(Some("HR-EMP-00042".to_string()))
        .await
        .unwrap();

    let outcome = controller.transaction_date_changed(march_31()).await.unwrap();

    assert_eq!(
        outcome,
        FetchOutcome::Rejected {
            message: "Relieving Date is required.".to_string()
        }
    );
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    // Rows, total, and service fields are exactly as the first fetch left them.
    let doc = controller.document();
    assert_eq!(doc.payables.len(), 1);
    assert_eq!(doc.total_payable_amount, dec("500"));
    assert_eq!(doc.service.years, 2);
    assert_eq!(controller.state(), LoadState::Populated);
}

#[tokio::test]
async fn test_missing_payload_shows_fallback_message() {
    let (mut controller, _) = controller_with(vec![None]);

    let outcome = controller
        .employee_changed(Some("HR-EMP-00042".to_string()))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        FetchOutcome::Rejected {
            message: "Calculation failed.".to_string()
        }
    );
    assert!(controller.document().payables.is_empty());
}

#[tokio::test]
async fn test_refetch_replaces_rows_without_duplicates() {
    let second: SettlementPayload = serde_json::from_value(serde_json::json!({
        "ok": true,
        "company_currency": "AED",
        "payables": [
            {
                "component": "Worked Day",
                "day_count": 30,
                "rate_per_day": 100,
                "reference_document_type": "Salary Structure Assignment",
                "reference_document": "SSA-0007"
            },
            {"component": "Leave Encashment", "day_count": 12.5, "rate_per_day": 100}
        ],
        "totals": {"total_payable": 4250},
        "service_years": 3,
        "service_months": 0,
        "service_days": 1,
        "total_years": 3.01
    }))
    .unwrap();
    let (mut controller, _) = controller_with(vec![Some(notice_pay_payload()), Some(second)]);
    controller
        .employee_changed(Some("HR-EMP-00042".to_string()))
        .await
        .unwrap();

    controller.transaction_date_changed(march_31()).await.unwrap();

    let doc = controller.document();
    assert_eq!(doc.payables.len(), 2);
    assert_eq!(doc.payables[0].amount, dec("3000"));
    assert_eq!(doc.payables[1].amount, dec("1250.0"));
    assert_eq!(doc.total_payable_amount, dec("4250.0"));
    assert_eq!(
        doc.payables[0].reference_document.as_deref(),
        Some("SSA-0007")
    );
    assert_eq!(doc.service.years, 3);
}

// =============================================================================
// Reset
// =============================================================================

#[tokio::test]
async fn test_clearing_employee_always_empties_document() {
    let (mut controller, calls) = controller_with(vec![Some(notice_pay_payload())]);
    controller
        .employee_changed(Some("HR-EMP-00042".to_string()))
        .await
        .unwrap();

    let outcome = controller.employee_changed(None).await.unwrap();

    assert_eq!(outcome, FetchOutcome::Reset);
    assert_eq!(controller.state(), LoadState::Empty);
    assert!(controller.document().payables.is_empty());
    assert_eq!(controller.document().total_payable_amount, Decimal::ZERO);
    // Clearing triggers no fetch.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Row recompute
// =============================================================================

#[tokio::test]
async fn test_day_count_edit_updates_amount_and_total_locally() {
    let (mut controller, calls) = controller_with(vec![Some(notice_pay_payload())]);
    controller
        .employee_changed(Some("HR-EMP-00042".to_string()))
        .await
        .unwrap();
    let total_before = controller.document().total_payable_amount;

    controller.day_count_changed(0, dec("12")).unwrap();

    let doc = controller.document();
    assert_eq!(doc.payables[0].amount, dec("600"));
    assert_eq!(doc.total_payable_amount, total_before + dec("100"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_direct_amount_edit_resums_total() {
    let (mut controller, _) = controller_with(vec![Some(notice_pay_payload())]);
    controller
        .employee_changed(Some("HR-EMP-00042".to_string()))
        .await
        .unwrap();

    controller.amount_changed(0, dec("123.45")).unwrap();

    assert_eq!(controller.document().total_payable_amount, dec("123.45"));
}

// =============================================================================
// Currency propagation
// =============================================================================

#[tokio::test]
async fn test_propagation_never_overwrites_filled_fields() {
    let usd_payload: SettlementPayload = serde_json::from_value(serde_json::json!({
        "ok": true,
        "company_currency": "USD",
        "payables": [
            {"component": "Worked Day", "day_count": 1, "rate_per_day": 10}
        ]
    }))
    .unwrap();
    let (mut controller, _) =
        controller_with(vec![Some(notice_pay_payload()), Some(usd_payload)]);
    controller
        .employee_changed(Some("HR-EMP-00042".to_string()))
        .await
        .unwrap();
    assert_eq!(
        controller.document().company_currency.as_deref(),
        Some("AED")
    );

    controller.transaction_date_changed(march_31()).await.unwrap();

    let doc = controller.document();
    // The dedicated parent field is overwritten with the newly resolved code,
    // and freshly rebuilt rows carry it.
    assert_eq!(doc.company_currency.as_deref(), Some("USD"));
    assert_eq!(doc.payables[0].currency.as_deref(), Some("USD"));
}

#[test]
fn test_schema_files_declare_expected_capabilities() {
    let registry = load_registry();

    let currency_fields: Vec<&str> = registry.parent().currency_reference_fields().collect();
    assert_eq!(currency_fields, vec!["custom_company_currency"]);

    let tables: Vec<(&str, &str)> = registry.parent().table_fields().collect();
    assert_eq!(
        tables,
        vec![("payables", "Full and Final Outstanding Statement")]
    );

    let rows = registry
        .child("Full and Final Outstanding Statement")
        .unwrap();
    let row_currency_fields: Vec<&str> = rows.currency_reference_fields().collect();
    assert_eq!(row_currency_fields, vec!["currency"]);
}

#[test]
fn test_fill_respects_existing_row_values() {
    let registry = load_registry();
    let rows_schema = registry.child_for_table("payables").unwrap();

    let mut row = PayableRow {
        component: "Worked Day".to_string(),
        currency: Some("USD".to_string()),
        ..PayableRow::default()
    };
    let filled =
        fnf_settlement::calculation::fill_currency_fields(rows_schema, &mut row, "AED");

    assert!(filled.is_empty());
    assert_eq!(row.currency_field("currency"), Some("USD"));
}

// =============================================================================
// Total invariant
// =============================================================================

proptest! {
    /// For all row sets, the document total equals the sum of
    /// `day_count * rate_per_day` over rows built from payload entries.
    #[test]
    fn prop_total_equals_sum_of_row_amounts(
        inputs in prop::collection::vec((0u32..2000, 0u32..500_000), 0..24)
    ) {
        let rows: Vec<PayableRow> = inputs
            .iter()
            .map(|(days, rate_cents)| {
                PayableRow::from(PayableEntry {
                    component: "Worked Day".to_string(),
                    day_count: Decimal::from(*days),
                    rate_per_day: Decimal::from(*rate_cents) / Decimal::from(100),
                    ..PayableEntry::default()
                })
            })
            .collect();

        let expected: Decimal = rows
            .iter()
            .map(|row| row.day_count * row.rate_per_day)
            .sum();

        prop_assert_eq!(total_payable(&rows), expected);
    }
}
