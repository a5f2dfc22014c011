//! Core data models for the settlement controller.
//!
//! This module contains the settlement document, its payable rows, and the
//! payload types returned by the remote settlement endpoint.

mod document;
mod payable;
mod payload;

pub use document::{PARENT_CURRENCY_FIELD, ServiceDuration, SettlementDocument};
pub use payable::{ROW_CURRENCY_FIELD, PayableRow};
pub use payload::{PayableEntry, PayloadTotals, SettlementPayload};
