//! The settlement document controller.
//!
//! This module wires the fetch-and-apply path, the reset path, and the
//! per-row recompute handlers around one [`SettlementDocument`], gating them
//! on an explicit [`LoadState`] so a fetch in flight drops re-entrant
//! triggers and suppresses reactive recomputation.
//!
//! [`SettlementDocument`]: crate::models::SettlementDocument

mod settlement;
mod state;

pub use settlement::{
    CurrencyPropagation, PAYABLES_TABLE_FIELD, SettlementController, propagate_currency,
};
pub use state::{FetchOutcome, LoadState};
