//! Remote settlement endpoint access.
//!
//! The payable breakdown and service duration are computed server-side by a
//! single whitelisted endpoint. This module defines the [`SettlementApi`]
//! seam the controller calls through, plus an HTTP implementation speaking
//! the host framework's RPC envelope.

mod client;

pub use client::{HttpSettlementApi, SettlementApi};
