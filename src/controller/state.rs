//! Controller load state and fetch outcomes.

/// The document's load state.
///
/// The state lives on the controller instance, so two open documents never
/// share it. It is the sole mutual-exclusion primitive between the bulk
/// fetch-and-apply path and the per-row recompute path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    /// No payload applied; the payables table is empty.
    #[default]
    Empty,
    /// A fetch is in flight. Further triggers are dropped, and row-level
    /// recompute is suppressed.
    Loading,
    /// A payload has been applied.
    Populated,
}

impl LoadState {
    /// True while a fetch is in flight.
    pub fn is_loading(self) -> bool {
        self == LoadState::Loading
    }
}

/// What a fetch trigger did.
///
/// Business rejections surface here rather than as errors so the caller can
/// show the message and keep the prior document state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The payload was fetched and applied.
    Applied,
    /// The endpoint rejected the request or returned no payload; the
    /// document was left untouched.
    Rejected {
        /// User-facing message to display.
        message: String,
    },
    /// The employee was cleared and the document reset.
    Reset,
    /// The trigger was dropped (fetch already in flight, or nothing to do).
    Skipped,
}
