//! Session-wide default values.
//!
//! The host framework keeps a process-wide key-value store of display
//! defaults (e.g. the currency used to format monetary fields). The
//! controller pushes the resolved settlement currency into that store as a
//! best-effort convenience; a failure there never affects the document
//! itself.

use std::collections::HashMap;

use thiserror::Error;

/// Key under which the session currency default is stored.
pub const CURRENCY_DEFAULT_KEY: &str = "currency";

/// Error returned when a session default cannot be stored.
#[derive(Debug, Error)]
#[error("Failed to update session default '{key}': {message}")]
pub struct DefaultsError {
    /// The key that could not be written.
    pub key: String,
    /// A description of the failure.
    pub message: String,
}

/// A session-wide key-value store of display defaults.
pub trait SessionDefaults {
    /// Stores a default value under a key.
    fn set_default(&mut self, key: &str, value: &str) -> Result<(), DefaultsError>;

    /// Returns the stored default for a key, if any.
    fn get_default(&self, key: &str) -> Option<String>;
}

/// An in-memory [`SessionDefaults`] store.
///
/// # Example
///
/// ```
/// use fnf_settlement::session::{CURRENCY_DEFAULT_KEY, InMemoryDefaults, SessionDefaults};
///
/// let mut defaults = InMemoryDefaults::default();
/// defaults.set_default(CURRENCY_DEFAULT_KEY, "AED").unwrap();
/// assert_eq!(defaults.get_default(CURRENCY_DEFAULT_KEY).as_deref(), Some("AED"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryDefaults {
    values: HashMap<String, String>,
}

impl SessionDefaults for InMemoryDefaults {
    fn set_default(&mut self, key: &str, value: &str) -> Result<(), DefaultsError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_default(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
