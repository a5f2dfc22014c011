//! Document-schema abstraction.
//!
//! The host framework describes every document type through field metadata.
//! This module models that metadata as plain data loaded from YAML files and
//! answers capability queries over it — "which fields are currency
//! references", "which fields are child tables" — without touching any live
//! form object.

mod loader;
mod types;

pub use loader::SchemaRegistry;
pub use types::{DocSchema, FieldDef, FieldType};
