//! Schema types for document field metadata.
//!
//! This module contains the strongly-typed schema structures that are
//! deserialized from YAML schema files.

use serde::{Deserialize, Serialize};

/// The type of a document field.
///
/// Mirrors the host framework's field-type vocabulary: `Currency` is a
/// monetary amount, while a *currency reference* is a [`FieldType::Link`]
/// whose options name the `Currency` doctype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Free-form text.
    Data,
    /// A calendar date.
    Date,
    /// An integer.
    Int,
    /// A floating-point number.
    Float,
    /// A monetary amount.
    Currency,
    /// A reference to another document; the target doctype is in `options`.
    Link,
    /// A child table; the row doctype is in `options`.
    Table,
}

/// Metadata for a single document field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// The field's machine name.
    pub fieldname: String,
    /// The field's type.
    pub fieldtype: FieldType,
    /// Target doctype for `Link` and `Table` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

impl FieldDef {
    /// Creates a field definition without options.
    pub fn new(fieldname: impl Into<String>, fieldtype: FieldType) -> Self {
        Self {
            fieldname: fieldname.into(),
            fieldtype,
            options: None,
        }
    }

    /// Sets the options (target doctype) of the field.
    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }

    /// True when the field's value must be a currency code.
    pub fn is_currency_reference(&self) -> bool {
        self.fieldtype == FieldType::Link && self.options.as_deref() == Some("Currency")
    }

    /// True when the field is a child table with a named row doctype.
    pub fn is_table(&self) -> bool {
        self.fieldtype == FieldType::Table && self.options.is_some()
    }
}

/// The field metadata of one document type.
///
/// # Example
///
/// ```
/// use fnf_settlement::schema::{DocSchema, FieldDef, FieldType};
///
/// let schema = DocSchema::new(
///     "Full and Final Statement",
///     vec![
///         FieldDef::new("custom_company_currency", FieldType::Link).with_options("Currency"),
///         FieldDef::new("payables", FieldType::Table)
///             .with_options("Full and Final Outstanding Statement"),
///     ],
/// );
///
/// let currency_fields: Vec<&str> = schema.currency_reference_fields().collect();
/// assert_eq!(currency_fields, vec!["custom_company_currency"]);
///
/// let tables: Vec<(&str, &str)> = schema.table_fields().collect();
/// assert_eq!(tables, vec![("payables", "Full and Final Outstanding Statement")]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocSchema {
    /// The doctype name.
    pub name: String,
    /// The fields of the doctype, in form order.
    pub fields: Vec<FieldDef>,
}

impl DocSchema {
    /// Creates a schema from a doctype name and its fields.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Looks up a field by fieldname.
    pub fn field(&self, fieldname: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.fieldname == fieldname)
    }

    /// Fieldnames of every currency-reference field, in schema order.
    pub fn currency_reference_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.is_currency_reference())
            .map(|f| f.fieldname.as_str())
    }

    /// `(fieldname, row doctype)` for every table field with a named row
    /// doctype, in schema order.
    pub fn table_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().filter(|f| f.is_table()).map(|f| {
            (
                f.fieldname.as_str(),
                f.options.as_deref().unwrap_or_default(),
            )
        })
    }
}
