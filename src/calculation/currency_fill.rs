//! Schema-driven currency fill.
//!
//! The fill walks the currency-reference fields a schema declares and sets
//! the resolved currency code on every field that is currently empty. It is
//! a pure function over a passed-in schema description and a
//! [`CurrencyFieldStore`], so it can be exercised without any live form
//! object.

use crate::schema::DocSchema;

/// Read/write access to the currency-reference fields of a document or row.
///
/// The settlement document and its payable rows both implement this; tests
/// can supply a plain map-backed store.
pub trait CurrencyFieldStore {
    /// Returns the current value of a currency-reference field, or `None`
    /// when the field is empty.
    fn currency_field(&self, fieldname: &str) -> Option<&str>;

    /// Writes a currency-reference field.
    fn set_currency_field(&mut self, fieldname: &str, code: &str);
}

/// Sets `code` on every empty currency-reference field the schema declares.
///
/// Fields that already hold a non-empty value are never overwritten. Returns
/// the fieldnames that were filled, in schema order.
///
/// # Example
///
/// ```
/// use fnf_settlement::calculation::fill_currency_fields;
/// use fnf_settlement::models::PayableRow;
/// use fnf_settlement::schema::{DocSchema, FieldDef, FieldType};
///
/// let schema = DocSchema::new(
///     "Full and Final Outstanding Statement",
///     vec![FieldDef::new("currency", FieldType::Link).with_options("Currency")],
/// );
/// let mut row = PayableRow::default();
///
/// let filled = fill_currency_fields(&schema, &mut row, "AED");
/// assert_eq!(filled, vec!["currency".to_string()]);
/// assert_eq!(row.currency.as_deref(), Some("AED"));
/// ```
pub fn fill_currency_fields<S>(schema: &DocSchema, store: &mut S, code: &str) -> Vec<String>
where
    S: CurrencyFieldStore + ?Sized,
{
    let mut filled = Vec::new();
    for fieldname in schema.currency_reference_fields() {
        let empty = store
            .currency_field(fieldname)
            .is_none_or(|value| value.is_empty());
        if empty {
            store.set_currency_field(fieldname, code);
            filled.push(fieldname.to_string());
        }
    }
    filled
}
