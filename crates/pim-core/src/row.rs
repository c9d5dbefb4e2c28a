//! Spreadsheet rows as handed over by the ingestion collaborator.
//!
//! Column names are not consistent between screens: the upload sheet uses
//! camelCase keys (`variant`, `productName`) while the image-conversion sheet
//! uses the human-readable headers (`Variant`, `Product Name`).

use serde_json::Value;

/// One spreadsheet row: column name to cell value, in sheet column order.
pub type SheetRow = serde_json::Map<String, Value>;

const VARIANT_KEYS: &[&str] = &["variant", "Variant"];
const PRODUCT_NAME_KEYS: &[&str] = &["productName", "Product Name"];

/// Renders a scalar cell as text. Numbers and booleans are stringified the
/// way a spreadsheet would display them; `null`, arrays and objects yield
/// `None`.
#[must_use]
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn first_text(row: &SheetRow, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| row.get(*k))
        .find_map(value_as_text)
}

/// Returns the raw variant cell, trying `variant` before `Variant`.
#[must_use]
pub fn variant_field(row: &SheetRow) -> Option<String> {
    first_text(row, VARIANT_KEYS)
}

/// Returns the product name cell, trying `productName` before `Product Name`.
#[must_use]
pub fn product_name_field(row: &SheetRow) -> Option<String> {
    first_text(row, PRODUCT_NAME_KEYS).filter(|s| !s.trim().is_empty())
}
