//! Per-row enrichment.

use pim_core::{variant_field, SheetRow};
use pim_variant::{extract_amount, normalize_variant};
use serde_json::Value;

use crate::categorize::Categories;

/// Variant type recorded for every normalized row; packs are described by size.
const VARIANT_TYPE: &str = "Size";

/// Attaches normalized variant fields, categories and the acting user to a
/// row bound for the approval queue.
///
/// Existing columns are kept; `variant`, `variantType`, `amount`,
/// `weightInKg`, `productCategory`, `productSubcategory` and `createdBy` are
/// overwritten. `weightInKg` is `null` when no weight could be derived.
#[must_use]
pub fn enrich_row(mut row: SheetRow, categories: &Categories, created_by: &str) -> SheetRow {
    let canonical = normalize_variant(variant_field(&row).as_deref());

    row.insert(
        "productCategory".to_owned(),
        Value::from(categories.product_category.clone()),
    );
    row.insert(
        "productSubcategory".to_owned(),
        Value::from(categories.product_subcategory.clone()),
    );
    row.insert("variant".to_owned(), Value::from(canonical.label));
    row.insert("variantType".to_owned(), Value::from(VARIANT_TYPE));
    row.insert("amount".to_owned(), Value::from(canonical.multiplier));
    row.insert(
        "weightInKg".to_owned(),
        canonical.weight_kg.map_or(Value::Null, Value::from),
    );
    row.insert("createdBy".to_owned(), Value::from(created_by));
    row
}

/// Rewrites the `Variant` column to its canonical label and fills `Amount`
/// for the image-conversion preview.
///
/// Unlike [`enrich_row`], a label without a readable pack count leaves
/// `Amount` as `null` so the reviewer sees it is missing.
#[must_use]
pub fn preview_row(mut row: SheetRow) -> SheetRow {
    let canonical = normalize_variant(variant_field(&row).as_deref());
    let amount = extract_amount(&canonical.label);

    row.insert("Variant".to_owned(), Value::from(canonical.label));
    row.insert(
        "Amount".to_owned(),
        amount.map_or(Value::Null, Value::from),
    );
    row
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(value: Value) -> SheetRow {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn coffee() -> Categories {
        Categories {
            product_category: "Beverages & Milk".to_string(),
            product_subcategory: "Coffee".to_string(),
        }
    }

    #[test]
    fn enrich_row_attaches_normalized_fields() {
        let input = row(json!({
            "productName": "Nescafe Classic",
            "manufacturerName": "Nestle",
            "variant": "2 X 5KG"
        }));
        let out = enrich_row(input, &coffee(), "ops@example.com");
        assert_eq!(out["variant"], "5KG x 2");
        assert_eq!(out["variantType"], "Size");
        assert_eq!(out["amount"], 2);
        assert_eq!(out["weightInKg"], 10);
        assert_eq!(out["productCategory"], "Beverages & Milk");
        assert_eq!(out["productSubcategory"], "Coffee");
        assert_eq!(out["createdBy"], "ops@example.com");
        assert_eq!(out["manufacturerName"], "Nestle");
    }

    #[test]
    fn enrich_row_unknown_unit_leaves_weight_null() {
        let input = row(json!({"productName": "Paper Towels", "variant": "12 rolls"}));
        let out = enrich_row(input, &Categories::unknown(), "ops@example.com");
        assert_eq!(out["variant"], "12ROLLS");
        assert_eq!(out["amount"], 1);
        assert!(out["weightInKg"].is_null());
    }

    #[test]
    fn enrich_row_without_variant_column() {
        let input = row(json!({"productName": "Mystery"}));
        let out = enrich_row(input, &Categories::unknown(), "ops@example.com");
        assert_eq!(out["variant"], "");
        assert_eq!(out["amount"], 1);
        assert!(out["weightInKg"].is_null());
    }

    #[test]
    fn enrich_row_reads_header_style_variant() {
        let input = row(json!({"Product Name": "Peak Milk", "Variant": "400G x 12"}));
        let out = enrich_row(input, &Categories::unknown(), "ops@example.com");
        assert_eq!(out["variant"], "400G x 12");
        assert_eq!(out["weightInKg"], 5);
    }

    #[test]
    fn preview_row_rewrites_variant_and_amount() {
        let input = row(json!({"Product Name": "Peak Milk", "Variant": "12 x 400g"}));
        let out = preview_row(input);
        assert_eq!(out["Variant"], "400G x 12");
        assert_eq!(out["Amount"], 12);
    }

    #[test]
    fn preview_row_single_unit_has_null_amount() {
        let input = row(json!({"Variant": "500G"}));
        let out = preview_row(input);
        assert_eq!(out["Variant"], "500G");
        assert!(out["Amount"].is_null());
    }

    #[test]
    fn enrich_row_keeps_sheet_columns_first_and_in_order() {
        let input = row(json!({
            "productName": "Peak Milk",
            "variant": "12 x 400g",
            "brand": "Peak",
            "manufacturerName": "FrieslandCampina"
        }));
        let out = enrich_row(input, &Categories::unknown(), "ops@example.com");
        let keys: Vec<&str> = out.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "productName",
                "variant",
                "brand",
                "manufacturerName",
                "productCategory",
                "productSubcategory",
                "variantType",
                "amount",
                "weightInKg",
                "createdBy",
            ]
        );
    }
}
