//! Category suggestions for product names.
//!
//! The classifier itself is an external collaborator; this module only
//! defines the seam and the reply format it speaks.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::CategorizeError;

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Categories {
    pub product_category: String,
    pub product_subcategory: String,
}

impl Categories {
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            product_category: UNKNOWN.to_string(),
            product_subcategory: UNKNOWN.to_string(),
        }
    }
}

/// Suggests a category and subcategory for a product name.
pub trait Categorizer {
    fn categorize(
        &self,
        product_name: &str,
    ) -> impl Future<Output = Result<Categories, CategorizeError>> + Send;
}

/// Offline categorizer: every product is `unknown`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticCategorizer;

impl Categorizer for StaticCategorizer {
    async fn categorize(&self, _product_name: &str) -> Result<Categories, CategorizeError> {
        Ok(Categories::unknown())
    }
}

/// Parses a classifier reply of the form
///
/// ```text
/// productCategory: Beverages & Milk
/// productSubcategory: Coffee
/// ```
///
/// Lines may come in any order and surrounding chatter is ignored. A missing
/// or empty line leaves that field `"unknown"`.
#[must_use]
pub fn parse_category_reply(reply: &str) -> Categories {
    let mut categories = Categories::unknown();
    for line in reply.lines().map(str::trim) {
        if let Some(value) = line.strip_prefix("productCategory:") {
            set_if_present(&mut categories.product_category, value);
        } else if let Some(value) = line.strip_prefix("productSubcategory:") {
            set_if_present(&mut categories.product_subcategory, value);
        }
    }
    categories
}

fn set_if_present(field: &mut String, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        value.clone_into(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_lines() {
        let reply = "productCategory: Beverages & Milk\nproductSubcategory: Coffee";
        assert_eq!(
            parse_category_reply(reply),
            Categories {
                product_category: "Beverages & Milk".to_string(),
                product_subcategory: "Coffee".to_string(),
            }
        );
    }

    #[test]
    fn ignores_surrounding_text_and_order() {
        let reply = "Sure!\n  productSubcategory: Grains & Rice \nproductCategory: Foodstuff\nThanks";
        let c = parse_category_reply(reply);
        assert_eq!(c.product_category, "Foodstuff");
        assert_eq!(c.product_subcategory, "Grains & Rice");
    }

    #[test]
    fn missing_subcategory_stays_unknown() {
        let c = parse_category_reply("productCategory: Baby & Kids");
        assert_eq!(c.product_category, "Baby & Kids");
        assert_eq!(c.product_subcategory, "unknown");
    }

    #[test]
    fn empty_value_stays_unknown() {
        let c = parse_category_reply("productCategory:\nproductSubcategory:   ");
        assert_eq!(c, Categories::unknown());
    }

    #[test]
    fn unrelated_reply_is_unknown() {
        assert_eq!(parse_category_reply("I cannot help with that."), Categories::unknown());
    }

    #[tokio::test]
    async fn static_categorizer_returns_unknown() {
        let c = StaticCategorizer.categorize("Peak Milk").await.unwrap();
        assert_eq!(c, Categories::unknown());
    }

    #[test]
    fn categories_serialize_camel_case() {
        let json = serde_json::to_value(Categories::unknown()).unwrap();
        assert_eq!(json["productCategory"], "unknown");
        assert_eq!(json["productSubcategory"], "unknown");
    }
}
