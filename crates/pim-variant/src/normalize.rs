//! Raw variant cell to [`CanonicalVariant`].
//!
//! Pattern matching lives in [`crate::pattern`], unit handling in
//! [`crate::unit`]; this module runs the stages in order and owns the
//! fallbacks.

use serde::{Deserialize, Serialize};

use crate::amount::extract_amount;
use crate::clean::pre_clean;
use crate::pattern::{match_variant, VariantMatch};
use crate::unit::{per_unit_kg, total_weight_kg};

/// Normalized pack description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalVariant {
    /// `"<SIZE><UNIT> x <COUNT>"`, `"<SIZE><UNIT>"`, or the cleaned input
    /// when nothing matched.
    pub label: String,
    /// Units per pack, always at least 1.
    pub multiplier: u32,
    /// Total pack weight in whole kilograms. `None` means the weight has to
    /// be entered by hand; it is never a stand-in for zero.
    pub weight_kg: Option<u64>,
}

impl CanonicalVariant {
    fn passthrough(label: String) -> Self {
        Self {
            label,
            multiplier: 1,
            weight_kg: None,
        }
    }
}

/// Normalizes a raw variant cell.
///
/// Accepts `&str` or `Option<&str>`; an absent cell behaves like an empty
/// one. Never fails: unknown units give `weight_kg: None`, unmatched input
/// is passed through as its cleaned form, and an unreadable pack count
/// defaults to 1.
///
/// ```
/// use pim_variant::normalize_variant;
///
/// let v = normalize_variant("2 X 5KG");
/// assert_eq!(v.label, "5KG x 2");
/// assert_eq!(v.multiplier, 2);
/// assert_eq!(v.weight_kg, Some(10));
/// ```
#[must_use]
pub fn normalize_variant<'a>(raw: impl Into<Option<&'a str>>) -> CanonicalVariant {
    let cleaned = pre_clean(raw.into().unwrap_or_default());

    let (label, unit_kg) = match match_variant(&cleaned) {
        VariantMatch::Multiplied { size, unit, count } => (
            Some(format!("{size}{} x {count}", unit.to_ascii_uppercase())),
            per_unit_kg(size, unit),
        ),
        VariantMatch::Single { size, unit } => (
            Some(format!("{size}{}", unit.to_ascii_uppercase())),
            per_unit_kg(size, unit),
        ),
        VariantMatch::Unmatched => (None, None),
    };

    let Some(label) = label else {
        tracing::debug!(variant = %cleaned, "variant did not match any pack pattern");
        return CanonicalVariant::passthrough(cleaned);
    };

    // Multiplier is read back from the label, not from the captured count.
    let multiplier = extract_amount(&label).unwrap_or(1);

    let weight_kg = unit_kg.and_then(|kg| total_weight_kg(kg, multiplier));
    if weight_kg.is_none() {
        tracing::debug!(variant = %label, "no weight derivable from variant unit");
    }

    CanonicalVariant {
        label,
        multiplier,
        weight_kg,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
