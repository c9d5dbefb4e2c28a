//! Variant/weight normalization for spreadsheet product rows.
//!
//! Freeform pack descriptions such as `"2 X 5KG"`, `"400G x 12"` or
//! `"1.5Ltr"` are turned into a canonical label, a pack multiplier and a
//! total weight in whole kilograms. Everything here is pure and total:
//! malformed input degrades to defaults, it never errors.

pub mod amount;
pub mod clean;
pub mod normalize;
pub mod pattern;
pub mod unit;

pub use amount::extract_amount;
pub use normalize::{normalize_variant, CanonicalVariant};
pub use pattern::{match_variant, VariantMatch};
pub use unit::MassUnit;
