//! First normalization pass over a raw variant cell.

use std::sync::LazyLock;

use regex::Regex;

static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[xX×]\s*").expect("valid regex"));
static LITRE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)ltr").expect("valid regex"));

/// Canonicalizes multiplication signs and litre abbreviations.
///
/// - every `x`, `X` or `×`, together with the whitespace around it, becomes a
///   bare `x`;
/// - every `ltr` (any case) becomes `L`;
/// - outer whitespace is trimmed.
///
/// Nothing else is touched, so digits and unit letters survive verbatim.
#[must_use]
pub fn pre_clean(raw: &str) -> String {
    let separators = SEPARATOR_RE.replace_all(raw, "x");
    let litres = LITRE_RE.replace_all(&separators, "L");
    litres.trim().to_owned()
}
