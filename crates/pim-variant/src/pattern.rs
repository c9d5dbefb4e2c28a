//! Ordered pack-size patterns, first match wins.
//!
//! Input is expected to have gone through [`crate::clean::pre_clean`], so the
//! only separator left is a bare lowercase `x`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Result of matching a cleaned variant string against the pack patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantMatch<'a> {
    /// A multi-unit pack: `count` units of `size` `unit` each.
    Multiplied {
        size: &'a str,
        unit: &'a str,
        count: &'a str,
    },
    /// A single unit with no pack count.
    Single { size: &'a str, unit: &'a str },
    Unmatched,
}

/// Capture-group order of a multiplicative pattern.
#[derive(Debug, Clone, Copy)]
enum Layout {
    /// `(size)(unit)(count)`
    SizeFirst,
    /// `(count)(size)(unit)`
    CountFirst,
}

impl Layout {
    fn extract<'a>(self, caps: &Captures<'a>) -> Option<VariantMatch<'a>> {
        let group = |i: usize| caps.get(i).map(|m| m.as_str());
        let (size, unit, count) = match self {
            Layout::SizeFirst => (group(1)?, group(2)?, group(3)?),
            Layout::CountFirst => (group(2)?, group(3)?, group(1)?),
        };
        Some(VariantMatch::Multiplied { size, unit, count })
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

// SIZE allows a decimal fraction, with or without a leading digit ("1.5L",
// ".5kg"); COUNT is always an integer and must not start inside a number.
// Units are ASCII letters only.
static PACK_PATTERNS: LazyLock<[(Regex, Layout); 3]> = LazyLock::new(|| {
    [
        // "5KG x 2", "400G x 12"
        (
            compile(r"([0-9]*\.?[0-9]+)\s*([A-Za-z]+)\s*[xX]\s*([0-9]+)"),
            Layout::SizeFirst,
        ),
        // "2 x 5 KG"
        (
            compile(r"(?:^|[^0-9.])([0-9]+)\s*[xX]\s*([0-9]*\.?[0-9]+)\s*([A-Za-z]+)"),
            Layout::CountFirst,
        ),
        // "2x5kg"
        (
            compile(r"(?:^|[^0-9.])([0-9]+)[xX]([0-9]*\.?[0-9]+)([A-Za-z]+)"),
            Layout::CountFirst,
        ),
    ]
});

static SINGLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"([0-9]*\.?[0-9]+)\s*([A-Za-z]+)"));

/// Matches `cleaned` against the multiplicative patterns in order, then the
/// single-unit pattern.
#[must_use]
pub fn match_variant(cleaned: &str) -> VariantMatch<'_> {
    let multiplied = PACK_PATTERNS.iter().find_map(|(re, layout)| {
        re.captures(cleaned)
            .and_then(|caps| layout.extract(&caps))
    });
    if let Some(found) = multiplied {
        return found;
    }

    SINGLE_PATTERN
        .captures(cleaned)
        .and_then(|caps| {
            Some(VariantMatch::Single {
                size: caps.get(1)?.as_str(),
                unit: caps.get(2)?.as_str(),
            })
        })
        .unwrap_or(VariantMatch::Unmatched)
}
