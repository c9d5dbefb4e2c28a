use super::*;

fn check(raw: &str, label: &str, multiplier: u32, weight_kg: Option<u64>) {
    let v = normalize_variant(raw);
    assert_eq!(
        v,
        CanonicalVariant {
            label: label.to_owned(),
            multiplier,
            weight_kg,
        },
        "normalize_variant({raw:?})"
    );
}

// -----------------------------------------------------------------------
// Multiplicative forms
// -----------------------------------------------------------------------

#[test]
fn compact_count_first() {
    check("2x5kg", "5KG x 2", 2, Some(10));
}

#[test]
fn size_first_with_spaces() {
    check("400G x 12", "400G x 12", 12, Some(5));
}

#[test]
fn count_first_with_uppercase_separator() {
    check("2 X 5KG", "5KG x 2", 2, Some(10));
}

#[test]
fn unicode_separator() {
    check("24 × 50cl", "50CL x 24", 24, Some(12));
}

#[test]
fn spaces_between_size_and_unit() {
    check("5 kg  x  2", "5KG x 2", 2, Some(10));
}

#[test]
fn millilitre_pack() {
    // 330 ml * 24 = 7.92 kg
    check("330ml x 24", "330ML x 24", 24, Some(8));
}

#[test]
fn decimal_litre_pack() {
    check("1.5Ltr x 6", "1.5L x 6", 6, Some(9));
}

#[test]
fn unknown_unit_keeps_label_and_count() {
    check("10PCS x 6", "10PCS x 6", 6, None);
}

#[test]
fn zero_count_falls_back_to_one() {
    check("5KG x 0", "5KG x 0", 1, Some(5));
}

#[test]
fn oversized_count_falls_back_to_one() {
    check("1G x 99999999999", "1G x 99999999999", 1, Some(0));
}

// -----------------------------------------------------------------------
// Single-unit forms
// -----------------------------------------------------------------------

#[test]
fn single_grams_round_half_up() {
    check("500G", "500G", 1, Some(1));
}

#[test]
fn single_litre_from_ltr_abbreviation() {
    check("1.5Ltr", "1.5L", 1, Some(2));
}

#[test]
fn single_lowercase_unit_is_uppercased() {
    check("75cl", "75CL", 1, Some(1));
}

#[test]
fn single_small_weight_rounds_to_zero() {
    check("50g", "50G", 1, Some(0));
}

#[test]
fn single_unknown_unit() {
    check("12 pcs", "12PCS", 1, None);
}

#[test]
fn bare_numbers_with_separator_have_no_weight() {
    check("5 x 2", "5X", 1, None);
}

#[test]
fn size_without_leading_digit() {
    check(".5kg", ".5KG", 1, Some(1));
    check("4 x .5L", ".5L x 4", 4, Some(2));
}

#[test]
fn fractional_count_gets_no_weight() {
    check("2.5x4kg", "2.5X", 1, None);
}

#[test]
fn non_ascii_unit_letters_are_not_units() {
    check("5\u{17f} x 2", "5\u{17f}x2", 1, None);
    check("5\u{212a}g", "5\u{212a}g", 1, None);
}

// -----------------------------------------------------------------------
// Fallbacks
// -----------------------------------------------------------------------

#[test]
fn empty_input() {
    check("", "", 1, None);
}

#[test]
fn absent_input() {
    assert_eq!(
        normalize_variant(None::<&str>),
        CanonicalVariant {
            label: String::new(),
            multiplier: 1,
            weight_kg: None,
        }
    );
}

#[test]
fn unmatched_text_passes_through_cleaned() {
    check("  Family Pack ", "Family Pack", 1, None);
}

#[test]
fn unmatched_text_keeps_separator_cleanup() {
    check("Jumbo X Pack", "JumboxPack", 1, None);
}

#[test]
fn digits_only_is_unmatched() {
    check("500", "500", 1, None);
}

// -----------------------------------------------------------------------
// Properties
// -----------------------------------------------------------------------

const UNITS: [(&str, u64, u64); 5] = [
    // (token, numerator, denominator) of the kg factor
    ("KG", 1, 1),
    ("G", 1, 1000),
    ("L", 1, 1),
    ("ML", 1, 1000),
    ("CL", 1, 100),
];

/// Round-half-up of `n * num * m / den` in integer arithmetic.
fn expected_kg(n: u64, m: u64, num: u64, den: u64) -> u64 {
    (2 * n * num * m + den) / (2 * den)
}

fn case_variants(token: &str) -> [String; 2] {
    [token.to_ascii_uppercase(), token.to_ascii_lowercase()]
}

#[test]
fn size_first_forms_yield_count_and_weight() {
    let separators = [" x ", "x", " X ", "X", " × ", "×", "  x   "];
    for (token, num, den) in UNITS {
        for unit in case_variants(token) {
            for sep in separators {
                for (n, m) in [(1u64, 1u64), (5, 2), (400, 12), (33, 24), (750, 3)] {
                    let raw = format!("{n}{unit}{sep}{m}");
                    let v = normalize_variant(raw.as_str());
                    assert_eq!(u64::from(v.multiplier), m, "multiplier for {raw:?}");
                    assert_eq!(
                        v.weight_kg,
                        Some(expected_kg(n, m, num, den)),
                        "weight for {raw:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn count_first_forms_match_size_first() {
    for (token, _, _) in UNITS {
        for unit in case_variants(token) {
            for (n, m) in [(5u64, 2u64), (400, 12), (50, 24)] {
                let size_first = normalize_variant(format!("{n}{unit} x {m}").as_str());
                for sep in [" x ", "x", " X ", " × "] {
                    let raw = format!("{m}{sep}{n}{unit}");
                    let count_first = normalize_variant(raw.as_str());
                    assert_eq!(count_first, size_first, "order invariance for {raw:?}");
                }
            }
        }
    }
}

#[test]
fn label_is_a_fixed_point() {
    let inputs = [
        "2x5kg",
        "400G x 12",
        "500G",
        "1.5Ltr",
        "24 × 50cl",
        "10PCS x 6",
        "Family Pack",
        "5KG x 0",
        ".5kg",
        "2.5x4kg",
        "",
    ];
    for raw in inputs {
        let first = normalize_variant(raw);
        let second = normalize_variant(first.label.as_str());
        assert_eq!(second.multiplier, first.multiplier, "multiplier of {raw:?}");
        assert_eq!(second.weight_kg, first.weight_kg, "weight of {raw:?}");
        assert_eq!(second.label, first.label, "label of {raw:?}");
    }
}

#[test]
fn serializes_with_camel_case_keys() {
    let json = serde_json::to_value(normalize_variant("500G")).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"label": "500G", "multiplier": 1, "weightKg": 1})
    );
}

#[test]
fn null_weight_serializes_as_null() {
    let json = serde_json::to_value(normalize_variant("Family Pack")).unwrap();
    assert!(json["weightKg"].is_null());
}
