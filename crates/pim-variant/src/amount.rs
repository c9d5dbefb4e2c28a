//! Pack-count extraction from a variant label.

/// Separators in lookup order: the first `x` wins, `×` and `X` are only
/// consulted when no lowercase `x` is present.
const SEPARATORS: [char; 3] = ['x', '×', 'X'];

/// Parses the pack count that follows the first separator in `label`.
///
/// Leading whitespace after the separator is skipped and only the leading
/// digits are read, so `"5KG x 2 bags"` yields `2`. Returns `None` when no
/// separator is present, no digits follow it, the number is negative or
/// zero, or it does not fit in a `u32`.
#[must_use]
pub fn extract_amount(label: &str) -> Option<u32> {
    let (start, sep) = SEPARATORS
        .iter()
        .find_map(|&sep| label.find(sep).map(|idx| (idx, sep)))?;
    let rest = label[start + sep.len_utf8()..].trim_start();
    parse_leading_int(rest).filter(|&n| n > 0)
}

fn parse_leading_int(s: &str) -> Option<u32> {
    let unsigned = match s.as_bytes().first()? {
        b'-' => return None,
        b'+' => &s[1..],
        _ => s,
    };
    let end = unsigned
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_label() {
        assert_eq!(extract_amount("5KG x 2"), Some(2));
        assert_eq!(extract_amount("400G x 12"), Some(12));
    }

    #[test]
    fn no_separator_is_none() {
        assert_eq!(extract_amount("500G"), None);
        assert_eq!(extract_amount(""), None);
    }

    #[test]
    fn unicode_separator() {
        assert_eq!(extract_amount("75CL × 24"), Some(24));
    }

    #[test]
    fn uppercase_separator_only_when_no_lowercase() {
        assert_eq!(extract_amount("1L X 6"), Some(6));
        // Lowercase wins even when an uppercase X appears earlier.
        assert_eq!(extract_amount("BOX 10 x 3"), Some(3));
    }

    #[test]
    fn trailing_text_after_digits_is_ignored() {
        assert_eq!(extract_amount("5KG x 2 bags"), Some(2));
    }

    #[test]
    fn non_numeric_after_separator_is_none() {
        assert_eq!(extract_amount("5KG x two"), None);
        assert_eq!(extract_amount("Wax Pack"), None);
        assert_eq!(extract_amount("5BOX"), None);
    }

    #[test]
    fn zero_and_negative_are_none() {
        assert_eq!(extract_amount("5KG x 0"), None);
        assert_eq!(extract_amount("5KG x -3"), None);
    }

    #[test]
    fn explicit_plus_sign_is_accepted() {
        assert_eq!(extract_amount("5KG x +4"), Some(4));
    }

    #[test]
    fn overflowing_count_is_none() {
        assert_eq!(extract_amount("1G x 99999999999"), None);
    }
}
