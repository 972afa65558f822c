//! Money input formatting and caret anchoring.
//!
//! Everything here is a pure function over strings. The formatter turns
//! whatever is currently in an input field into a grouped display string
//! (`"8500000"` → `"8 500 000"`, `"1234,56"` → `"1 234.56"`), and the two
//! anchor functions translate a caret position across a reformat: grouping
//! spaces shift character offsets, but the number of digits to the left of
//! the caret is stable, so we count digits before the old caret and place
//! the new caret after the same count of digits.

/// Format a raw input string as a grouped money string.
///
/// The input can be anything the user managed to type. Normalization:
/// whitespace is stripped, commas become decimal points, every other
/// non-digit character is dropped. The first decimal point splits integer
/// and fractional parts; any further points inside the fraction are
/// dropped. Leading zeros collapse to at most one digit, and the integer
/// part is grouped in runs of three from the right with single spaces.
///
/// Total and idempotent: every input produces a best-effort string
/// (possibly empty), and formatting an already formatted string is a no-op
/// because grouping spaces are stripped right back out.
pub fn format_money_input(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            c if c.is_whitespace() => {}
            ',' => normalized.push('.'),
            c if c.is_ascii_digit() || c == '.' => normalized.push(c),
            _ => {}
        }
    }
    if normalized.is_empty() {
        return String::new();
    }

    // Only the first decimal point separates; later ones are noise.
    let (int_part, fraction) = match normalized.find('.') {
        Some(dot) => {
            let frac: String = normalized[dot + 1..].chars().filter(|c| *c != '.').collect();
            (&normalized[..dot], Some(frac))
        }
        None => (normalized.as_str(), None),
    };

    let int_part = int_part.trim_start_matches('0');
    let int_part = if int_part.is_empty() { "0" } else { int_part };

    let mut out = group_thousands(int_part);
    if let Some(frac) = fraction {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

/// Insert a space before every run of three digits counted from the right.
///
/// `digits` must be a non-empty ASCII digit string.
pub(crate) fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Count the digits strictly before `cursor` in `s`.
///
/// `cursor` is a byte offset and may exceed the string length; everything
/// past the end counts the whole string. Formatter output is ASCII, so byte
/// and character offsets coincide everywhere this is used.
pub fn digits_before(s: &str, cursor: usize) -> usize {
    let end = cursor.min(s.len());
    s.char_indices()
        .take_while(|(i, _)| *i < end)
        .filter(|(_, c)| c.is_ascii_digit())
        .count()
}

/// Byte index of the first digit after the `n`-th one, skipping any
/// separators in between, so the caret lands just before the next digit
/// (`index_after_digits("1 234 567", 4)` is 6, not 5).
///
/// Returns 0 when `n` is 0, and `s.len()` when no such digit exists
/// (caret goes to the end).
pub fn index_after_digits(s: &str, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut seen = 0;
    for (i, ch) in s.char_indices() {
        if ch.is_ascii_digit() {
            if seen == n {
                return i;
            }
            seen += 1;
        }
    }
    s.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Formatter: grouping ---

    #[test]
    fn test_groups_integer_in_threes() {
        assert_eq!(format_money_input("8500000"), "8 500 000");
        assert_eq!(format_money_input("1234"), "1 234");
        assert_eq!(format_money_input("123"), "123");
        assert_eq!(format_money_input("1"), "1");
    }

    #[test]
    fn test_preserves_fraction() {
        assert_eq!(format_money_input("1234.5"), "1 234.5");
        assert_eq!(format_money_input("1234.567"), "1 234.567");
    }

    #[test]
    fn test_comma_becomes_decimal_point() {
        assert_eq!(format_money_input("1234,56"), "1 234.56");
    }

    // --- Formatter: normalization ---

    #[test]
    fn test_empty_input_formats_to_empty() {
        assert_eq!(format_money_input(""), "");
        assert_eq!(format_money_input("   "), "");
        assert_eq!(format_money_input("abc"), "");
    }

    #[test]
    fn test_strips_non_digit_noise() {
        assert_eq!(format_money_input("abc123xyz"), "123");
        assert_eq!(format_money_input("$1,000"), "1.000");
        assert_eq!(format_money_input("1 000 000"), "1 000 000");
    }

    #[test]
    fn test_collapses_leading_zeros() {
        assert_eq!(format_money_input("000123"), "123");
        assert_eq!(format_money_input("0000"), "0");
        assert_eq!(format_money_input("0"), "0");
    }

    #[test]
    fn test_bare_fraction_gets_zero_integer() {
        assert_eq!(format_money_input(".5"), "0.5");
        assert_eq!(format_money_input(",5"), "0.5");
    }

    #[test]
    fn test_trailing_decimal_point_survives() {
        // Mid-typing state: "12." should not lose the dot.
        assert_eq!(format_money_input("12."), "12.");
    }

    #[test]
    fn test_only_first_decimal_separator_splits() {
        assert_eq!(format_money_input("12.34.56"), "12.3456");
        assert_eq!(format_money_input("1.2.3.4"), "1.234");
    }

    #[test]
    fn test_idempotent_on_worked_examples() {
        for raw in ["8500000", "1234.5", "1234,56", "000123", "0000", "12.34.56", "12.", ".5"] {
            let once = format_money_input(raw);
            assert_eq!(format_money_input(&once), once, "not idempotent for {raw:?}");
        }
    }

    // --- Digit counting ---

    #[test]
    fn test_digits_before_skips_separators() {
        assert_eq!(digits_before("1 234", 3), 2);
        assert_eq!(digits_before("1 234", 0), 0);
        assert_eq!(digits_before("1 234", 1), 1);
    }

    #[test]
    fn test_digits_before_clamps_past_end() {
        assert_eq!(digits_before("1 234", 100), 4);
    }

    #[test]
    fn test_digits_before_counts_around_decimal_point() {
        assert_eq!(digits_before("1 234.56", 8), 6);
        assert_eq!(digits_before("1 234.56", 6), 4);
    }

    // --- Caret relocation ---

    #[test]
    fn test_index_after_digits_skips_separators_to_next_digit() {
        assert_eq!(index_after_digits("1 234 567", 4), 6);
        assert_eq!(index_after_digits("1 234 567", 1), 2);
        assert_eq!(index_after_digits("1 234 567", 7), 9);
    }

    #[test]
    fn test_index_after_digits_before_decimal_point_goes_to_end() {
        // "1 234." with all four digits left of the caret: the caret must
        // stay after the dot, not slip back between '4' and '.'.
        assert_eq!(index_after_digits("1 234.", 4), 6);
    }

    #[test]
    fn test_index_after_zero_digits_is_start() {
        assert_eq!(index_after_digits("1 234", 0), 0);
    }

    #[test]
    fn test_index_after_too_many_digits_is_end() {
        assert_eq!(index_after_digits("1 234", 10), 5);
        assert_eq!(index_after_digits("", 3), 0);
    }

    #[test]
    fn test_anchor_round_trip_across_reformat() {
        // Caret at end of "8500000" (7 digits before it); after formatting
        // the caret should sit at the end of "8 500 000" (index 9).
        let raw = "8500000";
        let anchor = digits_before(raw, raw.len());
        let formatted = format_money_input(raw);
        assert_eq!(formatted, "8 500 000");
        assert_eq!(index_after_digits(&formatted, anchor), 9);
    }

    // --- Property tests ---

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn format_is_idempotent(raw in "\\PC{0,40}") {
                let once = format_money_input(&raw);
                prop_assert_eq!(format_money_input(&once), once);
            }

            #[test]
            fn format_never_panics_and_is_ascii(raw in "\\PC{0,40}") {
                let out = format_money_input(&raw);
                prop_assert!(out.is_ascii());
                prop_assert!(out.chars().all(|c| c.is_ascii_digit() || c == ' ' || c == '.'));
            }

            #[test]
            fn relocated_caret_preserves_digit_anchor(
                raw in "[0-9., ]{0,30}",
                cursor in 0..40usize,
            ) {
                let anchor = digits_before(&raw, cursor);
                let formatted = format_money_input(&raw);
                let idx = index_after_digits(&formatted, anchor);
                prop_assert!(idx <= formatted.len());
                // The relocated caret has at least as many digits to its
                // left as fit in the new string, capped by the anchor.
                let total = formatted.chars().filter(char::is_ascii_digit).count();
                prop_assert_eq!(digits_before(&formatted, idx), anchor.min(total));
            }
        }
    }
}
