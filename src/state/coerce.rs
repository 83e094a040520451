//! Parse-or-default helpers applied to every value read back from the store.
//!
//! Recovery never fails: absent keys and values that do not coerce to the
//! expected type fall back to the type's zero value.

use crate::dao::models::StoredValue;

/// Integer reading of a stored value; absent or unparsable yields 0.
///
/// Text is trimmed before parsing. Decimal text is truncated toward zero.
pub fn int_or_default(value: Option<&StoredValue>) -> i64 {
    match value {
        Some(StoredValue::Number(number)) => *number,
        Some(StoredValue::Text(text)) => parse_int(text.trim()).unwrap_or(0),
        None => 0,
    }
}

/// Non-negative counter reading; negative or out-of-range values yield 0.
pub fn count_or_default(value: Option<&StoredValue>) -> u32 {
    u32::try_from(int_or_default(value)).unwrap_or(0)
}

/// Strict boolean reading: only a case-insensitive `"true"` is true.
pub fn bool_or_default(value: Option<&StoredValue>) -> bool {
    match value {
        Some(StoredValue::Text(text)) => text.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Text reading of a stored value, falling back to `default` when absent.
pub fn string_or_default(value: Option<&StoredValue>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), StoredValue::as_text)
}

fn parse_int(text: &str) -> Option<i64> {
    if let Ok(number) = text.parse::<i64>() {
        return Some(number);
    }
    text.parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .map(|number| number.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> StoredValue {
        StoredValue::Text(value.into())
    }

    #[test]
    fn integers_accept_numbers_and_numeric_text() {
        assert_eq!(int_or_default(Some(&StoredValue::Number(-4))), -4);
        assert_eq!(int_or_default(Some(&text("60"))), 60);
        assert_eq!(int_or_default(Some(&text(" 7 "))), 7);
        assert_eq!(int_or_default(Some(&text("12.9"))), 12);
    }

    #[test]
    fn integers_default_to_zero() {
        assert_eq!(int_or_default(None), 0);
        assert_eq!(int_or_default(Some(&text(""))), 0);
        assert_eq!(int_or_default(Some(&text("sixty"))), 0);
        assert_eq!(int_or_default(Some(&text("NaN"))), 0);
        assert_eq!(int_or_default(Some(&text("inf"))), 0);
    }

    #[test]
    fn counts_reject_negative_values() {
        assert_eq!(count_or_default(Some(&StoredValue::Number(-1))), 0);
        assert_eq!(count_or_default(Some(&StoredValue::Number(i64::MAX))), 0);
        assert_eq!(count_or_default(Some(&text("250"))), 250);
    }

    #[test]
    fn booleans_are_strict() {
        assert!(bool_or_default(Some(&text("true"))));
        assert!(bool_or_default(Some(&text("TRUE"))));
        assert!(bool_or_default(Some(&text("True"))));
        assert!(!bool_or_default(Some(&text(" true"))));
        assert!(!bool_or_default(Some(&text("yes"))));
        assert!(!bool_or_default(Some(&text("1"))));
        assert!(!bool_or_default(Some(&StoredValue::Number(1))));
        assert!(!bool_or_default(None));
    }

    #[test]
    fn strings_fall_back_only_when_absent() {
        assert_eq!(string_or_default(None, "fallback"), "fallback");
        assert_eq!(string_or_default(Some(&text("")), "fallback"), "");
        assert_eq!(string_or_default(Some(&StoredValue::Number(3)), ""), "3");
    }
}
