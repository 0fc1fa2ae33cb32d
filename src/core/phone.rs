//! WhatsApp number helpers for Indonesian mobile numbers.
//!
//! The shape check is approximate: it looks at the prefix and digit count
//! only and says nothing about whether a carrier actually issued the number.

use regex::Regex;
use std::sync::LazyLock;

// ASCII digits only; other scripts' digits are stripped like any other character.
static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]+").expect("static pattern"));

pub fn only_digits(value: &str) -> String {
    NON_DIGITS.replace_all(value, "").into_owned()
}

/// Accepts `08` numbers of 10..=13 digits and `628` numbers of 11..=14
/// digits, after dropping every non-digit character.
pub fn is_valid_wa(value: &str) -> bool {
    let digits = only_digits(value);
    let len = digits.len();
    if digits.starts_with("08") && (10..=13).contains(&len) {
        return true;
    }
    digits.starts_with("628") && (11..=14).contains(&len)
}

/// Rewrites a local `08...` number into the international `628...` form.
pub fn normalize_wa(value: &str) -> String {
    let digits = only_digits(value);
    if digits.starts_with("08") {
        return format!("62{}", &digits[1..]);
    }
    digits
}
