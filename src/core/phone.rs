//! # Phone Number Rules
//!
//! Free-text input becomes a dialable `+<country><number>` string here.
//!
//! `validate` looks at the raw input, `normalize` produces what is sent.
//! A number starting with `1` is taken to already carry the US/Canada
//! country code, so a local number that happens to begin with `1` is sent
//! as `+1...` rather than `+91 1...`. That is the intended behavior until
//! product decides otherwise.

/// Country code assumed when the digits don't start with a known one.
pub const DEFAULT_COUNTRY_CODE: &str = "91";

/// Country-code prefixes recognized as already present.
const KNOWN_PREFIXES: [&str; 2] = ["91", "1"];

pub const MIN_DIGITS: usize = 10;
pub const MAX_DIGITS: usize = 15;

fn digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Strips everything but digits and adds the `+` / country code prefix.
/// Empty (or digit-free) input yields an empty string.
pub fn normalize(input: &str) -> String {
    let cleaned = digits(input);
    if cleaned.is_empty() {
        return String::new();
    }
    if KNOWN_PREFIXES.iter().any(|p| cleaned.starts_with(p)) {
        format!("+{cleaned}")
    } else {
        format!("+{DEFAULT_COUNTRY_CODE}{cleaned}")
    }
}

/// True iff the input holds between 10 and 15 digits, ignoring everything else.
pub fn validate(input: &str) -> bool {
    let count = digits(input).len();
    (MIN_DIGITS..=MAX_DIGITS).contains(&count)
}

/// Log-safe form of a number: only the last four digits stay readable.
pub fn redact(number: &str) -> String {
    let cleaned = digits(number);
    let keep = cleaned.len().min(4);
    let (hidden, shown) = cleaned.split_at(cleaned.len() - keep);
    format!("{}{}", "*".repeat(hidden.len()), shown)
}
