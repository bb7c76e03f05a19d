//! Salary parsing, salary-signal detection and monetary rounding.

use once_cell::sync::Lazy;
use regex::RegexSet;

use super::canonical;
use crate::domain::foundation::ValidationError;

/// Currency words removed before parsing. Longer words come first so
/// "rupiah" is not half-eaten by a shorter token.
const CURRENCY_WORDS: &[&str] = &["rupiah", "idr", "rp"];

/// Magnitude suffixes in descending order of magnitude.
///
/// Within a class the longest token comes first ("miliar" before "m").
const MAGNITUDES: &[(&[&str], f64)] = &[
    (&["miliar", "milyar", "m"], 1_000_000_000.0),
    (&["juta", "jt"], 1_000_000.0),
    (&["ribu", "rb", "k"], 1_000.0),
];

const SALARY_FLOOR: f64 = 1_000_000.0;
const SALARY_CEILING: f64 = 1_000_000_000.0;

static SALARY_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"\d+\s*(miliar|milyar|juta|jt|ribu|rb)",
        r"\d{7,}",
        r"rp\.?\s*\d+",
    ])
    .expect("salary patterns are valid regexes")
});

/// Parses a free-form salary string into rupiah.
///
/// Accepts forms such as `"Rp 5.000.000"`, `"Rp 5.000.000,-"`, `"5 juta"`,
/// `"5jt"`, `"5,5 juta"`, `"750rb"` and `"2 miliar"`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidFormat`] when no numeric literal remains
/// after currency words and the magnitude suffix are stripped.
pub fn parse_salary(input: &str) -> Result<f64, ValidationError> {
    let mut text = canonical(input);
    for word in CURRENCY_WORDS {
        text = text.replace(word, "");
    }

    let text = strip_zero_cents(text.trim());

    let (numeral, multiplier) = split_magnitude(text.trim());
    let literal = normalize_separators(numeral.trim());

    match literal.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value * multiplier),
        _ => Err(ValidationError::invalid_format(
            "salary",
            "no numeric literal found",
        )),
    }
}

/// Drops the ",-" / ".-" written after whole rupiah amounts.
fn strip_zero_cents(text: &str) -> &str {
    text.strip_suffix(",-")
        .or_else(|| text.strip_suffix(".-"))
        .unwrap_or(text)
}

/// Splits a trailing magnitude suffix off the numeral.
fn split_magnitude(text: &str) -> (&str, f64) {
    for (tokens, multiplier) in MAGNITUDES {
        for token in *tokens {
            if let Some(numeral) = text.strip_suffix(token) {
                return (numeral, *multiplier);
            }
        }
    }
    (text, 1.0)
}

/// Rewrites Indonesian number punctuation into something `f64::from_str` reads.
///
/// A comma is the decimal separator. A dot is a thousands separator only when
/// every group after the first has exactly three digits; otherwise it is kept
/// as a decimal point.
fn normalize_separators(numeral: &str) -> String {
    match numeral.matches(',').count() {
        0 => {
            let groups: Vec<&str> = numeral.split('.').collect();
            let grouped_thousands = groups.len() > 1
                && !groups[0].is_empty()
                && groups[1..]
                    .iter()
                    .all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()));
            if grouped_thousands {
                groups.concat()
            } else {
                numeral.to_string()
            }
        }
        1 => numeral.replace('.', "").replace(',', "."),
        _ => numeral.replace(',', ""),
    }
}

/// Heuristic: does this text look like it mentions a salary?
///
/// Only an intent signal, never validation.
pub fn contains_salary_info(input: &str) -> bool {
    SALARY_PATTERNS.is_match(&input.to_lowercase())
}

/// Rounds `amount` to the nearest multiple of `interval`.
///
/// A non-positive or non-finite interval leaves the amount untouched.
pub fn round_to_nearest(amount: f64, interval: f64) -> f64 {
    if !interval.is_finite() || interval <= 0.0 {
        return amount;
    }
    (amount / interval).round() * interval
}

/// Sanity bounds for a monthly salary.
pub fn validate_salary(salary: f64) -> Result<(), ValidationError> {
    if salary <= 0.0 {
        return Err(ValidationError::invalid_format(
            "salary",
            "salary must be greater than 0",
        ));
    }
    if !(SALARY_FLOOR..=SALARY_CEILING).contains(&salary) {
        return Err(ValidationError::out_of_range(
            "salary",
            SALARY_FLOOR,
            SALARY_CEILING,
            salary,
        ));
    }
    Ok(())
}
