//! City normalization.

use super::canonical;

/// Known spellings and abbreviations, mapped to their canonical city.
const CITY_TABLE: &[(&str, &str)] = &[
    ("jkt", "Jakarta"),
    ("jakarta", "Jakarta"),
    ("sby", "Surabaya"),
    ("surabaya", "Surabaya"),
    ("bdg", "Bandung"),
    ("bandung", "Bandung"),
    ("jogja", "Yogyakarta"),
    ("yogya", "Yogyakarta"),
    ("yogyakarta", "Yogyakarta"),
    ("mdn", "Medan"),
    ("medan", "Medan"),
    ("bali", "Bali"),
    ("denpasar", "Bali"),
];

/// Cities with cost-of-living knowledge behind them.
pub const SUPPORTED_CITIES: &[&str] = &[
    "Jakarta",
    "Surabaya",
    "Bandung",
    "Yogyakarta",
    "Medan",
    "Bali",
];

/// Maps a city name or abbreviation to its canonical form.
///
/// Unknown input is title-cased rather than rejected.
pub fn normalize_location(input: &str) -> String {
    let key = canonical(input);
    CITY_TABLE
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, city)| (*city).to_string())
        .unwrap_or_else(|| title_case(&key))
}

/// True when the input normalizes to one of [`SUPPORTED_CITIES`].
pub fn is_supported_location(input: &str) -> bool {
    let city = normalize_location(input);
    SUPPORTED_CITIES.contains(&city.as_str())
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
