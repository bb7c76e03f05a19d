//! Text normalization - turns informal Indonesian user text into canonical values.
//!
//! Every function here works on a trimmed, lower-cased copy of its input and
//! never mutates the caller's string. All of them are total except
//! [`parse_salary`], whose only failure is "no numeric literal found".
//!
//! Keyword classifiers are driven by ordered tables so precedence can be read
//! (and tested) without following control flow.

mod confirmation;
mod lifestyle;
mod location;
mod salary;

pub use confirmation::{extract_confirmation, Confirmation};
pub use lifestyle::{normalize_lifestyle, Lifestyle};
pub use location::{is_supported_location, normalize_location, SUPPORTED_CITIES};
pub use salary::{contains_salary_info, parse_salary, round_to_nearest, validate_salary};

/// Lower-cased, trimmed working copy of user input.
fn canonical(input: &str) -> String {
    input.trim().to_lowercase()
}
