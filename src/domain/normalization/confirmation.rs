//! Yes/no confirmation extraction.

use super::canonical;

/// A recognized answer to a yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confirmation {
    /// Agreement such as "iya", "oke" or "lanjut".
    Yes,
    /// Refusal or correction such as "enggak" or "salah".
    No,
}

/// Affirmative keywords are checked before negative ones.
const CONFIRMATION_KEYWORDS: &[(Confirmation, &[&str])] = &[
    (
        Confirmation::Yes,
        &["ya", "yes", "iya", "ok", "oke", "siap", "betul", "benar", "lanjut"],
    ),
    (
        Confirmation::No,
        &["tidak", "no", "nope", "enggak", "gak", "salah", "ulang"],
    ),
];

/// Reads a yes/no answer out of free text.
///
/// `None` means the text is not a confirmation at all, which is distinct
/// from an explicit "no".
pub fn extract_confirmation(input: &str) -> Option<Confirmation> {
    let text = canonical(input);
    CONFIRMATION_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(answer, _)| *answer)
}
