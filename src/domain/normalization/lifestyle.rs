//! Lifestyle tier classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::canonical;

/// Spending-style tier the budget is tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Lifestyle {
    /// Saving-first, minimal discretionary spending.
    Frugal,
    /// Middle ground.
    #[default]
    Balanced,
    /// Comfortable with discretionary spending.
    Relaxed,
}

impl Lifestyle {
    /// The label users see.
    pub fn label(&self) -> &'static str {
        match self {
            Lifestyle::Frugal => "Minimalis",
            Lifestyle::Balanced => "Moderate",
            Lifestyle::Relaxed => "Santai",
        }
    }
}

impl fmt::Display for Lifestyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Keyword sets in precedence order: frugal, then relaxed, then balanced.
const LIFESTYLE_KEYWORDS: &[(Lifestyle, &[&str])] = &[
    (
        Lifestyle::Frugal,
        &["minimalis", "hemat", "irit", "sederhana", "saving", "nabung", "1"],
    ),
    (
        Lifestyle::Relaxed,
        &["santai", "yolo", "enjoy", "boros", "flexing", "fun", "3"],
    ),
    (
        Lifestyle::Balanced,
        &["moderate", "balanced", "seimbang", "normal", "biasa", "2"],
    ),
];

/// Classifies free text into a [`Lifestyle`] tier.
///
/// Unrecognized text defaults to [`Lifestyle::Balanced`].
pub fn normalize_lifestyle(input: &str) -> Lifestyle {
    let text = canonical(input);
    LIFESTYLE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(tier, _)| *tier)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_tier() {
        assert_eq!(normalize_lifestyle("gue orangnya hemat"), Lifestyle::Frugal);
        assert_eq!(normalize_lifestyle("YOLO aja"), Lifestyle::Relaxed);
        assert_eq!(normalize_lifestyle("seimbang lah"), Lifestyle::Balanced);
    }

    #[test]
    fn menu_numbers_map_to_tiers() {
        assert_eq!(normalize_lifestyle("1"), Lifestyle::Frugal);
        assert_eq!(normalize_lifestyle("2"), Lifestyle::Balanced);
        assert_eq!(normalize_lifestyle("3"), Lifestyle::Relaxed);
    }

    #[test]
    fn frugal_keywords_win_over_relaxed_ones() {
        assert_eq!(
            normalize_lifestyle("pengen santai tapi tetep nabung"),
            Lifestyle::Frugal
        );
    }

    #[test]
    fn unrecognized_text_defaults_to_balanced() {
        assert_eq!(normalize_lifestyle("entahlah"), Lifestyle::Balanced);
        assert_eq!(normalize_lifestyle(""), Lifestyle::Balanced);
    }

    #[test]
    fn labels_match_user_facing_names() {
        assert_eq!(Lifestyle::Frugal.to_string(), "Minimalis");
        assert_eq!(Lifestyle::Balanced.to_string(), "Moderate");
        assert_eq!(Lifestyle::Relaxed.to_string(), "Santai");
    }
}
