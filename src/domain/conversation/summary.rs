//! Human-readable budget summary.

use crate::domain::budget::{Budget, BudgetAnalysis};

const CATEGORY_EMOJIS: &[(&str, &str)] = &[
    ("kewajiban", "💸"),
    ("makan", "🍜"),
    ("transport", "🚗"),
    ("healing", "🎮"),
    ("tabungan", "💰"),
    ("lain-lain", "📦"),
];

const DEFAULT_EMOJI: &str = "💵";

/// Emoji for a category label, matched case-insensitively.
pub fn category_emoji(category: &str) -> &'static str {
    let key = category.trim().to_lowercase();
    CATEGORY_EMOJIS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, emoji)| *emoji)
        .unwrap_or(DEFAULT_EMOJI)
}

/// Formats a whole-rupiah amount with dot grouping, e.g. `Rp 1.500.000`.
pub fn format_rupiah(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("Rp -{}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// One line per budget, then the model's rationale and a closing note.
pub fn format_budget_summary(budgets: &[Budget], analysis: &BudgetAnalysis) -> String {
    let mut out = String::from("done! ✨ ini budget recommendation yang gue bikinin buat kamu:\n\n");
    for budget in budgets {
        out.push_str(&format!(
            "{} {}: {}\n",
            category_emoji(&budget.category),
            budget.category,
            format_rupiah(budget.amount)
        ));
    }
    if !analysis.analysis.is_empty() {
        out.push_str(&format!("\n💡 {}\n", analysis.analysis));
    }
    out.push_str("\nkamu bisa adjust sendiri nanti kalau ada yang kurang pas!");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::budget::BudgetCategory;
    use crate::domain::foundation::{AccountId, Timestamp};

    #[test]
    fn known_categories_get_their_emoji() {
        assert_eq!(category_emoji("Makan"), "🍜");
        assert_eq!(category_emoji("lain-lain"), "📦");
        assert_eq!(category_emoji("Investasi"), "💵");
    }

    #[test]
    fn rupiah_uses_dot_grouping() {
        assert_eq!(format_rupiah(0.0), "Rp 0");
        assert_eq!(format_rupiah(950.0), "Rp 950");
        assert_eq!(format_rupiah(1_500_000.0), "Rp 1.500.000");
        assert_eq!(format_rupiah(12_345_678.4), "Rp 12.345.678");
    }

    #[test]
    fn summary_lists_each_budget_then_rationale() {
        let analysis = BudgetAnalysis {
            salary: 3_000_000.0,
            location: "Jakarta".to_string(),
            lifestyle: None,
            analysis: "fokus nabung".to_string(),
            categories: vec![
                BudgetCategory::new("Makan", 1_000_000.0, ""),
                BudgetCategory::new("Tabungan", 2_000_000.0, ""),
            ],
        };
        let account = AccountId::new("acct-1").unwrap();
        let budgets = Budget::from_analysis(&account, &analysis, Timestamp::now()).unwrap();

        let summary = format_budget_summary(&budgets, &analysis);

        assert!(summary.starts_with("done! ✨"));
        assert!(summary.contains("🍜 Makan: Rp 1.000.000\n"));
        assert!(summary.contains("💰 Tabungan: Rp 2.000.000\n"));
        assert!(summary.contains("💡 fokus nabung"));
        assert!(summary.ends_with("kamu bisa adjust sendiri nanti kalau ada yang kurang pas!"));
    }
}
