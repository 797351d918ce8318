//! Fixed colour palettes for category charts and expense cards.
//!
//! Chart colours are assigned by position: the n-th distinct category takes
//! `CHART_PALETTE[n % CHART_PALETTE.len()]`. The assignment depends on input order
//! and never on the category name.

pub const CHART_PALETTE: [&str; 6] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD",
];

/// Colour for the `other` bucket and for any category not in [`NAMED_CATEGORY_COLORS`].
pub const FALLBACK_CATEGORY_COLOR: &str = "#95A5A6";

/// Known categories (lowercase) and their card colours.
pub const NAMED_CATEGORY_COLORS: [(&str, &str); 9] = [
    ("food & dining", "#FF6B6B"),
    ("transportation", "#4ECDC4"),
    ("entertainment", "#45B7D1"),
    ("bills & utilities", "#96CEB4"),
    ("shopping", "#FFEAA7"),
    ("healthcare", "#DDA0DD"),
    ("education", "#74B9FF"),
    ("travel", "#FD79A8"),
    ("other", FALLBACK_CATEGORY_COLOR),
];

/// Category preselected for new expenses.
pub const DEFAULT_EXPENSE_CATEGORY: &str = "Food & Dining";

pub fn chart_color(index: usize) -> &'static str {
    CHART_PALETTE[index % CHART_PALETTE.len()]
}

/// Case-insensitive lookup in the named palette.
pub fn category_color(category: &str) -> &'static str {
    let folded = category.trim().to_lowercase();
    NAMED_CATEGORY_COLORS
        .iter()
        .find(|(name, _)| *name == folded)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_CATEGORY_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_colors_wrap_around() {
        assert_eq!(chart_color(0), "#FF6B6B");
        assert_eq!(chart_color(5), "#DDA0DD");
        assert_eq!(chart_color(6), "#FF6B6B");
        assert_eq!(chart_color(13), "#4ECDC4");
    }

    #[test]
    fn named_lookup_folds_case() {
        assert_eq!(category_color("Food & Dining"), "#FF6B6B");
        assert_eq!(category_color("TRAVEL"), "#FD79A8");
        assert_eq!(category_color("Pets"), FALLBACK_CATEGORY_COLOR);
        assert_eq!(category_color(""), FALLBACK_CATEGORY_COLOR);
    }
}
