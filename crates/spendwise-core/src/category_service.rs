//! Per-category spending breakdown.

use std::collections::HashMap;

use tracing::debug;

use spendwise_domain::{
    category_color, chart_color, Amounted, CategoryTotal, Expense, FALLBACK_CATEGORY_COLOR,
};

pub struct CategoryService;

impl CategoryService {
    /// Groups expenses by exact category string and sums them.
    ///
    /// Output order is the order in which each category first appears in `expenses`;
    /// it drives legend and bar order, so it is never re-sorted here. The n-th group
    /// takes chart colour `n % palette size`. Expenses with a blank category form an
    /// `Other` group that keeps its position but uses the fallback colour.
    pub fn breakdown(expenses: &[Expense]) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for expense in expenses {
            let label = expense.category_label();
            let position = *positions.entry(label).or_insert_with(|| {
                let index = totals.len();
                let color = if expense.is_uncategorized() {
                    FALLBACK_CATEGORY_COLOR
                } else {
                    chart_color(index)
                };
                totals.push(CategoryTotal {
                    name: label.to_string(),
                    amount: 0.0,
                    color: color.to_string(),
                    count: 0,
                });
                index
            });
            let entry = &mut totals[position];
            entry.amount += expense.effective_amount();
            entry.count += 1;
        }

        debug!(categories = totals.len(), "computed category breakdown");
        totals
    }

    /// First `limit` categories of a breakdown, in breakdown order.
    pub fn top_categories(breakdown: &[CategoryTotal], limit: usize) -> Vec<CategoryTotal> {
        breakdown.iter().take(limit).cloned().collect()
    }

    /// Card colour for a category name (case-insensitive).
    pub fn color_for(category: &str) -> &'static str {
        category_color(category)
    }
}
