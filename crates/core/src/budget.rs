//! Budget figures derived from a project's budget and its expenditures.

use serde::Serialize;

/// Derived budget figures for one project. Never stored; recomputed from the
/// current expenditure rows on every read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub actual_cost: f64,
    /// `budget - actual_cost`, negative when over budget.
    pub remaining_budget: f64,
    /// `remaining_budget` clamped at zero, for display.
    pub display_remaining: f64,
    #[serde(rename = "isOverBudget")]
    pub is_over_budget: bool,
    /// Rounded share of the budget spent, 0 when the budget is 0.
    pub utilization_percent: i64,
}

impl BudgetSummary {
    /// Compute the summary. A missing budget is treated as 0.
    pub fn compute(budget: Option<f64>, amounts: impl IntoIterator<Item = f64>) -> Self {
        let budget = budget.unwrap_or(0.0);
        let actual_cost: f64 = amounts.into_iter().sum();
        let remaining_budget = budget - actual_cost;

        let utilization_percent = if budget > 0.0 {
            (actual_cost / budget * 100.0).round() as i64
        } else {
            0
        };

        Self {
            actual_cost,
            remaining_budget,
            display_remaining: remaining_budget.max(0.0),
            is_over_budget: actual_cost > budget,
            utilization_percent,
        }
    }
}
