use serde::Serialize;

use super::types::{BreakdownEntry, ValidationError};

#[derive(Debug, Clone)]
pub struct ExpenseCategory {
    pub name: String,
    pub amount: u64,
    pub essential: bool,
}

impl ExpenseCategory {
    pub fn essential(name: impl Into<String>, amount: u64) -> Self {
        Self {
            name: name.into(),
            amount,
            essential: true,
        }
    }

    pub fn non_essential(name: impl Into<String>, amount: u64) -> Self {
        Self {
            name: name.into(),
            amount,
            essential: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LargestCategory {
    pub name: String,
    pub amount: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOfLivingResult {
    pub monthly_total: u64,
    pub annual_total: u64,
    pub weekly_total: f64,
    pub daily_total: f64,
    pub largest_category: LargestCategory,
    pub essential_percentage: f64,
    pub non_essential_percentage: f64,
    pub expense_breakdown: Vec<BreakdownEntry>,
}

pub fn summarize_expenses(
    categories: &[ExpenseCategory],
) -> Result<CostOfLivingResult, ValidationError> {
    let monthly_total: u64 = categories.iter().map(|category| category.amount).sum();
    if monthly_total == 0 {
        return Err(ValidationError::NoExpenseAmounts);
    }

    // Strict > keeps the first category on ties; iteration order is the
    // caller's declaration order.
    let mut largest = &categories[0];
    for category in &categories[1..] {
        if category.amount > largest.amount {
            largest = category;
        }
    }

    let non_essential_spend: u64 = categories
        .iter()
        .filter(|category| !category.essential)
        .map(|category| category.amount)
        .sum();
    let essential_share =
        (monthly_total - non_essential_spend) as f64 / monthly_total as f64 * 100.0;
    let essential_percentage = round_to_one_decimal(essential_share);
    // Complement of the rounded value, so the pair sums to exactly 100.0.
    let non_essential_percentage = 100.0 - essential_percentage;

    let expense_breakdown = categories
        .iter()
        .filter(|category| category.amount > 0)
        .map(|category| BreakdownEntry::new(category.name.clone(), category.amount as f64))
        .collect();

    Ok(CostOfLivingResult {
        monthly_total,
        annual_total: monthly_total * 12,
        weekly_total: monthly_total as f64 / 4.33,
        daily_total: monthly_total as f64 / 30.0,
        largest_category: LargestCategory {
            name: largest.name.clone(),
            amount: largest.amount,
        },
        essential_percentage,
        non_essential_percentage,
        expense_breakdown,
    })
}

fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
