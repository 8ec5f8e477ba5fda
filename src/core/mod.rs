mod annuity;
mod cost;
mod loan;
mod mortgage;
mod tax;
mod types;

pub use annuity::{monthly_payment, monthly_rate_from_annual_percent};
pub use cost::{CostOfLivingResult, ExpenseCategory, LargestCategory, summarize_expenses};
pub use loan::{LoanResult, LoanTerms, evaluate_loan};
pub use mortgage::{
    Affordability, AffordabilityBand, MortgageResult, MortgageTerms, SchedulePoint,
    amortization_schedule, evaluate_mortgage,
};
pub use tax::{TaxInputs, TaxResult, evaluate_income_tax};
pub use types::{BreakdownEntry, ValidationError};
