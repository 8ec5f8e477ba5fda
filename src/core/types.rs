use serde::Serialize;
use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("at least one expense category with an amount greater than zero is required")]
    NoExpenseAmounts,
    #[error("the months part of the term must be 11 or less; use years for longer periods")]
    TermMonthsComponentTooLarge,
    #[error("the years part of the term must be 30 or less")]
    TermYearsComponentTooLarge,
    #[error("loan amount must be greater than zero")]
    NonPositiveLoanAmount,
    #[error("combined loan term must be between 1 and 360 months")]
    LoanTermOutOfRange,
    #[error("deposit must be smaller than the loan amount")]
    DepositNotBelowLoanAmount,
    #[error("annual interest rate must be above 0% and at most 50%")]
    RateOutOfRange,
    #[error("home price must be greater than zero")]
    NonPositiveHomePrice,
    #[error("down payment must be smaller than the home price")]
    DownPaymentNotBelowHomePrice,
    #[error("mortgage term must be between 1 and 50 years")]
    MortgageTermOutOfRange,
}

/// One labeled value in a breakdown series; the caller decides how to draw it.
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownEntry {
    pub label: String,
    pub value: f64,
}

impl BreakdownEntry {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}
