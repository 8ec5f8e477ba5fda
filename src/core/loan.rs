use serde::Serialize;

use super::annuity;
use super::types::{BreakdownEntry, ValidationError};

#[derive(Debug, Clone)]
pub struct LoanTerms {
    pub loan_amount: u64,
    pub deposit: u64,
    pub term_years: u32,
    pub term_months: u32,
    pub annual_rate_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResult {
    pub loan_amount: u64,
    pub deposit: u64,
    pub principal: u64,
    pub term_months: u32,
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub deposit_percentage: f64,
    pub interest_percentage: f64,
    pub payment_breakdown: Vec<BreakdownEntry>,
}

pub fn evaluate_loan(terms: &LoanTerms) -> Result<LoanResult, ValidationError> {
    // Checks run in a fixed order; the first failure is the one reported.
    if terms.term_months > 11 {
        return Err(ValidationError::TermMonthsComponentTooLarge);
    }
    if terms.term_years > 30 {
        return Err(ValidationError::TermYearsComponentTooLarge);
    }
    if terms.loan_amount == 0 {
        return Err(ValidationError::NonPositiveLoanAmount);
    }
    let term_months = terms.term_years * 12 + terms.term_months;
    if term_months == 0 || term_months > 360 {
        return Err(ValidationError::LoanTermOutOfRange);
    }
    if terms.deposit >= terms.loan_amount {
        return Err(ValidationError::DepositNotBelowLoanAmount);
    }
    if !(terms.annual_rate_percent > 0.0 && terms.annual_rate_percent <= 50.0) {
        return Err(ValidationError::RateOutOfRange);
    }

    let principal = terms.loan_amount - terms.deposit;
    let monthly_rate = annuity::monthly_rate_from_annual_percent(terms.annual_rate_percent);
    let monthly_payment = annuity::monthly_payment(principal as f64, monthly_rate, term_months);
    let total_payment = monthly_payment * term_months as f64;
    let total_interest = total_payment - principal as f64;

    let mut payment_breakdown = Vec::with_capacity(3);
    if terms.deposit > 0 {
        payment_breakdown.push(BreakdownEntry::new("Deposit", terms.deposit as f64));
    }
    payment_breakdown.push(BreakdownEntry::new("Principal", principal as f64));
    payment_breakdown.push(BreakdownEntry::new("Total interest", total_interest));

    Ok(LoanResult {
        loan_amount: terms.loan_amount,
        deposit: terms.deposit,
        principal,
        term_months,
        monthly_payment,
        total_payment,
        total_interest,
        deposit_percentage: terms.deposit as f64 / terms.loan_amount as f64 * 100.0,
        interest_percentage: total_interest / total_payment * 100.0,
        payment_breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assume, proptest};

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn sample_terms() -> LoanTerms {
        LoanTerms {
            loan_amount: 100_000_000,
            deposit: 0,
            term_years: 1,
            term_months: 0,
            annual_rate_percent: 12.0,
        }
    }

    #[test]
    fn twelve_month_scenario_matches_hand_computed_values() {
        let result = evaluate_loan(&sample_terms()).unwrap();
        assert_eq!(result.principal, 100_000_000);
        assert_eq!(result.term_months, 12);
        assert_approx_tol(result.monthly_payment, 8_884_878.867_834_16, 1e-3);
        assert_approx_tol(result.total_payment, 106_618_546.414, 1e-2);
        assert_approx_tol(result.total_interest, 6_618_546.414, 1e-2);
        assert_eq!(result.deposit_percentage, 0.0);
        assert_approx_tol(result.interest_percentage, 6.207_687_720_961_309, 1e-9);
    }

    #[test]
    fn deposit_shrinks_principal_and_shows_up_in_the_breakdown() {
        let mut terms = sample_terms();
        terms.deposit = 20_000_000;
        let result = evaluate_loan(&terms).unwrap();
        assert_eq!(result.principal, 80_000_000);
        assert_eq!(result.deposit_percentage, 20.0);
        let labels: Vec<&str> = result
            .payment_breakdown
            .iter()
            .map(|entry| entry.label.as_str())
            .collect();
        assert_eq!(labels, ["Deposit", "Principal", "Total interest"]);
        assert_eq!(result.payment_breakdown[0].value, 20_000_000.0);
        assert_eq!(result.payment_breakdown[1].value, 80_000_000.0);
    }

    #[test]
    fn zero_deposit_has_no_deposit_slice() {
        let result = evaluate_loan(&sample_terms()).unwrap();
        let labels: Vec<&str> = result
            .payment_breakdown
            .iter()
            .map(|entry| entry.label.as_str())
            .collect();
        assert_eq!(labels, ["Principal", "Total interest"]);
    }

    #[test]
    fn validation_failures_report_the_first_violation_in_order() {
        let everything_wrong = LoanTerms {
            loan_amount: 0,
            deposit: 1,
            term_years: 31,
            term_months: 12,
            annual_rate_percent: 0.0,
        };
        assert_eq!(
            evaluate_loan(&everything_wrong).unwrap_err(),
            ValidationError::TermMonthsComponentTooLarge
        );

        let mut terms = everything_wrong.clone();
        terms.term_months = 11;
        assert_eq!(
            evaluate_loan(&terms).unwrap_err(),
            ValidationError::TermYearsComponentTooLarge
        );

        terms.term_years = 30;
        assert_eq!(
            evaluate_loan(&terms).unwrap_err(),
            ValidationError::NonPositiveLoanAmount
        );

        terms.loan_amount = 100_000_000;
        assert_eq!(
            evaluate_loan(&terms).unwrap_err(),
            ValidationError::LoanTermOutOfRange
        );

        terms.term_months = 0;
        terms.deposit = 100_000_000;
        assert_eq!(
            evaluate_loan(&terms).unwrap_err(),
            ValidationError::DepositNotBelowLoanAmount
        );

        terms.deposit = 0;
        assert_eq!(
            evaluate_loan(&terms).unwrap_err(),
            ValidationError::RateOutOfRange
        );

        terms.annual_rate_percent = 12.0;
        assert!(evaluate_loan(&terms).is_ok());
    }

    #[test]
    fn combined_term_is_bounded_on_both_sides() {
        let mut terms = sample_terms();
        terms.term_years = 0;
        terms.term_months = 0;
        assert_eq!(
            evaluate_loan(&terms).unwrap_err(),
            ValidationError::LoanTermOutOfRange
        );

        terms.term_years = 30;
        terms.term_months = 11;
        assert_eq!(
            evaluate_loan(&terms).unwrap_err(),
            ValidationError::LoanTermOutOfRange
        );

        terms.term_months = 0;
        assert!(evaluate_loan(&terms).is_ok());
    }

    #[test]
    fn rate_bounds_are_inclusive_at_fifty_and_exclusive_at_zero() {
        let mut terms = sample_terms();
        terms.annual_rate_percent = 50.0;
        assert!(evaluate_loan(&terms).is_ok());

        terms.annual_rate_percent = 50.1;
        assert_eq!(
            evaluate_loan(&terms).unwrap_err(),
            ValidationError::RateOutOfRange
        );

        terms.annual_rate_percent = 0.0;
        assert_eq!(
            evaluate_loan(&terms).unwrap_err(),
            ValidationError::RateOutOfRange
        );

        terms.annual_rate_percent = f64::NAN;
        assert_eq!(
            evaluate_loan(&terms).unwrap_err(),
            ValidationError::RateOutOfRange
        );
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_valid_loans_have_consistent_outputs(
            loan_amount in 1_000u32..2_000_000_000,
            deposit_percent in 0u32..100,
            term_years in 0u32..=30,
            term_months in 0u32..=11,
            rate_bp in 1u32..=5_000
        ) {
            let combined = term_years * 12 + term_months;
            prop_assume!(combined > 0 && combined <= 360);

            let loan_amount = loan_amount as u64;
            let terms = LoanTerms {
                loan_amount,
                deposit: loan_amount * deposit_percent as u64 / 100,
                term_years,
                term_months,
                annual_rate_percent: rate_bp as f64 / 100.0,
            };
            let result = evaluate_loan(&terms).unwrap();

            prop_assert!(result.principal + result.deposit == result.loan_amount);
            prop_assert!(result.monthly_payment > 0.0);
            prop_assert!(result.total_interest >= 0.0);
            let reassembled = result.monthly_payment * result.term_months as f64;
            prop_assert!((result.total_payment - reassembled).abs() <= 1e-9);
            prop_assert!(result.interest_percentage >= 0.0);
            prop_assert!(result.interest_percentage < 100.0);
        }
    }
}
