use serde::Serialize;

use super::annuity;
use super::types::ValidationError;

#[derive(Debug, Clone)]
pub struct MortgageTerms {
    pub home_price: u64,
    pub down_payment: u64,
    pub term_years: u32,
    pub annual_rate_percent: f64,
    pub monthly_income: Option<u64>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AffordabilityBand {
    Comfortable,
    Caution,
    Risky,
}

impl AffordabilityBand {
    pub fn classify(ratio: f64) -> Self {
        if ratio <= 30.0 {
            Self::Comfortable
        } else if ratio <= 40.0 {
            Self::Caution
        } else {
            Self::Risky
        }
    }
}

#[derive(Copy, Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Affordability {
    pub ratio: f64,
    pub band: AffordabilityBand,
}

#[derive(Copy, Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePoint {
    pub month: u32,
    pub principal_portion: f64,
    pub interest_portion: f64,
    pub balance: f64,
    pub cumulative_principal: f64,
    pub cumulative_interest: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageResult {
    pub home_price: u64,
    pub down_payment: u64,
    pub principal: u64,
    pub term_months: u32,
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub down_payment_percentage: f64,
    pub affordability: Option<Affordability>,
    pub schedule: Vec<SchedulePoint>,
}

pub fn evaluate_mortgage(terms: &MortgageTerms) -> Result<MortgageResult, ValidationError> {
    if terms.home_price == 0 {
        return Err(ValidationError::NonPositiveHomePrice);
    }
    if terms.down_payment >= terms.home_price {
        return Err(ValidationError::DownPaymentNotBelowHomePrice);
    }
    if terms.term_years == 0 || terms.term_years > 50 {
        return Err(ValidationError::MortgageTermOutOfRange);
    }
    if !(terms.annual_rate_percent > 0.0 && terms.annual_rate_percent <= 50.0) {
        return Err(ValidationError::RateOutOfRange);
    }

    let principal = terms.home_price - terms.down_payment;
    let term_months = terms.term_years * 12;
    let monthly_rate = annuity::monthly_rate_from_annual_percent(terms.annual_rate_percent);
    let monthly_payment = annuity::monthly_payment(principal as f64, monthly_rate, term_months);
    let total_payment = monthly_payment * term_months as f64;
    let total_interest = total_payment - principal as f64;

    let affordability = terms
        .monthly_income
        .filter(|&income| income > 0)
        .map(|income| {
            let ratio = monthly_payment / income as f64 * 100.0;
            Affordability {
                ratio,
                band: AffordabilityBand::classify(ratio),
            }
        });

    let schedule =
        amortization_schedule(principal as f64, monthly_payment, monthly_rate, term_months);

    Ok(MortgageResult {
        home_price: terms.home_price,
        down_payment: terms.down_payment,
        principal,
        term_months,
        monthly_payment,
        total_payment,
        total_interest,
        down_payment_percentage: terms.down_payment as f64 / terms.home_price as f64 * 100.0,
        affordability,
        schedule,
    })
}

/// Sampled payment-by-payment simulation. Snapshots land every `interval`
/// periods; each records the sampled period's own principal/interest split,
/// the balance after it, and running totals through it.
pub fn amortization_schedule(
    principal: f64,
    monthly_payment: f64,
    monthly_rate: f64,
    number_of_payments: u32,
) -> Vec<SchedulePoint> {
    if number_of_payments == 0 {
        return Vec::new();
    }

    let interval = sample_interval(number_of_payments);
    let mut schedule = Vec::with_capacity(number_of_payments.div_ceil(interval) as usize);

    let mut balance = principal;
    let mut cumulative_principal = 0.0;
    let mut cumulative_interest = 0.0;
    for period in 0..number_of_payments {
        let interest_portion = balance * monthly_rate;
        let principal_portion = monthly_payment - interest_portion;
        balance = (balance - principal_portion).max(0.0);
        cumulative_principal += principal_portion;
        cumulative_interest += interest_portion;
        if period % interval == 0 {
            schedule.push(SchedulePoint {
                month: period + 1,
                principal_portion,
                interest_portion,
                balance,
                cumulative_principal,
                cumulative_interest,
            });
        }
    }
    schedule
}

// Keeps the sampled series bounded: every period up to 120 payments, every
// 2nd up to 240, every 3rd beyond that.
fn sample_interval(number_of_payments: u32) -> u32 {
    let max_samples = if number_of_payments <= 120 {
        number_of_payments
    } else if number_of_payments <= 240 {
        number_of_payments.div_ceil(2)
    } else {
        number_of_payments.div_ceil(3)
    };
    number_of_payments.div_ceil(max_samples)
}
