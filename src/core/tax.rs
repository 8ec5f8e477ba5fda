use serde::Serialize;

use super::types::BreakdownEntry;

const HEALTH_INSURANCE_RATE: f64 = 0.04;
const HEALTH_INSURANCE_ANNUAL_CAP: f64 = 24_000_000.0;
const PENSION_RATE: f64 = 0.01;
const PENSION_ANNUAL_CAP: f64 = 2_400_000.0;

// Marginal PPh 21 brackets as (upper limit, rate); walked in order, so the
// limits must stay ascending.
const TAX_BRACKETS: [(f64, f64); 5] = [
    (60_000_000.0, 0.05),
    (250_000_000.0, 0.15),
    (500_000_000.0, 0.25),
    (5_000_000_000.0, 0.30),
    (f64::INFINITY, 0.35),
];

#[derive(Debug, Clone)]
pub struct TaxInputs {
    pub gross_annual_income: u64,
    pub ptkp_deduction: u64,
    pub include_health_insurance: bool,
    pub include_pension: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxResult {
    pub gross_annual_income: u64,
    pub ptkp_deduction: u64,
    pub bpjs_deduction: f64,
    pub jpk_deduction: f64,
    pub taxable_income: f64,
    pub annual_tax: f64,
    pub monthly_tax: f64,
    pub annual_take_home: f64,
    pub monthly_take_home: f64,
    pub income_breakdown: Vec<BreakdownEntry>,
}

pub fn evaluate_income_tax(inputs: &TaxInputs) -> TaxResult {
    let gross = inputs.gross_annual_income as f64;

    let bpjs_deduction = if inputs.include_health_insurance {
        (gross * HEALTH_INSURANCE_RATE).min(HEALTH_INSURANCE_ANNUAL_CAP)
    } else {
        0.0
    };
    let jpk_deduction = if inputs.include_pension {
        (gross * PENSION_RATE).min(PENSION_ANNUAL_CAP)
    } else {
        0.0
    };

    let taxable_income =
        (gross - inputs.ptkp_deduction as f64 - bpjs_deduction - jpk_deduction).max(0.0);
    let annual_tax = progressive_tax(taxable_income);
    let annual_take_home = gross - annual_tax - bpjs_deduction - jpk_deduction;

    let income_breakdown = vec![
        BreakdownEntry::new("Take-home pay", annual_take_home),
        BreakdownEntry::new("PPh 21", annual_tax),
        BreakdownEntry::new("BPJS & JPK", bpjs_deduction + jpk_deduction),
    ];

    TaxResult {
        gross_annual_income: inputs.gross_annual_income,
        ptkp_deduction: inputs.ptkp_deduction,
        bpjs_deduction,
        jpk_deduction,
        taxable_income,
        annual_tax,
        monthly_tax: annual_tax / 12.0,
        annual_take_home,
        monthly_take_home: annual_take_home / 12.0,
        income_breakdown,
    }
}

fn progressive_tax(taxable_income: f64) -> f64 {
    let mut remaining = taxable_income;
    let mut previous_limit = 0.0;
    let mut tax = 0.0;
    for (upper_limit, marginal_rate) in TAX_BRACKETS {
        let taxable_here = remaining.min(upper_limit - previous_limit);
        if taxable_here > 0.0 {
            tax += taxable_here * marginal_rate;
            remaining -= taxable_here;
        }
        previous_limit = upper_limit;
        if remaining <= 0.0 {
            break;
        }
    }
    tax
}
