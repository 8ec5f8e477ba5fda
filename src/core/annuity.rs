pub fn monthly_rate_from_annual_percent(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Constant monthly payment for a fully amortizing loan. A zero rate falls
/// back to straight division so payment × term recovers the principal.
pub fn monthly_payment(principal: f64, monthly_rate: f64, term_months: u32) -> f64 {
    if monthly_rate == 0.0 {
        principal / term_months as f64
    } else {
        principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powi(-(term_months as i32)))
    }
}
