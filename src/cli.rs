use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::sync::Once;
use tracing::debug;

use crate::core::{
    AffordabilityBand, BreakdownEntry, CostOfLivingResult, ExpenseCategory, LoanResult, LoanTerms,
    MortgageResult, MortgageTerms, SchedulePoint, TaxInputs, TaxResult, evaluate_income_tax,
    evaluate_loan, evaluate_mortgage, summarize_expenses,
};

#[derive(Parser, Debug)]
#[command(
    name = "hitung",
    about = "Personal finance calculators: cost of living, loans, mortgages, and PPh 21 income tax"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Emit the result record as pretty JSON instead of a text summary"
    )]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Summarize monthly living expenses across spending categories")]
    CostOfLiving(CostOfLivingArgs),
    #[command(about = "Amortized loan payment calculator")]
    Loan(LoanArgs),
    #[command(about = "Mortgage payment, affordability, and amortization schedule")]
    Mortgage(MortgageArgs),
    #[command(about = "Annual PPh 21 income tax and take-home pay")]
    Tax(TaxArgs),
}

#[derive(Args, Debug)]
pub struct CostOfLivingArgs {
    #[arg(long, default_value = "0", help = "Monthly rent or home installment")]
    pub rent: String,
    #[arg(long, default_value = "0", help = "Monthly electricity and water bills")]
    pub utilities: String,
    #[arg(long, default_value = "0", help = "Monthly internet and phone bills")]
    pub internet: String,
    #[arg(long, default_value = "0", help = "Monthly groceries and food spend")]
    pub groceries: String,
    #[arg(long, default_value = "0", help = "Monthly transportation spend")]
    pub transport: String,
    #[arg(long, default_value = "0", help = "Monthly healthcare and BPJS spend")]
    pub healthcare: String,
    #[arg(long, default_value = "0", help = "Monthly education spend")]
    pub education: String,
    #[arg(
        long,
        default_value = "0",
        help = "Monthly entertainment and recreation spend"
    )]
    pub entertainment: String,
    #[arg(
        long,
        default_value = "0",
        help = "Monthly subscriptions and other non-essentials"
    )]
    pub subscriptions: String,
}

#[derive(Args, Debug)]
pub struct LoanArgs {
    #[arg(
        long,
        help = "Loan amount in rupiah; separators are accepted, e.g. 100.000.000"
    )]
    pub amount: String,
    #[arg(
        long,
        default_value = "0",
        help = "Upfront deposit, subtracted from the loan amount"
    )]
    pub deposit: String,
    #[arg(long, default_value_t = 1, help = "Years part of the loan term")]
    pub term_years: u32,
    #[arg(long, default_value_t = 0, help = "Months part of the loan term, 0-11")]
    pub term_months: u32,
    #[arg(long, default_value_t = 12.0, help = "Annual interest rate in percent")]
    pub rate: f64,
}

#[derive(Args, Debug)]
pub struct MortgageArgs {
    #[arg(long, help = "Home price in rupiah; separators are accepted")]
    pub price: String,
    #[arg(long, default_value = "0", help = "Upfront down payment")]
    pub down_payment: String,
    #[arg(long, default_value_t = 15, help = "Mortgage term in years, 1-50")]
    pub term_years: u32,
    #[arg(long, default_value_t = 6.0, help = "Annual interest rate in percent")]
    pub rate: f64,
    #[arg(long, help = "Monthly income used for the affordability ratio")]
    pub monthly_income: Option<String>,
}

#[derive(Args, Debug)]
pub struct TaxArgs {
    #[arg(long, help = "Gross annual income in rupiah; separators are accepted")]
    pub income: String,
    #[arg(
        long,
        value_enum,
        default_value_t = PtkpCategory::K0,
        help = "PTKP category: tk0-tk3 single, k0-k3 married"
    )]
    pub ptkp: PtkpCategory,
    #[arg(long, help = "Override the PTKP allowance with an explicit amount")]
    pub ptkp_amount: Option<String>,
    #[arg(
        long,
        help = "Deduct BPJS health insurance (4% of gross, capped at 24 million)"
    )]
    pub with_bpjs: bool,
    #[arg(
        long,
        help = "Deduct JPK pension contributions (1% of gross, capped at 2.4 million)"
    )]
    pub with_jpk: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum PtkpCategory {
    Tk0,
    Tk1,
    Tk2,
    Tk3,
    K0,
    K1,
    K2,
    K3,
}

impl PtkpCategory {
    // Statutory PTKP table; K/n carries the married allowance on top of TK/n.
    pub fn annual_allowance(self) -> u64 {
        match self {
            PtkpCategory::Tk0 => 54_000_000,
            PtkpCategory::Tk1 | PtkpCategory::K0 => 58_500_000,
            PtkpCategory::Tk2 | PtkpCategory::K1 => 63_000_000,
            PtkpCategory::Tk3 | PtkpCategory::K2 => 67_500_000,
            PtkpCategory::K3 => 72_000_000,
        }
    }
}

fn parse_amount(flag: &str, raw: &str) -> Result<u64, String> {
    // Accepts separator-formatted input like "250.000.000" or "Rp 250,000,000".
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(format!("{flag} needs an amount, got '{raw}'"));
    }
    digits
        .parse::<u64>()
        .map_err(|_| format!("{flag} is too large to process, got '{raw}'"))
}

fn expense_categories(args: &CostOfLivingArgs) -> Result<Vec<ExpenseCategory>, String> {
    let fields = [
        ("--rent", "Rent / home installment", &args.rent, true),
        ("--utilities", "Utilities", &args.utilities, true),
        ("--internet", "Internet & phone", &args.internet, true),
        ("--groceries", "Groceries & food", &args.groceries, true),
        ("--transport", "Transportation", &args.transport, true),
        ("--healthcare", "Healthcare & BPJS", &args.healthcare, true),
        ("--education", "Education", &args.education, true),
        (
            "--entertainment",
            "Entertainment & recreation",
            &args.entertainment,
            false,
        ),
        (
            "--subscriptions",
            "Subscriptions & others",
            &args.subscriptions,
            false,
        ),
    ];

    let mut categories = Vec::with_capacity(fields.len());
    for (flag, label, raw, essential) in fields {
        let amount = parse_amount(flag, raw)?;
        categories.push(if essential {
            ExpenseCategory::essential(label, amount)
        } else {
            ExpenseCategory::non_essential(label, amount)
        });
    }
    Ok(categories)
}

fn loan_terms(args: &LoanArgs) -> Result<LoanTerms, String> {
    Ok(LoanTerms {
        loan_amount: parse_amount("--amount", &args.amount)?,
        deposit: parse_amount("--deposit", &args.deposit)?,
        term_years: args.term_years,
        term_months: args.term_months,
        annual_rate_percent: args.rate,
    })
}

fn mortgage_terms(args: &MortgageArgs) -> Result<MortgageTerms, String> {
    let monthly_income = match &args.monthly_income {
        Some(raw) => Some(parse_amount("--monthly-income", raw)?),
        None => None,
    };
    Ok(MortgageTerms {
        home_price: parse_amount("--price", &args.price)?,
        down_payment: parse_amount("--down-payment", &args.down_payment)?,
        term_years: args.term_years,
        annual_rate_percent: args.rate,
        monthly_income,
    })
}

fn tax_inputs(args: &TaxArgs) -> Result<TaxInputs, String> {
    let ptkp_deduction = match &args.ptkp_amount {
        Some(raw) => parse_amount("--ptkp-amount", raw)?,
        None => args.ptkp.annual_allowance(),
    };
    Ok(TaxInputs {
        gross_annual_income: parse_amount("--income", &args.income)?,
        ptkp_deduction,
        include_health_insurance: args.with_bpjs,
        include_pension: args.with_jpk,
    })
}

pub fn run(cli: Cli) -> Result<(), String> {
    match &cli.command {
        Command::CostOfLiving(args) => {
            let categories = expense_categories(args)?;
            debug!(categories = categories.len(), "summarizing living costs");
            let result = summarize_expenses(&categories).map_err(|error| error.to_string())?;
            if cli.json {
                print_json(&result)
            } else {
                print_cost_summary(&result);
                Ok(())
            }
        }
        Command::Loan(args) => {
            let terms = loan_terms(args)?;
            debug!(
                amount = terms.loan_amount,
                deposit = terms.deposit,
                rate = terms.annual_rate_percent,
                "evaluating loan"
            );
            let result = evaluate_loan(&terms).map_err(|error| error.to_string())?;
            if cli.json {
                print_json(&result)
            } else {
                print_loan_summary(&result);
                Ok(())
            }
        }
        Command::Mortgage(args) => {
            let terms = mortgage_terms(args)?;
            debug!(
                price = terms.home_price,
                term_years = terms.term_years,
                rate = terms.annual_rate_percent,
                "evaluating mortgage"
            );
            let result = evaluate_mortgage(&terms).map_err(|error| error.to_string())?;
            if cli.json {
                print_json(&result)
            } else {
                print_mortgage_summary(&result);
                Ok(())
            }
        }
        Command::Tax(args) => {
            let inputs = tax_inputs(args)?;
            debug!(
                income = inputs.gross_annual_income,
                ptkp = inputs.ptkp_deduction,
                "evaluating income tax"
            );
            let result = evaluate_income_tax(&inputs);
            if cli.json {
                print_json(&result)
            } else {
                print_tax_summary(&result);
                Ok(())
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let rendered = serde_json::to_string_pretty(value).map_err(|error| error.to_string())?;
    println!("{rendered}");
    Ok(())
}

fn print_cost_summary(result: &CostOfLivingResult) {
    println!("Cost of living");
    println!(
        "  {:<20}{}",
        "Monthly total",
        format_rupiah(result.monthly_total as f64)
    );
    println!(
        "  {:<20}{}",
        "Annual total",
        format_rupiah(result.annual_total as f64)
    );
    println!(
        "  {:<20}{}",
        "Weekly average",
        format_rupiah(result.weekly_total)
    );
    println!(
        "  {:<20}{}",
        "Daily average",
        format_rupiah(result.daily_total)
    );
    println!(
        "  {:<20}{} ({})",
        "Largest category",
        result.largest_category.name,
        format_rupiah(result.largest_category.amount as f64)
    );
    println!(
        "  {:<20}{:.1}% essential, {:.1}% non-essential",
        "Essential share", result.essential_percentage, result.non_essential_percentage
    );
    print_breakdown("Expense breakdown", &result.expense_breakdown);
}

fn print_loan_summary(result: &LoanResult) {
    println!("Loan");
    println!(
        "  {:<20}{}",
        "Loan amount",
        format_rupiah(result.loan_amount as f64)
    );
    if result.deposit > 0 {
        println!(
            "  {:<20}{} ({:.1}% of the loan amount)",
            "Deposit",
            format_rupiah(result.deposit as f64),
            result.deposit_percentage
        );
    }
    println!(
        "  {:<20}{}",
        "Principal",
        format_rupiah(result.principal as f64)
    );
    println!("  {:<20}{} months", "Term", result.term_months);
    println!(
        "  {:<20}{}",
        "Monthly payment",
        format_rupiah(result.monthly_payment)
    );
    println!(
        "  {:<20}{}",
        "Total payment",
        format_rupiah(result.total_payment)
    );
    println!(
        "  {:<20}{} ({:.1}% of total payment)",
        "Total interest",
        format_rupiah(result.total_interest),
        result.interest_percentage
    );
    print_breakdown("Payment breakdown", &result.payment_breakdown);
}

fn print_mortgage_summary(result: &MortgageResult) {
    println!("Mortgage");
    println!(
        "  {:<20}{}",
        "Home price",
        format_rupiah(result.home_price as f64)
    );
    if result.down_payment > 0 {
        println!(
            "  {:<20}{} ({:.1}% of the home price)",
            "Down payment",
            format_rupiah(result.down_payment as f64),
            result.down_payment_percentage
        );
    }
    println!(
        "  {:<20}{}",
        "Principal",
        format_rupiah(result.principal as f64)
    );
    println!("  {:<20}{} months", "Term", result.term_months);
    println!(
        "  {:<20}{}",
        "Monthly payment",
        format_rupiah(result.monthly_payment)
    );
    println!(
        "  {:<20}{}",
        "Total payment",
        format_rupiah(result.total_payment)
    );
    println!(
        "  {:<20}{}",
        "Total interest",
        format_rupiah(result.total_interest)
    );
    if let Some(affordability) = &result.affordability {
        println!(
            "  {:<20}{:.1}% of income ({})",
            "Affordability",
            affordability.ratio,
            band_label(affordability.band)
        );
    }
    print_schedule(&result.schedule);
}

fn print_tax_summary(result: &TaxResult) {
    println!("Income tax (PPh 21)");
    println!(
        "  {:<20}{}",
        "Gross income",
        format_rupiah(result.gross_annual_income as f64)
    );
    println!(
        "  {:<20}{}",
        "PTKP allowance",
        format_rupiah(result.ptkp_deduction as f64)
    );
    if result.bpjs_deduction > 0.0 {
        println!(
            "  {:<20}{}",
            "BPJS deduction",
            format_rupiah(result.bpjs_deduction)
        );
    }
    if result.jpk_deduction > 0.0 {
        println!(
            "  {:<20}{}",
            "JPK deduction",
            format_rupiah(result.jpk_deduction)
        );
    }
    println!(
        "  {:<20}{}",
        "Taxable income",
        format_rupiah(result.taxable_income)
    );
    println!(
        "  {:<20}{} per year, {} per month",
        "Tax due",
        format_rupiah(result.annual_tax),
        format_rupiah(result.monthly_tax)
    );
    println!(
        "  {:<20}{} per year, {} per month",
        "Take-home pay",
        format_rupiah(result.annual_take_home),
        format_rupiah(result.monthly_take_home)
    );
    print_breakdown("Income breakdown", &result.income_breakdown);
}

fn print_breakdown(title: &str, entries: &[BreakdownEntry]) {
    println!();
    println!("{title}");
    for entry in entries {
        println!("  {:<28}{}", entry.label, format_rupiah(entry.value));
    }
}

fn print_schedule(schedule: &[SchedulePoint]) {
    let Some(first) = schedule.first() else {
        return;
    };
    // Snapshots arrive sampled every 1-3 months; pick roughly one row per year
    // of the term, always keeping the final row.
    let month_gap = schedule
        .get(1)
        .map_or(1, |second| second.month - first.month);
    let stride = (12 / month_gap.max(1)).max(1) as usize;
    println!();
    println!(
        "{:>6}  {:>18}  {:>18}  {:>18}",
        "Month", "Principal paid", "Interest paid", "Balance"
    );
    let last_index = schedule.len() - 1;
    for (index, point) in schedule.iter().enumerate() {
        if (index + 1) % stride == 0 || index == last_index {
            println!(
                "{:>6}  {:>18}  {:>18}  {:>18}",
                point.month,
                format_rupiah(point.cumulative_principal),
                format_rupiah(point.cumulative_interest),
                format_rupiah(point.balance)
            );
        }
    }
}

fn band_label(band: AffordabilityBand) -> &'static str {
    match band {
        AffordabilityBand::Comfortable => "comfortable",
        AffordabilityBand::Caution => "caution",
        AffordabilityBand::Risky => "risky",
    }
}

pub fn format_rupiah(value: f64) -> String {
    format!(
        "Rp {}",
        group_digits(&(value.round().max(0.0) as u64).to_string())
    )
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, '.');
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}

static TRACING_INIT: Once = Once::new();

pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("hitung=warn"));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
