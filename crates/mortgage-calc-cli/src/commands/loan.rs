use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_calc_core::amortization::{self, LoanInput, LoanTerms, RepaymentMethod};
use mortgage_calc_core::report::{self, ReportInput, DEFAULT_PAGE_SIZE};
use mortgage_calc_core::types::with_metadata;

use crate::input;

/// Loan terms, from a file, piped JSON, or individual flags
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount in won (e.g. 300000000)
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 4.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in whole years
    #[arg(long)]
    pub term: Option<Decimal>,

    /// Repayment method: maturity, equal-principal, equal-payment
    #[arg(long, default_value = "equal-payment")]
    pub method: RepaymentMethod,
}

/// Arguments for a single page of the schedule table
#[derive(Args)]
pub struct PageArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (12 = one year)
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
}

pub fn resolve_loan(args: &LoanArgs) -> Result<LoanInput, Box<dyn std::error::Error>> {
    let loan_input: LoanInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(piped) = input::stdin::read_piped()? {
        piped
    } else {
        let principal = args
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
        let term = args.term.ok_or("--term is required (or provide --input)")?;

        LoanInput {
            principal,
            annual_rate_percent: rate,
            term_years: term,
            method: args.method,
        }
    };
    Ok(loan_input)
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = resolve_loan(&args)?;
    let result = amortization::calculate_loan(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_summary(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = resolve_loan(&args)?;
    let terms = LoanTerms::try_from(&loan_input)?;
    let output = amortization::calculate_loan(&loan_input)?;
    let summary = report::summarize(&terms, &output.result)?;

    Ok(serde_json::to_value(with_metadata(
        &output.methodology,
        &loan_input,
        output.warnings,
        output.metadata.computation_time_us,
        summary,
    ))?)
}

pub fn run_page(args: PageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.page == 0 {
        return Err("--page starts at 1".into());
    }
    let loan_input = resolve_loan(&args.loan)?;
    let output = amortization::calculate_loan(&loan_input)?;
    let page = report::paginate(&output.result.schedule, args.page_size, args.page - 1)?;

    Ok(serde_json::to_value(with_metadata(
        &output.methodology,
        &loan_input,
        output.warnings,
        output.metadata.computation_time_us,
        page,
    ))?)
}

pub fn run_chart(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = resolve_loan(&args)?;
    let terms = LoanTerms::try_from(&loan_input)?;
    let output = amortization::calculate_loan(&loan_input)?;
    let series = report::chart_series(&output.result, terms.term_years());

    Ok(serde_json::to_value(with_metadata(
        &output.methodology,
        &loan_input,
        output.warnings,
        output.metadata.computation_time_us,
        series,
    ))?)
}

pub fn run_report(args: PageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.page == 0 {
        return Err("--page starts at 1".into());
    }
    let report_input = ReportInput {
        loan: resolve_loan(&args.loan)?,
        page: args.page - 1,
        page_size: args.page_size,
    };
    let result = report::calculate_report(&report_input)?;
    Ok(serde_json::to_value(result)?)
}
