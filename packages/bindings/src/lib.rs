use napi::Result as NapiResult;
use napi_derive::napi;

use mortgage_calc_core::advisory::{self, AdvisorConfig};
use mortgage_calc_core::amortization::{self, LoanInput, LoanTerms};
use mortgage_calc_core::report::{self, ReportInput};
use mortgage_calc_core::types::with_metadata;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_loan(input_json: &str) -> NapiResult<(LoanInput, LoanTerms)> {
    let input: LoanInput = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let terms = LoanTerms::try_from(&input).map_err(to_napi_error)?;
    Ok((input, terms))
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan(input_json: String) -> NapiResult<String> {
    let input: LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization::calculate_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Report views
// ---------------------------------------------------------------------------

#[napi]
pub fn loan_summary(input_json: String) -> NapiResult<String> {
    let (input, terms) = parse_loan(&input_json)?;
    let output = amortization::calculate_loan(&input).map_err(to_napi_error)?;
    let summary = report::summarize(&terms, &output.result).map_err(to_napi_error)?;
    let output = with_metadata(
        &output.methodology,
        &input,
        output.warnings,
        output.metadata.computation_time_us,
        summary,
    );
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Takes `{ "loan": {...}, "page": 0, "page_size": 12 }`; `page` is 0-based.
#[napi]
pub fn schedule_page(input_json: String) -> NapiResult<String> {
    let input: ReportInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization::calculate_loan(&input.loan).map_err(to_napi_error)?;
    let page = report::paginate(&output.result.schedule, input.page_size, input.page)
        .map_err(to_napi_error)?;
    let output = with_metadata(
        &output.methodology,
        &input,
        output.warnings,
        output.metadata.computation_time_us,
        page,
    );
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn chart_series(input_json: String) -> NapiResult<String> {
    let (input, terms) = parse_loan(&input_json)?;
    let output = amortization::calculate_loan(&input).map_err(to_napi_error)?;
    let series = report::chart_series(&output.result, terms.term_years());
    let output = with_metadata(
        &output.methodology,
        &input,
        output.warnings,
        output.metadata.computation_time_us,
        series,
    );
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn loan_report(input_json: String) -> NapiResult<String> {
    let input: ReportInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::calculate_report(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Advisory
// ---------------------------------------------------------------------------

#[napi]
pub fn advice_prompt(input_json: String) -> NapiResult<String> {
    let input: LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        advisory::preview_advice(&AdvisorConfig::from_env(), &input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
