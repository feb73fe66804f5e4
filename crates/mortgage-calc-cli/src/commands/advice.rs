use serde_json::Value;

use mortgage_calc_core::advisory::{self, AdvisorConfig};

use crate::commands::loan::{resolve_loan, LoanArgs};

/// Show the advisory prompt for a loan and whether a credential is configured.
pub fn run_advice_prompt(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = resolve_loan(&args)?;
    let config = AdvisorConfig::from_env();
    let result = advisory::preview_advice(&config, &loan_input)?;
    Ok(serde_json::to_value(result)?)
}
