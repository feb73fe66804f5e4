use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::{CalculationResult, LoanTerms, RepaymentMethod};
use crate::error::MortgageCalcError;
use crate::time_value::MONEY_DP;
use crate::types::{Money, Rate};
use crate::MortgageCalcResult;

const RATIO_DP: u32 = 6;

/// Headline figures for a computed schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub method: RepaymentMethod,
    pub months: u32,
    pub principal: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    /// Payment due in month 1.
    pub first_payment: Money,
    /// Payment due in the final month.
    pub last_payment: Money,
    pub average_payment: Money,
    pub max_payment: Money,
    /// Total interest as a multiple of the principal.
    pub interest_to_principal: Rate,
    /// Principal as a share of everything repaid.
    pub principal_share: Rate,
    /// Interest as a share of everything repaid.
    pub interest_share: Rate,
}

pub fn summarize(terms: &LoanTerms, result: &CalculationResult) -> MortgageCalcResult<LoanSummary> {
    let (first, last) = match (result.first(), result.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(MortgageCalcError::invalid(
                "schedule",
                "Cannot summarize an empty schedule",
            ))
        }
    };
    if result.total_payment.is_zero() {
        return Err(MortgageCalcError::DivisionByZero {
            context: "payment shares".into(),
        });
    }

    let months = result.schedule.len() as u32;
    let max_payment = result
        .schedule
        .iter()
        .map(|e| e.total_payment)
        .max()
        .unwrap_or(Decimal::ZERO);
    let principal = terms.principal();

    Ok(LoanSummary {
        method: terms.method(),
        months,
        principal,
        total_interest: result.total_interest,
        total_payment: result.total_payment,
        first_payment: first.total_payment,
        last_payment: last.total_payment,
        average_payment: (result.total_payment / Decimal::from(months))
            .round_dp(MONEY_DP)
            .normalize(),
        max_payment,
        interest_to_principal: (result.total_interest / principal)
            .round_dp(RATIO_DP)
            .normalize(),
        principal_share: (principal / result.total_payment)
            .round_dp(RATIO_DP)
            .normalize(),
        interest_share: (result.total_interest / result.total_payment)
            .round_dp(RATIO_DP)
            .normalize(),
    })
}
