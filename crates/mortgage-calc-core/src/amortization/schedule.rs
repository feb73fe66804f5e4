use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::strategy::{strategy_for, Period};
use super::terms::{LoanInput, LoanTerms, RepaymentMethod};
use crate::types::*;
use crate::MortgageCalcResult;

/// Absorbed final-month drift above this many currency units is reported as a warning.
pub const CLOSURE_TOLERANCE: Money = dec!(10);

/// A single month in the amortization schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    pub month: u32,
    pub principal: Money,
    pub interest: Money,
    /// Always `principal + interest`.
    pub total_payment: Money,
    /// Outstanding balance after this month's payment.
    pub balance: Money,
}

/// Full schedule with aggregate totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub total_interest: Money,
    pub total_payment: Money,
    pub schedule: Vec<AmortizationEntry>,
}

impl CalculationResult {
    pub fn first(&self) -> Option<&AmortizationEntry> {
        self.schedule.first()
    }

    pub fn last(&self) -> Option<&AmortizationEntry> {
        self.schedule.last()
    }

    pub fn total_principal(&self) -> Money {
        self.schedule.iter().map(|e| e.principal).sum()
    }
}

/// Compute the schedule for raw arguments, validating them first.
pub fn compute(
    principal: Money,
    annual_rate_percent: Decimal,
    term_years: u32,
    method: RepaymentMethod,
) -> MortgageCalcResult<CalculationResult> {
    let terms = LoanTerms::new(principal, annual_rate_percent, term_years, method)?;
    Ok(amortize(&terms))
}

/// Compute the schedule for validated terms.
pub fn amortize(terms: &LoanTerms) -> CalculationResult {
    build_schedule(terms).0
}

/// Validate a raw request and compute its schedule inside the standard envelope.
pub fn calculate_loan(
    input: &LoanInput,
) -> MortgageCalcResult<ComputationOutput<CalculationResult>> {
    let start = Instant::now();
    let terms = LoanTerms::try_from(input)?;

    let (result, warnings) = build_schedule(&terms);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        terms.method().methodology(),
        &serde_json::json!({
            "principal": terms.principal().to_string(),
            "annual_rate_percent": terms.annual_rate_percent().to_string(),
            "monthly_rate": terms.monthly_rate().normalize().to_string(),
            "term_years": terms.term_years(),
            "months": terms.months(),
            "method": terms.method(),
        }),
        warnings,
        elapsed,
        result,
    ))
}

fn build_schedule(terms: &LoanTerms) -> (CalculationResult, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let strategy = strategy_for(terms);
    let total_months = terms.months();
    let monthly_rate = terms.monthly_rate();

    log::debug!(
        "amortizing {} over {} months at {} monthly ({})",
        terms.principal(),
        total_months,
        monthly_rate.normalize(),
        terms.method()
    );

    let mut schedule = Vec::with_capacity(total_months as usize);
    let mut balance = terms.principal();
    let mut total_interest = Decimal::ZERO;
    let mut total_payment = Decimal::ZERO;

    for month in 1..=total_months {
        let period = Period {
            month,
            total_months,
            balance,
            monthly_rate,
        };
        let due = strategy.split(&period);
        let interest = due.interest.max(Decimal::ZERO);

        let principal = if period.is_final() {
            // The final month takes whatever is left so the loan closes at exactly zero.
            let drift = (due.principal - balance).abs();
            if drift > CLOSURE_TOLERANCE {
                log::warn!("final month absorbed {drift} of principal drift");
                warnings.push(format!(
                    "Month {month}: final principal adjusted by {} to close the loan",
                    drift.normalize()
                ));
            }
            balance
        } else {
            due.principal.max(Decimal::ZERO).min(balance)
        };

        balance = if period.is_final() {
            Decimal::ZERO
        } else {
            balance - principal
        };

        let payment = principal + interest;
        total_interest += interest;
        total_payment += payment;

        schedule.push(AmortizationEntry {
            month,
            principal: principal.normalize(),
            interest: interest.normalize(),
            total_payment: payment.normalize(),
            balance: balance.normalize(),
        });
    }

    let result = CalculationResult {
        total_interest: total_interest.normalize(),
        total_payment: total_payment.normalize(),
        schedule,
    };
    (result, warnings)
}
