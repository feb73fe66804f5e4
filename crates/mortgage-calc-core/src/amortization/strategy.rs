//! Per-month principal/interest split for each repayment method.
//!
//! A strategy only answers "how much principal and interest is due this month given the
//! opening balance". Closing the loan exactly on the final month and clamping are done once
//! by the schedule builder, for every method alike.

use rust_decimal::Decimal;

use super::terms::{LoanTerms, RepaymentMethod};
use crate::time_value::{annuity_payment, MONEY_DP};
use crate::types::{Money, Rate};

/// State of the loan at the start of a month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Period {
    /// 1-based month index.
    pub month: u32,
    pub total_months: u32,
    /// Outstanding balance before this month's payment.
    pub balance: Money,
    pub monthly_rate: Rate,
}

impl Period {
    pub fn is_final(&self) -> bool {
        self.month == self.total_months
    }

    /// Interest accrued on the opening balance.
    pub fn interest(&self) -> Money {
        (self.balance * self.monthly_rate).round_dp(MONEY_DP)
    }
}

/// One month's formulaic split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Installment {
    pub principal: Money,
    pub interest: Money,
}

pub trait RepaymentStrategy: Send + Sync {
    fn method(&self) -> RepaymentMethod;

    fn split(&self, period: &Period) -> Installment;
}

/// Interest only; the whole balance falls due in the final month.
#[derive(Debug, Clone, Copy, Default)]
pub struct Maturity;

impl RepaymentStrategy for Maturity {
    fn method(&self) -> RepaymentMethod {
        RepaymentMethod::Maturity
    }

    fn split(&self, period: &Period) -> Installment {
        let principal = if period.is_final() {
            period.balance
        } else {
            Decimal::ZERO
        };
        Installment {
            principal,
            interest: period.interest(),
        }
    }
}

/// Fixed principal installment of `principal / months`.
#[derive(Debug, Clone, Copy)]
pub struct EqualPrincipal {
    installment: Money,
}

impl EqualPrincipal {
    pub fn new(principal: Money, total_months: u32) -> Self {
        EqualPrincipal {
            installment: (principal / Decimal::from(total_months)).round_dp(MONEY_DP),
        }
    }

    pub fn installment(&self) -> Money {
        self.installment
    }
}

impl RepaymentStrategy for EqualPrincipal {
    fn method(&self) -> RepaymentMethod {
        RepaymentMethod::EqualPrincipal
    }

    fn split(&self, period: &Period) -> Installment {
        Installment {
            principal: self.installment,
            interest: period.interest(),
        }
    }
}

/// Level annuity payment; principal is whatever the payment leaves after interest.
#[derive(Debug, Clone, Copy)]
pub struct EqualPrincipalAndInterest {
    payment: Money,
}

impl EqualPrincipalAndInterest {
    pub fn new(principal: Money, monthly_rate: Rate, total_months: u32) -> Self {
        // A rate too small to move (1 + r)^-n at 28 digits behaves as zero.
        let payment = annuity_payment(monthly_rate, total_months, principal)
            .unwrap_or_else(|_| principal / Decimal::from(total_months.max(1)));
        EqualPrincipalAndInterest {
            payment: payment.round_dp(MONEY_DP),
        }
    }

    pub fn payment(&self) -> Money {
        self.payment
    }
}

impl RepaymentStrategy for EqualPrincipalAndInterest {
    fn method(&self) -> RepaymentMethod {
        RepaymentMethod::EqualPrincipalAndInterest
    }

    fn split(&self, period: &Period) -> Installment {
        let interest = period.interest();
        Installment {
            principal: (self.payment - interest).max(Decimal::ZERO),
            interest,
        }
    }
}

/// Build the strategy for validated terms.
pub fn strategy_for(terms: &LoanTerms) -> Box<dyn RepaymentStrategy> {
    match terms.method() {
        RepaymentMethod::Maturity => Box::new(Maturity),
        RepaymentMethod::EqualPrincipal => {
            Box::new(EqualPrincipal::new(terms.principal(), terms.months()))
        }
        RepaymentMethod::EqualPrincipalAndInterest => Box::new(EqualPrincipalAndInterest::new(
            terms.principal(),
            terms.monthly_rate(),
            terms.months(),
        )),
    }
}
