//! Month-by-month amortization under the three repayment methods.

pub mod schedule;
pub mod strategy;
pub mod terms;

pub use schedule::{amortize, calculate_loan, compute, AmortizationEntry, CalculationResult};
pub use strategy::RepaymentStrategy;
pub use terms::{LoanInput, LoanTerms, RepaymentMethod};
