pub mod amortization;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "report")]
pub mod report;

#[cfg(feature = "advisory")]
pub mod advisory;

pub use amortization::{
    amortize, calculate_loan, compute, AmortizationEntry, CalculationResult, LoanInput, LoanTerms,
    RepaymentMethod,
};
pub use error::MortgageCalcError;
pub use types::*;

/// Standard result type for all mortgage-calc operations
pub type MortgageCalcResult<T> = Result<T, MortgageCalcError>;
