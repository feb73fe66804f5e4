use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MortgageCalcError;
use crate::time_value::monthly_rate;
use crate::types::{Money, Rate, Years};
use crate::MortgageCalcResult;

/// Longest term accepted. Keeps `months` (and the annuity power) in a sane range.
pub const MAX_TERM_YEARS: u32 = 100;

/// Largest principal accepted, in currency units.
pub const MAX_PRINCIPAL: Money = dec!(1000000000000000);

/// Highest annual rate accepted, in percent.
pub const MAX_ANNUAL_RATE_PERCENT: Decimal = dec!(100);

pub const MONTHS_PER_YEAR: u32 = 12;

/// How the loan principal is repaid over the term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepaymentMethod {
    /// Interest only every month, full principal in the final month (원금일시상환)
    Maturity,
    /// Constant principal installment, declining interest (원금균등분할상환)
    EqualPrincipal,
    /// Constant total installment from the annuity formula (원리금균등분할상환)
    EqualPrincipalAndInterest,
}

impl RepaymentMethod {
    pub const ALL: [RepaymentMethod; 3] = [
        RepaymentMethod::Maturity,
        RepaymentMethod::EqualPrincipal,
        RepaymentMethod::EqualPrincipalAndInterest,
    ];

    /// Name used for the method on Korean lending documents.
    pub fn korean_name(&self) -> &'static str {
        match self {
            RepaymentMethod::Maturity => "원금일시상환",
            RepaymentMethod::EqualPrincipal => "원금균등분할상환",
            RepaymentMethod::EqualPrincipalAndInterest => "원리금균등분할상환",
        }
    }

    pub fn methodology(&self) -> &'static str {
        match self {
            RepaymentMethod::Maturity => "Interest-Only with Bullet Principal at Maturity",
            RepaymentMethod::EqualPrincipal => "Equal Principal Amortization (Declining Payment)",
            RepaymentMethod::EqualPrincipalAndInterest => {
                "Level Payment Annuity Amortization"
            }
        }
    }
}

impl fmt::Display for RepaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RepaymentMethod::Maturity => "maturity",
            RepaymentMethod::EqualPrincipal => "equal-principal",
            RepaymentMethod::EqualPrincipalAndInterest => "equal-payment",
        };
        f.write_str(name)
    }
}

impl FromStr for RepaymentMethod {
    type Err = MortgageCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "maturity" | "bullet" | "interest-only" => Ok(RepaymentMethod::Maturity),
            "equal-principal" | "equalprincipal" => Ok(RepaymentMethod::EqualPrincipal),
            "equal-payment"
            | "equal-principal-and-interest"
            | "equalprincipalandinterest"
            | "annuity" => Ok(RepaymentMethod::EqualPrincipalAndInterest),
            _ => Err(MortgageCalcError::invalid(
                "method",
                format!(
                    "Unknown repayment method '{s}' (expected maturity, equal-principal or equal-payment)"
                ),
            )),
        }
    }
}

/// Raw loan request as received from a file, stdin, flags or bindings.
///
/// `term_years` is kept as a decimal so that fractional terms are rejected explicitly rather
/// than failing to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Loan amount in whole currency units.
    pub principal: Money,
    /// Annual interest rate in percent (4.5 = 4.5%).
    pub annual_rate_percent: Decimal,
    /// Loan term in whole years.
    pub term_years: Years,
    pub method: RepaymentMethod,
}

/// Validated loan terms. Construct with [`LoanTerms::new`] or `TryFrom<&LoanInput>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LoanTerms {
    principal: Money,
    annual_rate_percent: Decimal,
    term_years: u32,
    method: RepaymentMethod,
}

impl LoanTerms {
    pub fn new(
        principal: Money,
        annual_rate_percent: Decimal,
        term_years: u32,
        method: RepaymentMethod,
    ) -> MortgageCalcResult<Self> {
        validate_principal(principal)?;
        validate_rate(annual_rate_percent)?;
        if term_years == 0 {
            return Err(MortgageCalcError::invalid(
                "term_years",
                "Loan term must be at least 1 year",
            ));
        }
        if term_years > MAX_TERM_YEARS {
            return Err(MortgageCalcError::invalid(
                "term_years",
                format!("Loan term must not exceed {MAX_TERM_YEARS} years"),
            ));
        }

        Ok(LoanTerms {
            principal,
            annual_rate_percent,
            term_years,
            method,
        })
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn annual_rate_percent(&self) -> Decimal {
        self.annual_rate_percent
    }

    pub fn term_years(&self) -> u32 {
        self.term_years
    }

    pub fn method(&self) -> RepaymentMethod {
        self.method
    }

    pub fn months(&self) -> u32 {
        self.term_years * MONTHS_PER_YEAR
    }

    pub fn monthly_rate(&self) -> Rate {
        monthly_rate(self.annual_rate_percent)
    }
}

impl TryFrom<&LoanInput> for LoanTerms {
    type Error = MortgageCalcError;

    fn try_from(input: &LoanInput) -> Result<Self, Self::Error> {
        let term_years = whole_years(input.term_years)?;
        LoanTerms::new(
            input.principal,
            input.annual_rate_percent,
            term_years,
            input.method,
        )
    }
}

impl From<LoanTerms> for LoanInput {
    fn from(terms: LoanTerms) -> Self {
        LoanInput {
            principal: terms.principal,
            annual_rate_percent: terms.annual_rate_percent,
            term_years: Decimal::from(terms.term_years),
            method: terms.method,
        }
    }
}

fn validate_principal(principal: Money) -> MortgageCalcResult<()> {
    if principal <= Decimal::ZERO {
        return Err(MortgageCalcError::invalid(
            "principal",
            "Loan amount must be positive",
        ));
    }
    if principal > MAX_PRINCIPAL {
        return Err(MortgageCalcError::invalid(
            "principal",
            format!("Loan amount must not exceed {MAX_PRINCIPAL}"),
        ));
    }
    Ok(())
}

fn validate_rate(annual_rate_percent: Decimal) -> MortgageCalcResult<()> {
    if annual_rate_percent < Decimal::ZERO {
        return Err(MortgageCalcError::invalid(
            "annual_rate_percent",
            "Interest rate cannot be negative",
        ));
    }
    if annual_rate_percent > MAX_ANNUAL_RATE_PERCENT {
        return Err(MortgageCalcError::invalid(
            "annual_rate_percent",
            format!("Interest rate must not exceed {MAX_ANNUAL_RATE_PERCENT}%"),
        ));
    }
    Ok(())
}

/// Fractional terms are rejected rather than floored.
fn whole_years(term_years: Years) -> MortgageCalcResult<u32> {
    if term_years <= Decimal::ZERO {
        return Err(MortgageCalcError::invalid(
            "term_years",
            "Loan term must be at least 1 year",
        ));
    }
    if !term_years.fract().is_zero() {
        return Err(MortgageCalcError::invalid(
            "term_years",
            format!("Loan term must be a whole number of years, got {term_years}"),
        ));
    }
    term_years
        .to_u32()
        .filter(|years| *years <= MAX_TERM_YEARS)
        .ok_or_else(|| {
            MortgageCalcError::invalid(
                "term_years",
                format!("Loan term must not exceed {MAX_TERM_YEARS} years"),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(principal: Decimal, rate: Decimal, term: Decimal) -> LoanInput {
        LoanInput {
            principal,
            annual_rate_percent: rate,
            term_years: term,
            method: RepaymentMethod::EqualPrincipalAndInterest,
        }
    }

    fn invalid_field(err: MortgageCalcError) -> String {
        match err {
            MortgageCalcError::InvalidInput { field, .. } => field,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_months_and_monthly_rate() {
        let terms = LoanTerms::new(
            dec!(300000000),
            dec!(4.5),
            30,
            RepaymentMethod::EqualPrincipalAndInterest,
        )
        .unwrap();
        assert_eq!(terms.months(), 360);
        assert_eq!(terms.monthly_rate(), dec!(0.00375));
    }

    #[test]
    fn test_zero_principal_rejected() {
        let err = LoanTerms::try_from(&input(Decimal::ZERO, dec!(4), dec!(10))).unwrap_err();
        assert_eq!(invalid_field(err), "principal");
    }

    #[test]
    fn test_negative_principal_rejected() {
        let err = LoanTerms::try_from(&input(dec!(-1), dec!(4), dec!(10))).unwrap_err();
        assert_eq!(invalid_field(err), "principal");
    }

    #[test]
    fn test_negative_rate_rejected() {
        let err = LoanTerms::try_from(&input(dec!(1000), dec!(-0.1), dec!(10))).unwrap_err();
        assert_eq!(invalid_field(err), "annual_rate_percent");
    }

    #[test]
    fn test_rate_above_cap_rejected() {
        let err = LoanTerms::try_from(&input(dec!(1000), dec!(100.5), dec!(10))).unwrap_err();
        assert_eq!(invalid_field(err), "annual_rate_percent");
    }

    #[test]
    fn test_zero_term_rejected() {
        let err = LoanTerms::try_from(&input(dec!(1000), dec!(4), Decimal::ZERO)).unwrap_err();
        assert_eq!(invalid_field(err), "term_years");
    }

    #[test]
    fn test_fractional_term_rejected() {
        let err = LoanTerms::try_from(&input(dec!(1000), dec!(4), dec!(2.5))).unwrap_err();
        assert_eq!(invalid_field(err), "term_years");
    }

    #[test]
    fn test_whole_decimal_term_accepted() {
        let terms = LoanTerms::try_from(&input(dec!(1000), dec!(4), dec!(15.0))).unwrap();
        assert_eq!(terms.term_years(), 15);
    }

    #[test]
    fn test_term_above_cap_rejected() {
        let err = LoanTerms::try_from(&input(dec!(1000), dec!(4), dec!(101))).unwrap_err();
        assert_eq!(invalid_field(err), "term_years");
        assert!(LoanTerms::new(dec!(1000), dec!(4), 101, RepaymentMethod::Maturity).is_err());
        assert!(LoanTerms::new(dec!(1000), dec!(4), 100, RepaymentMethod::Maturity).is_ok());
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!(
            "maturity".parse::<RepaymentMethod>().unwrap(),
            RepaymentMethod::Maturity
        );
        assert_eq!(
            "Equal_Principal".parse::<RepaymentMethod>().unwrap(),
            RepaymentMethod::EqualPrincipal
        );
        assert_eq!(
            "equal-payment".parse::<RepaymentMethod>().unwrap(),
            RepaymentMethod::EqualPrincipalAndInterest
        );
        assert_eq!(
            "EqualPrincipalAndInterest".parse::<RepaymentMethod>().unwrap(),
            RepaymentMethod::EqualPrincipalAndInterest
        );
        assert!("balloon".parse::<RepaymentMethod>().is_err());
    }

    #[test]
    fn test_method_display_round_trips() {
        for method in RepaymentMethod::ALL {
            assert_eq!(method.to_string().parse::<RepaymentMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_method_serializes_by_variant_name() {
        let json = serde_json::to_string(&RepaymentMethod::EqualPrincipal).unwrap();
        assert_eq!(json, "\"EqualPrincipal\"");
    }
}
