use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::MortgageCalcError;
use crate::types::{Money, Rate};
use crate::MortgageCalcResult;

/// Decimal places kept on every monthly monetary amount. With principal capped at 1e15 this
/// leaves sums and differences inside the 28 significant digits of `Decimal`, so they are exact.
pub const MONEY_DP: u32 = 10;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Monthly periodic rate from an annual percentage (4.5 -> 0.00375).
pub fn monthly_rate(annual_rate_percent: Decimal) -> Rate {
    annual_rate_percent / dec!(100) / MONTHS_PER_YEAR
}

/// Discount factor `(1 + rate)^-nper`, by repeated multiplication.
///
/// Working with the reciprocal keeps the value in `(0, 1]` for non-negative rates, so long terms
/// decay towards zero instead of overflowing the way `(1 + rate)^nper` can.
pub fn discount_factor(rate: Rate, nper: u32) -> MortgageCalcResult<Decimal> {
    if rate <= dec!(-1) {
        return Err(MortgageCalcError::invalid(
            "rate",
            "Periodic rate must be greater than -100%",
        ));
    }

    let v = Decimal::ONE / (Decimal::ONE + rate);
    let mut factor = Decimal::ONE;
    for _ in 0..nper {
        factor *= v;
    }
    Ok(factor)
}

/// Level payment that retires `present_value` over `nper` periods at `rate`.
///
/// Equivalent to `pv * r * (1+r)^n / ((1+r)^n - 1)`. Falls back to straight division when the
/// rate is zero. The result is a positive amount.
pub fn annuity_payment(rate: Rate, nper: u32, present_value: Money) -> MortgageCalcResult<Money> {
    if nper == 0 {
        return Err(MortgageCalcError::invalid(
            "nper",
            "Number of periods must be > 0",
        ));
    }

    if rate.is_zero() {
        return Ok(present_value / Decimal::from(nper));
    }

    let denominator = Decimal::ONE - discount_factor(rate, nper)?;
    if denominator.is_zero() {
        return Err(MortgageCalcError::DivisionByZero {
            context: "annuity payment denominator".into(),
        });
    }

    Ok(present_value * rate / denominator)
}
