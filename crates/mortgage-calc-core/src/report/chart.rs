use serde::{Deserialize, Serialize};

use crate::amortization::CalculationResult;
use crate::types::Money;

/// Terms longer than this are charted one point per year instead of per month.
pub const ANNUAL_SAMPLING_THRESHOLD_YEARS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub month: u32,
    pub year: u32,
    pub principal: Money,
    pub interest: Money,
    pub balance: Money,
}

pub fn sampling_step(term_years: u32) -> usize {
    if term_years > ANNUAL_SAMPLING_THRESHOLD_YEARS {
        12
    } else {
        1
    }
}

/// Decimated principal/interest/balance series for charting.
pub fn chart_series(result: &CalculationResult, term_years: u32) -> Vec<ChartPoint> {
    let step = sampling_step(term_years);
    result
        .schedule
        .iter()
        .enumerate()
        .filter(|(idx, _)| (idx + 1) % step == 0)
        .map(|(_, entry)| {
            let year = entry.month.div_ceil(12);
            ChartPoint {
                label: format!("Year {year}"),
                month: entry.month,
                year,
                principal: entry.principal,
                interest: entry.interest,
                balance: entry.balance,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::{compute, RepaymentMethod};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_long_term_sampled_annually() {
        let result = compute(dec!(300000000), dec!(4.5), 30, RepaymentMethod::EqualPrincipal)
            .unwrap();
        let points = chart_series(&result, 30);
        assert_eq!(points.len(), 30);
        assert_eq!(points[0].month, 12);
        assert_eq!(points[0].label, "Year 1");
        assert_eq!(points[29].month, 360);
        assert_eq!(points[29].label, "Year 30");
        assert_eq!(points[29].balance, Decimal::ZERO);
    }

    #[test]
    fn test_short_term_sampled_monthly() {
        let result = compute(dec!(100000000), dec!(3), 10, RepaymentMethod::Maturity).unwrap();
        let points = chart_series(&result, 10);
        assert_eq!(points.len(), 120);
        assert_eq!(points[0].label, "Year 1");
        assert_eq!(points[12].month, 13);
        assert_eq!(points[12].year, 2);
    }

    #[test]
    fn test_sampling_threshold() {
        assert_eq!(sampling_step(10), 1);
        assert_eq!(sampling_step(11), 12);
    }
}
