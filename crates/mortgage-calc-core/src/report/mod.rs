//! Views over a computed schedule for summary cards, paged tables and charts.

pub mod chart;
pub mod pagination;
pub mod summary;

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{amortize, LoanInput, LoanTerms};
use crate::types::{with_metadata, ComputationOutput};
use crate::MortgageCalcResult;

pub use chart::{chart_series, ChartPoint};
pub use pagination::{paginate, SchedulePage, DEFAULT_PAGE_SIZE};
pub use summary::{summarize, LoanSummary};

/// Loan request plus which table page to include.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInput {
    pub loan: LoanInput,
    /// 0-based page index; defaults to the first page.
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanReport {
    pub summary: LoanSummary,
    pub page: SchedulePage,
    pub chart: Vec<ChartPoint>,
}

/// Compute the schedule and derive everything a results screen shows.
pub fn calculate_report(input: &ReportInput) -> MortgageCalcResult<ComputationOutput<LoanReport>> {
    let start = Instant::now();
    let terms = LoanTerms::try_from(&input.loan)?;
    let result = amortize(&terms);

    let report = LoanReport {
        summary: summarize(&terms, &result)?,
        page: paginate(&result.schedule, input.page_size, input.page)?,
        chart: chart_series(&result, terms.term_years()),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        terms.method().methodology(),
        input,
        Vec::new(),
        elapsed,
        report,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::RepaymentMethod;
    use rust_decimal_macros::dec;

    #[test]
    fn test_report_defaults_to_first_year() {
        let input: ReportInput = serde_json::from_value(serde_json::json!({
            "loan": {
                "principal": "300000000",
                "annual_rate_percent": "4.5",
                "term_years": 30,
                "method": "EqualPrincipalAndInterest"
            }
        }))
        .unwrap();
        assert_eq!(input.page, 0);
        assert_eq!(input.page_size, 12);

        let output = calculate_report(&input).unwrap();
        let report = &output.result;
        assert_eq!(report.page.rows.len(), 12);
        assert_eq!(report.chart.len(), 30);
        assert_eq!(report.summary.months, 360);
        assert_eq!(report.summary.method, RepaymentMethod::EqualPrincipalAndInterest);
    }

    #[test]
    fn test_report_rejects_bad_page() {
        let input = ReportInput {
            loan: LoanInput {
                principal: dec!(10000000),
                annual_rate_percent: dec!(4),
                term_years: dec!(1),
                method: RepaymentMethod::Maturity,
            },
            page: 1,
            page_size: 12,
        };
        assert!(calculate_report(&input).is_err());
    }
}
