use serde::{Deserialize, Serialize};

use crate::amortization::AmortizationEntry;
use crate::error::MortgageCalcError;
use crate::MortgageCalcResult;

/// One year of monthly rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// A slice of the schedule for tabular display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulePage {
    /// 0-based page index.
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// 1-based loan year of the first row on the page.
    pub year: usize,
    pub first_month: u32,
    pub last_month: u32,
    pub has_previous: bool,
    pub has_next: bool,
    pub rows: Vec<AmortizationEntry>,
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Slice page `page` (0-based) of `page_size` rows out of the schedule.
pub fn paginate(
    schedule: &[AmortizationEntry],
    page_size: usize,
    page: usize,
) -> MortgageCalcResult<SchedulePage> {
    if page_size == 0 {
        return Err(MortgageCalcError::invalid(
            "page_size",
            "Page size must be at least 1",
        ));
    }
    let pages = total_pages(schedule.len(), page_size);
    if page >= pages {
        return Err(MortgageCalcError::invalid(
            "page",
            format!("Page {} out of range (schedule has {pages} pages)", page + 1),
        ));
    }

    let start = page * page_size;
    let end = (start + page_size).min(schedule.len());
    let rows = schedule[start..end].to_vec();

    Ok(SchedulePage {
        page,
        page_size,
        total_pages: pages,
        year: start / 12 + 1,
        first_month: rows.first().map(|r| r.month).unwrap_or_default(),
        last_month: rows.last().map(|r| r.month).unwrap_or_default(),
        has_previous: page > 0,
        has_next: page + 1 < pages,
        rows,
    })
}
