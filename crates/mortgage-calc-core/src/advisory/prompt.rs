use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::amortization::{CalculationResult, LoanInput};
use crate::types::Money;

/// One 억 (hundred million won).
const EOK: Decimal = dec!(100000000);

pub const SYSTEM_INSTRUCTION: &str =
    "You are a helpful, professional financial advisor specializing in Korean real estate loans.";

/// Whole-won amount with thousands separators, e.g. `1,520,056`.
pub fn format_won(amount: Money) -> String {
    let rounded = amount.round();
    let digits = rounded.abs().trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Prompt describing the loan and its schedule for the advisory model.
pub fn build_prompt(input: &LoanInput, result: &CalculationResult) -> String {
    let eok = (input.principal / EOK).round_dp(2).normalize();

    let mut lines = vec![
        "You are a professional financial planner. A user entered the following mortgage terms:"
            .to_string(),
        String::new(),
        format!(
            "- Loan amount: {eok} 억원 ({} 원)",
            format_won(input.principal)
        ),
        format!("- Annual interest rate: {}%", input.annual_rate_percent.normalize()),
        format!("- Term: {} years", input.term_years.normalize()),
        format!("- Repayment method: {}", input.method.korean_name()),
        String::new(),
        "Calculated results:".to_string(),
        format!("- Total interest: {} 원", format_won(result.total_interest)),
        format!("- Total repayment: {} 원", format_won(result.total_payment)),
    ];
    if let Some(first) = result.first() {
        lines.push(format!(
            "- First monthly payment: {} 원",
            format_won(first.total_payment)
        ));
    }
    if result.schedule.len() > 1 {
        if let Some(last) = result.last() {
            lines.push(format!(
                "- Final monthly payment: {} 원",
                format_won(last.total_payment)
            ));
        }
    }

    lines.extend([
        String::new(),
        "Provide an analysis of these loan terms covering:".to_string(),
        "1. Advantages and disadvantages of this repayment method.".to_string(),
        format!(
            "2. A general comment on whether the current rate ({}%) is reasonable, assuming 2024-2025 market conditions.",
            input.annual_rate_percent.normalize()
        ),
        "3. Tips for reducing the monthly burden, including early repayment strategies.".to_string(),
        "4. Potential risks to watch for.".to_string(),
        String::new(),
        "Format the answer as clean markdown and respond in Korean.".to_string(),
    ]);

    lines.join("\n")
}
