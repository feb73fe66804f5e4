use mortgage_calc_core::amortization::{
    amortize, calculate_loan, compute, AmortizationEntry, LoanInput, LoanTerms, RepaymentMethod,
};
use mortgage_calc_core::MortgageCalcError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn assert_invalid(result: Result<impl std::fmt::Debug, MortgageCalcError>, expected_field: &str) {
    match result {
        Err(MortgageCalcError::InvalidInput { field, .. }) => assert_eq!(field, expected_field),
        other => panic!("expected InvalidInput on {expected_field}, got {other:?}"),
    }
}

// ===========================================================================
// Concrete scenarios
// ===========================================================================

#[test]
fn test_scenario_level_payment_thirty_years() {
    let result = compute(
        dec!(300000000),
        dec!(4.5),
        30,
        RepaymentMethod::EqualPrincipalAndInterest,
    )
    .unwrap();

    assert_eq!(result.schedule.len(), 360);
    assert_eq!(result.schedule[0].interest, dec!(1125000));
    assert!(
        (result.schedule[0].total_payment - dec!(1520055.93)).abs() < dec!(0.01),
        "first payment {}",
        result.schedule[0].total_payment
    );

    for pair in result.schedule.windows(2) {
        assert!(
            pair[1].balance < pair[0].balance,
            "balance rose or stalled at month {}",
            pair[1].month
        );
    }
    assert_eq!(result.schedule[359].balance, Decimal::ZERO);

    // 360 payments of ~1,520,055.93 less the principal
    assert!(
        (result.total_interest - dec!(247220134.61)).abs() < dec!(1),
        "total interest {}",
        result.total_interest
    );
    assert_eq!(result.total_payment, result.total_interest + dec!(300000000));
}

#[test]
fn test_scenario_equal_principal_zero_rate() {
    let result = compute(dec!(120000000), Decimal::ZERO, 10, RepaymentMethod::EqualPrincipal)
        .unwrap();

    assert_eq!(result.schedule.len(), 120);
    for entry in &result.schedule {
        assert_eq!(entry.interest, Decimal::ZERO);
        assert_eq!(entry.principal, dec!(1000000));
        assert_eq!(entry.total_payment, dec!(1000000));
    }
    assert_eq!(result.schedule[0].balance, dec!(119000000));
    assert_eq!(result.total_interest, Decimal::ZERO);
    assert_eq!(result.total_payment, dec!(120000000));
}

#[test]
fn test_scenario_maturity_one_year() {
    let result = compute(dec!(100000000), dec!(3.0), 1, RepaymentMethod::Maturity).unwrap();

    assert_eq!(result.schedule.len(), 12);
    for entry in &result.schedule[..11] {
        assert_eq!(entry.principal, Decimal::ZERO);
        assert_eq!(entry.balance, dec!(100000000));
    }
    assert_eq!(
        result.schedule[11],
        AmortizationEntry {
            month: 12,
            principal: dec!(100000000),
            interest: dec!(250000),
            total_payment: dec!(100250000),
            balance: Decimal::ZERO,
        }
    );
}

// ===========================================================================
// Zero-rate degradation
// ===========================================================================

#[test]
fn test_level_payment_zero_rate_is_equal_installments() {
    let result = compute(
        dec!(120000000),
        Decimal::ZERO,
        10,
        RepaymentMethod::EqualPrincipalAndInterest,
    )
    .unwrap();

    for entry in &result.schedule {
        assert_eq!(entry.interest, Decimal::ZERO);
        assert_eq!(entry.total_payment, dec!(1000000));
    }
    assert_eq!(result.total_payment, dec!(120000000));
}

#[test]
fn test_level_payment_zero_rate_non_divisible_closes() {
    let result = compute(
        dec!(100000000),
        Decimal::ZERO,
        30,
        RepaymentMethod::EqualPrincipalAndInterest,
    )
    .unwrap();

    let expected = dec!(100000000) / dec!(360);
    for entry in &result.schedule {
        assert_eq!(entry.interest, Decimal::ZERO);
        assert!((entry.total_payment - expected).abs() < dec!(0.000001));
    }
    assert_eq!(result.total_principal(), dec!(100000000));
    assert_eq!(result.schedule[359].balance, Decimal::ZERO);
}

// ===========================================================================
// Cross-method invariants
// ===========================================================================

#[test]
fn test_invariants_hold_for_every_method() {
    for method in RepaymentMethod::ALL {
        for (principal, rate, years) in [
            (dec!(300000000), dec!(4.5), 30),
            (dec!(100), dec!(7.25), 3),
            (dec!(987654321), dec!(0.1), 40),
            (dec!(50000000), dec!(19.9), 5),
            (dec!(1), dec!(3.3), 1),
        ] {
            let result = compute(principal, rate, years, method).unwrap();
            let label = format!("{method} {principal} {rate}% {years}y");

            assert_eq!(result.schedule.len() as u32, years * 12, "{label}");
            assert_eq!(result.schedule.last().unwrap().balance, Decimal::ZERO, "{label}");
            assert_eq!(result.total_principal(), principal, "{label}");

            let mut previous = principal;
            for (idx, entry) in result.schedule.iter().enumerate() {
                assert_eq!(entry.month as usize, idx + 1, "{label}");
                assert_eq!(entry.total_payment, entry.principal + entry.interest, "{label}");
                assert!(entry.principal >= Decimal::ZERO, "{label}");
                assert!(entry.interest >= Decimal::ZERO, "{label}");
                assert!(entry.balance >= Decimal::ZERO, "{label}");
                assert!(entry.balance <= previous, "{label}");
                previous = entry.balance;
            }

            let interest: Decimal = result.schedule.iter().map(|e| e.interest).sum();
            assert_eq!(result.total_interest, interest, "{label}");
            assert_eq!(result.total_payment, interest + principal, "{label}");
        }
    }
}

#[test]
fn test_method_ordering_of_total_interest() {
    // Bullet repayment carries the full balance longest; equal principal retires it fastest.
    let interest = |method| {
        compute(dec!(300000000), dec!(4.5), 30, method)
            .unwrap()
            .total_interest
    };
    let maturity = interest(RepaymentMethod::Maturity);
    let annuity = interest(RepaymentMethod::EqualPrincipalAndInterest);
    let equal_principal = interest(RepaymentMethod::EqualPrincipal);

    assert!(maturity > annuity);
    assert!(annuity > equal_principal);
}

#[test]
fn test_repeated_calls_are_identical() {
    let terms = LoanTerms::new(
        dec!(432100000),
        dec!(3.875),
        25,
        RepaymentMethod::EqualPrincipalAndInterest,
    )
    .unwrap();
    let first = amortize(&terms);
    let second = amortize(&terms);
    assert_eq!(first, second);
}

#[test]
fn test_hundred_year_high_rate_loan_stays_finite() {
    let result = compute(
        dec!(1000000000000000),
        dec!(100),
        100,
        RepaymentMethod::EqualPrincipalAndInterest,
    )
    .unwrap();
    assert_eq!(result.schedule.len(), 1200);
    assert_eq!(result.schedule[1199].balance, Decimal::ZERO);
    assert_eq!(result.total_principal(), dec!(1000000000000000));
}

// ===========================================================================
// Invalid input
// ===========================================================================

#[test]
fn test_invalid_inputs_never_produce_a_schedule() {
    assert_invalid(
        compute(dec!(1000000), dec!(4), 0, RepaymentMethod::EqualPrincipal),
        "term_years",
    );
    assert_invalid(
        compute(Decimal::ZERO, dec!(4), 10, RepaymentMethod::EqualPrincipal),
        "principal",
    );
    assert_invalid(
        compute(dec!(-5000), dec!(4), 10, RepaymentMethod::Maturity),
        "principal",
    );
    assert_invalid(
        compute(dec!(1000000), dec!(-0.5), 10, RepaymentMethod::Maturity),
        "annual_rate_percent",
    );
    assert_invalid(
        compute(dec!(1000000), dec!(4), 101, RepaymentMethod::Maturity),
        "term_years",
    );
}

#[test]
fn test_calculate_loan_from_json() {
    let input: LoanInput = serde_json::from_str(
        r#"{
            "principal": "100000000",
            "annual_rate_percent": 3.0,
            "term_years": 1,
            "method": "Maturity"
        }"#,
    )
    .unwrap();
    let output = calculate_loan(&input).unwrap();
    assert_eq!(output.result.total_interest, dec!(3000000));
    assert_eq!(output.metadata.precision, "rust_decimal_128bit");
}

#[test]
fn test_calculate_loan_rejects_fractional_years() {
    let input = LoanInput {
        principal: dec!(100000000),
        annual_rate_percent: dec!(3),
        term_years: dec!(2.5),
        method: RepaymentMethod::Maturity,
    };
    assert_invalid(calculate_loan(&input), "term_years");
}
