use fintrain_core::loans::amortization::{self, LoanTerms, TermUnit};
use fintrain_core::loans::comparison::{self, LoanCandidate, LoanComparisonInput};
use fintrain_core::FinTrainError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Amortization tests
// ===========================================================================

fn thirty_year_mortgage() -> LoanTerms {
    LoanTerms {
        principal: dec!(100_000),
        annual_rate_percent: dec!(6),
        term_value: dec!(30),
        term_unit: TermUnit::Years,
        interest_only: false,
    }
}

#[test]
fn test_thirty_year_mortgage_reference_values() {
    // r = 0.005, n = 360
    let out = amortization::amortize(&thirty_year_mortgage()).unwrap().result;
    assert!(
        (out.monthly_payment - dec!(599.55)).abs() < dec!(0.01),
        "Expected ~599.55, got {}",
        out.monthly_payment
    );
    // 599.5505 * 360
    assert!(
        (out.total_payment - dec!(215_838.19)).abs() < dec!(0.01),
        "Expected ~215,838.19, got {}",
        out.total_payment
    );
    assert!(
        (out.total_interest - dec!(115_838.19)).abs() < dec!(0.01),
        "Expected ~115,838.19, got {}",
        out.total_interest
    );
}

#[test]
fn test_standard_loan_payment_identities() {
    let terms = LoanTerms {
        principal: dec!(250_000),
        annual_rate_percent: dec!(4.25),
        term_value: dec!(180),
        term_unit: TermUnit::Months,
        interest_only: false,
    };
    let out = amortization::amortize(&terms).unwrap().result;
    assert_eq!(out.total_payment, out.monthly_payment * dec!(180));
    assert_eq!(out.total_interest, out.total_payment - dec!(250_000));
    assert_eq!(out.principal, dec!(250_000));
}

#[test]
fn test_amortize_is_pure() {
    let terms = thirty_year_mortgage();
    let first = amortization::amortize(&terms).unwrap().result;
    let second = amortization::amortize(&terms).unwrap().result;
    assert_eq!(first, second);
}

#[test]
fn test_interest_only_twelve_months() {
    let terms = LoanTerms {
        principal: dec!(100_000),
        annual_rate_percent: dec!(6),
        term_value: dec!(12),
        term_unit: TermUnit::Months,
        interest_only: true,
    };
    let out = amortization::amortize(&terms).unwrap();
    assert_eq!(out.result.monthly_payment, dec!(500));
    assert_eq!(out.result.total_payment, dec!(6_000));
    assert_eq!(out.result.total_interest, dec!(6_000));
    assert!(out.methodology.contains("Interest-only"));
}

#[test]
fn test_zero_rate_interest_only_yields_zero() {
    let terms = LoanTerms {
        annual_rate_percent: Decimal::ZERO,
        interest_only: true,
        ..thirty_year_mortgage()
    };
    let out = amortization::amortize(&terms).unwrap().result;
    assert_eq!(out.monthly_payment, Decimal::ZERO);
    assert_eq!(out.total_payment, Decimal::ZERO);
    assert_eq!(out.total_interest, Decimal::ZERO);
}

#[test]
fn test_zero_term_rejected() {
    let terms = LoanTerms {
        term_value: Decimal::ZERO,
        ..thirty_year_mortgage()
    };
    match amortization::amortize(&terms).unwrap_err() {
        FinTrainError::InvalidInput { field, .. } => assert_eq!(field, "term_value"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_millennium_term_overflows_instead_of_panicking() {
    // (1.005)^12000 fits in a Decimal, P r (1+r)^n does not
    let terms = LoanTerms {
        principal: dec!(1_000_000),
        annual_rate_percent: dec!(6),
        term_value: dec!(1000),
        term_unit: TermUnit::Years,
        interest_only: false,
    };
    let err = amortization::amortize(&terms).unwrap_err();
    assert!(matches!(err, FinTrainError::Overflow { .. }));
    let err = amortization::build_amortization_schedule(&terms).unwrap_err();
    assert!(matches!(err, FinTrainError::Overflow { .. }));
}

#[test]
fn test_interest_only_total_overflow() {
    let terms = LoanTerms {
        principal: dec!(10_000_000_000_000_000_000_000_000_000),
        annual_rate_percent: dec!(12),
        term_value: dec!(1000),
        term_unit: TermUnit::Years,
        interest_only: true,
    };
    let err = amortization::amortize(&terms).unwrap_err();
    assert!(matches!(err, FinTrainError::Overflow { .. }));
}

#[test]
fn test_schedule_first_row_split() {
    let out = amortization::build_amortization_schedule(&thirty_year_mortgage())
        .unwrap()
        .result;
    let first = &out.rows[0];
    assert_eq!(first.month, 1);
    assert_eq!(first.opening_balance, dec!(100_000));
    assert_eq!(first.interest_paid, dec!(500));
    assert!((first.principal_paid - dec!(99.55)).abs() < dec!(0.01));
}

#[test]
fn test_terms_deserialize_with_defaults() {
    let json = r#"{"principal":"1000","annual_rate_percent":"5","term_value":"2"}"#;
    let terms: LoanTerms = serde_json::from_str(json).unwrap();
    assert_eq!(terms.term_unit, TermUnit::Years);
    assert!(!terms.interest_only);
    assert_eq!(terms.term_in_months().unwrap(), dec!(24));
}

// ===========================================================================
// Loan comparison tests
// ===========================================================================

fn offer(label: &str, rate: Decimal, years: Decimal) -> LoanCandidate {
    LoanCandidate {
        label: label.into(),
        principal: dec!(100_000),
        annual_rate_percent: rate,
        term_value: years,
        term_unit: TermUnit::Years,
    }
}

#[test]
fn test_shorter_cheaper_loan_wins() {
    let input = LoanComparisonInput {
        candidates: vec![
            offer("A", dec!(5.5), dec!(10)),
            offer("B", dec!(6.0), dec!(15)),
        ],
    };
    let out = comparison::compare_loans(&input).unwrap().result;
    let a = out.loans[0].result.as_ref().unwrap();
    let b = out.loans[1].result.as_ref().unwrap();
    assert!(a.total_payment < b.total_payment);
    assert_eq!(out.best_label.as_deref(), Some("A"));
    assert_eq!(out.best_index, Some(0));
}

#[test]
fn test_best_selected_regardless_of_position() {
    let input = LoanComparisonInput {
        candidates: vec![
            offer("Long", dec!(6.0), dec!(15)),
            offer("Short", dec!(5.5), dec!(10)),
            offer("Pricey", dec!(9.0), dec!(10)),
        ],
    };
    let out = comparison::compare_loans(&input).unwrap().result;
    assert_eq!(out.best_label.as_deref(), Some("Short"));
    assert_eq!(out.loans[1].extra_cost_vs_best, Some(Decimal::ZERO));
    assert!(out.loans[0].extra_cost_vs_best.unwrap() > Decimal::ZERO);
    assert!(out.loans[2].extra_cost_vs_best.unwrap() > Decimal::ZERO);
}

#[test]
fn test_comparison_preserves_order_and_labels() {
    let input = LoanComparisonInput {
        candidates: vec![
            offer("one", dec!(7), dec!(5)),
            offer("two", Decimal::ZERO, dec!(5)),
            offer("three", dec!(4), dec!(5)),
        ],
    };
    let out = comparison::compare_loans(&input).unwrap().result;
    let labels: Vec<&str> = out.loans.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels, vec!["one", "two", "three"]);
    assert!(out.loans[1].result.is_none());
    assert!(out.loans[1].extra_cost_vs_best.is_none());
    assert!(out.loans.iter().all(|l| !l.terms.interest_only));
}

#[test]
fn test_comparison_matches_single_loan_calculator() {
    let input = LoanComparisonInput {
        candidates: vec![offer("A", dec!(5.5), dec!(10))],
    };
    let compared = comparison::compare_loans(&input).unwrap().result;
    let single = amortization::amortize(&input.candidates[0].terms())
        .unwrap()
        .result;
    assert_eq!(compared.loans[0].result.as_ref(), Some(&single));
}

#[test]
fn test_comparison_fails_whole_when_a_candidate_overflows() {
    let input = LoanComparisonInput {
        candidates: vec![
            offer("sane", dec!(6), dec!(30)),
            offer("forever", dec!(6), dec!(2000)),
        ],
    };
    let err = comparison::compare_loans(&input).unwrap_err();
    assert!(matches!(err, FinTrainError::Overflow { .. }));
}
