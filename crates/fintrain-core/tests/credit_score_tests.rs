use fintrain_core::credit_score::simulator::{
    self, CreditImpactInput, CreditScenario, ScoreBand, MAX_SCORE, MIN_SCORE,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Credit-score simulator tests
// ===========================================================================

fn run(score: i32, scenario: CreditScenario, amount: Decimal, months: u32) -> i32 {
    simulator::simulate_credit_impact(&CreditImpactInput {
        current_score: score,
        scenario,
        amount,
        timeframe_months: months,
    })
    .unwrap()
    .result
    .new_score
}

#[test]
fn test_new_score_always_on_scale() {
    let scores = [300, 450, 700, 849, 850];
    let amounts = [Decimal::ZERO, dec!(999), dec!(50_000), dec!(10_000_000)];
    for scenario in CreditScenario::ALL {
        for score in scores {
            for amount in amounts {
                for months in [1, 3, 12] {
                    let s = run(score, scenario, amount, months);
                    assert!(
                        (MIN_SCORE..=MAX_SCORE).contains(&s),
                        "{scenario:?} {score} {amount} {months} => {s}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_clamps_to_exact_bounds() {
    // Huge paydown from a high score pins at 850
    assert_eq!(run(840, CreditScenario::PayDownDebt, dec!(100_000), 1), 850);
    // Large missed payment from a low score pins at 300
    assert_eq!(run(320, CreditScenario::MissedPayment, dec!(10_000), 1), 300);
}

#[test]
fn test_clamp_emits_warning_but_keeps_raw_impact() {
    let out = simulator::simulate_credit_impact(&CreditImpactInput {
        current_score: 840,
        scenario: CreditScenario::PayDownDebt,
        amount: dec!(100_000),
        timeframe_months: 1,
    })
    .unwrap();
    assert_eq!(out.result.impact, 300);
    assert_eq!(out.result.new_score, 850);
    assert_eq!(out.result.new_band, ScoreBand::Exceptional);
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn test_time_decay_never_increases_magnitude() {
    for scenario in CreditScenario::ALL {
        for amount in [dec!(500), dec!(7_500), dec!(42_000)] {
            let impact_at = |months: u32| {
                simulator::simulate_credit_impact(&CreditImpactInput {
                    current_score: 600,
                    scenario,
                    amount,
                    timeframe_months: months,
                })
                .unwrap()
                .result
                .impact
            };
            assert!(
                impact_at(12).abs() <= impact_at(1).abs(),
                "{scenario:?} at {amount}"
            );
        }
    }
}

#[test]
fn test_new_card_three_months_out() {
    // base = -5 - floor(12_000 / 5_000) * 2 = -9; factor 0.8 => -7.2 => -7
    let out = simulator::simulate_credit_impact(&CreditImpactInput {
        current_score: 720,
        scenario: CreditScenario::NewCreditCard,
        amount: dec!(12_000),
        timeframe_months: 3,
    })
    .unwrap()
    .result;
    assert_eq!(out.impact, -7);
    assert_eq!(out.new_score, 713);
    assert_eq!(out.time_factor, dec!(0.8));
    assert_eq!(out.current_band, ScoreBand::Good);
}

#[test]
fn test_scenario_wire_names() {
    let s: CreditScenario = serde_json::from_str("\"debt-consolidation\"").unwrap();
    assert_eq!(s, CreditScenario::DebtConsolidation);
    let json = serde_json::to_string(&CreditScenario::CloseOldCard).unwrap();
    assert_eq!(json, "\"close-old-card\"");
}

#[test]
fn test_every_scenario_has_guidance() {
    for scenario in CreditScenario::ALL {
        let g = scenario.guide();
        assert!(!g.description.is_empty());
        assert!(!g.tips.is_empty());
        assert!(!g.time_to_see_change.is_empty());
    }
}
