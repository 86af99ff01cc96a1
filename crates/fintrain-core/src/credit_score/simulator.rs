use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinTrainError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FinTrainResult;

pub const MIN_SCORE: i32 = 300;
pub const MAX_SCORE: i32 = 850;

const TIME_DECAY_PER_MONTH: Decimal = dec!(0.10);
const MIN_TIME_FACTOR: Decimal = dec!(0.5);

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreditScenario {
    NewCreditCard,
    PayDownDebt,
    MissedPayment,
    CloseOldCard,
    IncreaseLimit,
    DebtConsolidation,
}

/// Fixed copy shown alongside a simulated change.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioGuide {
    pub description: &'static str,
    pub tips: &'static [&'static str],
    pub time_to_see_change: &'static str,
}

impl CreditScenario {
    pub const ALL: [CreditScenario; 6] = [
        Self::NewCreditCard,
        Self::PayDownDebt,
        Self::MissedPayment,
        Self::CloseOldCard,
        Self::IncreaseLimit,
        Self::DebtConsolidation,
    ];

    /// Un-decayed point change for a dollar `amount`.
    pub fn base_impact(self, amount: Money) -> i64 {
        let steps = |per: Decimal| -> i64 { (amount / per).floor().to_i64().unwrap_or(i64::MAX) };
        match self {
            Self::NewCreditCard => (-5i64).saturating_sub(steps(dec!(5000)).saturating_mul(2)),
            Self::PayDownDebt => steps(dec!(1000)).saturating_mul(3),
            Self::MissedPayment => (-35i64).saturating_sub(steps(dec!(500)).saturating_mul(5)),
            Self::CloseOldCard => (-10i64).saturating_sub(steps(dec!(1000)).saturating_mul(2)),
            Self::IncreaseLimit => steps(dec!(2000)).saturating_mul(2),
            Self::DebtConsolidation => steps(dec!(5000)),
        }
    }

    pub fn guide(self) -> ScenarioGuide {
        match self {
            Self::NewCreditCard => ScenarioGuide {
                description: "Opening a new credit card triggers a hard inquiry and lowers the \
                              average age of your accounts, causing a small temporary dip.",
                tips: &[
                    "Space out new credit applications by at least six months",
                    "Only apply for cards you are likely to be approved for",
                    "Keep the new card's balance low to help utilization",
                ],
                time_to_see_change: "1-2 months",
            },
            Self::PayDownDebt => ScenarioGuide {
                description: "Paying down revolving balances lowers your credit utilization \
                              ratio, one of the most heavily weighted scoring factors.",
                tips: &[
                    "Aim to keep utilization below 30%, ideally under 10%",
                    "Pay balances before the statement closing date",
                    "Focus on the cards with the highest utilization first",
                ],
                time_to_see_change: "1-2 months",
            },
            Self::MissedPayment => ScenarioGuide {
                description: "A payment reported 30 or more days late is a serious negative mark \
                              that can stay on your report for up to seven years.",
                tips: &[
                    "Set up automatic minimum payments on every account",
                    "Contact the lender immediately and ask for a goodwill adjustment",
                    "Bring the account current as quickly as possible",
                ],
                time_to_see_change: "Immediate; recovery takes 12-24 months",
            },
            Self::CloseOldCard => ScenarioGuide {
                description: "Closing an old card removes its credit limit and can shorten your \
                              credit history, raising utilization and lowering your score.",
                tips: &[
                    "Keep old no-fee cards open and use them occasionally",
                    "Ask for a product change instead of closing the account",
                    "Pay down other balances before closing any card",
                ],
                time_to_see_change: "1-3 months",
            },
            Self::IncreaseLimit => ScenarioGuide {
                description: "A higher credit limit with the same balance lowers your \
                              utilization ratio, which usually improves your score.",
                tips: &[
                    "Ask whether the increase requires a hard inquiry",
                    "Do not treat the extra limit as extra spending money",
                    "Request increases after a raise or a stretch of on-time payments",
                ],
                time_to_see_change: "1-2 months",
            },
            Self::DebtConsolidation => ScenarioGuide {
                description: "Consolidating balances into a single installment loan can lower \
                              revolving utilization and simplify repayments.",
                tips: &[
                    "Compare the consolidation rate against your current rates",
                    "Avoid running up balances on the cards you paid off",
                    "Make every consolidated payment on time",
                ],
                time_to_see_change: "3-6 months",
            },
        }
    }
}

impl std::fmt::Display for CreditScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NewCreditCard => write!(f, "Open a new credit card"),
            Self::PayDownDebt => write!(f, "Pay down debt"),
            Self::MissedPayment => write!(f, "Miss a payment"),
            Self::CloseOldCard => write!(f, "Close an old card"),
            Self::IncreaseLimit => write!(f, "Increase credit limit"),
            Self::DebtConsolidation => write!(f, "Consolidate debt"),
        }
    }
}

/// Conventional score bands on the 300-850 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Poor,
    Fair,
    Good,
    VeryGood,
    Exceptional,
}

impl ScoreBand {
    pub fn for_score(score: i32) -> Self {
        match score {
            s if s < 580 => Self::Poor,
            s if s < 670 => Self::Fair,
            s if s < 740 => Self::Good,
            s if s < 800 => Self::VeryGood,
            _ => Self::Exceptional,
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Poor => write!(f, "Poor"),
            Self::Fair => write!(f, "Fair"),
            Self::Good => write!(f, "Good"),
            Self::VeryGood => write!(f, "Very Good"),
            Self::Exceptional => write!(f, "Exceptional"),
        }
    }
}

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditImpactInput {
    pub current_score: i32,
    pub scenario: CreditScenario,
    /// Dollar amount involved (balance paid, limit added, etc.)
    pub amount: Money,
    /// Months elapsed since the event
    pub timeframe_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreImpactResult {
    pub new_score: i32,
    /// Signed point change before clamping to the scale
    pub impact: i32,
    pub time_factor: Decimal,
    pub description: String,
    pub tips: Vec<String>,
    pub time_to_see_change: String,
    pub current_band: ScoreBand,
    pub new_band: ScoreBand,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Estimate how a credit event moves a score on the 300-850 scale.
///
/// The base impact fades by 10% per elapsed month after the first, down to
/// half its size. Halves round toward positive infinity.
pub fn simulate_credit_impact(
    input: &CreditImpactInput,
) -> FinTrainResult<ComputationOutput<ScoreImpactResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let base = input.scenario.base_impact(input.amount);
    let factor = time_factor(input.timeframe_months);
    let impact = round_half_up(Decimal::from(base) * factor);
    let impact = i32::try_from(impact).unwrap_or(if impact < 0 { i32::MIN } else { i32::MAX });

    let unclamped = i64::from(input.current_score) + i64::from(impact);
    let new_score = unclamped.clamp(i64::from(MIN_SCORE), i64::from(MAX_SCORE)) as i32;
    if i64::from(new_score) != unclamped {
        warnings.push(format!(
            "Score change capped at the {MIN_SCORE}-{MAX_SCORE} scale"
        ));
    }

    debug!(
        "simulate_credit_impact scenario={:?} base={} factor={} impact={}",
        input.scenario, base, factor, impact
    );

    let guide = input.scenario.guide();
    let output = ScoreImpactResult {
        new_score,
        impact,
        time_factor: factor,
        description: guide.description.to_string(),
        tips: guide.tips.iter().map(|t| t.to_string()).collect(),
        time_to_see_change: guide.time_to_see_change.to_string(),
        current_band: ScoreBand::for_score(input.current_score),
        new_band: ScoreBand::for_score(new_score),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        &format!("Credit score simulation: {}", input.scenario),
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_input(input: &CreditImpactInput) -> FinTrainResult<()> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&input.current_score) {
        return Err(FinTrainError::OutOfRange {
            field: "current_score".into(),
            value: Decimal::from(input.current_score),
            min: Decimal::from(MIN_SCORE),
            max: Decimal::from(MAX_SCORE),
        });
    }
    if input.amount < Decimal::ZERO {
        return Err(FinTrainError::InvalidInput {
            field: "amount".into(),
            reason: "Amount cannot be negative".into(),
        });
    }
    if input.timeframe_months == 0 {
        return Err(FinTrainError::InvalidInput {
            field: "timeframe_months".into(),
            reason: "Timeframe must be at least one month".into(),
        });
    }
    Ok(())
}

fn time_factor(timeframe_months: u32) -> Decimal {
    let elapsed = Decimal::from(timeframe_months - 1);
    (Decimal::ONE - elapsed * TIME_DECAY_PER_MONTH).max(MIN_TIME_FACTOR)
}

/// `floor(x + 0.5)`: halves round up, so -3.5 becomes -3.
fn round_half_up(x: Decimal) -> i64 {
    (x + dec!(0.5)).floor().to_i64().unwrap_or(if x < Decimal::ZERO {
        i64::MIN
    } else {
        i64::MAX
    })
}
