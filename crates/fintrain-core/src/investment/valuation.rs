use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinTrainError;
use crate::time_value::checked;
use crate::types::{with_metadata, ComputationOutput, Money, Multiple, Percent, Rate};
use crate::FinTrainResult;

const BASE_DISCOUNT_RATE: Rate = dec!(0.10);
const RISK_DISCOUNT_SENSITIVITY: Rate = dec!(0.05);
const TERMINAL_GROWTH_CAP: Rate = dec!(0.03);

const INCOME_WEIGHT: Decimal = dec!(0.40);
const MARKET_WEIGHT: Decimal = dec!(0.35);
const ASSET_WEIGHT: Decimal = dec!(0.25);

const MIN_CONFIDENCE: Decimal = dec!(20);
const MAX_CONFIDENCE: Decimal = dec!(95);

// ---------------------------------------------------------------------------
// Lookup tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Technology,
    Manufacturing,
    Retail,
    Services,
    Healthcare,
    Finance,
}

impl Industry {
    /// Enterprise value to revenue multiple for the sector.
    pub fn revenue_multiple(self) -> Multiple {
        match self {
            Self::Technology => dec!(5.2),
            Self::Manufacturing => dec!(1.8),
            Self::Retail => dec!(1.2),
            Self::Services => dec!(2.1),
            Self::Healthcare => dec!(3.8),
            Self::Finance => dec!(2.9),
        }
    }
}

impl std::fmt::Display for Industry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Technology => write!(f, "Technology"),
            Self::Manufacturing => write!(f, "Manufacturing"),
            Self::Retail => write!(f, "Retail"),
            Self::Services => write!(f, "Services"),
            Self::Healthcare => write!(f, "Healthcare"),
            Self::Finance => write!(f, "Finance"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskFactor {
    /// Multiplier applied to both the discount rate premium and the market
    /// multiple.
    pub fn adjustment(self) -> Decimal {
        match self {
            Self::Low => dec!(0.85),
            Self::Medium => dec!(1.00),
            Self::High => dec!(1.15),
        }
    }
}

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessMetrics {
    pub revenue: Money,
    pub net_income: Money,
    pub assets: Money,
    pub liabilities: Money,
    pub industry: Industry,
    /// Expected annual growth as a percentage (8 = 8%)
    pub growth_rate_percent: Percent,
    #[serde(default)]
    pub risk_factor: RiskFactor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Net assets (assets - liabilities)
    pub asset_based_value: Money,
    /// Capitalised next-year income (single-stage DCF)
    pub income_based_value: Money,
    /// Revenue x industry multiple x risk adjustment
    pub market_based_value: Money,
    /// 40% income, 35% market, 25% asset
    pub weighted_average: Money,
    /// Agreement between methods, 20..=95
    pub confidence: Decimal,
    pub discount_rate: Rate,
    pub terminal_growth: Rate,
    pub industry_multiple: Multiple,
    pub risk_adjustment: Decimal,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Blend asset-based, income-based and market-multiple valuations of a
/// business using fixed weights.
pub fn compute_valuation(
    metrics: &BusinessMetrics,
) -> FinTrainResult<ComputationOutput<ValuationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_metrics(metrics)?;

    let risk_adjustment = metrics.risk_factor.adjustment();
    let industry_multiple = metrics.industry.revenue_multiple();
    let growth = metrics.growth_rate_percent / dec!(100);

    // Asset approach
    let asset_based_value = metrics.assets - metrics.liabilities;

    // Income approach
    let discount_rate =
        BASE_DISCOUNT_RATE + (risk_adjustment - Decimal::ONE) * RISK_DISCOUNT_SENSITIVITY;
    let terminal_growth = growth.min(TERMINAL_GROWTH_CAP);
    let spread = discount_rate - terminal_growth;
    // Unreachable with the current constants: discount rate >= 0.0925, growth <= 0.03
    if spread.is_zero() {
        return Err(FinTrainError::DivisionByZero {
            context: "income valuation: discount rate equals terminal growth".into(),
        });
    }
    let income_based_value = checked(
        metrics
            .net_income
            .checked_mul(Decimal::ONE + growth)
            .and_then(|v| v.checked_mul(Decimal::ONE + terminal_growth))
            .and_then(|v| v.checked_div(spread)),
        "income-based value",
    )?;

    // Market approach
    let market_based_value = checked(
        metrics
            .revenue
            .checked_mul(industry_multiple)
            .and_then(|v| v.checked_mul(risk_adjustment)),
        "market-based value",
    )?;

    let weighted_average = checked(
        (income_based_value * INCOME_WEIGHT)
            .checked_add(market_based_value * MARKET_WEIGHT)
            .and_then(|v| v.checked_add(asset_based_value * ASSET_WEIGHT)),
        "weighted valuation",
    )?;

    let values = [asset_based_value, income_based_value, market_based_value];
    let confidence = compute_confidence(&values, weighted_average, &mut warnings)?;

    if asset_based_value < Decimal::ZERO {
        warnings.push("Liabilities exceed assets; asset-based value is negative".into());
    }

    debug!(
        "compute_valuation industry={} risk={:?} weighted={}",
        metrics.industry, metrics.risk_factor, weighted_average
    );

    let output = ValuationResult {
        asset_based_value,
        income_based_value,
        market_based_value,
        weighted_average,
        confidence,
        discount_rate,
        terminal_growth,
        industry_multiple,
        risk_adjustment,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Weighted blend of asset, income (DCF) and market-multiple valuations",
        metrics,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_metrics(metrics: &BusinessMetrics) -> FinTrainResult<()> {
    let fields = [
        ("revenue", metrics.revenue),
        ("net_income", metrics.net_income),
        ("assets", metrics.assets),
        ("liabilities", metrics.liabilities),
    ];
    for (field, value) in fields {
        if value < Decimal::ZERO {
            return Err(FinTrainError::InvalidInput {
                field: field.into(),
                reason: "Must be zero or positive".into(),
            });
        }
    }
    Ok(())
}

/// Confidence shrinks as the three methods disagree, relative to the blend.
fn compute_confidence(
    values: &[Money; 3],
    weighted_average: Money,
    warnings: &mut Vec<String>,
) -> FinTrainResult<Decimal> {
    if weighted_average.is_zero() {
        warn!("weighted valuation is zero; confidence pinned to floor");
        warnings.push("Weighted valuation is zero; confidence set to the minimum".into());
        return Ok(MIN_CONFIDENCE);
    }
    let max = values.iter().copied().fold(values[0], Decimal::max);
    let min = values.iter().copied().fold(values[0], Decimal::min);
    let range = checked(max.checked_sub(min), "valuation range")?;
    let dispersion = checked(
        range
            .checked_div(weighted_average)
            .and_then(|v| v.checked_mul(dec!(100))),
        "valuation dispersion",
    )?;
    let raw = checked(dec!(100).checked_sub(dispersion), "confidence")?;
    Ok(raw.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> BusinessMetrics {
        BusinessMetrics {
            revenue: dec!(1_000_000),
            net_income: dec!(150_000),
            assets: dec!(800_000),
            liabilities: dec!(300_000),
            industry: Industry::Services,
            growth_rate_percent: dec!(10),
            risk_factor: RiskFactor::Medium,
        }
    }

    #[test]
    fn test_medium_risk_discount_rate() {
        let out = compute_valuation(&sample()).unwrap().result;
        assert_eq!(out.discount_rate, dec!(0.10));
        // growth of 10% is capped at 3% terminal
        assert_eq!(out.terminal_growth, dec!(0.03));
    }

    #[test]
    fn test_three_methods() {
        let out = compute_valuation(&sample()).unwrap().result;
        assert_eq!(out.asset_based_value, dec!(500_000));
        // 150k * 1.1 * 1.03 / 0.07
        let expected_income = dec!(165_000) * dec!(1.03) / dec!(0.07);
        assert!((out.income_based_value - expected_income).abs() < dec!(0.000001));
        assert_eq!(out.market_based_value, dec!(2_100_000));
    }

    #[test]
    fn test_high_risk_raises_discount_rate() {
        let mut m = sample();
        m.risk_factor = RiskFactor::High;
        let out = compute_valuation(&m).unwrap().result;
        assert_eq!(out.discount_rate, dec!(0.1075));
        assert_eq!(out.market_based_value, dec!(1_000_000) * dec!(2.1) * dec!(1.15));
    }

    #[test]
    fn test_negative_growth_not_capped() {
        let mut m = sample();
        m.growth_rate_percent = dec!(-5);
        let out = compute_valuation(&m).unwrap().result;
        assert_eq!(out.terminal_growth, dec!(-0.05));
    }

    #[test]
    fn test_discount_rate_always_exceeds_terminal_growth() {
        for risk_factor in [RiskFactor::Low, RiskFactor::Medium, RiskFactor::High] {
            let m = BusinessMetrics {
                growth_rate_percent: dec!(500),
                risk_factor,
                ..sample()
            };
            let out = compute_valuation(&m).unwrap().result;
            assert!(out.discount_rate >= dec!(0.0925));
            assert_eq!(out.terminal_growth, TERMINAL_GROWTH_CAP);
            assert!(out.discount_rate > out.terminal_growth);
        }
    }

    #[test]
    fn test_all_zero_pins_confidence_to_floor() {
        let m = BusinessMetrics {
            revenue: Decimal::ZERO,
            net_income: Decimal::ZERO,
            assets: Decimal::ZERO,
            liabilities: Decimal::ZERO,
            ..sample()
        };
        let out = compute_valuation(&m).unwrap();
        assert_eq!(out.result.confidence, dec!(20));
        assert!(!out.warnings.is_empty());
    }

    #[test]
    fn test_negative_revenue_rejected() {
        let mut m = sample();
        m.revenue = dec!(-1);
        assert!(compute_valuation(&m).is_err());
    }

    #[test]
    fn test_market_value_overflow() {
        let m = BusinessMetrics {
            revenue: dec!(50_000_000_000_000_000_000_000_000_000),
            industry: Industry::Technology,
            ..sample()
        };
        let err = compute_valuation(&m).unwrap_err();
        assert!(matches!(err, FinTrainError::Overflow { .. }));
    }
}
