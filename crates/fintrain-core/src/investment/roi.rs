use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinTrainError;
use crate::time_value::checked;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::FinTrainResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiInput {
    pub initial_investment: Money,
    pub final_value: Money,
    /// Holding period in months
    pub period_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiOutput {
    pub profit: Money,
    pub roi_percent: Percent,
    /// Linear extrapolation of `roi_percent` to a 12-month period
    pub annualized_roi_percent: Percent,
    /// Months to recover the initial outlay at the average monthly profit;
    /// 0 when the investment made no profit.
    pub payback_period_months: Decimal,
    pub is_profitable: bool,
}

/// Return on investment, simple annualised return and payback period.
///
/// Annualisation scales linearly (`roi * 12 / months`); it is not a
/// compounded CAGR.
pub fn compute_roi(input: &RoiInput) -> FinTrainResult<ComputationOutput<RoiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.initial_investment <= Decimal::ZERO {
        return Err(FinTrainError::InvalidInput {
            field: "initial_investment".into(),
            reason: "Initial investment must be positive".into(),
        });
    }
    if input.final_value < Decimal::ZERO {
        return Err(FinTrainError::InvalidInput {
            field: "final_value".into(),
            reason: "Final value cannot be negative".into(),
        });
    }
    if input.period_months == 0 {
        return Err(FinTrainError::InvalidInput {
            field: "period_months".into(),
            reason: "Holding period must be at least one month".into(),
        });
    }

    let months = Decimal::from(input.period_months);
    let profit = input.final_value - input.initial_investment;
    let roi_percent = checked(
        profit
            .checked_div(input.initial_investment)
            .and_then(|v| v.checked_mul(dec!(100))),
        "ROI percentage",
    )?;

    let annualized_roi_percent = if input.period_months == 12 {
        roi_percent
    } else {
        checked(roi_percent.checked_mul(dec!(12) / months), "annualised ROI")?
    };

    let is_profitable = profit > Decimal::ZERO;
    let payback_period_months = if is_profitable {
        checked(
            input.initial_investment.checked_div(profit / months),
            "payback period",
        )?
    } else {
        warnings.push("Investment did not return a profit; payback period is undefined".into());
        Decimal::ZERO
    };

    debug!("compute_roi profit={profit} roi={roi_percent}%");

    let output = RoiOutput {
        profit,
        roi_percent,
        annualized_roi_percent,
        payback_period_months,
        is_profitable,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Simple ROI with linear annualisation",
        input,
        warnings,
        elapsed,
        output,
    ))
}
