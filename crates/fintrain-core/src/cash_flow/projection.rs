use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinTrainError;
use crate::time_value::{checked, compound_factor};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::FinTrainResult;

/// Longest horizon accepted (50 years).
pub const MAX_PROJECTION_MONTHS: u32 = 600;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Assumptions for a monthly cash-flow projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionInputs {
    /// Cash on hand before month 1
    pub starting_cash: Money,
    /// Revenue in month 1
    pub monthly_revenue: Money,
    /// Month-over-month revenue growth (5 = 5%)
    pub revenue_growth_percent: Percent,
    /// Variable costs as a share of revenue (40 = 40%)
    pub variable_expense_rate_percent: Percent,
    /// Fixed costs per month
    pub fixed_expenses: Money,
    pub projection_months: u32,
}

/// A single projected month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowMonth {
    /// 1-based month index
    pub month: u32,
    pub revenue: Money,
    pub expenses: Money,
    pub net_cash_flow: Money,
    /// Starting cash plus all net cash flow up to and including this month
    pub cumulative_cash_flow: Money,
    /// Cash consumed this month; zero when cash-flow positive
    pub burn_rate: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub ending_cash: Money,
    pub total_revenue: Money,
    pub total_expenses: Money,
    pub peak_burn_rate: Money,
    pub lowest_cash_position: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowProjection {
    pub months: Vec<CashFlowMonth>,
    /// First month whose net cash flow is zero or better
    pub break_even_month: Option<u32>,
    /// First month in which cumulative cash is exhausted
    pub runway_month: Option<u32>,
    pub summary: ProjectionSummary,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Simulate revenue, expenses and cash month by month, detecting the
/// break-even month and the month cash runs out.
///
/// Revenue compounds from the month-1 base: `revenue * (1 + g)^(month - 1)`.
pub fn project_cash_flow(
    inputs: &ProjectionInputs,
) -> FinTrainResult<ComputationOutput<CashFlowProjection>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_inputs(inputs)?;

    let growth = inputs.revenue_growth_percent / dec!(100);
    let variable_rate = inputs.variable_expense_rate_percent / dec!(100);

    let mut months: Vec<CashFlowMonth> = Vec::with_capacity(inputs.projection_months as usize);
    let mut cumulative = inputs.starting_cash;
    let mut break_even_month: Option<u32> = None;
    let mut runway_month: Option<u32> = None;

    for month in 1..=inputs.projection_months {
        let factor = compound_factor(growth, Decimal::from(month - 1))?;
        let revenue = checked(inputs.monthly_revenue.checked_mul(factor), "monthly revenue")?;
        let variable_expenses =
            checked(revenue.checked_mul(variable_rate), "variable expenses")?;
        let expenses = checked(
            inputs.fixed_expenses.checked_add(variable_expenses),
            "monthly expenses",
        )?;
        let net_cash_flow = checked(revenue.checked_sub(expenses), "net cash flow")?;
        cumulative = checked(cumulative.checked_add(net_cash_flow), "cumulative cash")?;
        let burn_rate = (-net_cash_flow).max(Decimal::ZERO);

        if break_even_month.is_none() && net_cash_flow >= Decimal::ZERO {
            break_even_month = Some(month);
        }
        if runway_month.is_none() && cumulative <= Decimal::ZERO {
            runway_month = Some(month);
        }

        months.push(CashFlowMonth {
            month,
            revenue,
            expenses,
            net_cash_flow,
            cumulative_cash_flow: cumulative,
            burn_rate,
        });
    }

    let summary = summarise(&months, inputs.starting_cash)?;

    if let Some(m) = runway_month {
        warn!("cash exhausted in month {m}");
        warnings.push(format!("Cash runs out in month {m}"));
    }
    if break_even_month.is_none() {
        warnings.push(format!(
            "Break-even not reached within {} months",
            inputs.projection_months
        ));
    }

    debug!(
        "project_cash_flow months={} break_even={:?} runway={:?}",
        inputs.projection_months, break_even_month, runway_month
    );

    let output = CashFlowProjection {
        months,
        break_even_month,
        runway_month,
        summary,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly cash-flow projection with compounding revenue growth",
        inputs,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_inputs(inputs: &ProjectionInputs) -> FinTrainResult<()> {
    if inputs.projection_months == 0 {
        return Err(FinTrainError::InvalidInput {
            field: "projection_months".into(),
            reason: "Projection must cover at least one month".into(),
        });
    }
    if inputs.projection_months > MAX_PROJECTION_MONTHS {
        return Err(FinTrainError::OutOfRange {
            field: "projection_months".into(),
            value: Decimal::from(inputs.projection_months),
            min: Decimal::ONE,
            max: Decimal::from(MAX_PROJECTION_MONTHS),
        });
    }
    if inputs.monthly_revenue < Decimal::ZERO {
        return Err(FinTrainError::InvalidInput {
            field: "monthly_revenue".into(),
            reason: "Revenue cannot be negative".into(),
        });
    }
    if inputs.fixed_expenses < Decimal::ZERO {
        return Err(FinTrainError::InvalidInput {
            field: "fixed_expenses".into(),
            reason: "Fixed expenses cannot be negative".into(),
        });
    }
    if inputs.revenue_growth_percent <= dec!(-100) {
        return Err(FinTrainError::InvalidInput {
            field: "revenue_growth_percent".into(),
            reason: "Growth must be greater than -100%".into(),
        });
    }
    Ok(())
}

fn checked_total(mut values: impl Iterator<Item = Money>, context: &str) -> FinTrainResult<Money> {
    values.try_fold(Decimal::ZERO, |acc, v| checked(acc.checked_add(v), context))
}

fn summarise(months: &[CashFlowMonth], starting_cash: Money) -> FinTrainResult<ProjectionSummary> {
    let ending_cash = months
        .last()
        .map(|m| m.cumulative_cash_flow)
        .unwrap_or(starting_cash);
    let total_revenue = checked_total(months.iter().map(|m| m.revenue), "total revenue")?;
    let total_expenses = checked_total(months.iter().map(|m| m.expenses), "total expenses")?;
    let peak_burn_rate = months
        .iter()
        .map(|m| m.burn_rate)
        .max()
        .unwrap_or(Decimal::ZERO);
    let lowest_cash_position = months
        .iter()
        .map(|m| m.cumulative_cash_flow)
        .min()
        .unwrap_or(starting_cash);

    Ok(ProjectionSummary {
        ending_cash,
        total_revenue,
        total_expenses,
        peak_burn_rate,
        lowest_cash_position,
    })
}
