use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use fintrain_core::cash_flow::projection::{self, ProjectionInputs};

use crate::input;

/// Arguments for a monthly cash-flow projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CashFlowArgs {
    /// Cash on hand today
    #[arg(long, default_value = "0")]
    pub starting_cash: Decimal,

    /// Revenue in the first month
    #[arg(long)]
    pub monthly_revenue: Option<Decimal>,

    /// Month-over-month revenue growth in percent
    #[arg(long)]
    pub growth: Option<Decimal>,

    /// Variable costs as a percentage of revenue
    #[arg(long)]
    pub variable_rate: Option<Decimal>,

    /// Fixed costs per month
    #[arg(long)]
    pub fixed_expenses: Option<Decimal>,

    /// Number of months to project
    #[arg(long, default_value = "12")]
    pub months: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_cash_flow(args: CashFlowArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs: ProjectionInputs = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ProjectionInputs {
            starting_cash: args.starting_cash,
            monthly_revenue: args
                .monthly_revenue
                .ok_or("--monthly-revenue is required (or provide --input)")?,
            revenue_growth_percent: args.growth.unwrap_or(dec!(0)),
            variable_expense_rate_percent: args.variable_rate.unwrap_or(dec!(0)),
            fixed_expenses: args
                .fixed_expenses
                .ok_or("--fixed-expenses is required (or provide --input)")?,
            projection_months: args.months,
        }
    };
    let result = projection::project_cash_flow(&inputs)?;
    Ok(serde_json::to_value(result)?)
}
