use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use fintrain_core::credit_score::simulator::{self, CreditImpactInput, CreditScenario};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScenarioArg {
    NewCreditCard,
    PayDownDebt,
    MissedPayment,
    CloseOldCard,
    IncreaseLimit,
    DebtConsolidation,
}

impl From<ScenarioArg> for CreditScenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::NewCreditCard => CreditScenario::NewCreditCard,
            ScenarioArg::PayDownDebt => CreditScenario::PayDownDebt,
            ScenarioArg::MissedPayment => CreditScenario::MissedPayment,
            ScenarioArg::CloseOldCard => CreditScenario::CloseOldCard,
            ScenarioArg::IncreaseLimit => CreditScenario::IncreaseLimit,
            ScenarioArg::DebtConsolidation => CreditScenario::DebtConsolidation,
        }
    }
}

/// Arguments for a credit score what-if
#[derive(Args)]
pub struct CreditImpactArgs {
    /// Current score (300-850)
    #[arg(long)]
    pub score: Option<i32>,

    /// Credit event to simulate
    #[arg(long, value_enum)]
    pub scenario: Option<ScenarioArg>,

    /// Dollar amount involved
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Months since the event
    #[arg(long, default_value = "1")]
    pub months: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_credit_impact(args: CreditImpactArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let impact_input: CreditImpactInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        CreditImpactInput {
            current_score: args.score.ok_or("--score is required (or provide --input)")?,
            scenario: args
                .scenario
                .ok_or("--scenario is required (or provide --input)")?
                .into(),
            amount: args.amount.ok_or("--amount is required (or provide --input)")?,
            timeframe_months: args.months,
        }
    };
    let result = simulator::simulate_credit_impact(&impact_input)?;
    Ok(serde_json::to_value(result)?)
}
