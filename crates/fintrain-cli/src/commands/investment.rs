use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use fintrain_core::investment::roi::{self, RoiInput};
use fintrain_core::investment::valuation::{self, BusinessMetrics, Industry, RiskFactor};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum IndustryArg {
    Technology,
    Manufacturing,
    Retail,
    Services,
    Healthcare,
    Finance,
}

impl From<IndustryArg> for Industry {
    fn from(arg: IndustryArg) -> Self {
        match arg {
            IndustryArg::Technology => Industry::Technology,
            IndustryArg::Manufacturing => Industry::Manufacturing,
            IndustryArg::Retail => Industry::Retail,
            IndustryArg::Services => Industry::Services,
            IndustryArg::Healthcare => Industry::Healthcare,
            IndustryArg::Finance => Industry::Finance,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RiskArg {
    Low,
    Medium,
    High,
}

impl From<RiskArg> for RiskFactor {
    fn from(arg: RiskArg) -> Self {
        match arg {
            RiskArg::Low => RiskFactor::Low,
            RiskArg::Medium => RiskFactor::Medium,
            RiskArg::High => RiskFactor::High,
        }
    }
}

/// Arguments for return on investment
#[derive(Args)]
pub struct RoiArgs {
    /// Amount invested
    #[arg(long)]
    pub initial: Option<Decimal>,

    /// Value at the end of the holding period
    #[arg(long = "final")]
    pub final_value: Option<Decimal>,

    /// Holding period in months
    #[arg(long, default_value = "12")]
    pub months: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for business valuation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ValuationArgs {
    /// Annual revenue
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Annual net income
    #[arg(long)]
    pub net_income: Option<Decimal>,

    /// Total assets
    #[arg(long)]
    pub assets: Option<Decimal>,

    /// Total liabilities
    #[arg(long)]
    pub liabilities: Option<Decimal>,

    /// Industry for the revenue multiple
    #[arg(long, value_enum)]
    pub industry: Option<IndustryArg>,

    /// Expected annual growth in percent
    #[arg(long)]
    pub growth: Option<Decimal>,

    /// Business risk
    #[arg(long, value_enum, default_value = "medium")]
    pub risk: RiskArg,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_roi(args: RoiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let roi_input: RoiInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        RoiInput {
            initial_investment: args
                .initial
                .ok_or("--initial is required (or provide --input)")?,
            final_value: args
                .final_value
                .ok_or("--final is required (or provide --input)")?,
            period_months: args.months,
        }
    };
    let result = roi::compute_roi(&roi_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_valuation(args: ValuationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let metrics: BusinessMetrics = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        BusinessMetrics {
            revenue: args
                .revenue
                .ok_or("--revenue is required (or provide --input)")?,
            net_income: args
                .net_income
                .ok_or("--net-income is required (or provide --input)")?,
            assets: args.assets.unwrap_or(dec!(0)),
            liabilities: args.liabilities.unwrap_or(dec!(0)),
            industry: args
                .industry
                .ok_or("--industry is required (or provide --input)")?
                .into(),
            growth_rate_percent: args.growth.unwrap_or(dec!(0)),
            risk_factor: args.risk.into(),
        }
    };
    let result = valuation::compute_valuation(&metrics)?;
    Ok(serde_json::to_value(result)?)
}
