mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::cash_flow::CashFlowArgs;
use commands::credit_score::CreditImpactArgs;
use commands::investment::{RoiArgs, ValuationArgs};
use commands::loans::{AmortizeArgs, CompareLoansArgs};

/// Loan, investment, cash-flow and credit-score calculators
#[derive(Parser)]
#[command(
    name = "fintrain",
    version,
    about = "Loan, investment, cash-flow and credit-score calculators",
    long_about = "Calculators from the finance-training platform with decimal precision: \
                  loan payments and comparison, ROI, business valuation, monthly cash-flow \
                  projection and credit score what-ifs. Set RUST_LOG=debug for diagnostics."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment, total payment and total interest for a loan
    Amortize(AmortizeArgs),
    /// Month-by-month amortization table for a loan
    AmortizationSchedule(AmortizeArgs),
    /// Compare loan offers and pick the cheapest
    CompareLoans(CompareLoansArgs),
    /// Return on investment and payback period
    Roi(RoiArgs),
    /// Blend asset, income and market valuations of a business
    Valuation(ValuationArgs),
    /// Project monthly cash flow, break-even and runway
    CashFlow(CashFlowArgs),
    /// Simulate how a credit event moves a credit score
    CreditImpact(CreditImpactArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Amortize(args) => commands::loans::run_amortize(args),
        Commands::AmortizationSchedule(args) => commands::loans::run_schedule(args),
        Commands::CompareLoans(args) => commands::loans::run_compare_loans(args),
        Commands::Roi(args) => commands::investment::run_roi(args),
        Commands::Valuation(args) => commands::investment::run_valuation(args),
        Commands::CashFlow(args) => commands::cash_flow::run_cash_flow(args),
        Commands::CreditImpact(args) => commands::credit_score::run_credit_impact(args),
        Commands::Version => {
            println!("fintrain {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
