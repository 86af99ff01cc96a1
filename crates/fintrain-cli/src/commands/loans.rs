use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use fintrain_core::loans::amortization::{self, LoanTerms, TermUnit};
use fintrain_core::loans::comparison::{self, LoanCandidate, LoanComparisonInput};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TermUnitArg {
    Years,
    Months,
}

impl From<TermUnitArg> for TermUnit {
    fn from(unit: TermUnitArg) -> Self {
        match unit {
            TermUnitArg::Years => TermUnit::Years,
            TermUnitArg::Months => TermUnit::Months,
        }
    }
}

/// Arguments for a single loan payment calculation
#[derive(Args)]
pub struct AmortizeArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 6 for 6%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term, in --term-unit
    #[arg(long)]
    pub term: Option<Decimal>,

    /// Unit of --term
    #[arg(long, value_enum, default_value = "years")]
    pub term_unit: TermUnitArg,

    /// Payments cover interest only
    #[arg(long)]
    pub interest_only: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for comparing loan offers
#[derive(Args)]
pub struct CompareLoansArgs {
    /// Loan offer as "label,principal,rate_percent,term_years" (repeatable)
    #[arg(long = "loan")]
    pub loans: Vec<String>,

    /// Path to JSON input file with a `candidates` array
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(args)?;
    let result = amortization::amortize(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(args)?;
    let result = amortization::build_amortization_schedule(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare_loans(args: CompareLoansArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cmp_input: LoanComparisonInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if !args.loans.is_empty() {
        let candidates = args
            .loans
            .iter()
            .map(|raw| parse_candidate(raw))
            .collect::<Result<Vec<_>, _>>()?;
        LoanComparisonInput { candidates }
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--loan <label,principal,rate,years>, --input <file.json> or stdin required".into());
    };
    let result = comparison::compare_loans(&cmp_input)?;
    Ok(serde_json::to_value(result)?)
}

fn resolve_terms(args: AmortizeArgs) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    let terms = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanTerms {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_value: args.term.ok_or("--term is required (or provide --input)")?,
            term_unit: args.term_unit.into(),
            interest_only: args.interest_only,
        }
    };
    Ok(terms)
}

fn parse_candidate(raw: &str) -> Result<LoanCandidate, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(format!(
            "Invalid --loan '{raw}': expected label,principal,rate_percent,term_years"
        )
        .into());
    }
    let number = |s: &str, name: &str| -> Result<Decimal, String> {
        s.parse::<Decimal>()
            .map_err(|e| format!("Invalid {name} '{s}' in --loan '{raw}': {e}"))
    };
    Ok(LoanCandidate {
        label: parts[0].to_string(),
        principal: number(parts[1], "principal")?,
        annual_rate_percent: number(parts[2], "rate")?,
        term_value: number(parts[3], "term")?,
        term_unit: TermUnit::Years,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_candidate() {
        let c = parse_candidate("Bank A, 100000, 5.5, 10").unwrap();
        assert_eq!(c.label, "Bank A");
        assert_eq!(c.principal, dec!(100000));
        assert_eq!(c.annual_rate_percent, dec!(5.5));
        assert_eq!(c.term_value, dec!(10));
    }

    #[test]
    fn test_parse_candidate_wrong_arity() {
        assert!(parse_candidate("only,three,parts").is_err());
    }

    #[test]
    fn test_parse_candidate_bad_number() {
        assert!(parse_candidate("A,lots,5,10").is_err());
    }
}
