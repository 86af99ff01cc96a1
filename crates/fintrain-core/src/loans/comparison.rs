use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::amortization::{compute_amortization, AmortizationResult, LoanTerms, TermUnit};
use crate::error::FinTrainError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::FinTrainResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// A labelled loan offer to compare.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanCandidate {
    pub label: String,
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub term_value: Decimal,
    #[serde(default)]
    pub term_unit: TermUnit,
}

impl LoanCandidate {
    /// Comparison only ever prices standard amortizing loans.
    pub fn terms(&self) -> LoanTerms {
        LoanTerms {
            principal: self.principal,
            annual_rate_percent: self.annual_rate_percent,
            term_value: self.term_value,
            term_unit: self.term_unit,
            interest_only: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparisonInput {
    /// Candidates in display order; earlier entries win ties.
    pub candidates: Vec<LoanCandidate>,
}

/// One candidate with its computed figures, if it could be priced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparedLoan {
    pub label: String,
    pub terms: LoanTerms,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AmortizationResult>,
    /// Total payment above the cheapest option
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_cost_vs_best: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparisonOutput {
    pub loans: Vec<ComparedLoan>,
    pub best_label: Option<String>,
    pub best_index: Option<usize>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Price each candidate as a standard amortizing loan and pick the one with
/// the lowest total payment.
///
/// Candidates with a non-positive rate, principal or term are left unpriced
/// and excluded from the selection.
pub fn compare_loans(
    input: &LoanComparisonInput,
) -> FinTrainResult<ComputationOutput<LoanComparisonOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.candidates.is_empty() {
        return Err(FinTrainError::InvalidInput {
            field: "candidates".into(),
            reason: "At least one loan is required for comparison".into(),
        });
    }

    let mut loans: Vec<ComparedLoan> = Vec::with_capacity(input.candidates.len());
    for candidate in &input.candidates {
        let terms = candidate.terms();
        let result = if let Some(reason) = skip_reason(&terms) {
            warnings.push(format!("Loan '{}' not compared: {reason}", candidate.label));
            None
        } else {
            Some(compute_amortization(&terms, &mut warnings)?)
        };
        loans.push(ComparedLoan {
            label: candidate.label.clone(),
            terms,
            result,
            extra_cost_vs_best: None,
        });
    }

    // Strict `<` keeps the first-seen candidate on ties
    let mut best: Option<(usize, Money)> = None;
    for (i, loan) in loans.iter().enumerate() {
        if let Some(ref r) = loan.result {
            match best {
                Some((_, cost)) if r.total_payment >= cost => {}
                _ => best = Some((i, r.total_payment)),
            }
        }
    }

    if let Some((_, best_cost)) = best {
        for loan in loans.iter_mut() {
            loan.extra_cost_vs_best = loan.result.as_ref().map(|r| r.total_payment - best_cost);
        }
    } else {
        warnings.push("No loan could be priced; no best option selected".into());
    }

    let best_index = best.map(|(i, _)| i);
    let best_label = best_index.map(|i| loans[i].label.clone());
    debug!("compare_loans candidates={} best={:?}", loans.len(), best_label);

    let output = LoanComparisonOutput {
        loans,
        best_label,
        best_index,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan comparison by minimum total payment",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn skip_reason(terms: &LoanTerms) -> Option<&'static str> {
    if terms.principal <= Decimal::ZERO {
        Some("principal must be positive")
    } else if terms.term_value <= Decimal::ZERO {
        Some("term must be positive")
    } else if terms.annual_rate_percent <= Decimal::ZERO {
        Some("rate must be positive")
    } else {
        None
    }
}
