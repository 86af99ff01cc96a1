use log::{debug, warn};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinTrainError;
use crate::time_value::{annuity_payment, checked, monthly_rate};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::FinTrainResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Unit in which a loan term is expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermUnit {
    #[default]
    Years,
    Months,
}

/// Parameters of a single loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: Money,
    /// Nominal annual rate as a percentage (6 = 6%)
    pub annual_rate_percent: Percent,
    /// Length of the loan in `term_unit`s
    pub term_value: Decimal,
    #[serde(default)]
    pub term_unit: TermUnit,
    /// Payments cover accrued interest only; principal is never repaid by
    /// the computed stream.
    #[serde(default)]
    pub interest_only: bool,
}

impl LoanTerms {
    /// Term converted to a number of monthly payments.
    pub fn term_in_months(&self) -> FinTrainResult<Decimal> {
        match self.term_unit {
            TermUnit::Years => {
                checked(self.term_value.checked_mul(dec!(12)), "loan term in months")
            }
            TermUnit::Months => Ok(self.term_value),
        }
    }
}

/// Headline figures for a loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub principal: Money,
}

/// One month of an amortization table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub opening_balance: Money,
    pub payment: Money,
    pub interest_paid: Money,
    pub principal_paid: Money,
    pub closing_balance: Money,
}

/// Month-by-month amortization table plus the headline figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub summary: AmortizationResult,
    pub rows: Vec<ScheduleRow>,
    /// Principal still owed after the last scheduled payment (non-zero only
    /// for interest-only and zero-rate loans).
    pub remaining_balance: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the monthly payment, total payment and total interest for a
/// standard amortizing or interest-only loan.
///
/// A 0% rate is treated like an interest-only loan, which yields a zero
/// payment and zero interest. That behaviour is kept as-is and flagged in
/// the warnings.
pub fn amortize(terms: &LoanTerms) -> FinTrainResult<ComputationOutput<AmortizationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_terms(terms)?;
    let result = compute_amortization(terms, &mut warnings)?;

    let methodology = if terms.interest_only {
        "Interest-only loan (P x r)"
    } else {
        "Standard amortizing loan (annuity formula)"
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, terms, warnings, elapsed, result))
}

/// Expand a loan into its month-by-month payment table.
///
/// The final row of an amortizing loan absorbs any residual so the closing
/// balance is exactly zero.
pub fn build_amortization_schedule(
    terms: &LoanTerms,
) -> FinTrainResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_terms(terms)?;
    let n = terms.term_in_months()?;
    if !n.fract().is_zero() {
        return Err(FinTrainError::InvalidInput {
            field: "term_value".into(),
            reason: "Schedule requires a whole number of monthly payments".into(),
        });
    }
    let months = n.to_u32().ok_or_else(|| FinTrainError::InvalidInput {
        field: "term_value".into(),
        reason: "Too many monthly payments for a schedule".into(),
    })?;

    let summary = compute_amortization(terms, &mut warnings)?;
    let r = monthly_rate(terms.annual_rate_percent);
    let amortizing = !terms.interest_only && !r.is_zero();

    let mut rows = Vec::with_capacity(months as usize);
    let mut balance = terms.principal;

    for month in 1..=months {
        let opening = balance;
        let interest = opening * r;
        let (payment, principal_paid) = if !amortizing {
            (summary.monthly_payment, Decimal::ZERO)
        } else if month == months {
            (interest + opening, opening)
        } else {
            let principal_paid = summary.monthly_payment - interest;
            (summary.monthly_payment, principal_paid)
        };
        balance = opening - principal_paid;

        rows.push(ScheduleRow {
            month,
            opening_balance: opening,
            payment,
            interest_paid: interest,
            principal_paid,
            closing_balance: balance,
        });
    }

    if !balance.is_zero() {
        warnings.push(format!(
            "{balance} of principal remains outstanding after the final scheduled payment"
        ));
    }

    let output = AmortizationSchedule {
        summary,
        rows,
        remaining_balance: balance,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly amortization schedule",
        terms,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

pub(crate) fn validate_terms(terms: &LoanTerms) -> FinTrainResult<()> {
    if terms.principal <= Decimal::ZERO {
        return Err(FinTrainError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if terms.term_value <= Decimal::ZERO {
        return Err(FinTrainError::InvalidInput {
            field: "term_value".into(),
            reason: "Loan term must be positive".into(),
        });
    }
    if terms.annual_rate_percent < Decimal::ZERO {
        return Err(FinTrainError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    Ok(())
}

/// Core arithmetic shared by the single-loan calculator and the comparison
/// tool. Assumes `terms` has already been validated.
pub(crate) fn compute_amortization(
    terms: &LoanTerms,
    warnings: &mut Vec<String>,
) -> FinTrainResult<AmortizationResult> {
    let r = monthly_rate(terms.annual_rate_percent);
    let n = terms.term_in_months()?;
    debug!(
        "amortize principal={} r={} n={} interest_only={}",
        terms.principal, r, n, terms.interest_only
    );

    if terms.interest_only || r.is_zero() {
        if r.is_zero() {
            warn!("zero interest rate: payment degenerates to 0");
            warnings.push(
                "Zero interest rate: payment is computed as interest-only and is 0; \
                 principal is not amortized"
                    .into(),
            );
        }
        let monthly_payment = checked(terms.principal.checked_mul(r), "interest-only payment")?;
        let total_payment = checked(monthly_payment.checked_mul(n), "total payment")?;
        return Ok(AmortizationResult {
            monthly_payment,
            total_payment,
            total_interest: total_payment,
            principal: terms.principal,
        });
    }

    let monthly_payment = annuity_payment(terms.principal, r, n)?;
    let total_payment = checked(monthly_payment.checked_mul(n), "total payment")?;

    Ok(AmortizationResult {
        monthly_payment,
        total_payment,
        total_interest: total_payment - terms.principal,
        principal: terms.principal,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
