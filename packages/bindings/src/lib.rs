use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[napi]
pub fn amortize(input_json: String) -> NapiResult<String> {
    let input: fintrain_core::loans::amortization::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fintrain_core::loans::amortization::amortize(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: fintrain_core::loans::amortization::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fintrain_core::loans::amortization::build_amortization_schedule(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_loans(input_json: String) -> NapiResult<String> {
    let input: fintrain_core::loans::comparison::LoanComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fintrain_core::loans::comparison::compare_loans(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Investment
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_roi(input_json: String) -> NapiResult<String> {
    let input: fintrain_core::investment::roi::RoiInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fintrain_core::investment::roi::compute_roi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compute_valuation(input_json: String) -> NapiResult<String> {
    let input: fintrain_core::investment::valuation::BusinessMetrics =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fintrain_core::investment::valuation::compute_valuation(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Cash flow
// ---------------------------------------------------------------------------

#[napi]
pub fn project_cash_flow(input_json: String) -> NapiResult<String> {
    let input: fintrain_core::cash_flow::projection::ProjectionInputs =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fintrain_core::cash_flow::projection::project_cash_flow(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Credit score
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_credit_impact(input_json: String) -> NapiResult<String> {
    let input: fintrain_core::credit_score::simulator::CreditImpactInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fintrain_core::credit_score::simulator::simulate_credit_impact(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
