use napi::Result as NapiResult;
use napi_derive::napi;

use serde::Deserialize;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Profit engine
// ---------------------------------------------------------------------------

#[napi]
pub fn expected_profit(input_json: String) -> NapiResult<String> {
    let input: loan_analytics_core::profit::ExpectedProfitInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_analytics_core::profit::calculate_expected_profit(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn profit_thresholds(input_json: String) -> NapiResult<String> {
    let input: loan_analytics_core::profit::ThresholdSweepInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rows = loan_analytics_core::profit::calculate_profit_thresholds(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&rows).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct BestThresholdRequest {
    rows: Vec<loan_analytics_core::profit::ThresholdRow>,
    kpi: loan_analytics_core::profit::Kpi,
}

#[napi]
pub fn best_threshold(input_json: String) -> NapiResult<String> {
    let request: BestThresholdRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let best = loan_analytics_core::profit::best_threshold(&request.rows, request.kpi);
    serde_json::to_string(&best).map_err(to_napi_error)
}

#[napi]
pub fn break_even_discount(input_json: String) -> NapiResult<String> {
    let input: loan_analytics_core::profit::BreakEvenInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_analytics_core::profit::calculate_break_even_discount(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Preparation & features
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PrepareRequest {
    loans: Vec<loan_analytics_core::prep::RawLoanRecord>,
    investment_date: chrono::NaiveDate,
}

#[napi]
pub fn prepare_loans(input_json: String) -> NapiResult<String> {
    let request: PrepareRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let prepared = loan_analytics_core::prep::prepare_loans(&request.loans, request.investment_date)
        .map_err(to_napi_error)?;
    serde_json::to_string(&prepared).map_err(to_napi_error)
}

#[napi]
pub fn fico_features(input_json: String) -> NapiResult<String> {
    let input: loan_analytics_core::features::FicoInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let features = loan_analytics_core::features::fico_features(&input);
    serde_json::to_string(&features).map_err(to_napi_error)
}
