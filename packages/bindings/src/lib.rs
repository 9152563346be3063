use napi::Result as NapiResult;
use napi_derive::napi;

use deal_checker_core::deal::types::{DealInput, FinancingMethod};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Deal evaluation
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_deal(input_json: String) -> NapiResult<String> {
    let input: DealInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = deal_checker_core::deal::evaluate_deal(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn validate_deal_input(input_json: String) -> NapiResult<String> {
    let input: DealInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let errors = deal_checker_core::deal::validate_deal_input(&input);
    serde_json::to_string(&errors).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Financing explanations
// ---------------------------------------------------------------------------

#[napi]
pub fn financing_explanation(method: String) -> String {
    FinancingMethod::from(method.as_str()).explanation().to_string()
}
