use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_overpayment(input_json: String) -> NapiResult<String> {
    let input: loanguard_core::simulation::LoanParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loanguard_core::simulation::simulate_overpayment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Annuity
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentBindingInput {
    principal: rust_decimal::Decimal,
    annual_interest_rate_percent: rust_decimal::Decimal,
    term_months: u32,
}

#[napi]
pub fn annuity_payment(input_json: String) -> NapiResult<String> {
    let input: PaymentBindingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rate = loanguard_core::annuity::monthly_rate(input.annual_interest_rate_percent);
    let payment = loanguard_core::annuity::annuity_payment(input.principal, rate, input.term_months)
        .map_err(to_napi_error)?;
    serde_json::to_string(&payment).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Meta
// ---------------------------------------------------------------------------

#[napi]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
