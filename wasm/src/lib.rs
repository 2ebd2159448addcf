//! WebAssembly module for the Shrimp Traceability Platform
//!
//! Provides client-side computation for the classification form:
//! - Unit conversion to pounds
//! - Process-type inference from product names
//! - Row aggregation into per-type and grand totals
//! - The output-bound check, without touching any form state
//!
//! Computation lives in plain helpers returning `Result<_, String>`;
//! `JsValue` appears only in the exported wrappers so the logic stays
//! testable on native targets.

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

/// Convert a weight to pounds ("kg" is scaled by 2.20462, "lb" passes through)
#[wasm_bindgen]
pub fn weight_to_pounds(weight: f64, unit: &str) -> Result<f64, JsValue> {
    convert_weight(weight, unit).map_err(|e| JsValue::from_str(&e))
}

/// Round a value the way aggregation boundaries do (2 decimals)
#[wasm_bindgen]
pub fn round_weight(value: f64) -> f64 {
    let value = Decimal::try_from(value).unwrap_or(Decimal::ZERO);
    decimal_to_f64(shared::round2(value))
}

/// Parse a free-text weight field, coercing malformed input to zero
#[wasm_bindgen]
pub fn coerce_weight_input(text: &str) -> f64 {
    decimal_to_f64(shared::coerce_decimal(text))
}

/// Infer the process type ("head_on" or "shell_on") from a product name
#[wasm_bindgen]
pub fn classify_process_type(product_name: Option<String>) -> String {
    shared::classify_product_name(product_name.as_deref())
        .as_str()
        .to_string()
}

/// Compute per-type and overall totals from a JSON array of classification rows
#[wasm_bindgen]
pub fn compute_totals(rows_json: &str) -> Result<String, JsValue> {
    totals_json(rows_json).map_err(|e| JsValue::from_str(&e))
}

/// Read-only output-bound check for rendering
#[wasm_bindgen]
pub fn totals_exceed_output(
    processed: f64,
    rejected: f64,
    waste: f64,
    total_output: f64,
) -> bool {
    shared::totals_exceed_output(
        Decimal::try_from(processed).ok(),
        Decimal::try_from(rejected).ok(),
        Decimal::try_from(waste).ok(),
        Decimal::try_from(total_output).ok(),
    )
}

fn convert_weight(weight: f64, unit: &str) -> Result<f64, String> {
    let unit = parse_unit(unit)?;
    let weight = Decimal::try_from(weight).unwrap_or(Decimal::ZERO);
    Ok(decimal_to_f64(shared::to_pounds(weight, unit)))
}

fn totals_json(rows_json: &str) -> Result<String, String> {
    let rows: Vec<ClassificationDetail> =
        serde_json::from_str(rows_json).map_err(|e| format!("Invalid rows JSON: {}", e))?;
    let totals = shared::SheetTotals::of(&rows);
    serde_json::to_string(&totals).map_err(|e| e.to_string())
}

fn parse_unit(unit: &str) -> Result<WeightUnit, String> {
    match unit {
        "kg" => Ok(WeightUnit::Kg),
        "lb" => Ok(WeightUnit::Lb),
        other => Err(format!("Unknown weight unit: {}", other)),
    }
}

fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}
