//! Validation and numeric coercion of request records.

use serde_json::Value;

use super::domain::{FeatureSchema, FeatureVector, InputRecord, NormalizedInputs, ValidationError};

/// Check `record` against `schema` and coerce it into a row in schema order.
///
/// All missing fields are reported together. Keys outside the schema are
/// ignored. The function is pure.
pub fn normalize(
    schema: &FeatureSchema,
    record: &InputRecord,
) -> Result<(FeatureVector, NormalizedInputs), ValidationError> {
    let missing: Vec<String> = schema
        .iter()
        .filter(|name| !record.contains_key(*name))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let mut values = Vec::with_capacity(schema.len());
    let mut inputs = NormalizedInputs::with_capacity(schema.len());
    for name in schema.iter() {
        let raw = &record[name];
        let value = coerce(raw).ok_or_else(|| ValidationError::InvalidValue {
            field: name.to_string(),
            raw: display_raw(raw),
        })?;
        values.push(value);
        inputs.push(name, value);
    }

    Ok((FeatureVector::from(values), inputs))
}

/// Numbers, numeric strings and booleans coerce; the result must be finite.
fn coerce(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }?;
    value.is_finite().then_some(value)
}

// Strings are shown verbatim, everything else as JSON text.
fn display_raw(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
