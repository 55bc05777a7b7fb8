use super::{io_error, ToolsError};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

pub fn load_yaml(path: &Path) -> Result<Mapping, ToolsError> {
    let raw = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    parse_yaml_mapping(&raw).map_err(|err| match err {
        ToolsError::Yaml { source, .. } => ToolsError::Yaml {
            path: path.display().to_string(),
            source,
        },
        ToolsError::NotAMapping { .. } => ToolsError::NotAMapping {
            path: path.display().to_string(),
        },
        other => other,
    })
}

pub fn parse_yaml_mapping(raw: &str) -> Result<Mapping, ToolsError> {
    if raw.trim().is_empty() {
        return Ok(Mapping::new());
    }
    let value: Value = serde_yaml::from_str(raw).map_err(|source| ToolsError::Yaml {
        path: "<inline>".to_string(),
        source,
    })?;
    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping
            .into_iter()
            .map(|(key, value)| (key, coerce_value(value)))
            .collect()),
        _ => Err(ToolsError::NotAMapping {
            path: "<inline>".to_string(),
        }),
    }
}

fn coerce_value(value: Value) -> Value {
    match value {
        Value::String(raw) => match raw.as_str() {
            "None" => Value::Null,
            "inf" | "+inf" | "Inf" => Value::from(f64::INFINITY),
            "-inf" | "-Inf" => Value::from(f64::NEG_INFINITY),
            _ => match parse_exponent_only(&raw) {
                Some(number) => Value::from(number),
                None => Value::String(raw),
            },
        },
        other => other,
    }
}

// `1e5` style scalars: mantissa without a decimal point.
fn parse_exponent_only(raw: &str) -> Option<f64> {
    let (mantissa, exponent) = raw.split_once(['e', 'E'])?;
    let digits = mantissa.strip_prefix(['+', '-']).unwrap_or(mantissa);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let exp_digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
    if exp_digits.is_empty() || !exp_digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
