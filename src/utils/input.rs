//! Parsing of `--filter key=value` and `--order field:direction` arguments

use crate::error::CliError;
use crate::query::FilterValue;
use crate::query::params::FILTER_DATE_FORMAT;
use chrono::NaiveDateTime;

/// Split `key=value` and infer the value's type
pub fn parse_filter(input: &str) -> Result<(String, FilterValue), CliError> {
    let (key, raw) = input
        .split_once('=')
        .ok_or_else(|| CliError::InvalidFilter {
            input: input.to_string(),
            reason: "expected <key>=<value>".to_string(),
        })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::InvalidFilter {
            input: input.to_string(),
            reason: "key cannot be empty".to_string(),
        });
    }

    Ok((key.to_string(), infer_filter_value(raw)))
}

/// `true`/`false` and `YYYY-MM-DDTHH:MM:SS` get their own types.
/// Everything else, numbers included, is sent exactly as typed.
pub fn infer_filter_value(raw: &str) -> FilterValue {
    match raw {
        "true" => return FilterValue::Bool(true),
        "false" => return FilterValue::Bool(false),
        _ => {}
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, FILTER_DATE_FORMAT) {
        return FilterValue::DateTime(dt);
    }

    FilterValue::Text(raw.to_string())
}

/// Split `field:direction`
pub fn parse_order(input: &str) -> Result<(String, String), CliError> {
    match input.split_once(':') {
        Some((field, direction)) if !field.trim().is_empty() && !direction.trim().is_empty() => {
            Ok((field.trim().to_string(), direction.trim().to_string()))
        }
        _ => Err(CliError::InvalidOrder {
            input: input.to_string(),
        }),
    }
}
