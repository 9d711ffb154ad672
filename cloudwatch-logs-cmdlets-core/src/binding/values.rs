//! Conversion of raw parameter values into request JSON.

use crate::error::{CmdletError, CmdletResult};
use crate::model::{ParamType, ParameterDescriptor};
use chrono::DateTime;
use serde_json::{Map, Value};

/// Convert command-line text into the JSON value for `param`
pub(crate) fn from_text(param: &ParameterDescriptor, texts: &[String]) -> CmdletResult<Value> {
    let invalid = |value: &str| {
        CmdletError::invalid_value(&param.name, param.param_type.expected(), value)
    };
    let last = texts.last().map(String::as_str).unwrap_or_default();

    match param.param_type {
        ParamType::String => Ok(Value::String(last.to_string())),
        ParamType::Integer | ParamType::Long => last
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| invalid(last)),
        ParamType::Boolean => parse_bool(last).map(Value::Bool).ok_or_else(|| invalid(last)),
        ParamType::Timestamp => parse_timestamp(last).map(Value::from).ok_or_else(|| invalid(last)),
        ParamType::StringList => Ok(Value::Array(
            string_list(param, texts).into_iter().map(Value::String).collect(),
        )),
        ParamType::StringMap => {
            let mut map = Map::new();
            for text in texts {
                let text = text.trim();
                if text.starts_with('{') {
                    let parsed: Value = serde_json::from_str(text).map_err(|_| invalid(text))?;
                    map.extend(string_map(param, parsed)?);
                    continue;
                }
                let pairs = if texts.len() == 1 {
                    comma_pairs(text)
                } else {
                    Some(vec![text.to_string()])
                };
                for pair in pairs.ok_or_else(|| invalid(text))? {
                    let (key, value) = pair.split_once('=').ok_or_else(|| invalid(&pair))?;
                    map.insert(key.trim().to_string(), Value::String(value.trim().to_string()));
                }
            }
            Ok(Value::Object(map))
        }
        ParamType::Json => serde_json::from_str(last).map_err(|_| invalid(last)),
    }
}

/// Check and normalise a JSON value supplied for `param`.
///
/// `Value::Null` is passed through so the caller can treat it as an explicit null.
pub(crate) fn from_json(param: &ParameterDescriptor, value: Value) -> CmdletResult<Value> {
    if value.is_null() {
        return Ok(value);
    }
    let invalid = |value: &Value| {
        CmdletError::invalid_value(&param.name, param.param_type.expected(), value)
    };

    match param.param_type {
        ParamType::String => match value {
            Value::String(_) => Ok(value),
            Value::Number(_) | Value::Bool(_) => Ok(Value::String(value.to_string())),
            other => Err(invalid(&other)),
        },
        ParamType::Integer | ParamType::Long => match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(Value::Number(n)),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| invalid(&Value::String(s.clone()))),
            other => Err(invalid(&other)),
        },
        ParamType::Boolean => match value {
            Value::Bool(b) => Ok(Value::Bool(b)),
            Value::String(s) => parse_bool(&s)
                .map(Value::Bool)
                .ok_or_else(|| invalid(&Value::String(s.clone()))),
            other => Err(invalid(&other)),
        },
        ParamType::Timestamp => match value {
            Value::Number(n) if n.is_i64() => Ok(Value::Number(n)),
            Value::String(s) => parse_timestamp(&s)
                .map(Value::from)
                .ok_or_else(|| invalid(&Value::String(s.clone()))),
            other => Err(invalid(&other)),
        },
        ParamType::StringList => match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(_) => Ok(item),
                    other => Err(invalid(&other)),
                })
                .collect::<CmdletResult<Vec<_>>>()
                .map(Value::Array),
            Value::String(s) => Ok(Value::Array(vec![Value::String(s)])),
            other => Err(invalid(&other)),
        },
        ParamType::StringMap => string_map(param, value).map(Value::Object),
        ParamType::Json => Ok(value),
    }
}

fn string_map(param: &ParameterDescriptor, value: Value) -> CmdletResult<Map<String, Value>> {
    let entries = match value {
        Value::Object(entries) => entries,
        other => {
            return Err(CmdletError::invalid_value(
                &param.name,
                param.param_type.expected(),
                other,
            ))
        }
    };
    Ok(entries
        .into_iter()
        .map(|(k, v)| match v {
            Value::String(_) => (k, v),
            other => (k, Value::String(other.to_string())),
        })
        .collect())
}

/// Items of a list given as text.
///
/// Each repeated flag is one item. A single value may be a JSON array of
/// strings, or a comma-separated list unless the parameter holds free text.
fn string_list(param: &ParameterDescriptor, texts: &[String]) -> Vec<String> {
    let [text] = texts else {
        return texts.to_vec();
    };

    if text.trim_start().starts_with('[') {
        if let Ok(items) = serde_json::from_str::<Vec<String>>(text) {
            return items;
        }
    }
    if param.free_text {
        return vec![text.clone()];
    }
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split `k1=v1,k2=v2` into pairs. A segment without `=` continues the
/// previous value, so `desc=a,b` stays one pair.
fn comma_pairs(text: &str) -> Option<Vec<String>> {
    let mut pairs: Vec<String> = Vec::new();
    for segment in text.split(',') {
        if segment.trim().is_empty() {
            continue;
        }
        if segment.contains('=') {
            pairs.push(segment.to_string());
        } else {
            let previous = pairs.last_mut()?;
            previous.push(',');
            previous.push_str(segment);
        }
    }
    Some(pairs)
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Epoch milliseconds from either an integer or an RFC 3339 date-time
fn parse_timestamp(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(millis) = text.parse::<i64>() {
        return Some(millis);
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.timestamp_millis())
}
