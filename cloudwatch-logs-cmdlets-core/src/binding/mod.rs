//! Parameter binding: raw user input to typed request values

mod values;

use crate::error::{CmdletError, CmdletResult};
use crate::model::OperationDescriptor;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
enum RawValue {
    Text(Vec<String>),
    Json(Value),
}

/// Values supplied by the caller, keyed by parameter name, before type checking
#[derive(Debug, Clone, Default)]
pub struct ParameterBindings {
    raw: BTreeMap<String, RawValue>,
}

impl ParameterBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind command-line text; multi-valued parameters take every item
    pub fn bind_text<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.raw.insert(name.to_string(), RawValue::Text(values));
    }

    /// Bind an already-structured value; `Value::Null` counts as an explicit null
    pub fn bind_json(&mut self, name: &str, value: Value) {
        self.raw.insert(name.to_string(), RawValue::Json(value));
    }

    /// Bind every entry of a JSON object, e.g. the document given to `--input-json`
    pub fn bind_object(&mut self, object: serde_json::Map<String, Value>) {
        for (name, value) in object {
            self.bind_json(&name, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Type-check every binding against the descriptor
    pub fn resolve(&self, descriptor: &OperationDescriptor) -> CmdletResult<BoundParameters> {
        let mut values = BTreeMap::new();

        for (name, raw) in &self.raw {
            let param = descriptor
                .parameter(name)
                .ok_or_else(|| CmdletError::UnknownParameter {
                    command: descriptor.command.clone(),
                    parameter: name.clone(),
                })?;

            let value = match raw {
                RawValue::Text(texts) => values::from_text(param, texts)?,
                RawValue::Json(value) => values::from_json(param, value.clone())?,
            };
            values.insert(param.name.clone(), value);
        }

        Ok(BoundParameters { values })
    }
}

/// Type-checked parameter values, keyed by the descriptor's parameter name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParameters {
    values: BTreeMap<String, Value>,
}

impl BoundParameters {
    /// The bound value, `Some(Value::Null)` when explicitly null
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// The bound value when present and not null
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).filter(|v| !v.is_null())
    }

    /// One warning per required parameter that is unbound or explicitly null
    pub fn missing_required(&self, descriptor: &OperationDescriptor) -> Vec<String> {
        descriptor
            .parameters
            .iter()
            .filter(|p| p.required && self.value(&p.name).is_none())
            .map(|p| {
                let state = if self.get(&p.name).is_some() {
                    "is null"
                } else {
                    "was not supplied"
                };
                format!(
                    "Required parameter '{}' of {} {state}; the request may be rejected by the service",
                    p.name, descriptor.command
                )
            })
            .collect()
    }
}
