//! Request assembly from bound parameters.
//!
//! Flattened parameters such as `DataSource_Name` carry a dotted request path
//! (`dataSource.name`). Intermediate objects are only created when a value is
//! written beneath them, so a nested object with no bound fields never appears
//! in the request.

use crate::binding::BoundParameters;
use crate::model::OperationDescriptor;
use serde_json::{Map, Value};

/// Build the request body for one call of `descriptor`
pub fn assemble_request(
    descriptor: &OperationDescriptor,
    bound: &BoundParameters,
) -> Map<String, Value> {
    let mut body = Map::new();
    for param in &descriptor.parameters {
        if let Some(value) = bound.value(&param.name) {
            let segments: Vec<&str> = param.path_segments().collect();
            insert_at(&mut body, &segments, value.clone());
        }
    }
    body
}

fn insert_at(target: &mut Map<String, Value>, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [leaf] => {
            target.insert((*leaf).to_string(), value);
        }
        [head, rest @ ..] => {
            let child = target
                .entry((*head).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                log::warn!("Replacing non-object value at '{head}' with a nested object");
                *child = Value::Object(Map::new());
            }
            if let Value::Object(child) = child {
                insert_at(child, rest, value);
            }
        }
    }
}
