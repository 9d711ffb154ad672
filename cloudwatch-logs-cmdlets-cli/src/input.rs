//! Parameters supplied as a JSON document with `--input-json`

use cloudwatch_logs_cmdlets_core::{OperationDescriptor, ParameterBindings};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum InputError {
    #[error("Failed to read --input-json from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("--input-json is not valid JSON")]
    Parse(#[from] serde_json::Error),

    #[error("--input-json must be a JSON object keyed by parameter name")]
    NotAnObject,
}

/// Read the document at `path`, or stdin when `path` is `-`
pub(crate) fn read_document(path: &Path) -> Result<Map<String, Value>, InputError> {
    let read_error = |source| InputError::Read {
        path: path.to_path_buf(),
        source,
    };

    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(read_error)?;
        text
    } else {
        std::fs::read_to_string(path).map_err(read_error)?
    };

    parse_document(&text)
}

fn parse_document(text: &str) -> Result<Map<String, Value>, InputError> {
    match serde_json::from_str(text)? {
        Value::Object(map) => Ok(map),
        _ => Err(InputError::NotAnObject),
    }
}

/// Bind document entries, using the canonical parameter name where one matches
/// so that later command-line flags replace them
pub(crate) fn bind_document(
    descriptor: &OperationDescriptor,
    document: Map<String, Value>,
    bindings: &mut ParameterBindings,
) {
    let mut canonical = Map::new();
    for (key, value) in document {
        let name = descriptor
            .parameter(&key)
            .map_or(key, |param| param.name.clone());
        canonical.insert(name, value);
    }
    bindings.bind_object(canonical);
}
