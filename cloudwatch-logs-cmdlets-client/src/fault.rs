//! Mapping HTTP outcomes onto [`ServiceFault`]

use cloudwatch_logs_cmdlets_core::ServiceFault;
use serde_json::{Map, Value};
use std::error::Error;

/// Messages resolvers put in the error chain when a host name does not resolve
const NAME_RESOLUTION_MARKERS: &[&str] = &[
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "no such host",
    "nodename nor servname",
    "temporary failure in name resolution",
];

/// Body of a 2xx response. Operations without output send an empty body.
pub(crate) fn success_body(operation: &str, body: &[u8]) -> Result<Value, ServiceFault> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(other) => Err(ServiceFault::MalformedResponse {
            operation: operation.to_string(),
            message: format!("expected a JSON object, got {other}"),
        }),
        Err(e) => Err(ServiceFault::MalformedResponse {
            operation: operation.to_string(),
            message: e.to_string(),
        }),
    }
}

/// Fault for a non-2xx response.
///
/// The error code comes from `__type` in the body, falling back to the
/// `x-amzn-ErrorType` header. Both may carry a `namespace#` prefix or a
/// `:uri` suffix that is not part of the code.
pub(crate) fn service_fault(
    status: u16,
    error_type_header: Option<&str>,
    request_id: Option<&str>,
    body: &[u8],
) -> ServiceFault {
    let document = serde_json::from_slice::<Value>(body).ok();
    let field = |name: &str| {
        document
            .as_ref()
            .and_then(|doc| doc.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let code = field("__type")
        .or_else(|| error_type_header.map(str::to_string))
        .map(|raw| normalize_code(&raw))
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| format!("Http{status}"));

    let message = field("message")
        .or_else(|| field("Message"))
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());

    ServiceFault::Service {
        code,
        message,
        status,
        request_id: request_id.map(str::to_string),
    }
}

fn normalize_code(raw: &str) -> String {
    let without_namespace = raw.rsplit('#').next().unwrap_or(raw);
    let without_uri = without_namespace
        .split(':')
        .next()
        .unwrap_or(without_namespace);
    without_uri.trim().to_string()
}

/// Fault for a request that never produced a response
pub(crate) fn transport_fault(endpoint: &str, error: &(dyn Error + 'static)) -> ServiceFault {
    let mut chain = Vec::new();
    let mut current = Some(error);
    while let Some(e) = current {
        chain.push(e.to_string());
        current = e.source();
    }

    let name_resolution = chain.iter().any(|message| {
        let message = message.to_ascii_lowercase();
        NAME_RESOLUTION_MARKERS
            .iter()
            .any(|marker| message.contains(marker))
    });

    ServiceFault::Transport {
        endpoint: endpoint.to_string(),
        message: chain.join(": "),
        name_resolution,
    }
}
