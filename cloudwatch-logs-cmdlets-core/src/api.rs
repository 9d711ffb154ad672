//! The service client seam.
//!
//! Everything network-facing (signing, transport, retries) lives behind
//! [`LogsApi`]; this crate only needs "send this operation with this JSON body,
//! get a JSON body back".

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// Faults reported by a [`LogsApi`] implementation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceFault {
    /// The service answered with an error document
    #[error("{code}: {message}")]
    Service {
        code: String,
        message: String,
        status: u16,
        request_id: Option<String>,
    },

    /// The request never produced a service response
    #[error("Failed to reach {endpoint}: {message}")]
    Transport {
        endpoint: String,
        message: String,
        name_resolution: bool,
    },

    /// The service answered with a body that is not a JSON object
    #[error("Malformed response from {operation}: {message}")]
    MalformedResponse { operation: String, message: String },
}

impl ServiceFault {
    /// The endpoint that could not be resolved, when this fault is a DNS failure
    pub fn name_resolution_endpoint(&self) -> Option<&str> {
        match self {
            Self::Transport {
                endpoint,
                name_resolution: true,
                ..
            } => Some(endpoint),
            _ => None,
        }
    }
}

/// A CloudWatch Logs client able to invoke any operation by name
#[async_trait]
pub trait LogsApi: Send + Sync {
    /// Invoke `operation` with the assembled request body
    async fn call(&self, operation: &str, request: &Map<String, Value>)
        -> Result<Value, ServiceFault>;
}

#[async_trait]
impl<T: LogsApi + ?Sized> LogsApi for std::sync::Arc<T> {
    async fn call(
        &self,
        operation: &str,
        request: &Map<String, Value>,
    ) -> Result<Value, ServiceFault> {
        (**self).call(operation, request).await
    }
}
