//! Error types for command invocation

use crate::api::ServiceFault;
use thiserror::Error;

/// Errors raised while loading or validating the operation table
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Operation table '{0}' is not embedded in this build")]
    Missing(String),

    #[error("Failed to parse operation table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid operation table entry for {operation}: {reason}")]
    Invalid { operation: String, reason: String },
}

impl CatalogError {
    pub(crate) fn invalid(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

/// Output selection problems, all detected before the service is called
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("The --select and --pass-thru options cannot be used together")]
    PassThruConflict,

    #[error("{command} does not support --pass-thru")]
    PassThruUnsupported { command: String },

    #[error("The selector expression cannot be empty")]
    Empty,

    #[error("'{field}' is not a member of the {command} response (available: {available})")]
    UnknownField {
        field: String,
        command: String,
        available: String,
    },

    #[error("'^{parameter}' does not name a parameter of {command}")]
    UnknownParameter { parameter: String, command: String },
}

/// Errors surfaced by a single command invocation
#[derive(Debug, Error)]
pub enum CmdletError {
    #[error("Unknown command or operation: {0}")]
    UnknownOperation(String),

    #[error("{command} has no parameter named '{parameter}'")]
    UnknownParameter { command: String, parameter: String },

    #[error("Invalid value for parameter '{parameter}': expected {expected}, got '{value}'")]
    InvalidParameterValue {
        parameter: String,
        expected: String,
        value: String,
    },

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(
        "Name resolution failure attempting to reach service endpoint '{endpoint}'. \
         Check network connectivity and that the region or endpoint URL is correct"
    )]
    NameResolution {
        endpoint: String,
        #[source]
        source: ServiceFault,
    },

    #[error(transparent)]
    Service(ServiceFault),

    #[error("Failed to write command output: {0}")]
    Output(#[from] std::io::Error),

    #[error("The command was cancelled")]
    Cancelled,
}

impl CmdletError {
    pub(crate) fn invalid_value(
        parameter: impl Into<String>,
        expected: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self::InvalidParameterValue {
            parameter: parameter.into(),
            expected: expected.into(),
            value: value.to_string(),
        }
    }

    /// True for errors detected locally, before any network call was made
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownOperation(_)
                | Self::UnknownParameter { .. }
                | Self::InvalidParameterValue { .. }
                | Self::Selector(_)
        )
    }
}

/// Name resolution failures are re-wrapped with a clearer message; every other
/// fault propagates unchanged.
impl From<ServiceFault> for CmdletError {
    fn from(fault: ServiceFault) -> Self {
        match fault.name_resolution_endpoint() {
            Some(endpoint) => Self::NameResolution {
                endpoint: endpoint.to_string(),
                source: fault,
            },
            None => Self::Service(fault),
        }
    }
}

pub type CmdletResult<T> = Result<T, CmdletError>;
