//! Errors raised while constructing a client

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("No AWS region configured; pass --region or set AWS_REGION")]
    MissingRegion,

    #[error("No AWS credentials provider available")]
    MissingCredentials,

    #[error("Invalid endpoint URL '{endpoint}'")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to create HTTP client")]
    Http(#[from] reqwest::Error),
}
