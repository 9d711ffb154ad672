//! HTTP client for Amazon CloudWatch Logs.
//!
//! [`LogsClient`] speaks the AWS JSON 1.1 protocol: every operation is a
//! SigV4-signed `POST /` whose `X-Amz-Target` header names the operation. It
//! implements [`cloudwatch_logs_cmdlets_core::LogsApi`], so the command runner
//! can drive it without knowing anything about HTTP.

mod client;
mod config;
mod error;
mod fault;
mod signing;

pub use client::LogsClient;
pub use config::{resolve_endpoint, ClientConfig, DEFAULT_TIMEOUT};
pub use error::ClientError;
