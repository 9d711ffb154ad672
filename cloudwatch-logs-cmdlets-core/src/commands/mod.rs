//! Commands module - dispatcher for CloudWatch Logs operations

mod confirm;
mod invoke;
mod pagination;
pub(crate) mod service;

pub use confirm::{AlwaysDecline, ConfirmationPrompt, ConfirmationRequest};
pub use service::CmdletRunner;
