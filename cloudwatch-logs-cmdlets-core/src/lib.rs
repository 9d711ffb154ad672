//! This crate provides the core logic of the CloudWatch Logs command toolkit:
//! - The embedded operation table and its descriptors
//! - Parameter binding and flattened request assembly
//! - Output selectors, pagination and the confirmation gate
//! - A generic dispatcher running one invocation against any [`LogsApi`]
//!

mod api;
mod binding;
pub mod commands;
mod emit;
mod error;
mod model;
mod request;
mod selector;
mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for a small, focused public API
pub use api::{LogsApi, ServiceFault};
pub use binding::{BoundParameters, ParameterBindings};
pub use commands::{AlwaysDecline, CmdletRunner, ConfirmationPrompt, ConfirmationRequest};
pub use emit::Emitter;
pub use error::{CatalogError, CmdletError, CmdletResult, SelectorError};
pub use model::catalog::OperationCatalog;
pub use model::{OperationDescriptor, PaginationSpec, ParamType, ParameterDescriptor};
pub use request::assemble_request;
pub use selector::Selector;
pub use types::{Invocation, InvocationOptions, InvocationReport, PreparedInvocation};
