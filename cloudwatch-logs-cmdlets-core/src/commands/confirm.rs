//! Confirmation gate for mutating operations

use crate::binding::BoundParameters;
use crate::model::OperationDescriptor;
use serde_json::Value;

/// Details shown to the user before a mutating call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub command: String,
    pub operation: String,
    /// Value of the descriptor's confirmation-target parameter, if bound
    pub target: Option<String>,
}

impl ConfirmationRequest {
    pub(crate) fn new(descriptor: &OperationDescriptor, bound: &BoundParameters) -> Self {
        let target = descriptor
            .confirm_target
            .as_deref()
            .and_then(|name| bound.value(name))
            .map(|value| match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });
        Self {
            command: descriptor.command.clone(),
            operation: descriptor.operation.clone(),
            target,
        }
    }

    /// Prompt text, e.g. `Performing "TagLogGroup" on target "g1"`
    pub fn message(&self) -> String {
        match &self.target {
            Some(target) => format!(
                "Performing the operation \"{} ({})\" on target \"{}\".",
                self.command, self.operation, target
            ),
            None => format!(
                "Performing the operation \"{} ({})\".",
                self.command, self.operation
            ),
        }
    }
}

/// Asks the user whether a mutating operation may proceed
pub trait ConfirmationPrompt: Send + Sync {
    fn confirm(&self, request: &ConfirmationRequest) -> bool;
}

/// Prompt used when no interactive terminal is available
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysDecline;

impl ConfirmationPrompt for AlwaysDecline {
    fn confirm(&self, request: &ConfirmationRequest) -> bool {
        log::debug!("Declining without prompt: {}", request.message());
        false
    }
}

/// True when the call may go ahead
pub(crate) fn should_proceed(
    descriptor: &OperationDescriptor,
    bound: &BoundParameters,
    force: bool,
    prompt: &dyn ConfirmationPrompt,
) -> bool {
    if !descriptor.mutating || force {
        return true;
    }
    prompt.confirm(&ConfirmationRequest::new(descriptor, bound))
}
