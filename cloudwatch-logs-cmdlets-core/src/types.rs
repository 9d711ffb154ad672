//! Invocation inputs and outputs

use crate::binding::{BoundParameters, ParameterBindings};
use crate::model::OperationDescriptor;
use crate::selector::Selector;
use serde::Serialize;

/// Universal switches available on every command
#[derive(Debug, Clone, Default)]
pub struct InvocationOptions {
    /// Output selector expression (`*`, `Member`, `^Parameter`)
    pub select: Option<String>,
    /// Echo the descriptor's pass-through parameter instead of the response
    pub pass_thru: bool,
    /// Skip the confirmation prompt of mutating operations
    pub force: bool,
    /// Fetch a single page even when more are available
    pub no_auto_iteration: bool,
    /// Explicit starting continuation token; implies a single page
    pub next_token: Option<String>,
}

/// One command invocation: what to call and with which inputs
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    pub descriptor: &'a OperationDescriptor,
    pub bindings: ParameterBindings,
    pub options: InvocationOptions,
}

impl<'a> Invocation<'a> {
    pub fn new(descriptor: &'a OperationDescriptor) -> Self {
        Self {
            descriptor,
            bindings: ParameterBindings::new(),
            options: InvocationOptions::default(),
        }
    }

    pub fn with_bindings(mut self, bindings: ParameterBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn with_options(mut self, options: InvocationOptions) -> Self {
        self.options = options;
        self
    }
}

/// An invocation whose selector and parameters are valid and whose
/// confirmation has been settled. Needs no client; see [`Invocation::prepare`].
#[derive(Debug, Clone)]
pub struct PreparedInvocation<'a> {
    pub(crate) descriptor: &'a OperationDescriptor,
    pub(crate) selector: Selector,
    pub(crate) bound: BoundParameters,
    pub(crate) options: InvocationOptions,
    pub(crate) report: InvocationReport,
}

impl PreparedInvocation<'_> {
    /// True when the user declined; executing it makes no call
    pub fn declined(&self) -> bool {
        self.report.declined
    }
}

/// Summary of a finished invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationReport {
    pub operation: String,
    /// Non-fatal binding warnings
    pub warnings: Vec<String>,
    /// Number of service calls made
    pub pages: usize,
    /// Number of objects emitted
    pub emitted: usize,
    /// True when the user declined the confirmation prompt
    pub declined: bool,
    /// Continuation token left over in single-page mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}
