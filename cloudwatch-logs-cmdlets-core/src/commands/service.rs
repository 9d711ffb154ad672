//! CloudWatch Logs command runner
//!
//! The runner holds the service client and drives invocations through the
//! shared binding, confirmation, pagination and projection steps. Adapters
//! (the CLI, tests) supply the prompt, the output sink and the cancellation
//! token.

use crate::api::LogsApi;

/// Runs command invocations against a [`LogsApi`] client
pub struct CmdletRunner<C> {
    pub(crate) client: C,
}

impl<C: LogsApi> CmdletRunner<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    // run() is implemented in invoke.rs
}
