//! Invocation logic for the command runner

use crate::api::LogsApi;
use crate::commands::confirm::{should_proceed, ConfirmationPrompt};
use crate::commands::pagination::Paginator;
use crate::emit::Emitter;
use crate::error::{CmdletError, CmdletResult};
use crate::request::assemble_request;
use crate::selector::Selector;
use crate::types::{Invocation, InvocationReport, PreparedInvocation};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

impl<'a> Invocation<'a> {
    /// Validate the invocation and settle its confirmation.
    ///
    /// Selector and binding errors are raised here, before a client exists.
    /// Missing required parameters only produce warnings. The prompt is asked
    /// at most once, and only for mutating operations without `force`.
    pub fn prepare(self, prompt: &dyn ConfirmationPrompt) -> CmdletResult<PreparedInvocation<'a>> {
        let Invocation {
            descriptor,
            bindings,
            options,
        } = self;

        let selector = Selector::resolve(descriptor, &options)?;
        let bound = bindings.resolve(descriptor)?;

        let mut report = InvocationReport {
            operation: descriptor.operation.clone(),
            ..InvocationReport::default()
        };

        for warning in bound.missing_required(descriptor) {
            log::warn!("{}", warning);
            report.warnings.push(warning);
        }

        if !should_proceed(descriptor, &bound, options.force, prompt) {
            log::info!("{} was not confirmed; no request will be sent", descriptor.command);
            report.declined = true;
        }

        Ok(PreparedInvocation {
            descriptor,
            selector,
            bound,
            options,
            report,
        })
    }
}

impl<C: LogsApi> super::service::CmdletRunner<C> {
    /// Prepare and execute one command invocation
    pub async fn run(
        &self,
        invocation: Invocation<'_>,
        prompt: &dyn ConfirmationPrompt,
        emitter: &mut dyn Emitter,
        cancel: &CancellationToken,
    ) -> CmdletResult<InvocationReport> {
        let prepared = invocation.prepare(prompt)?;
        self.execute(prepared, emitter, cancel).await
    }

    /// Send a prepared invocation.
    ///
    /// A declined invocation returns its report without calling the service.
    /// Each page is projected and emitted before the next is requested.
    pub async fn execute(
        &self,
        prepared: PreparedInvocation<'_>,
        emitter: &mut dyn Emitter,
        cancel: &CancellationToken,
    ) -> CmdletResult<InvocationReport> {
        let PreparedInvocation {
            descriptor,
            selector,
            bound,
            options,
            mut report,
        } = prepared;

        if report.declined {
            return Ok(report);
        }

        if options.next_token.is_some() && !descriptor.is_paginated() {
            log::warn!("{} does not paginate; ignoring --next-token", descriptor.command);
        }

        let request = assemble_request(descriptor, &bound);
        let mut paginator = Paginator::new(
            descriptor.pagination.as_ref(),
            options.next_token.clone(),
            options.no_auto_iteration,
        );

        while paginator.has_next() {
            let mut page_request = request.clone();
            if let Some((member, token)) = paginator.request_token() {
                page_request.insert(member.to_string(), Value::String(token.to_string()));
            }

            let response = self
                .call(&descriptor.operation, &page_request, cancel)
                .await?;
            report.pages += 1;

            for value in selector.project(&response, &bound) {
                emitter.emit(value)?;
                report.emitted += 1;
            }

            paginator.advance(&response);
        }

        report.next_token = paginator.into_leftover();
        if let Some(token) = &report.next_token {
            log::info!(
                "More results are available; rerun {} with --next-token {}",
                descriptor.command,
                token
            );
        }

        log::debug!(
            "{} finished: {} page(s), {} object(s) emitted",
            descriptor.operation,
            report.pages,
            report.emitted
        );
        Ok(report)
    }

    async fn call(
        &self,
        operation: &str,
        request: &Map<String, Value>,
        cancel: &CancellationToken,
    ) -> CmdletResult<Value> {
        log::trace!("Calling {} with {}", operation, Value::Object(request.clone()));

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(CmdletError::Cancelled),
            result = self.client.call(operation, request) => result.map_err(CmdletError::from),
        }
    }
}
