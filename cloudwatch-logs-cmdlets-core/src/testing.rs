//! Test helpers shared across the crate's unit tests

use crate::api::{LogsApi, ServiceFault};
use crate::commands::{ConfirmationPrompt, ConfirmationRequest};
use crate::emit::Emitter;
use crate::model::catalog::OperationCatalog;
use crate::model::OperationDescriptor;
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Descriptor for `operation` from the embedded table
pub(crate) fn descriptor(operation: &str) -> OperationDescriptor {
    OperationCatalog::embedded()
        .expect("embedded catalog should load")
        .get(operation)
        .unwrap_or_else(|| panic!("{operation} is not in the operation table"))
        .clone()
}

/// Prompt with a fixed answer that counts how often it was asked
pub(crate) struct CountingPrompt {
    answer: bool,
    asked: AtomicUsize,
}

impl CountingPrompt {
    pub(crate) fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: AtomicUsize::new(0),
        }
    }

    pub(crate) fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl ConfirmationPrompt for CountingPrompt {
    fn confirm(&self, _request: &ConfirmationRequest) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

type Call = (String, Map<String, Value>);

/// Fake client replaying queued results and recording every call
pub(crate) struct ScriptedApi {
    results: Mutex<VecDeque<Result<Value, ServiceFault>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedApi {
    pub(crate) fn new(results: Vec<Result<Value, ServiceFault>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogsApi for ScriptedApi {
    async fn call(
        &self,
        operation: &str,
        request: &Map<String, Value>,
    ) -> Result<Value, ServiceFault> {
        self.calls
            .lock()
            .unwrap()
            .push((operation.to_string(), request.clone()));
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected call to {operation}"))
    }
}

/// Fake paginated listing keyed by `nextToken` values of the form `page-N`
pub(crate) struct PagedApi {
    member: String,
    pages: Vec<Vec<&'static str>>,
}

impl PagedApi {
    pub(crate) fn new(member: &str, pages: Vec<Vec<&'static str>>) -> Self {
        Self {
            member: member.to_string(),
            pages,
        }
    }
}

#[async_trait]
impl LogsApi for PagedApi {
    async fn call(
        &self,
        _operation: &str,
        request: &Map<String, Value>,
    ) -> Result<Value, ServiceFault> {
        let index = request
            .get("nextToken")
            .and_then(Value::as_str)
            .and_then(|t| t.strip_prefix("page-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);

        let items: Vec<Value> = self.pages[index]
            .iter()
            .map(|name| json!({ "logGroupName": name }))
            .collect();

        let mut response = Map::new();
        response.insert(self.member.clone(), Value::Array(items));
        if index + 1 < self.pages.len() {
            response.insert("nextToken".to_string(), json!(format!("page-{}", index + 1)));
        }
        Ok(Value::Object(response))
    }
}

/// Fake client whose calls never complete
pub(crate) struct PendingApi;

#[async_trait]
impl LogsApi for PendingApi {
    async fn call(
        &self,
        _operation: &str,
        _request: &Map<String, Value>,
    ) -> Result<Value, ServiceFault> {
        std::future::pending().await
    }
}

/// Emitter writing into a buffer the test can inspect while the runner holds it
#[derive(Clone, Default)]
pub(crate) struct SharedEmitter(Arc<Mutex<Vec<Value>>>);

impl SharedEmitter {
    pub(crate) fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

impl Emitter for SharedEmitter {
    fn emit(&mut self, value: Value) -> std::io::Result<()> {
        self.0.lock().unwrap().push(value);
        Ok(())
    }
}

/// [`PagedApi`] that records how many objects were already emitted at each call
pub(crate) struct EmitOrderApi {
    pages: PagedApi,
    emitted: SharedEmitter,
    seen: Mutex<Vec<usize>>,
}

impl EmitOrderApi {
    pub(crate) fn new(pages: PagedApi, emitted: SharedEmitter) -> Self {
        Self {
            pages,
            emitted,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn emitted_before_each_call(&self) -> Vec<usize> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogsApi for EmitOrderApi {
    async fn call(
        &self,
        operation: &str,
        request: &Map<String, Value>,
    ) -> Result<Value, ServiceFault> {
        self.seen.lock().unwrap().push(self.emitted.len());
        self.pages.call(operation, request).await
    }
}
