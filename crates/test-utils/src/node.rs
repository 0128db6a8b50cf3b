use crate::gate::Gate;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use stxdesk_common::{ClarityValue, ExecutorError, ReadOnlyExecutor, ReadOnlyRequest};

type ReadResult = Result<ClarityValue, ExecutorError>;

/// A read-only executor answering from a script.
///
/// Each function answers with its queued one-shot results first, then with its standing
/// result. Functions without either fail like a node that does not know them.
#[derive(Debug, Default)]
pub struct StubNode {
    once: Mutex<HashMap<String, VecDeque<ReadResult>>>,
    standing: Mutex<HashMap<String, ReadResult>>,
    calls: Mutex<Vec<ReadOnlyRequest>>,
    gate: Gate,
}

impl StubNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the result `function` returns until changed.
    pub fn set(&self, function: &str, result: ReadResult) -> &Self {
        self.standing.lock().insert(function.to_string(), result);
        self
    }

    /// Queues a result returned by the next call of `function` only.
    pub fn push(&self, function: &str, result: ReadResult) -> &Self {
        self.once.lock().entry(function.to_string()).or_default().push_back(result);
        self
    }

    /// Every request seen so far, in order.
    pub fn calls(&self) -> Vec<ReadOnlyRequest> {
        self.calls.lock().clone()
    }

    /// The requests made to `function`.
    pub fn calls_to(&self, function: &str) -> Vec<ReadOnlyRequest> {
        self.calls.lock().iter().filter(|call| call.function == function).cloned().collect()
    }

    /// The gate in front of every call.
    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    fn answer(&self, function: &str) -> ReadResult {
        if let Some(result) = self.once.lock().get_mut(function).and_then(VecDeque::pop_front) {
            return result;
        }
        self.standing.lock().get(function).cloned().unwrap_or_else(|| {
            Err(ExecutorError::Node(format!("Unchecked(NoSuchPublicFunction(\"{function}\"))")))
        })
    }
}

#[async_trait]
impl ReadOnlyExecutor for StubNode {
    async fn call_read_only(&self, request: ReadOnlyRequest) -> ReadResult {
        let function = request.function.clone();
        self.calls.lock().push(request);
        self.gate.pass().await;
        let result = self.answer(&function);
        debug!(%function, ?result, "stub read-only call");
        result
    }
}
