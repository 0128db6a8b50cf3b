//! One request/response cycle against the wallet or the node.
//!
//! Every button of every panel goes through an [`ActionInvoker`]: it owns a busy flag, hands
//! the request to an executor, waits for exactly one result and turns it into a notification.
//! Executor errors stop here; callers only ever see an [`ActionOutcome`].

use crate::{cache::Cached, client::ContractClient, notify::Notification};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use stxdesk_common::{
    ClarityValue, ContractCallExecutor, ContractCallRequest, ReadOnlyExecutor, ReadOnlyRequest,
    TxSubmission,
};

/// A call to one contract function, built fresh from the form for each click.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionRequest {
    function: String,
    args: Vec<ClarityValue>,
    success_message: Option<String>,
    failure_context: Option<String>,
    sender: Option<String>,
}

impl ActionRequest {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            args: Vec::new(),
            success_message: None,
            failure_context: None,
            sender: None,
        }
    }

    /// Appends an argument.
    pub fn arg(mut self, arg: ClarityValue) -> Self {
        self.args.push(arg);
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = ClarityValue>) -> Self {
        self.args.extend(args);
        self
    }

    /// Replaces the default success text. Reads only notify on success when this is set.
    pub fn success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    /// Replaces the `Error in {function}` prefix of the failure text.
    pub fn failure_context(mut self, context: impl Into<String>) -> Self {
        self.failure_context = Some(context.into());
        self
    }

    /// The principal a read-only call is evaluated as. Defaults to the contract deployer.
    pub fn sender(mut self, sender: Option<String>) -> Self {
        self.sender = sender;
        self
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn arguments(&self) -> &[ClarityValue] {
        &self.args
    }

    pub fn success_text(&self) -> String {
        match &self.success_message {
            Some(message) => message.clone(),
            None => format!("{} operation successful", self.function),
        }
    }

    pub fn failure_text(&self, error: &str) -> String {
        match &self.failure_context {
            Some(context) => format!("{context}: {error}"),
            None => format!("Error in {}: {error}", self.function),
        }
    }
}

/// How an action ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome<T> {
    Success(T),
    /// The error message, without the notification's prefix.
    Failure(String),
    /// Another action of the same invoker was still in flight; nothing was sent.
    Busy,
}

impl<T> ActionOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Clears the busy flag when dropped.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs at most one action at a time against a contract.
#[derive(Debug)]
pub struct ActionInvoker {
    client: Arc<ContractClient>,
    busy: AtomicBool,
}

impl ActionInvoker {
    pub fn new(client: Arc<ContractClient>) -> Self {
        Self { client, busy: AtomicBool::new(false) }
    }

    /// Whether an action is in flight. The triggering controls are disabled meanwhile.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn client(&self) -> &ContractClient {
        &self.client
    }

    fn acquire(&self, request: &ActionRequest) -> Option<BusyGuard<'_>> {
        match self.busy.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire) {
            Ok(_) => Some(BusyGuard(&self.busy)),
            Err(_) => {
                warn!(function = %request.function, "action refused, another one is in flight");
                None
            }
        }
    }

    /// Submits a state-changing call through the wallet.
    pub async fn invoke(&self, request: ActionRequest) -> ActionOutcome<TxSubmission> {
        let Some(_busy) = self.acquire(&request) else { return ActionOutcome::Busy };

        let call = ContractCallRequest {
            contract: self.client.contract().clone(),
            function: request.function.clone(),
            args: request.args.clone(),
            network: self.client.network(),
        };
        debug!(contract = %call.contract, function = %call.function, "submitting contract call");

        match self.client.wallet().call(call).await {
            Ok(submission) => {
                debug!(function = %request.function, txid = %submission.txid, "call submitted");
                self.client.notify(Notification::success(request.success_text()));
                ActionOutcome::Success(submission)
            }
            Err(err) => {
                let message = err.to_string();
                self.client.notify(Notification::error(request.failure_text(&message)));
                ActionOutcome::Failure(message)
            }
        }
    }

    /// Evaluates a read-only call and stores the decoded value in `cache`.
    ///
    /// On failure the cached value stays as it was and the error is recorded beside it.
    pub async fn query<T, F>(
        &self,
        request: ActionRequest,
        cache: &Cached<T>,
        decode: F,
    ) -> ActionOutcome<T>
    where
        T: Clone,
        F: FnOnce(ClarityValue) -> Result<T, String>,
    {
        let Some(_busy) = self.acquire(&request) else { return ActionOutcome::Busy };
        cache.start();

        let contract = self.client.contract().clone();
        let sender = request.sender.clone().unwrap_or_else(|| contract.address.to_string());
        let call = ReadOnlyRequest {
            contract,
            function: request.function.clone(),
            args: request.args.clone(),
            sender,
        };
        debug!(contract = %call.contract, function = %call.function, "calling read-only function");

        let result = match self.client.node().call_read_only(call).await {
            Ok(value) => decode(value),
            Err(err) => Err(err.to_string()),
        };
        match result {
            Ok(value) => {
                cache.store(value.clone());
                if request.success_message.is_some() {
                    self.client.notify(Notification::success(request.success_text()));
                }
                ActionOutcome::Success(value)
            }
            Err(message) => {
                cache.fail(message.clone());
                self.client.notify(Notification::error(request.failure_text(&message)));
                ActionOutcome::Failure(message)
            }
        }
    }

    /// Reports a request that could not be built, e.g. from an unparsable form field.
    pub fn reject<T>(&self, request: &ActionRequest, error: impl Into<String>) -> ActionOutcome<T> {
        if self.is_busy() {
            warn!(function = %request.function, "action refused, another one is in flight");
            return ActionOutcome::Busy;
        }
        let message = error.into();
        self.client.notify(Notification::error(request.failure_text(&message)));
        ActionOutcome::Failure(message)
    }

    /// Invokes `request` with `args`, or rejects it when an argument failed to parse.
    pub async fn submit(
        &self,
        request: ActionRequest,
        args: Result<Vec<ClarityValue>, String>,
    ) -> ActionOutcome<TxSubmission> {
        match args {
            Ok(args) => self.invoke(request.args(args)).await,
            Err(error) => self.reject(&request, error),
        }
    }
}

/// Decodes a `uint` result, unwrapping `(ok ..)` and `(some ..)`.
pub fn decode_uint(value: ClarityValue) -> Result<u128, String> {
    let plain = value.into_plain();
    plain.as_uint().ok_or_else(|| format!("expected a uint, got {plain}"))
}

/// Decodes a `bool` result, unwrapping `(ok ..)` and `(some ..)`.
pub fn decode_bool(value: ClarityValue) -> Result<bool, String> {
    let plain = value.into_plain();
    plain.as_bool().ok_or_else(|| format!("expected a bool, got {plain}"))
}
