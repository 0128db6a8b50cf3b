use crate::gate::Gate;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::atomic::{AtomicUsize, Ordering},
};
use stxdesk_common::{
    ContractCallExecutor, ContractCallRequest, ExecutorError, TxSubmission, WalletAuth,
};

type CallResult = Result<TxSubmission, ExecutorError>;

/// The contract-side rule that only the admin may call certain functions.
#[derive(Debug)]
struct AdminCheck {
    admin: String,
    functions: HashSet<String>,
}

/// A wallet that connects as a fixed identity and answers contract calls from a script.
///
/// Calls without a scripted result succeed with a fresh txid. With
/// [`StubWallet::enforce_admin`] the stub also plays the contract: admin-only functions
/// called by anyone else abort, however the caller got there.
#[derive(Debug)]
pub struct StubWallet {
    connect_result: Mutex<Result<String, ExecutorError>>,
    connected: Mutex<Option<String>>,
    sign_outs: AtomicUsize,
    results: Mutex<HashMap<String, VecDeque<CallResult>>>,
    calls: Mutex<Vec<ContractCallRequest>>,
    admin: Mutex<Option<AdminCheck>>,
    txids: AtomicUsize,
    gate: Gate,
}

impl StubWallet {
    /// A wallet that connects as `address`.
    pub fn new(address: &str) -> Self {
        Self::with_connect_result(Ok(address.to_string()))
    }

    /// A wallet whose connect attempts end with `result`.
    pub fn with_connect_result(result: Result<String, ExecutorError>) -> Self {
        Self {
            connect_result: Mutex::new(result),
            connected: Mutex::new(None),
            sign_outs: AtomicUsize::new(0),
            results: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            admin: Mutex::new(None),
            txids: AtomicUsize::new(0),
            gate: Gate::default(),
        }
    }

    /// Changes the identity the next connect reports.
    pub fn set_connect_result(&self, result: Result<String, ExecutorError>) {
        *self.connect_result.lock() = result;
    }

    /// Queues the result of the next call of `function`.
    pub fn respond(&self, function: &str, result: CallResult) -> &Self {
        self.results.lock().entry(function.to_string()).or_default().push_back(result);
        self
    }

    /// Makes the next call of `function` fail as if the user dismissed the wallet dialog.
    pub fn reject(&self, function: &str, reason: &str) -> &Self {
        self.respond(function, Err(ExecutorError::Rejected(reason.to_string())))
    }

    /// Aborts `functions` unless the connected identity is `admin`.
    pub fn enforce_admin(&self, admin: &str, functions: &[&str]) -> &Self {
        *self.admin.lock() = Some(AdminCheck {
            admin: admin.to_string(),
            functions: functions.iter().map(|f| f.to_string()).collect(),
        });
        self
    }

    /// The identity currently connected.
    pub fn connected(&self) -> Option<String> {
        self.connected.lock().clone()
    }

    /// How often the wallet was signed out.
    pub fn sign_outs(&self) -> usize {
        self.sign_outs.load(Ordering::SeqCst)
    }

    /// Every call seen so far, in order.
    pub fn calls(&self) -> Vec<ContractCallRequest> {
        self.calls.lock().clone()
    }

    /// The calls made to `function`.
    pub fn calls_to(&self, function: &str) -> Vec<ContractCallRequest> {
        self.calls.lock().iter().filter(|call| call.function == function).cloned().collect()
    }

    /// The gate in front of every call.
    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    fn authorize(&self, function: &str) -> Result<(), ExecutorError> {
        let admin = self.admin.lock();
        let Some(check) = admin.as_ref() else { return Ok(()) };
        if check.functions.contains(function)
            && self.connected.lock().as_deref() != Some(check.admin.as_str())
        {
            return Err(ExecutorError::Node(format!("{function} aborted: (err u100)")));
        }
        Ok(())
    }

    fn next_txid(&self) -> String {
        format!("0x{:064x}", self.txids.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl WalletAuth for StubWallet {
    async fn connect(&self) -> Result<String, ExecutorError> {
        let result = self.connect_result.lock().clone();
        if let Ok(address) = &result {
            *self.connected.lock() = Some(address.clone());
        }
        result
    }

    fn sign_out(&self) {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        *self.connected.lock() = None;
    }
}

#[async_trait]
impl ContractCallExecutor for StubWallet {
    async fn call(&self, request: ContractCallRequest) -> CallResult {
        let function = request.function.clone();
        self.calls.lock().push(request);
        self.gate.pass().await;

        self.authorize(&function)?;
        let scripted = self.results.lock().get_mut(&function).and_then(VecDeque::pop_front);
        let result = scripted.unwrap_or_else(|| Ok(TxSubmission { txid: self.next_txid() }));
        debug!(%function, ?result, "stub contract call");
        result
    }
}
