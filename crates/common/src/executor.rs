//! The collaborators that actually talk to the chain.
//!
//! Panels never sign, broadcast or query on their own: they hand a request to one of these
//! executors and await exactly one terminal result.

use crate::{
    clarity::ClarityValue,
    contract::{ContractId, Network},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Errors reported by executors.
///
/// The `Display` output is the human-readable message surfaced to the user.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecutorError {
    /// The user (or the wallet on their behalf) declined the operation.
    #[error("{0}")]
    Rejected(String),
    /// The node could not be reached or answered with something unusable.
    #[error("{0}")]
    Transport(String),
    /// The node evaluated the call and reported a failure.
    #[error("{0}")]
    Node(String),
    /// The returned value could not be decoded.
    #[error("failed to decode result: {0}")]
    Decode(String),
    /// No terminal result arrived in time.
    #[error("{0} timed out")]
    Timeout(String),
    /// The executor cannot serve requests, e.g. no wallet is connected.
    #[error("{0}")]
    Unavailable(String),
}

/// A state-changing contract call to submit through the wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractCallRequest {
    /// The target contract.
    pub contract: ContractId,
    /// The public function to call.
    pub function: String,
    /// Ordered function arguments.
    pub args: Vec<ClarityValue>,
    /// The network the wallet should submit on.
    pub network: Network,
}

/// The result of a submitted contract call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxSubmission {
    /// The transaction id reported by the wallet.
    pub txid: String,
}

/// A read-only function call evaluated by a node without a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadOnlyRequest {
    /// The target contract.
    pub contract: ContractId,
    /// The read-only function to call.
    pub function: String,
    /// Ordered function arguments.
    pub args: Vec<ClarityValue>,
    /// The principal the call is evaluated as (`tx-sender`).
    pub sender: String,
}

/// Wallet session provider.
#[async_trait]
pub trait WalletAuth: Send + Sync {
    /// Waits until the wallet reports a connected address and returns it.
    async fn connect(&self) -> Result<String, ExecutorError>;

    /// Forgets the connected wallet.
    fn sign_out(&self);
}

/// Submits state-changing contract calls.
#[async_trait]
pub trait ContractCallExecutor: Send + Sync {
    /// Submits the call, resolving once with the transaction id or an error.
    async fn call(&self, request: ContractCallRequest) -> Result<TxSubmission, ExecutorError>;
}

/// Evaluates read-only contract functions.
#[async_trait]
pub trait ReadOnlyExecutor: Send + Sync {
    /// Evaluates the call and returns the decoded result.
    async fn call_read_only(&self, request: ReadOnlyRequest) -> Result<ClarityValue, ExecutorError>;
}
