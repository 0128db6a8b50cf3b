use std::sync::Arc;

use parking_lot::Mutex;
use stxdesk_common::Network;
use uuid::Uuid;

use crate::wallet_browser::{
    queue::RequestQueue,
    types::{BrowserContractCall, Connection, ContractCallResponse},
};

#[derive(Debug, Clone)]
pub(crate) struct BrowserWalletState {
    /// Current information about the wallet connection.
    connection: Arc<Mutex<Option<Connection>>>,
    /// Request/response queue for contract calls.
    contract_calls: Arc<Mutex<RequestQueue<BrowserContractCall, ContractCallResponse>>>,
    /// Token the page must echo in `X-Session-Token`.
    session_token: Arc<String>,
    /// Network whose address the page reports on connect.
    network: Network,
}

impl Default for BrowserWalletState {
    fn default() -> Self {
        Self::new(Network::default())
    }
}

impl BrowserWalletState {
    /// Create a new browser wallet state with a fresh session token.
    pub fn new(network: Network) -> Self {
        Self {
            connection: Arc::new(Mutex::new(None)),
            contract_calls: Arc::new(Mutex::new(RequestQueue::new())),
            session_token: Arc::new(Uuid::new_v4().simple().to_string()),
            network,
        }
    }

    pub fn session_token(&self) -> Arc<String> {
        self.session_token.clone()
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Check if wallet is connected.
    pub fn is_connected(&self) -> bool {
        self.connection.lock().is_some()
    }

    /// Get current connection information.
    pub fn get_connection(&self) -> Option<Connection> {
        self.connection.lock().clone()
    }

    /// Set connection information.
    pub fn set_connection(&self, connection: Option<Connection>) {
        *self.connection.lock() = connection;
    }

    /// Add a contract call request.
    pub fn add_contract_call_request(&self, request: BrowserContractCall) {
        self.contract_calls.lock().add_request(request);
    }

    /// Check if a contract call request exists.
    pub fn has_contract_call_request(&self, id: &Uuid) -> bool {
        self.contract_calls.lock().has_request(id)
    }

    /// Read the next contract call request.
    pub fn read_next_contract_call_request(&self) -> Option<BrowserContractCall> {
        self.contract_calls.lock().read_request().cloned()
    }

    /// Remove a contract call request.
    pub fn remove_contract_call_request(&self, id: &Uuid) {
        self.contract_calls.lock().remove_request(id);
    }

    /// Add a contract call response, resolving its request.
    pub fn add_contract_call_response(&self, response: ContractCallResponse) {
        let id = response.id;
        let mut calls = self.contract_calls.lock();
        calls.add_response(id, response);
        calls.remove_request(&id);
    }

    /// Get contract call response, removing it from the queue.
    pub fn get_contract_call_response(&self, id: &Uuid) -> Option<ContractCallResponse> {
        self.contract_calls.lock().get_response(id)
    }
}
