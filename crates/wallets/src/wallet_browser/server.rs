use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use parking_lot::Mutex;
use stxdesk_common::{
    ContractCallExecutor, ContractCallRequest, ExecutorError, Network, TxSubmission, WalletAuth,
};
use tokio::{net::TcpListener, sync::oneshot, time::Instant};

use crate::wallet_browser::{
    error::BrowserWalletError,
    router::build_router,
    state::BrowserWalletState,
    types::{BrowserContractCall, Connection, ContractCallResponse},
};

/// How often pending operations check for the wallet's answer.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Local HTTP bridge between the terminal and a browser wallet extension.
///
/// The page served at `/` connects the wallet and approves queued contract calls; the
/// terminal side waits on the shared state for the outcome.
#[derive(Debug, Clone)]
pub struct BrowserWalletServer {
    port: u16,
    state: Arc<BrowserWalletState>,
    shutdown_tx: Arc<Mutex<Option<oneshot::Sender<()>>>>,
    timeout: Duration,
}

impl BrowserWalletServer {
    /// Create a new browser wallet server. Port `0` picks a free port on start.
    ///
    /// The page reports the wallet's address on `network`.
    pub fn new(port: u16, network: Network, timeout: Duration) -> Self {
        Self {
            port,
            state: Arc::new(BrowserWalletState::new(network)),
            shutdown_tx: Arc::new(Mutex::new(None)),
            timeout,
        }
    }

    /// Start the server on localhost.
    pub async fn start(&mut self) -> Result<(), BrowserWalletError> {
        if self.shutdown_tx.lock().is_some() {
            return Err(BrowserWalletError::AlreadyRunning);
        }

        let listener =
            TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, self.port))).await?;
        self.port = listener.local_addr()?.port();

        let router = build_router(self.state.clone());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        *self.shutdown_tx.lock() = Some(shutdown_tx);

        tokio::spawn(async move {
            let server = axum::serve(listener, router).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });
            if let Err(err) = server.await {
                error!(%err, "browser wallet server failed");
            }
        });

        debug!(port = self.port, "browser wallet server started");
        Ok(())
    }

    /// Stop the server.
    pub async fn stop(&mut self) -> Result<(), BrowserWalletError> {
        if let Some(tx) = self.shutdown_tx.lock().take() {
            let _ = tx.send(());
            debug!(port = self.port, "browser wallet server stopped");
        }
        Ok(())
    }

    /// The port the server listens on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The URL of the page the user opens.
    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// The token the served page sends in `X-Session-Token`.
    pub fn session_token(&self) -> Arc<String> {
        self.state.session_token()
    }

    /// The network the page connects the wallet on.
    pub fn network(&self) -> Network {
        self.state.network()
    }

    /// How long connects and contract calls wait for the user.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check if a wallet is connected.
    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// Get current wallet connection.
    pub fn get_connection(&self) -> Option<Connection> {
        self.state.get_connection()
    }

    /// Wait until the page reports a connected wallet.
    pub async fn wait_for_connection(&self) -> Result<Connection, BrowserWalletError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(connection) = self.state.get_connection() {
                return Ok(connection);
            }
            if Instant::now() >= deadline {
                return Err(BrowserWalletError::Timeout { operation: "Wallet connection" });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Queue a contract call for the wallet and wait for exactly one outcome: the txid, a
    /// rejection, or a timeout. A timed out request is withdrawn from the queue.
    pub async fn request_contract_call(
        &self,
        call: BrowserContractCall,
    ) -> Result<String, BrowserWalletError> {
        if !self.is_connected() {
            return Err(BrowserWalletError::NotConnected);
        }

        let id = call.id;
        debug!(%id, function = %call.function_name, "queueing contract call");
        self.state.add_contract_call_request(call);

        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(response) = self.state.get_contract_call_response(&id) {
                return Self::into_txid(response);
            }
            if Instant::now() >= deadline {
                self.state.remove_contract_call_request(&id);
                return Err(BrowserWalletError::Timeout { operation: "Contract call" });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    fn into_txid(response: ContractCallResponse) -> Result<String, BrowserWalletError> {
        match response {
            ContractCallResponse { error: Some(reason), .. } => {
                Err(BrowserWalletError::Rejected { operation: "Contract call", reason })
            }
            ContractCallResponse { txid: Some(txid), .. } => Ok(txid),
            ContractCallResponse { .. } => Err(BrowserWalletError::Rejected {
                operation: "Contract call",
                reason: "Wallet returned no transaction id".to_string(),
            }),
        }
    }
}

#[async_trait]
impl WalletAuth for BrowserWalletServer {
    async fn connect(&self) -> Result<String, ExecutorError> {
        Ok(self.wait_for_connection().await?.address)
    }

    fn sign_out(&self) {
        self.state.set_connection(None);
    }
}

#[async_trait]
impl ContractCallExecutor for BrowserWalletServer {
    async fn call(&self, request: ContractCallRequest) -> Result<TxSubmission, ExecutorError> {
        let call = BrowserContractCall::from(&request);
        if let Some(connection) = self.get_connection()
            && connection.network != request.network
        {
            warn!(
                wallet = %connection.network,
                contract = %request.network,
                "wallet network differs from the contract's network"
            );
        }
        let txid = self.request_contract_call(call).await?;
        Ok(TxSubmission { txid })
    }
}
