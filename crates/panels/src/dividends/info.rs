use crate::{
    cache::Cached,
    client::ContractClient,
    invoker::{ActionInvoker, ActionOutcome, ActionRequest, decode_uint},
};
use std::sync::Arc;

/// Contract-wide figures, each fetched on its own.
#[derive(Debug)]
pub struct ContractInfo {
    payouts: ActionInvoker,
    holdings: ActionInvoker,
    payouts_per_token: Cached<u128>,
    contract_holdings: Cached<u128>,
}

impl ContractInfo {
    pub fn new(client: Arc<ContractClient>) -> Self {
        Self {
            payouts: ActionInvoker::new(client.clone()),
            holdings: ActionInvoker::new(client),
            payouts_per_token: Cached::new(),
            contract_holdings: Cached::new(),
        }
    }

    pub fn payouts_per_token(&self) -> &Cached<u128> {
        &self.payouts_per_token
    }

    pub fn contract_holdings(&self) -> &Cached<u128> {
        &self.contract_holdings
    }

    pub fn is_loading(&self) -> bool {
        self.payouts_per_token.is_loading() || self.contract_holdings.is_loading()
    }

    /// Fetches both figures concurrently.
    pub async fn load(&self) -> (ActionOutcome<u128>, ActionOutcome<u128>) {
        tokio::join!(
            self.payouts.query(
                ActionRequest::new("get-payouts-per-token").failure_context("Error"),
                &self.payouts_per_token,
                decode_uint,
            ),
            self.holdings.query(
                ActionRequest::new("get-contract-holdings").failure_context("Error"),
                &self.contract_holdings,
                decode_uint,
            ),
        )
    }

    pub fn lines(&self) -> Vec<String> {
        let payouts = self.payouts_per_token.value().unwrap_or_default();
        let holdings = self.contract_holdings.value().unwrap_or_default();
        vec![format!("Payouts per Token: {payouts}"), format!("Contract Holdings: {holdings} STX")]
    }
}
