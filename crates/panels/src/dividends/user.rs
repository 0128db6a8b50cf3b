use crate::{
    cache::Cached,
    client::ContractClient,
    form::principal_arg,
    invoker::{ActionInvoker, ActionOutcome, ActionRequest, decode_uint},
    session::Session,
};
use std::sync::Arc;
use stxdesk_common::TxSubmission;

/// Holder actions and the claimable balance of the connected identity.
#[derive(Debug)]
pub struct UserActions {
    write: ActionInvoker,
    read: ActionInvoker,
    session: Session,
    claimable: Cached<u128>,
}

impl UserActions {
    pub fn new(client: Arc<ContractClient>, session: Session) -> Self {
        Self {
            write: ActionInvoker::new(client.clone()),
            read: ActionInvoker::new(client),
            session,
            claimable: Cached::new(),
        }
    }

    pub fn claimable(&self) -> &Cached<u128> {
        &self.claimable
    }

    pub fn is_busy(&self) -> bool {
        self.write.is_busy()
    }

    /// Fetches `get-claimable-sum` for the connected identity.
    pub async fn refresh_claimable(&self) -> ActionOutcome<u128> {
        let identity = self.session.identity();
        let request = ActionRequest::new("get-claimable-sum")
            .failure_context("Error")
            .sender(identity.clone());
        match identity.as_deref().map(principal_arg) {
            Some(Ok(arg)) => self.read.query(request.arg(arg), &self.claimable, decode_uint).await,
            Some(Err(err)) => self.read.reject(&request, err),
            None => self.read.reject(&request, "no wallet connected"),
        }
    }

    pub async fn update_holdings(&self) -> ActionOutcome<TxSubmission> {
        self.write_then_refresh("update-holdings").await
    }

    pub async fn claim_payouts(&self) -> ActionOutcome<TxSubmission> {
        self.write_then_refresh("claim-payouts").await
    }

    /// The refresh starts only after the write resolved successfully.
    async fn write_then_refresh(&self, function: &str) -> ActionOutcome<TxSubmission> {
        let request = ActionRequest::new(function).failure_context("Error");
        let outcome = self.write.invoke(request).await;
        if outcome.is_success() {
            self.refresh_claimable().await;
        }
        outcome
    }

    pub fn lines(&self) -> Vec<String> {
        if self.is_busy() {
            return vec!["Processing...".to_string()];
        }
        vec![format!("Claimable Amount: {} STX", self.claimable.value().unwrap_or_default())]
    }
}
