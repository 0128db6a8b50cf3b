use crate::{
    client::ContractClient,
    form::uint_arg,
    invoker::{ActionInvoker, ActionOutcome, ActionRequest},
};
use parking_lot::Mutex;
use std::sync::Arc;
use stxdesk_common::TxSubmission;

/// Payout management for the admin.
#[derive(Debug)]
pub struct AdminActions {
    invoker: ActionInvoker,
    payout_amount: Mutex<String>,
}

impl AdminActions {
    pub fn new(client: Arc<ContractClient>) -> Self {
        Self { invoker: ActionInvoker::new(client), payout_amount: Mutex::default() }
    }

    pub fn payout_amount(&self) -> String {
        self.payout_amount.lock().clone()
    }

    pub fn set_payout_amount(&self, amount: impl Into<String>) {
        *self.payout_amount.lock() = amount.into();
    }

    pub fn is_busy(&self) -> bool {
        self.invoker.is_busy()
    }

    /// Calls `add-payouts` with the amount field, which is cleared on success.
    pub async fn add_payouts(&self) -> ActionOutcome<TxSubmission> {
        let amount = self.payout_amount();
        let request = ActionRequest::new("add-payouts").failure_context("Error");
        let outcome = self.invoker.submit(request, uint_arg(&amount).map(|arg| vec![arg])).await;
        if outcome.is_success() {
            self.payout_amount.lock().clear();
        }
        outcome
    }

    pub async fn update_token_supply(&self) -> ActionOutcome<TxSubmission> {
        let request = ActionRequest::new("update-token-supply").failure_context("Error");
        self.invoker.invoke(request).await
    }

    pub async fn withdraw_unclaimed_payouts(&self) -> ActionOutcome<TxSubmission> {
        let request = ActionRequest::new("withdraw-unclaimed-payouts").failure_context("Error");
        self.invoker.invoke(request).await
    }
}
