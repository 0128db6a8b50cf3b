use crate::{
    client::ContractClient,
    form::{principal_arg, uint_arg},
    invoker::{ActionInvoker, ActionOutcome, ActionRequest},
};
use parking_lot::Mutex;
use std::sync::Arc;
use stxdesk_common::{ClarityValue, TxSubmission};

/// Raw input fields of the admin panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdminForm {
    /// Address to restrict or unrestrict.
    pub target_address: String,
    pub new_admin: String,
    /// Transfer fee, in micro-STX.
    pub new_fee: String,
    pub new_fee_recipient: String,
}

/// Restriction and fee management. Its buttons share one busy flag.
#[derive(Debug)]
pub struct AdminPanel {
    invoker: ActionInvoker,
    form: Mutex<AdminForm>,
}

impl AdminPanel {
    pub fn new(client: Arc<ContractClient>) -> Self {
        Self { invoker: ActionInvoker::new(client), form: Mutex::default() }
    }

    pub fn form(&self) -> AdminForm {
        self.form.lock().clone()
    }

    pub fn edit_form(&self, edit: impl FnOnce(&mut AdminForm)) {
        edit(&mut self.form.lock());
    }

    pub fn is_busy(&self) -> bool {
        self.invoker.is_busy()
    }

    pub async fn restrict_address(&self) -> ActionOutcome<TxSubmission> {
        let target = self.form().target_address;
        self.call("restrict-address", principal_arg(&target)).await
    }

    pub async fn unrestrict_address(&self) -> ActionOutcome<TxSubmission> {
        let target = self.form().target_address;
        self.call("unrestrict-address", principal_arg(&target)).await
    }

    pub async fn update_admin(&self) -> ActionOutcome<TxSubmission> {
        let new_admin = self.form().new_admin;
        self.call("update-admin", principal_arg(&new_admin)).await
    }

    pub async fn set_transfer_fee(&self) -> ActionOutcome<TxSubmission> {
        let fee = self.form().new_fee;
        self.call("set-transfer-fee", uint_arg(&fee)).await
    }

    pub async fn set_fee_recipient(&self) -> ActionOutcome<TxSubmission> {
        let recipient = self.form().new_fee_recipient;
        self.call("set-fee-recipient", principal_arg(&recipient)).await
    }

    async fn call(
        &self,
        function: &str,
        arg: Result<ClarityValue, String>,
    ) -> ActionOutcome<TxSubmission> {
        self.invoker.submit(ActionRequest::new(function), arg.map(|arg| vec![arg])).await
    }
}
