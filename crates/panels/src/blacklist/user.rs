use crate::{
    cache::Cached,
    client::ContractClient,
    form::{principal_arg, uint_arg},
    invoker::{ActionInvoker, ActionOutcome, ActionRequest, decode_bool},
    session::Session,
};
use parking_lot::Mutex;
use std::{fmt, sync::Arc};
use stxdesk_common::TxSubmission;

/// Raw input fields of the user panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserForm {
    /// Amount to send, in micro-STX.
    pub amount: String,
    pub recipient: String,
    /// Address whose restriction status to look up.
    pub check_address: String,
}

/// Result of `is-restricted`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestrictionStatus {
    Restricted,
    NotRestricted,
}

impl From<bool> for RestrictionStatus {
    fn from(restricted: bool) -> Self {
        if restricted { Self::Restricted } else { Self::NotRestricted }
    }
}

impl fmt::Display for RestrictionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Restricted => f.write_str("restricted"),
            Self::NotRestricted => f.write_str("not restricted"),
        }
    }
}

/// Sending STX and checking restrictions, open to everyone.
///
/// The two actions have their own busy flags and may run at the same time.
#[derive(Debug)]
pub struct UserPanel {
    send: ActionInvoker,
    check: ActionInvoker,
    session: Session,
    form: Mutex<UserForm>,
    restriction: Cached<RestrictionStatus>,
}

impl UserPanel {
    pub fn new(client: Arc<ContractClient>, session: Session) -> Self {
        Self {
            send: ActionInvoker::new(client.clone()),
            check: ActionInvoker::new(client),
            session,
            form: Mutex::default(),
            restriction: Cached::new(),
        }
    }

    pub fn form(&self) -> UserForm {
        self.form.lock().clone()
    }

    pub fn edit_form(&self, edit: impl FnOnce(&mut UserForm)) {
        edit(&mut self.form.lock());
    }

    pub fn is_sending(&self) -> bool {
        self.send.is_busy()
    }

    pub fn is_checking(&self) -> bool {
        self.check.is_busy()
    }

    /// The last status fetched.
    pub fn restriction(&self) -> &Cached<RestrictionStatus> {
        &self.restriction
    }

    /// `Address is restricted` or `Address is not restricted`, once a check succeeded.
    pub fn status_line(&self) -> Option<String> {
        self.restriction.value().map(|status| format!("Address is {status}"))
    }

    /// Calls `send-stx` with the amount and recipient fields.
    pub async fn send_stx(&self) -> ActionOutcome<TxSubmission> {
        let form = self.form();
        let request = ActionRequest::new("send-stx")
            .success_message("STX sent successfully")
            .failure_context("Error sending STX");
        let args = uint_arg(&form.amount)
            .and_then(|amount| Ok(vec![amount, principal_arg(&form.recipient)?]));
        self.send.submit(request, args).await
    }

    /// Calls `is-restricted` with the check address field.
    pub async fn check_restricted(&self) -> ActionOutcome<RestrictionStatus> {
        let address = self.form().check_address;
        let request = ActionRequest::new("is-restricted")
            .failure_context("Error checking restriction")
            .sender(self.session.identity());
        match principal_arg(&address) {
            Ok(arg) => {
                let decode = |value| decode_bool(value).map(RestrictionStatus::from);
                self.check.query(request.arg(arg), &self.restriction, decode).await
            }
            Err(err) => self.check.reject(&request, err),
        }
    }
}
