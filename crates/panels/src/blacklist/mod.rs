//! The Blacklist Manager: restricting addresses and moving STX through the contract.

mod admin;
pub use admin::{AdminForm, AdminPanel};

mod user;
pub use user::{RestrictionStatus, UserForm, UserPanel};

use crate::{client::ContractClient, gate::AdminGate, session::Session};
use std::sync::Arc;
use stxdesk_common::{ExecutorError, WalletAuth};

/// Title of the app.
pub const TITLE: &str = "STX Blacklist Manager";

/// The whole front-end: header, admin panel and user panel over one session.
#[derive(Debug)]
pub struct BlacklistApp {
    session: Session,
    gate: AdminGate,
    admin: AdminPanel,
    user: UserPanel,
}

impl BlacklistApp {
    pub fn new(client: Arc<ContractClient>, session: Session, gate: AdminGate) -> Self {
        Self {
            admin: AdminPanel::new(client.clone()),
            user: UserPanel::new(client, session.clone()),
            session,
            gate,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn login(&self, auth: &dyn WalletAuth) -> Result<String, ExecutorError> {
        self.session.connect_with(auth).await
    }

    pub fn logout(&self, auth: &dyn WalletAuth) {
        self.session.sign_out(auth);
    }

    /// `Logged in as: {address}` while connected.
    pub fn header_line(&self) -> Option<String> {
        self.session.identity().map(|identity| format!("Logged in as: {identity}"))
    }

    /// Label of the header button.
    pub fn header_control(&self) -> &'static str {
        if self.session.is_connected() { "Logout" } else { "Login" }
    }

    /// The admin panel, if the connected identity may see it.
    pub fn admin_panel(&self) -> Option<&AdminPanel> {
        self.gate.allows(self.session.identity().as_deref()).then_some(&self.admin)
    }

    pub fn user_panel(&self) -> &UserPanel {
        &self.user
    }
}
