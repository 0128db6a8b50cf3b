//! The Div-Manager: dividend payouts to token holders.

mod admin;
pub use admin::AdminActions;

mod info;
pub use info::ContractInfo;

mod user;
pub use user::UserActions;

use crate::{client::ContractClient, gate::AdminGate, session::Session};
use std::sync::Arc;
use stxdesk_common::{ExecutorError, WalletAuth};

/// Title of the app.
pub const TITLE: &str = "STX Dividend Distribution";

/// The whole front-end. Its panels only exist while a wallet is connected.
#[derive(Debug)]
pub struct DividendApp {
    session: Session,
    gate: AdminGate,
    info: ContractInfo,
    user: UserActions,
    admin: AdminActions,
}

impl DividendApp {
    pub fn new(client: Arc<ContractClient>, session: Session, gate: AdminGate) -> Self {
        Self {
            info: ContractInfo::new(client.clone()),
            user: UserActions::new(client.clone(), session.clone()),
            admin: AdminActions::new(client),
            session,
            gate,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Connects and loads what the panels display.
    pub async fn connect(&self, auth: &dyn WalletAuth) -> Result<String, ExecutorError> {
        let identity = self.session.connect_with(auth).await?;
        self.load().await;
        Ok(identity)
    }

    pub fn sign_out(&self, auth: &dyn WalletAuth) {
        self.session.sign_out(auth);
    }

    /// `Connected: {address}` while connected.
    pub fn connection_line(&self) -> Option<String> {
        self.session.identity().map(|identity| format!("Connected: {identity}"))
    }

    /// Fetches contract info and the claimable amount.
    pub async fn load(&self) {
        if !self.session.is_connected() {
            return;
        }
        tokio::join!(self.info.load(), self.user.refresh_claimable());
    }

    pub fn contract_info(&self) -> Option<&ContractInfo> {
        self.session.is_connected().then_some(&self.info)
    }

    pub fn user_actions(&self) -> Option<&UserActions> {
        self.session.is_connected().then_some(&self.user)
    }

    /// The admin panel, if connected as the admin.
    pub fn admin_actions(&self) -> Option<&AdminActions> {
        self.gate.allows(self.session.identity().as_deref()).then_some(&self.admin)
    }
}
