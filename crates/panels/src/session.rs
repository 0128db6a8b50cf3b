//! The connected identity shared by every panel of an app.

use parking_lot::RwLock;
use std::sync::Arc;
use stxdesk_common::{ExecutorError, WalletAuth};

/// Where the wallet connection stands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected(String),
}

/// Cloneable handle to the connection state. Starts disconnected.
#[derive(Clone, Debug, Default)]
pub struct Session {
    state: Arc<RwLock<ConnectionState>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that is already connected as `identity`.
    pub fn connected(identity: impl Into<String>) -> Self {
        let session = Self::default();
        *session.state.write() = ConnectionState::Connected(identity.into());
        session
    }

    pub fn state(&self) -> ConnectionState {
        self.state.read().clone()
    }

    /// The connected address, if any.
    pub fn identity(&self) -> Option<String> {
        match &*self.state.read() {
            ConnectionState::Connected(identity) => Some(identity.clone()),
            _ => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(*self.state.read(), ConnectionState::Connected(_))
    }

    /// Waits for the wallet to report an address and stores it.
    ///
    /// A failed connect leaves the session disconnected.
    pub async fn connect_with(&self, auth: &dyn WalletAuth) -> Result<String, ExecutorError> {
        *self.state.write() = ConnectionState::Connecting;
        match auth.connect().await {
            Ok(identity) => {
                debug!(%identity, "wallet connected");
                *self.state.write() = ConnectionState::Connected(identity.clone());
                Ok(identity)
            }
            Err(err) => {
                warn!(%err, "wallet connection failed");
                *self.state.write() = ConnectionState::Disconnected;
                Err(err)
            }
        }
    }

    /// Clears the identity and tells the wallet to forget it.
    pub fn sign_out(&self, auth: &dyn WalletAuth) {
        auth.sign_out();
        *self.state.write() = ConnectionState::Disconnected;
        debug!("signed out");
    }

    /// Label of the control that connects or disconnects.
    pub fn control_label(&self) -> &'static str {
        if self.is_connected() { "Sign Out" } else { "Connect Wallet" }
    }
}
