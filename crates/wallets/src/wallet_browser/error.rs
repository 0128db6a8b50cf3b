use stxdesk_common::ExecutorError;

#[derive(Debug, thiserror::Error)]
pub enum BrowserWalletError {
    #[error("{operation} rejected: {reason}")]
    Rejected { operation: &'static str, reason: String },

    #[error("{operation} timed out")]
    Timeout { operation: &'static str },

    #[error("Browser wallet is not connected")]
    NotConnected,

    #[error("Browser wallet server is already running")]
    AlreadyRunning,

    #[error("Failed to start browser wallet server: {0}")]
    Server(#[from] std::io::Error),
}

impl From<BrowserWalletError> for ExecutorError {
    fn from(err: BrowserWalletError) -> Self {
        match err {
            // the wallet's reason is what the user sees, e.g. "User cancelled"
            BrowserWalletError::Rejected { reason, .. } => Self::Rejected(reason),
            BrowserWalletError::Timeout { operation } => Self::Timeout(operation.to_string()),
            BrowserWalletError::NotConnected => Self::Unavailable(err.to_string()),
            BrowserWalletError::AlreadyRunning | BrowserWalletError::Server(_) => {
                Self::Transport(err.to_string())
            }
        }
    }
}
