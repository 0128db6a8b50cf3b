//! Subcommand implementations.

use crate::args::Stxdesk;
use eyre::{Result, WrapErr};
use std::{fmt, sync::Arc};
use stxdesk::{ActionOutcome, AdminGate, ContractClient, ShellNotifier};
use stxdesk_common::{ContractCallExecutor, ContractId, NodeClient, sh_println};
use stxdesk_config::{AppKind, Config};
use stxdesk_wallets::BrowserWalletServer;
use yansi::Paint;

pub mod blacklist;
pub mod connection;
pub mod dividends;

/// Resolved configuration of one app.
pub struct AppContext {
    pub config: Config,
    pub contract: ContractId,
    pub node: Arc<NodeClient>,
}

impl AppContext {
    /// Merges the command line over the config files and environment for `app`.
    pub fn load(args: &Stxdesk, app: AppKind) -> Result<Self> {
        let config = load_config(args, Some(app))?;
        let contract = config.contract_for(app)?;
        let node = NodeClient::builder(config.node_url())
            .timeout(config.request_timeout())
            .build()
            .wrap_err_with(|| format!("invalid node URL `{}`", config.node_url()))?;
        trace!(%contract, network = %config.network, node = config.node_url(), "loaded {app}");
        Ok(Self { config, contract, node: Arc::new(node) })
    }

    /// The Blacklist Manager shows its admin panel to everyone unless an admin is configured.
    /// The Div-Manager only ever shows it to the configured admin.
    pub fn gate(&self, app: AppKind) -> AdminGate {
        match (app, self.config.app(app).admin.clone()) {
            (AppKind::Blacklist, None) => AdminGate::open(),
            (_, admin) => AdminGate::new(admin),
        }
    }

    /// A client that submits through `wallet` and reports to the terminal.
    pub fn client(&self, wallet: Arc<dyn ContractCallExecutor>) -> Arc<ContractClient> {
        Arc::new(ContractClient::new(
            self.contract.clone(),
            self.config.network,
            wallet,
            self.node.clone(),
            Arc::new(ShellNotifier),
        ))
    }

    /// A bridge that is never started, for commands that only read.
    pub fn idle_wallet(&self) -> Arc<BrowserWalletServer> {
        Arc::new(BrowserWalletServer::new(
            self.config.wallet.port,
            self.config.network,
            self.config.wallet_timeout(),
        ))
    }
}

pub fn load_config(args: &Stxdesk, app: Option<AppKind>) -> Result<Config> {
    let mut figment = Config::figment().merge(&args.network).merge(&args.wallet);
    if let Some(app) = app {
        figment = figment.merge(args.app.for_app(app));
    }
    Ok(Config::try_from(figment)?)
}

/// Starts the browser bridge and tells the user where to approve.
pub async fn start_bridge(config: &Config) -> Result<BrowserWalletServer> {
    let mut server =
        BrowserWalletServer::new(config.wallet.port, config.network, config.wallet_timeout());
    server.start().await.wrap_err("failed to start the browser wallet bridge")?;
    sh_println!("Open {} in your browser to connect your wallet.", server.url().cyan().bold())?;
    Ok(server)
}

/// Stops the bridge and passes `result` through.
pub async fn stop_bridge<T>(mut server: BrowserWalletServer, result: Result<T>) -> Result<T> {
    if let Err(err) = server.stop().await {
        warn!(%err, "failed to stop the browser wallet bridge");
    }
    result
}

/// An action that failed after its notification was printed.
///
/// `main` turns it into a failure exit status without printing it again.
#[derive(Debug)]
pub struct ActionFailed(pub String);

impl fmt::Display for ActionFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ActionFailed {}

/// Passes a successful value through and turns a failed action into [`ActionFailed`].
pub fn finish<T>(outcome: ActionOutcome<T>) -> Result<Option<T>> {
    match outcome {
        ActionOutcome::Success(value) => Ok(Some(value)),
        ActionOutcome::Failure(message) => Err(ActionFailed(message).into()),
        ActionOutcome::Busy => Ok(None),
    }
}
