use clap::Parser;
use stxdesk_config::{
    Config,
    figment::{
        self, Metadata, Profile,
        value::{Dict, Map, Value},
    },
};

/// Browser wallet bridge options.
#[derive(Clone, Debug, Default, Parser)]
#[command(next_help_heading = "Wallet options")]
pub struct WalletOpts {
    /// Port of the local page the browser wallet connects through.
    ///
    /// Use 0 to pick a free port.
    #[arg(long, global = true, value_name = "PORT")]
    pub port: Option<u16>,

    /// Seconds to wait for the wallet to connect or approve a call.
    #[arg(long, global = true, value_name = "SECONDS")]
    pub wallet_timeout: Option<u64>,
}

impl figment::Provider for WalletOpts {
    fn metadata(&self) -> Metadata {
        Metadata::named("WalletOpts")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let mut dict = Dict::new();
        let wallet = self.dict();
        if !wallet.is_empty() {
            dict.insert("wallet".into(), wallet.into());
        }
        Ok(Map::from([(Config::selected_profile(), dict)]))
    }
}

impl WalletOpts {
    pub fn dict(&self) -> Dict {
        let mut dict = Dict::new();
        if let Some(port) = self.port {
            dict.insert("port".into(), Value::from(port));
        }
        if let Some(timeout) = self.wallet_timeout {
            dict.insert("timeout".into(), Value::from(timeout));
        }
        dict
    }
}
