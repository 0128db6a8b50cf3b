use clap::Parser;
use stxdesk_config::{
    AppKind, Config,
    figment::{
        self, Metadata, Profile,
        value::{Dict, Map},
    },
};

/// Overrides for the contract of the selected app.
#[derive(Clone, Debug, Default, Parser)]
#[command(next_help_heading = "Contract options")]
pub struct AppOpts {
    /// The contract to talk to, as `<address>.<name>`.
    #[arg(long, global = true, value_name = "CONTRACT")]
    pub contract: Option<String>,

    /// The designated admin address.
    #[arg(long, global = true, value_name = "ADDRESS")]
    pub admin: Option<String>,
}

impl AppOpts {
    /// Returns a provider that writes these overrides into the section of `app`.
    pub fn for_app(&self, app: AppKind) -> AppOptsProvider<'_> {
        AppOptsProvider { opts: self, app }
    }

    pub fn dict(&self) -> Dict {
        let mut dict = Dict::new();
        if let Some(contract) = &self.contract {
            dict.insert("contract".into(), contract.clone().into());
        }
        if let Some(admin) = &self.admin {
            dict.insert("admin".into(), admin.clone().into());
        }
        dict
    }
}

/// [`AppOpts`] bound to one app section.
#[derive(Clone, Copy, Debug)]
pub struct AppOptsProvider<'a> {
    opts: &'a AppOpts,
    app: AppKind,
}

impl figment::Provider for AppOptsProvider<'_> {
    fn metadata(&self) -> Metadata {
        Metadata::named("AppOpts")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let mut dict = Dict::new();
        let section = self.opts.dict();
        if !section.is_empty() {
            dict.insert(self.app.section().into(), section.into());
        }
        Ok(Map::from([(Config::selected_profile(), dict)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::{NetworkOpts, WalletOpts};
    use stxdesk_common::Network;

    #[test]
    fn flags_override_config() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "stxdesk.toml",
                r#"
                [profile.default]
                network = "testnet"

                [profile.default.dividends]
                contract = "SP000000000000000000002Q6VF78.div-manager"
                admin = "SP_FILE_ADMIN"
            "#,
            )?;
            let network = NetworkOpts {
                network: Some(Network::Mainnet),
                node_url: Some("http://localhost:3999".into()),
                request_timeout: None,
            };
            let wallet = WalletOpts { port: Some(0), wallet_timeout: None };
            let app = AppOpts { contract: None, admin: Some("SP_ADMIN".into()) };

            let figment = Config::figment()
                .merge(&network)
                .merge(&wallet)
                .merge(app.for_app(AppKind::Dividends));
            let config = Config::try_from(figment).unwrap();

            assert_eq!(config.network, Network::Mainnet);
            assert_eq!(config.node_url(), "http://localhost:3999");
            assert_eq!(config.request_timeout, 30);
            assert_eq!(config.wallet.port, 0);
            assert_eq!(config.wallet.timeout, 300);
            assert_eq!(config.dividends.admin.as_deref(), Some("SP_ADMIN"));
            assert_eq!(
                config.dividends.contract.as_deref(),
                Some("SP000000000000000000002Q6VF78.div-manager")
            );
            assert_eq!(config.blacklist.admin, None);
            Ok(())
        });
    }
}
