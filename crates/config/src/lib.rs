//! # stxdesk-config
//!
//! Configuration for the stxdesk panels: network, node, per-app contract coordinates and the
//! browser wallet bridge.

#![warn(missing_docs, unused_crate_dependencies)]

#[macro_use]
extern crate tracing;

use eyre::{OptionExt, Result, WrapErr};
use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Serialized},
    value::{Dict, Map},
};
use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, time::Duration};
use stxdesk_common::{ContractId, Network};

pub use figment;

mod error;
pub use error::{ConfigError, ExtractConfigError};

mod providers;
use providers::TomlFileProvider;

/// stxdesk configuration
///
/// # Defaults
///
/// All configuration values have a default, documented in the [fields](#fields)
/// section below. [`Config::default`] returns the default values.
///
/// The [`Default`] trait is not used for the whole resolution. Use [`Config::load`] to merge
/// the toml files and `STXDESK_*` environment variables over the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The selected profile. **(default: _default_ `default`)**
    ///
    /// **Note:** This field is never serialized nor deserialized. When a `Config` is merged
    /// into a `Figment` as a `Provider`, this profile is selected on the `Figment`. When a
    /// `Config` is extracted, this field is set to the extracting Figment's selected `Profile`.
    #[serde(skip)]
    pub profile: Profile,
    /// The network the contracts are deployed on.
    pub network: Network,
    /// Overrides the network's public node endpoint.
    pub node_url: Option<String>,
    /// Timeout in seconds for node requests.
    pub request_timeout: u64,
    /// Blacklist Manager contract.
    pub blacklist: AppConfig,
    /// Div-Manager contract.
    pub dividends: AppConfig,
    /// Browser wallet bridge settings.
    pub wallet: WalletConfig,
}

/// The fixed coordinates of one app's contract.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// `<address>.<name>` of the deployed contract.
    pub contract: Option<String>,
    /// The designated admin address. Without one the admin panel is always shown.
    pub admin: Option<String>,
}

/// Settings of the local bridge that talks to the browser wallet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Port of the bridge; `0` picks a free one.
    pub port: u16,
    /// Seconds to wait for the user to connect or approve a call.
    pub timeout: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self { port: 9545, timeout: 300 }
    }
}

/// The two front-ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppKind {
    /// The Blacklist Manager.
    Blacklist,
    /// The Div-Manager.
    Dividends,
}

impl AppKind {
    /// The config section of this app.
    pub const fn section(self) -> &'static str {
        match self {
            Self::Blacklist => "blacklist",
            Self::Dividends => "dividends",
        }
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section())
    }
}

impl Config {
    /// The default profile: "default"
    pub const DEFAULT_PROFILE: Profile = Profile::Default;

    /// The file name of the config toml file
    pub const FILE_NAME: &'static str = "stxdesk.toml";

    /// The name of the directory stxdesk reserves for itself under the user's home directory:
    /// `~`
    pub const STXDESK_DIR_NAME: &'static str = ".stxdesk";

    /// Tables that are kept as nested sections; their environment variables map
    /// `STXDESK_WALLET_PORT` to `wallet.port`.
    pub const STANDALONE_SECTIONS: &'static [&'static str] = &["blacklist", "dividends", "wallet"];

    /// Returns the current `Config`
    ///
    /// See [`Config::figment`]
    pub fn load() -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment())
    }

    /// Returns the selected profile
    ///
    /// If the `STXDESK_PROFILE` env variable is not set, this returns the `DEFAULT_PROFILE`
    pub fn selected_profile() -> Profile {
        Profile::from_env_or("STXDESK_PROFILE", Self::DEFAULT_PROFILE)
    }

    /// Returns the path to the global toml file: `~/.stxdesk/stxdesk.toml`.
    pub fn stxdesk_dir_toml() -> Option<PathBuf> {
        Self::stxdesk_dir().map(|p| p.join(Self::FILE_NAME))
    }

    /// Returns the path to the config dir: `~/.stxdesk/`.
    pub fn stxdesk_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(Self::STXDESK_DIR_NAME))
    }

    /// Returns the default figment
    ///
    /// The default figment reads from the following sources, in ascending
    /// priority order:
    ///
    ///   1. [`Config::default()`] (see [defaults](#defaults))
    ///   2. `~/.stxdesk/stxdesk.toml`
    ///   3. `stxdesk.toml` in the current directory, or the file named by `STXDESK_CONFIG`
    ///   4. `STXDESK_` prefixed environment variables
    ///
    /// The profile selected is the value set in the `STXDESK_PROFILE`
    /// environment variable. If it is not set, it defaults to `default`.
    pub fn figment() -> Figment {
        let profile = Self::selected_profile();
        let mut figment = Figment::from(Self::default());

        if let Some(global_toml) = Self::stxdesk_dir_toml().filter(|p| p.exists()) {
            figment = figment.merge(TomlFileProvider::new(None, global_toml).cached());
        }
        figment = figment
            .merge(TomlFileProvider::new(Some("STXDESK_CONFIG"), Self::FILE_NAME).cached());

        figment
            .merge(
                Env::prefixed("STXDESK_")
                    .ignore(&["PROFILE", "CONFIG", "DEBUG"])
                    .map(|key| {
                        let key = key.as_str();
                        if Self::STANDALONE_SECTIONS.iter().any(|section| {
                            key.starts_with(&format!("{}_", section.to_ascii_uppercase()))
                        }) {
                            key.replacen('_', ".", 1).into()
                        } else {
                            key.into()
                        }
                    })
                    .global(),
            )
            .select(profile)
    }

    /// Attempts to extract a `Config` from `provider`, returning the result.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stxdesk_config::Config;
    ///
    /// let config = Config::try_from(Config::figment().merge(("request_timeout", 5)));
    /// assert_eq!(config.unwrap().request_timeout, 5);
    /// ```
    pub fn try_from<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        let figment = Figment::from(provider);
        let mut config = figment.extract::<Self>().map_err(ExtractConfigError::new)?;
        config.profile = figment.profile().clone();
        trace!(profile = %config.profile, network = %config.network, "loaded config");
        Ok(config)
    }

    /// Returns the node endpoint: the override, or the network's public API.
    pub fn node_url(&self) -> &str {
        self.node_url.as_deref().unwrap_or_else(|| self.network.default_node_url())
    }

    /// Returns the node request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Returns the browser wallet timeout.
    pub fn wallet_timeout(&self) -> Duration {
        Duration::from_secs(self.wallet.timeout)
    }

    /// Returns the section of `app`.
    pub fn app(&self, app: AppKind) -> &AppConfig {
        match app {
            AppKind::Blacklist => &self.blacklist,
            AppKind::Dividends => &self.dividends,
        }
    }

    /// Parses the configured contract of `app`.
    pub fn contract_for(&self, app: AppKind) -> Result<ContractId> {
        let section = app.section();
        let contract = self.app(app).contract.as_deref().ok_or_eyre(format!(
            "no contract configured for {section}; set `{section}.contract` in {} or \
             STXDESK_{}_CONTRACT",
            Self::FILE_NAME,
            section.to_ascii_uppercase()
        ))?;
        contract.parse().wrap_err_with(|| format!("invalid `{section}.contract`: {contract:?}"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: Self::DEFAULT_PROFILE,
            network: Network::default(),
            node_url: None,
            request_timeout: 30,
            blacklist: AppConfig::default(),
            dividends: AppConfig::default(),
            wallet: WalletConfig::default(),
        }
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("stxdesk Config")
    }

    #[track_caller]
    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }

    fn profile(&self) -> Option<Profile> {
        Some(self.profile.clone())
    }
}
