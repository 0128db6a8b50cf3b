use clap::Parser;
use stxdesk_common::Network;
use stxdesk_config::{
    Config,
    figment::{
        self, Metadata, Profile,
        value::{Dict, Map, Value},
    },
};

/// Node and network options.
#[derive(Clone, Debug, Default, Parser)]
#[command(next_help_heading = "Network options")]
pub struct NetworkOpts {
    /// The network the contracts are deployed on.
    #[arg(long, short, global = true, value_name = "NETWORK")]
    pub network: Option<Network>,

    /// The Stacks node API endpoint.
    ///
    /// Defaults to the public Hiro API of the selected network.
    #[arg(long, global = true, value_name = "URL")]
    pub node_url: Option<String>,

    /// Timeout in seconds for node requests.
    #[arg(long, global = true, value_name = "SECONDS")]
    pub request_timeout: Option<u64>,
}

impl figment::Provider for NetworkOpts {
    fn metadata(&self) -> Metadata {
        Metadata::named("NetworkOpts")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Ok(Map::from([(Config::selected_profile(), self.dict())]))
    }
}

impl NetworkOpts {
    pub fn dict(&self) -> Dict {
        let mut dict = Dict::new();
        if let Some(network) = self.network {
            dict.insert("network".into(), network.as_str().into());
        }
        if let Some(url) = &self.node_url {
            dict.insert("node_url".into(), url.clone().into());
        }
        if let Some(timeout) = self.request_timeout {
            dict.insert("request_timeout".into(), Value::from(timeout));
        }
        dict
    }
}
