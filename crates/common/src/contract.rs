//! Contract coordinates and network selection.

use crate::c32::{C32Error, StandardPrincipal};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Maximum length of a contract name.
pub const MAX_CONTRACT_NAME_LEN: usize = 128;

/// The Stacks network the target contract is deployed on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Stacks mainnet.
    #[default]
    Mainnet,
    /// Stacks testnet.
    Testnet,
}

impl Network {
    /// Returns the default public API endpoint for this network.
    pub const fn default_node_url(self) -> &'static str {
        match self {
            Self::Mainnet => "https://api.mainnet.hiro.so",
            Self::Testnet => "https://api.testnet.hiro.so",
        }
    }

    /// Returns the network name as used by wallets.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            _ => Err(format!("unknown network `{s}`, expected `mainnet` or `testnet`")),
        }
    }
}

/// Errors produced while parsing a [`ContractId`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContractIdError {
    /// The id has no `.name` part.
    #[error("contract id must be `<address>.<name>`, got `{0}`")]
    MissingName(String),
    /// The deployer address is malformed.
    #[error("invalid contract address: {0}")]
    Address(#[from] C32Error),
    /// The name is not a valid contract name.
    #[error("invalid contract name `{0}`")]
    InvalidName(String),
}

/// A deployed contract: the deployer's address and the contract name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContractId {
    /// The deployer address.
    pub address: StandardPrincipal,
    /// The contract name.
    pub name: String,
}

impl ContractId {
    /// Creates a contract id, validating the name.
    pub fn new(
        address: StandardPrincipal,
        name: impl Into<String>,
    ) -> Result<Self, ContractIdError> {
        let name = name.into();
        if !is_valid_contract_name(&name) {
            return Err(ContractIdError::InvalidName(name));
        }
        Ok(Self { address, name })
    }
}

fn is_valid_contract_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else { return false };
    name.len() <= MAX_CONTRACT_NAME_LEN
        && first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl FromStr for ContractId {
    type Err = ContractIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (address, name) =
            s.trim().split_once('.').ok_or_else(|| ContractIdError::MissingName(s.to_string()))?;
        Self::new(address.parse()?, name)
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.address, self.name)
    }
}

impl Serialize for ContractId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContractId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_contract_ids() {
        let id: ContractId = "SP000000000000000000002Q6VF78.div-manager".parse().unwrap();
        assert_eq!(id.name, "div-manager");
        assert_eq!(id.to_string(), "SP000000000000000000002Q6VF78.div-manager");
    }

    #[test]
    fn rejects_bad_contract_ids() {
        assert!(matches!(
            "SP000000000000000000002Q6VF78".parse::<ContractId>(),
            Err(ContractIdError::MissingName(_))
        ));
        assert!(matches!(
            "SP000000000000000000002Q6VF78.1abc".parse::<ContractId>(),
            Err(ContractIdError::InvalidName(_))
        ));
        assert!(matches!(
            "SP000000000000000000002Q6VF78.".parse::<ContractId>(),
            Err(ContractIdError::InvalidName(_))
        ));
        assert!(matches!("nope.blacklist".parse::<ContractId>(), Err(ContractIdError::Address(_))));
    }

    #[test]
    fn network_parsing() {
        assert_eq!("Mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        let testnet = "testnet".parse::<Network>().unwrap();
        assert_eq!(testnet.default_node_url(), "https://api.testnet.hiro.so");
        assert!("devnet".parse::<Network>().is_err());
    }
}
