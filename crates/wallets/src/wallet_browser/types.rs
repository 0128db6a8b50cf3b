use serde::{Deserialize, Serialize};
use stxdesk_common::{ClarityValue, ContractCallRequest, Network};
use uuid::Uuid;

/// The wallet that is currently connected to the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// The account address reported by the wallet.
    pub address: String,
    pub network: Network,
}

impl Connection {
    pub fn new(address: impl Into<String>, network: Network) -> Self {
        Self { address: address.into(), network }
    }
}

/// A contract call waiting for the user's approval, in the shape the wallet's
/// contract-call dialog expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserContractCall {
    pub id: Uuid,
    pub contract_address: String,
    pub contract_name: String,
    pub function_name: String,
    /// Hex-encoded consensus serialization of each argument.
    pub function_args: Vec<String>,
    /// Clarity literal of each argument, for display.
    pub function_args_repr: Vec<String>,
    pub network: Network,
}

impl From<&ContractCallRequest> for BrowserContractCall {
    fn from(request: &ContractCallRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            contract_address: request.contract.address.to_string(),
            contract_name: request.contract.name.clone(),
            function_name: request.function.clone(),
            function_args: request.args.iter().map(ClarityValue::to_hex).collect(),
            function_args_repr: request.args.iter().map(ToString::to_string).collect(),
            network: request.network,
        }
    }
}

/// The wallet's answer to a [`BrowserContractCall`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCallResponse {
    pub id: Uuid,
    pub txid: Option<String>,
    pub error: Option<String>,
}

/// Envelope of every `/api` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BrowserApiResponse<T = ()> {
    Ok { data: T },
    Error { message: String },
}

impl<T> BrowserApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::Ok { data }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }
}
