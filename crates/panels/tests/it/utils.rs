//! Panels wired to stub executors.

use std::sync::Arc;
use stxdesk::{ContractClient, NotificationLog};
use stxdesk_common::{ClarityValue, Network};
use stxdesk_test_utils::{StubNode, StubWallet, addresses::CONTRACT, init_tracing};

pub struct Harness {
    pub wallet: Arc<StubWallet>,
    pub node: Arc<StubNode>,
    pub log: NotificationLog,
}

impl Harness {
    /// Stubs whose wallet connects as `identity`.
    pub fn new(identity: &str) -> Self {
        init_tracing();
        Self {
            wallet: Arc::new(StubWallet::new(identity)),
            node: Arc::new(StubNode::new()),
            log: NotificationLog::new(),
        }
    }

    pub fn client(&self) -> Arc<ContractClient> {
        Arc::new(ContractClient::new(
            CONTRACT.parse().unwrap(),
            Network::Mainnet,
            self.wallet.clone(),
            self.node.clone(),
            Arc::new(self.log.clone()),
        ))
    }
}

pub fn principal(address: &str) -> ClarityValue {
    ClarityValue::parse_principal(address).unwrap()
}
