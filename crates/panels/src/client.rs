use crate::notify::{Notification, Notifier};
use std::{fmt, sync::Arc};
use stxdesk_common::{ContractCallExecutor, ContractId, Network, ReadOnlyExecutor};

/// Everything a panel needs to reach its contract: fixed coordinates, the two executors and
/// where to report outcomes.
#[derive(Clone)]
pub struct ContractClient {
    contract: ContractId,
    network: Network,
    wallet: Arc<dyn ContractCallExecutor>,
    node: Arc<dyn ReadOnlyExecutor>,
    notifier: Arc<dyn Notifier>,
}

impl ContractClient {
    pub fn new(
        contract: ContractId,
        network: Network,
        wallet: Arc<dyn ContractCallExecutor>,
        node: Arc<dyn ReadOnlyExecutor>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self { contract, network, wallet, node, notifier }
    }

    pub fn contract(&self) -> &ContractId {
        &self.contract
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub(crate) fn wallet(&self) -> &dyn ContractCallExecutor {
        &*self.wallet
    }

    pub(crate) fn node(&self) -> &dyn ReadOnlyExecutor {
        &*self.node
    }

    pub(crate) fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }
}

impl fmt::Debug for ContractClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractClient")
            .field("contract", &self.contract)
            .field("network", &self.network)
            .finish_non_exhaustive()
    }
}
