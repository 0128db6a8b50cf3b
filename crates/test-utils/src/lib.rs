//! # stxdesk-test-utils
//!
//! Stand-ins for the wallet and the node, for driving panels in tests.

#![warn(unused_crate_dependencies, unreachable_pub)]
#![allow(clippy::disallowed_macros)]

#[macro_use]
extern crate tracing;

mod gate;
pub use gate::Gate;

mod node;
pub use node::StubNode;

mod wallet;
pub use wallet::StubWallet;

/// Contract principals that decode as valid c32check addresses.
pub mod addresses {
    /// Deployer of the test contracts.
    pub const DEPLOYER: &str = "SP000000000000000000002Q6VF78";
    /// An address to restrict.
    pub const TARGET: &str = "SP3FBR2AGK5H9QBDH3EEN6DF8EK8JY7RX8QJ5SVTE";
    /// A recipient of funds.
    pub const RECIPIENT: &str = "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7";
    /// The test contract id.
    pub const CONTRACT: &str = "SP000000000000000000002Q6VF78.stx-manager";
}

/// Initializes tracing for tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
