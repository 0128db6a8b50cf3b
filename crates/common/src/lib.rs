//! Common types and codecs for stxdesk: contract coordinates, the Clarity value and c32
//! address codecs, and the executors that talk to the chain.

#![warn(missing_docs, unused_crate_dependencies)]

#[macro_use]
extern crate tracing;

pub mod c32;
pub mod clarity;
pub mod contract;
pub mod errors;
pub mod executor;
pub mod io;
pub mod provider;

pub use c32::StandardPrincipal;
pub use clarity::ClarityValue;
pub use contract::{ContractId, Network};
pub use executor::*;
pub use provider::NodeClient;

use std::time::Duration;

/// Default timeout for requests to a Stacks node.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
