//! # stxdesk-wallets
//!
//! The wallet side of stxdesk: a local bridge that lets a browser wallet extension connect
//! and approve contract calls on behalf of the terminal.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate tracing;

pub mod wallet_browser;

pub use wallet_browser::{
    error::BrowserWalletError,
    server::BrowserWalletServer,
    types::{BrowserContractCall, Connection},
};
