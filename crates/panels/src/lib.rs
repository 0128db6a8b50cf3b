//! # stxdesk
//!
//! Front-ends for the Blacklist Manager and Div-Manager contracts.
//!
//! Each app is a set of panels over one [`Session`]. Panels turn form fields into
//! [`ActionRequest`]s and run them through an [`ActionInvoker`], which talks to the wallet for
//! state-changing calls and to a node for read-only ones, and reports every outcome to a
//! [`Notifier`].
//!
//! Admin panels are hidden behind an [`AdminGate`]. Hiding them does not protect anything: the
//! contracts check the caller of every admin function themselves.

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate tracing;

pub mod blacklist;
pub mod dividends;
pub mod form;

mod cache;
pub use cache::Cached;

mod client;
pub use client::ContractClient;

mod gate;
pub use gate::AdminGate;

mod invoker;
pub use invoker::{ActionInvoker, ActionOutcome, ActionRequest, decode_bool, decode_uint};

mod notify;
pub use notify::{Level, Notification, NotificationLog, Notifier, ShellNotifier};

mod session;
pub use session::{ConnectionState, Session};
