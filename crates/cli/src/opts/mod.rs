mod app;
mod network;
mod wallet;

pub use app::*;
pub use network::*;
pub use wallet::*;
