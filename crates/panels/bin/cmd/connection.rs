use super::{load_config, start_bridge, stop_bridge};
use crate::args::Stxdesk;
use eyre::Result;
use stxdesk::Session;
use stxdesk_common::sh_println;
use yansi::Paint;

/// Connects the browser wallet and prints the address.
pub async fn run(args: &Stxdesk) -> Result<()> {
    let config = load_config(args, None)?;
    let bridge = start_bridge(&config).await?;
    let session = Session::new();
    let connected = session.connect_with(&bridge).await.map_err(Into::into);
    let identity = stop_bridge(bridge, connected).await?;
    sh_println!("Connected: {}", identity.green())?;
    Ok(())
}
