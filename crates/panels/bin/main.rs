#[macro_use]
extern crate tracing;

use clap::Parser;
use eyre::Result;
use std::process::ExitCode;
use stxdesk_cli::{handler, utils};

mod args;
mod cmd;

use args::{Stxdesk, StxdeskSubcommand};
use cmd::ActionFailed;

fn main() -> Result<ExitCode> {
    handler::install();
    utils::load_dotenv();
    utils::subscriber();
    utils::enable_paint();
    let args = Stxdesk::parse();
    match run(args) {
        Err(err) if err.is::<ActionFailed>() => Ok(ExitCode::FAILURE),
        result => result.map(|()| ExitCode::SUCCESS),
    }
}

#[tokio::main]
async fn run(args: Stxdesk) -> Result<()> {
    debug!(cmd = ?args.cmd, "running");
    match &args.cmd {
        StxdeskSubcommand::Blacklist(cmd) => cmd::blacklist::run(&args, cmd).await,
        StxdeskSubcommand::Dividends(cmd) => cmd::dividends::run(&args, cmd).await,
        StxdeskSubcommand::Connection => cmd::connection::run(&args).await,
    }
}
