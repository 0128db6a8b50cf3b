//! Process setup shared by the stxdesk binaries.

use std::{io::IsTerminal, path::Path};
use tracing_subscriber::{EnvFilter, filter::LevelFilter, prelude::*};

/// Initializes a tracing Subscriber for logging.
///
/// Logs go to stderr and are filtered by `RUST_LOG`; nothing is logged when it is unset.
pub fn subscriber() {
    let registry = tracing_subscriber::registry().with(env_filter());
    registry.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)).init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::builder().with_default_directive(LevelFilter::OFF.into()).from_env_lossy()
}

/// Loads a `.env` file from the current directory, if any.
///
/// Variables that are already set take precedence.
pub fn load_dotenv() {
    let load = |p: &Path| {
        if let Err(err) = dotenvy::from_path(p.join(".env"))
            && !err.not_found()
        {
            warn!(%err, "failed to load .env");
        }
    };
    if let Ok(cwd) = std::env::current_dir() {
        load(&cwd);
    }
}

/// Disables terminal colors when stdout is not a terminal or `NO_COLOR` is set.
pub fn enable_paint() {
    let enable = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    if enable {
        yansi::enable();
    } else {
        yansi::disable();
    }
}
