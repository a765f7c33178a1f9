use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config;
use crate::error::Result;

/// Set up file-based logging under the data directory. Call once from the
/// hosting application before using the rest of the crate.
pub fn init() -> Result<()> {
    let data_dir = config::data_dir()?;
    std::fs::create_dir_all(&data_dir)?;

    let file_appender = tracing_appender::rolling::daily(&data_dir, "serilist.log");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("serilist=info".parse().unwrap()))
        .with(fmt::layer().with_writer(file_appender).with_ansi(false))
        .init();

    Ok(())
}
