use std::panic;

use anyhow::Result;
use runpad_term::application::cli;
use runpad_term::destruct_terminal_for_panic;
use runpad_term::start_loop;

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}

fn setup_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("runpad");
    std::fs::create_dir_all(&log_dir)?;

    // The alternate screen owns the terminal, so logs go to a file.
    let file_appender = tracing_appender::rolling::never(log_dir, "runpad.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .json()
        .with_writer(writer)
        .with_max_level(tracing::Level::DEBUG)
        .init();

    return Ok(guard);
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_panic_hook();

    if !cli::parse().await? {
        return Ok(());
    }

    let _guard = setup_logging()?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting runpad");

    start_loop().await?;

    return Ok(());
}
