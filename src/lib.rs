pub mod config;
pub mod core;

use std::future::Future;
use std::io::{self, Write};
use std::process::ExitCode;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, RunMode};
use crate::core::mode::hosted::run_hosted;
use crate::core::mode::input::{spawn_stdin_lines, LineSource};
use crate::core::mode::interactive::{run_interactive, SessionExit};
use crate::core::monitor::StatusMonitor;
use crate::core::storage::state_file::StateStore;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "cannot listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }
}

/// Prints the banner and runs the configured mode. `open_input` is only called
/// in interactive mode; `shutdown` only matters in hosted mode.
pub async fn run_with_config<W, I, F>(
    config: AppConfig,
    out: &mut W,
    open_input: impl FnOnce() -> io::Result<I>,
    shutdown: F,
) -> io::Result<SessionExit>
where
    W: Write,
    I: LineSource,
    F: Future<Output = ()>,
{
    let client = reqwest::Client::builder()
        .build()
        .map_err(|error| io::Error::other(error.to_string()))?;
    let monitor = StatusMonitor::new(
        client,
        config.feed_url.clone(),
        StateStore::new(config.state_file.clone()),
    );
    tracing::debug!(?config, "starting status monitor");

    writeln!(out, "🔍 {}\n", config.monitor_name)?;
    match config.mode {
        RunMode::Hosted => {
            run_hosted(&monitor, config.poll_interval, out, shutdown).await?;
            Ok(SessionExit::Success)
        }
        RunMode::Interactive => run_interactive(&monitor, open_input()?, out).await,
    }
}

pub fn run() -> ExitCode {
    let config = AppConfig::load();
    init_tracing();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::error!(%error, "failed to start runtime");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout();
    let session = run_with_config(config, &mut stdout, spawn_stdin_lines, shutdown_signal());
    match runtime.block_on(session) {
        Ok(exit) => exit.into(),
        Err(error) => {
            tracing::error!(%error, "console io failed");
            ExitCode::FAILURE
        }
    }
}
