use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

pub const DEFAULT_FEED_URL: &str = "https://status.openai.com/history.atom";
pub const DEFAULT_STATE_FILE: &str = "last_seen.txt";
pub const HOSTED_ENV: &str = "HOSTED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Poll forever on the configured interval.
    Hosted,
    /// Check once, then offer the menu.
    Interactive,
}

impl RunMode {
    /// Legacy switch: `HOSTED=true` (any case) selects hosted mode, anything
    /// else, including no value, interactive.
    pub fn from_hosted_flag(value: Option<&str>) -> Self {
        match value {
            Some(flag) if flag.trim().eq_ignore_ascii_case("true") => RunMode::Hosted,
            _ => RunMode::Interactive,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "statuswatch", version, about = "Report new entries on a status page history feed")]
pub struct Cli {
    /// Run mode; falls back to the HOSTED environment variable when omitted
    #[arg(long, value_enum)]
    pub mode: Option<RunMode>,

    #[arg(long, env = "STATUS_FEED_URL", default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    /// File holding the fingerprint of the last reported update
    #[arg(long, env = "STATUS_STATE_FILE", default_value = DEFAULT_STATE_FILE)]
    pub state_file: PathBuf,

    /// Seconds between checks in hosted mode
    #[arg(
        long,
        env = "STATUS_POLL_INTERVAL_SECS",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval_secs: u64,

    /// Banner printed at startup
    #[arg(long, env = "STATUS_MONITOR_NAME", default_value = "OpenAI Status Monitor")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub feed_url: String,
    pub state_file: PathBuf,
    pub mode: RunMode,
    pub poll_interval: Duration,
    pub monitor_name: String,
}

impl AppConfig {
    pub fn from_cli(cli: Cli, hosted_flag: Option<&str>) -> Self {
        Self {
            mode: cli
                .mode
                .unwrap_or_else(|| RunMode::from_hosted_flag(hosted_flag)),
            feed_url: cli.feed_url,
            state_file: cli.state_file,
            poll_interval: Duration::from_secs(cli.interval_secs),
            monitor_name: cli.name,
        }
    }

    /// Parses the process arguments after loading `.env.local` and `.env`.
    pub fn load() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::dotenv();
        let hosted_flag = std::env::var(HOSTED_ENV).ok();
        Self::from_cli(Cli::parse(), hosted_flag.as_deref())
    }
}
