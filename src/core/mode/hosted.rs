use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

use super::run_cycle;
use crate::core::monitor::StatusMonitor;

/// Checks the feed, reports, sleeps `interval`, forever. Only `shutdown`
/// completing ends the loop, including in the middle of a check.
pub async fn run_hosted<W, F>(
    monitor: &StatusMonitor,
    interval: Duration,
    out: &mut W,
    shutdown: F,
) -> io::Result<()>
where
    W: Write,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    tracing::info!(
        url = monitor.feed_url(),
        interval_secs = interval.as_secs(),
        "hosted monitoring started"
    );

    loop {
        let cycle = async {
            run_cycle(monitor, &mut *out).await?;
            tokio::time::sleep(interval).await;
            Ok::<_, io::Error>(())
        };
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("shutdown requested, hosted monitoring stopped");
                return Ok(());
            }
            result = cycle => result?,
        }
    }
}
