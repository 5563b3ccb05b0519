use std::io::{self, Write};

use super::feed::fetcher::{fetch_feed, FetchError};
use super::feed::types::StatusEntry;
use super::fingerprint::Fingerprint;
use super::format::format_entry;
use super::storage::state_file::StateStore;

/// Result of one fetch-and-compare pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The feed parsed but listed no entries. Nothing was compared or written.
    NoData,
    /// The newest entry differs from the last one seen (or nothing was seen yet).
    New {
        entries: Vec<StatusEntry>,
        fingerprint: Fingerprint,
        saved: bool,
    },
    Unchanged {
        entries: Vec<StatusEntry>,
        fingerprint: Fingerprint,
    },
}

impl CheckOutcome {
    pub fn entries(&self) -> &[StatusEntry] {
        match self {
            CheckOutcome::NoData => &[],
            CheckOutcome::New { entries, .. } | CheckOutcome::Unchanged { entries, .. } => entries,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMonitor {
    client: reqwest::Client,
    feed_url: String,
    store: StateStore,
}

impl StatusMonitor {
    pub fn new(client: reqwest::Client, feed_url: impl Into<String>, store: StateStore) -> Self {
        Self {
            client,
            feed_url: feed_url.into(),
            store,
        }
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    pub async fn check(&self) -> Result<CheckOutcome, FetchError> {
        let feed = fetch_feed(&self.client, &self.feed_url).await?;
        let Some(newest) = feed.entries.first() else {
            tracing::info!(url = %self.feed_url, "feed has no entries");
            return Ok(CheckOutcome::NoData);
        };

        let fingerprint = Fingerprint::of(newest);
        let last_seen = self.store.load().await;
        if last_seen.as_ref() == Some(&fingerprint) {
            tracing::info!(%fingerprint, "no new status update");
            return Ok(CheckOutcome::Unchanged {
                entries: feed.entries,
                fingerprint,
            });
        }

        tracing::info!(
            %fingerprint,
            previous = ?last_seen.as_ref().map(Fingerprint::as_str),
            "new status update"
        );
        let saved = match self.store.save(&fingerprint).await {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(
                    path = %self.store.path().display(),
                    %error,
                    "could not persist last seen update"
                );
                false
            }
        };
        Ok(CheckOutcome::New {
            entries: feed.entries,
            fingerprint,
            saved,
        })
    }
}

pub fn report_outcome(out: &mut impl Write, outcome: &CheckOutcome) -> io::Result<()> {
    match outcome {
        CheckOutcome::NoData => writeln!(out, "ℹ️ No status data available."),
        CheckOutcome::New { entries, saved, .. } => {
            writeln!(out, "✅ New update detected!\n")?;
            if let Some(newest) = entries.first() {
                writeln!(out, "{}", format_entry(newest))?;
            }
            if !saved {
                writeln!(out, "⚠️ Warning: Could not save state.")?;
            }
            Ok(())
        }
        CheckOutcome::Unchanged { entries, .. } => {
            writeln!(out, "ℹ️ No new updates.\n")?;
            writeln!(out, "Last known update:\n")?;
            if let Some(newest) = entries.first() {
                writeln!(out, "{}", format_entry(newest))?;
            }
            Ok(())
        }
    }
}

pub fn report_fetch_failure(out: &mut impl Write, error: &FetchError) -> io::Result<()> {
    tracing::warn!(%error, "status feed fetch failed");
    writeln!(out, "❌ Failed to fetch status feed.")
}
