use std::sync::LazyLock;

use chrono::{Local, NaiveDateTime};
use regex::Regex;

use super::feed::types::StatusEntry;

pub const UNKNOWN_PRODUCT: &str = "Unknown Product";
pub const NO_STATUS_MESSAGE: &str = "No status message provided.";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Best-effort only: entities and broken markup pass through.
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("tag pattern is valid"));

/// Strips tags and collapses whitespace, falling back to the default message
/// when nothing readable is left.
pub fn clean_summary(summary: Option<&str>) -> String {
    let Some(raw) = summary else {
        return NO_STATUS_MESSAGE.to_string();
    };
    let stripped = TAG.replace_all(raw, "");
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        NO_STATUS_MESSAGE.to_string()
    } else {
        collapsed
    }
}

/// Status block stamped with `now`, the moment of reporting rather than the
/// entry's own timestamp.
pub fn format_entry_at(entry: &StatusEntry, now: NaiveDateTime) -> String {
    let title = entry.title.as_deref().unwrap_or(UNKNOWN_PRODUCT);
    format!(
        "[{}]\nProduct: {}\nStatus: {}\n",
        now.format(TIMESTAMP_FORMAT),
        title,
        clean_summary(entry.summary.as_deref())
    )
}

pub fn format_entry(entry: &StatusEntry) -> String {
    format_entry_at(entry, Local::now().naive_local())
}
