use chrono::{DateTime, SecondsFormat, Utc};
use feed_rs::model::Entry;
use serde::Deserialize;

use super::types::{FeedFormat, StatusEntry, StatusFeed};

// Atom root, RSS 2.0 channel, RSS 1.0 rdf:RDF.
const FEED_CONTAINERS: [&str; 3] = ["feed", "channel", "RDF"];
// Atom first, then RSS `pubDate` and Dublin Core `dc:date`.
const TIMESTAMP_TAGS: [&str; 4] = ["updated", "published", "pubDate", "date"];

#[derive(Debug, thiserror::Error)]
pub enum FeedParseError {
    #[error("feed payload is empty")]
    EmptyPayload,
    #[error("xml feed parse error: {0}")]
    Xml(#[from] feed_rs::parser::ParseFeedError),
    #[error("json feed parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct JsonFeed {
    title: Option<String>,
    #[serde(default)]
    items: Vec<JsonFeedItem>,
}

#[derive(Debug, Clone, Deserialize)]
struct JsonFeedItem {
    title: Option<String>,
    summary: Option<String>,
    content_html: Option<String>,
    content_text: Option<String>,
    date_modified: Option<String>,
    date_published: Option<String>,
}

pub fn parse_feed_bytes(raw: &[u8]) -> Result<StatusFeed, FeedParseError> {
    let trimmed = raw.trim_ascii_start();
    if trimmed.is_empty() {
        return Err(FeedParseError::EmptyPayload);
    }
    if trimmed[0] == b'{' {
        return parse_json_feed(trimmed);
    }
    parse_xml_feed(trimmed)
}

/// Fallback rendering when the document's own timestamp text is unavailable:
/// UTC, `Z` suffix, fractional seconds only when present.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_xml_feed(raw: &[u8]) -> Result<StatusFeed, FeedParseError> {
    let feed = feed_rs::parser::parse(raw)?;
    let title = feed
        .title
        .as_ref()
        .and_then(|text| non_blank(&text.content));

    let mut raw_timestamps = raw_entry_timestamps(raw);
    if raw_timestamps.len() != feed.entries.len() {
        tracing::debug!(
            found = raw_timestamps.len(),
            entries = feed.entries.len(),
            "raw entry timestamps unavailable, using parsed values"
        );
        raw_timestamps = vec![None; feed.entries.len()];
    }
    let entries = feed
        .entries
        .iter()
        .zip(raw_timestamps)
        .map(|(entry, raw_updated)| entry_from_xml(entry, raw_updated))
        .collect();

    Ok(StatusFeed {
        format: FeedFormat::XmlFeed,
        title,
        entries,
    })
}

/// Entry timestamps spelled exactly as the document writes them, one slot per
/// Atom `entry` / RSS `item` in document order. Empty when the payload is not
/// UTF-8 or roxmltree refuses it (a DTD, for instance).
fn raw_entry_timestamps(raw: &[u8]) -> Vec<Option<String>> {
    let Ok(text) = std::str::from_utf8(raw) else {
        return Vec::new();
    };
    let Ok(doc) = roxmltree::Document::parse(text) else {
        return Vec::new();
    };

    doc.descendants()
        .filter(|node| {
            node.is_element()
                && matches!(node.tag_name().name(), "entry" | "item")
                && node
                    .parent_element()
                    .is_some_and(|parent| FEED_CONTAINERS.contains(&parent.tag_name().name()))
        })
        .map(|node| {
            TIMESTAMP_TAGS.iter().find_map(|tag| {
                node.children()
                    .find(|child| child.is_element() && child.tag_name().name() == *tag)
                    .and_then(|child| child.text())
                    .map(str::trim)
                    .and_then(non_blank)
            })
        })
        .collect()
}

fn parse_json_feed(raw: &[u8]) -> Result<StatusFeed, FeedParseError> {
    let feed: JsonFeed = serde_json::from_slice(raw)?;
    let entries = feed
        .items
        .into_iter()
        .map(|item| StatusEntry {
            title: item.title.as_deref().and_then(non_blank),
            updated: item
                .date_modified
                .or(item.date_published)
                .as_deref()
                .and_then(non_blank),
            summary: item
                .summary
                .or(item.content_html)
                .or(item.content_text)
                .as_deref()
                .and_then(non_blank),
        })
        .collect();

    Ok(StatusFeed {
        format: FeedFormat::JsonFeed,
        title: feed.title.as_deref().and_then(non_blank),
        entries,
    })
}

fn entry_from_xml(entry: &Entry, raw_updated: Option<String>) -> StatusEntry {
    let title = entry
        .title
        .as_ref()
        .and_then(|text| non_blank(&text.content));
    let summary = entry
        .summary
        .as_ref()
        .and_then(|text| non_blank(&text.content))
        .or_else(|| {
            entry
                .content
                .as_ref()
                .and_then(|content| content.body.as_deref())
                .and_then(non_blank)
        });
    let updated = raw_updated.or_else(|| {
        entry
            .updated
            .or(entry.published)
            .map(|timestamp| format_timestamp(&timestamp))
    });

    StatusEntry {
        title,
        updated,
        summary,
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
