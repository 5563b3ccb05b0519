#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    XmlFeed,
    JsonFeed,
}

/// One status-history record. Fields the feed leaves out (or leaves blank) are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusEntry {
    pub title: Option<String>,
    /// Timestamp text as the feed spells it, used verbatim for the fingerprint.
    pub updated: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusFeed {
    pub format: FeedFormat,
    pub title: Option<String>,
    /// Newest first, in the order the feed lists them.
    pub entries: Vec<StatusEntry>,
}
