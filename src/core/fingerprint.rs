use std::fmt;

use sha2::{Digest, Sha256};

use super::feed::types::StatusEntry;

/// Hex sha256 of an entry's title followed by its update timestamp.
///
/// Only used to tell whether the newest entry changed between runs. The summary
/// is not part of the input, so an entry edited in place without a new timestamp
/// keeps its fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(entry: &StatusEntry) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(entry.title.as_deref().unwrap_or_default().as_bytes());
        hasher.update(entry.updated.as_deref().unwrap_or_default().as_bytes());
        let bytes = hasher.finalize();
        Self(format!("{bytes:x}"))
    }

    /// Rehydrates a value previously written by the state store.
    pub(crate) fn from_persisted(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, updated: &str, summary: Option<&str>) -> StatusEntry {
        StatusEntry {
            title: Some(title.to_string()),
            updated: Some(updated.to_string()),
            summary: summary.map(ToString::to_string),
        }
    }

    #[test]
    fn matches_sha256_of_title_and_updated() {
        let fingerprint = Fingerprint::of(&entry(
            "API",
            "2024-01-01T00:00:00Z",
            Some("<p>Operational</p>"),
        ));
        assert_eq!(
            fingerprint.as_str(),
            "a6a15e0387d7386c361a54ec63cd0200b52b4ec6665af1b4dbf55d469bc13f81"
        );
    }

    #[test]
    fn summary_does_not_affect_identity() {
        let before = Fingerprint::of(&entry("API", "2024-01-01T00:00:00Z", Some("Investigating")));
        let after = Fingerprint::of(&entry("API", "2024-01-01T00:00:00Z", Some("Resolved")));
        let missing = Fingerprint::of(&entry("API", "2024-01-01T00:00:00Z", None));
        assert_eq!(before, after);
        assert_eq!(before, missing);
    }

    #[test]
    fn new_timestamp_changes_identity() {
        let first = Fingerprint::of(&entry("API", "2024-01-01T00:00:00Z", None));
        let second = Fingerprint::of(&entry("API", "2024-01-01T01:30:00Z", None));
        assert_ne!(first, second);
        assert_eq!(
            second.to_string(),
            "10a4207053dc849752f8663a95a5a528d96471bf596ee07204cbec6f8f0c1652"
        );
    }

    #[test]
    fn absent_fields_hash_as_empty_strings() {
        let fingerprint = Fingerprint::of(&StatusEntry::default());
        assert_eq!(
            fingerprint.as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
