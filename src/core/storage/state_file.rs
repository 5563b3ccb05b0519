use std::path::{Path, PathBuf};

use crate::core::fingerprint::Fingerprint;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("state file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Last-seen fingerprint kept as the bare digest in a single plain-text file.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing, empty or unreadable file all mean "nothing seen yet".
    pub async fn load(&self) -> Option<Fingerprint> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(error) => {
                if error.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!(path = %self.path.display(), %error, "state file unreadable");
                }
                return None;
            }
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Fingerprint::from_persisted(trimmed.to_string()))
    }

    /// Writes a sibling temp file and renames it over the state file, so the
    /// state file only ever holds a complete digest.
    pub async fn save(&self, fingerprint: &Fingerprint) -> Result<(), StorageError> {
        let staging = self.staging_path();
        if let Err(error) = tokio::fs::write(&staging, fingerprint.as_str()).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(error.into());
        }
        if let Err(error) = tokio::fs::rename(&staging, &self.path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(error.into());
        }
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
