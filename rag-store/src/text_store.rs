//! The corpus: one UTF-8 text file, replaced wholesale on every write.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use crate::errors::RagError;

/// File-backed store for the single corpus document.
#[derive(Clone, Debug)]
pub struct TextStore {
    path: PathBuf,
}

impl TextStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored text. A missing file (and its parent directory) is
    /// created empty first.
    pub async fn read(&self) -> Result<String, RagError> {
        if !fs::try_exists(&self.path)
            .await
            .map_err(|e| RagError::io(&self.path, e))?
        {
            warn!(path = %self.path.display(), "text store not found, creating an empty file");
            self.ensure_parent().await?;
            fs::write(&self.path, "")
                .await
                .map_err(|e| RagError::io(&self.path, e))?;
        }

        let text = fs::read_to_string(&self.path)
            .await
            .map_err(|e| RagError::io(&self.path, e))?;
        debug!(path = %self.path.display(), bytes = text.len(), "text store read");
        Ok(text)
    }

    /// Replaces the stored text with `content`.
    ///
    /// The content goes to a sibling temp file which is then renamed over the
    /// store, so readers see either the old or the new text in full.
    pub async fn write(&self, content: &str) -> Result<(), RagError> {
        self.ensure_parent().await?;
        let tmp = self.tmp_path();
        fs::write(&tmp, content)
            .await
            .map_err(|e| RagError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| RagError::io(&self.path, e))?;
        debug!(path = %self.path.display(), bytes = content.len(), "text store replaced");
        Ok(())
    }

    async fn ensure_parent(&self) -> Result<(), RagError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
                .await
                .map_err(|e| RagError::io(dir, e)),
            _ => Ok(()),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_read_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = TextStore::new(dir.path().join("data").join("base.txt"));

        assert_eq!(store.read().await.unwrap(), "");
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn write_replaces_content_entirely() {
        let dir = tempfile::tempdir().unwrap();
        let store = TextStore::new(dir.path().join("base.txt"));

        store.write("a much longer first version").await.unwrap();
        store.write("short").await.unwrap();

        assert_eq!(store.read().await.unwrap(), "short");
        assert!(!store.tmp_path().exists());
    }

    #[tokio::test]
    async fn unicode_round_trips_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let store = TextStore::new(dir.path().join("base.txt"));
        let text = "Piyush ♟ likes chess.\n";

        store.write(text).await.unwrap();
        assert_eq!(store.read().await.unwrap(), text);
    }
}
