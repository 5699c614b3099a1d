// src/snapshot.rs
// =============================================================================
// Hooks that run for every internal HTML page the crawler downloads.
//
// The crawler calls PageHook::capture once per qualifying page, right after
// its GET succeeds. By default nothing happens (NoopHook). With
// --screenshots DIR the SnapshotWriter saves each page's HTML into DIR so
// it can be looked at after the run.
//
// Hooks handle their own failures. A snapshot that can't be written is
// logged and the crawl carries on.
// =============================================================================

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[async_trait]
pub trait PageHook: Send + Sync {
    async fn capture(&self, url: &str, html: &str);
}

/// Does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHook;

#[async_trait]
impl PageHook for NoopHook {
    async fn capture(&self, _url: &str, _html: &str) {}
}

/// Saves every crawled page to `<dir>/<percent-encoded url>.html`
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    dir: PathBuf,
}

impl SnapshotWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File the snapshot of `url` is written to
    pub fn path_for(&self, url: &str) -> PathBuf {
        let name = utf8_percent_encode(url, NON_ALPHANUMERIC).to_string();
        self.dir.join(format!("{}.html", name))
    }

    async fn write(&self, url: &str, html: &str) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(url);
        tokio::fs::write(&path, html).await?;
        Ok(path)
    }
}

#[async_trait]
impl PageHook for SnapshotWriter {
    async fn capture(&self, url: &str, html: &str) {
        match self.write(url, html).await {
            Ok(path) => debug!(url, path = %path.display(), "Saved page snapshot"),
            Err(e) => warn!(url, error = %e, "Failed to save page snapshot"),
        }
    }
}
