//! Fetchers resolve the relative data paths requested at runtime

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::FetchError;

/// Source of the data files requested by the content loader
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the text behind a relative path such as `./data/x.jsonl`
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;
}

/// Fetches files from a directory, usually the build output
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Map a relative request path onto the root, refusing to leave it
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(resolved)
    }
}

#[async_trait]
impl Fetcher for FsFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let file = self
            .resolve(path)
            .ok_or_else(|| FetchError::NotFound(path.to_string()))?;

        tracing::debug!("Fetching {:?}", file);
        match tokio::fs::read_to_string(&file).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FetchError::NotFound(path.to_string()))
            }
            Err(e) => Err(FetchError::Io(path.to_string(), e)),
        }
    }
}

/// In-memory fetcher that counts the requests it serves
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    files: HashMap<String, String>,
    requests: AtomicUsize,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(path.into(), text.into());
        self
    }

    /// Number of `fetch_text` calls so far, failed ones included
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for MemoryFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(path.to_string()))
    }
}
