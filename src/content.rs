//! Directory-backed content fragments.
//!
//! [`ContentStore`] serves the `content/{name}.html` fragments written by the
//! site build, the same way the generated application fetches them in a
//! browser. Paths are resolved relative to the output root and may not escape
//! it.

use crate::runtime::{ContentFetcher, FetchError};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

pub struct ContentStore {
    base_dir: PathBuf,
}

impl ContentStore {
    pub fn new<P: Into<PathBuf>>(base: P) -> Self {
        Self { base_dir: base.into() }
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Map a content path onto the store, rejecting anything but plain
    /// relative segments.
    fn map_path(&self, content_path: &str) -> Option<PathBuf> {
        let mut pb = self.base_dir.clone();
        for comp in Path::new(content_path.trim_start_matches('/')).components() {
            match comp {
                Component::Normal(s) => pb.push(s),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(pb)
    }

    /// Read a fragment.
    pub fn load(&self, content_path: &str) -> io::Result<String> {
        let path = self
            .map_path(content_path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "invalid path"))?;
        if !path.is_file() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        }
        fs::read_to_string(&path)
    }
}

impl ContentFetcher for ContentStore {
    fn fetch(&mut self, content_path: &str) -> Result<String, FetchError> {
        self.load(content_path).map_err(|e| {
            debug!(content_path = %content_path, error = %e, "Content fetch failed");
            match e.kind() {
                io::ErrorKind::NotFound => FetchError::not_found(content_path),
                io::ErrorKind::PermissionDenied => FetchError::new(403, e.to_string()),
                _ => FetchError::new(500, e.to_string()),
            }
        })
    }
}
