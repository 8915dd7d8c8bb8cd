use std::fmt;

/// Source of rendered content fragments, addressed by a route's content path.
pub trait ContentFetcher {
    fn fetch(&mut self, content_path: &str) -> Result<String, FetchError>;
}

/// A failed fragment fetch, carrying an HTTP-style status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub status: u16,
    pub message: String,
}

impl FetchError {
    #[must_use]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(content_path: &str) -> Self {
        Self::new(404, format!("{content_path} not found"))
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fetch failed with status {}: {}", self.status, self.message)
    }
}

impl std::error::Error for FetchError {}

/// Fetcher for hosts that complete fetches themselves through
/// [`super::Router::complete_fetch`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFetch;

impl ContentFetcher for NoFetch {
    fn fetch(&mut self, content_path: &str) -> Result<String, FetchError> {
        Err(FetchError::new(501, format!("no fetcher configured for {content_path}")))
    }
}
