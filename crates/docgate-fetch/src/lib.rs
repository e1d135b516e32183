//! docgate Fetch - concrete resource fetchers
//!
//! - [`HttpFetcher`]: a site published over HTTP(S), via `reqwest`
//! - [`DirFetcher`]: a site on local disk, via `tokio::fs`
//! - [`SiteFetcher`]: picks one of the two from a location string

#![warn(unreachable_pub)]

pub mod dir;
pub mod http;

pub use dir::DirFetcher;
pub use http::HttpFetcher;

use async_trait::async_trait;
use docgate_core::{FetchError, FetchResponse, ResourceFetcher};
use std::path::PathBuf;
use std::time::Duration;

/// Site construction errors
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Location looks like a URL but does not parse
    #[error("invalid site url {url}: {message}")]
    InvalidUrl {
        /// Offending location
        url: String,
        /// Parser message
        message: String,
    },

    /// URL scheme other than http/https
    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),

    /// HTTP client could not be built
    #[error("failed to build http client: {0}")]
    Client(String),

    /// Local site root is missing or not a directory
    #[error("site root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Either kind of site
#[derive(Debug, Clone)]
pub enum SiteFetcher {
    /// Remote site
    Http(HttpFetcher),
    /// Local directory
    Dir(DirFetcher),
}

impl SiteFetcher {
    /// Open a site from a URL (`http://`, `https://`) or a directory path
    pub fn open(location: &str, timeout: Option<Duration>) -> Result<Self, SiteError> {
        if is_url(location) {
            HttpFetcher::with_timeout(location, timeout).map(Self::Http)
        } else {
            DirFetcher::new(location).map(Self::Dir)
        }
    }

    /// Human-readable site location
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Http(fetcher) => fetcher.base().to_string(),
            Self::Dir(fetcher) => fetcher.root().display().to_string(),
        }
    }
}

#[async_trait]
impl ResourceFetcher for SiteFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, FetchError> {
        match self {
            Self::Http(fetcher) => fetcher.fetch(path).await,
            Self::Dir(fetcher) => fetcher.fetch(path).await,
        }
    }
}

fn is_url(location: &str) -> bool {
    location.contains("://")
}
