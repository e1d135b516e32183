//! HTTP(S) site fetcher
//!
//! Every request asks intermediaries not to serve or keep a cached copy.

use crate::SiteError;
use async_trait::async_trait;
use docgate_core::{FetchError, FetchResponse, ResourceFetcher};
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::{Client, Url};
use std::time::Duration;

/// Fetches resources relative to a base URL
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base: Url,
}

impl HttpFetcher {
    /// Fetcher for a site root such as `https://example.org/library/`
    pub fn new(base: &str) -> Result<Self, SiteError> {
        Self::with_timeout(base, None)
    }

    /// Fetcher with a whole-request timeout
    pub fn with_timeout(base: &str, timeout: Option<Duration>) -> Result<Self, SiteError> {
        let mut base = Url::parse(base).map_err(|e| SiteError::InvalidUrl {
            url: base.to_string(),
            message: e.to_string(),
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(SiteError::UnsupportedScheme(base.scheme().to_string()));
        }
        // Url::join drops the last segment unless the base ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SiteError::Client(e.to_string()))?;

        Ok(Self { client, base })
    }

    /// Site root
    #[inline]
    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Absolute URL of a site-relative path
    pub fn resolve(&self, path: &str) -> Result<Url, FetchError> {
        self.base
            .join(path)
            .map_err(|e| FetchError::InvalidPath(format!("{path}: {e}")))
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, FetchError> {
        let url = self.resolve(path)?;
        tracing::debug!("GET {}", url);

        let transport = |e: reqwest::Error| FetchError::Transport {
            path: path.to_string(),
            message: e.to_string(),
        };

        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport)?;

        Ok(FetchResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_gains_trailing_slash() {
        let fetcher = HttpFetcher::new("https://example.org/library").unwrap();
        assert_eq!(fetcher.base().as_str(), "https://example.org/library/");
        assert_eq!(
            fetcher.resolve("docs/a.html").unwrap().as_str(),
            "https://example.org/library/docs/a.html"
        );
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        assert!(matches!(
            HttpFetcher::new("ftp://example.org/"),
            Err(SiteError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn garbage_url_is_rejected() {
        assert!(matches!(
            HttpFetcher::new("http://"),
            Err(SiteError::InvalidUrl { .. })
        ));
    }
}
