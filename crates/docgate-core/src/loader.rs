//! Resource fetching seam and startup data loading
//!
//! The viewer never touches the network or filesystem directly; everything
//! goes through a [`ResourceFetcher`]. Implementations must bypass any
//! caching layer they control, since the allow-list and catalog may be
//! edited while the site is live.

use crate::config::ViewerConfig;
use crate::error::{FetchError, LoadError};
use crate::types::{AllowList, CatalogEntry};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// A fetched resource: status plus raw body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP-style status code
    pub status: u16,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// 200 response with body
    #[inline]
    #[must_use]
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Empty response with status
    #[inline]
    #[must_use]
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }

    /// 2xx status
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text; invalid UTF-8 sequences become U+FFFD
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Source of site resources (allow-list, catalog, documents)
///
/// `path` is relative to the site root, e.g. `docs/a.html`.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch one resource, uncached
    ///
    /// A non-success status is a normal response, not an error; errors are
    /// reserved for failing to get any response at all.
    async fn fetch(&self, path: &str) -> Result<FetchResponse, FetchError>;
}

#[async_trait]
impl<T: ResourceFetcher + ?Sized> ResourceFetcher for Arc<T> {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, FetchError> {
        (**self).fetch(path).await
    }
}

#[async_trait]
impl<T: ResourceFetcher + ?Sized> ResourceFetcher for Box<T> {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, FetchError> {
        (**self).fetch(path).await
    }
}

/// Fetch and parse a JSON resource
pub async fn load_json<F>(fetcher: &F, path: &str) -> Result<Value, LoadError>
where
    F: ResourceFetcher + ?Sized,
{
    let response = fetcher.fetch(path).await?;
    if !response.is_success() {
        return Err(LoadError::Status {
            path: path.to_string(),
            status: response.status,
        });
    }

    serde_json::from_slice(&response.body).map_err(|source| LoadError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Data loaded once at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resources {
    /// Identifiers that unlock the catalog
    pub allow_list: AllowList,
    /// Documents, in display order
    pub catalog: Vec<CatalogEntry>,
}

impl Resources {
    /// Load both startup resources
    ///
    /// The two loads are independent and run concurrently. Each failure is
    /// logged and replaced by an empty collection; this never fails.
    pub async fn load<F>(fetcher: &F, config: &ViewerConfig) -> Self
    where
        F: ResourceFetcher + ?Sized,
    {
        let (allowed, documents) = tokio::join!(
            load_json(fetcher, &config.allow_list_path),
            load_json(fetcher, &config.catalog_path),
        );

        let allow_list = match allowed {
            Ok(value) => AllowList::from_json(&value),
            Err(e) => {
                tracing::error!("{} load error: {}", config.allow_list_path, e);
                AllowList::default()
            }
        };

        let catalog = match documents {
            Ok(value) => CatalogEntry::list_from_json(&value),
            Err(e) => {
                tracing::error!("{} load error: {}", config.catalog_path, e);
                Vec::new()
            }
        };

        tracing::info!(
            "Loaded {} identifiers and {} documents",
            allow_list.len(),
            catalog.len()
        );

        Self {
            allow_list,
            catalog,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct StaticFetcher(HashMap<&'static str, FetchResponse>);

    #[async_trait]
    impl ResourceFetcher for StaticFetcher {
        async fn fetch(&self, path: &str) -> Result<FetchResponse, FetchError> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| FetchError::Transport {
                    path: path.to_string(),
                    message: "connection refused".to_string(),
                })
        }
    }

    #[test]
    fn text_replaces_invalid_utf8() {
        let response = FetchResponse::ok(b"<p>Caf\xe9</p>".to_vec());
        assert_eq!(response.text(), "<p>Caf\u{fffd}</p>");
        assert_eq!(FetchResponse::ok("plain").text(), "plain");
    }

    #[test]
    fn success_range_is_2xx() {
        assert!(FetchResponse::status(200).is_success());
        assert!(FetchResponse::status(204).is_success());
        assert!(!FetchResponse::status(304).is_success());
        assert!(!FetchResponse::status(404).is_success());
    }

    #[tokio::test]
    async fn load_json_reports_status() {
        let fetcher = StaticFetcher(HashMap::from([("a.json", FetchResponse::status(500))]));
        let err = load_json(&fetcher, "a.json").await.unwrap_err();
        assert!(matches!(err, LoadError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn load_json_reports_parse_failure() {
        let fetcher = StaticFetcher(HashMap::from([("a.json", FetchResponse::ok("[1,"))]));
        let err = load_json(&fetcher, "a.json").await.unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[tokio::test]
    async fn load_json_reports_transport_failure() {
        let fetcher = StaticFetcher(HashMap::new());
        let err = load_json(&fetcher, "a.json").await.unwrap_err();
        assert!(matches!(err, LoadError::Fetch(FetchError::Transport { .. })));
    }

    #[tokio::test]
    async fn failed_loads_fall_back_independently() {
        let fetcher = StaticFetcher(HashMap::from([(
            "allowed.json",
            FetchResponse::ok(r#"["SN-1"]"#),
        )]));
        let resources = Resources::load(&fetcher, &ViewerConfig::new()).await;
        assert!(resources.allow_list.contains("SN-1"));
        assert!(resources.catalog.is_empty());
    }
}
