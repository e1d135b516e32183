//! Local directory fetcher
//!
//! Serves a site checked out on disk. Missing files answer 404 and
//! unreadable ones 403, mirroring what a static web server would do.

use crate::SiteError;
use async_trait::async_trait;
use docgate_core::{FetchError, FetchResponse, ResourceFetcher};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Fetches resources below a root directory
#[derive(Debug, Clone)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    /// Fetcher rooted at an existing directory
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, SiteError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(SiteError::NotADirectory(root));
        }
        Ok(Self { root })
    }

    /// Site root
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path of a site-relative path
    ///
    /// Only plain relative components are accepted, so a resource can never
    /// resolve outside the root.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(path);
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(FetchError::InvalidPath(path.to_string()));
                }
            }
        }
        if resolved == self.root {
            return Err(FetchError::InvalidPath(path.to_string()));
        }
        Ok(resolved)
    }
}

#[async_trait]
impl ResourceFetcher for DirFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, FetchError> {
        let file = self.resolve(path)?;
        tracing::debug!("read {}", file.display());

        match tokio::fs::read(&file).await {
            Ok(body) => Ok(FetchResponse::ok(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(FetchResponse::status(404)),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => Ok(FetchResponse::status(403)),
            Err(source) => Err(FetchError::Io {
                path: path.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = DirFetcher::new(dir.path()).unwrap();

        assert!(fetcher.resolve("docs/../../etc/passwd").is_err());
        assert!(fetcher.resolve("/etc/passwd").is_err());
        assert!(fetcher.resolve("").is_err());
        assert_eq!(
            fetcher.resolve("./docs/a.html").unwrap(),
            dir.path().join("docs").join("a.html")
        );
    }

    #[test]
    fn root_must_be_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("allowed.json");
        std::fs::write(&file, "[]").unwrap();

        assert!(matches!(DirFetcher::new(&file), Err(SiteError::NotADirectory(_))));
        assert!(DirFetcher::new(dir.path().join("missing")).is_err());
    }
}
