//! Error types for docgate Core
//!
//! Covers the failure classes of the viewer:
//! - Transport failures while fetching a resource
//! - Startup resource loads (recovered by the caller with empty collections)
//! - Illegal view transitions
//! - Configuration file problems
//!
//! Gate rejections are not errors in this sense; see [`crate::gate::GateRejection`].

use crate::types::View;
use std::path::PathBuf;

/// Failure to obtain a resource at all (as opposed to a non-success status)
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network or protocol level failure
    #[error("transport error fetching {path}: {message}")]
    Transport {
        /// Requested resource path
        path: String,
        /// Underlying error description
        message: String,
    },

    /// Local I/O failure other than not-found / permission denied
    #[error("i/o error reading {path}: {source}")]
    Io {
        /// Requested resource path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Resource path escapes the site root or is otherwise unusable
    #[error("invalid resource path: {0}")]
    InvalidPath(String),
}

/// Startup JSON resource load failure
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Resource could not be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Resource answered with a non-success status
    #[error("{path} fetch failed: {status}")]
    Status {
        /// Requested resource path
        path: String,
        /// HTTP-style status code
        status: u16,
    },

    /// Body is not valid JSON
    #[error("{path} is not valid JSON: {source}")]
    Parse {
        /// Requested resource path
        path: String,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },
}

/// View state machine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StateMachineError {
    /// Transition not permitted from the current view
    #[error("illegal view transition: {from:?} -> {to:?}")]
    IllegalTransition {
        /// Current view
        from: View,
        /// Requested view
        to: View,
    },
}

/// Controller dispatch errors
///
/// Dispatch errors never change state; the UI stays interactive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    /// Action is not available in the current view
    #[error(transparent)]
    IllegalTransition(#[from] StateMachineError),

    /// Catalog index out of range
    #[error("no document at catalog index {0}")]
    UnknownDocument(usize),
}

impl ControllerError {
    /// View the rejected action was dispatched in, if known
    #[inline]
    #[must_use]
    pub fn current_view(&self) -> Option<View> {
        match self {
            Self::IllegalTransition(StateMachineError::IllegalTransition { from, .. }) => {
                Some(*from)
            }
            Self::UnknownDocument(_) => None,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::ViewerConfig`]
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config values are inconsistent
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_path_and_code() {
        let err = LoadError::Status {
            path: "allowed.json".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "allowed.json fetch failed: 503");
    }

    #[test]
    fn controller_error_reports_current_view() {
        let err = ControllerError::from(StateMachineError::IllegalTransition {
            from: View::Login,
            to: View::Viewer,
        });
        assert_eq!(err.current_view(), Some(View::Login));
        assert_eq!(ControllerError::UnknownDocument(4).current_view(), None);
    }
}
