//! Transient user-facing messages
//!
//! A notice is visible for a fixed time after it is shown and then simply
//! stops being visible; nothing has to dismiss it. Uses the tokio clock so
//! tests can pause and advance time.

use std::time::Duration;
use tokio::time::Instant;

/// A self-clearing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    message: String,
    shown_at: Instant,
    ttl: Duration,
}

impl Notice {
    /// Show a message now
    #[inline]
    #[must_use]
    pub fn show(message: impl Into<String>, ttl: Duration) -> Self {
        Self::shown_at(message, Instant::now(), ttl)
    }

    /// Message shown at a given instant
    #[inline]
    #[must_use]
    pub fn shown_at(message: impl Into<String>, shown_at: Instant, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            shown_at,
            ttl,
        }
    }

    /// Message text
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// When the message stops being visible
    #[inline]
    #[must_use]
    pub fn expires_at(&self) -> Instant {
        self.shown_at + self.ttl
    }

    /// Visible at `now`
    #[inline]
    #[must_use]
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now < self.expires_at()
    }

    /// Visible right now
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Instant::now())
    }
}
