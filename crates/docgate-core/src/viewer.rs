//! Document viewer
//!
//! Fetches a catalog entry's HTML, prepares it with [`crate::sanitize`] and
//! produces the content for the viewer pane. Failures end up as inline
//! content, never as errors to the caller: the pane always shows something
//! and the user recovers with Back.

use crate::config::ViewerConfig;
use crate::error::FetchError;
use crate::loader::ResourceFetcher;
use crate::sanitize::{escape_html, prepare_markup};
use crate::types::{CatalogEntry, SessionTag};

/// Watermark overlay naming the session that opened the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watermark {
    text: String,
}

impl Watermark {
    /// Inline style of the overlay: fixed bottom-right, faint, click-through
    pub const STYLE: &'static str = "position: fixed; right: 8px; bottom: 8px; opacity: 0.12; \
                                     font-size: 12px; pointer-events: none; color: #000;";

    /// Watermark for a session
    #[inline]
    #[must_use]
    pub fn new(prefix: &str, session: &SessionTag) -> Self {
        Self {
            text: format!("{prefix}{session}"),
        }
    }

    /// Overlay text
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Overlay element
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="watermark" style="{}">{}</div>"#,
            Self::STYLE,
            escape_html(&self.text)
        )
    }
}

/// A successfully prepared document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Markup injected as live HTML
    pub markup: String,
    /// Present when a session is active
    pub watermark: Option<Watermark>,
}

impl RenderedDocument {
    /// The content region suppresses the context menu
    #[inline]
    #[must_use]
    pub const fn context_menu_enabled(&self) -> bool {
        false
    }

    /// Markup followed by the watermark, as appended in the content region
    #[must_use]
    pub fn to_html(&self) -> String {
        match &self.watermark {
            Some(watermark) => {
                let overlay = watermark.to_html();
                let mut html = String::with_capacity(self.markup.len() + overlay.len());
                html.push_str(&self.markup);
                html.push_str(&overlay);
                html
            }
            None => self.markup.clone(),
        }
    }
}

/// What the viewer's content region shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewerContent {
    /// Nothing (viewer closed)
    #[default]
    Empty,
    /// Fetch in progress
    Loading,
    /// Prepared document
    Rendered(RenderedDocument),
    /// Fetch answered with a non-success status
    Failed {
        /// Status code returned
        status: u16,
    },
    /// Unexpected failure while fetching or processing
    Error,
}

impl ViewerContent {
    /// Content region markup
    #[must_use]
    pub fn to_html(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Loading => "<p>Loading document…</p>".to_string(),
            Self::Rendered(document) => document.to_html(),
            Self::Failed { status } => {
                format!(r#"<p style="color: #900">Failed to load document ({status})</p>"#)
            }
            Self::Error => r#"<p style="color:#900">Error loading document.</p>"#.to_string(),
        }
    }

    /// Plain-text status line for non-document content
    #[must_use]
    pub fn status_line(&self) -> Option<String> {
        match self {
            Self::Empty | Self::Rendered(_) => None,
            Self::Loading => Some("Loading document…".to_string()),
            Self::Failed { status } => Some(format!("Failed to load document ({status})")),
            Self::Error => Some("Error loading document.".to_string()),
        }
    }

    /// Prepared document, if any
    #[inline]
    #[must_use]
    pub fn document(&self) -> Option<&RenderedDocument> {
        match self {
            Self::Rendered(document) => Some(document),
            _ => None,
        }
    }
}

/// Viewer pane: header title plus content region
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerPane {
    /// Header title
    pub title: String,
    /// Content region
    pub content: ViewerContent,
    /// Input focus sits on the content region
    pub content_focused: bool,
}

impl ViewerPane {
    /// Pane for a document whose fetch just started
    #[must_use]
    pub fn loading(entry: &CatalogEntry) -> Self {
        Self {
            title: entry.display_title().to_string(),
            content: ViewerContent::Loading,
            content_focused: false,
        }
    }

    /// Nothing shown
    #[inline]
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.title.is_empty() && self.content == ViewerContent::Empty
    }

    /// Content region element
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            r#"<div id="docContainer" tabindex="-1" oncontextmenu="return false">{}</div>"#,
            self.content.to_html()
        )
    }
}

/// Loads documents below the configured document root
pub struct DocumentViewer<'a, F: ?Sized> {
    fetcher: &'a F,
    config: &'a ViewerConfig,
}

impl<'a, F> DocumentViewer<'a, F>
where
    F: ResourceFetcher + ?Sized,
{
    /// Create viewer over a fetcher
    #[inline]
    #[must_use]
    pub fn new(fetcher: &'a F, config: &'a ViewerConfig) -> Self {
        Self { fetcher, config }
    }

    /// Fetch and prepare a document
    ///
    /// Never fails: errors are logged and become [`ViewerContent::Error`].
    pub async fn load(&self, entry: &CatalogEntry, session: Option<&SessionTag>) -> ViewerContent {
        match self.try_load(entry, session).await {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Error loading {}: {}", entry.filename, e);
                ViewerContent::Error
            }
        }
    }

    async fn try_load(
        &self,
        entry: &CatalogEntry,
        session: Option<&SessionTag>,
    ) -> Result<ViewerContent, FetchError> {
        let path = self.config.document_path(&entry.filename);
        let response = self.fetcher.fetch(&path).await?;
        if !response.is_success() {
            tracing::warn!("{} answered {}", path, response.status);
            return Ok(ViewerContent::Failed {
                status: response.status,
            });
        }

        let text = response.text();
        let markup = prepare_markup(&text);
        let watermark = session.map(|tag| Watermark::new(&self.config.watermark_prefix, tag));
        tracing::debug!("Prepared {} ({} bytes of markup)", path, markup.len());

        Ok(ViewerContent::Rendered(RenderedDocument { markup, watermark }))
    }
}
