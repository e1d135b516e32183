//! Terminal rendering of the UI state
//!
//! Documents are shown as their prepared markup; the terminal does not
//! interpret HTML.

use docgate_core::{CatalogRow, StateObserver, UiState, View, NO_DOCUMENTS};
use std::fmt::Write as _;
use std::io::Write;

const HELP_TEXT: &str = "Enter the service number you were issued to unlock the repository.\n\
Commands: open N, back, logout, help, close, quit.";

/// Full screen text for a state
pub(crate) fn render_screen(state: &UiState) -> String {
    let mut out = String::new();

    match state.view() {
        View::Login => {
            out.push_str("== Document Repository ==\n");
            out.push_str("Service number: ");
            out.push_str(state.input());
            out.push('\n');
            if let Some(notice) = state.notice() {
                let _ = writeln!(out, "! {}", notice.message());
            }
        }
        View::Catalog => {
            let tag = state.session().map(ToString::to_string).unwrap_or_default();
            let _ = writeln!(out, "== Repository == signed in as {tag}");
            let rows = state.catalog().map(|c| c.rows()).unwrap_or(&[]);
            if rows.is_empty() {
                let _ = writeln!(out, "  {NO_DOCUMENTS}");
            }
            for row in rows {
                match row {
                    CatalogRow::Document {
                        index,
                        title,
                        description,
                    } => {
                        let _ = writeln!(out, "  {}. {}", index + 1, title);
                        if !description.is_empty() {
                            let _ = writeln!(out, "     {description}");
                        }
                    }
                    CatalogRow::Placeholder => {
                        let _ = writeln!(out, "  {NO_DOCUMENTS}");
                    }
                }
            }
            out.push_str("(open N, logout)\n");
        }
        View::Viewer => {
            let pane = state.viewer();
            let _ = writeln!(out, "== {} ==", pane.title);
            match pane.content.document() {
                Some(document) => {
                    out.push_str(&document.markup);
                    if !document.markup.ends_with('\n') {
                        out.push('\n');
                    }
                    if let Some(watermark) = &document.watermark {
                        let _ = writeln!(out, "{:>60}", watermark.text());
                    }
                }
                None => {
                    if let Some(line) = pane.content.status_line() {
                        out.push_str(&line);
                        out.push('\n');
                    }
                }
            }
            out.push_str("(back, logout)\n");
        }
    }

    if state.help_visible() {
        out.push_str("-- Help --\n");
        out.push_str(HELP_TEXT);
        out.push_str("\n(close)\n");
    }

    out
}

/// Prints each distinct screen once
pub(crate) struct TerminalRenderer<W> {
    out: W,
    last: Option<String>,
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out, last: None }
    }
}

impl<W: Write + Send> StateObserver for TerminalRenderer<W> {
    fn on_state(&mut self, state: &UiState) {
        let screen = render_screen(state);
        if self.last.as_deref() == Some(screen.as_str()) {
            return;
        }
        if let Err(e) = self.out.write_all(screen.as_bytes()).and_then(|()| self.out.flush()) {
            tracing::warn!("failed to write screen: {}", e);
        }
        self.last = Some(screen);
    }
}
