//! Catalog listing
//!
//! One row per document, in catalog order, or a single placeholder row when
//! there is nothing to show.

use crate::sanitize::escape_html;
use crate::types::CatalogEntry;
use std::fmt::Write as _;

/// Placeholder text for an empty catalog
pub const NO_DOCUMENTS: &str = "No documents available.";

/// A row of the catalog listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRow {
    /// A document with its open control
    Document {
        /// Position in the catalog; the open action refers to it
        index: usize,
        /// Document title
        title: String,
        /// Document description (may be empty)
        description: String,
    },
    /// Informational row shown instead of an empty list
    Placeholder,
}

/// Rendered catalog listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    rows: Vec<CatalogRow>,
}

impl CatalogView {
    /// Build rows from the catalog
    #[must_use]
    pub fn build(entries: &[CatalogEntry]) -> Self {
        if entries.is_empty() {
            return Self {
                rows: vec![CatalogRow::Placeholder],
            };
        }

        let rows = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| CatalogRow::Document {
                index,
                title: entry.title.clone(),
                description: entry.description.clone(),
            })
            .collect();
        Self { rows }
    }

    /// Rows in display order
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    /// Number of openable documents
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, CatalogRow::Document { .. }))
            .count()
    }

    /// List items for the document list element
    ///
    /// Titles and descriptions are text, so they are escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(128 * self.rows.len());
        for row in &self.rows {
            match row {
                CatalogRow::Document {
                    index,
                    title,
                    description,
                } => {
                    let _ = write!(
                        html,
                        r#"<li class="doc-item"><div class="doc-meta"><h4>{}</h4><p>{}</p></div><button data-index="{}">Open</button></li>"#,
                        escape_html(title),
                        escape_html(description),
                        index,
                    );
                }
                CatalogRow::Placeholder => {
                    html.push_str("<li>");
                    html.push_str(NO_DOCUMENTS);
                    html.push_str("</li>");
                }
            }
        }
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_catalog_has_only_placeholder() {
        let view = CatalogView::build(&[]);
        assert_eq!(view.rows(), &[CatalogRow::Placeholder]);
        assert_eq!(view.document_count(), 0);
        assert_eq!(view.to_html(), "<li>No documents available.</li>");
    }

    #[test]
    fn rows_follow_catalog_order() {
        let entries = vec![
            CatalogEntry::new("Doc A", "a.html").with_description("first"),
            CatalogEntry::new("Doc B", "b.html"),
        ];
        let view = CatalogView::build(&entries);

        assert_eq!(view.document_count(), 2);
        assert_eq!(
            view.rows()[1],
            CatalogRow::Document {
                index: 1,
                title: "Doc B".to_string(),
                description: String::new(),
            }
        );
        assert!(!view.rows().contains(&CatalogRow::Placeholder));
    }

    #[test]
    fn html_escapes_text() {
        let entries = vec![CatalogEntry::new("<b>R&D</b>", "rd.html").with_description("\"q\"")];
        assert_eq!(
            CatalogView::build(&entries).to_html(),
            "<li class=\"doc-item\"><div class=\"doc-meta\"><h4>&lt;b&gt;R&amp;D&lt;/b&gt;</h4>\
             <p>&quot;q&quot;</p></div><button data-index=\"0\">Open</button></li>"
        );
    }
}
