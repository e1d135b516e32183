//! Core data types: allow-list, catalog entries, session tag, views

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Identifiers permitted to unlock the catalog
///
/// Loaded once at startup and never mutated afterwards. Duplicates are
/// harmless; order is preserved only for display/debugging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowList {
    identifiers: Vec<String>,
}

impl AllowList {
    /// Create from identifiers
    #[inline]
    #[must_use]
    pub fn new<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identifiers: identifiers.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from a loaded JSON value
    ///
    /// Only string elements of a top-level array count; any other shape
    /// yields an empty list so the gate rejects everything.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let Value::Array(items) = value else {
            tracing::warn!("allow-list is not a JSON array; treating as empty");
            return Self::default();
        };

        let identifiers: Vec<String> = items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect();
        if identifiers.len() != items.len() {
            tracing::warn!(
                "ignored {} non-string allow-list entries",
                items.len() - identifiers.len()
            );
        }
        Self { identifiers }
    }

    /// Exact, case-sensitive membership test
    #[inline]
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.iter().any(|id| id == identifier)
    }

    /// Number of identifiers (duplicates included)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    /// True when nothing can pass the gate
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

/// One document's metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display title
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    /// Optional one-line description
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    /// Path relative to the document root, e.g. `history.html`
    pub filename: String,
}

/// Strings pass through; null or any other JSON value reads as empty
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

impl CatalogEntry {
    /// Create entry with an empty description
    #[inline]
    #[must_use]
    pub fn new(title: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            filename: filename.into(),
        }
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Title shown in the viewer header; falls back to the filename
    #[inline]
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.filename
        } else {
            &self.title
        }
    }

    /// Build the ordered catalog from a loaded JSON value
    ///
    /// Non-array values give an empty catalog. Array elements that do not
    /// describe an entry (no string `filename`) are skipped.
    #[must_use]
    pub fn list_from_json(value: &Value) -> Vec<Self> {
        let Value::Array(items) = value else {
            tracing::warn!("document catalog is not a JSON array; treating as empty");
            return Vec::new();
        };

        items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match Self::deserialize(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("skipping catalog entry {}: {}", index, e);
                    None
                }
            })
            .collect()
    }
}

/// The identifier that unlocked the catalog
///
/// Only used for display watermarking; it carries no authority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionTag(String);

impl SessionTag {
    /// Wrap an already validated identifier
    #[inline]
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    /// Identifier text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The three mutually exclusive views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    /// Identifier entry
    #[default]
    Login,
    /// Document list
    Catalog,
    /// Single document
    Viewer,
}

impl View {
    /// All views, in navigation order
    pub const ALL: [View; 3] = [View::Login, View::Catalog, View::Viewer];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn allow_list_keeps_only_strings() {
        let list = AllowList::from_json(&json!(["SN-100", 200, null, "SN-200"]));
        assert_eq!(list.len(), 2);
        assert!(list.contains("SN-100"));
        assert!(list.contains("SN-200"));
        assert!(!list.contains("200"));
    }

    #[test]
    fn allow_list_from_non_array_is_empty() {
        assert!(AllowList::from_json(&json!({"SN-100": true})).is_empty());
        assert!(AllowList::from_json(&json!("SN-100")).is_empty());
    }

    #[test]
    fn allow_list_membership_is_exact() {
        let list = AllowList::new(["SN-100"]);
        assert!(list.contains("SN-100"));
        assert!(!list.contains("sn-100"));
        assert!(!list.contains("SN-10"));
        assert!(!list.contains(" SN-100"));
    }

    #[test]
    fn catalog_entries_default_optional_fields() {
        let entries = CatalogEntry::list_from_json(&json!([
            {"title": "Doc A", "filename": "a.html"},
            {"filename": "b.html", "description": "second"},
        ]));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "");
        assert_eq!(entries[1].title, "");
        assert_eq!(entries[1].display_title(), "b.html");
    }

    #[test]
    fn catalog_tolerates_null_and_non_string_text_fields() {
        let entries = CatalogEntry::list_from_json(&json!([
            {"title": "Doc A", "description": null, "filename": "a.html"},
            {"title": null, "description": 7, "filename": "b.html"},
            {"title": 42, "filename": "c.html"}
        ]));

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], CatalogEntry::new("Doc A", "a.html"));
        assert_eq!(entries[1], CatalogEntry::new("", "b.html"));
        assert_eq!(entries[1].display_title(), "b.html");
        assert_eq!(entries[2].title, "");
    }

    #[test]
    fn catalog_skips_malformed_entries() {
        let entries = CatalogEntry::list_from_json(&json!([
            "a.html",
            {"title": "No file"},
            {"title": "Ok", "filename": "ok.html"},
        ]));
        assert_eq!(entries, vec![CatalogEntry::new("Ok", "ok.html")]);
    }

    #[test]
    fn catalog_from_non_array_is_empty() {
        assert!(CatalogEntry::list_from_json(&json!({"title": "x"})).is_empty());
    }

    #[test]
    fn initial_view_is_login() {
        assert_eq!(View::default(), View::Login);
    }
}
