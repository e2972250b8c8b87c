//! In-memory document model.
//!
//! DESIGN
//! ======
//! Stands in for the rendering surface: root element attributes, root
//! inline custom properties, and `<style>` nodes in the head. The engine
//! writes its state here as a projection and reads it back through
//! [`Reflection`], so the document is what any observer inspects.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::scheme::Scheme;

// =============================================================================
// MARKERS
// =============================================================================

/// Root attribute carrying the forced scheme name.
pub const FORCED_SCHEME_ATTR: &str = "data-forced-color-scheme";

/// Root attribute carrying the invert flag (`true` / `false`).
pub const INVERT_ATTR: &str = "data-invert-colors";

/// Root custom property mirroring the forced scheme name.
pub const FORCED_SCHEME_PROPERTY: &str = "--forced-color-scheme";

// =============================================================================
// DOCUMENT
// =============================================================================

/// A `<style>` element in the document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleNode {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    root_attributes: BTreeMap<String, String>,
    root_style: BTreeMap<String, String>,
    head: Vec<StyleNode>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.root_attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.root_attributes.insert(name.to_owned(), value.into());
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.root_attributes.remove(name);
    }

    #[must_use]
    pub fn style_property(&self, name: &str) -> Option<&str> {
        self.root_style.get(name).map(String::as_str)
    }

    pub fn set_style_property(&mut self, name: &str, value: impl Into<String>) {
        self.root_style.insert(name.to_owned(), value.into());
    }

    pub fn remove_style_property(&mut self, name: &str) {
        self.root_style.remove(name);
    }

    /// Find a head `<style>` node by id.
    #[must_use]
    pub fn style_by_id(&self, id: &str) -> Option<&StyleNode> {
        self.head.iter().find(|node| node.id == id)
    }

    pub fn append_style(&mut self, node: StyleNode) {
        self.head.push(node);
    }

    /// Number of head `<style>` nodes carrying `id`.
    #[must_use]
    pub fn style_count(&self, id: &str) -> usize {
        self.head.iter().filter(|node| node.id == id).count()
    }
}

// =============================================================================
// REFLECTION
// =============================================================================

/// Observable state read back from the document root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Reflection {
    /// Forced scheme, `System` when the attribute is absent.
    pub scheme: Scheme,
    /// Invert marker, `None` when absent.
    pub invert: Option<bool>,
    /// Whether the override stylesheet is present.
    pub style_installed: bool,
}

impl Reflection {
    /// Read the reflection from the document.
    ///
    /// Unknown attribute values read as `System`/absent; only the engine
    /// writes these markers.
    #[must_use]
    pub fn read(doc: &Document) -> Self {
        let scheme: Scheme = doc
            .attribute(FORCED_SCHEME_ATTR)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let invert = match doc.attribute(INVERT_ATTR) {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        };
        let style_installed = doc.style_by_id(crate::style::STYLE_ID).is_some();
        Self { scheme, invert, style_installed }
    }
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
