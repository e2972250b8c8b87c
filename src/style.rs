//! Override stylesheet injection.
//!
//! The stylesheet is keyed on the root markers written by the engine, so it
//! only needs to exist once per document. It is never removed.

use tracing::debug;

use crate::document::{Document, StyleNode};

/// Id of the injected `<style>` node.
pub const STYLE_ID: &str = "color-scheme-toggler-style";

pub const BASE_STYLES: &str = r"
:root[data-forced-color-scheme] {
  transition: background-color 0.2s ease, color 0.2s ease, filter 0.2s ease;
}

:root[data-forced-color-scheme='dark'] {
  color-scheme: dark;
  background-color: #0f111a !important;
}

:root[data-forced-color-scheme='light'] {
  color-scheme: light;
  background-color: #ffffff !important;
}

:root[data-invert-colors='true'] {
  filter: invert(0.92) hue-rotate(180deg);
}

:root[data-invert-colors='true'] img,
:root[data-invert-colors='true'] video,
:root[data-invert-colors='true'] picture,
:root[data-invert-colors='true'] svg,
:root[data-invert-colors='true'] canvas,
:root[data-invert-colors='true'] iframe {
  filter: invert(1) hue-rotate(180deg) !important;
}

:root[data-invert-colors='false'],
:root:not([data-invert-colors]) {
  filter: none !important;
}
";

/// Ensure the override stylesheet exists. Returns `true` if it was created.
pub fn ensure(doc: &mut Document) -> bool {
    if doc.style_by_id(STYLE_ID).is_some() {
        debug!("style: override stylesheet already present");
        return false;
    }
    doc.append_style(StyleNode { id: STYLE_ID.to_owned(), text: BASE_STYLES.to_owned() });
    debug!(id = STYLE_ID, "style: override stylesheet injected");
    true
}

#[cfg(test)]
#[path = "style_test.rs"]
mod tests;
