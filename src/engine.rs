//! State synchronization engine.
//!
//! DESIGN
//! ======
//! The engine owns the document and is its only writer. Scheme state lives
//! on the document root as a projection (forced-scheme attribute, custom
//! property, invert attribute) and every read goes back through
//! [`Reflection`], so there is no second copy to drift from.
//!
//! ORDERING
//! ========
//! `apply` mutates the document first and persists second. The document is
//! authoritative: a failed write leaves the reflection in place and only
//! logs. The invert flag is recomputed from the live appearance on every
//! write and never stored.

use tokio::sync::watch;
use tracing::{debug, info};

use crate::document::{Document, FORCED_SCHEME_ATTR, FORCED_SCHEME_PROPERTY, INVERT_ATTR, Reflection};
use crate::scheme::{Appearance, Scheme, derive_invert};
use crate::store::{Persistence, SiteKey};
use crate::style;

pub struct Engine {
    document: Document,
    persistence: Persistence,
    site: SiteKey,
    appearance: watch::Receiver<Appearance>,
    hydrated: bool,
}

impl Engine {
    #[must_use]
    pub fn new(site: SiteKey, persistence: Persistence, appearance: watch::Receiver<Appearance>) -> Self {
        Self { document: Document::new(), persistence, site, appearance, hydrated: false }
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Load the stored preference for this site and apply it without
    /// re-persisting. Runs once; later calls return the current scheme.
    pub async fn hydrate(&mut self) -> Scheme {
        if self.hydrated {
            debug!(site = %self.site, "engine: already hydrated");
            return self.current_scheme();
        }
        style::ensure(&mut self.document);
        let scheme = self.persistence.get(&self.site).await.unwrap_or(Scheme::System);
        let applied = self.apply(scheme, false).await;
        self.hydrated = true;
        info!(site = %self.site, scheme = %applied, "engine: hydrated");
        applied
    }

    #[must_use]
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    /// Reflect `scheme` onto the document and optionally persist it.
    /// Returns the scheme now reflected, which always equals `scheme`.
    pub async fn apply(&mut self, scheme: Scheme, persist: bool) -> Scheme {
        style::ensure(&mut self.document);

        if scheme == Scheme::System {
            self.document.remove_attribute(FORCED_SCHEME_ATTR);
            self.document.remove_style_property(FORCED_SCHEME_PROPERTY);
        } else {
            self.document.set_attribute(FORCED_SCHEME_ATTR, scheme.as_str());
            self.document.set_style_property(FORCED_SCHEME_PROPERTY, scheme.as_str());
        }
        self.sync_invert(scheme);

        if persist {
            match scheme {
                Scheme::System => self.persistence.remove(&self.site).await,
                Scheme::Light | Scheme::Dark => self.persistence.set(&self.site, scheme).await,
            }
        }

        let applied = self.current_scheme();
        info!(site = %self.site, scheme = %applied, persist, "engine: scheme applied");
        applied
    }

    /// Flip between forced values. From `system` this lands on `dark`.
    pub async fn toggle(&mut self) -> Scheme {
        let next = self.current_scheme().toggled();
        self.apply(next, true).await
    }

    /// Drop the override and its stored entry.
    pub async fn reset(&mut self) -> Scheme {
        self.apply(Scheme::System, true).await
    }

    /// Rewrite only the invert marker for the current scheme.
    pub fn on_system_appearance_change(&mut self) {
        let scheme = self.current_scheme();
        self.sync_invert(scheme);
        debug!(site = %self.site, %scheme, appearance = %self.system_appearance(), "engine: invert resynced");
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Scheme currently reflected on the document, `system` if unset.
    #[must_use]
    pub fn current_scheme(&self) -> Scheme {
        self.reflection().scheme
    }

    #[must_use]
    pub fn reflection(&self) -> Reflection {
        Reflection::read(&self.document)
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn site_key(&self) -> &SiteKey {
        &self.site
    }

    #[must_use]
    pub fn system_appearance(&self) -> Appearance {
        *self.appearance.borrow()
    }

    fn sync_invert(&mut self, scheme: Scheme) {
        match derive_invert(scheme, self.system_appearance()) {
            None => self.document.remove_attribute(INVERT_ATTR),
            Some(invert) => {
                self.document.set_attribute(INVERT_ATTR, if invert { "true" } else { "false" });
            }
        }
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
