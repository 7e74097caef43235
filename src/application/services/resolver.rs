//! Selector to ID resolution
//!
//! Numeric selectors pass straight through without a remote lookup; a bogus ID
//! only surfaces when the handler fetches it. Names are matched exactly and
//! case-sensitively against a freshly fetched list, scanned linearly. The
//! provider does not enforce unique names, so the first match in provider
//! order wins.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, ProviderResultExt};
use crate::domain::{DomainError, ResourceId, ResourceKind, Selector};
use crate::infrastructure::traits::ResourceProvider;

/// (id, name) pair from a listing.
#[derive(Debug)]
struct CatalogEntry {
    id: ResourceId,
    name: String,
}

/// Service turning selectors into canonical IDs.
pub struct IdentifierResolver {
    provider: Arc<dyn ResourceProvider>,
}

impl IdentifierResolver {
    pub fn new(provider: Arc<dyn ResourceProvider>) -> Self {
        Self { provider }
    }

    /// Resolve `selectors` to IDs, one per selector, in input order.
    ///
    /// The resource list is fetched at most once per call, and only if a
    /// name is present. Fails on the first name without a match.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve(
        &self,
        kind: ResourceKind,
        selectors: &[Selector],
    ) -> ApplicationResult<Vec<ResourceId>> {
        let mut catalog: Option<Vec<CatalogEntry>> = None;
        let mut ids = Vec::with_capacity(selectors.len());

        for selector in selectors {
            match selector {
                Selector::Id(id) => ids.push(*id),
                Selector::Name(name) => {
                    if catalog.is_none() {
                        catalog = Some(self.fetch_catalog(kind)?);
                    }
                    let entries = catalog.as_deref().unwrap_or_default();
                    let entry = entries.iter().find(|e| e.name == *name).ok_or_else(|| {
                        DomainError::ResourceNotFound {
                            kind,
                            name: name.clone(),
                        }
                    })?;
                    debug!(%name, id = entry.id, "resolved name");
                    ids.push(entry.id);
                }
            }
        }

        Ok(ids)
    }

    fn fetch_catalog(&self, kind: ResourceKind) -> ApplicationResult<Vec<CatalogEntry>> {
        let entries: Vec<CatalogEntry> = match kind {
            ResourceKind::Droplet => self
                .provider
                .list_droplets()
                .with_remote_context("list droplets")?
                .into_iter()
                .map(|d| CatalogEntry { id: d.id, name: d.name })
                .collect(),
            ResourceKind::Image => self
                .provider
                .list_images()
                .with_remote_context("list images")?
                .into_iter()
                .map(|i| CatalogEntry { id: i.id, name: i.name })
                .collect(),
        };
        debug!(%kind, count = entries.len(), "fetched catalog");
        Ok(entries)
    }
}
