use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::domain::Artist;
use crate::error::CatalogError;
use crate::join::build_catalog;
use crate::present::{LocationGroup, group_by_location};
use crate::search::filter;
use crate::source::CatalogSource;
use crate::store::{CatalogStore, Snapshot};

#[derive(Debug, Clone, Serialize)]
pub struct CatalogListing {
    pub query: String,
    pub count: usize,
    pub total: usize,
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistDetail {
    pub artist: Artist,
    pub location_groups: Vec<LocationGroup>,
}

/// The catalog service: a source to refresh from and the store readers use.
///
/// Share it between threads behind an `Arc`. Refreshes fetch without holding
/// any lock; only the final swap is exclusive.
pub struct Catalog<S: CatalogSource> {
    source: S,
    store: CatalogStore,
}

impl<S: CatalogSource> Catalog<S> {
    /// Loads the first catalog from `source`; fails if that load fails.
    pub fn new(source: S) -> Result<Self, CatalogError> {
        let started = Instant::now();
        let artists = build_catalog(&source)?;
        tracing::info!(
            artists = artists.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "catalog loaded"
        );
        Ok(Self {
            source,
            store: CatalogStore::new(artists),
        })
    }

    /// Runs one full fetch-join-replace cycle.
    ///
    /// On error the current snapshot stays installed and the error is
    /// returned; nothing is retried. Concurrent refreshes may overlap; a cycle
    /// that finishes after a later-started one has installed is dropped.
    pub fn refresh(&self) -> Result<(), CatalogError> {
        let started = Instant::now();
        let cycle = self.store.begin_cycle();
        match build_catalog(&self.source) {
            Ok(artists) => {
                let count = artists.len();
                match self.store.install(cycle, artists) {
                    Some(generation) => tracing::info!(
                        artists = count,
                        generation,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "catalog refreshed"
                    ),
                    None => tracing::debug!(
                        cycle,
                        generation = self.store.generation(),
                        "refresh superseded by a later cycle"
                    ),
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    generation = self.store.generation(),
                    "catalog refresh failed; keeping current snapshot"
                );
                Err(err)
            }
        }
    }

    pub fn snapshot(&self) -> Vec<Artist> {
        self.store.snapshot()
    }

    pub fn current(&self) -> Arc<Snapshot> {
        self.store.current()
    }

    pub fn lookup(&self, id: i64) -> Option<Artist> {
        self.store.lookup(id)
    }

    pub fn listing(&self, query: &str) -> CatalogListing {
        let artists = self.store.snapshot();
        let total = artists.len();
        let matches = filter(artists, query);
        CatalogListing {
            query: query.trim().to_string(),
            count: matches.len(),
            total,
            artists: matches,
        }
    }

    pub fn detail(&self, id: i64) -> Option<ArtistDetail> {
        self.store.lookup(id).map(|artist| ArtistDetail {
            location_groups: group_by_location(&artist.dates_locations),
            artist,
        })
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
