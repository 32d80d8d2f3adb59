use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Artist;

/// One installed catalog: fully joined artists in source order.
///
/// `generation` is the sequence number of the refresh cycle that built it. It
/// grows with every installed snapshot and skips cycles that failed or were
/// superseded.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub artists: Vec<Artist>,
    pub generation: u64,
    pub refreshed_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn find(&self, id: i64) -> Option<&Artist> {
        self.artists.iter().find(|artist| artist.id == id)
    }
}

/// Holds the current [`Snapshot`] behind a reader/writer lock.
///
/// A store only exists once it has been given a catalog, so readers never see
/// an empty, never-loaded state. Writers build the new snapshot before taking
/// the lock; the exclusive section is a reference swap. Readers clone the
/// `Arc` under the shared lock and do any copying after releasing it.
#[derive(Debug)]
pub struct CatalogStore {
    current: RwLock<Arc<Snapshot>>,
    cycles: AtomicU64,
}

impl CatalogStore {
    pub fn new(artists: Vec<Artist>) -> Self {
        Self {
            current: RwLock::new(Arc::new(Snapshot {
                artists,
                generation: 1,
                refreshed_at: Utc::now(),
            })),
            cycles: AtomicU64::new(1),
        }
    }

    /// Starts a refresh cycle and returns its sequence number.
    ///
    /// Take it before fetching so a slow cycle that started earlier can never
    /// overwrite one that started later.
    pub fn begin_cycle(&self) -> u64 {
        self.cycles.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Installs `artists` built by cycle `generation`.
    ///
    /// Returns `None` and leaves the store untouched when a snapshot from the
    /// same or a later cycle is already installed.
    pub fn install(&self, generation: u64, artists: Vec<Artist>) -> Option<u64> {
        let next = Arc::new(Snapshot {
            artists,
            generation,
            refreshed_at: Utc::now(),
        });
        let previous = {
            // The guarded value is only ever assigned whole, so a poisoned
            // lock still holds a complete snapshot.
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            if current.generation >= generation {
                None
            } else {
                Some(std::mem::replace(&mut *current, next))
            }
        };
        // The old snapshot (or the rejected one) is released here, outside
        // the lock, unless a reader still holds it.
        previous.map(|_| generation)
    }

    /// Starts a cycle and installs `artists` in one step.
    pub fn replace(&self, artists: Vec<Artist>) -> Option<u64> {
        let generation = self.begin_cycle();
        self.install(generation, artists)
    }

    /// Shared handle to the current snapshot, without copying the artists.
    pub fn current(&self) -> Arc<Snapshot> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current)
    }

    /// Independent copy of the current artist list.
    pub fn snapshot(&self) -> Vec<Artist> {
        self.current().artists.clone()
    }

    pub fn lookup(&self, id: i64) -> Option<Artist> {
        self.current().find(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.current().artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn generation(&self) -> u64 {
        self.current().generation
    }

    pub fn refreshed_at(&self) -> DateTime<Utc> {
        self.current().refreshed_at
    }
}
