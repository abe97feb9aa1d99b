//! Hot-swappable parsed configuration.
//!
//! Readers take an `Arc` of the current [`MockEndpointCollection`] and keep
//! using it for as long as they need; a reload builds a complete new
//! collection off to the side and only then replaces the shared one.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

use crate::error::Error;
use crate::fs::FileSystem;
use crate::mock::MockEndpointCollection;
use crate::spec::{load_file, parse_specification};

/// What a successful [`SnapshotStore::reload`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// A new collection was parsed and is now current.
    Swapped { endpoints: usize },
    /// The file content has the same fingerprint as the current snapshot.
    Unchanged,
}

#[derive(Debug, Default)]
struct Snapshot {
    endpoints: Arc<MockEndpointCollection>,
    fingerprint: Option<String>,
}

#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Snapshot>,
}

impl SnapshotStore {
    /// An empty store serving no endpoints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The collection currently being served.
    #[must_use]
    pub fn current(&self) -> Arc<MockEndpointCollection> {
        let snapshot = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&snapshot.endpoints)
    }

    /// Content fingerprint of the document behind the current collection.
    #[must_use]
    pub fn fingerprint(&self) -> Option<String> {
        let snapshot = self.current.read().unwrap_or_else(PoisonError::into_inner);
        snapshot.fingerprint.clone()
    }

    /// Loads and parses the document at `path` and makes it current.
    ///
    /// On failure the current collection stays in place.
    ///
    /// # Errors
    ///
    /// Returns the load or parse error.
    pub fn reload<F: FileSystem + ?Sized>(
        &self,
        fs: &F,
        path: &Path,
    ) -> Result<ReloadOutcome, Error> {
        let loaded = match load_file(fs, path) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "reload failed, keeping current snapshot");
                return Err(e);
            }
        };

        if self.fingerprint().as_deref() == Some(loaded.fingerprint.as_str()) {
            info!(path = %path.display(), "specification unchanged");
            return Ok(ReloadOutcome::Unchanged);
        }

        let endpoints = match parse_specification(&loaded.document) {
            Ok(endpoints) => endpoints,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "reload failed, keeping current snapshot");
                return Err(e.into());
            }
        };

        let count = endpoints.len();
        {
            let mut snapshot = self.current.write().unwrap_or_else(PoisonError::into_inner);
            *snapshot = Snapshot {
                endpoints: Arc::new(endpoints),
                fingerprint: Some(loaded.fingerprint),
            };
        }
        info!(path = %path.display(), endpoints = count, "specification snapshot swapped");

        Ok(ReloadOutcome::Swapped { endpoints: count })
    }
}
