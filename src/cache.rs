//! Fingerprint-keyed cache of the normalized listings.
//!
//! The source file is parsed once per version. A version is identified by
//! its size and modification time; any change replaces the cached snapshot
//! wholesale. Snapshots are shared read-only through `Arc`.

use crate::config::ParseConfig;
use crate::error::{DashboardError, Result};
use crate::loader::load_listings;
use crate::models::Listings;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::SystemTime;
use tokio::sync::Mutex;
use tokio::task;
use tracing::{debug, info};

/// Identity of one version of the source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl Fingerprint {
    /// Read the fingerprint of the file at `path`
    pub async fn of(path: &Path) -> Result<Self> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => DashboardError::SourceNotFound {
                path: path.to_path_buf(),
            },
            _ => DashboardError::Io(e),
        })?;

        Ok(Self {
            len: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }
}

#[derive(Debug)]
struct CacheEntry {
    fingerprint: Fingerprint,
    listings: Arc<Listings>,
}

/// Memoized loader for one listings file
#[derive(Debug)]
pub struct ListingCache {
    source_path: PathBuf,
    parse: ParseConfig,
    entry: Mutex<Option<CacheEntry>>,
    loads: AtomicUsize,
}

impl ListingCache {
    pub fn new(source_path: PathBuf, parse: ParseConfig) -> Self {
        Self {
            source_path,
            parse,
            entry: Mutex::new(None),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Number of times the source file has been parsed
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Current snapshot, reparsing only if the file changed
    ///
    /// A failed load clears the cached entry so a broken file is never
    /// masked by an older snapshot.
    pub async fn snapshot(&self) -> Result<Arc<Listings>> {
        let fingerprint = Fingerprint::of(&self.source_path).await?;
        let mut entry = self.entry.lock().await;

        if let Some(cached) = entry.as_ref() {
            if cached.fingerprint == fingerprint {
                debug!("Listings cache hit for {}", self.source_path.display());
                return Ok(Arc::clone(&cached.listings));
            }
            info!(
                "Listings file {} changed, reloading",
                self.source_path.display()
            );
        }

        let path = self.source_path.clone();
        let parse = self.parse.clone();
        let loaded = task::spawn_blocking(move || load_listings(&path, &parse))
            .await
            .map_err(|e| DashboardError::Interrupted {
                reason: format!("listings load task failed: {}", e),
            })?;

        self.loads.fetch_add(1, Ordering::Relaxed);

        match loaded {
            Ok(listings) => {
                let listings = Arc::new(listings);
                *entry = Some(CacheEntry {
                    fingerprint,
                    listings: Arc::clone(&listings),
                });
                Ok(listings)
            }
            Err(e) => {
                *entry = None;
                Err(e)
            }
        }
    }

    /// Drop the cached snapshot; the next `snapshot` call reparses
    pub async fn invalidate(&self) {
        let mut entry = self.entry.lock().await;
        if entry.take().is_some() {
            debug!("Listings cache invalidated");
        }
    }
}
