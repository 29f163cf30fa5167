//! Public data cache.
//!
//! Holds the last successful snapshot of all public content. The
//! snapshot is replaced wholesale, never partially mutated, so readers
//! always see either the old or the new complete snapshot. Overlapping
//! refreshes are not coordinated; the last response to arrive wins.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::database::models::SiteData;
use crate::database::{AccessMode, Gateway};

pub struct SiteStore {
    gateway: Arc<Gateway>,
    snapshot: RwLock<Arc<SiteData>>,
    loading: AtomicBool,
}

impl SiteStore {
    /// Create the store with an empty placeholder snapshot. The loading
    /// flag stays set until the first fetch settles, success or not.
    pub fn new(gateway: Arc<Gateway>) -> Arc<Self> {
        Arc::new(Self {
            gateway,
            snapshot: RwLock::new(Arc::new(SiteData::empty())),
            loading: AtomicBool::new(true),
        })
    }

    /// Kick off the one initial fetch without blocking startup.
    pub fn spawn_initial_fetch(self: &Arc<Self>) {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            store.refresh().await;
        });
    }

    /// Re-fetch all public content and replace the snapshot.
    ///
    /// A failed fetch logs and leaves the previous snapshot in place;
    /// consumers never see an error from here.
    pub async fn refresh(&self) {
        match self.gateway.fetch_site_data(AccessMode::Public).await {
            Ok(data) => {
                *self.snapshot.write() = Arc::new(data);
                debug!("Public content snapshot refreshed");
            }
            Err(err) => warn!("Failed to fetch site data: {err}"),
        }
        self.loading.store(false, Ordering::Release);
    }

    /// The last successful snapshot (or the empty placeholder).
    pub fn snapshot(&self) -> Arc<SiteData> {
        Arc::clone(&self.snapshot.read())
    }

    /// True until the first fetch settles, regardless of its outcome.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::entity::Draftable;
    use crate::database::models::StatItem;

    #[tokio::test]
    async fn first_refresh_clears_the_loading_flag() {
        let store = SiteStore::new(Arc::new(Gateway::disabled()));
        assert!(store.is_loading());

        store.refresh().await;
        assert!(!store.is_loading());
        assert_eq!(*store.snapshot(), SiteData::empty());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_previous_snapshot() {
        let gateway = Arc::new(Gateway::in_memory());
        let mut stat = StatItem::blank(1);
        stat.value = "100+".to_string();
        gateway.upsert(&stat).await.unwrap();

        let store = SiteStore::new(Arc::clone(&gateway));
        store.refresh().await;
        assert_eq!(store.snapshot().stats.len(), 1);

        gateway.memory().unwrap().fail_next();
        store.refresh().await;

        // The poisoned fetch was logged and dropped; readers still see
        // the last good snapshot.
        assert_eq!(store.snapshot().stats.len(), 1);
        assert!(!store.is_loading());
    }
}
