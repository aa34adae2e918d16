use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Memoizes one snapshot per epoch. `invalidate` bumps the epoch counter;
/// the next read rebuilds the whole snapshot. There is no partial
/// invalidation: any content change rebuilds everything, which is fine at
/// blog scale.
///
/// Reads are not serialized against rebuilds. Two concurrent rebuilds may
/// both run; the last writer wins, and since a rebuild is deterministic for
/// the same on-disk content the race is benign.
pub struct SnapshotCache<T> {
    epoch: AtomicU64,
    slot: RwLock<Option<CacheSlot<T>>>,
    enabled: bool,
}

struct CacheSlot<T> {
    epoch: u64,
    value: Arc<T>,
}

impl<T> SnapshotCache<T> {
    pub fn new() -> Self {
        SnapshotCache {
            epoch: AtomicU64::new(0),
            slot: RwLock::new(None),
            enabled: true,
        }
    }

    /// A cache that never retains anything; every read rebuilds. Used in
    /// development so edits show up without hitting the refresh endpoint.
    pub fn non_caching() -> Self {
        SnapshotCache {
            epoch: AtomicU64::new(0),
            slot: RwLock::new(None),
            enabled: false,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Bumps the epoch and returns the new value.
    pub fn invalidate(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn get_or_build<F>(&self, build: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        let epoch = self.epoch();

        if self.enabled {
            if let Some(slot) = self.slot.read().unwrap().as_ref() {
                if slot.epoch == epoch {
                    return slot.value.clone();
                }
            }
        }

        let value = Arc::new(build());
        if self.enabled {
            *self.slot.write().unwrap() = Some(CacheSlot {
                epoch,
                value: value.clone(),
            });
        }
        value
    }
}
