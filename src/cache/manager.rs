//! Copy-on-write snapshot cache shared by many lookup handles.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use super::generator::{Generator, StorageOf};

/// The published, immutable state of one cache: a storage snapshot plus the
/// generator that fills it.
pub struct Upstream<G: Generator> {
    storage: Arc<StorageOf<G>>,
    generator: Arc<G>,
}

impl<G: Generator> Upstream<G> {
    fn new(generator: Arc<G>) -> Self {
        Self {
            storage: Arc::new(StorageOf::<G>::new()),
            generator,
        }
    }

    pub fn storage(&self) -> &StorageOf<G> {
        &self.storage
    }

    pub fn generator(&self) -> &Arc<G> {
        &self.generator
    }
}

impl<G: Generator> Clone for Upstream<G> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            generator: Arc::clone(&self.generator),
        }
    }
}

/// Owner of the current snapshot for one generator.
///
/// # Invariants
///
/// - A published snapshot is never mutated. [`update`](Self::update) copies
///   the current snapshot, overlays a delta and swaps the pointer.
/// - Publication is totally ordered by `upstream`'s lock. The lock is held only
///   to read or swap the pointer, never while a generator runs.
pub struct CacheManager<G: Generator> {
    upstream: Mutex<Upstream<G>>,
}

impl<G: Generator> CacheManager<G> {
    pub fn new(generator: Arc<G>) -> Arc<Self> {
        Arc::new(Self {
            upstream: Mutex::new(Upstream::new(generator)),
        })
    }

    /// Returns a handle bound to the snapshot published right now.
    ///
    /// The handle keeps reading that snapshot for its whole lifetime, even if
    /// other handles publish in the meantime.
    pub fn get(self: &Arc<Self>) -> Cache<G> {
        let upstream = self.upstream.lock().clone();
        Cache {
            upstream,
            manager: Arc::clone(self),
            new_items: StorageOf::<G>::new(),
        }
    }

    /// Number of entries in the current snapshot.
    pub fn snapshot_len(&self) -> usize {
        self.upstream.lock().storage.len()
    }

    /// Publishes `new_items` on top of the current snapshot.
    ///
    /// Delta entries win on key collision.
    fn update(&self, new_items: StorageOf<G>) {
        let mut upstream = self.upstream.lock();
        let published = new_items.len();
        let mut storage = StorageOf::<G>::clone(&upstream.storage);
        storage.extend(new_items);
        let total = storage.len();
        upstream.storage = Arc::new(storage);
        drop(upstream);

        tracing::debug!(published, total, "Published cache snapshot");
    }
}

impl<G: Generator> fmt::Debug for CacheManager<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheManager")
            .field("snapshot_len", &self.snapshot_len())
            .finish()
    }
}

/// A lookup handle: a stable snapshot plus a private delta of entries it
/// generated itself.
///
/// The delta is published back to the manager by [`finalize`](Self::finalize)
/// or, on every other exit path, when the handle is dropped.
pub struct Cache<G: Generator> {
    upstream: Upstream<G>,
    manager: Arc<CacheManager<G>>,
    new_items: StorageOf<G>,
}

impl<G: Generator> Cache<G> {
    /// Looks `key` up, generating it on a miss.
    ///
    /// The handle's own delta is checked before the snapshot, so a key is
    /// never generated twice by the same handle.
    pub fn get(&mut self, key: &G::Key) -> Arc<G::Value> {
        if let Some(value) = self.new_items.get(key) {
            return Arc::clone(value);
        }

        if let Some(value) = self.upstream.storage.get(key) {
            return Arc::clone(value);
        }

        let value = self
            .upstream
            .generator
            .generate(key, &self.upstream.storage, &mut self.new_items);

        Arc::clone(self.new_items.entry(key.clone()).or_insert(value))
    }

    /// The snapshot this handle was bound to when it was created.
    pub fn upstream(&self) -> &Upstream<G> {
        &self.upstream
    }

    /// Number of generated entries not yet published.
    pub fn pending(&self) -> usize {
        self.new_items.len()
    }

    /// Publishes the delta now and releases the handle.
    pub fn finalize(mut self) {
        self.publish();
    }

    fn publish(&mut self) {
        if !self.new_items.is_empty() {
            self.manager.update(std::mem::take(&mut self.new_items));
        }
    }
}

impl<G: Generator> Drop for Cache<G> {
    fn drop(&mut self) {
        self.publish();
    }
}
