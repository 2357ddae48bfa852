//! Value-generation strategies plugged into a [`CacheManager`](super::CacheManager).

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// Key/value store backing a cache snapshot or a handle's delta.
///
/// Values are shared so that copying a snapshot copies pointers, not values.
pub type Storage<K, V> = HashMap<K, Arc<V>>;

/// Storage type used by generator `G`.
pub type StorageOf<G> = Storage<<G as Generator>::Key, <G as Generator>::Value>;

/// Computes cache values on a miss.
///
/// A generator is a pure function of the key and the published snapshot
/// (`old_items`). While computing the requested value it may discover other
/// entries worth keeping (for example every node settled by a graph search);
/// those go into `new_items`, the calling handle's private delta, and are
/// published together with the requested value.
///
/// Generators are infallible. A value type that needs to express "no answer"
/// should encode it itself, e.g. `Option<f64>` for an unreachable goal.
pub trait Generator: Send + Sync + 'static {
    type Key: Eq + Hash + Clone + Send + Sync;
    type Value: Send + Sync;

    /// Produces the value for `key`.
    ///
    /// The returned value is stored under `key` by the caller; the generator
    /// only needs to stage auxiliary entries in `new_items`. Entries already
    /// present in `old_items` or `new_items` should not be overwritten.
    fn generate(
        &self,
        key: &Self::Key,
        old_items: &Storage<Self::Key, Self::Value>,
        new_items: &mut Storage<Self::Key, Self::Value>,
    ) -> Arc<Self::Value>;
}

/// Builds one [`Generator`] per goal so a
/// [`CacheManagerMap`](super::CacheManagerMap) can host an independent cache
/// for each sub-problem family.
pub trait Factory: Send + Sync + 'static {
    type Generator: Generator;

    fn make(&self, goal: usize) -> Arc<Self::Generator>;
}
