use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::generator::Factory;
use super::manager::CacheManager;

/// Lazily created [`CacheManager`]s, one per goal.
///
/// The first request for a goal asks the factory for a generator and builds
/// its manager; later requests return the same manager.
pub struct CacheManagerMap<F: Factory> {
    managers: Mutex<HashMap<usize, Arc<CacheManager<F::Generator>>>>,
    factory: Arc<F>,
}

impl<F: Factory> CacheManagerMap<F> {
    pub fn new(factory: Arc<F>) -> Self {
        Self {
            managers: Mutex::new(HashMap::new()),
            factory,
        }
    }

    pub fn get(&self, goal: usize) -> Arc<CacheManager<F::Generator>> {
        let mut managers = self.managers.lock();
        let manager = managers.entry(goal).or_insert_with(|| {
            tracing::debug!(goal, "Creating cache manager");
            CacheManager::new(self.factory.make(goal))
        });
        Arc::clone(manager)
    }

    /// Number of goals with a manager.
    pub fn len(&self) -> usize {
        self.managers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{Generator, Storage};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Offset(u64);

    impl Generator for Offset {
        type Key = u64;
        type Value = u64;

        fn generate(&self, key: &u64, _: &Storage<u64, u64>, _: &mut Storage<u64, u64>) -> Arc<u64> {
            Arc::new(key + self.0)
        }
    }

    #[derive(Default)]
    struct OffsetFactory {
        made: AtomicUsize,
    }

    impl Factory for OffsetFactory {
        type Generator = Offset;

        fn make(&self, goal: usize) -> Arc<Offset> {
            self.made.fetch_add(1, Ordering::SeqCst);
            Arc::new(Offset(goal as u64 * 1000))
        }
    }

    #[test]
    fn managers_are_memoized_per_goal() {
        let factory = Arc::new(OffsetFactory::default());
        let map = CacheManagerMap::new(Arc::clone(&factory));
        assert!(map.is_empty());

        let a = map.get(1);
        let b = map.get(1);
        let c = map.get(2);

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(map.len(), 2);
        assert_eq!(factory.made.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn goals_have_independent_storage() {
        let map = CacheManagerMap::new(Arc::new(OffsetFactory::default()));

        assert_eq!(*map.get(1).get().get(&5), 1005);
        assert_eq!(*map.get(2).get().get(&5), 2005);
        assert_eq!(map.get(1).snapshot_len(), 1);
        assert_eq!(map.get(3).snapshot_len(), 0);
    }
}
