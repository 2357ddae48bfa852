use std::collections::VecDeque;

use crate::config::ConfigError;
use crate::Id;

/// Bounded log of the ids of tasks that have begun execution, oldest first.
///
/// Kept for auditing; scheduling never consults it.
#[derive(Debug, Clone)]
pub struct ExecutedTaskRegistry {
    capacity: usize,
    ids: VecDeque<Id>,
}

impl ExecutedTaskRegistry {
    pub const DEFAULT_CAPACITY: usize = 100;

    /// # Errors
    ///
    /// [`ConfigError::OutOfRange`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        ConfigError::positive("registry_capacity", capacity as f64)?;
        Ok(Self::with_capacity(capacity))
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ids: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends `id`, evicting the oldest entry once full.
    pub fn register(&mut self, id: impl Into<Id>) {
        if self.ids.len() == self.capacity {
            self.ids.pop_front();
        }
        self.ids.push_back(id.into());
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Id> + '_ {
        self.ids.iter()
    }

    pub fn to_vec(&self) -> Vec<Id> {
        self.ids.iter().cloned().collect()
    }
}

impl Default for ExecutedTaskRegistry {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn evicts_oldest_first() {
        let mut registry = ExecutedTaskRegistry::new(3).unwrap();
        for id in ["a", "b", "c", "d"] {
            registry.register(id);
        }
        assert_eq!(registry.to_vec(), vec!["b", "c", "d"]);
        assert!(!registry.contains("a"));
    }

    #[test]
    fn default_holds_one_hundred() {
        let mut registry = ExecutedTaskRegistry::default();
        for i in 0..150 {
            registry.register(format!("task-{i}"));
        }
        assert_eq!(registry.len(), 100);
        assert_eq!(registry.iter().next().map(String::as_str), Some("task-50"));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(
            ExecutedTaskRegistry::new(0).unwrap_err(),
            ConfigError::OutOfRange {
                field: "registry_capacity",
                value: 0.0
            }
        );
    }

    proptest! {
        #[test]
        fn never_exceeds_capacity(capacity in 1usize..20, count in 0usize..100) {
            let mut registry = ExecutedTaskRegistry::new(capacity).unwrap();
            for i in 0..count {
                registry.register(i.to_string());
                prop_assert!(registry.len() <= capacity);
            }
            prop_assert_eq!(registry.len(), count.min(capacity));
            if count > 0 {
                let last = registry.iter().last().cloned();
                prop_assert_eq!(last, Some((count - 1).to_string()));
            }
        }
    }
}
