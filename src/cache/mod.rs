//! Snapshot-isolated incremental cache for expensive per-goal computations.
//!
//! Many concurrent planning queries share sub-problems (same destination,
//! different starts). Each query takes a [`Cache`] handle bound to the
//! currently published snapshot, generates only what is missing into a private
//! delta, and publishes that delta when the handle is released. Publication
//! copies the snapshot, overlays the delta and swaps the shared pointer, so
//! readers bound to an older snapshot are never disturbed.
//!
//! - [`Generator`] - computes a value on a miss and may stage incidental entries
//! - [`Factory`] - builds a generator per goal
//! - [`CacheManager`] - owns the published snapshot of one generator
//! - [`CacheManagerMap`] - one manager per goal, created on first access
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use fleetcore::cache::{CacheManager, Generator, Storage};
//!
//! struct Double;
//!
//! impl Generator for Double {
//!     type Key = u32;
//!     type Value = u32;
//!
//!     fn generate(&self, key: &u32, _: &Storage<u32, u32>, _: &mut Storage<u32, u32>) -> Arc<u32> {
//!         Arc::new(key * 2)
//!     }
//! }
//!
//! let manager = CacheManager::new(Arc::new(Double));
//! {
//!     let mut cache = manager.get();
//!     assert_eq!(*cache.get(&21), 42);
//! } // published here
//! assert_eq!(manager.snapshot_len(), 1);
//! ```

mod generator;
mod manager;
mod map;

pub use generator::{Factory, Generator, Storage, StorageOf};
pub use manager::{Cache, CacheManager, Upstream};
pub use map::CacheManagerMap;
