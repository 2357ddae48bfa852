//! Time representation shared by the reservation ledger and the task manager.
//!
//! Times are plain `qtty` quantities measured in seconds from an arbitrary
//! epoch chosen by the caller. The core never reads a clock: every operation
//! that depends on "now" receives it as an argument.

use qtty::{Quantity, Second};

/// A point in time, in seconds.
pub type Time = Quantity<Second>;

/// A span of time, in seconds.
pub type Duration = Quantity<Second>;

/// Shorthand for building a [`Time`] or [`Duration`] from raw seconds.
#[inline]
pub const fn seconds(value: f64) -> Quantity<Second> {
    Quantity::new(value)
}

/// A total-order key for `f64` times using IEEE-754 total order (`total_cmp`).
/// This lets us use quantity-backed times as `BTreeMap` keys.
///
/// NaN is rejected before a key is ever built; see [`TimeKey::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeKey(f64);

impl TimeKey {
    /// Builds a key, or `None` when the time is NaN.
    ///
    /// `-0.0` and `0.0` map to the same key.
    pub fn new(time: Time) -> Option<Self> {
        let v = time.value();
        if v.is_nan() {
            None
        } else {
            Some(Self(v + 0.0))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn time(&self) -> Time {
        Quantity::new(self.0)
    }
}

impl Eq for TimeKey {}

impl Ord for TimeKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for TimeKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn nan_is_rejected() {
        assert!(TimeKey::new(seconds(f64::NAN)).is_none());
        assert!(TimeKey::new(seconds(0.0)).is_some());
    }

    #[test]
    fn keys_order_like_times() {
        let mut map = BTreeMap::new();
        for t in [30.0, -5.0, 10.0, 0.0] {
            map.insert(TimeKey::new(seconds(t)).unwrap(), t);
        }
        let ordered: Vec<f64> = map.values().copied().collect();
        assert_eq!(ordered, vec![-5.0, 0.0, 10.0, 30.0]);
    }

    #[test]
    fn signed_zeros_share_a_key() {
        let positive = TimeKey::new(seconds(0.0)).unwrap();
        let negative = TimeKey::new(seconds(-0.0)).unwrap();
        assert_eq!(positive.cmp(&negative), std::cmp::Ordering::Equal);

        let mut map = BTreeMap::new();
        map.insert(positive, "first");
        map.insert(negative, "second");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn key_round_trips_time() {
        let key = TimeKey::new(seconds(42.5)).unwrap();
        assert_eq!(key.time().value(), 42.5);
        assert_eq!(key.value(), 42.5);
    }
}
