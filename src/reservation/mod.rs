//! Time-interval reservations of discrete waypoints.
//!
//! A [`ReservationSystem`] grants a participant exclusive occupancy of one
//! waypoint for `[time, time + duration)`, or for `[time, +inf)` when no
//! duration is given. Requests name several candidate waypoints in order of
//! preference; the first free one is reserved.
//!
//! # Example
//!
//! ```
//! use fleetcore::reservation::ReservationSystem;
//! use fleetcore::time::seconds;
//!
//! let system = ReservationSystem::new();
//!
//! // Participant 1 holds waypoint 7 for [0, 10).
//! let a = system.reserve(1, seconds(0.0), &[7], Some(seconds(10.0))).unwrap().unwrap();
//!
//! // Participant 2 cannot overlap it on 7 and falls through to waypoint 8.
//! let b = system.reserve(2, seconds(5.0), &[7, 8], Some(seconds(10.0))).unwrap().unwrap();
//! assert_eq!(b.waypoint(), 8);
//!
//! // Back-to-back is fine.
//! let c = system.reserve(2, seconds(10.0), &[7], Some(seconds(10.0))).unwrap();
//! assert!(c.is_some());
//!
//! system.cancel_reservation(a.reservation_id()).unwrap();
//! assert!(system.reserve(3, seconds(0.0), &[7], Some(seconds(5.0))).unwrap().is_some());
//! ```

mod errors;
mod ledger;
mod reservation;


pub use errors::ReservationError;
pub use reservation::Reservation;

use ledger::Ledger;
use parking_lot::Mutex;

use crate::time::{Duration, Time, TimeKey};
use crate::{ParticipantId, WaypointId};

/// Unique, monotonically increasing reservation identifier.
pub type ReservationId = u64;

/// Manages reservations of waypoints.
///
/// Every operation runs under one exclusive lock over the whole ledger, so
/// the freeness check and the commit in [`reserve`](Self::reserve) are atomic
/// with respect to other reservers: two participants can never both be granted
/// the same slot.
#[derive(Debug, Default)]
pub struct ReservationSystem {
    ledger: Mutex<Ledger>,
}

impl ReservationSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the first free waypoint among `candidates` for `participant`.
    ///
    /// # Arguments
    ///
    /// * `participant` - The participant making the reservation
    /// * `time` - When the occupancy begins
    /// * `candidates` - Waypoints to try, in order of preference
    /// * `duration` - How long the waypoint is held; `None` holds it indefinitely
    ///
    /// # Returns
    ///
    /// `Ok(None)` if no candidate is free. On success the reservation is already
    /// committed when it is returned.
    pub fn reserve(
        &self,
        participant: ParticipantId,
        time: Time,
        candidates: &[WaypointId],
        duration: Option<Duration>,
    ) -> Result<Option<Reservation>, ReservationError> {
        let start = TimeKey::new(time).ok_or(ReservationError::NaNTime)?;
        validate_duration(duration)?;

        let mut ledger = self.ledger.lock();
        for &waypoint in candidates {
            if ledger.is_free(waypoint, start, duration) {
                let reservation = ledger.insert(participant, start, waypoint, duration);
                tracing::debug!(
                    reservation = reservation.reservation_id(),
                    participant,
                    waypoint,
                    time = time.value(),
                    duration = ?duration.map(|d| d.value()),
                    "Granted waypoint reservation"
                );
                return Ok(Some(reservation));
            }
        }

        tracing::debug!(
            participant,
            ?candidates,
            time = time.value(),
            "No candidate waypoint is free"
        );
        Ok(None)
    }

    /// Cancels a reservation, freeing its interval for new requests.
    ///
    /// # Errors
    ///
    /// [`ReservationError::NotFound`] if no such reservation exists; the ledger
    /// is left unchanged.
    pub fn cancel_reservation(
        &self,
        reservation_id: ReservationId,
    ) -> Result<Reservation, ReservationError> {
        let removed = self.ledger.lock().remove(reservation_id)?;
        tracing::debug!(
            reservation = reservation_id,
            waypoint = removed.waypoint(),
            "Cancelled waypoint reservation"
        );
        Ok(removed)
    }

    /// Returns true if `waypoint` could be reserved at `time` right now.
    ///
    /// The answer may be stale as soon as the lock is released; use
    /// [`reserve`](Self::reserve) to claim a slot.
    pub fn is_free(
        &self,
        waypoint: WaypointId,
        time: Time,
        duration: Option<Duration>,
    ) -> Result<bool, ReservationError> {
        let start = TimeKey::new(time).ok_or(ReservationError::NaNTime)?;
        validate_duration(duration)?;
        Ok(self.ledger.lock().is_free(waypoint, start, duration))
    }

    pub fn get(&self, reservation_id: ReservationId) -> Option<Reservation> {
        self.ledger.lock().get(reservation_id).copied()
    }

    /// Snapshot of the reservations on `waypoint`, in start time order.
    pub fn reservations_at(&self, waypoint: WaypointId) -> Vec<Reservation> {
        self.ledger.lock().at(waypoint).copied().collect()
    }

    pub fn len(&self) -> usize {
        self.ledger.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate_duration(duration: Option<Duration>) -> Result<(), ReservationError> {
    match duration {
        Some(d) if d.value().is_nan() => Err(ReservationError::NaNTime),
        Some(d) if d.value() < 0.0 => Err(ReservationError::NegativeDuration(d.value())),
        _ => Ok(()),
    }
}
