//! Per-waypoint, time-ordered reservation book.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound::{Excluded, Unbounded};

use super::errors::ReservationError;
use super::reservation::Reservation;
use super::ReservationId;
use crate::time::{Duration, TimeKey};
use crate::{ParticipantId, WaypointId};

/// Reservations of every waypoint, sorted by start time.
///
/// # Internal Structure
/// - `schedule`: waypoint → `BTreeMap` from start time to reservation
/// - `location_by_id`: reservation id → `(start, waypoint)`
///
/// # Invariants
/// - Within one waypoint, no two reservations have overlapping `[start, end)`
///   intervals; an indefinite reservation extends to `+inf`.
/// - Every reservation in `schedule` has exactly one entry in `location_by_id`.
///
/// Not synchronized; the owning [`ReservationSystem`](super::ReservationSystem)
/// holds it behind a lock.
#[derive(Debug, Default)]
pub(crate) struct Ledger {
    next_id: ReservationId,
    schedule: HashMap<WaypointId, BTreeMap<TimeKey, Reservation>>,
    location_by_id: HashMap<ReservationId, (TimeKey, WaypointId)>,
}

impl Ledger {
    /// Returns true if `[start, start + duration)` (or `[start, +inf)` when
    /// `duration` is `None`) touches no reservation on `waypoint`.
    ///
    /// Only the neighbours of `start` need checking because the book is kept
    /// non-overlapping and sorted by start time:
    /// - the first reservation starting strictly after `start` must not start
    ///   before `end` (for an indefinite request it must not exist at all)
    /// - the last reservation starting at or before `start` must be bounded
    ///   and end no later than `start`
    ///
    /// Back-to-back intervals (`end == next.start`) do not conflict.
    pub fn is_free(
        &self,
        waypoint: WaypointId,
        start: TimeKey,
        duration: Option<Duration>,
    ) -> bool {
        let Some(slots) = self.schedule.get(&waypoint) else {
            return true;
        };

        let next_after_start = slots.range((Excluded(start), Unbounded)).next().map(|(k, _)| *k);

        match duration {
            Some(duration) => {
                let Some(end) = TimeKey::new(start.time() + duration) else {
                    return false;
                };
                let next_from_end = slots.range(end..).next().map(|(k, _)| *k);
                if next_after_start != next_from_end {
                    // Some reservation begins inside (start, end).
                    return false;
                }
            }
            None => {
                if next_after_start.is_some() {
                    return false;
                }
            }
        }

        match slots.range(..=start).next_back() {
            None => true,
            // A reservation sharing our start key always conflicts, even a
            // zero-length one: the book holds one entry per start time.
            Some((key, _)) if *key == start => false,
            Some((_, previous)) => previous
                .end()
                .is_some_and(|end| end.value() <= start.value()),
        }
    }

    /// Commits a reservation without checking freeness; callers check first.
    pub fn insert(
        &mut self,
        participant: ParticipantId,
        start: TimeKey,
        waypoint: WaypointId,
        duration: Option<Duration>,
    ) -> Reservation {
        let id = self.next_id;
        self.next_id += 1;

        let reservation = Reservation::new(id, waypoint, participant, start.time(), duration);
        self.schedule
            .entry(waypoint)
            .or_default()
            .insert(start, reservation);
        self.location_by_id.insert(id, (start, waypoint));
        reservation
    }

    /// Removes a reservation from its waypoint book and the id index.
    pub fn remove(&mut self, id: ReservationId) -> Result<Reservation, ReservationError> {
        let (start, waypoint) = self
            .location_by_id
            .remove(&id)
            .ok_or(ReservationError::NotFound(id))?;

        let slots = self
            .schedule
            .get_mut(&waypoint)
            .ok_or(ReservationError::NotFound(id))?;
        let reservation = slots.remove(&start).ok_or(ReservationError::NotFound(id))?;
        if slots.is_empty() {
            self.schedule.remove(&waypoint);
        }
        Ok(reservation)
    }

    pub fn get(&self, id: ReservationId) -> Option<&Reservation> {
        let (start, waypoint) = self.location_by_id.get(&id)?;
        self.schedule.get(waypoint)?.get(start)
    }

    /// Reservations on `waypoint` in start time order.
    pub fn at(&self, waypoint: WaypointId) -> impl Iterator<Item = &Reservation> + '_ {
        self.schedule
            .get(&waypoint)
            .into_iter()
            .flat_map(|slots| slots.values())
    }

    pub fn len(&self) -> usize {
        self.location_by_id.len()
    }
}
