//! Immutable record of a granted waypoint reservation.

use std::fmt::Display;

use super::ReservationId;
use crate::time::{Duration, Time};
use crate::{ParticipantId, WaypointId};

/// Occupancy of one waypoint by one participant, starting at `time`.
///
/// A reservation without a duration occupies the waypoint indefinitely from
/// `time` onward (e.g. a robot parking). Reservations are only created by the
/// [`ReservationSystem`](super::ReservationSystem); the id is unique for the
/// lifetime of that system.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reservation {
    id: ReservationId,
    waypoint: WaypointId,
    participant: ParticipantId,
    time: Time,
    duration: Option<Duration>,
}

impl Reservation {
    pub(crate) fn new(
        id: ReservationId,
        waypoint: WaypointId,
        participant: ParticipantId,
        time: Time,
        duration: Option<Duration>,
    ) -> Self {
        Self {
            id,
            waypoint,
            participant,
            time,
            duration,
        }
    }

    pub fn reservation_id(&self) -> ReservationId {
        self.id
    }

    pub fn waypoint(&self) -> WaypointId {
        self.waypoint
    }

    /// The participant on whose behalf the reservation was made.
    pub fn participant_id(&self) -> ParticipantId {
        self.participant
    }

    pub fn time(&self) -> Time {
        self.time
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// End of the occupied interval `[time, end)`; `None` when indefinite.
    pub fn end(&self) -> Option<Time> {
        self.duration.map(|d| self.time + d)
    }

    /// Returns true if this reservation's half-open interval shares any
    /// instant with `other`'s.
    pub fn overlaps(&self, other: &Reservation) -> bool {
        let starts_before_other_ends = other
            .end()
            .map_or(true, |end| self.time.value() < end.value());
        let other_starts_before_end = self
            .end()
            .map_or(true, |end| other.time.value() < end.value());
        starts_before_other_ends && other_starts_before_end
    }
}

impl Display for Reservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.end() {
            Some(end) => write!(
                f,
                "#{} waypoint {} by {} [{:.3}, {:.3})",
                self.id,
                self.waypoint,
                self.participant,
                self.time.value(),
                end.value()
            ),
            None => write!(
                f,
                "#{} waypoint {} by {} [{:.3}, inf)",
                self.id,
                self.waypoint,
                self.participant,
                self.time.value()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::seconds;

    fn r(id: ReservationId, start: f64, duration: Option<f64>) -> Reservation {
        Reservation::new(id, 0, 1, seconds(start), duration.map(seconds))
    }

    #[test]
    fn end_of_bounded_and_indefinite() {
        assert_eq!(r(0, 5.0, Some(10.0)).end().map(|t| t.value()), Some(15.0));
        assert!(r(0, 5.0, None).end().is_none());
    }

    #[test]
    fn adjacent_reservations_do_not_overlap() {
        assert!(!r(0, 0.0, Some(10.0)).overlaps(&r(1, 10.0, Some(10.0))));
        assert!(!r(1, 10.0, Some(10.0)).overlaps(&r(0, 0.0, Some(10.0))));
    }

    #[test]
    fn indefinite_overlaps_everything_after_it() {
        let parked = r(0, 20.0, None);
        assert!(parked.overlaps(&r(1, 100.0, Some(1.0))));
        assert!(parked.overlaps(&r(2, 15.0, Some(10.0))));
        assert!(!parked.overlaps(&r(3, 10.0, Some(10.0))));
    }

    #[test]
    fn display_mentions_interval() {
        assert_eq!(
            r(3, 1.0, Some(2.0)).to_string(),
            "#3 waypoint 0 by 1 [1.000, 3.000)"
        );
        assert!(r(4, 1.0, None).to_string().ends_with("inf)"));
    }
}
