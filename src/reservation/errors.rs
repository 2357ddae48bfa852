use thiserror::Error;

use super::ReservationId;

/// Errors surfaced by the [`ReservationSystem`](super::ReservationSystem).
///
/// A request for which no candidate waypoint is free is not an error; it is
/// reported as `Ok(None)` by [`reserve`](super::ReservationSystem::reserve).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReservationError {
    /// No reservation with this id exists (never granted, or already cancelled).
    #[error("Could not find reservation with id {0}")]
    NotFound(ReservationId),

    /// A time value was NaN, which is not allowed
    #[error("Time value cannot be NaN")]
    NaNTime,

    #[error("Reservation duration cannot be negative: {0}s")]
    NegativeDuration(f64),
}
