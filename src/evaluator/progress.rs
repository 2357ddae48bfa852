//! The view of a search candidate the evaluator needs.

/// Identity of one candidate within an evaluation session.
pub type CandidateId = u64;

/// A candidate plan being refined by an external search.
///
/// # Invariants
///
/// - `candidate_id()` is stable for the candidate's lifetime and unique within
///   one [`ProgressEvaluator`](super::ProgressEvaluator) session
/// - `cost()` is `Some` whenever `success()` is true
/// - `cost_estimate()` is a lower bound on the cost the candidate can still reach
pub trait PlanProgress {
    fn candidate_id(&self) -> CandidateId;

    /// Returns true once the candidate has produced a complete plan.
    fn success(&self) -> bool;

    /// Actual cost of the complete plan.
    fn cost(&self) -> Option<f64>;

    /// Current lower-bound estimate; `None` when the search has nothing left
    /// to expand.
    fn cost_estimate(&self) -> Option<f64>;

    /// The estimate the candidate started from.
    fn initial_cost_estimate(&self) -> f64;

    /// Caps how far the search may expand before reporting back.
    fn set_maximum_cost_estimate(&mut self, limit: f64);
}

/// One bookkeeping slot: a cost and the candidate holding it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub cost: f64,
    pub candidate: Option<CandidateId>,
}

impl Progress {
    pub fn new(cost: f64, candidate: CandidateId) -> Self {
        Self {
            cost,
            candidate: Some(candidate),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidate.is_none()
    }
}

impl Default for Progress {
    /// An empty slot that any finite cost beats.
    fn default() -> Self {
        Self {
            cost: f64::INFINITY,
            candidate: None,
        }
    }
}
