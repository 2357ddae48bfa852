//! Branch-and-bound pruning policy for a search over candidate plans.
//!
//! An external search refines several candidate plans in parallel. Each time a
//! candidate reports back, [`ProgressEvaluator::evaluate`] decides whether it
//! may keep expanding (and how far) or should be abandoned:
//!
//! 1. **Drop-dead cost**: every candidate has its own ceiling,
//!    `compliant_leeway_multiplier * initial_estimate + compliant_leeway_base`.
//!    A candidate whose cost reaches it is abandoned.
//! 2. **No complete plan yet**: the candidate gets a fresh budget of
//!    `estimate_leeway * cost`, capped by its ceiling.
//! 3. **A complete plan exists**: the candidate continues only while it still
//!    beats that plan, and may not expand past its cost.
//!
//! The bookkeeping slots only ever tighten during one session; start a new
//! session by building a new evaluator.

mod config;
mod progress;

pub use config::ProgressEvaluatorConfig;
pub use progress::{CandidateId, PlanProgress, Progress};

/// Running bookkeeping for one search session.
#[derive(Debug, Clone, Default)]
pub struct ProgressEvaluator {
    config: ProgressEvaluatorConfig,
    best_estimate: Progress,
    second_best_estimate: Progress,
    best_result: Progress,
    best_discarded: Progress,
    finished_count: usize,
}

impl ProgressEvaluator {
    pub fn new(config: ProgressEvaluatorConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &ProgressEvaluatorConfig {
        &self.config
    }

    /// Registers a candidate before its first expansion.
    ///
    /// Returns false if the candidate has no cost estimate; such a candidate
    /// cannot take part in pruning.
    pub fn initialize<P: PlanProgress + ?Sized>(&mut self, setup: &P) -> bool {
        let Some(cost) = setup.cost_estimate() else {
            return false;
        };

        if cost < self.best_estimate.cost {
            self.best_estimate = Progress::new(cost, setup.candidate_id());
        }
        true
    }

    /// Decides whether `progress` should keep expanding.
    ///
    /// On `true` the candidate's maximum cost estimate has been updated with
    /// the budget for its next round. On `false` it is counted as finished.
    pub fn evaluate<P: PlanProgress + ?Sized>(&mut self, progress: &mut P) -> bool {
        let id = progress.candidate_id();
        let succeeded = progress.success();
        let cost = if succeeded {
            progress.cost()
        } else {
            progress.cost_estimate()
        };

        let Some(cost) = cost else {
            // Nothing left to expand and no answer.
            self.finished_count += 1;
            tracing::trace!(candidate = id, "Candidate exhausted without a plan");
            return false;
        };

        if succeeded && cost < self.best_result.cost {
            self.best_result = Progress::new(cost, id);
        }

        if cost < self.second_best_estimate.cost {
            self.second_best_estimate = Progress::new(cost, id);
        }

        if self.best_estimate.candidate == Some(id) {
            self.promote_second_best();
        }

        let dropdead_cost = self.config.compliant_leeway_multiplier
            * progress.initial_cost_estimate()
            + self.config.compliant_leeway_base;

        let give_up = dropdead_cost <= cost;
        if !succeeded && !give_up {
            if self.best_result.is_empty() {
                let limit = (self.config.estimate_leeway * cost).min(dropdead_cost);
                progress.set_maximum_cost_estimate(limit);
                tracing::trace!(candidate = id, cost, limit, dropdead_cost, "Extending candidate");
                return true;
            }

            if cost < self.best_result.cost {
                let limit = self.best_result.cost.min(dropdead_cost);
                progress.set_maximum_cost_estimate(limit);
                tracing::trace!(
                    candidate = id,
                    cost,
                    limit,
                    best = self.best_result.cost,
                    "Candidate still beats best result"
                );
                return true;
            }
        }

        self.finished_count += 1;
        tracing::debug!(candidate = id, cost, succeeded, give_up, "Candidate finished");
        false
    }

    /// Records a candidate abandoned for reasons other than cost.
    pub fn discard<P: PlanProgress + ?Sized>(&mut self, progress: &P) {
        let id = progress.candidate_id();
        if self.best_estimate.candidate == Some(id) {
            self.promote_second_best();
        }

        let cost = progress.cost_estimate().unwrap_or(f64::INFINITY);
        if self.best_discarded.is_empty() || cost < self.best_discarded.cost {
            self.best_discarded = Progress::new(cost, id);
        }

        self.finished_count += 1;
        tracing::debug!(candidate = id, cost, "Candidate discarded");
    }

    /// Cheapest complete plan seen so far.
    pub fn best_result(&self) -> Progress {
        self.best_result
    }

    /// Lowest live lower-bound estimate.
    pub fn best_estimate(&self) -> Progress {
        self.best_estimate
    }

    /// Runner-up estimate, promoted when the best-estimate holder reports back.
    pub fn second_best_estimate(&self) -> Progress {
        self.second_best_estimate
    }

    /// Cheapest estimate among discarded candidates.
    pub fn best_discarded(&self) -> Progress {
        self.best_discarded
    }

    /// Candidates that have been abandoned, exhausted, or have succeeded.
    pub fn finished_count(&self) -> usize {
        self.finished_count
    }

    fn promote_second_best(&mut self) {
        self.best_estimate = self.second_best_estimate;
        self.second_best_estimate = Progress::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    struct Candidate {
        id: CandidateId,
        success: bool,
        cost: Option<f64>,
        estimate: Option<f64>,
        initial: f64,
        maximum: Option<f64>,
    }

    impl Candidate {
        fn searching(id: CandidateId, initial: f64) -> Self {
            Self {
                id,
                success: false,
                cost: None,
                estimate: Some(initial),
                initial,
                maximum: None,
            }
        }

        fn estimate(mut self, estimate: f64) -> Self {
            self.estimate = Some(estimate);
            self
        }

        fn succeed(mut self, cost: f64) -> Self {
            self.success = true;
            self.cost = Some(cost);
            self
        }

        fn exhaust(mut self) -> Self {
            self.estimate = None;
            self
        }
    }

    impl PlanProgress for Candidate {
        fn candidate_id(&self) -> CandidateId {
            self.id
        }

        fn success(&self) -> bool {
            self.success
        }

        fn cost(&self) -> Option<f64> {
            self.cost
        }

        fn cost_estimate(&self) -> Option<f64> {
            self.estimate
        }

        fn initial_cost_estimate(&self) -> f64 {
            self.initial
        }

        fn set_maximum_cost_estimate(&mut self, limit: f64) {
            self.maximum = Some(limit);
        }
    }

    fn evaluator() -> ProgressEvaluator {
        ProgressEvaluator::new(ProgressEvaluatorConfig {
            compliant_leeway_base: 10.0,
            compliant_leeway_multiplier: 2.0,
            estimate_leeway: 1.5,
        })
    }

    #[test]
    fn initialize_tracks_best_estimate() {
        let mut eval = evaluator();
        assert!(eval.initialize(&Candidate::searching(1, 30.0)));
        assert!(eval.initialize(&Candidate::searching(2, 20.0)));
        assert!(eval.initialize(&Candidate::searching(3, 25.0)));

        assert_eq!(eval.best_estimate(), Progress::new(20.0, 2));
    }

    #[test]
    fn initialize_without_estimate_fails() {
        let mut eval = evaluator();
        assert!(!eval.initialize(&Candidate::searching(1, 30.0).exhaust()));
        assert!(eval.best_estimate().is_empty());
    }

    #[test]
    fn exhausted_candidate_is_abandoned() {
        let mut eval = evaluator();
        let mut c = Candidate::searching(1, 10.0).exhaust();
        assert!(!eval.evaluate(&mut c));
        assert_eq!(eval.finished_count(), 1);
        assert!(c.maximum.is_none());
    }

    #[test]
    fn fresh_budget_without_result() {
        let mut eval = evaluator();
        // drop-dead = 2 * 10 + 10 = 30
        let mut c = Candidate::searching(1, 10.0).estimate(12.0);
        assert!(eval.evaluate(&mut c));
        assert_eq!(c.maximum, Some(18.0));

        // 1.5 * 25 = 37.5 is capped by the drop-dead cost
        let mut c = Candidate::searching(2, 10.0).estimate(25.0);
        assert!(eval.evaluate(&mut c));
        assert_eq!(c.maximum, Some(30.0));
        assert_eq!(eval.finished_count(), 0);
    }

    #[test]
    fn dropdead_cost_abandons() {
        let mut eval = evaluator();
        let mut c = Candidate::searching(1, 10.0).estimate(30.0);
        assert!(!eval.evaluate(&mut c));
        assert_eq!(eval.finished_count(), 1);
    }

    #[test]
    fn dropdead_cost_is_per_candidate() {
        let mut eval = evaluator();
        // Same estimate, different starting points.
        let mut cheap_start = Candidate::searching(1, 5.0).estimate(25.0);
        let mut dear_start = Candidate::searching(2, 20.0).estimate(25.0);
        assert!(!eval.evaluate(&mut cheap_start));
        assert!(eval.evaluate(&mut dear_start));
    }

    #[test]
    fn success_is_recorded_and_finished() {
        let mut eval = evaluator();
        let mut c = Candidate::searching(1, 10.0).succeed(14.0);
        assert!(!eval.evaluate(&mut c));
        assert_eq!(eval.best_result(), Progress::new(14.0, 1));
        assert_eq!(eval.finished_count(), 1);
    }

    #[test]
    fn result_caps_budget_of_cheaper_candidates() {
        let mut eval = evaluator();
        eval.evaluate(&mut Candidate::searching(1, 10.0).succeed(20.0));

        let mut c = Candidate::searching(2, 10.0).estimate(15.0);
        assert!(eval.evaluate(&mut c));
        assert_eq!(c.maximum, Some(20.0));
    }

    #[test]
    fn result_dominates_dearer_candidates() {
        let mut eval = evaluator();
        eval.evaluate(&mut Candidate::searching(1, 10.0).succeed(20.0));

        let mut c = Candidate::searching(2, 10.0).estimate(20.0);
        assert!(!eval.evaluate(&mut c));
        assert_eq!(eval.finished_count(), 2);
    }

    #[test]
    fn best_estimate_holder_promotes_runner_up() {
        let mut eval = evaluator();
        eval.initialize(&Candidate::searching(1, 10.0));
        eval.initialize(&Candidate::searching(2, 12.0));

        let mut other = Candidate::searching(2, 12.0).estimate(13.0);
        eval.evaluate(&mut other);
        assert_eq!(eval.second_best_estimate(), Progress::new(13.0, 2));

        let mut holder = Candidate::searching(1, 10.0).estimate(15.0);
        eval.evaluate(&mut holder);
        assert_eq!(eval.best_estimate(), Progress::new(13.0, 2));
        assert!(eval.second_best_estimate().is_empty());
    }

    #[test]
    fn discard_tracks_cheapest_and_counts() {
        let mut eval = evaluator();
        eval.initialize(&Candidate::searching(1, 10.0));

        eval.discard(&Candidate::searching(1, 10.0).estimate(11.0));
        assert!(eval.best_estimate().is_empty());
        assert_eq!(eval.best_discarded(), Progress::new(11.0, 1));

        eval.discard(&Candidate::searching(2, 10.0).exhaust());
        assert_eq!(eval.best_discarded(), Progress::new(11.0, 1));

        eval.discard(&Candidate::searching(3, 10.0).estimate(4.0));
        assert_eq!(eval.best_discarded(), Progress::new(4.0, 3));
        assert_eq!(eval.finished_count(), 3);
    }

    #[test]
    fn discard_without_estimate_is_infinite() {
        let mut eval = evaluator();
        eval.discard(&Candidate::searching(7, 10.0).exhaust());
        assert_eq!(eval.best_discarded(), Progress::new(f64::INFINITY, 7));
    }

    fn arb_report() -> impl Strategy<Value = (CandidateId, f64, f64, u8)> {
        (0u64..6, 1.0f64..50.0, 0.0f64..80.0, 0u8..4)
    }

    proptest! {
        /// Never extends a candidate at or past its drop-dead cost, and the
        /// best result only ever gets cheaper.
        #[test]
        fn pruning_respects_ceiling_and_best_result_tightens(
            reports in prop::collection::vec(arb_report(), 1..60)
        ) {
            let mut eval = evaluator();
            let mut last_best = f64::INFINITY;

            for (id, initial, value, kind) in reports {
                let mut c = match kind {
                    0 => Candidate::searching(id, initial).succeed(value),
                    1 => Candidate::searching(id, initial).exhaust(),
                    _ => Candidate::searching(id, initial).estimate(value),
                };
                let dropdead = 2.0 * initial + 10.0;
                let keep = eval.evaluate(&mut c);

                if keep {
                    prop_assert!(value < dropdead);
                    let limit = c.maximum.unwrap();
                    prop_assert!(limit <= dropdead);
                }
                prop_assert!(eval.best_result().cost <= last_best);
                last_best = eval.best_result().cost;
            }
        }
    }
}
