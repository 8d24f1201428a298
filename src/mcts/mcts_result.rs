use std::time::Duration;

/// Snapshot returned to the host after each iteration batch.
///
/// Carries the currently-best first action together with the diagnostic
/// counters accumulated since the episode started. Counters are informative
/// only; budget enforcement is purely iteration-based.
#[derive(Debug, Clone)]
pub struct MctsDecision<A> {
    /// Best first action found so far, by average reward at the root.
    pub best_action: A,

    /// Iterations completed since the episode was initialized.
    pub completed_iterations: usize,

    /// True once the total iteration budget has been spent.
    pub search_complete: bool,

    /// Deepest tree descent reached across all iterations.
    pub max_selection_depth_reached: usize,

    /// Longest random rollout reached across all iterations.
    pub max_playout_depth_reached: usize,

    /// Wall-clock time spent inside `run_iteration_batch` so far.
    pub total_processing_time: Duration,
}
