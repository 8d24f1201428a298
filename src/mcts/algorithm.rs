//! Core anytime MCTS planning loop.
//!
//! The planner grows a single search tree across many host calls: each call
//! to [`MctsPlanner::run_iteration_batch`] executes a bounded batch of
//! Selection → Expansion → Playout → Backpropagation iterations and yields
//! control back to the host, which is how responsiveness is preserved
//! without background threads. Budget enforcement counts iterations only;
//! wall-clock time is recorded purely as a diagnostic.

use crate::mcts::hyperparameters::PlannerHyperparameters;
use crate::mcts::mcts_result::MctsDecision;
use crate::mcts::node::{NodeId, SearchNode};
use crate::mcts::selection;
use crate::model::{WorldAction, WorldModel};
use crate::{PlannerError, Result};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use std::time::{Duration, Instant};

/// Arena index of the episode root.
pub const ROOT: NodeId = 0;

/// Lifecycle of a planning episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeStatus {
    /// No episode initialized yet, or the last one was abandoned.
    NotStarted,
    /// Iterations remain in the budget; the tree accepts further work.
    InProgress,
    /// The budget is spent; batch calls are no-ops returning the decision.
    Completed,
}

/// Anytime MCTS planner for a single searching agent.
///
/// Owns the search tree, the iteration counters and a seedable random
/// generator for playouts. One instance plans for one agent; there is no
/// shared mutable state, so no locking is needed.
pub struct MctsPlanner<M: WorldModel> {
    hyperparams: PlannerHyperparameters,
    rng: StdRng,
    nodes: Vec<SearchNode<M>>,
    status: EpisodeStatus,
    completed_iterations: usize,
    max_selection_depth: usize,
    max_playout_depth: usize,
    total_processing_time: Duration,
}

impl<M: WorldModel> MctsPlanner<M> {
    /// Creates a planner with the given hyperparameters.
    ///
    /// The random generator is seeded from `hyperparams.seed` when present,
    /// from OS entropy otherwise.
    pub fn new(hyperparams: PlannerHyperparameters) -> Self {
        let rng = match hyperparams.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        Self {
            hyperparams,
            rng,
            nodes: Vec::new(),
            status: EpisodeStatus::NotStarted,
            completed_iterations: 0,
            max_selection_depth: 0,
            max_playout_depth: 0,
            total_processing_time: Duration::ZERO,
        }
    }

    /// Starts a fresh planning episode rooted at a clone of `initial`.
    ///
    /// Discards any previous tree and resets every counter. Fails with
    /// [`PlannerError::InvalidState`] while an episode is still in progress
    /// and has not been explicitly abandoned.
    pub fn initialize_episode(&mut self, initial: &M) -> Result<()> {
        if self.status == EpisodeStatus::InProgress {
            return Err(PlannerError::InvalidState(
                "previous episode still in progress; abandon it before starting a new one"
                    .to_string(),
            ));
        }

        let root = self.make_node(initial.clone_for_child(), None, None)?;

        self.nodes.clear();
        self.nodes.push(root);
        self.completed_iterations = 0;
        self.max_selection_depth = 0;
        self.max_playout_depth = 0;
        self.total_processing_time = Duration::ZERO;
        self.status = EpisodeStatus::InProgress;

        log::debug!(
            "planning episode initialized: {}",
            self.hyperparams.to_config_string()
        );
        Ok(())
    }

    /// Coarse cancellation: drops the tree and returns to `NotStarted`.
    pub fn abandon_episode(&mut self) {
        self.nodes.clear();
        self.completed_iterations = 0;
        self.max_selection_depth = 0;
        self.max_playout_depth = 0;
        self.total_processing_time = Duration::ZERO;
        self.status = EpisodeStatus::NotStarted;
    }

    /// Executes up to `max_iterations_per_frame` iterations, stopping early
    /// once the total budget is reached.
    ///
    /// Returns the currently-best first action together with the diagnostic
    /// counters. Once the episode is complete, further calls do no search
    /// work and return the same decision. A terminal root reports
    /// [`PlannerError::NoActionAvailable`] without attempting expansion or
    /// playout, and marks the episode complete so the host can start a new
    /// one directly.
    pub fn run_iteration_batch(&mut self) -> Result<MctsDecision<M::Action>> {
        match self.status {
            EpisodeStatus::NotStarted => {
                return Err(PlannerError::InvalidState(
                    "run_iteration_batch called with no episode initialized".to_string(),
                ))
            }
            EpisodeStatus::Completed => return self.decision(),
            EpisodeStatus::InProgress => {}
        }

        if self.nodes[ROOT].is_terminal() {
            self.status = EpisodeStatus::Completed;
            log::warn!("root state is terminal, nothing to plan");
            return Err(PlannerError::NoActionAvailable);
        }

        let frame_start = Instant::now();
        let mut iterations_this_frame = 0;
        let mut frame_error = None;

        while iterations_this_frame < self.hyperparams.max_iterations_per_frame
            && self.completed_iterations < self.hyperparams.max_iterations
        {
            if let Err(error) = self.run_single_iteration() {
                frame_error = Some(error);
                break;
            }
            self.completed_iterations += 1;
            iterations_this_frame += 1;
        }

        self.total_processing_time += frame_start.elapsed();

        if let Some(error) = frame_error {
            return Err(error);
        }

        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "[Planner] frame={} iters, total={}, sel_depth={}, playout_depth={}",
                iterations_this_frame,
                self.completed_iterations,
                self.max_selection_depth,
                self.max_playout_depth
            );
        }

        if self.completed_iterations >= self.hyperparams.max_iterations {
            self.status = EpisodeStatus::Completed;
            log::debug!(
                "search complete after {} iterations in {:?}",
                self.completed_iterations,
                self.total_processing_time
            );
        }

        self.decision()
    }

    /// Best-known root-to-leaf action path, recomputed on demand.
    ///
    /// Walks best children by average value from the root until a leaf or a
    /// terminal node. Derived from the current tree rather than accumulated
    /// during exploration, so later iterations that revise earlier estimates
    /// are always reflected.
    pub fn best_action_sequence(&self) -> Vec<M::Action> {
        let mut sequence = Vec::new();
        if self.nodes.is_empty() {
            return sequence;
        }

        let mut current = ROOT;
        while let Some(child_id) = selection::best_child(&self.nodes, current) {
            if let Some(action) = self.nodes[child_id].incoming_action.clone() {
                sequence.push(action);
            }
            if self.nodes[child_id].is_terminal() {
                break;
            }
            current = child_id;
        }
        sequence
    }

    /// Current episode lifecycle state.
    pub fn status(&self) -> EpisodeStatus {
        self.status
    }

    /// True while budget remains in the current episode.
    pub fn in_progress(&self) -> bool {
        self.status == EpisodeStatus::InProgress
    }

    /// Iterations completed since the episode started.
    pub fn completed_iterations(&self) -> usize {
        self.completed_iterations
    }

    /// Deepest tree descent reached across all iterations.
    pub fn max_selection_depth_reached(&self) -> usize {
        self.max_selection_depth
    }

    /// Longest random rollout reached across all iterations.
    pub fn max_playout_depth_reached(&self) -> usize {
        self.max_playout_depth
    }

    /// Wall-clock time spent inside `run_iteration_batch`.
    pub fn total_processing_time(&self) -> Duration {
        self.total_processing_time
    }

    /// Read-only view of the search tree, for debugging and visualization.
    pub fn nodes(&self) -> &[SearchNode<M>] {
        &self.nodes
    }

    /// Hyperparameters this planner was built with.
    pub fn hyperparameters(&self) -> &PlannerHyperparameters {
        &self.hyperparams
    }

    fn run_single_iteration(&mut self) -> Result<()> {
        let selected = self.select_and_expand()?;
        let reward = self.playout(selected)?;
        self.backpropagate(selected, reward);
        Ok(())
    }

    /// Tree descent: expand the first untried action along the way, or
    /// follow UCT through fully expanded nodes until a terminal one.
    fn select_and_expand(&mut self) -> Result<NodeId> {
        let mut current = ROOT;
        let mut depth = 0;

        loop {
            if self.nodes[current].is_terminal() {
                break;
            }

            if let Some(action) = self.nodes[current].next_untried_action().cloned() {
                depth += 1;
                current = self.expand(current, action)?;
                break;
            }

            match selection::best_uct_child(
                &self.nodes,
                current,
                self.hyperparams.exploration_constant,
            ) {
                Some(next) => {
                    depth += 1;
                    current = next;
                }
                None => break,
            }
        }

        if depth > self.max_selection_depth {
            self.max_selection_depth = depth;
        }

        Ok(current)
    }

    /// Clones the parent's state, applies `action` to the clone and attaches
    /// the resulting child. The parent's own snapshot is never touched.
    fn expand(&mut self, parent: NodeId, action: M::Action) -> Result<NodeId> {
        let mut child_state = self.nodes[parent].state.clone_for_child();
        action.apply_effects(&mut child_state);

        let child = self.make_node(child_state, Some(action), Some(parent))?;
        let child_id = self.nodes.len();
        self.nodes.push(child);
        self.nodes[parent].children.push(child_id);
        Ok(child_id)
    }

    /// Random rollout from the selected node to a terminal state.
    ///
    /// Works on an independent clone that is discarded after scoring; the
    /// tree never retains rollout states.
    fn playout(&mut self, selected: NodeId) -> Result<f64> {
        let mut rollout = self.nodes[selected].state.clone_for_child();
        let mut depth = 0;

        while !rollout.is_terminal() {
            let actions = rollout.executable_actions();
            if actions.is_empty() {
                return Err(PlannerError::MalformedCollaborator(
                    "rollout state reports non-terminal but lists no executable actions"
                        .to_string(),
                ));
            }
            let index = self.rng.random_range(0..actions.len());
            actions[index].apply_effects(&mut rollout);
            depth += 1;
        }

        if depth > self.max_playout_depth {
            self.max_playout_depth = depth;
        }

        Ok(rollout.score())
    }

    /// Walks the parent chain from the selected node to the root inclusive,
    /// adding the reward at every node. The only mutation path for the
    /// visit/reward statistics.
    fn backpropagate(&mut self, selected: NodeId, reward: f64) {
        let mut current = Some(selected);
        while let Some(node_id) = current {
            let node = &mut self.nodes[node_id];
            node.visit_count += 1;
            node.total_value += reward;
            current = node.parent;
        }
    }

    fn make_node(
        &self,
        state: M,
        incoming_action: Option<M::Action>,
        parent: Option<NodeId>,
    ) -> Result<SearchNode<M>> {
        let node = SearchNode::new(state, incoming_action, parent);
        if !node.is_terminal() && node.actions.is_empty() {
            return Err(PlannerError::MalformedCollaborator(
                "state reports non-terminal but lists no executable actions".to_string(),
            ));
        }
        Ok(node)
    }

    fn decision(&self) -> Result<MctsDecision<M::Action>> {
        let best =
            selection::best_child(&self.nodes, ROOT).ok_or(PlannerError::NoActionAvailable)?;
        let best_action = self.nodes[best]
            .incoming_action
            .clone()
            .ok_or(PlannerError::NoActionAvailable)?;

        Ok(MctsDecision {
            best_action,
            completed_iterations: self.completed_iterations,
            search_complete: self.status == EpisodeStatus::Completed,
            max_selection_depth_reached: self.max_selection_depth,
            max_playout_depth_reached: self.max_playout_depth,
            total_processing_time: self.total_processing_time,
        })
    }
}
