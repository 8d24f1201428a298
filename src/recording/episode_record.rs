//! Episode recording data structures for planner diagnostics.
//!
//! This module defines the structures used to record planning episodes
//! for later offline analysis of search behavior and budget tuning.

use serde::{Deserialize, Serialize};

/// Record of a single planner decision within an episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Decision index within the episode (0-based)
    pub step: usize,
    /// Label of the action the planner chose
    pub chosen_action: String,
    /// Iterations the planner had completed when the decision was taken
    pub completed_iterations: usize,
    /// Deepest tree descent reached during the search
    pub max_selection_depth: usize,
    /// Longest random rollout reached during the search
    pub max_playout_depth: usize,
    /// Wall-clock time spent searching, in milliseconds
    pub processing_time_ms: f64,
    /// Timestamp of the decision
    pub timestamp: i64,
}

/// Complete record of a planning episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Unique episode identifier
    pub episode_id: String,
    /// Episode start timestamp
    pub timestamp: i64,
    /// All decisions taken during the episode
    pub decisions: Vec<DecisionRecord>,
    /// Final world score once the episode ended, if known
    pub final_score: Option<f64>,
}

impl EpisodeRecord {
    /// Create a new empty episode record
    pub fn new(episode_id: String) -> Self {
        Self {
            episode_id,
            timestamp: chrono::Utc::now().timestamp(),
            decisions: Vec::new(),
            final_score: None,
        }
    }

    /// Record a decision
    pub fn record_decision(&mut self, decision: DecisionRecord) {
        self.decisions.push(decision);
    }

    /// Finalize the episode with the world's final score
    pub fn finalize(&mut self, final_score: f64) {
        self.final_score = Some(final_score);
    }

    /// Number of decisions recorded so far
    pub fn decision_count(&self) -> usize {
        self.decisions.len()
    }
}
