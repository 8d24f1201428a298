//! # Anytime MCTS Planner Library
//!
//! A Monte Carlo Tree Search planner for real-time game agents, computed
//! incrementally across frames under a hard iteration budget.
//!
//! ## Features
//!
//! - **Search Core**: UCT-guided Selection, Expansion, Playout and Backpropagation
//! - **Frame Budgeting**: bounded iteration batches per host call, no background threads
//! - **World Model Seam**: abstract collaborator traits, no game rules in the core
//! - **Diagnostics**: depth high-water marks, wall-clock accounting, episode recording
//!
//! ## Usage
//!
//! ```rust,ignore
//! use anytime_mcts::{
//!     mcts::{MctsPlanner, PlannerHyperparameters},
//!     model::WorldModel,
//! };
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Monte Carlo Tree Search planning engine
pub mod mcts;

/// World-model and action collaborator contracts
pub mod model;

/// Episode diagnostics recording
pub mod recording;

/// Logging bootstrap for host binaries
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

/// Planner engine exports
pub use mcts::*;

/// Collaborator trait exports
pub use model::*;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the anytime MCTS library
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// A planner operation was called in the wrong episode state.
    #[error("invalid planner state: {0}")]
    InvalidState(String),

    /// The root offers no children to choose from: either the root state is
    /// already terminal or the budget ran out before any expansion.
    #[error("no action available from the current root")]
    NoActionAvailable,

    /// A world model reported non-terminal but returned zero executable
    /// actions, which would otherwise loop forever during playout.
    #[error("malformed world model: {0}")]
    MalformedCollaborator(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PlannerError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
