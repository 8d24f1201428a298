pub mod algorithm;
pub mod hyperparameters;
pub mod mcts_result;
pub mod node;
pub mod selection;

pub use algorithm::{EpisodeStatus, MctsPlanner, ROOT};
pub use hyperparameters::PlannerHyperparameters;
pub use mcts_result::MctsDecision;
pub use node::{NodeId, SearchNode};
