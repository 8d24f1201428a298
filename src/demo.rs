//! Self-driving demo: a planner-controlled agent walking a corridor.
//!
//! This is host-side code for the binary only. The corridor world is the
//! simplest deterministic collaborator that still gives the search something
//! to decide: step toward the goal or waste the step budget.

use anytime_mcts::mcts::{MctsPlanner, PlannerHyperparameters};
use anytime_mcts::model::{WorldAction, WorldModel};
use anytime_mcts::recording::EpisodeRecorder;
use std::fmt;

/// Agent on a line, trying to reach `goal` before the step budget runs out.
#[derive(Debug, Clone)]
pub struct CorridorWorld {
    pub position: i32,
    pub goal: i32,
    pub steps_left: u32,
}

impl CorridorWorld {
    pub fn new(goal: i32, steps: u32) -> Self {
        Self {
            position: 0,
            goal,
            steps_left: steps,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorridorAction {
    StepLeft,
    StepRight,
}

impl fmt::Display for CorridorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorridorAction::StepLeft => write!(f, "StepLeft"),
            CorridorAction::StepRight => write!(f, "StepRight"),
        }
    }
}

impl WorldAction<CorridorWorld> for CorridorAction {
    fn apply_effects(&self, model: &mut CorridorWorld) {
        model.position += match self {
            CorridorAction::StepLeft => -1,
            CorridorAction::StepRight => 1,
        };
        model.steps_left = model.steps_left.saturating_sub(1);
    }
}

impl WorldModel for CorridorWorld {
    type Action = CorridorAction;

    fn is_terminal(&self) -> bool {
        self.steps_left == 0 || self.position == self.goal
    }

    fn executable_actions(&self) -> Vec<CorridorAction> {
        vec![CorridorAction::StepLeft, CorridorAction::StepRight]
    }

    fn score(&self) -> f64 {
        if self.position == self.goal {
            // Reaching the goal earlier is worth more.
            100.0 + self.steps_left as f64
        } else {
            -((self.goal - self.position).abs() as f64)
        }
    }

    fn clone_for_child(&self) -> Self {
        self.clone()
    }
}

/// Runs one agent walk: a fresh planning episode before every move, each
/// episode spread over simulated frames via `run_iteration_batch`.
pub fn run_walk(
    hyperparams: &PlannerHyperparameters,
    goal: i32,
    steps: u32,
    recorder: &mut EpisodeRecorder,
) -> anytime_mcts::Result<f64> {
    let episode_id = uuid::Uuid::new_v4().to_string();
    recorder.start_episode(&episode_id);

    let mut world = CorridorWorld::new(goal, steps);
    let mut planner = MctsPlanner::new(hyperparams.clone());
    let mut step = 0;

    while !world.is_terminal() {
        planner.initialize_episode(&world)?;

        let mut decision = planner.run_iteration_batch()?;
        while planner.in_progress() {
            decision = planner.run_iteration_batch()?;
        }

        recorder.record_decision(step, &decision.best_action.to_string(), &decision);
        log::info!(
            "step {}: position {} -> {} (iterations={}, sel_depth={}, playout_depth={})",
            step,
            world.position,
            decision.best_action,
            decision.completed_iterations,
            decision.max_selection_depth_reached,
            decision.max_playout_depth_reached
        );

        decision.best_action.apply_effects(&mut world);
        step += 1;
    }

    let final_score = world.score();
    if let Err(error) = recorder.finalize_episode(final_score) {
        log::warn!("failed to persist episode recording: {}", error);
    }

    Ok(final_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_params() -> PlannerHyperparameters {
        PlannerHyperparameters {
            max_iterations: 100,
            max_iterations_per_frame: 10,
            exploration_constant: 1.4,
            seed: Some(7),
        }
    }

    #[test]
    fn test_corridor_world_terminal_conditions() {
        let at_goal = CorridorWorld {
            position: 3,
            goal: 3,
            steps_left: 5,
        };
        assert!(at_goal.is_terminal());
        assert_eq!(at_goal.score(), 105.0);

        let out_of_steps = CorridorWorld {
            position: 1,
            goal: 3,
            steps_left: 0,
        };
        assert!(out_of_steps.is_terminal());
        assert_eq!(out_of_steps.score(), -2.0);

        let live = CorridorWorld::new(3, 8);
        assert!(!live.is_terminal());
        assert_eq!(live.executable_actions().len(), 2);
    }

    #[test]
    fn test_walk_reaches_the_goal() {
        let mut recorder = EpisodeRecorder::disabled();
        let score = run_walk(&seeded_params(), 3, 8, &mut recorder).unwrap();
        assert!(score >= 100.0);
    }
}
