//! Integration tests for the anytime MCTS library public API

use anytime_mcts::{
    mcts::{EpisodeStatus, MctsPlanner, PlannerHyperparameters},
    model::{WorldAction, WorldModel},
    PlannerError, Result, DESCRIPTION, NAME, VERSION,
};

#[test]
fn test_library_metadata() {
    assert!(!VERSION.is_empty());
    assert_eq!(NAME, "anytime_mcts");
    assert!(!DESCRIPTION.is_empty());
}

#[test]
fn test_error_types() {
    let state_error = PlannerError::InvalidState("test state error".to_string());
    assert!(matches!(state_error, PlannerError::InvalidState(_)));

    let no_action = PlannerError::NoActionAvailable;
    assert!(matches!(no_action, PlannerError::NoActionAvailable));

    let malformed = PlannerError::MalformedCollaborator("test collaborator error".to_string());
    assert!(matches!(malformed, PlannerError::MalformedCollaborator(_)));
}

#[test]
fn test_result_type_alias() {
    let success: Result<i32> = Ok(42);
    assert!(success.is_ok());
    assert_eq!(success.unwrap(), 42);

    let failure: Result<i32> = Err(PlannerError::NoActionAvailable);
    assert!(failure.is_err());
}

#[test]
fn test_hyperparameter_defaults() {
    let params = PlannerHyperparameters::default();
    assert_eq!(params.max_iterations, 100);
    assert_eq!(params.max_iterations_per_frame, 10);
    assert_eq!(params.exploration_constant, 1.4);
    assert!(params.validate().is_ok());
}

// A two-arm bandit exercising the whole public surface end to end.
#[derive(Debug, Clone)]
struct BanditWorld {
    payouts: Vec<f64>,
    taken: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Arm(usize);

impl WorldAction<BanditWorld> for Arm {
    fn apply_effects(&self, model: &mut BanditWorld) {
        model.taken = Some(self.0);
    }
}

impl WorldModel for BanditWorld {
    type Action = Arm;

    fn is_terminal(&self) -> bool {
        self.taken.is_some()
    }

    fn executable_actions(&self) -> Vec<Arm> {
        (0..self.payouts.len()).map(Arm).collect()
    }

    fn score(&self) -> f64 {
        self.taken.map(|i| self.payouts[i]).unwrap_or(0.0)
    }

    fn clone_for_child(&self) -> Self {
        self.clone()
    }
}

#[test]
fn test_planner_finds_the_better_arm() {
    let mut planner = MctsPlanner::new(PlannerHyperparameters {
        seed: Some(1),
        ..PlannerHyperparameters::default()
    });

    let world = BanditWorld {
        payouts: vec![1.0, 10.0, 4.0],
        taken: None,
    };
    planner.initialize_episode(&world).expect("initialize");

    let mut decision = planner.run_iteration_batch().expect("first batch");
    while planner.in_progress() {
        decision = planner.run_iteration_batch().expect("batch");
    }

    assert_eq!(planner.status(), EpisodeStatus::Completed);
    assert_eq!(decision.best_action, Arm(1));
    assert_eq!(decision.completed_iterations, 100);
    assert!(decision.search_complete);
    assert_eq!(planner.best_action_sequence(), vec![Arm(1)]);
}
