//! Search tree node for the anytime MCTS planner.
//!
//! Nodes live in an arena owned by the planner; `children` and `parent` are
//! plain indices into that arena. The owning direction is strictly
//! planner -> nodes, and the child -> parent link is a non-owning index, so
//! the tree never forms an ownership cycle.

use crate::model::WorldModel;

/// Index of a node inside the planner's arena.
pub type NodeId = usize;

/// A node in the search tree.
///
/// Wraps an owned world-model snapshot together with the visit/reward
/// statistics updated during backpropagation. The snapshot is immutable once
/// the node is constructed; expansion and playout always work on fresh
/// clones.
#[derive(Debug, Clone)]
pub struct SearchNode<M: WorldModel> {
    /// World snapshot owned by this node, never mutated after construction.
    pub state: M,

    /// Action that produced this node from its parent; `None` only at the root.
    pub incoming_action: Option<M::Action>,

    /// Arena index of the parent node, `None` only at the root.
    pub parent: Option<NodeId>,

    /// Arena indices of the children, in expansion (insertion) order.
    pub children: Vec<NodeId>,

    /// Actions executable from `state`, captured once at construction.
    /// Empty for terminal states.
    pub actions: Vec<M::Action>,

    /// Whether `state` was terminal at construction time.
    pub terminal: bool,

    /// Number of backpropagation passes through this node.
    pub visit_count: usize,

    /// Sum of all rewards backpropagated through this node.
    pub total_value: f64,
}

impl<M: WorldModel> SearchNode<M> {
    /// Creates a node wrapping the given state.
    ///
    /// `incoming_action` and `parent` are both `None` exactly when the node
    /// is a root. Executable actions are queried once here and drive the
    /// deterministic expansion order.
    pub fn new(state: M, incoming_action: Option<M::Action>, parent: Option<NodeId>) -> Self {
        let terminal = state.is_terminal();
        let actions = if terminal {
            Vec::new()
        } else {
            state.executable_actions()
        };

        SearchNode {
            state,
            incoming_action,
            parent,
            children: Vec::new(),
            actions,
            terminal,
            visit_count: 0,
            total_value: 0.0,
        }
    }

    /// Returns the average reward of this node, `0.0` before any visit.
    pub fn average_value(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.total_value / self.visit_count as f64
        }
    }

    /// True once every executable action has a corresponding child.
    pub fn is_fully_expanded(&self) -> bool {
        self.children.len() >= self.actions.len()
    }

    /// True while this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True when the wrapped state is terminal.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// The next action to expand, in `executable_actions` order.
    ///
    /// Children are appended in the same order the actions were listed, so
    /// `actions[children.len()]` is always the first untried one. Returns
    /// `None` once the node is fully expanded.
    pub fn next_untried_action(&self) -> Option<&M::Action> {
        self.actions.get(self.children.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WorldAction;

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

    fn create_test_world() -> BanditWorld {
        BanditWorld {
            payouts: vec![1.0, 2.0, 3.0],
            taken: None,
        }
    }

    #[test]
    fn test_new_root_node() {
        let node = SearchNode::new(create_test_world(), None, None);

        assert!(node.incoming_action.is_none());
        assert!(node.parent.is_none());
        assert_eq!(node.visit_count, 0);
        assert_eq!(node.total_value, 0.0);
        assert_eq!(node.children.len(), 0);
        assert_eq!(node.actions.len(), 3);
        assert!(!node.is_terminal());
        assert!(node.is_leaf());
        assert!(!node.is_fully_expanded());
    }

    #[test]
    fn test_terminal_node_has_no_actions() {
        let mut world = create_test_world();
        world.taken = Some(1);

        let node = SearchNode::new(world, Some(Arm(1)), Some(0));

        assert!(node.is_terminal());
        assert!(node.actions.is_empty());
        assert!(node.is_fully_expanded());
        assert_eq!(node.next_untried_action(), None);
    }

    #[test]
    fn test_next_untried_action_follows_listing_order() {
        let mut node = SearchNode::new(create_test_world(), None, None);

        assert_eq!(node.next_untried_action(), Some(&Arm(0)));

        node.children.push(1);
        assert_eq!(node.next_untried_action(), Some(&Arm(1)));

        node.children.push(2);
        assert_eq!(node.next_untried_action(), Some(&Arm(2)));

        node.children.push(3);
        assert_eq!(node.next_untried_action(), None);
        assert!(node.is_fully_expanded());
    }

    #[test]
    fn test_average_value() {
        let mut node = SearchNode::new(create_test_world(), None, None);

        assert_eq!(node.average_value(), 0.0);

        node.visit_count = 4;
        node.total_value = 10.0;

        assert!((node.average_value() - 2.5).abs() < 1e-9);
    }
}
