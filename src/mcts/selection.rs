//! Child-selection policies for the planner.
//!
//! Two distinct policies operate on the same tree:
//! - UCT during tree descent, balancing exploitation and exploration
//! - pure average value when reporting the decision to the host
//!
//! Both break ties toward the earliest child in insertion order, which keeps
//! selection deterministic for a fixed tree.

use crate::mcts::node::{NodeId, SearchNode};
use crate::model::WorldModel;

/// Computes the UCT score of a child during tree descent.
///
/// Formula: `Q/N + C × sqrt(ln(N_parent) / N_child)`
///
/// An unvisited child scores `f64::INFINITY` so it is always preferred over
/// any visited sibling. The `ln` argument is clamped to at least one visit,
/// so every returned score is finite and comparable otherwise.
///
/// # Arguments
/// * `parent_visits` - Visit count of the parent node
/// * `child` - The candidate child
/// * `exploration_constant` - Exploration weight C (typically 1.4)
pub fn uct_score<M: WorldModel>(
    parent_visits: usize,
    child: &SearchNode<M>,
    exploration_constant: f64,
) -> f64 {
    if child.visit_count == 0 {
        return f64::INFINITY;
    }

    let exploitation = child.average_value();
    let parent_visits = parent_visits.max(1) as f64;
    let exploration = (parent_visits.ln() / child.visit_count as f64).sqrt();

    exploitation + exploration_constant * exploration
}

/// Selects the child of `parent` with the highest UCT score.
///
/// # Arguments
/// * `nodes` - The planner's node arena
/// * `parent` - Arena index of the node being descended from
/// * `exploration_constant` - Exploration weight C
///
/// # Returns
/// Arena index of the best child, or `None` if `parent` has no children.
/// Ties resolve to the first child reaching the maximum, in insertion order.
pub fn best_uct_child<M: WorldModel>(
    nodes: &[SearchNode<M>],
    parent: NodeId,
    exploration_constant: f64,
) -> Option<NodeId> {
    let parent_visits = nodes[parent].visit_count;
    let mut best_score = f64::NEG_INFINITY;
    let mut best_child = None;

    for &child_id in &nodes[parent].children {
        let score = uct_score(parent_visits, &nodes[child_id], exploration_constant);

        if score > best_score {
            best_score = score;
            best_child = Some(child_id);
        }
    }

    best_child
}

/// Selects the child of `parent` with the highest average value.
///
/// Used for the externally reported decision, so the exploration term is
/// dropped. Ties resolve to the child with the higher visit count, then to
/// insertion order.
///
/// # Returns
/// Arena index of the most valuable child, or `None` if `parent` has no
/// children.
pub fn best_child<M: WorldModel>(nodes: &[SearchNode<M>], parent: NodeId) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64, usize)> = None;

    for &child_id in &nodes[parent].children {
        let child = &nodes[child_id];
        let average = child.average_value();

        let better = match best {
            None => true,
            Some((_, best_average, best_visits)) => {
                average > best_average
                    || (average == best_average && child.visit_count > best_visits)
            }
        };

        if better {
            best = Some((child_id, average, child.visit_count));
        }
    }

    best.map(|(child_id, _, _)| child_id)
}
