#[cfg(test)]
#[path = "../../tests/unit/learning/lbg_test.rs"]
mod lbg_test;

use super::*;
use crate::network::NodeStore;
use crate::signal::DiscreteSignals;
use crate::utils::{Environment, Float, Point, parallel_collect};

/// Memory of LBG with utility: the best distortion seen so far and node positions which produced it.
pub(crate) struct LbgState {
    best_error: Float,
    best_positions: Vec<Point>,
}

impl Default for LbgState {
    fn default() -> Self {
        Self { best_error: Float::MAX, best_positions: Vec::default() }
    }
}

pub(crate) struct LbgContext<'a> {
    pub utility: bool,
    pub auto_stop: bool,
    pub environment: &'a Environment,
}

/// Nearest node index with squared distances to the nearest and the second nearest nodes.
struct Assignment {
    winner: usize,
    nearest: Float,
    second: Float,
}

/// Runs one batch iteration: assigns every discrete signal to its nearest node, then moves each node
/// to the mean of its signals. The network has converged when no node moved.
pub(crate) fn learn(
    store: &mut NodeStore,
    signals: &mut DiscreteSignals,
    state: &mut LbgState,
    context: &LbgContext,
    result: &mut StepResult,
) {
    if store.is_empty() || signals.is_empty() {
        return;
    }

    let positions = store.positions();
    let assignments = parallel_collect(signals.points(), |signal| assign(&positions, signal));

    let mut error = 0.;
    for (idx, assignment) in assignments.into_iter().enumerate() {
        signals.nearest[idx] = assignment.nearest;
        signals.second[idx] = assignment.second;
        error += assignment.nearest;

        store.node_mut(assignment.winner).signals.push_back(idx);
    }

    result.error_value += error;

    let mut is_ready = true;
    let (mut min_utility_node, mut min_utility) = (0, Float::MAX);
    let (mut max_error_node, mut max_error) = (0, 0.);

    for (node_idx, node) in store.nodes_mut().iter_mut().enumerate() {
        if node.signals.is_empty() {
            node.flags.has_moved = false;
            continue;
        }

        let count = node.signals.len() as Float;
        let (mut sum_x, mut sum_y, mut utility, mut node_error) = (0., 0., 0., 0.);

        while let Some(signal_idx) = node.signals.pop_front() {
            let point = signals.points()[signal_idx];
            sum_x += point.x;
            sum_y += point.y;
            utility += signals.second[signal_idx] - signals.nearest[signal_idx];
            node_error += signals.nearest[signal_idx];
        }

        let centroid = Point::new(sum_x / count, sum_y / count);

        if centroid != node.position && !node.flags.is_pinned {
            node.position = centroid;
            node.flags.has_moved = true;
            is_ready = false;
        } else {
            node.flags.has_moved = false;
        }

        if utility < min_utility {
            min_utility = utility;
            min_utility_node = node_idx;
        }

        if node_error > max_error {
            max_error = node_error;
            max_error_node = node_idx;
        }
    }

    if context.utility && is_ready {
        if error < state.best_error {
            state.best_positions = store.positions();
            state.best_error = error;
            is_ready = false;

            // relocates the least useful node next to the node with the highest error
            let target = store.node(max_error_node).position;
            let node = store.node_mut(min_utility_node);
            node.adapt(target.x - node.position.x, target.y + 1. - node.position.y);
        } else if error > state.best_error && state.best_positions.len() == store.size() {
            store.nodes_mut().iter_mut().zip(state.best_positions.iter()).for_each(|(node, position)| {
                node.position = *position;
            });
        }
    }

    if is_ready && context.auto_stop {
        context.environment.log(&format!("LBG converged with distortion {error:.3}, stopping"));
        result.repaint = true;
        result.stop = true;
    }
}

/// Finds the nearest node (first one on ties) and distances to the nearest and the second nearest nodes.
fn assign(positions: &[Point], signal: &Point) -> Assignment {
    positions.iter().enumerate().fold(
        Assignment { winner: 0, nearest: Float::MAX, second: Float::MAX },
        |assignment, (idx, position)| {
            let distance = position.sqr_distance(signal);
            if distance < assignment.nearest {
                Assignment { winner: idx, nearest: distance, second: assignment.nearest }
            } else if distance < assignment.second {
                Assignment { second: distance, ..assignment }
            } else {
                assignment
            }
        },
    )
}
