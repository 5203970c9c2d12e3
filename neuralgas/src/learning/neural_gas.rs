#[cfg(test)]
#[path = "../../tests/unit/learning/neural_gas_test.rs"]
mod neural_gas_test;

use super::*;
use crate::network::{Network, NodeStore};
use crate::utils::{Float, compare_floats};
use std::cmp::Ordering;

/// A permutation of node indices which is heap ordered by distance to the current signal.
///
/// The permutation survives between signals and is reset only when node count changes.
#[derive(Default)]
pub(crate) struct Ranking {
    order: Vec<usize>,
}

impl Ranking {
    fn prepare(&mut self, size: usize) {
        if self.order.len() != size {
            self.order = (0..size).collect();
        }
    }

    fn heapify(&mut self, store: &NodeStore) {
        let size = self.order.len();
        (0..size / 2).rev().for_each(|idx| self.sift_down(store, idx, size));
    }

    fn sift_down(&mut self, store: &NodeStore, mut parent: usize, size: usize) {
        let distance = |idx: usize| store.node(idx).sqr_dist;

        loop {
            let left = 2 * parent + 1;
            if left >= size {
                break;
            }

            let right = left + 1;
            let child = if right < size
                && compare_floats(distance(self.order[right]), distance(self.order[left])) == Ordering::Less
            {
                right
            } else {
                left
            };

            if compare_floats(distance(self.order[child]), distance(self.order[parent])) != Ordering::Less {
                break;
            }

            self.order.swap(parent, child);
            parent = child;
        }
    }
}

/// Neural gas: every node moves towards the signal with rate decaying by its distance rank.
///
/// Nodes are extracted from a min-heap in rank order; extraction stops once the movement becomes
/// smaller than a pixel. With hebbian learning, the two closest nodes are connected and edges of
/// the closest one are aged with a decaying age limit.
pub(crate) fn adapt(
    network: &mut Network,
    ranking: &mut Ranking,
    params: &NeuralGasParams,
    hebbian: bool,
    context: &SignalContext,
    result: &mut StepResult,
) {
    let time = context.time as Float;

    if time >= params.t_max {
        context.environment.log(&format!("neural gas reached time horizon {}, stopping", params.t_max));
        result.repaint = true;
        result.stop = true;
        return;
    }

    let store = &mut network.store;
    let size = store.size();

    let lambda = params.lambda.at(time, params.t_max);
    let epsilon = params.epsilon.at(time, params.t_max);
    let max_edge_age = params.edge_age.at(time, params.t_max) as usize;

    ranking.prepare(size);
    ranking.heapify(store);

    for end in (0..size).rev() {
        let nearest = ranking.order[0];
        ranking.order.swap(0, end);
        let rank = size - 1 - end;

        if rank == 1 {
            store.node_mut(nearest).flags.is_second = true;

            if hebbian {
                let first = ranking.order[size - 1];
                store.connect(first, nearest);
                store.age_edges_of(first, max_edge_age);
            }
        }

        let rate = epsilon * (-(rank as Float) / lambda).exp();
        let (dx, dy) = store.node_mut(nearest).adapt_towards(&context.signal, rate);

        if dx.abs() < 1. && dy.abs() < 1. && rank > 1 {
            break;
        }

        ranking.sift_down(store, 0, end);
    }
}
