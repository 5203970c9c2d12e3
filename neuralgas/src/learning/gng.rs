#[cfg(test)]
#[path = "../../tests/unit/learning/gng_test.rs"]
mod gng_test;

use super::*;
use crate::network::Network;

/// With utility, the run stops after this amount of signals.
const UTILITY_SIGNAL_LIMIT: usize = 300000;

/// Adapts growing neural gas to a signal: moves winner and its neighbours, accumulates error and utility,
/// refreshes winner edges, periodically inserts a node and removes useless ones.
pub(crate) fn adapt(
    network: &mut Network,
    scan: &SignalScan,
    params: &GngParams,
    utility_mode: bool,
    context: &SignalContext,
    result: &mut StepResult,
) {
    let SignalContext { signal, time, config, environment } = context;
    let (winner, winner_distance) = (scan.winner, scan.winner_distance);

    let Some(second) = scan.second else {
        return;
    };

    let store = &mut network.store;

    let runner_up = store.node_mut(second);
    runner_up.flags.is_second = true;
    runner_up.remember_position();

    store.node_mut(winner).adapt_towards(signal, params.epsilon_winner);

    let neighbours = store.node(winner).neighbours().to_vec();
    neighbours.into_iter().for_each(|neighbour| {
        store.node_mut(neighbour).adapt_towards(signal, params.epsilon_neighbour);
    });

    let node = store.node_mut(winner);
    node.error += winner_distance;
    node.utility += scan.second_distance - winner_distance;

    // NOTE ageing goes first: the edge between winner and runner-up always ends up with zero age
    store.age_edges_of(winner, config.max_edge_age);
    store.connect(winner, second);

    if time % params.lambda == 0 && !params.no_new_nodes {
        if config.auto_stop
            && (store.size() >= store.max_nodes() || (utility_mode && *time > UTILITY_SIGNAL_LIMIT))
        {
            environment.log(&format!("{} reached {} nodes after {time} signals, stopping", config.algorithm.name(), store.size()));
            result.stop = true;
            return;
        }

        let inserted = store
            .max_error_neighbour(scan.max_error_node)
            .and_then(|neighbour| store.insert_between(scan.max_error_node, neighbour, params.alpha))
            .is_some();

        result.inserted |= inserted;
    }

    let size = network.size();

    match scan.isolated {
        Some(isolated) if size > 2 && !utility_mode => {
            if network.store.nodes().get(isolated).is_some_and(|node| node.degree() == 0) {
                network.delete_node(isolated);
            }
        }
        _ if scan.max_error > scan.min_utility * params.utility_factor => {
            if utility_mode && size > 2 {
                network.delete_node(scan.min_utility_node);
            }
        }
        _ if size > 2 && size > network.store.max_nodes() => {
            network.delete_node(scan.min_utility_node);
        }
        _ => {}
    }
}
