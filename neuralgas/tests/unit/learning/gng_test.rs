use super::*;
use crate::helpers::learning::{create_test_config, run_batch};
use crate::helpers::network::{assert_store_invariants, create_test_network};
use crate::helpers::signal::ConstantSignal;
use crate::network::Network;
use crate::utils::{Float, Point};

fn gng(params: GngParams) -> Algorithm {
    Algorithm::GrowingNeuralGas(params)
}

fn create_chain(positions: &[(Float, Float)]) -> Network {
    let mut network = create_test_network(positions);
    (1..positions.len()).for_each(|idx| {
        network.store.connect(idx - 1, idx);
    });

    network
}

#[test]
fn can_adapt_winner_and_runner_up() {
    let mut network = create_test_network(&[(0., 0.), (10., 0.)]);
    let config = create_test_config(gng(GngParams::default()), 2);

    let (engine, result) = run_batch(&mut network, &config, &ConstantSignal(Point::new(5., 0.)));

    let store = &network.store;
    assert!(!result.stop);
    assert_eq!(engine.signals(), 2);
    assert!((store.node(1).position.x - 9.05).abs() < 1E-9);
    assert!((store.node(0).position.x - 0.005).abs() < 1E-9);
    assert!((store.node(1).error - 45.2375).abs() < 1E-9);
    assert!(store.node(1).flags.is_winner);
    assert!(store.node(0).flags.is_second);
    assert_eq!(store.edge_count(), 1);
    assert_eq!(store.edges()[0].age, 0);
    assert_store_invariants(store);
}

#[test]
fn can_insert_node_at_lambda_interval() {
    let mut network = create_test_network(&[(0., 0.), (10., 0.)]);
    network.store.node_mut(0).error = 1.;
    let config = create_test_config(gng(GngParams { lambda: 2, ..GngParams::default() }), 2);

    let (_, result) = run_batch(&mut network, &config, &ConstantSignal(Point::new(5., 0.)));

    let store = &network.store;
    assert!(result.inserted);
    assert_eq!(store.size(), 3);
    assert!((store.node(2).position.x - 4.5275).abs() < 1E-9);
    assert!(store.node(2).flags.is_recently_inserted);
    assert!(store.find_edge(0, 1).is_none());
    assert!(store.find_edge(0, 2).is_some());
    assert!(store.find_edge(1, 2).is_some());
    assert_store_invariants(store);
}

#[test]
fn can_stop_when_node_limit_is_reached() {
    let mut network = create_test_network(&[(0., 0.), (10., 0.)]);
    network.store.set_max_nodes(2);
    let config = create_test_config(gng(GngParams { lambda: 2, ..GngParams::default() }), 10);

    let (engine, result) = run_batch(&mut network, &config, &ConstantSignal(Point::new(5., 0.)));

    assert!(result.stop);
    assert_eq!(engine.signals(), 2);
    assert_eq!(network.size(), 2);
}

#[test]
fn can_keep_running_without_insertion() {
    let mut network = create_test_network(&[(0., 0.), (10., 0.)]);
    network.store.set_max_nodes(2);
    let config =
        create_test_config(gng(GngParams { lambda: 2, no_new_nodes: true, ..GngParams::default() }), 10);

    let (engine, result) = run_batch(&mut network, &config, &ConstantSignal(Point::new(5., 0.)));

    assert!(!result.stop);
    assert!(!result.inserted);
    assert_eq!(engine.signals(), 10);
}

#[test]
fn can_remove_isolated_node() {
    let mut network = create_test_network(&[(0., 0.), (10., 0.), (100., 100.)]);
    let config = create_test_config(gng(GngParams::default()), 1);

    run_batch(&mut network, &config, &ConstantSignal(Point::new(5., 0.)));

    assert_eq!(network.size(), 2);
    assert!(network.store.find_edge(0, 1).is_some());
    assert_store_invariants(&network.store);
}

#[test]
fn can_remove_extra_nodes_when_limit_is_decreased() {
    let mut network = create_chain(&[(0., 0.), (10., 0.), (20., 0.), (30., 0.)]);
    network.store.set_max_nodes(3);
    let config = create_test_config(gng(GngParams::default()), 1);

    run_batch(&mut network, &config, &ConstantSignal(Point::new(30., 0.)));

    assert_eq!(network.size(), 3);
    assert_eq!(network.store.node(0).position, Point::new(30., 0.));
    assert_store_invariants(&network.store);
}

parameterized_test! {can_remove_useless_node_only_with_utility, (utility, expected_size), {
    can_remove_useless_node_only_with_utility_impl(utility, expected_size);
}}

can_remove_useless_node_only_with_utility! {
    case01_utility: (true, 2),
    case02_no_utility: (false, 3),
}

fn can_remove_useless_node_only_with_utility_impl(utility: bool, expected_size: usize) {
    let mut network = create_chain(&[(0., 0.), (10., 0.), (20., 0.)]);
    network.store.node_mut(1).error = 10.;
    [5., 5., 1.].iter().enumerate().for_each(|(idx, &value)| network.store.node_mut(idx).utility = value);
    let algorithm = if utility {
        Algorithm::GrowingNeuralGasWithUtility(GngParams::default())
    } else {
        Algorithm::GrowingNeuralGas(GngParams::default())
    };
    let config = create_test_config(algorithm, 1);

    run_batch(&mut network, &config, &ConstantSignal(Point::new(5., 0.)));

    assert_eq!(network.size(), expected_size);
    if utility {
        assert!(network.store.nodes().iter().all(|node| node.position.x < 20.));
    }
    assert_store_invariants(&network.store);
}
