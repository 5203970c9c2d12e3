use super::*;
use crate::helpers::learning::create_test_config;
use crate::helpers::network::create_test_network;
use crate::helpers::signal::create_two_clusters;
use crate::helpers::utils::{create_test_environment, create_test_random};
use crate::learning::LearningEngine;
use crate::network::Network;
use crate::utils::Canvas;

fn create_engine() -> LearningEngine {
    let source = create_two_clusters((20., 20.), (80., 80.));
    let random = create_test_random();

    LearningEngine::new(DiscreteSignals::generate(&source, &Canvas::new(100., 100.), 0, random.as_ref()))
}

fn run(network: &mut Network, engine: &mut LearningEngine, algorithm: Algorithm, step_size: usize) -> StepResult {
    let config = create_test_config(algorithm, step_size);
    let source = create_two_clusters((20., 20.), (80., 80.));

    engine.step(network, &config, &source, &create_test_environment())
}

#[test]
fn can_converge_to_cluster_centroids() {
    let mut network = create_test_network(&[(19., 19.), (81., 81.)]);
    let mut engine = create_engine();

    let result = run(&mut network, &mut engine, Algorithm::Lbg, 10);

    assert!(result.stop);
    assert!(result.repaint);
    assert_eq!(engine.signals(), 2);
    assert_eq!(network.store.positions(), vec![Point::new(20., 20.), Point::new(80., 80.)]);
    assert_eq!(result.error_value, 84.);
    assert!(network.store.nodes().iter().all(|node| node.signals.is_empty() && !node.flags.has_moved));
}

#[test]
fn can_keep_distances_of_discrete_signals() {
    let mut network = create_test_network(&[(20., 20.), (80., 80.)]);
    let mut engine = create_engine();

    run(&mut network, &mut engine, Algorithm::Lbg, 1);

    let signals = engine.discrete_signals();
    assert_eq!(signals.nearest[4], 0.);
    assert_eq!(signals.second[4], 7200.);
}

#[test]
fn can_keep_pinned_node_in_place() {
    let mut network = create_test_network(&[(19., 19.), (81., 81.)]);
    network.store.pin(0, true);
    let mut engine = create_engine();

    let result = run(&mut network, &mut engine, Algorithm::Lbg, 10);

    assert!(result.stop);
    assert_eq!(engine.signals(), 2);
    assert_eq!(network.store.positions(), vec![Point::new(19., 19.), Point::new(80., 80.)]);
}

#[test]
fn can_relocate_node_and_restore_best_positions_with_utility() {
    let mut network = create_test_network(&[(19., 19.), (81., 81.)]);
    let mut engine = create_engine();

    let result = run(&mut network, &mut engine, Algorithm::LbgWithUtility, 2);
    assert!(!result.stop);
    assert_eq!(network.store.node(0).position, Point::new(20., 21.));

    let result = run(&mut network, &mut engine, Algorithm::LbgWithUtility, 10);
    assert!(result.stop);
    assert_eq!(engine.signals(), 4);
    assert_eq!(network.store.positions(), vec![Point::new(20., 20.), Point::new(80., 80.)]);
}

#[test]
fn can_run_without_auto_stop() {
    let mut network = create_test_network(&[(19., 19.), (81., 81.)]);
    let mut engine = create_engine();
    let config = SimulationConfig { auto_stop: false, ..create_test_config(Algorithm::Lbg, 5) };
    let source = create_two_clusters((20., 20.), (80., 80.));

    let result = engine.step(&mut network, &config, &source, &create_test_environment());

    assert!(!result.stop);
    assert_eq!(engine.signals(), 5);
}

#[test]
fn can_assign_signal_to_first_of_equally_near_nodes() {
    let positions = [Point::new(0., 0.), Point::new(2., 0.), Point::new(10., 0.)];

    let assignment = assign(&positions, &Point::new(1., 0.));

    assert_eq!(assignment.winner, 0);
    assert_eq!((assignment.nearest, assignment.second), (1., 1.));
}
