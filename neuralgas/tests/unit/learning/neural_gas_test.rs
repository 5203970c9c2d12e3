use super::*;
use crate::helpers::learning::{create_test_config, run_batch};
use crate::helpers::network::{assert_store_invariants, create_test_network};
use crate::helpers::signal::ConstantSignal;
use crate::utils::Point;

fn neural_gas(hebbian: bool, params: NeuralGasParams) -> Algorithm {
    if hebbian { Algorithm::NeuralGasWithHebbian(params) } else { Algorithm::NeuralGas(params) }
}

#[test]
fn can_move_nodes_by_rank() {
    let mut network = create_test_network(&[(30., 0.), (10., 0.), (0., 0.), (20., 0.)]);
    let config = create_test_config(neural_gas(false, NeuralGasParams::default()), 1);

    run_batch(&mut network, &config, &ConstantSignal(Point::new(0., 0.)));

    let x = |idx: usize| network.store.node(idx).position.x;
    let moved = |idx: usize, original: Float| original - x(idx);

    assert_eq!(x(2), 0.);
    assert!(network.store.node(1).flags.is_second);
    // closer nodes are adapted with higher rate
    assert!(moved(1, 10.) / 10. > moved(3, 20.) / 20.);
    assert!(moved(3, 20.) / 20. > moved(0, 30.) / 30.);
    assert!(moved(0, 30.) > 1.);
}

#[test]
fn can_stop_extraction_once_movement_is_small() {
    let mut network = create_test_network(&[(50., 0.), (1., 0.), (2., 0.), (0., 0.)]);
    let config = create_test_config(neural_gas(false, NeuralGasParams::default()), 1);

    run_batch(&mut network, &config, &ConstantSignal(Point::new(0., 0.)));

    assert!(network.store.node(2).position.x < 2.);
    assert_eq!(network.store.node(0).position, Point::new(50., 0.));
}

#[test]
fn can_connect_two_nearest_nodes_with_hebbian_learning() {
    let mut network = create_test_network(&[(0., 0.), (10., 0.), (20., 0.)]);
    let config = create_test_config(neural_gas(true, NeuralGasParams::default()), 1);

    run_batch(&mut network, &config, &ConstantSignal(Point::new(1., 0.)));

    let store = &network.store;
    assert_eq!(store.edge_count(), 1);
    assert!(store.find_edge(0, 1).is_some());
    assert_store_invariants(store);
}

#[test]
fn can_remove_old_edges_with_hebbian_learning() {
    let mut network = create_test_network(&[(0., 0.), (10., 0.), (20., 0.)]);
    network.store.connect(0, 2);
    let params = NeuralGasParams { edge_age: Schedule::new(1., 1.), ..NeuralGasParams::default() };
    let config = create_test_config(neural_gas(true, params), 2);

    run_batch(&mut network, &config, &ConstantSignal(Point::new(1., 0.)));

    let store = &network.store;
    assert!(store.find_edge(0, 2).is_none());
    assert!(store.find_edge(0, 1).is_some());
    assert_store_invariants(store);
}

#[test]
fn can_stop_at_time_horizon() {
    let mut network = create_test_network(&[(0., 0.), (10., 0.)]);
    let params = NeuralGasParams { t_max: 2., ..NeuralGasParams::default() };
    let config = create_test_config(neural_gas(false, params), 5);

    let (engine, result) = run_batch(&mut network, &config, &ConstantSignal(Point::new(1., 0.)));

    assert!(result.stop);
    assert!(result.repaint);
    assert_eq!(engine.signals(), 2);
}

#[test]
fn can_keep_heap_order_after_sift_down() {
    let mut network = create_test_network(&[(5., 0.), (1., 0.), (4., 0.), (2., 0.), (3., 0.)]);
    network.store.nodes_mut().iter_mut().for_each(|node| node.sqr_dist = node.position.x);
    let mut ranking = Ranking::default();

    ranking.prepare(5);
    ranking.heapify(&network.store);

    let extracted = (0..5)
        .rev()
        .map(|end| {
            let nearest = ranking.order[0];
            ranking.order.swap(0, end);
            ranking.sift_down(&network.store, 0, end);
            nearest
        })
        .collect::<Vec<_>>();

    assert_eq!(extracted, vec![1, 3, 4, 2, 0]);
}
