use super::*;
use crate::helpers::learning::{create_test_config, run_batch};
use crate::helpers::network::create_test_network;
use crate::helpers::signal::ConstantSignal;
use crate::utils::Point;

#[test]
fn can_move_only_winner_with_hard_competitive_learning() {
    let mut network = create_test_network(&[(0., 0.), (10., 0.)]);
    let config = create_test_config(Algorithm::HardCompetitiveLearning(HclParams::default()), 1);

    run_batch(&mut network, &config, &ConstantSignal(Point::new(2., 0.)));

    assert!((network.store.node(0).position.x - 0.2).abs() < 1E-9);
    assert_eq!(network.store.node(1).position, Point::new(10., 0.));
    assert_eq!(network.store.edge_count(), 0);
}

parameterized_test! {can_stop_hard_competitive_learning_at_horizon, (variable, auto_stop, expected_signals), {
    can_stop_hard_competitive_learning_at_horizon_impl(variable, auto_stop, expected_signals);
}}

can_stop_hard_competitive_learning_at_horizon! {
    case01_constant_auto_stop: (false, true, 3),
    case02_variable_auto_stop: (true, true, 3),
    case03_variable_no_auto_stop: (true, false, 3),
    case04_constant_no_auto_stop: (false, false, 10),
}

fn can_stop_hard_competitive_learning_at_horizon_impl(variable: bool, auto_stop: bool, expected_signals: usize) {
    let mut network = create_test_network(&[(0., 0.), (10., 0.)]);
    let params = HclParams { variable, t_max: 3., ..HclParams::default() };
    let config = SimulationConfig {
        auto_stop,
        ..create_test_config(Algorithm::HardCompetitiveLearning(params), 10)
    };

    let (engine, result) = run_batch(&mut network, &config, &ConstantSignal(Point::new(2., 0.)));

    assert_eq!(engine.signals(), expected_signals);
    assert_eq!(result.stop, expected_signals < 10);
    assert_eq!(result.repaint, expected_signals < 10);
}

#[test]
fn can_use_decaying_rate_when_variable() {
    let mut network = create_test_network(&[(0., 0.)]);
    let params = HclParams { variable: true, ..HclParams::default() };
    let config = create_test_config(Algorithm::HardCompetitiveLearning(params.clone()), 1);

    run_batch(&mut network, &config, &ConstantSignal(Point::new(100., 0.)));

    let expected = 100. * params.epsilon_schedule.at(1., params.t_max);
    assert!((network.store.node(0).position.x - expected).abs() < 1E-9);
}

#[test]
fn can_connect_winner_and_runner_up_without_moving() {
    let mut network = create_test_network(&[(0., 0.), (10., 0.), (100., 0.)]);
    let config = create_test_config(Algorithm::CompetitiveHebbian(ChlParams::default()), 3);

    run_batch(&mut network, &config, &ConstantSignal(Point::new(1., 0.)));

    let store = &network.store;
    assert_eq!(store.positions(), vec![Point::new(0., 0.), Point::new(10., 0.), Point::new(100., 0.)]);
    assert_eq!(store.edge_count(), 1);
    assert!(store.find_edge(0, 1).is_some());
    assert!(store.node(1).flags.is_second);
}

#[test]
fn can_stop_competitive_hebbian_learning() {
    let mut network = create_test_network(&[(0., 0.), (10., 0.)]);
    let config = create_test_config(Algorithm::CompetitiveHebbian(ChlParams { stop_after: 2 }), 5);

    let (engine, result) = run_batch(&mut network, &config, &ConstantSignal(Point::new(1., 0.)));

    assert!(result.stop);
    assert_eq!(engine.signals(), 2);
}
