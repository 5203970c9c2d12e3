use super::*;
use crate::helpers::signal::{UniformSignal, create_two_clusters};
use crate::helpers::utils::create_test_environment;
use crate::learning::{ChlParams, GrowingGridParams, HclParams, SomParams};
use crate::utils::Float;
use crate::voronoi::SegmentKind;

fn create_simulation(algorithm: Algorithm, max_nodes: usize) -> Simulation {
    let config = SimulationConfig {
        max_nodes,
        canvas: Canvas::new(200., 100.),
        discrete_signals: 50,
        ..SimulationConfig::new(algorithm)
    };

    Simulation::new(config, Arc::new(UniformSignal), create_test_environment()).expect("cannot create simulation")
}

parameterized_test! {can_build_initial_network, (name, max_nodes, expected_nodes, expected_edges, has_grid), {
    can_build_initial_network_impl(name, max_nodes, expected_nodes, expected_edges, has_grid);
}}

can_build_initial_network! {
    case01_gng: ("GNG", 50, 2, 0, false),
    case02_gng_u: ("GNG-U", 50, 2, 0, false),
    case03_hcl: ("HCL", 20, 20, 0, false),
    case04_ng: ("NG", 20, 20, 0, false),
    case05_ngchl: ("NGCHL", 20, 20, 0, false),
    case06_chl: ("CHL", 20, 20, 0, false),
    case07_gg: ("GG", 50, 9, 12, true),
    case08_gr: ("GR", 50, 3, 2, true),
    case09_som: ("SOM", 5, 100, 180, true),
    case10_lbg: ("LBG", 10, 10, 0, false),
    case11_lbg_u: ("LBG-U", 10, 10, 0, false),
}

fn can_build_initial_network_impl(
    name: &str,
    max_nodes: usize,
    expected_nodes: usize,
    expected_edges: usize,
    has_grid: bool,
) {
    let simulation = create_simulation(Algorithm::from_name(name).expect("unknown algorithm"), max_nodes);

    let network = simulation.network();
    assert_eq!(network.size(), expected_nodes);
    assert_eq!(network.store.edge_count(), expected_edges);
    assert_eq!(network.grid.is_some(), has_grid);
    assert!(network.store.nodes().iter().all(|node| simulation.config().canvas.bounds().contains(&node.position)));
}

#[test]
fn can_prepare_discrete_signals_for_batch_algorithms() {
    let simulation = create_simulation(Algorithm::Lbg, 10);

    assert_eq!(simulation.engine().discrete_signals().len(), 50);
    assert!(simulation.network().store.nodes().iter().all(|node| node.flags.has_moved));
    assert!(simulation.network().store.nodes().iter().all(|node| {
        simulation.engine().discrete_signals().points().contains(&node.position)
    }));
}

#[test]
fn can_use_discrete_set_of_source() {
    let config = SimulationConfig { max_nodes: 2, ..SimulationConfig::new(Algorithm::Lbg) };
    let source = Arc::new(create_two_clusters((20., 20.), (80., 80.)));

    let simulation = Simulation::new(config, source, create_test_environment()).unwrap();

    assert_eq!(simulation.engine().discrete_signals().len(), 18);
}

#[test]
fn can_refuse_invalid_config() {
    let config = SimulationConfig { step_size: 0, ..SimulationConfig::default() };

    let result = Simulation::new(config, Arc::new(UniformSignal), create_test_environment());

    let err = result.err().expect("config should be refused");
    assert!(err.to_string().starts_with("invalid simulation config"));
    assert!(err.to_string().contains("step size"));
}

#[test]
fn can_run_steps_and_reset() {
    let mut simulation = create_simulation(Algorithm::from_name("GNG").unwrap(), 50);

    let result = simulation.step();
    simulation.step();

    assert!(!result.stop);
    assert_eq!(simulation.engine().signals(), 2 * simulation.config().step_size);
    assert_eq!(simulation.engine().last_signals().len(), simulation.config().step_size);

    simulation.reset().expect("cannot reset");

    assert_eq!(simulation.engine().signals(), 0);
    assert_eq!(simulation.network().size(), 2);
}

#[test]
fn can_compute_voronoi_when_node_limit_is_reached() {
    let mut simulation = create_simulation(Algorithm::HardCompetitiveLearning(HclParams::default()), 5);

    let outcome = simulation.compute_voronoi(VoronoiMode::DELAUNAY);
    let VoronoiOutcome::Computed(segments) = outcome else { panic!("diagram is skipped") };
    assert!(!segments.is_empty());
    assert!(segments.iter().all(|segment| segment.kind == SegmentKind::Delaunay));

    simulation.set_max_nodes(10);
    assert_eq!(simulation.compute_voronoi(VoronoiMode::BOTH), VoronoiOutcome::Skipped);
}

#[test]
fn can_compute_voronoi_for_growing_networks() {
    let simulation = create_simulation(Algorithm::from_name("GNG").unwrap(), 50);

    assert!(matches!(simulation.compute_voronoi(VoronoiMode::BOTH), VoronoiOutcome::Computed(_)));
}

#[test]
fn can_compute_empty_voronoi_for_empty_network() {
    let mut simulation = create_simulation(Algorithm::CompetitiveHebbian(ChlParams::default()), 5);
    simulation.network_mut().clear();

    assert_eq!(simulation.compute_voronoi(VoronoiMode::BOTH), VoronoiOutcome::Computed(vec![]));
}

#[test]
fn can_resize_canvas() {
    let mut simulation = create_simulation(Algorithm::Lbg, 10);
    let positions = simulation.network().store.positions();
    let signals = simulation.engine().discrete_signals().points().to_vec();

    simulation.resize(Canvas::new(100., 300.)).expect("cannot resize");

    assert_eq!(simulation.config().canvas, Canvas::new(100., 300.));
    simulation.network().store.positions().iter().zip(positions.iter()).for_each(|(actual, original)| {
        assert!((actual.x - original.x * 0.5).abs() < 1E-9);
        assert!((actual.y - original.y * 3.).abs() < 1E-9);
    });
    simulation.engine().discrete_signals().points().iter().zip(signals.iter()).for_each(|(actual, original)| {
        assert!((actual.x - original.x * 0.5).abs() < 1E-9);
        assert!((actual.y - original.y * 3.).abs() < 1E-9);
    });
}

#[test]
fn can_refuse_resize_to_empty_canvas() {
    let mut simulation = create_simulation(Algorithm::Lbg, 10);

    assert!(simulation.resize(Canvas::new(0., 300.)).is_err());
    assert!(simulation.resize(Canvas::new(100., Float::NAN)).is_err());
    assert_eq!(simulation.config().canvas, Canvas::new(200., 100.));
}

#[test]
fn can_clamp_max_nodes() {
    let mut simulation = create_simulation(Algorithm::from_name("GNG").unwrap(), 50);

    simulation.set_max_nodes(0);
    assert_eq!(simulation.config().max_nodes, 1);

    simulation.set_max_nodes(usize::MAX);
    assert_eq!(simulation.config().max_nodes, simulation.config().capacity);
    assert_eq!(simulation.network().store.max_nodes(), simulation.config().capacity);
}

#[test]
fn can_keep_som_node_limit_on_change() {
    let algorithm = Algorithm::SelfOrganizingMap(SomParams { width: 3, height: 2, ..SomParams::default() });
    let mut simulation = create_simulation(algorithm, 50);

    simulation.set_max_nodes(2);

    assert_eq!(simulation.network().store.max_nodes(), 6);
    assert_eq!(simulation.network().size(), 6);
}

#[test]
fn can_refuse_grid_which_does_not_fit_into_capacity() {
    let config = SimulationConfig {
        capacity: 4,
        max_nodes: 4,
        ..SimulationConfig::new(Algorithm::GrowingGrid(GrowingGridParams::default()))
    };

    assert!(Simulation::new(config, Arc::new(UniformSignal), create_test_environment()).is_err());
}
