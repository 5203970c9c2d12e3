use super::*;
use crate::helpers::signal::UniformSignal;
use crate::helpers::utils::create_test_environment;
use crate::learning::{Algorithm, ChlParams, SimulationConfig};
use std::sync::atomic::AtomicUsize;

fn create_runner(algorithm: Algorithm) -> SimulationRunner {
    let config = SimulationConfig { max_nodes: 10, ..SimulationConfig::new(algorithm) };
    let simulation =
        Simulation::new(config, Arc::new(UniformSignal), create_test_environment()).expect("cannot create simulation");

    SimulationRunner::new(simulation, Duration::from_millis(1))
}

fn create_no_stop_runner() -> SimulationRunner {
    let algorithm = Algorithm::from_name("GNG").unwrap();
    let runner = create_runner(algorithm);
    runner.write(|simulation| simulation.set_max_nodes(100));

    runner
}

#[test]
fn can_start_and_stop_runner() {
    let mut runner = create_no_stop_runner();

    assert!(runner.start());
    assert!(!runner.start());
    assert!(runner.is_running());

    while runner.read(|simulation| simulation.engine().signals()) == 0 {
        thread::yield_now();
    }
    runner.stop();

    assert!(!runner.is_running());
    let signals = runner.read(|simulation| simulation.engine().signals());
    assert_eq!(signals % 50, 0);
    thread::sleep(Duration::from_millis(5));
    assert_eq!(runner.read(|simulation| simulation.engine().signals()), signals);
}

#[test]
fn can_stop_by_itself_and_notify_listener() {
    let batches = Arc::new(AtomicUsize::new(0));
    let stops = Arc::new(AtomicUsize::new(0));
    let (batches_copy, stops_copy) = (batches.clone(), stops.clone());
    let mut runner = create_runner(Algorithm::CompetitiveHebbian(ChlParams { stop_after: 100 })).with_listener(
        Arc::new(move |result: &StepResult| {
            batches_copy.fetch_add(1, Ordering::SeqCst);
            if result.stop {
                stops_copy.fetch_add(1, Ordering::SeqCst);
            }
        }),
    );

    runner.start();
    runner.wait();

    assert!(!runner.is_running());
    assert_eq!(batches.load(Ordering::SeqCst), 2);
    assert_eq!(stops.load(Ordering::SeqCst), 1);
    assert_eq!(runner.read(|simulation| simulation.engine().signals()), 100);
}

#[test]
fn can_restart_after_stop() {
    let mut runner = create_no_stop_runner();

    runner.start();
    runner.stop();
    let signals = runner.read(|simulation| simulation.engine().signals());

    assert!(runner.start());
    while runner.read(|simulation| simulation.engine().signals()) == signals {
        thread::yield_now();
    }
    runner.stop();

    assert!(runner.read(|simulation| simulation.engine().signals()) > signals);
}

#[test]
fn can_stop_cooperatively_via_flag() {
    let mut runner = create_no_stop_runner();
    let flag = runner.running_flag();

    runner.start();
    flag.store(false, Ordering::SeqCst);
    runner.wait();

    assert!(!runner.is_running());
}

#[test]
fn can_compute_voronoi_while_running() {
    let mut runner = create_no_stop_runner();

    runner.start();
    let outcome = runner.compute_voronoi(VoronoiMode::BOTH);
    runner.stop();

    let VoronoiOutcome::Computed(segments) = outcome else { panic!("diagram is skipped") };
    assert!(segments.iter().all(|segment| segment.from.is_finite() && segment.to.is_finite()));
}
