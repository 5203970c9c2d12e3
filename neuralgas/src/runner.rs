//! Specifies a background runner which performs learning batches while other threads read the state.

#[cfg(test)]
#[path = "../tests/unit/runner_test.rs"]
mod runner_test;

use crate::learning::StepResult;
use crate::simulation::Simulation;
use crate::voronoi::{VoronoiMode, VoronoiOutcome};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A callback which is called after every batch, e.g. to trigger repaint or sound feedback.
pub type StepListener = Arc<dyn Fn(&StepResult) + Send + Sync>;

/// Runs learning batches on a worker thread. Every batch and every read holds a simulation lock,
/// so readers always see a state between two batches.
pub struct SimulationRunner {
    simulation: Arc<RwLock<Simulation>>,
    is_running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    delay: Duration,
    listener: Option<StepListener>,
}

impl SimulationRunner {
    /// Creates a new instance of `SimulationRunner` which sleeps `delay` between batches.
    pub fn new(simulation: Simulation, delay: Duration) -> Self {
        Self {
            simulation: Arc::new(RwLock::new(simulation)),
            is_running: Arc::new(AtomicBool::new(false)),
            worker: None,
            delay,
            listener: None,
        }
    }

    /// Sets a listener of batch results.
    pub fn with_listener(mut self, listener: StepListener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Starts the worker. Returns false if it is already running.
    pub fn start(&mut self) -> bool {
        if self.is_running.swap(true, Ordering::SeqCst) {
            return false;
        }

        // a previous worker could stop itself, it is finished at this point
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }

        let simulation = self.simulation.clone();
        let is_running = self.is_running.clone();
        let listener = self.listener.clone();
        let delay = self.delay;

        self.read(|simulation| simulation.environment().log("simulation runner started"));

        self.worker = Some(thread::spawn(move || {
            while is_running.load(Ordering::Relaxed) {
                let result = simulation.write().unwrap().step();

                if let Some(listener) = listener.as_ref() {
                    listener(&result);
                }

                if result.stop {
                    simulation.read().unwrap().environment().log("simulation finished");
                    is_running.store(false, Ordering::SeqCst);
                    break;
                }

                if !delay.is_zero() {
                    thread::sleep(delay);
                }
            }
        }));

        true
    }

    /// Requests the worker to stop after the current batch and waits for it.
    pub fn stop(&mut self) {
        let was_running = self.is_running.swap(false, Ordering::SeqCst);

        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }

        if was_running {
            self.read(|simulation| simulation.environment().log("simulation runner stopped"));
        }
    }

    /// Waits until the worker stops by itself (or is stopped from another thread via the flag).
    pub fn wait(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }

    /// Checks whether the worker is running.
    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    /// Returns a running flag which can be used to stop the worker cooperatively from anywhere.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        self.is_running.clone()
    }

    /// Reads simulation state under lock.
    pub fn read<R>(&self, func: impl FnOnce(&Simulation) -> R) -> R {
        func(&self.simulation.read().unwrap())
    }

    /// Changes simulation state under lock, e.g. to reset it or to change max nodes.
    pub fn write<R>(&self, func: impl FnOnce(&mut Simulation) -> R) -> R {
        func(&mut self.simulation.write().unwrap())
    }

    /// Computes Voronoi diagram on a stable snapshot.
    pub fn compute_voronoi(&self, mode: VoronoiMode) -> VoronoiOutcome {
        self.read(|simulation| simulation.compute_voronoi(mode))
    }
}

impl Drop for SimulationRunner {
    fn drop(&mut self) {
        self.is_running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
