//! Specifies a simulation context which ties configuration, network and learning state together.

#[cfg(test)]
#[path = "../tests/unit/simulation_test.rs"]
mod simulation_test;

use crate::learning::{Algorithm, LearningEngine, SimulationConfig, StepResult};
use crate::network::{GridTopology, Network, NodeStore};
use crate::signal::{DiscreteSignals, SignalSource};
use crate::utils::{Canvas, Environment, GenericResult};
use crate::voronoi::{VoronoiMode, VoronoiOutcome, compute_voronoi};
use std::sync::Arc;

/// Ratio between segment limit and node capacity.
const SEGMENTS_PER_NODE: usize = 6;

/// Keeps the whole simulation state: configuration, signal source, network and learning memory.
pub struct Simulation {
    config: SimulationConfig,
    source: Arc<dyn SignalSource>,
    environment: Environment,
    network: Network,
    engine: LearningEngine,
}

impl Simulation {
    /// Creates a new instance of `Simulation` with initial network built for the configured algorithm.
    pub fn new(config: SimulationConfig, source: Arc<dyn SignalSource>, environment: Environment) -> GenericResult<Self> {
        config.validate().map_err(|err| err.with_context("invalid simulation config"))?;

        let (network, engine) = build(&config, source.as_ref(), &environment)?;

        Ok(Self { config, source, environment, network, engine })
    }

    /// Rebuilds initial network from the current configuration.
    pub fn reset(&mut self) -> GenericResult<()> {
        let (network, engine) = build(&self.config, self.source.as_ref(), &self.environment)?;
        self.network = network;
        self.engine = engine;

        Ok(())
    }

    /// Runs one learning batch.
    pub fn step(&mut self) -> StepResult {
        self.engine.step(&mut self.network, &self.config, self.source.as_ref(), &self.environment)
    }

    /// Computes Voronoi diagram and/or Delaunay triangulation of current node positions.
    ///
    /// The diagram is computed only when the network has reached its node limit or the algorithm
    /// grows the network itself, otherwise the call is skipped. An empty network gives an empty diagram.
    pub fn compute_voronoi(&self, mode: VoronoiMode) -> VoronoiOutcome {
        let size = self.network.size();

        if size == 0 {
            return VoronoiOutcome::Computed(Vec::default());
        }

        if size != self.network.store.max_nodes() && !self.config.algorithm.is_growing() {
            return VoronoiOutcome::Skipped;
        }

        let limit = SEGMENTS_PER_NODE * self.config.capacity;
        let positions = self.network.store.positions();

        VoronoiOutcome::Computed(compute_voronoi(positions.as_slice(), self.config.canvas.bounds(), mode, limit))
    }

    /// Changes canvas size, node positions and discrete signals are scaled proportionally.
    pub fn resize(&mut self, canvas: Canvas) -> GenericResult<()> {
        if !(canvas.width > 0. && canvas.height > 0. && canvas.width.is_finite() && canvas.height.is_finite()) {
            return Err(format!("cannot resize to {canvas:?}").into());
        }

        let kx = canvas.width / self.config.canvas.width;
        let ky = canvas.height / self.config.canvas.height;

        self.network.store.nodes_mut().iter_mut().for_each(|node| {
            node.position.x *= kx;
            node.position.y *= ky;
            node.previous.x *= kx;
            node.previous.y *= ky;
        });
        self.engine.discrete_signals_mut().rescale(kx, ky);
        self.config.canvas = canvas;

        Ok(())
    }

    /// Changes the soft node limit at runtime. Growing neural gas removes extra nodes gradually.
    pub fn set_max_nodes(&mut self, max_nodes: usize) {
        self.config.max_nodes = max_nodes.clamp(1, self.config.capacity);
        self.network.store.set_max_nodes(self.config.effective_max_nodes());
    }

    /// Returns configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Returns mutable network, e.g. to pin nodes.
    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    /// Returns learning engine.
    pub fn engine(&self) -> &LearningEngine {
        &self.engine
    }

    /// Returns environment.
    pub fn environment(&self) -> &Environment {
        &self.environment
    }
}

fn build(
    config: &SimulationConfig,
    source: &dyn SignalSource,
    environment: &Environment,
) -> GenericResult<(Network, LearningEngine)> {
    let max_nodes = config.effective_max_nodes();
    let random = environment.random.as_ref();
    let canvas = &config.canvas;

    let mut network = Network::new(config.capacity, max_nodes, config.max_degree);
    let mut discrete = DiscreteSignals::default();

    let add_nodes = |store: &mut NodeStore, count: usize| {
        (0..count).for_each(|_| {
            store.add_node_from_signal(source, canvas, random, config.random_init);
        })
    };

    let create_grid = |store: &mut NodeStore, width: usize, height: usize| {
        GridTopology::create(store, width, height, || NodeStore::initial_position(source, canvas, random, config.random_init))
            .ok_or_else(|| format!("cannot create {width}x{height} grid with {max_nodes} nodes limit"))
    };

    match &config.algorithm {
        Algorithm::GrowingNeuralGas(_) | Algorithm::GrowingNeuralGasWithUtility(_) => add_nodes(&mut network.store, 2),
        Algorithm::HardCompetitiveLearning(_)
        | Algorithm::NeuralGas(_)
        | Algorithm::NeuralGasWithHebbian(_)
        | Algorithm::CompetitiveHebbian(_) => add_nodes(&mut network.store, max_nodes),
        Algorithm::GrowingGrid(params) => {
            network.grid = Some(create_grid(&mut network.store, params.width, params.height)?);
        }
        Algorithm::SelfOrganizingMap(params) => {
            network.grid = Some(create_grid(&mut network.store, params.width, params.height)?);
        }
        Algorithm::Lbg | Algorithm::LbgWithUtility => {
            discrete = DiscreteSignals::generate(source, canvas, config.discrete_signals, random);

            if !discrete.is_empty() {
                let offset = random.uniform_int(0, discrete.len() as i32 - 1) as usize;
                (0..max_nodes).map(|idx| discrete.points()[(offset + idx) % discrete.len()]).for_each(|position| {
                    if let Some(idx) = network.store.add_node(position) {
                        network.store.node_mut(idx).flags.has_moved = true;
                    }
                });
            }
        }
    }

    environment.log(&format!("{} initialized with {} nodes", config.algorithm.name(), network.size()));

    Ok((network, LearningEngine::new(discrete)))
}
