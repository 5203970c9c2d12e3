#[cfg(test)]
#[path = "../../tests/unit/learning/engine_test.rs"]
mod engine_test;

use super::*;
use crate::network::{Network, NodeStore};
use crate::signal::{DiscreteSignals, SignalSource};
use crate::utils::{Environment, Float, Point};

/// A result of one learning batch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepResult {
    /// Network state should be repainted.
    pub repaint: bool,
    /// The run should stop.
    pub stop: bool,
    /// At least one node was inserted during the batch.
    pub inserted: bool,
    /// Sum of squared distances between signals and their winners.
    pub error_value: Float,
}

/// Keeps learning state which survives between batches: signal counter and algorithm specific memory.
pub struct LearningEngine {
    signals: usize,
    discrete: DiscreteSignals,
    last_signals: Vec<Point>,
    ranking: neural_gas::Ranking,
    growth: lattice::GrowthState,
    lbg: lbg::LbgState,
}

impl LearningEngine {
    /// Creates a new instance of `LearningEngine` with given discrete signal set (can be empty for
    /// continuous algorithms).
    pub fn new(discrete: DiscreteSignals) -> Self {
        Self {
            signals: 0,
            discrete,
            last_signals: Vec::default(),
            ranking: Default::default(),
            growth: Default::default(),
            lbg: Default::default(),
        }
    }

    /// Returns amount of processed signals (elementary updates).
    pub fn signals(&self) -> usize {
        self.signals
    }

    /// Returns signals of the last batch.
    pub fn last_signals(&self) -> &[Point] {
        self.last_signals.as_slice()
    }

    /// Returns discrete signal set.
    pub fn discrete_signals(&self) -> &DiscreteSignals {
        &self.discrete
    }

    /// Returns mutable discrete signal set.
    pub fn discrete_signals_mut(&mut self) -> &mut DiscreteSignals {
        &mut self.discrete
    }

    /// Returns fine-tuning progress of growing grid in percent, if it is in fine-tuning phase.
    pub fn fine_tuning_progress(&self) -> Option<usize> {
        self.growth.progress()
    }

    /// Runs one batch of `step_size` elementary updates. The batch ends earlier if an update reports stop.
    pub fn step(
        &mut self,
        network: &mut Network,
        config: &SimulationConfig,
        source: &dyn SignalSource,
        environment: &Environment,
    ) -> StepResult {
        let mut result = StepResult::default();
        self.last_signals.clear();

        if network.size() == 0 {
            return result;
        }

        for _ in 0..config.step_size {
            self.signals += 1;

            if config.algorithm.is_discrete() {
                let utility = matches!(config.algorithm, Algorithm::LbgWithUtility);
                let context = lbg::LbgContext { utility, auto_stop: config.auto_stop, environment };
                lbg::learn(&mut network.store, &mut self.discrete, &mut self.lbg, &context, &mut result);
            } else {
                self.learn_signal(network, config, source, environment, &mut result);
            }

            if result.stop {
                break;
            }
        }

        result
    }

    fn learn_signal(
        &mut self,
        network: &mut Network,
        config: &SimulationConfig,
        source: &dyn SignalSource,
        environment: &Environment,
        result: &mut StepResult,
    ) {
        let time = self.signals;
        let signal = source.sample(&config.canvas, environment.random.as_ref());

        if !signal.is_finite() {
            environment.log(&format!("non-finite signal ({}, {}) at {time}, stopping", signal.x, signal.y));
            result.stop = true;
            return;
        }

        self.last_signals.push(signal);

        let clear_recent = match &config.algorithm {
            Algorithm::GrowingNeuralGas(params) | Algorithm::GrowingNeuralGasWithUtility(params) => {
                !params.no_new_nodes && time % params.lambda == 0
            }
            _ => false,
        };

        let Some(scan) = SignalScan::new(&mut network.store, &signal, 1. - config.decay, clear_recent) else {
            return;
        };

        let winner = network.store.node_mut(scan.winner);
        if !winner.position.is_finite() {
            environment.log(&format!("winner node {} has non-finite position, stopping", scan.winner));
            result.stop = true;
            return;
        }

        winner.flags.is_winner = true;
        winner.remember_position();
        result.error_value += scan.winner_distance;

        let context = SignalContext { signal, time, config, environment };

        match &config.algorithm {
            Algorithm::GrowingNeuralGas(params) => gng::adapt(network, &scan, params, false, &context, result),
            Algorithm::GrowingNeuralGasWithUtility(params) => gng::adapt(network, &scan, params, true, &context, result),
            Algorithm::HardCompetitiveLearning(params) => competitive::adapt_hcl(network, &scan, params, &context, result),
            Algorithm::NeuralGas(params) => {
                neural_gas::adapt(network, &mut self.ranking, params, false, &context, result)
            }
            Algorithm::NeuralGasWithHebbian(params) => {
                neural_gas::adapt(network, &mut self.ranking, params, true, &context, result)
            }
            Algorithm::CompetitiveHebbian(params) => competitive::adapt_chl(network, &scan, params, &context, result),
            Algorithm::GrowingGrid(params) => {
                lattice::adapt_growing(network, &mut self.growth, &scan, params, &context, result)
            }
            Algorithm::SelfOrganizingMap(params) => lattice::adapt_som(network, &scan, params, &context, result),
            Algorithm::Lbg | Algorithm::LbgWithUtility => {}
        }
    }
}

/// Keeps data of a single signal shared by all online algorithms.
pub(crate) struct SignalContext<'a> {
    pub signal: Point,
    pub time: usize,
    pub config: &'a SimulationConfig,
    pub environment: &'a Environment,
}

/// Results of a single pass over all nodes for a signal.
#[derive(Clone, Debug)]
pub(crate) struct SignalScan {
    pub winner: usize,
    pub second: Option<usize>,
    pub winner_distance: Float,
    pub second_distance: Float,
    pub max_error_node: usize,
    pub max_error: Float,
    pub min_utility_node: usize,
    pub min_utility: Float,
    pub isolated: Option<usize>,
}

impl SignalScan {
    /// Computes squared distances to the signal, finds the winner and the runner-up, and decays
    /// node error, utility and tau at the same time. Returns `None` for an empty store.
    ///
    /// The winner is tracked with `<=`, so the last of equally distant nodes wins.
    pub fn new(store: &mut NodeStore, signal: &Point, decay_factor: Float, clear_recent: bool) -> Option<Self> {
        if store.is_empty() {
            return None;
        }

        let mut scan = Self {
            winner: 0,
            second: None,
            winner_distance: Float::MAX,
            second_distance: Float::MAX,
            max_error_node: 0,
            max_error: 0.,
            min_utility_node: 0,
            min_utility: Float::MAX,
            isolated: None,
        };

        for (idx, node) in store.nodes_mut().iter_mut().enumerate() {
            node.reset_signal_flags();
            if clear_recent {
                node.flags.is_recently_inserted = false;
            }

            if node.degree() == 0 {
                scan.isolated = Some(idx);
            }

            node.sqr_dist = node.position.sqr_distance(signal);
            node.error *= decay_factor;
            node.utility *= decay_factor;
            node.tau *= decay_factor;

            if node.sqr_dist <= scan.winner_distance {
                scan.second = if idx == 0 { None } else { Some(scan.winner) };
                scan.second_distance = scan.winner_distance;
                scan.winner = idx;
                scan.winner_distance = node.sqr_dist;
            } else if node.sqr_dist < scan.second_distance {
                scan.second = Some(idx);
                scan.second_distance = node.sqr_dist;
            }

            if node.error > scan.max_error {
                scan.max_error = node.error;
                scan.max_error_node = idx;
            }

            if node.utility < scan.min_utility {
                scan.min_utility = node.utility;
                scan.min_utility_node = idx;
            }
        }

        Some(scan)
    }
}
