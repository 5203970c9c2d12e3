//! Simulation configuration.

#![allow(missing_docs)]

#[cfg(test)]
#[path = "../../../tests/unit/extensions/simulate/config_test.rs"]
mod config_test;

use neuralgas::prelude::*;
use serde::Deserialize;
use std::io::{BufReader, Read};

/// A simulation configuration. Every omitted value falls back to the library default.
#[derive(Clone, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Specifies learning algorithm and its parameters.
    pub algorithm: Option<AlgorithmConfig>,
    /// Specifies network limits.
    pub network: Option<NetworkConfig>,
    /// Specifies learning loop settings.
    pub learning: Option<LearningConfig>,
    /// Specifies drawing area.
    pub canvas: Option<CanvasConfig>,
    /// Specifies signal distribution.
    pub distribution: Option<DistributionConfig>,
}

/// A geometric decay schedule.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConfig {
    pub initial: Option<Float>,
    pub last: Option<Float>,
}

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum AlgorithmConfig {
    /// Growing neural gas, with utility based removal when `utility` is set.
    #[serde(rename(deserialize = "gng"))]
    #[serde(rename_all = "camelCase")]
    GrowingNeuralGas {
        utility: Option<bool>,
        lambda: Option<usize>,
        epsilon_winner: Option<Float>,
        epsilon_neighbour: Option<Float>,
        alpha: Option<Float>,
        utility_factor: Option<Float>,
        no_new_nodes: Option<bool>,
    },

    /// Hard competitive learning.
    #[serde(rename(deserialize = "hcl"))]
    #[serde(rename_all = "camelCase")]
    HardCompetitiveLearning {
        epsilon: Option<Float>,
        variable: Option<bool>,
        epsilon_schedule: Option<ScheduleConfig>,
        t_max: Option<Float>,
    },

    /// Neural gas, with competitive hebbian learning when `hebbian` is set.
    #[serde(rename(deserialize = "ng"))]
    #[serde(rename_all = "camelCase")]
    NeuralGas {
        hebbian: Option<bool>,
        lambda: Option<ScheduleConfig>,
        epsilon: Option<ScheduleConfig>,
        edge_age: Option<ScheduleConfig>,
        t_max: Option<Float>,
    },

    /// Competitive hebbian learning.
    #[serde(rename(deserialize = "chl"))]
    #[serde(rename_all = "camelCase")]
    CompetitiveHebbian { stop_after: Option<usize> },

    /// Growing grid, starts from growing ring defaults when `ring` is set.
    #[serde(rename(deserialize = "growing-grid"))]
    #[serde(rename_all = "camelCase")]
    GrowingGrid {
        ring: Option<bool>,
        width: Option<usize>,
        height: Option<usize>,
        max_height: Option<usize>,
        torus: Option<bool>,
        epsilon: Option<ScheduleConfig>,
        sigma: Option<Float>,
        insertion_factor: Option<Float>,
        fine_tuning_factor: Option<Float>,
        no_new_nodes: Option<bool>,
    },

    /// Self-organizing map.
    #[serde(rename(deserialize = "som"))]
    #[serde(rename_all = "camelCase")]
    SelfOrganizingMap {
        width: Option<usize>,
        height: Option<usize>,
        torus: Option<bool>,
        epsilon: Option<ScheduleConfig>,
        sigma: Option<ScheduleConfig>,
        t_max: Option<Float>,
    },

    /// Linde-Buzo-Gray, with utility based relocation when `utility` is set.
    #[serde(rename(deserialize = "lbg"))]
    #[serde(rename_all = "camelCase")]
    Lbg { utility: Option<bool> },
}

#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    pub max_nodes: Option<usize>,
    pub capacity: Option<usize>,
    pub max_degree: Option<usize>,
    pub max_edge_age: Option<usize>,
}

#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LearningConfig {
    pub step_size: Option<usize>,
    pub random_init: Option<bool>,
    pub auto_stop: Option<bool>,
    pub decay: Option<Float>,
    pub discrete_signals: Option<usize>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct CanvasConfig {
    pub width: Float,
    pub height: Float,
}

/// Specifies a signal distribution. Parameters are relative to the canvas size.
#[derive(Clone, Deserialize, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum DistributionConfig {
    /// A filled rectangle with a small margin.
    #[serde(rename(deserialize = "rectangle"))]
    Rectangle,

    /// A filled circle in the canvas center.
    #[serde(rename(deserialize = "circle"))]
    Circle,

    /// A ring, `width` is a fraction of the outer radius. Default is 0.4.
    #[serde(rename(deserialize = "ring"))]
    Ring { width: Option<Float> },

    /// A normal distribution around the canvas center, `deviation` is a fraction of the smaller side.
    /// Default is 0.15.
    #[serde(rename(deserialize = "gaussian"))]
    Gaussian { deviation: Option<Float> },

    /// Several normal distributions placed on a circle. Defaults are 5 clusters with 0.05 deviation.
    #[serde(rename(deserialize = "clusters"))]
    Clusters { count: Option<usize>, deviation: Option<Float> },
}

impl DistributionConfig {
    /// Returns distribution with default parameters by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "rectangle" => DistributionConfig::Rectangle,
            "circle" => DistributionConfig::Circle,
            "ring" => DistributionConfig::Ring { width: None },
            "gaussian" => DistributionConfig::Gaussian { deviation: None },
            "clusters" => DistributionConfig::Clusters { count: None, deviation: None },
            _ => return None,
        })
    }
}

/// Reads config from reader.
pub fn read_config<R: Read>(reader: BufReader<R>) -> Result<Config, String> {
    serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize config: '{err}'"))
}

/// Creates a simulation config from the file config, omitted values are taken from defaults.
pub fn create_simulation_config(config: &Config) -> SimulationConfig {
    let default = SimulationConfig::default();

    let algorithm = config.algorithm.as_ref().map_or(default.algorithm.clone(), create_algorithm);
    let network = config.network.as_ref();
    let learning = config.learning.as_ref();

    SimulationConfig {
        algorithm,
        max_nodes: network.and_then(|n| n.max_nodes).unwrap_or(default.max_nodes),
        capacity: network.and_then(|n| n.capacity).unwrap_or(default.capacity),
        max_degree: network.and_then(|n| n.max_degree).unwrap_or(default.max_degree),
        max_edge_age: network.and_then(|n| n.max_edge_age).unwrap_or(default.max_edge_age),
        step_size: learning.and_then(|l| l.step_size).unwrap_or(default.step_size),
        canvas: config.canvas.as_ref().map_or(default.canvas, |canvas| Canvas::new(canvas.width, canvas.height)),
        random_init: learning.and_then(|l| l.random_init).unwrap_or(default.random_init),
        auto_stop: learning.and_then(|l| l.auto_stop).unwrap_or(default.auto_stop),
        decay: learning.and_then(|l| l.decay).unwrap_or(default.decay),
        discrete_signals: learning.and_then(|l| l.discrete_signals).unwrap_or(default.discrete_signals),
    }
}

fn create_algorithm(config: &AlgorithmConfig) -> Algorithm {
    match config {
        AlgorithmConfig::GrowingNeuralGas {
            utility,
            lambda,
            epsilon_winner,
            epsilon_neighbour,
            alpha,
            utility_factor,
            no_new_nodes,
        } => {
            let default = GngParams::default();
            let params = GngParams {
                lambda: lambda.unwrap_or(default.lambda),
                epsilon_winner: epsilon_winner.unwrap_or(default.epsilon_winner),
                epsilon_neighbour: epsilon_neighbour.unwrap_or(default.epsilon_neighbour),
                alpha: alpha.unwrap_or(default.alpha),
                utility_factor: utility_factor.unwrap_or(default.utility_factor),
                no_new_nodes: no_new_nodes.unwrap_or(default.no_new_nodes),
            };

            if utility.unwrap_or(false) {
                Algorithm::GrowingNeuralGasWithUtility(params)
            } else {
                Algorithm::GrowingNeuralGas(params)
            }
        }
        AlgorithmConfig::HardCompetitiveLearning { epsilon, variable, epsilon_schedule, t_max } => {
            let default = HclParams::default();
            Algorithm::HardCompetitiveLearning(HclParams {
                epsilon: epsilon.unwrap_or(default.epsilon),
                variable: variable.unwrap_or(default.variable),
                epsilon_schedule: create_schedule(epsilon_schedule.as_ref(), default.epsilon_schedule),
                t_max: t_max.unwrap_or(default.t_max),
            })
        }
        AlgorithmConfig::NeuralGas { hebbian, lambda, epsilon, edge_age, t_max } => {
            let default = NeuralGasParams::default();
            let params = NeuralGasParams {
                lambda: create_schedule(lambda.as_ref(), default.lambda),
                epsilon: create_schedule(epsilon.as_ref(), default.epsilon),
                edge_age: create_schedule(edge_age.as_ref(), default.edge_age),
                t_max: t_max.unwrap_or(default.t_max),
            };

            if hebbian.unwrap_or(false) { Algorithm::NeuralGasWithHebbian(params) } else { Algorithm::NeuralGas(params) }
        }
        AlgorithmConfig::CompetitiveHebbian { stop_after } => Algorithm::CompetitiveHebbian(ChlParams {
            stop_after: stop_after.unwrap_or(ChlParams::default().stop_after),
        }),
        AlgorithmConfig::GrowingGrid {
            ring,
            width,
            height,
            max_height,
            torus,
            epsilon,
            sigma,
            insertion_factor,
            fine_tuning_factor,
            no_new_nodes,
        } => {
            let default = if ring.unwrap_or(false) { GrowingGridParams::ring() } else { GrowingGridParams::default() };
            Algorithm::GrowingGrid(GrowingGridParams {
                width: width.unwrap_or(default.width),
                height: height.unwrap_or(default.height),
                max_height: max_height.unwrap_or(default.max_height),
                torus: torus.unwrap_or(default.torus),
                epsilon: create_schedule(epsilon.as_ref(), default.epsilon),
                sigma: sigma.unwrap_or(default.sigma),
                insertion_factor: insertion_factor.unwrap_or(default.insertion_factor),
                fine_tuning_factor: fine_tuning_factor.unwrap_or(default.fine_tuning_factor),
                no_new_nodes: no_new_nodes.unwrap_or(default.no_new_nodes),
            })
        }
        AlgorithmConfig::SelfOrganizingMap { width, height, torus, epsilon, sigma, t_max } => {
            let default = SomParams::default();
            Algorithm::SelfOrganizingMap(SomParams {
                width: width.unwrap_or(default.width),
                height: height.unwrap_or(default.height),
                torus: torus.unwrap_or(default.torus),
                epsilon: create_schedule(epsilon.as_ref(), default.epsilon),
                sigma: create_schedule(sigma.as_ref(), default.sigma),
                t_max: t_max.unwrap_or(default.t_max),
            })
        }
        AlgorithmConfig::Lbg { utility } => {
            if utility.unwrap_or(false) {
                Algorithm::LbgWithUtility
            } else {
                Algorithm::Lbg
            }
        }
    }
}

fn create_schedule(config: Option<&ScheduleConfig>, default: Schedule) -> Schedule {
    config.map_or(default, |config| {
        Schedule::new(config.initial.unwrap_or(default.initial), config.last.unwrap_or(default.last))
    })
}
