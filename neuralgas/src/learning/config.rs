#[cfg(test)]
#[path = "../../tests/unit/learning/config_test.rs"]
mod config_test;

use crate::utils::{Canvas, Float, GenericError, GenericResult, geometric_decay};

/// Maximum amount of elementary updates in one batch.
pub const MAX_STEP_SIZE: usize = 500;

/// Maximum size of discrete signal set.
pub const MAX_DISCRETE_SIGNALS: usize = 20000;

/// A geometrically decaying value: `initial * (last / initial)^(t / horizon)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Schedule {
    /// Value at time zero.
    pub initial: Float,
    /// Value at the horizon.
    pub last: Float,
}

impl Schedule {
    /// Creates a new instance of `Schedule`.
    pub const fn new(initial: Float, last: Float) -> Self {
        Self { initial, last }
    }

    /// Returns value at given time.
    pub fn at(&self, time: Float, horizon: Float) -> Float {
        geometric_decay(self.initial, self.last, time, horizon)
    }

    fn validate(&self, name: &str) -> Option<GenericError> {
        if self.initial > 0. && self.last > 0. && self.initial.is_finite() && self.last.is_finite() {
            None
        } else {
            Some(format!("{name} schedule requires positive finite values, got {self:?}").into())
        }
    }
}

/// Parameters of growing neural gas (with or without utility).
#[derive(Clone, Debug)]
pub struct GngParams {
    /// Insertion interval in signals.
    pub lambda: usize,
    /// Winner learning rate.
    pub epsilon_winner: Float,
    /// Learning rate of winner's neighbours.
    pub epsilon_neighbour: Float,
    /// Error reduction of split nodes on insertion.
    pub alpha: Float,
    /// Utility threshold factor: minimum utility node is removed once `max_error > min_utility * k`.
    pub utility_factor: Float,
    /// Disables node insertion.
    pub no_new_nodes: bool,
}

impl Default for GngParams {
    fn default() -> Self {
        Self { lambda: 600, epsilon_winner: 0.1, epsilon_neighbour: 0.001, alpha: 0.5, utility_factor: 3., no_new_nodes: false }
    }
}

/// Parameters of hard competitive learning.
#[derive(Clone, Debug)]
pub struct HclParams {
    /// Constant learning rate.
    pub epsilon: Float,
    /// Uses decaying learning rate instead of constant one.
    pub variable: bool,
    /// Decaying learning rate.
    pub epsilon_schedule: Schedule,
    /// Time horizon in signals.
    pub t_max: Float,
}

impl Default for HclParams {
    fn default() -> Self {
        Self { epsilon: 0.1, variable: false, epsilon_schedule: Schedule::new(0.5, 0.005), t_max: 40000. }
    }
}

/// Parameters of neural gas (with or without competitive hebbian learning).
#[derive(Clone, Debug)]
pub struct NeuralGasParams {
    /// Neighbourhood range.
    pub lambda: Schedule,
    /// Learning rate.
    pub epsilon: Schedule,
    /// Maximum edge age, used only with competitive hebbian learning.
    pub edge_age: Schedule,
    /// Time horizon in signals.
    pub t_max: Float,
}

impl Default for NeuralGasParams {
    fn default() -> Self {
        Self {
            lambda: Schedule::new(30., 0.01),
            epsilon: Schedule::new(0.3, 0.05),
            edge_age: Schedule::new(20., 200.),
            t_max: 40000.,
        }
    }
}

/// Parameters of competitive hebbian learning.
#[derive(Clone, Debug)]
pub struct ChlParams {
    /// Amount of signals after which the run stops when auto stop is enabled.
    pub stop_after: usize,
}

impl Default for ChlParams {
    fn default() -> Self {
        Self { stop_after: 50000 }
    }
}

/// Parameters of growing grid.
#[derive(Clone, Debug)]
pub struct GrowingGridParams {
    /// Initial lattice width.
    pub width: usize,
    /// Initial lattice height.
    pub height: usize,
    /// Maximum lattice height, zero means unbounded.
    pub max_height: usize,
    /// Columns wrap around when computing lattice distance.
    pub torus: bool,
    /// Learning rate, decays only during fine-tuning.
    pub epsilon: Schedule,
    /// Width of the neighbourhood function.
    pub sigma: Float,
    /// Insertion interval in signals per node.
    pub insertion_factor: Float,
    /// Fine-tuning horizon in signals per node.
    pub fine_tuning_factor: Float,
    /// Disables lattice growth.
    pub no_new_nodes: bool,
}

impl GrowingGridParams {
    /// Returns parameters of growing ring: a one row toroidal lattice.
    pub fn ring() -> Self {
        Self { width: 3, height: 1, max_height: 1, torus: true, fine_tuning_factor: 10., ..Self::default() }
    }
}

impl Default for GrowingGridParams {
    fn default() -> Self {
        Self {
            width: 3,
            height: 3,
            max_height: 0,
            torus: false,
            epsilon: Schedule::new(0.1, 0.005),
            sigma: 0.9,
            insertion_factor: 30.,
            fine_tuning_factor: 100.,
            no_new_nodes: false,
        }
    }
}

/// Parameters of self-organizing map.
#[derive(Clone, Debug)]
pub struct SomParams {
    /// Lattice width.
    pub width: usize,
    /// Lattice height.
    pub height: usize,
    /// Columns wrap around when computing lattice distance.
    pub torus: bool,
    /// Learning rate.
    pub epsilon: Schedule,
    /// Width of the neighbourhood function.
    pub sigma: Schedule,
    /// Time horizon in signals.
    pub t_max: Float,
}

impl Default for SomParams {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            torus: false,
            epsilon: Schedule::new(0.1, 0.005),
            sigma: Schedule::new(5., 0.2),
            t_max: 40000.,
        }
    }
}

/// Specifies learning algorithm together with its parameters.
#[derive(Clone, Debug)]
pub enum Algorithm {
    /// Growing neural gas.
    GrowingNeuralGas(GngParams),
    /// Growing neural gas with utility based node removal.
    GrowingNeuralGasWithUtility(GngParams),
    /// Hard competitive learning.
    HardCompetitiveLearning(HclParams),
    /// Neural gas.
    NeuralGas(NeuralGasParams),
    /// Neural gas with competitive hebbian learning.
    NeuralGasWithHebbian(NeuralGasParams),
    /// Competitive hebbian learning.
    CompetitiveHebbian(ChlParams),
    /// Growing grid (or growing ring).
    GrowingGrid(GrowingGridParams),
    /// Self-organizing map.
    SelfOrganizingMap(SomParams),
    /// Linde-Buzo-Gray batch algorithm.
    Lbg,
    /// Linde-Buzo-Gray with utility based node relocation.
    LbgWithUtility,
}

impl Algorithm {
    /// Returns a short name of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::GrowingNeuralGas(_) => "GNG",
            Algorithm::GrowingNeuralGasWithUtility(_) => "GNG-U",
            Algorithm::HardCompetitiveLearning(_) => "HCL",
            Algorithm::NeuralGas(_) => "NG",
            Algorithm::NeuralGasWithHebbian(_) => "NGCHL",
            Algorithm::CompetitiveHebbian(_) => "CHL",
            Algorithm::GrowingGrid(params) if params.max_height == 1 && params.torus => "GR",
            Algorithm::GrowingGrid(_) => "GG",
            Algorithm::SelfOrganizingMap(_) => "SOM",
            Algorithm::Lbg => "LBG",
            Algorithm::LbgWithUtility => "LBG-U",
        }
    }

    /// Returns algorithm with default parameters by its short name (case insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name.to_ascii_uppercase().as_str() {
            "GNG" => Algorithm::GrowingNeuralGas(GngParams::default()),
            "GNG-U" | "GNGU" => Algorithm::GrowingNeuralGasWithUtility(GngParams::default()),
            "HCL" => Algorithm::HardCompetitiveLearning(HclParams::default()),
            "NG" => Algorithm::NeuralGas(NeuralGasParams::default()),
            "NGCHL" | "NG-CHL" => Algorithm::NeuralGasWithHebbian(NeuralGasParams::default()),
            "CHL" => Algorithm::CompetitiveHebbian(ChlParams::default()),
            "GG" => Algorithm::GrowingGrid(GrowingGridParams::default()),
            "GR" => Algorithm::GrowingGrid(GrowingGridParams::ring()),
            "SOM" => Algorithm::SelfOrganizingMap(SomParams::default()),
            "LBG" => Algorithm::Lbg,
            "LBG-U" | "LBGU" => Algorithm::LbgWithUtility,
            _ => return None,
        })
    }

    /// Checks whether algorithm works on a finite signal set.
    pub fn is_discrete(&self) -> bool {
        matches!(self, Algorithm::Lbg | Algorithm::LbgWithUtility)
    }

    /// Checks whether algorithm is one of growing neural gas variants.
    pub fn is_gng_type(&self) -> bool {
        matches!(self, Algorithm::GrowingNeuralGas(_) | Algorithm::GrowingNeuralGasWithUtility(_))
    }

    /// Checks whether the network grows its node count itself.
    pub fn is_growing(&self) -> bool {
        self.is_gng_type() || matches!(self, Algorithm::GrowingGrid(_))
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::GrowingNeuralGas(GngParams::default())
    }
}

/// A simulation configuration: selected algorithm with its parameters and shared limits.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Learning algorithm.
    pub algorithm: Algorithm,
    /// Soft limit of nodes.
    pub max_nodes: usize,
    /// Hard limit of nodes.
    pub capacity: usize,
    /// Maximum amount of neighbours per node.
    pub max_degree: usize,
    /// Edges older than this are removed.
    pub max_edge_age: usize,
    /// Amount of elementary updates in one batch.
    pub step_size: usize,
    /// Drawing area.
    pub canvas: Canvas,
    /// Places initial nodes randomly instead of at sampled signals.
    pub random_init: bool,
    /// Stops the run once the algorithm reaches its natural end.
    pub auto_stop: bool,
    /// Error, utility and tau decay per signal.
    pub decay: Float,
    /// Size of discrete signal set for batch algorithms.
    pub discrete_signals: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            max_nodes: 100,
            capacity: 30000,
            max_degree: 10,
            max_edge_age: 88,
            step_size: 50,
            canvas: Canvas::default(),
            random_init: false,
            auto_stop: true,
            decay: 0.0005,
            discrete_signals: 500,
        }
    }
}

impl SimulationConfig {
    /// Creates a default configuration for given algorithm.
    pub fn new(algorithm: Algorithm) -> Self {
        Self { algorithm, ..Self::default() }
    }

    /// Returns the soft node limit adjusted to the algorithm: a self-organizing map always has
    /// exactly `width * height` nodes.
    pub fn effective_max_nodes(&self) -> usize {
        match &self.algorithm {
            Algorithm::SelfOrganizingMap(params) => params.width * params.height,
            _ => self.max_nodes,
        }
    }

    /// Validates configuration, returns all found problems at once.
    pub fn validate(&self) -> GenericResult<()> {
        let mut errors: Vec<GenericError> = Vec::default();
        let mut check = |condition: bool, message: String| {
            if !condition {
                errors.push(message.into());
            }
        };

        check(self.capacity > 0, "capacity must be positive".to_string());
        check(
            self.max_nodes > 0 && self.max_nodes <= self.capacity,
            format!("max nodes must be in [1, {}], got {}", self.capacity, self.max_nodes),
        );
        check(self.max_degree >= 4, format!("max degree must be at least 4, got {}", self.max_degree));
        check(
            (1..=MAX_STEP_SIZE).contains(&self.step_size),
            format!("step size must be in [1, {MAX_STEP_SIZE}], got {}", self.step_size),
        );
        check(
            self.canvas.width > 0. && self.canvas.height > 0. && self.canvas.width.is_finite() && self.canvas.height.is_finite(),
            format!("canvas must have positive finite size, got {:?}", self.canvas),
        );
        check((0. ..1.).contains(&self.decay), format!("decay must be in [0, 1), got {}", self.decay));

        match &self.algorithm {
            Algorithm::GrowingNeuralGas(params) | Algorithm::GrowingNeuralGasWithUtility(params) => {
                check(self.max_nodes >= 2, "growing neural gas requires at least 2 nodes".to_string());
                check(params.lambda > 0, "lambda must be positive".to_string());
                check((0. ..=1.).contains(&params.alpha), format!("alpha must be in [0, 1], got {}", params.alpha));
            }
            Algorithm::HardCompetitiveLearning(params) => {
                check(params.t_max > 0., "t_max must be positive".to_string());
                if let Some(err) = params.epsilon_schedule.validate("epsilon") {
                    errors.push(err);
                }
            }
            Algorithm::NeuralGas(params) | Algorithm::NeuralGasWithHebbian(params) => {
                check(params.t_max > 0., "t_max must be positive".to_string());
                let schedules = [("lambda", &params.lambda), ("epsilon", &params.epsilon), ("edge age", &params.edge_age)];
                errors.extend(schedules.iter().filter_map(|(name, schedule)| schedule.validate(name)));
            }
            Algorithm::CompetitiveHebbian(_) => check(self.max_nodes >= 2, "hebbian learning requires at least 2 nodes".to_string()),
            Algorithm::GrowingGrid(params) => {
                check(
                    params.width > 0 && params.height > 0 && params.width * params.height <= self.max_nodes,
                    format!("initial grid {}x{} must fit into max nodes {}", params.width, params.height, self.max_nodes),
                );
                check(params.sigma > 0., "sigma must be positive".to_string());
                check(
                    params.insertion_factor > 0. && params.fine_tuning_factor > 0.,
                    "insertion and fine-tuning factors must be positive".to_string(),
                );
                if let Some(err) = params.epsilon.validate("epsilon") {
                    errors.push(err);
                }
            }
            Algorithm::SelfOrganizingMap(params) => {
                check(
                    params.width > 0 && params.height > 0 && params.width * params.height <= self.capacity,
                    format!("grid {}x{} must fit into capacity {}", params.width, params.height, self.capacity),
                );
                check(params.t_max > 0., "t_max must be positive".to_string());
                errors.extend([("epsilon", &params.epsilon), ("sigma", &params.sigma)].iter().filter_map(|(n, s)| s.validate(n)));
            }
            Algorithm::Lbg | Algorithm::LbgWithUtility => check(
                (1..=MAX_DISCRETE_SIGNALS).contains(&self.discrete_signals),
                format!("discrete signals must be in [1, {MAX_DISCRETE_SIGNALS}], got {}", self.discrete_signals),
            ),
        }

        if errors.is_empty() { Ok(()) } else { Err(GenericError::join_many(&errors, ", ").into()) }
    }
}
