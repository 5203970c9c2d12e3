//! This module reimports a common used types.

pub use crate::learning::Algorithm;
pub use crate::learning::LearningEngine;
pub use crate::learning::SimulationConfig;
pub use crate::learning::StepResult;
pub use crate::learning::{ChlParams, GngParams, GrowingGridParams, HclParams, NeuralGasParams, Schedule, SomParams};

pub use crate::network::{Edge, GridCoordinate, GridTopology, Network, Node, NodeStore};

pub use crate::runner::SimulationRunner;
pub use crate::runner::StepListener;

pub use crate::signal::DiscreteSignals;
pub use crate::signal::SignalSource;

pub use crate::simulation::Simulation;

pub use crate::voronoi::compute_voronoi;
pub use crate::voronoi::{Segment, SegmentKind, VoronoiMode, VoronoiOutcome};

pub use crate::utils::compare_floats;
pub use crate::utils::DefaultRandom;
pub use crate::utils::Environment;
pub use crate::utils::InfoLogger;
pub use crate::utils::Random;
pub use crate::utils::{Bounds, Canvas, Float, Point};
pub use crate::utils::{GenericError, GenericResult};
