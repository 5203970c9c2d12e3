//! This crate implements incremental competitive learning models (growing neural gas and its
//! relatives, growing grid, self-organizing map, LBG) which adapt a set of 2D reference vectors to
//! a signal distribution, and a sweep-line engine which builds Voronoi diagram and Delaunay
//! triangulation of the resulting point set.
//!
//! A typical usage is to create a [`Simulation`](simulation::Simulation) from a
//! [`SimulationConfig`](learning::SimulationConfig) and a [`SignalSource`](signal::SignalSource),
//! then call `step` repeatedly, either directly or via [`SimulationRunner`](runner::SimulationRunner).

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod learning;
pub mod network;
pub mod prelude;
pub mod runner;
pub mod signal;
pub mod simulation;
pub mod utils;
pub mod voronoi;
