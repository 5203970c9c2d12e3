//! This module contains competitive learning algorithms which adapt a network to the signal distribution.

mod config;
pub use self::config::*;

mod engine;
pub use self::engine::*;

mod competitive;
mod gng;
mod lattice;
mod lbg;
mod neural_gas;
