//! Contains functionality needed to run a simulation from command line.

pub mod config;
pub mod distributions;
pub mod interruption;
pub mod output;
