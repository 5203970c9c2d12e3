//! Contains extensions used by command line interface.

pub mod simulate;
