//! A command line interface library for neural gas simulations: concrete signal distributions,
//! json configuration, interruption handling and result serialization.

#![warn(missing_docs)]

pub mod extensions;
