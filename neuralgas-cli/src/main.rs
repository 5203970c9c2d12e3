//! A command line interface to neural gas simulations.
//!

mod commands;

use self::commands::create_write_buffer;
use self::commands::simulate::{get_simulate_app, run_simulate};
use clap::Command;
use std::process;

fn main() {
    let matches = Command::new("Neural Gas Simulator")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A command line interface to neural gas simulations")
        .subcommand(get_simulate_app())
        .get_matches();

    let result = match matches.subcommand() {
        Some(("simulate", simulate_matches)) => run_simulate(simulate_matches, create_write_buffer),
        _ => Err("no subcommand was used. Use -h to print help information.".to_string()),
    };

    if let Err(err) = result {
        eprintln!("{err}");
        process::exit(1);
    }
}
