#[cfg(test)]
#[path = "../../tests/unit/commands/simulate_test.rs"]
mod simulate_test;

use super::*;
use clap::{Arg, ArgAction, Command};
use neuralgas::prelude::*;
use neuralgas_cli::extensions::simulate::config::{DistributionConfig, create_simulation_config, read_config};
use neuralgas_cli::extensions::simulate::distributions::create_signal_source;
use neuralgas_cli::extensions::simulate::interruption::handle_interruption;
use neuralgas_cli::extensions::simulate::output::{SimulationOutput, create_simulation_output, write_simulation_output};
use std::io::BufReader;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

const CONFIG_ARG_NAME: &str = "config";
const ALGORITHM_ARG_NAME: &str = "algorithm";
const MAX_NODES_ARG_NAME: &str = "max-nodes";
const STEPS_ARG_NAME: &str = "steps";
const DISTRIBUTION_ARG_NAME: &str = "distribution";
const SEED_ARG_NAME: &str = "seed";
const VORONOI_ARG_NAME: &str = "voronoi";
const DELAUNAY_ARG_NAME: &str = "delaunay";
const OUT_RESULT_ARG_NAME: &str = "out-result";
const LOG_ARG_NAME: &str = "log";

pub fn get_simulate_app() -> Command {
    Command::new("simulate")
        .about("Runs a neural gas simulation and writes the resulting network in json format")
        .arg(
            Arg::new(CONFIG_ARG_NAME)
                .help("Specifies path to simulation configuration file")
                .short('c')
                .long(CONFIG_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(ALGORITHM_ARG_NAME)
                .help("Specifies learning algorithm: GNG, GNG-U, HCL, NG, NGCHL, CHL, GG, GR, SOM, LBG or LBG-U")
                .short('a')
                .long(ALGORITHM_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(MAX_NODES_ARG_NAME)
                .help("Specifies maximum amount of nodes")
                .short('n')
                .long(MAX_NODES_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(STEPS_ARG_NAME)
                .help("Specifies amount of learning batches. Without it, runs until the algorithm stops or Ctrl-C")
                .short('s')
                .long(STEPS_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(DISTRIBUTION_ARG_NAME)
                .help("Specifies signal distribution")
                .short('d')
                .long(DISTRIBUTION_ARG_NAME)
                .required(false)
                .value_parser(["rectangle", "circle", "ring", "gaussian", "clusters"]),
        )
        .arg(
            Arg::new(SEED_ARG_NAME)
                .help("Specifies randomization seed to avoid stochastic behavior")
                .long(SEED_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(VORONOI_ARG_NAME)
                .help("Adds Voronoi diagram to the result")
                .long(VORONOI_ARG_NAME)
                .required(false)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(DELAUNAY_ARG_NAME)
                .help("Adds Delaunay triangulation to the result")
                .long(DELAUNAY_ARG_NAME)
                .required(false)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(OUT_RESULT_ARG_NAME)
                .help("Specifies path to file for result output")
                .short('o')
                .long(OUT_RESULT_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(LOG_ARG_NAME)
                .help("Specifies whether default logging is enabled")
                .long(LOG_ARG_NAME)
                .required(false)
                .action(ArgAction::SetTrue),
        )
}

/// Runs simulation command.
pub fn run_simulate<F>(matches: &ArgMatches, out_writer_func: F) -> Result<(), String>
where
    F: Fn(Option<File>) -> BufWriter<Box<dyn Write>>,
{
    let config = matches
        .get_one::<String>(CONFIG_ARG_NAME)
        .map(|path| open_file(path, "config").and_then(|file| read_config(BufReader::new(file))))
        .transpose()?
        .unwrap_or_default();

    let mut simulation_config = create_simulation_config(&config);

    if let Some(name) = matches.get_one::<String>(ALGORITHM_ARG_NAME) {
        simulation_config.algorithm =
            Algorithm::from_name(name).ok_or_else(|| format!("unknown algorithm: '{name}'"))?;
    }

    if let Some(max_nodes) = parse_int_value::<usize>(matches, MAX_NODES_ARG_NAME, "max nodes")? {
        simulation_config.max_nodes = max_nodes;
    }

    let distribution = match matches.get_one::<String>(DISTRIBUTION_ARG_NAME) {
        Some(name) => DistributionConfig::from_name(name).ok_or_else(|| format!("unknown distribution: '{name}'"))?,
        None => config.distribution.clone().unwrap_or(DistributionConfig::Rectangle),
    };
    let source = create_signal_source(&distribution)?;

    let steps = parse_int_value::<usize>(matches, STEPS_ARG_NAME, "steps")?;
    let seed = parse_int_value::<u64>(matches, SEED_ARG_NAME, "seed")?;
    let mode = get_voronoi_mode(matches);
    let out_result =
        matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(|path| create_file(path, "out result")).transpose()?;

    let environment = create_environment(seed, matches.get_flag(LOG_ARG_NAME));
    let simulation = Simulation::new(simulation_config, source, environment).map_err(|err| err.to_string())?;

    let output = match steps {
        Some(steps) => run_batches(simulation, steps, mode),
        None => run_until_stopped(simulation, mode),
    };

    write_simulation_output(out_writer_func(out_result), &output)
}

fn run_batches(mut simulation: Simulation, steps: usize, mode: Option<VoronoiMode>) -> SimulationOutput {
    let is_running = Arc::new(AtomicBool::new(true));
    if let Err(err) = handle_interruption(is_running.clone()) {
        simulation.environment().log(&err);
    }

    for batch in 1..=steps {
        if !is_running.load(Ordering::Relaxed) {
            simulation.environment().log(&format!("simulation interrupted after {} batches", batch - 1));
            break;
        }

        if simulation.step().stop {
            simulation.environment().log(&format!("simulation stopped after {batch} batches"));
            break;
        }
    }

    create_simulation_output(&simulation, mode)
}

fn run_until_stopped(simulation: Simulation, mode: Option<VoronoiMode>) -> SimulationOutput {
    let mut runner = SimulationRunner::new(simulation, Duration::ZERO);
    if let Err(err) = handle_interruption(runner.running_flag()) {
        runner.read(|simulation| simulation.environment().log(&err));
    }

    runner.start();
    runner.wait();

    runner.read(|simulation| create_simulation_output(simulation, mode))
}

fn get_voronoi_mode(matches: &ArgMatches) -> Option<VoronoiMode> {
    match (matches.get_flag(VORONOI_ARG_NAME), matches.get_flag(DELAUNAY_ARG_NAME)) {
        (false, false) => None,
        (voronoi, delaunay) => Some(VoronoiMode { voronoi, delaunay }),
    }
}

fn create_environment(seed: Option<u64>, is_logging: bool) -> Environment {
    let random: Arc<dyn Random + Send + Sync> =
        Arc::new(seed.map_or_else(DefaultRandom::default, DefaultRandom::new_repeatable));

    if is_logging {
        Environment::new(random, Arc::new(|msg: &str| eprintln!("{msg}")))
    } else {
        Environment::new_silent(random)
    }
}
