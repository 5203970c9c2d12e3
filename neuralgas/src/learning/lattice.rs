#[cfg(test)]
#[path = "../../tests/unit/learning/lattice_test.rs"]
mod lattice_test;

use super::*;
use crate::network::{GridCoordinate, GridTopology, Network, NodeStore};
use crate::utils::{Float, Point};

/// Growth state of growing grid.
#[derive(Default)]
pub(crate) struct GrowthState {
    fine_tuning: bool,
    last_growth: usize,
    progress: Option<usize>,
}

impl GrowthState {
    pub fn progress(&self) -> Option<usize> {
        if self.fine_tuning { self.progress } else { None }
    }
}

/// Growing grid: adapts the whole lattice with constant rate and periodically grows it next to the
/// densest cell. Once growth is refused, learning rate decays during fine-tuning and the run stops.
pub(crate) fn adapt_growing(
    network: &mut Network,
    state: &mut GrowthState,
    scan: &SignalScan,
    params: &GrowingGridParams,
    context: &SignalContext,
    result: &mut StepResult,
) {
    let Network { store, grid } = network;
    let Some((grid, winner_cell)) = locate_winner(store, grid.as_mut(), scan.winner, context, result) else {
        return;
    };

    store.node_mut(scan.winner).tau += 1.;

    let cells = (grid.width() * grid.height()) as Float;
    let epsilon = if state.fine_tuning {
        let horizon = cells * params.fine_tuning_factor;
        let elapsed = context.time.saturating_sub(state.last_growth) as Float;
        let percent = (elapsed * 100. / horizon) as usize;

        state.progress = Some(percent.min(100));

        if percent >= 100 {
            context.environment.log("fine-tuning at 100%, stopping");
            result.repaint = true;
            result.stop = true;
            return;
        }

        params.epsilon.at(elapsed, horizon)
    } else {
        params.epsilon.initial
    };

    adapt_lattice(store, grid, winner_cell, &context.signal, epsilon, params.sigma, params.torus);

    let interval = ((cells * params.insertion_factor).round() as usize).max(1);

    if !state.fine_tuning && !params.no_new_nodes && context.time % interval == 0 {
        if grid.enlarge(store, params.max_height) {
            result.inserted = true;
        } else {
            context.environment.log(&format!("grid cannot grow beyond {}x{}, fine-tuning", grid.width(), grid.height()));
            state.fine_tuning = true;
            state.progress = Some(0);
        }

        state.last_growth = context.time;
    }
}

/// Self-organizing map: fixed lattice where both learning rate and neighbourhood width decay.
pub(crate) fn adapt_som(
    network: &mut Network,
    scan: &SignalScan,
    params: &SomParams,
    context: &SignalContext,
    result: &mut StepResult,
) {
    let time = context.time as Float;

    if time >= params.t_max {
        context.environment.log(&format!("SOM reached time horizon {}, stopping", params.t_max));
        result.stop = true;
        return;
    }

    let Network { store, grid } = network;
    let Some((grid, winner_cell)) = locate_winner(store, grid.as_mut(), scan.winner, context, result) else {
        return;
    };

    let epsilon = params.epsilon.at(time, params.t_max);
    let sigma = params.sigma.at(time, params.t_max);

    adapt_lattice(store, grid, winner_cell, &context.signal, epsilon, sigma, params.torus);
}

fn locate_winner<'a>(
    store: &NodeStore,
    grid: Option<&'a mut GridTopology>,
    winner: usize,
    context: &SignalContext,
    result: &mut StepResult,
) -> Option<(&'a mut GridTopology, GridCoordinate)> {
    match (grid, store.node(winner).grid) {
        (Some(grid), Some(cell)) => Some((grid, cell)),
        _ => {
            context.environment.log(&format!("winner node {winner} has no lattice coordinate, stopping"));
            result.stop = true;
            None
        }
    }
}

/// Moves every lattice node towards the signal with gaussian falloff of lattice distance to the winner.
fn adapt_lattice(
    store: &mut NodeStore,
    grid: &GridTopology,
    winner: GridCoordinate,
    signal: &Point,
    epsilon: Float,
    sigma: Float,
    torus: bool,
) {
    let denominator = 2. * sigma * sigma;

    grid.cells().for_each(|(cell, idx)| {
        let distance = grid.lattice_distance(winner, cell, torus) as Float;
        let weight = (-(distance * distance) / denominator).exp();

        let node = store.node_mut(idx);
        node.adapt_towards(signal, epsilon * weight);

        if weight > 0.5 {
            node.flags.is_second = true;
        }
    });
}
