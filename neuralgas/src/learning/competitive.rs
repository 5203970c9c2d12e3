#[cfg(test)]
#[path = "../../tests/unit/learning/competitive_test.rs"]
mod competitive_test;

use super::*;
use crate::network::Network;
use crate::utils::Float;

/// Hard competitive learning: only the winner moves towards the signal.
pub(crate) fn adapt_hcl(
    network: &mut Network,
    scan: &SignalScan,
    params: &HclParams,
    context: &SignalContext,
    result: &mut StepResult,
) {
    let time = context.time as Float;

    if time >= params.t_max && (params.variable || context.config.auto_stop) {
        context.environment.log(&format!("HCL reached time horizon {}, stopping", params.t_max));
        result.repaint = true;
        result.stop = true;
        return;
    }

    let rate = if params.variable { params.epsilon_schedule.at(time, params.t_max) } else { params.epsilon };

    network.store.node_mut(scan.winner).adapt_towards(&context.signal, rate);
}

/// Competitive hebbian learning: nodes stay in place, winner and runner-up get connected.
pub(crate) fn adapt_chl(
    network: &mut Network,
    scan: &SignalScan,
    params: &ChlParams,
    context: &SignalContext,
    result: &mut StepResult,
) {
    if context.time >= params.stop_after && context.config.auto_stop {
        context.environment.log(&format!("CHL processed {} signals, stopping", context.time));
        result.repaint = true;
        result.stop = true;
        return;
    }

    let Some(second) = scan.second else {
        return;
    };

    let runner_up = network.store.node_mut(second);
    runner_up.flags.is_second = true;
    runner_up.remember_position();

    network.store.connect(scan.winner, second);
}
