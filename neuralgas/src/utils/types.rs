#[cfg(test)]
#[path = "../../tests/unit/utils/types_test.rs"]
mod types_test;

/// Alias to a scalar floating type.
///
/// NOTE: node positions are panel-pixel coordinates which are accumulated over millions of
/// signals, so `f64` is used to keep long runs stable.
pub type Float = f64;

/// Geometric decay from `initial` to `last` over `horizon`: `initial * (last / initial)^(time / horizon)`.
///
/// Used by all schedules (learning rate, neighbourhood width, edge age).
#[inline]
pub fn geometric_decay(initial: Float, last: Float, time: Float, horizon: Float) -> Float {
    if horizon <= 0. || initial == 0. {
        return last;
    }

    initial * (last / initial).powf(time / horizon)
}
