//! Specifies the contract between input distributions and learning engine.

#[cfg(test)]
#[path = "../tests/unit/signal_test.rs"]
mod signal_test;

use crate::utils::{Canvas, Float, Point, Random};

/// Produces input signals from some probability distribution.
///
/// Signals are expressed in panel-pixel coordinates of the given canvas, so the source has to
/// respect the current canvas size on every call.
pub trait SignalSource: Send + Sync {
    /// Samples the next signal.
    fn sample(&self, canvas: &Canvas, random: &dyn Random) -> Point;

    /// Returns a fixed finite signal set if the distribution is discrete by nature.
    /// Batch algorithms sample a finite set from `sample` otherwise.
    fn discrete_set(&self, _canvas: &Canvas) -> Option<Vec<Point>> {
        None
    }
}

/// A finite signal set used by batch algorithms together with per signal distances
/// to the nearest and the second nearest node.
#[derive(Clone, Debug, Default)]
pub struct DiscreteSignals {
    points: Vec<Point>,
    pub(crate) nearest: Vec<Float>,
    pub(crate) second: Vec<Float>,
}

impl DiscreteSignals {
    /// Creates a signal set from given points.
    pub fn new(points: Vec<Point>) -> Self {
        let size = points.len();
        Self { points, nearest: vec![Float::MAX; size], second: vec![Float::MAX; size] }
    }

    /// Creates a signal set from source: either uses its own discrete set or samples `size` signals.
    pub fn generate(source: &dyn SignalSource, canvas: &Canvas, size: usize, random: &dyn Random) -> Self {
        let points = source
            .discrete_set(canvas)
            .unwrap_or_else(|| (0..size).map(|_| source.sample(canvas, random)).collect());

        Self::new(points)
    }

    /// Returns signal positions.
    pub fn points(&self) -> &[Point] {
        self.points.as_slice()
    }

    /// Returns amount of signals.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no signals.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Scales signal positions proportionally, used when the canvas is resized.
    pub fn rescale(&mut self, kx: Float, ky: Float) {
        self.points.iter_mut().for_each(|point| {
            point.x *= kx;
            point.y *= ky;
        });
    }
}
