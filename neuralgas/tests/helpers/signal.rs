use crate::signal::SignalSource;
use crate::utils::{Canvas, Point, Random};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Always returns the same signal.
pub struct ConstantSignal(pub Point);

impl SignalSource for ConstantSignal {
    fn sample(&self, _: &Canvas, _: &dyn Random) -> Point {
        self.0
    }
}

/// Returns given signals in a loop.
pub struct CyclicSignals {
    points: Vec<Point>,
    index: AtomicUsize,
}

impl CyclicSignals {
    pub fn new(points: Vec<Point>) -> Self {
        assert!(!points.is_empty());
        Self { points, index: AtomicUsize::new(0) }
    }

    pub fn from_coordinates(coordinates: &[(f64, f64)]) -> Self {
        Self::new(coordinates.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }
}

impl SignalSource for CyclicSignals {
    fn sample(&self, _: &Canvas, _: &dyn Random) -> Point {
        let index = self.index.fetch_add(1, Ordering::Relaxed);
        self.points[index % self.points.len()]
    }

    fn discrete_set(&self, _: &Canvas) -> Option<Vec<Point>> {
        Some(self.points.clone())
    }
}

/// Samples signals uniformly from the whole canvas.
pub struct UniformSignal;

impl SignalSource for UniformSignal {
    fn sample(&self, canvas: &Canvas, random: &dyn Random) -> Point {
        Point::new(random.uniform_real(0., canvas.width), random.uniform_real(0., canvas.height))
    }
}

/// Creates two well separated clusters of 3x3 points around given centers.
pub fn create_two_clusters(first: (f64, f64), second: (f64, f64)) -> CyclicSignals {
    let cluster = |(cx, cy): (f64, f64)| {
        (-1..=1).flat_map(move |dx| (-1..=1).map(move |dy| Point::new(cx + dx as f64, cy + dy as f64)))
    };

    CyclicSignals::new(cluster(first).chain(cluster(second)).collect())
}
