//! Contains signal distributions used by command line simulations.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/simulate/distributions_test.rs"]
mod distributions_test;

use super::config::DistributionConfig;
use neuralgas::prelude::*;
use rand::{Error, RngCore};
use rand_distr::{Distribution, StandardNormal};
use std::f64::consts::PI;
use std::sync::Arc;

/// Margin of rectangle distribution as a fraction of canvas side.
const RECTANGLE_MARGIN: Float = 0.05;

/// Diameter of circle distribution as a fraction of the smaller canvas side.
const CIRCLE_DIAMETER: Float = 0.9;

/// Radius of the circle on which cluster centers are placed, as a fraction of the smaller canvas side.
const CLUSTER_ORBIT: Float = 0.3;

/// Creates a signal source from its configuration.
pub fn create_signal_source(config: &DistributionConfig) -> Result<Arc<dyn SignalSource>, String> {
    let is_positive = |value: Float| value > 0. && value.is_finite();

    Ok(match config {
        DistributionConfig::Rectangle => Arc::new(RectangleSource),
        DistributionConfig::Circle => Arc::new(CircleSource),
        DistributionConfig::Ring { width } => {
            let width = width.unwrap_or(0.4);
            if !is_positive(width) || width > 1. {
                return Err(format!("ring width must be in (0, 1], got {width}"));
            }
            Arc::new(RingSource { width })
        }
        DistributionConfig::Gaussian { deviation } => {
            let deviation = deviation.unwrap_or(0.15);
            if !is_positive(deviation) {
                return Err(format!("deviation must be positive, got {deviation}"));
            }
            Arc::new(GaussianSource { deviation })
        }
        DistributionConfig::Clusters { count, deviation } => {
            let (count, deviation) = (count.unwrap_or(5), deviation.unwrap_or(0.05));
            if count == 0 || !is_positive(deviation) {
                return Err(format!("clusters require positive count and deviation, got {count} and {deviation}"));
            }
            Arc::new(ClusterSource { count, deviation })
        }
    })
}

/// Uniform signals in a rectangle which leaves a small margin at every side.
pub struct RectangleSource;

impl SignalSource for RectangleSource {
    fn sample(&self, canvas: &Canvas, random: &dyn Random) -> Point {
        let (w, h) = (canvas.width, canvas.height);
        let side = 1. - 2. * RECTANGLE_MARGIN;

        let x = w * RECTANGLE_MARGIN + w * side * random.uniform_real(0., 1.);
        let y = h * RECTANGLE_MARGIN + h * side * random.uniform_real(0., 1.);

        Point::new(x, y)
    }
}

/// Uniform signals in a circle centered on the canvas.
pub struct CircleSource;

impl SignalSource for CircleSource {
    fn sample(&self, canvas: &Canvas, random: &dyn Random) -> Point {
        let radius = canvas.width.min(canvas.height) * CIRCLE_DIAMETER / 2.;
        let (dx, dy) = unit_disk_point(random);
        let center = canvas.center();

        Point::new(center.x + dx * radius, center.y + dy * radius)
    }
}

/// Uniform signals in a ring centered on the canvas. The outer radius touches the smaller canvas side.
pub struct RingSource {
    width: Float,
}

impl SignalSource for RingSource {
    fn sample(&self, canvas: &Canvas, random: &dyn Random) -> Point {
        let center = canvas.center();
        let outer = center.x.min(center.y);
        let inner = outer * (1. - self.width);

        loop {
            let (dx, dy) = unit_disk_point(random);
            let (x, y) = (dx * outer, dy * outer);

            if (x * x + y * y).sqrt() >= inner {
                return Point::new(center.x + x, center.y + y);
            }
        }
    }
}

/// Normally distributed signals around the canvas center.
pub struct GaussianSource {
    deviation: Float,
}

impl SignalSource for GaussianSource {
    fn sample(&self, canvas: &Canvas, random: &dyn Random) -> Point {
        let sigma = canvas.width.min(canvas.height) * self.deviation;
        let (dx, dy) = normal_pair(random);

        clamp_to_canvas(canvas.center(), dx * sigma, dy * sigma, canvas)
    }
}

/// A mixture of normal distributions with centers evenly placed on a circle.
pub struct ClusterSource {
    count: usize,
    deviation: Float,
}

impl ClusterSource {
    fn cluster_center(&self, idx: usize, canvas: &Canvas) -> Point {
        let center = canvas.center();
        let orbit = canvas.width.min(canvas.height) * CLUSTER_ORBIT;
        let angle = 2. * PI * idx as Float / self.count as Float;

        Point::new(center.x + orbit * angle.cos(), center.y + orbit * angle.sin())
    }
}

impl SignalSource for ClusterSource {
    fn sample(&self, canvas: &Canvas, random: &dyn Random) -> Point {
        let idx = random.uniform_int(0, self.count as i32 - 1) as usize;
        let sigma = canvas.width.min(canvas.height) * self.deviation;
        let (dx, dy) = normal_pair(random);

        clamp_to_canvas(self.cluster_center(idx, canvas), dx * sigma, dy * sigma, canvas)
    }
}

/// Returns a uniformly distributed point inside of the unit disk.
fn unit_disk_point(random: &dyn Random) -> (Float, Float) {
    loop {
        let x = random.uniform_real(-1., 1.);
        let y = random.uniform_real(-1., 1.);

        if x * x + y * y <= 1. {
            return (x, y);
        }
    }
}

fn normal_pair(random: &dyn Random) -> (Float, Float) {
    let mut rng = RandomAdapter { random };

    (StandardNormal.sample(&mut rng), StandardNormal.sample(&mut rng))
}

fn clamp_to_canvas(origin: Point, dx: Float, dy: Float, canvas: &Canvas) -> Point {
    Point::new((origin.x + dx).clamp(0., canvas.width), (origin.y + dy).clamp(0., canvas.height))
}

/// Exposes `Random` as a random number generator, so it can drive `rand_distr` distributions
/// while keeping seeded runs repeatable.
struct RandomAdapter<'a> {
    random: &'a dyn Random,
}

impl RngCore for RandomAdapter<'_> {
    fn next_u32(&mut self) -> u32 {
        let high = self.random.uniform_int(0, 0xFFFF) as u32;
        let low = self.random.uniform_int(0, 0xFFFF) as u32;

        (high << 16) | low
    }

    fn next_u64(&mut self) -> u64 {
        ((self.next_u32() as u64) << 32) | self.next_u32() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.chunks_mut(4).for_each(|chunk| {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        });
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
