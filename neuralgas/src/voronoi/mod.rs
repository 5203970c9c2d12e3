//! This module contains a sweep-line (Fortune's) algorithm which builds Voronoi diagram and
//! Delaunay triangulation of a point set, clipped to a rectangle.
//!
//! All intermediate structures (beach line, events, bisectors) live in arenas which are
//! dropped after the computation.

#[cfg(test)]
#[path = "../../tests/unit/voronoi/voronoi_test.rs"]
mod voronoi_test;

mod beach;
mod events;
mod sweep;

use self::sweep::Sweep;
use crate::utils::{Bounds, Point, compare_sweep_order};

/// Specifies origin of the segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// A part of a Voronoi cell border.
    Voronoi,
    /// An edge of Delaunay triangulation.
    Delaunay,
}

/// A line segment produced by the sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
    /// Segment origin.
    pub kind: SegmentKind,
}

/// Specifies which segments are produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoronoiMode {
    /// Produce Voronoi diagram.
    pub voronoi: bool,
    /// Produce Delaunay triangulation.
    pub delaunay: bool,
}

impl VoronoiMode {
    /// Voronoi diagram only.
    pub const VORONOI: VoronoiMode = VoronoiMode { voronoi: true, delaunay: false };
    /// Delaunay triangulation only.
    pub const DELAUNAY: VoronoiMode = VoronoiMode { voronoi: false, delaunay: true };
    /// Both diagrams.
    pub const BOTH: VoronoiMode = VoronoiMode { voronoi: true, delaunay: true };
}

/// A result of Voronoi computation request.
#[derive(Clone, Debug, PartialEq)]
pub enum VoronoiOutcome {
    /// Segments were computed.
    Computed(Vec<Segment>),
    /// The network is not in a state where the diagram is meaningful.
    Skipped,
}

/// Computes Voronoi diagram and/or Delaunay triangulation of the sites clipped to bounds.
///
/// Non-finite and duplicate sites are ignored. At most `limit` segments are returned.
pub fn compute_voronoi(sites: &[Point], bounds: Bounds, mode: VoronoiMode, limit: usize) -> Vec<Segment> {
    let mut sites = sites.iter().filter(|site| site.is_finite()).copied().collect::<Vec<_>>();
    sites.sort_by(|a, b| compare_sweep_order((a.x, a.y), (b.x, b.y)));
    sites.dedup();

    Sweep::new(sites.as_slice(), bounds, mode, limit).run()
}
