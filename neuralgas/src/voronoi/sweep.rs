use super::beach::{BeachLine, Side};
use super::events::EventQueue;
use super::*;
use crate::utils::{Bounds, Float, Point, compare_sweep_order};
use rustc_hash::FxHashSet;
use std::cmp::Ordering;

/// Bisectors with determinant closer to zero are considered parallel.
const PARALLEL_TOLERANCE: Float = 1e-10;

/// A perpendicular bisector between two sites as a line `a * x + b * y = c`,
/// where either `a` or `b` is normalized to one.
pub(super) struct Bisector {
    pub sites: [usize; 2],
    pub endpoints: [Option<Point>; 2],
    pub a: Float,
    pub b: Float,
    pub c: Float,
}

/// A state of one sweep over sorted sites.
pub(super) struct Sweep<'a> {
    sites: &'a [Point],
    bounds: Bounds,
    mode: VoronoiMode,
    limit: usize,
    bisectors: Vec<Bisector>,
    beach: BeachLine,
    queue: EventQueue,
    emitted: FxHashSet<usize>,
    segments: Vec<Segment>,
}

impl<'a> Sweep<'a> {
    /// Creates a sweep over sites sorted by (y, x) without duplicates.
    pub fn new(sites: &'a [Point], bounds: Bounds, mode: VoronoiMode, limit: usize) -> Self {
        let (min_x, max_x) = sites
            .iter()
            .fold((Float::MAX, Float::MIN), |(min_x, max_x), site| (min_x.min(site.x), max_x.max(site.x)));

        Self {
            sites,
            bounds,
            mode,
            limit,
            bisectors: Vec::with_capacity(3 * sites.len()),
            beach: BeachLine::new(sites.len(), min_x, max_x),
            queue: EventQueue::default(),
            emitted: FxHashSet::default(),
            segments: Vec::default(),
        }
    }

    /// Processes all site and circle events and returns produced segments.
    pub fn run(mut self) -> Vec<Segment> {
        if self.sites.is_empty() {
            return self.segments;
        }

        let mut next_site = 1;

        loop {
            let next_event = self.queue.peek();
            let site = self.sites.get(next_site).copied();

            let is_site_event = match (site, next_event) {
                (Some(_), None) => true,
                (Some(site), Some((x, ystar))) => compare_sweep_order((site.x, site.y), (x, ystar)) == Ordering::Less,
                _ => false,
            };

            if is_site_event {
                self.handle_site(next_site);
                next_site += 1;
            } else if next_event.is_some() {
                self.handle_circle();
            } else {
                break;
            }
        }

        if self.mode.voronoi {
            let edges = self.beach.edges().collect::<Vec<_>>();
            edges.into_iter().for_each(|edge| self.emit_voronoi(edge));
        }

        self.segments
    }

    fn handle_site(&mut self, site_idx: usize) {
        let site = self.sites[site_idx];

        let left_bound = self.beach.left_bound(&site, &self.bisectors, self.sites);
        let right_bound = self.beach.get(left_bound).right;
        let bottom = self.right_region(left_bound);
        let edge = self.bisect(bottom, site_idx);

        let bisector = self.beach.create(edge, Side::Left);
        self.beach.insert(left_bound, bisector);

        if let Some(vertex) = self.intersect(left_bound, bisector) {
            self.delete_event(left_bound);
            self.insert_event(left_bound, vertex, vertex.distance(&site));
        }

        let left_bound = bisector;
        let bisector = self.beach.create(edge, Side::Right);
        self.beach.insert(left_bound, bisector);

        if let Some(vertex) = self.intersect(bisector, right_bound) {
            self.insert_event(bisector, vertex, vertex.distance(&site));
        }
    }

    fn handle_circle(&mut self) {
        let Some(left_bound) = self.queue.pop() else {
            return;
        };

        let Some(vertex) = self.beach.get_mut(left_bound).vertex.take() else {
            return;
        };

        let left_left_bound = self.beach.get(left_bound).left;
        let right_bound = self.beach.get(left_bound).right;
        let right_right_bound = self.beach.get(right_bound).right;

        let mut bottom = self.left_region(left_bound);
        let mut top = self.right_region(right_bound);

        if let Some(edge) = self.beach.get(left_bound).edge {
            self.end_point(edge, self.beach.get(left_bound).side, vertex);
        }
        if let Some(edge) = self.beach.get(right_bound).edge {
            self.end_point(edge, self.beach.get(right_bound).side, vertex);
        }

        self.beach.delete(left_bound);
        self.delete_event(right_bound);
        self.beach.delete(right_bound);

        let mut side = Side::Left;
        if self.sites[bottom].y > self.sites[top].y {
            std::mem::swap(&mut bottom, &mut top);
            side = Side::Right;
        }

        let edge = self.bisect(bottom, top);
        let bisector = self.beach.create(edge, side);
        self.beach.insert(left_left_bound, bisector);
        self.end_point(edge, side.opposite(), vertex);

        let bottom_site = self.sites[bottom];

        if let Some(vertex) = self.intersect(left_left_bound, bisector) {
            self.delete_event(left_left_bound);
            self.insert_event(left_left_bound, vertex, vertex.distance(&bottom_site));
        }

        if let Some(vertex) = self.intersect(bisector, right_right_bound) {
            self.insert_event(bisector, vertex, vertex.distance(&bottom_site));
        }
    }

    fn insert_event(&mut self, half_edge: usize, vertex: Point, offset: Float) {
        let ystar = vertex.y + offset;

        let entry = self.beach.get_mut(half_edge);
        entry.vertex = Some(vertex);
        entry.ystar = ystar;

        self.queue.insert(half_edge, &vertex, ystar);
    }

    fn delete_event(&mut self, half_edge: usize) {
        let entry = self.beach.get_mut(half_edge);
        let ystar = entry.ystar;

        if let Some(vertex) = entry.vertex.take() {
            self.queue.remove(half_edge, &vertex, ystar);
        }
    }

    /// Site to the right of the half-edge; the sentinels border the bottom site.
    fn right_region(&self, half_edge: usize) -> usize {
        let half_edge = self.beach.get(half_edge);
        match half_edge.edge {
            Some(edge) => self.bisectors[edge].sites[half_edge.side.opposite().index()],
            None => 0,
        }
    }

    fn left_region(&self, half_edge: usize) -> usize {
        let half_edge = self.beach.get(half_edge);
        match half_edge.edge {
            Some(edge) => self.bisectors[edge].sites[half_edge.side.index()],
            None => 0,
        }
    }

    /// Creates a bisector between two sites. In delaunay mode, the dual edge is emitted immediately.
    fn bisect(&mut self, first: usize, second: usize) -> usize {
        let (s1, s2) = (self.sites[first], self.sites[second]);

        let dx = s2.x - s1.x;
        let dy = s2.y - s1.y;
        let c = s1.x * dx + s1.y * dy + (dx * dx + dy * dy) * 0.5;

        let (a, b, c) = if dx.abs() > dy.abs() { (1., dy / dx, c / dx) } else { (dx / dy, 1., c / dy) };

        self.bisectors.push(Bisector { sites: [first, second], endpoints: [None, None], a, b, c });

        if self.mode.delaunay {
            self.push_segment(Segment { from: s1, to: s2, kind: SegmentKind::Delaunay });
        }

        self.bisectors.len() - 1
    }

    /// Intersects bisectors of two half-edges. Returns `None` when they do not produce a vertex
    /// which lies on the correct side of the beach line.
    fn intersect(&self, first: usize, second: usize) -> Option<Point> {
        let (he1, he2) = (self.beach.get(first), self.beach.get(second));
        let (e1, e2) = (&self.bisectors[he1.edge?], &self.bisectors[he2.edge?]);

        if e1.sites[1] == e2.sites[1] {
            return None;
        }

        let determinant = e1.a * e2.b - e1.b * e2.a;
        if determinant.abs() < PARALLEL_TOLERANCE {
            return None;
        }

        let x = (e1.c * e2.b - e2.c * e1.b) / determinant;
        let y = (e2.c * e1.a - e1.c * e2.a) / determinant;

        let (top1, top2) = (self.sites[e1.sites[1]], self.sites[e2.sites[1]]);
        let (half_edge, edge) =
            if compare_sweep_order((top1.x, top1.y), (top2.x, top2.y)) == Ordering::Less { (he1, e1) } else { (he2, e2) };

        let is_right_of_site = x >= self.sites[edge.sites[1]].x;
        match (is_right_of_site, half_edge.side) {
            (true, Side::Left) | (false, Side::Right) => None,
            _ => Some(Point::new(x, y)),
        }
    }

    fn end_point(&mut self, edge: usize, side: Side, vertex: Point) {
        let bisector = &mut self.bisectors[edge];
        bisector.endpoints[side.index()] = Some(vertex);

        if bisector.endpoints[side.opposite().index()].is_some() && self.mode.voronoi {
            self.emit_voronoi(edge);
        }
    }

    fn emit_voronoi(&mut self, edge: usize) {
        if !self.emitted.insert(edge) {
            return;
        }

        if let Some((from, to)) = clip(&self.bisectors[edge], &self.bounds) {
            self.push_segment(Segment { from, to, kind: SegmentKind::Voronoi });
        }
    }

    fn push_segment(&mut self, segment: Segment) {
        if self.segments.len() < self.limit && segment.from.is_finite() && segment.to.is_finite() {
            self.segments.push(segment);
        }
    }
}

/// Clips a bisector between its known endpoints against bounds. Returns `None` if nothing is visible.
fn clip(edge: &Bisector, bounds: &Bounds) -> Option<(Point, Point)> {
    let (min, max) = (bounds.min, bounds.max);

    let (s1, s2) =
        if edge.a == 1. && edge.b >= 0. { (edge.endpoints[1], edge.endpoints[0]) } else { (edge.endpoints[0], edge.endpoints[1]) };

    if edge.a == 1. {
        let y1 = s1.map_or(min.y, |s| if s.y > min.y { s.y } else { min.y });
        if y1 > max.y {
            return None;
        }
        let y2 = s2.map_or(max.y, |s| if s.y < max.y { s.y } else { max.y });
        if y2 < min.y {
            return None;
        }

        let (mut x1, mut y1) = (edge.c - edge.b * y1, y1);
        let (mut x2, mut y2) = (edge.c - edge.b * y2, y2);

        if (x1 > max.x && x2 > max.x) || (x1 < min.x && x2 < min.x) {
            return None;
        }

        let clamp_x = |x: &mut Float, y: &mut Float| {
            if *x > max.x {
                *x = max.x;
                *y = (edge.c - *x) / edge.b;
            }
            if *x < min.x {
                *x = min.x;
                *y = (edge.c - *x) / edge.b;
            }
        };
        clamp_x(&mut x1, &mut y1);
        clamp_x(&mut x2, &mut y2);

        Some((Point::new(x1, y1), Point::new(x2, y2)))
    } else {
        let x1 = s1.map_or(min.x, |s| if s.x > min.x { s.x } else { min.x });
        if x1 > max.x {
            return None;
        }
        let x2 = s2.map_or(max.x, |s| if s.x < max.x { s.x } else { max.x });
        if x2 < min.x {
            return None;
        }

        let (mut x1, mut y1) = (x1, edge.c - edge.a * x1);
        let (mut x2, mut y2) = (x2, edge.c - edge.a * x2);

        if (y1 > max.y && y2 > max.y) || (y1 < min.y && y2 < min.y) {
            return None;
        }

        let clamp_y = |x: &mut Float, y: &mut Float| {
            if *y > max.y {
                *y = max.y;
                *x = (edge.c - *y) / edge.a;
            }
            if *y < min.y {
                *y = min.y;
                *x = (edge.c - *y) / edge.a;
            }
        };
        clamp_y(&mut x1, &mut y1);
        clamp_y(&mut x2, &mut y2);

        Some((Point::new(x1, y1), Point::new(x2, y2)))
    }
}
