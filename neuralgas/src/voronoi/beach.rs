use super::sweep::Bisector;
use crate::utils::{Float, Point};

/// A side of the bisector which half-edge represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Side {
    Left,
    Right,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// An element of the beach line: a bisector side bounding an arc.
pub(super) struct HalfEdge {
    pub left: usize,
    pub right: usize,
    pub edge: Option<usize>,
    pub side: Side,
    pub vertex: Option<Point>,
    pub ystar: Float,
    deleted: bool,
}

/// A doubly linked list of half-edges ordered from left to right, stored in an arena.
///
/// Two sentinels bound the list. A bucket table over x coordinate keeps recently visited half-edges
/// to start searches near the target.
pub(super) struct BeachLine {
    half_edges: Vec<HalfEdge>,
    hash: Vec<Option<usize>>,
    min_x: Float,
    delta_x: Float,
    left_end: usize,
    right_end: usize,
}

impl BeachLine {
    pub fn new(sites: usize, min_x: Float, max_x: Float) -> Self {
        let hash_size = ((2. * (sites as Float).sqrt()) as usize).max(2);

        let mut beach = Self {
            half_edges: Vec::with_capacity(4 * sites + 2),
            hash: vec![None; hash_size],
            min_x,
            delta_x: max_x - min_x,
            left_end: 0,
            right_end: 1,
        };

        beach.half_edges.push(HalfEdge::sentinel(0, 1));
        beach.half_edges.push(HalfEdge::sentinel(0, 1));
        beach.hash[0] = Some(beach.left_end);
        beach.hash[hash_size - 1] = Some(beach.right_end);

        beach
    }

    pub fn left_end(&self) -> usize {
        self.left_end
    }

    pub fn right_end(&self) -> usize {
        self.right_end
    }

    pub fn get(&self, idx: usize) -> &HalfEdge {
        &self.half_edges[idx]
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut HalfEdge {
        &mut self.half_edges[idx]
    }

    /// Creates a detached half-edge.
    pub fn create(&mut self, edge: usize, side: Side) -> usize {
        self.half_edges.push(HalfEdge {
            left: self.left_end,
            right: self.right_end,
            edge: Some(edge),
            side,
            vertex: None,
            ystar: 0.,
            deleted: false,
        });

        self.half_edges.len() - 1
    }

    /// Inserts half-edge to the right of `left_bound`.
    pub fn insert(&mut self, left_bound: usize, new: usize) {
        let right = self.half_edges[left_bound].right;

        self.half_edges[new].left = left_bound;
        self.half_edges[new].right = right;
        self.half_edges[right].left = new;
        self.half_edges[left_bound].right = new;
    }

    /// Unlinks half-edge from the list. The half-edge stays in the arena marked as deleted.
    pub fn delete(&mut self, idx: usize) {
        let HalfEdge { left, right, .. } = self.half_edges[idx];

        self.half_edges[left].right = right;
        self.half_edges[right].left = left;

        let half_edge = &mut self.half_edges[idx];
        half_edge.edge = None;
        half_edge.deleted = true;
    }

    /// Returns edge ids of all half-edges still in the list, from left to right.
    pub fn edges(&self) -> impl Iterator<Item = usize> + '_ {
        let mut current = self.half_edges[self.left_end].right;

        std::iter::from_fn(move || {
            while current != self.right_end {
                let half_edge = &self.half_edges[current];
                current = half_edge.right;

                if let Some(edge) = half_edge.edge {
                    return Some(edge);
                }
            }

            None
        })
    }

    /// Finds the half-edge directly to the left of the point.
    pub fn left_bound(&mut self, point: &Point, bisectors: &[Bisector], sites: &[Point]) -> usize {
        let size = self.hash.len() as isize;
        let bucket = if self.delta_x > 0. {
            (((point.x - self.min_x) / self.delta_x) * size as Float) as isize
        } else {
            0
        };
        let bucket = bucket.clamp(0, size - 1);

        let mut half_edge = (0..size)
            .find_map(|offset| self.get_hash(bucket - offset).or_else(|| self.get_hash(bucket + offset)))
            .unwrap_or(self.left_end);

        let is_right_of = |beach: &Self, idx: usize| beach.is_right_of(idx, point, bisectors, sites);

        if half_edge == self.left_end || (half_edge != self.right_end && is_right_of(self, half_edge)) {
            loop {
                half_edge = self.half_edges[half_edge].right;
                if half_edge == self.right_end || !is_right_of(self, half_edge) {
                    break;
                }
            }
            half_edge = self.half_edges[half_edge].left;
        } else {
            loop {
                half_edge = self.half_edges[half_edge].left;
                if half_edge == self.left_end || is_right_of(self, half_edge) {
                    break;
                }
            }
        }

        if bucket > 0 && bucket < size - 1 {
            self.hash[bucket as usize] = Some(half_edge);
        }

        half_edge
    }

    fn get_hash(&mut self, bucket: isize) -> Option<usize> {
        if bucket < 0 || bucket >= self.hash.len() as isize {
            return None;
        }

        let bucket = bucket as usize;
        match self.hash[bucket] {
            Some(idx) if self.half_edges[idx].deleted => {
                self.hash[bucket] = None;
                None
            }
            other => other,
        }
    }

    /// Checks whether the point lies to the right of the half-edge's parabola intersection.
    fn is_right_of(&self, idx: usize, point: &Point, bisectors: &[Bisector], sites: &[Point]) -> bool {
        let half_edge = &self.half_edges[idx];
        let Some(edge) = half_edge.edge.map(|edge| &bisectors[edge]) else {
            return false;
        };

        let top = sites[edge.sites[1]];
        let is_right_of_site = point.x > top.x;

        match (is_right_of_site, half_edge.side) {
            (true, Side::Left) => return true,
            (false, Side::Right) => return false,
            _ => {}
        }

        let is_above = if edge.a == 1. {
            let dyp = point.y - top.y;
            let dxp = point.x - top.x;

            let (mut is_above, is_fast) = if (!is_right_of_site && edge.b < 0.) || (is_right_of_site && edge.b >= 0.) {
                let is_above = dyp >= edge.b * dxp;
                (is_above, is_above)
            } else {
                let is_above = (point.x + point.y * edge.b > edge.c) != (edge.b < 0.);
                (is_above, !is_above)
            };

            if !is_fast {
                let dxs = top.x - sites[edge.sites[0]].x;
                is_above = (edge.b * (dxp * dxp - dyp * dyp) < dxs * dyp * (1. + 2. * dxp / dxs + edge.b * edge.b))
                    != (edge.b < 0.);
            }

            is_above
        } else {
            let yl = edge.c - edge.a * point.x;
            let t1 = point.y - yl;
            let t2 = point.x - top.x;
            let t3 = yl - top.y;

            t1 * t1 > t2 * t2 + t3 * t3
        };

        match half_edge.side {
            Side::Left => is_above,
            Side::Right => !is_above,
        }
    }
}

impl HalfEdge {
    fn sentinel(left: usize, right: usize) -> Self {
        Self { left, right, edge: None, side: Side::Left, vertex: None, ystar: 0., deleted: false }
    }
}
