#[cfg(test)]
#[path = "../../tests/unit/network/node_test.rs"]
mod node_test;

use crate::utils::{Float, Point};
use std::collections::VecDeque;
use tinyvec::TinyVec;

/// Inline capacity of neighbour list, larger degrees spill to heap.
type NeighbourArray = [usize; 8];

/// Coordinate of the node in a lattice as (column, row).
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct GridCoordinate(pub usize, pub usize);

/// Keeps per signal status of the node. Used mostly for visualization.
#[derive(Clone, Debug, Default)]
pub struct NodeFlags {
    /// Node is the nearest one to the last signal.
    pub is_winner: bool,
    /// Node is the second nearest one to the last signal (or lies in winner's neighbourhood).
    pub is_second: bool,
    /// Node was moved by the last adaptation.
    pub has_moved: bool,
    /// Node was inserted by the last insertion step.
    pub is_recently_inserted: bool,
    /// Node is fixed and ignores all adaptations.
    pub is_pinned: bool,
}

/// Represents a node (reference vector) in network.
#[derive(Clone, Debug)]
pub struct Node {
    /// Current position.
    pub position: Point,
    /// Position before last winner/runner-up adaptation.
    pub previous: Point,
    /// Accumulated error.
    pub error: Float,
    /// Accumulated utility.
    pub utility: Float,
    /// A density counter used by lattice growth.
    pub tau: Float,
    /// Squared distance to the latest signal.
    pub sqr_dist: Float,
    /// A coordinate in the lattice if node belongs to a grid.
    pub grid: Option<GridCoordinate>,
    /// Status flags.
    pub flags: NodeFlags,
    /// Indices of discrete signals assigned to the node in the current batch.
    pub signals: VecDeque<usize>,
    neighbours: TinyVec<NeighbourArray>,
}

impl Node {
    /// Creates a new instance of `Node` at given position.
    pub fn new(position: Point) -> Self {
        Self {
            position,
            previous: position,
            error: 0.,
            utility: 0.,
            tau: 0.,
            sqr_dist: Float::MAX,
            grid: None,
            flags: NodeFlags::default(),
            signals: VecDeque::default(),
            neighbours: TinyVec::default(),
        }
    }

    /// Moves the node by given offset unless the node is pinned.
    pub fn adapt(&mut self, dx: Float, dy: Float) {
        if self.flags.is_pinned {
            return;
        }

        self.position.x += dx;
        self.position.y += dy;
        self.flags.has_moved = true;
    }

    /// Moves the node towards target by given rate.
    pub fn adapt_towards(&mut self, target: &Point, rate: Float) -> (Float, Float) {
        let dx = rate * (target.x - self.position.x);
        let dy = rate * (target.y - self.position.y);
        self.adapt(dx, dy);

        (dx, dy)
    }

    /// Remembers current position as previous one.
    pub fn remember_position(&mut self) {
        self.previous = self.position;
    }

    /// Returns neighbour indices.
    pub fn neighbours(&self) -> &[usize] {
        self.neighbours.as_slice()
    }

    /// Returns amount of neighbours.
    pub fn degree(&self) -> usize {
        self.neighbours.len()
    }

    /// Checks whether given node is a neighbour.
    pub fn is_neighbour(&self, other: usize) -> bool {
        self.neighbours.contains(&other)
    }

    pub(crate) fn add_neighbour(&mut self, other: usize) {
        self.neighbours.push(other);
    }

    pub(crate) fn remove_neighbour(&mut self, other: usize) {
        if let Some(idx) = self.neighbours.iter().position(|&n| n == other) {
            self.neighbours.remove(idx);
        }
    }

    pub(crate) fn replace_neighbour(&mut self, old: usize, new: usize) {
        self.neighbours.iter_mut().filter(|n| **n == old).for_each(|n| *n = new);
    }

    pub(crate) fn reset_signal_flags(&mut self) {
        self.flags.is_winner = false;
        self.flags.is_second = false;
        self.flags.has_moved = false;
    }
}

/// Represents an undirected edge between two nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Index of the first node.
    pub from: usize,
    /// Index of the second node.
    pub to: usize,
    /// Age of the edge in signals.
    pub age: usize,
}

impl Edge {
    /// Checks whether edge connects given nodes in any direction.
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// Checks whether edge touches given node.
    pub fn touches(&self, node: usize) -> bool {
        self.from == node || self.to == node
    }

    pub(crate) fn replace(&mut self, old: usize, new: usize) {
        if self.from == old {
            self.from = new;
        }
        if self.to == old {
            self.to = new;
        }
    }
}
