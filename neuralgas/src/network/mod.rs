//! This module contains a network model: nodes, edges and an optional lattice over them.

#[cfg(test)]
#[path = "../../tests/unit/network/network_test.rs"]
mod network_test;

mod node;
pub use self::node::*;

mod store;
pub use self::store::*;

mod grid;
pub use self::grid::*;

use crate::utils::Point;

/// A network of nodes with an optional lattice topology.
pub struct Network {
    /// Node and edge storage.
    pub store: NodeStore,
    /// A lattice, used by growing grid and self-organizing map.
    pub grid: Option<GridTopology>,
}

impl Network {
    /// Creates an empty network.
    pub fn new(capacity: usize, max_nodes: usize, max_degree: usize) -> Self {
        Self { store: NodeStore::new(capacity, max_nodes, max_degree), grid: None }
    }

    /// Returns amount of nodes.
    pub fn size(&self) -> usize {
        self.store.size()
    }

    /// Removes all nodes, edges and the lattice.
    pub fn clear(&mut self) {
        self.store.clear();
        self.grid = None;
    }

    /// Deletes a node keeping the lattice consistent. Lattice nodes cannot be deleted.
    pub fn delete_node(&mut self, idx: usize) -> bool {
        if self.store.nodes().get(idx).is_none_or(|node| node.grid.is_some()) {
            return false;
        }

        let old_last = self.store.size() - 1;
        if !self.store.delete_node(idx) {
            return false;
        }

        if let Some(grid) = self.grid.as_mut() {
            if idx != old_last {
                grid.replace_index(old_last, idx);
            }
        }

        true
    }

    /// Returns indices of the nearest and the second nearest node to the point.
    ///
    /// The scan keeps the last node on equal distance as the nearest one.
    pub fn nearest_two(&self, point: &Point) -> Option<(usize, Option<usize>)> {
        let (nearest, second, ..) = self.store.nodes().iter().enumerate().fold(
            (None, None, crate::utils::Float::MAX, crate::utils::Float::MAX),
            |(nearest, second, d1, d2), (idx, node)| {
                let distance = node.position.sqr_distance(point);
                if distance <= d1 {
                    (Some(idx), nearest, distance, d1)
                } else if distance < d2 {
                    (nearest, Some(idx), d1, distance)
                } else {
                    (nearest, second, d1, d2)
                }
            },
        );

        nearest.map(|nearest| (nearest, second))
    }
}
