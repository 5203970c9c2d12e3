#[cfg(test)]
#[path = "../../tests/unit/network/grid_test.rs"]
mod grid_test;

use super::*;
use crate::utils::{Float, Point};

/// Maximum amount of lattice columns.
pub const MAX_GRID_WIDTH: usize = 10000;

/// Maximum amount of lattice rows.
pub const MAX_GRID_HEIGHT: usize = 100;

/// Tau of bounding rows (columns) is multiplied by this factor when a row (column) is inserted between them.
const BOUNDING_TAU_FACTOR: Float = 0.66;

/// A rectangular lattice over nodes in a store. Cell `(x, y)` keeps an index of the node.
///
/// Lattice neighbours are always connected by edges in the store.
#[derive(Clone, Debug)]
pub struct GridTopology {
    columns: Vec<Vec<usize>>,
}

impl GridTopology {
    /// Creates a lattice of `width` columns and `height` rows, adding nodes to the store.
    /// Positions are produced by `position_fn` in column order.
    pub fn create<F>(store: &mut NodeStore, width: usize, height: usize, mut position_fn: F) -> Option<Self>
    where
        F: FnMut() -> Point,
    {
        if width == 0 || height == 0 || width > MAX_GRID_WIDTH || height > MAX_GRID_HEIGHT {
            return None;
        }

        if store.size() + width * height > store.max_nodes() {
            return None;
        }

        let mut columns = vec![Vec::with_capacity(height); width];
        for (x, column) in columns.iter_mut().enumerate() {
            for y in 0..height {
                let idx = store.add_node(position_fn())?;
                store.node_mut(idx).grid = Some(GridCoordinate(x, y));
                column.push(idx);
            }
        }

        for x in 0..width {
            for y in 0..height {
                if x + 1 < width {
                    store.connect(columns[x][y], columns[x + 1][y]);
                }
                if y + 1 < height {
                    store.connect(columns[x][y], columns[x][y + 1]);
                }
            }
        }

        Some(Self { columns })
    }

    /// Returns amount of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Returns amount of rows.
    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, |column| column.len())
    }

    /// Returns node index at given cell.
    pub fn get(&self, x: usize, y: usize) -> Option<usize> {
        self.columns.get(x).and_then(|column| column.get(y)).copied()
    }

    /// Returns all cells with their node indices.
    pub fn cells(&self) -> impl Iterator<Item = (GridCoordinate, usize)> + '_ {
        self.columns
            .iter()
            .enumerate()
            .flat_map(|(x, column)| column.iter().enumerate().map(move |(y, &idx)| (GridCoordinate(x, y), idx)))
    }

    /// Returns lattice (manhattan) distance between cells. With `torus`, columns wrap around.
    pub fn lattice_distance(&self, a: GridCoordinate, b: GridCoordinate, torus: bool) -> usize {
        let dx = a.0.abs_diff(b.0);
        let dx = if torus { dx.min(self.width() - dx) } else { dx };

        dx + a.1.abs_diff(b.1)
    }

    /// Inserts a row between rows `after` and `after + 1`. The new row gets positions in the middle of
    /// bounding rows and a third of their total tau. Returns index of the last added node.
    pub fn insert_row(&mut self, store: &mut NodeStore, after: usize) -> Option<usize> {
        let (width, height) = (self.width(), self.height());

        if height >= MAX_GRID_HEIGHT || store.size() + width > store.max_nodes() || after + 1 >= height {
            return None;
        }

        // lattice grows by appending a row, then node state is shifted down
        let mut last = None;
        for x in 0..width {
            let idx = store.add_node(Point::default())?;
            store.node_mut(idx).grid = Some(GridCoordinate(x, height));
            self.columns[x].push(idx);

            if x > 0 {
                store.connect(idx, self.columns[x - 1][height]);
            }
            store.connect(idx, self.columns[x][height - 1]);

            last = Some(idx);
        }

        for y in (after + 2..=height).rev() {
            for x in 0..width {
                self.copy_state(store, (x, y - 1), (x, y));
            }
        }

        for x in 0..width {
            let (prev, new, next) = (self.columns[x][after], self.columns[x][after + 1], self.columns[x][after + 2]);
            Self::interpolate(store, prev, new, next);
        }

        last
    }

    /// Inserts a column between columns `after` and `after + 1`. Symmetric to `insert_row`.
    pub fn insert_column(&mut self, store: &mut NodeStore, after: usize) -> Option<usize> {
        let (width, height) = (self.width(), self.height());

        if width >= MAX_GRID_WIDTH || store.size() + height > store.max_nodes() || after + 1 >= width {
            return None;
        }

        let mut column = Vec::with_capacity(height);
        for y in 0..height {
            let idx = store.add_node(Point::default())?;
            store.node_mut(idx).grid = Some(GridCoordinate(width, y));
            column.push(idx);

            if y > 0 {
                store.connect(idx, column[y - 1]);
            }
            store.connect(idx, self.columns[width - 1][y]);
        }
        let last = column.last().copied();
        self.columns.push(column);

        for x in (after + 2..=width).rev() {
            for y in 0..height {
                self.copy_state(store, (x - 1, y), (x, y));
            }
        }

        for y in 0..height {
            let (prev, new, next) = (self.columns[after][y], self.columns[after + 1][y], self.columns[after + 2][y]);
            Self::interpolate(store, prev, new, next);
        }

        last
    }

    /// Grows the lattice next to the cell with the highest tau towards its most distant lattice neighbour.
    /// Resets tau and recent insertion flags of all cells. Returns false when lattice cannot grow.
    pub fn enlarge(&mut self, store: &mut NodeStore, max_height: usize) -> bool {
        let (width, height) = (self.width(), self.height());

        let mut best = (0, 0);
        let mut max_tau = 0.;
        for y in 0..height {
            for x in 0..width {
                let node = store.node_mut(self.columns[x][y]);
                if node.tau > max_tau {
                    max_tau = node.tau;
                    best = (x, y);
                }
                node.tau = 0.;
                node.flags.is_recently_inserted = false;
            }
        }

        let (x, y) = best;
        let position = store.node(self.columns[x][y]).position;
        let distance_to = |cell: Option<usize>| cell.map_or(0., |idx| store.node(idx).position.sqr_distance(&position));

        let left = distance_to(x.checked_sub(1).and_then(|x| self.get(x, y)));
        let mut up = distance_to(y.checked_sub(1).and_then(|y| self.get(x, y)));
        let right = distance_to(self.get(x + 1, y));
        let mut down = distance_to(self.get(x, y + 1));

        if max_height > 0 && height >= max_height {
            up = 0.;
            down = 0.;
        }

        let max = left.max(up).max(right).max(down);

        let result = if max == left {
            x.checked_sub(1).and_then(|after| self.insert_column(store, after))
        } else if max == up {
            y.checked_sub(1).and_then(|after| self.insert_row(store, after))
        } else if max == right {
            self.insert_column(store, x)
        } else {
            self.insert_row(store, y)
        };

        result.is_some()
    }

    /// Rewrites node index in the lattice, used when the store relocates a node.
    pub fn replace_index(&mut self, old: usize, new: usize) {
        self.columns.iter_mut().flat_map(|column| column.iter_mut()).filter(|idx| **idx == old).for_each(|idx| *idx = new);
    }

    fn copy_state(&self, store: &mut NodeStore, from: (usize, usize), to: (usize, usize)) {
        let source = store.node(self.columns[from.0][from.1]);
        let (position, previous, tau) = (source.position, source.previous, source.tau);

        let target = store.node_mut(self.columns[to.0][to.1]);
        target.position = position;
        target.previous = previous;
        target.tau = tau;
    }

    fn interpolate(store: &mut NodeStore, prev: usize, new: usize, next: usize) {
        let (prev_node, next_node) = (store.node(prev), store.node(next));
        let position = prev_node.position.midpoint(&next_node.position);
        let tau = (prev_node.tau + next_node.tau) / 3.;

        store.node_mut(prev).tau *= BOUNDING_TAU_FACTOR;
        store.node_mut(next).tau *= BOUNDING_TAU_FACTOR;

        let node = store.node_mut(new);
        node.position = position;
        node.previous = position;
        node.tau = tau;
        node.flags.is_recently_inserted = true;
    }
}
