#[cfg(test)]
#[path = "../../tests/unit/network/store_test.rs"]
mod store_test;

use super::*;
use crate::signal::SignalSource;
use crate::utils::{Canvas, Float, Point, Random};

/// Ratio between edge and node capacity.
const EDGES_PER_NODE: usize = 6;

/// Margin used when nodes are placed randomly within the canvas.
const RANDOM_INIT_MARGIN: Float = 10.;

/// A fixed capacity collection of nodes and edges with symmetric adjacency.
///
/// Nodes and edges are addressed by index. Removal swaps the last element into the freed slot,
/// all references to the former last index are rewritten to the reused one.
pub struct NodeStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    capacity: usize,
    max_nodes: usize,
    max_degree: usize,
    max_edges: usize,
}

impl NodeStore {
    /// Creates a new instance of `NodeStore`.
    ///
    /// `capacity` is a hard limit of nodes, `max_nodes` is a soft limit which can be changed later.
    pub fn new(capacity: usize, max_nodes: usize, max_degree: usize) -> Self {
        let max_edges = EDGES_PER_NODE * capacity;

        Self {
            nodes: Vec::with_capacity(max_nodes.min(capacity)),
            edges: Vec::default(),
            capacity,
            max_nodes: max_nodes.min(capacity),
            max_degree,
            max_edges,
        }
    }

    /// Returns amount of nodes.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if store has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns amount of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns nodes.
    pub fn nodes(&self) -> &[Node] {
        self.nodes.as_slice()
    }

    /// Returns mutable nodes. Adjacency can be changed only via store methods.
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        self.nodes.as_mut_slice()
    }

    /// Returns edges.
    pub fn edges(&self) -> &[Edge] {
        self.edges.as_slice()
    }

    /// Returns node by index.
    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    /// Returns mutable node by index.
    pub fn node_mut(&mut self, idx: usize) -> &mut Node {
        &mut self.nodes[idx]
    }

    /// Returns node positions in index order.
    pub fn positions(&self) -> Vec<Point> {
        self.nodes.iter().map(|node| node.position).collect()
    }

    /// Returns the hard limit of nodes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current soft limit of nodes.
    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Returns the maximum amount of neighbours per node.
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    /// Returns the maximum amount of edges.
    pub fn max_edges(&self) -> usize {
        self.max_edges
    }

    /// Changes the soft limit of nodes. Existing nodes are kept.
    pub fn set_max_nodes(&mut self, max_nodes: usize) {
        self.max_nodes = max_nodes.min(self.capacity);
    }

    /// Checks whether no more nodes can be added.
    pub fn is_full(&self) -> bool {
        self.nodes.len() >= self.max_nodes || self.nodes.len() >= self.capacity
    }

    /// Removes all nodes and edges.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Adds a node at given position. Returns its index or `None` if the store is full.
    pub fn add_node(&mut self, position: Point) -> Option<usize> {
        if self.is_full() {
            return None;
        }

        self.nodes.push(Node::new(position));

        Some(self.nodes.len() - 1)
    }

    /// Adds a node placed either randomly within the canvas or at a signal of the distribution.
    pub fn add_node_from_signal(
        &mut self,
        source: &dyn SignalSource,
        canvas: &Canvas,
        random: &dyn Random,
        random_init: bool,
    ) -> Option<usize> {
        if self.is_full() {
            return None;
        }

        self.add_node(Self::initial_position(source, canvas, random, random_init))
    }

    /// Returns a position for a new node: either random within the canvas or a sampled signal.
    pub fn initial_position(source: &dyn SignalSource, canvas: &Canvas, random: &dyn Random, random_init: bool) -> Point {
        if random_init {
            let margin = RANDOM_INIT_MARGIN;
            Point::new(
                margin + (canvas.width - 2. * margin).max(0.) * random.uniform_real(0., 1.),
                margin + (canvas.height - 2. * margin).max(0.) * random.uniform_real(0., 1.),
            )
        } else {
            source.sample(canvas, random)
        }
    }

    /// Inserts a new node in the middle of the edge between `n1` and `n2`. The edge is split,
    /// errors of both nodes are reduced by `alpha`, and the new node gets their average error and utility.
    pub fn insert_between(&mut self, n1: usize, n2: usize, alpha: Float) -> Option<usize> {
        if self.is_full() || n1 == n2 || n1 >= self.nodes.len() || n2 >= self.nodes.len() {
            return None;
        }

        self.nodes[n1].error *= 1. - alpha;
        self.nodes[n2].error *= 1. - alpha;

        let (first, second) = (&self.nodes[n1], &self.nodes[n2]);
        let mut node = Node::new(first.position.midpoint(&second.position));
        node.error = (first.error + second.error) / 2.;
        node.utility = (first.utility + second.utility) / 2.;
        node.flags.is_recently_inserted = true;

        self.nodes.push(node);
        let idx = self.nodes.len() - 1;

        self.disconnect(n1, n2);
        self.connect(n1, idx);
        self.connect(n2, idx);

        Some(idx)
    }

    /// Deletes a node with all its edges. The last node takes its index.
    pub fn delete_node(&mut self, idx: usize) -> bool {
        if idx >= self.nodes.len() {
            return false;
        }

        while let Some(&neighbour) = self.nodes[idx].neighbours().first() {
            if !self.disconnect(idx, neighbour) {
                // NOTE adjacency without an edge record: drop it directly to keep lists symmetric
                self.nodes[idx].remove_neighbour(neighbour);
                self.nodes[neighbour].remove_neighbour(idx);
            }
        }

        self.nodes.swap_remove(idx);
        let old_last = self.nodes.len();

        if idx != old_last {
            self.nodes.iter_mut().for_each(|node| node.replace_neighbour(old_last, idx));
            self.edges.iter_mut().for_each(|edge| edge.replace(old_last, idx));
        }

        true
    }

    /// Connects two nodes or resets the age of their existing edge.
    ///
    /// Returns false if nodes cannot be connected: edge capacity is exhausted or one of the nodes
    /// has reached the maximum degree.
    pub fn connect(&mut self, from: usize, to: usize) -> bool {
        if self.nodes.len() < 2 || from == to || from >= self.nodes.len() || to >= self.nodes.len() {
            return false;
        }

        if self.nodes[from].is_neighbour(to) {
            return match self.find_edge(from, to) {
                Some(edge_idx) => {
                    self.edges[edge_idx].age = 0;
                    true
                }
                None => false,
            };
        }

        if self.edges.len() >= self.max_edges {
            return false;
        }

        if self.nodes[from].degree() >= self.max_degree || self.nodes[to].degree() >= self.max_degree {
            return false;
        }

        self.nodes[to].add_neighbour(from);
        self.nodes[from].add_neighbour(to);
        self.edges.push(Edge { from, to, age: 0 });

        true
    }

    /// Disconnects two nodes. Returns false if there was no edge.
    pub fn disconnect(&mut self, from: usize, to: usize) -> bool {
        match self.find_edge(from, to) {
            Some(edge_idx) => {
                self.delete_edge(edge_idx);
                true
            }
            None => false,
        }
    }

    /// Finds an edge between two nodes using linear scan.
    pub fn find_edge(&self, from: usize, to: usize) -> Option<usize> {
        self.edges.iter().position(|edge| edge.connects(from, to))
    }

    /// Increments age of all edges incident to the node and deletes every edge older than `max_age`.
    pub fn age_edges_of(&mut self, node: usize, max_age: usize) {
        for edge_idx in (0..self.edges.len()).rev() {
            let edge = &mut self.edges[edge_idx];
            if edge.touches(node) {
                edge.age += 1;
            }

            if edge.age > max_age {
                self.delete_edge(edge_idx);
            }
        }
    }

    /// Returns the neighbour with the highest (positive) error.
    pub fn max_error_neighbour(&self, master: usize) -> Option<usize> {
        self.nodes.get(master)?.neighbours().iter().fold((Float::MIN_POSITIVE, None), |(max_error, best), &n| {
            let error = self.nodes[n].error;
            if max_error < error { (error, Some(n)) } else { (max_error, best) }
        })
        .1
    }

    /// Pins or unpins the node: a pinned node ignores adaptations.
    pub fn pin(&mut self, idx: usize, is_pinned: bool) -> bool {
        match self.nodes.get_mut(idx) {
            Some(node) => {
                node.flags.is_pinned = is_pinned;
                true
            }
            None => false,
        }
    }

    fn delete_edge(&mut self, edge_idx: usize) {
        let Edge { from, to, .. } = self.edges.swap_remove(edge_idx);
        self.nodes[from].remove_neighbour(to);
        self.nodes[to].remove_neighbour(from);
    }
}
