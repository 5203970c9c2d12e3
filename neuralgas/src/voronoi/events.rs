use crate::utils::{Float, Point, compare_floats};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// A circle event key: predicted vertex height, vertex x and the half-edge which owns it.
#[derive(Clone, Copy, Debug)]
struct EventKey {
    ystar: Float,
    x: Float,
    half_edge: usize,
}

impl PartialEq for EventKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EventKey {}

impl PartialOrd for EventKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_floats(self.ystar, other.ystar)
            .then_with(|| compare_floats(self.x, other.x))
            .then_with(|| self.half_edge.cmp(&other.half_edge))
    }
}

/// A priority queue of circle events ordered by (ystar, x).
#[derive(Default)]
pub(super) struct EventQueue {
    events: BTreeSet<EventKey>,
}

impl EventQueue {
    pub fn insert(&mut self, half_edge: usize, vertex: &Point, ystar: Float) {
        self.events.insert(EventKey { ystar, x: vertex.x, half_edge });
    }

    pub fn remove(&mut self, half_edge: usize, vertex: &Point, ystar: Float) {
        self.events.remove(&EventKey { ystar, x: vertex.x, half_edge });
    }

    /// Returns the position of the earliest event as (x, ystar).
    pub fn peek(&self) -> Option<(Float, Float)> {
        self.events.first().map(|key| (key.x, key.ystar))
    }

    /// Removes the earliest event and returns its half-edge.
    pub fn pop(&mut self) -> Option<usize> {
        self.events.pop_first().map(|key| key.half_edge)
    }
}
