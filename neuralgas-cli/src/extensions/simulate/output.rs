//! Serializes simulation state in json format.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/simulate/output_test.rs"]
mod output_test;

use neuralgas::prelude::*;
use serde::Serialize;
use std::io::{BufWriter, Write};

/// A snapshot of the simulation state.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOutput {
    /// Short name of the algorithm.
    pub algorithm: String,
    /// Total amount of processed signals.
    pub signals: usize,
    /// Network nodes.
    pub nodes: Vec<NodeOutput>,
    /// Network edges, they refer to nodes by index.
    pub edges: Vec<EdgeOutput>,
    /// Lattice of grid based algorithms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridOutput>,
    /// Fine-tuning progress of growing grid in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fine_tuning_progress: Option<usize>,
    /// Voronoi and/or Delaunay segments, if requested and the network state allows it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<SegmentOutput>>,
}

/// A node.
#[derive(Clone, Debug, Serialize)]
pub struct NodeOutput {
    /// Position x.
    pub x: Float,
    /// Position y.
    pub y: Float,
    /// Accumulated error.
    pub error: Float,
    /// Accumulated utility.
    pub utility: Float,
}

/// An edge.
#[derive(Clone, Debug, Serialize)]
pub struct EdgeOutput {
    /// First node index.
    pub from: usize,
    /// Second node index.
    pub to: usize,
    /// Edge age.
    pub age: usize,
}

/// A lattice of node indices, stored row by row.
#[derive(Clone, Debug, Serialize)]
pub struct GridOutput {
    /// Amount of columns.
    pub width: usize,
    /// Amount of rows.
    pub height: usize,
    /// Node indices per row.
    pub rows: Vec<Vec<usize>>,
}

/// A line segment.
#[derive(Clone, Debug, Serialize)]
pub struct SegmentOutput {
    /// Either "voronoi" or "delaunay".
    pub kind: String,
    /// Start point as `[x, y]`.
    pub from: [Float; 2],
    /// End point as `[x, y]`.
    pub to: [Float; 2],
}

/// Creates a snapshot of the simulation. Segments are computed only when `mode` is set.
pub fn create_simulation_output(simulation: &Simulation, mode: Option<VoronoiMode>) -> SimulationOutput {
    let network = simulation.network();

    let nodes = network
        .store
        .nodes()
        .iter()
        .map(|node| NodeOutput { x: node.position.x, y: node.position.y, error: node.error, utility: node.utility })
        .collect();

    let edges = network.store.edges().iter().map(|edge| EdgeOutput { from: edge.from, to: edge.to, age: edge.age }).collect();

    let grid = network.grid.as_ref().map(|grid| GridOutput {
        width: grid.width(),
        height: grid.height(),
        rows: (0..grid.height()).map(|y| (0..grid.width()).filter_map(|x| grid.get(x, y)).collect()).collect(),
    });

    let segments = mode.and_then(|mode| match simulation.compute_voronoi(mode) {
        VoronoiOutcome::Computed(segments) => Some(segments.iter().map(create_segment_output).collect()),
        VoronoiOutcome::Skipped => {
            simulation.environment().log("voronoi diagram is skipped: the network has not reached its node limit");
            None
        }
    });

    SimulationOutput {
        algorithm: simulation.config().algorithm.name().to_string(),
        signals: simulation.engine().signals(),
        nodes,
        edges,
        grid,
        fine_tuning_progress: simulation.engine().fine_tuning_progress(),
        segments,
    }
}

/// Writes simulation output in json format.
pub fn write_simulation_output<W: Write>(writer: BufWriter<W>, output: &SimulationOutput) -> Result<(), String> {
    serde_json::to_writer_pretty(writer, output).map_err(|err| format!("cannot write simulation output: '{err}'"))
}

fn create_segment_output(segment: &Segment) -> SegmentOutput {
    let kind = match segment.kind {
        SegmentKind::Voronoi => "voronoi",
        SegmentKind::Delaunay => "delaunay",
    };

    SegmentOutput {
        kind: kind.to_string(),
        from: [segment.from.x, segment.from.y],
        to: [segment.to.x, segment.to.y],
    }
}
