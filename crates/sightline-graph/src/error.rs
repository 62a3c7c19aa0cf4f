use std::fmt;

use sightline_core::Point;

/// Errors reported by the visibility graph, its priority queue, the ASCII map
/// parser and the dense-matrix solver.
///
/// A search that finds no route is not an error; it yields `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A query was issued before the first [`build_matrix`](crate::VisGraph::build_matrix).
    NotBuilt,
    /// Obstacles were added after the last rebuild; the caches no longer
    /// describe the grid.
    StaleGraph { pending: usize },
    /// A query endpoint lies outside the grid.
    OutOfBounds(Point),
    /// A waypoint id past the end of the waypoint list.
    UnknownWaypoint { id: usize, count: usize },
    /// A heap id that does not fit the heap's index table.
    QueueId { id: usize, capacity: usize },
    /// A push of an id that is already queued.
    AlreadyQueued(usize),
    /// ASCII map lines have different widths.
    InconsistentSize { line: usize },
    /// ASCII map contains a character other than `.`, `#`, `o` or `i`.
    InvalidRune { ch: char, pos: Point },
    /// A cost-matrix row whose length differs from the number of rows.
    MatrixShape {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// Heuristic table length differs from the vertex count.
    HeuristicLen { len: usize, expected: usize },
    /// Start or finish vertex outside the cost matrix.
    VertexOutOfRange { id: usize, count: usize },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotBuilt => write!(f, "visibility graph has not been built"),
            Self::StaleGraph { pending } => write!(
                f,
                "visibility graph is stale: {pending} obstacle(s) added since the last rebuild"
            ),
            Self::OutOfBounds(p) => write!(f, "point {p} is outside the map"),
            Self::UnknownWaypoint { id, count } => {
                write!(f, "waypoint {id} does not exist ({count} waypoints)")
            }
            Self::QueueId { id, capacity } => {
                write!(f, "id {id} does not fit a priority queue of capacity {capacity}")
            }
            Self::AlreadyQueued(id) => write!(f, "id {id} is already queued"),
            Self::InconsistentSize { line } => {
                write!(f, "map: line {line} has a different width")
            }
            Self::InvalidRune { ch, pos } => {
                write!(f, "map contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MatrixShape { row, len, expected } => write!(
                f,
                "cost matrix row {row} has {len} entries, expected {expected}"
            ),
            Self::HeuristicLen { len, expected } => write!(
                f,
                "heuristic table has {len} entries, expected {expected}"
            ),
            Self::VertexOutOfRange { id, count } => {
                write!(f, "vertex {id} is outside a {count}-vertex matrix")
            }
        }
    }
}

impl std::error::Error for GraphError {}
