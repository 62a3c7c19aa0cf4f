//! Any-angle pathfinding on 2D grids with incrementally added obstacles.
//!
//! Agents move along straight segments between *waypoints*: free cells at
//! the corners of obstacles. The engine, [`VisGraph`], works in three steps:
//!
//! 1. obstacles are ingested with [`VisGraph::add_obstacle`];
//! 2. [`VisGraph::build_matrix`] extracts corner waypoints from the newly
//!    added obstacles and resets the visibility caches;
//! 3. [`VisGraph::get_path`] runs a weighted best-first search over the
//!    visibility graph, testing line of sight lazily and memoizing every
//!    result until the next rebuild.
//!
//! [`matrix_path`] solves the same problem over an already-known dense cost
//! matrix, sharing the [`MinHeap`] and backtrace machinery.
//!
//! ```
//! use sightline_core::Point;
//! use sightline_graph::VisGraph;
//!
//! let mut graph = VisGraph::new(10, 10);
//! graph.add_obstacle(Point::new(5, 5));
//! graph.build_matrix();
//! let path = graph.get_path(Point::new(0, 5), Point::new(9, 5)).unwrap();
//! assert!(path.is_some());
//! ```

mod cache;
mod config;
mod corners;
mod distance;
mod error;
mod graph;
mod grid;
mod heap;
mod matrix;
mod search;
mod visibility;

pub use cache::{AdjacencyCache, Link};
pub use config::{GraphConfig, SearchMode};
pub use corners::classify;
pub use distance::{manhattan, octile};
pub use error::GraphError;
pub use graph::{VisGraph, Waypoint};
pub use grid::{CellState, CornerKind, GridMap};
pub use heap::MinHeap;
pub use matrix::matrix_path;
pub use visibility::raster_clear;
