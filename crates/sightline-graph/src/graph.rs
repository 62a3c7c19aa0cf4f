//! The visibility-graph engine: obstacle ingestion, rebuilds and queries.

use log::debug;
use sightline_core::{Point, Range};

use crate::cache::{AdjacencyCache, Link};
use crate::config::GraphConfig;
use crate::corners;
use crate::grid::{self, CornerKind, GridMap};
use crate::search::Search;
use crate::visibility;
use crate::GraphError;

/// A corner cell used as a graph vertex. Its index in
/// [`VisGraph::waypoints`] is its vertex id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub pos: Point,
    pub kind: CornerKind,
}

/// Any-angle pathfinder over a grid with incrementally added obstacles.
///
/// Waypoint ids are assigned in extraction order and never change. Each
/// query temporarily adds the start and finish as vertices `n` and `n + 1`,
/// where `n` is the waypoint count.
///
/// Every operation that touches the caches takes `&mut self`; a shared
/// instance needs external locking.
#[derive(Debug, Clone)]
pub struct VisGraph {
    grid: GridMap,
    obstacles: Vec<Point>,
    /// Obstacles before this index have been scanned for corners.
    processed: usize,
    waypoints: Vec<Waypoint>,
    cache: Option<AdjacencyCache>,
    generation: u32,
    config: GraphConfig,
}

impl VisGraph {
    /// Create an empty `width × height` graph with the default configuration.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_config(width, height, GraphConfig::default())
    }

    /// Create an empty graph with an explicit configuration.
    pub fn with_config(width: i32, height: i32, config: GraphConfig) -> Self {
        Self {
            grid: GridMap::new(width, height),
            obstacles: Vec::new(),
            processed: 0,
            waypoints: Vec::new(),
            cache: None,
            generation: 0,
            config,
        }
    }

    /// Parse an ASCII map (see [`GridMap`]'s `Display` for the glyphs) and
    /// ingest its obstacles in row-major order. The result is not built yet.
    pub fn from_ascii(s: &str) -> Result<Self, GraphError> {
        Self::from_ascii_with_config(s, GraphConfig::default())
    }

    /// [`from_ascii`](Self::from_ascii) with an explicit configuration.
    pub fn from_ascii_with_config(s: &str, config: GraphConfig) -> Result<Self, GraphError> {
        let map = grid::parse_ascii(s)?;
        let mut graph = Self::with_config(map.size.x, map.size.y, config);
        for p in map.obstacles {
            graph.add_obstacle(p);
        }
        Ok(graph)
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Replace the search configuration. Caches stay valid.
    pub fn set_config(&mut self, config: GraphConfig) {
        self.config = config;
    }

    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    pub fn bounds(&self) -> Range {
        self.grid.bounds()
    }

    /// Every obstacle ingested so far, in insertion order.
    pub fn obstacles(&self) -> &[Point] {
        &self.obstacles
    }

    /// Number of obstacles added since the last rebuild.
    pub fn pending_obstacles(&self) -> usize {
        self.obstacles.len() - self.processed
    }

    /// Number of completed rebuilds.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Whether [`build_matrix`](Self::build_matrix) has run at least once.
    pub fn is_built(&self) -> bool {
        self.cache.is_some()
    }

    /// Ingest one obstacle. Out-of-range points and cells that are already
    /// obstacles are ignored; returns whether the obstacle was recorded.
    ///
    /// An obstacle placed on an existing waypoint turns the cell into an
    /// obstacle but keeps the waypoint and its id.
    pub fn add_obstacle(&mut self, p: Point) -> bool {
        if !self.grid.mark_obstacle(p) {
            return false;
        }
        self.obstacles.push(p);
        true
    }

    /// Scan obstacles added since the previous rebuild for new corner
    /// waypoints, then allocate fresh visibility caches.
    ///
    /// Call this only once a complete, contiguous block of obstacles has been
    /// added: corners are classified against the grid as it stands while the
    /// batch is scanned.
    pub fn build_matrix(&mut self) {
        let batch = &self.obstacles[self.processed..];
        let added = corners::extract(&mut self.grid, batch, &mut self.waypoints);
        let scanned = batch.len();
        self.processed = self.obstacles.len();
        self.generation = self.generation.wrapping_add(1);
        self.cache = Some(AdjacencyCache::new(
            self.waypoints.len() + 2,
            self.generation,
        ));
        debug!(
            "rebuild {}: scanned {scanned} obstacle(s), {added} new waypoint(s), {} total",
            self.generation,
            self.waypoints.len()
        );
    }

    /// All extracted waypoints, indexed by vertex id.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn num_waypoints(&self) -> usize {
        self.waypoints.len()
    }

    /// Position of waypoint `id`.
    pub fn waypoint(&self, id: usize) -> Option<Point> {
        self.waypoints.get(id).map(|w| w.pos)
    }

    fn check_id(&self, id: usize) -> Result<(), GraphError> {
        if id < self.waypoints.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownWaypoint {
                id,
                count: self.waypoints.len(),
            })
        }
    }

    fn check_fresh(&self) -> Result<(), GraphError> {
        if self.cache.is_none() {
            return Err(GraphError::NotBuilt);
        }
        match self.pending_obstacles() {
            0 => Ok(()),
            pending => Err(GraphError::StaleGraph { pending }),
        }
    }

    /// Whether waypoints `a` and `b` see each other, memoized in the
    /// adjacency cache.
    pub fn is_visible(&mut self, a: usize, b: usize) -> Result<bool, GraphError> {
        self.check_fresh()?;
        self.check_id(a)?;
        self.check_id(b)?;
        let points: Vec<Point> = self.waypoints.iter().map(|w| w.pos).collect();
        let cache = self.cache.as_mut().ok_or(GraphError::NotBuilt)?;
        Ok(visibility::visible_distance(&self.grid, cache, &points, a, b).is_some())
    }

    /// Cached adjacency entry between two vertex ids, including the query
    /// slots `n` and `n + 1`.
    pub fn link(&self, a: usize, b: usize) -> Option<Link> {
        self.cache.as_ref()?.link(a, b)
    }

    /// Distance recorded in the completion cache this generation.
    pub fn discovered(&self, a: usize, b: usize) -> Option<u32> {
        self.cache.as_ref()?.discovered(a, b)
    }

    /// The adjacency cache, if built.
    pub fn cache(&self) -> Option<&AdjacencyCache> {
        self.cache.as_ref()
    }

    /// Text dump of the waypoint list and the adjacency cache.
    pub fn dump_adjacency(&self) -> String {
        let mut out = String::new();
        for (i, w) in self.waypoints.iter().enumerate() {
            out.push_str(&format!("waypoint {i} {}\n", w.pos));
        }
        match &self.cache {
            Some(cache) => out.push_str(&cache.to_string()),
            None => out.push_str("(not built)"),
        }
        out
    }

    /// Find a route from `start` to `finish`.
    ///
    /// On success the path starts at `start`, ends at exactly `finish`, and
    /// every point is visible from the next, so the agent can walk straight
    /// segments. `Ok(None)` means no route exists.
    ///
    /// An endpoint on an obstacle cell has no path. Fails if the graph was
    /// never built, if obstacles were added since the last rebuild, or if an
    /// endpoint is off the map.
    pub fn get_path(
        &mut self,
        start: Point,
        finish: Point,
    ) -> Result<Option<Vec<Point>>, GraphError> {
        self.check_fresh()?;
        for p in [start, finish] {
            if !self.grid.is_valid(p) {
                return Err(GraphError::OutOfBounds(p));
            }
        }
        if self.grid.is_obstacle(start) || self.grid.is_obstacle(finish) {
            debug!("no path {start} -> {finish}: endpoint on an obstacle");
            return Ok(None);
        }
        if start == finish {
            return Ok(Some(vec![start]));
        }

        let n = self.waypoints.len();
        let (s, f) = (n, n + 1);
        let mut points: Vec<Point> = self.waypoints.iter().map(|w| w.pos).collect();
        points.push(start);
        points.push(finish);

        let cache = self.cache.as_mut().ok_or(GraphError::NotBuilt)?;
        cache.reset_vertex(s);
        cache.reset_vertex(f);

        let search = Search {
            grid: &self.grid,
            cache,
            points: &points,
            config: &self.config,
        };
        let Some(ids) = search.run(s, f)? else {
            debug!("no path {start} -> {finish}");
            return Ok(None);
        };

        let mut path: Vec<Point> = ids.iter().map(|&i| points[i]).collect();
        if let Some(last) = path.last_mut() {
            *last = finish;
        }
        debug!("path {start} -> {finish}: {} point(s)", path.len());
        Ok(Some(path))
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn waypoint_round_trip() {
        let w = Waypoint {
            pos: Point::new(4, 6),
            kind: CornerKind::Outside,
        };
        let json = serde_json::to_string(&w).unwrap();
        let back: Waypoint = serde_json::from_str(&json).unwrap();
        assert_eq!(w, back);
    }
}
