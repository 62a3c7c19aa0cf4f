//! Weighted best-first search over the lazily evaluated visibility graph.

use log::debug;
use sightline_core::Point;

use crate::cache::AdjacencyCache;
use crate::config::{GraphConfig, SearchMode};
use crate::distance::octile;
use crate::grid::GridMap;
use crate::heap::MinHeap;
use crate::visibility::visible_distance;
use crate::GraphError;

pub(crate) const NO_PARENT: usize = usize::MAX;

/// Per-vertex bookkeeping for one query.
#[derive(Clone)]
struct Node {
    g: f64,
    parent: usize,
    closed: bool,
    queued: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0.0,
            parent: NO_PARENT,
            closed: false,
            queued: false,
        }
    }
}

/// Open queue plus node table of one query.
struct Frontier {
    nodes: Vec<Node>,
    open: MinHeap,
    mode: SearchMode,
}

impl Frontier {
    fn new(n: usize, mode: SearchMode) -> Self {
        Self {
            nodes: vec![Node::default(); n],
            open: MinHeap::with_capacity(n),
            mode,
        }
    }

    fn seed(&mut self, start: usize, h: f64) -> Result<(), GraphError> {
        self.nodes[start].queued = true;
        self.open.push(start, h)
    }

    /// Offer vertex `i` a route of cost `g` through `parent`, with `h` the
    /// weighted estimate left to the goal.
    ///
    /// An already queued vertex takes the better `g` and parent either way;
    /// only [`SearchMode::Strict`] also lowers its queued priority.
    fn relax(&mut self, i: usize, parent: usize, g: f64, h: f64) -> Result<(), GraphError> {
        let node = &mut self.nodes[i];
        if node.closed || (node.queued && g >= node.g) {
            return Ok(());
        }
        node.g = g;
        node.parent = parent;
        if !node.queued {
            node.queued = true;
            self.open.push(i, g + h)?;
        } else if self.mode == SearchMode::Strict {
            self.open.decrease_key(i, g + h);
        }
        Ok(())
    }
}

/// One query over the visibility graph. Every vertex in `points` is a
/// candidate neighbour of every other; edges are discovered by testing line
/// of sight on demand.
pub(crate) struct Search<'a> {
    pub(crate) grid: &'a GridMap,
    pub(crate) cache: &'a mut AdjacencyCache,
    pub(crate) points: &'a [Point],
    pub(crate) config: &'a GraphConfig,
}

impl Search<'_> {
    /// Run from vertex `start` to vertex `finish`, returning the vertex ids
    /// of the route (both ends included), or `None` once the queue runs dry.
    pub(crate) fn run(self, start: usize, finish: usize) -> Result<Option<Vec<usize>>, GraphError> {
        let Search {
            grid,
            cache,
            points,
            config,
        } = self;
        let n = points.len();
        let goal = points[finish];
        let heuristic =
            |p: Point| octile(p, goal, config.octile_constant) * config.heuristic_weight;

        let mut frontier = Frontier::new(n, config.mode);
        frontier.seed(start, heuristic(points[start]))?;

        let mut expanded = 0usize;
        while let Some(current) = frontier.open.pop() {
            if current == finish {
                debug!("search reached finish after {expanded} expansion(s)");
                let nodes = &frontier.nodes;
                return Ok(Some(backtrace(start, finish, |i| nodes[i].parent)));
            }
            expanded += 1;
            frontier.nodes[current].closed = true;
            let current_g = frontier.nodes[current].g;

            for i in 0..n {
                if frontier.nodes[i].closed {
                    continue;
                }
                let Some(d) = visible_distance(grid, cache, points, i, current) else {
                    continue;
                };
                frontier.relax(i, current, current_g + f64::from(d), heuristic(points[i]))?;
            }
        }

        debug!("search exhausted after {expanded} expansion(s)");
        Ok(None)
    }
}

/// Follow predecessor links from `finish` back to `start`, returning the ids
/// in travel order.
pub(crate) fn backtrace(
    start: usize,
    finish: usize,
    parent: impl Fn(usize) -> usize,
) -> Vec<usize> {
    let mut path = vec![finish];
    let mut cur = finish;
    while cur != start {
        cur = parent(cur);
        if cur == NO_PARENT {
            break;
        }
        path.push(cur);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(grid: &GridMap, points: &[Point], config: &GraphConfig) -> Option<Vec<usize>> {
        let mut cache = AdjacencyCache::new(points.len(), 1);
        let n = points.len();
        Search {
            grid,
            cache: &mut cache,
            points,
            config,
        }
        .run(n - 2, n - 1)
        .unwrap()
    }

    #[test]
    fn direct_line_of_sight() {
        let grid = GridMap::new(10, 10);
        let points = [Point::new(0, 0), Point::new(9, 9)];
        let ids = run(&grid, &points, &GraphConfig::default());
        assert_eq!(ids, Some(vec![0, 1]));
    }

    #[test]
    fn blocked_without_waypoints() {
        let mut grid = GridMap::new(10, 10);
        grid.mark_obstacle(Point::new(5, 5));
        let points = [Point::new(0, 5), Point::new(9, 5)];
        assert_eq!(run(&grid, &points, &GraphConfig::default()), None);
    }

    #[test]
    fn detours_through_a_corner() {
        let mut grid = GridMap::new(10, 10);
        grid.mark_obstacle(Point::new(5, 5));
        let points = [Point::new(4, 4), Point::new(0, 5), Point::new(9, 5)];
        let ids = run(&grid, &points, &GraphConfig::default());
        assert_eq!(ids, Some(vec![1, 0, 2]));
    }

    #[test]
    fn exact_config_finds_cheapest_crossing() {
        // A wall at x = 5 with a near gap at y = 2 and a far one at y = 8,
        // each marked by a waypoint pair.
        let mut grid = GridMap::new(11, 11);
        for y in 0..11 {
            if y != 2 && y != 8 {
                grid.mark_obstacle(Point::new(5, y));
            }
        }
        let points = [
            Point::new(4, 8),
            Point::new(6, 8),
            Point::new(4, 2),
            Point::new(6, 2),
            Point::new(0, 3),
            Point::new(10, 3),
        ];
        let ids = run(&grid, &points, &GraphConfig::exact()).unwrap();
        assert_eq!(ids.first(), Some(&4));
        assert_eq!(ids.last(), Some(&5));
        let cost: u32 = ids
            .windows(2)
            .map(|w| crate::distance::manhattan(points[w[0]], points[w[1]]))
            .sum();
        // Crossing at y = 2 costs 10 across plus one step up and one down.
        assert_eq!(cost, 12);
        assert!(!ids.contains(&0) && !ids.contains(&1));
    }

    #[test]
    fn approximate_mode_keeps_stale_priority() {
        let mut frontier = Frontier::new(3, SearchMode::Approximate);
        frontier.seed(0, 0.0).unwrap();
        frontier.relax(2, 0, 10.0, 5.0).unwrap();
        frontier.relax(2, 1, 4.0, 5.0).unwrap();
        assert_eq!(frontier.nodes[2].g, 4.0);
        assert_eq!(frontier.nodes[2].parent, 1);
        assert_eq!(frontier.open.priority(2), Some(15.0));
    }

    #[test]
    fn strict_mode_lowers_queued_priority() {
        let mut frontier = Frontier::new(3, SearchMode::Strict);
        frontier.seed(0, 0.0).unwrap();
        frontier.relax(2, 0, 10.0, 5.0).unwrap();
        frontier.relax(2, 1, 4.0, 5.0).unwrap();
        assert_eq!(frontier.nodes[2].g, 4.0);
        assert_eq!(frontier.nodes[2].parent, 1);
        assert_eq!(frontier.open.priority(2), Some(9.0));
    }

    #[test]
    fn relax_ignores_worse_and_closed() {
        for mode in [SearchMode::Approximate, SearchMode::Strict] {
            let mut frontier = Frontier::new(3, mode);
            frontier.relax(1, 0, 4.0, 1.0).unwrap();
            frontier.relax(1, 2, 6.0, 1.0).unwrap();
            assert_eq!(frontier.nodes[1].parent, 0);
            assert_eq!(frontier.open.priority(1), Some(5.0));

            frontier.nodes[2].closed = true;
            frontier.relax(2, 1, 1.0, 0.0).unwrap();
            assert!(!frontier.open.contains(2));
            assert_eq!(frontier.nodes[2].parent, NO_PARENT);
        }
    }

    #[test]
    fn backtrace_follows_parents() {
        // 3 <- 1 <- 0, start 0.
        let parents = [NO_PARENT, 0, NO_PARENT, 1];
        assert_eq!(backtrace(0, 3, |i| parents[i]), vec![0, 1, 3]);
        assert_eq!(backtrace(0, 0, |i| parents[i]), vec![0]);
    }
}
