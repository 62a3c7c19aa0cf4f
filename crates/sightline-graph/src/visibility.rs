//! Line-of-sight testing between vertices.

use log::trace;
use sightline_core::Point;

use crate::cache::{AdjacencyCache, Link};
use crate::distance::manhattan;
use crate::grid::GridMap;

/// Walk an integer Bresenham line from `a` to `b` and report whether it
/// avoids every obstacle cell.
///
/// Both endpoints are tested. At each step the x move is applied and its
/// cell tested before the y move, so a diagonal step that would clip the
/// corner between two obstacles is caught.
pub fn raster_clear(grid: &GridMap, a: Point, b: Point) -> bool {
    let (mut x, mut y) = (a.x, a.y);
    let dx = b.x.abs_diff(a.x) as i64;
    let dy = b.y.abs_diff(a.y) as i64;
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        if grid.is_obstacle(Point::new(x, y)) {
            return false;
        }
        if x == b.x && y == b.y {
            return true;
        }
        let e2 = err * 2;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if grid.is_obstacle(Point::new(x, y)) {
            return false;
        }
        if x == b.x && y == b.y {
            return true;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

/// Visibility between vertices `a` and `b` at `points[a]` and `points[b]`,
/// consulting and filling `cache`. Returns the Manhattan distance when the
/// two are mutually visible.
///
/// Diagonal neighbours always see each other, even when the raster walk is
/// blocked by the cell it steps through. A vertex whose cell has since
/// become an obstacle sees nothing.
pub(crate) fn visible_distance(
    grid: &GridMap,
    cache: &mut AdjacencyCache,
    points: &[Point],
    a: usize,
    b: usize,
) -> Option<u32> {
    match cache.link(a, b) {
        Some(Link::Visible(d)) => return Some(d),
        Some(Link::Blocked) => return None,
        _ => {}
    }
    let (pa, pb) = (points[a], points[b]);
    let open = !grid.is_obstacle(pa) && !grid.is_obstacle(pb);
    if open && (raster_clear(grid, pa, pb) || pa.is_diagonal_to(pb)) {
        let d = manhattan(pa, pb);
        cache.record_visible(a, b, d);
        trace!("visible {a} {pa} <-> {b} {pb}: {d}");
        Some(d)
    } else {
        cache.record_blocked(a, b);
        trace!("blocked {a} {pa} <-> {b} {pb}");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(width: i32, height: i32, obstacles: &[(i32, i32)]) -> GridMap {
        let mut g = GridMap::new(width, height);
        for &(x, y) in obstacles {
            g.mark_obstacle(Point::new(x, y));
        }
        g
    }

    #[test]
    fn open_lines_are_clear() {
        let g = GridMap::new(10, 10);
        assert!(raster_clear(&g, Point::new(0, 0), Point::new(9, 9)));
        assert!(raster_clear(&g, Point::new(9, 0), Point::new(0, 3)));
        assert!(raster_clear(&g, Point::new(4, 4), Point::new(4, 4)));
    }

    #[test]
    fn obstacle_on_the_line_blocks() {
        let g = grid_with(10, 10, &[(5, 5)]);
        assert!(!raster_clear(&g, Point::new(0, 5), Point::new(9, 5)));
        assert!(!raster_clear(&g, Point::new(5, 0), Point::new(5, 9)));
        assert!(!raster_clear(&g, Point::new(0, 0), Point::new(9, 9)));
        assert!(raster_clear(&g, Point::new(0, 4), Point::new(9, 4)));
    }

    #[test]
    fn obstacle_endpoint_blocks() {
        let g = grid_with(5, 5, &[(2, 2)]);
        assert!(!raster_clear(&g, Point::new(2, 2), Point::new(4, 4)));
        assert!(!raster_clear(&g, Point::new(0, 2), Point::new(2, 2)));
        assert!(!raster_clear(&g, Point::new(2, 2), Point::new(2, 2)));
    }

    #[test]
    fn diagonal_step_checks_intermediate_cell() {
        // The x move from (0,0) lands on (1,0) before the y move.
        let g = grid_with(3, 3, &[(1, 0)]);
        assert!(!raster_clear(&g, Point::new(0, 0), Point::new(1, 1)));
    }

    #[test]
    fn diagonal_neighbours_are_always_visible() {
        let g = grid_with(3, 3, &[(1, 0), (0, 1)]);
        let points = [Point::new(0, 0), Point::new(1, 1)];
        let mut cache = AdjacencyCache::new(2, 0);
        assert_eq!(visible_distance(&g, &mut cache, &points, 0, 1), Some(2));
        assert_eq!(cache.link(1, 0), Some(Link::Visible(2)));
    }

    #[test]
    fn obstacle_vertex_sees_nothing() {
        let g = grid_with(3, 3, &[(1, 1)]);
        let points = [Point::new(0, 0), Point::new(1, 1), Point::new(2, 0)];
        let mut cache = AdjacencyCache::new(3, 0);
        assert_eq!(visible_distance(&g, &mut cache, &points, 0, 1), None);
        assert_eq!(visible_distance(&g, &mut cache, &points, 1, 2), None);
        assert_eq!(cache.link(1, 0), Some(Link::Blocked));
        assert_eq!(visible_distance(&g, &mut cache, &points, 0, 2), Some(2));
    }

    #[test]
    fn results_are_memoized_both_ways() {
        let g = grid_with(10, 10, &[(5, 5)]);
        let points = [Point::new(0, 5), Point::new(9, 5), Point::new(0, 0)];
        let mut cache = AdjacencyCache::new(3, 0);
        assert_eq!(visible_distance(&g, &mut cache, &points, 0, 1), None);
        assert_eq!(cache.link(1, 0), Some(Link::Blocked));
        assert_eq!(visible_distance(&g, &mut cache, &points, 2, 0), Some(5));
        assert_eq!(cache.link(0, 2), Some(Link::Visible(5)));
        assert_eq!(cache.discovered(0, 2), Some(5));

        // A cached answer wins over the grid.
        let open = GridMap::new(10, 10);
        assert_eq!(visible_distance(&open, &mut cache, &points, 1, 0), None);
    }
}
