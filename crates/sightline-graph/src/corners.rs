//! Corner detection around freshly added obstacles.
//!
//! Classification only looks at the cells' *current* states. When a batch
//! of obstacles is processed one by one, an obstacle later in the batch may
//! not be visible yet to the neighbourhood scan of an earlier one, so the
//! result depends on insertion order. Rebuild only after a complete,
//! contiguous block of obstacles has been added.

use sightline_core::Point;

use crate::graph::Waypoint;
use crate::grid::{CornerKind, GridMap};

/// The four diagonal directions, each as `(dx, dy)`.
const DIAGONALS: [(i32, i32); 4] = [(-1, -1), (1, -1), (1, 1), (-1, 1)];

/// Whether `p` sits just outside a convex obstacle corner: some diagonal
/// neighbour is an obstacle while both cells flanking that diagonal are not.
fn is_outside_corner(grid: &GridMap, p: Point) -> bool {
    DIAGONALS.iter().any(|&(dx, dy)| {
        grid.is_obstacle(p.shift(dx, dy))
            && !grid.is_obstacle(p.shift(dx, 0))
            && !grid.is_obstacle(p.shift(0, dy))
    })
}

/// Whether `p` has an obstacle above or below it and one beside it, with the
/// diagonal cell closing that square left open.
fn is_inside_corner(grid: &GridMap, p: Point) -> bool {
    [-1, 1].iter().any(|&dy| {
        grid.is_obstacle(p.shift(0, dy))
            && [1, -1].iter().any(|&dx| {
                grid.is_obstacle(p.shift(dx, 0)) && !grid.is_obstacle(p.shift(dx, dy))
            })
    })
}

/// Classify `p` against the current grid. Outside corners take priority.
pub fn classify(grid: &GridMap, p: Point) -> Option<CornerKind> {
    if is_outside_corner(grid, p) {
        Some(CornerKind::Outside)
    } else if is_inside_corner(grid, p) {
        Some(CornerKind::Inside)
    } else {
        None
    }
}

/// Scan the 3×3 neighbourhood of every obstacle in `batch`, turning each
/// free corner cell into a waypoint appended to `out`.
///
/// Returns the number of waypoints added.
pub(crate) fn extract(grid: &mut GridMap, batch: &[Point], out: &mut Vec<Waypoint>) -> usize {
    let before = out.len();
    for &obstacle in batch {
        for dx in -1..=1 {
            for dy in -1..=1 {
                let p = obstacle.shift(dx, dy);
                if !grid.is_free(p) {
                    continue;
                }
                if let Some(kind) = classify(grid, p) {
                    grid.mark_waypoint(p, kind);
                    out.push(Waypoint { pos: p, kind });
                }
            }
        }
    }
    out.len() - before
}
