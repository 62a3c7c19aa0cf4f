//! Shortest paths over an already-known dense cost matrix.
//!
//! No grid and no visibility testing: `costs[a][b] > 0` is an edge of that
//! cost, anything else is no edge.

use crate::heap::MinHeap;
use crate::search::{NO_PARENT, backtrace};
use crate::GraphError;

/// Find the cheapest vertex sequence from `start` to `finish` in a dense,
/// square cost matrix, guided by a per-vertex heuristic (`heuristics[v]` is
/// the estimated remaining cost from `v`).
///
/// Returns the vertex ids from `start` to `finish` inclusive, or `None` if
/// `finish` is unreachable.
pub fn matrix_path(
    costs: &[Vec<i32>],
    heuristics: &[i32],
    start: usize,
    finish: usize,
) -> Result<Option<Vec<usize>>, GraphError> {
    let n = costs.len();
    for (row, r) in costs.iter().enumerate() {
        if r.len() != n {
            return Err(GraphError::MatrixShape {
                row,
                len: r.len(),
                expected: n,
            });
        }
    }
    if heuristics.len() != n {
        return Err(GraphError::HeuristicLen {
            len: heuristics.len(),
            expected: n,
        });
    }
    for id in [start, finish] {
        if id >= n {
            return Err(GraphError::VertexOutOfRange { id, count: n });
        }
    }

    let mut best = vec![i64::MAX; n];
    let mut parent = vec![NO_PARENT; n];
    let mut closed = vec![false; n];
    let mut open = MinHeap::with_capacity(n);
    best[start] = 0;
    open.push(start, 0.0)?;

    while let Some(current) = open.pop() {
        if current == finish {
            return Ok(Some(backtrace(start, finish, |i| parent[i])));
        }
        closed[current] = true;
        for (i, &edge) in costs[current].iter().enumerate() {
            if closed[i] || edge <= 0 {
                continue;
            }
            let cost = best[current] + i64::from(edge);
            if cost >= best[i] {
                continue;
            }
            best[i] = cost;
            parent[i] = current;
            let priority = (cost + i64::from(heuristics[i])) as f64;
            if !open.decrease_key(i, priority) && !open.contains(i) {
                open.push(i, priority)?;
            }
        }
    }
    Ok(None)
}
