//! Shared helpers for the sightline demos: random maps and path rendering.

use rand::{Rng, RngExt};
use sightline_core::Point;
use sightline_graph::{CellState, VisGraph};

pub const WIDTH: i32 = 60;
pub const HEIGHT: i32 = 20;

/// Scatter `blocks` random rectangular obstacles (1–5 cells per side) over
/// the graph, leaving a one-cell margin around the map edge.
pub fn scatter_blocks(graph: &mut VisGraph, rng: &mut impl Rng, blocks: usize) {
    let (w, h) = (graph.width(), graph.height());
    if w < 3 || h < 3 {
        return;
    }
    for _ in 0..blocks {
        let bw = rng.random_range(1..=5);
        let bh = rng.random_range(1..=5);
        let x0 = rng.random_range(1..(w - 1));
        let y0 = rng.random_range(1..(h - 1));
        for y in y0..(y0 + bh).min(h - 1) {
            for x in x0..(x0 + bw).min(w - 1) {
                graph.add_obstacle(Point::new(x, y));
            }
        }
    }
}

/// First cell in row-major order that is not an obstacle.
pub fn first_free(graph: &VisGraph) -> Option<Point> {
    graph
        .grid()
        .iter()
        .find(|&(_, c)| c != CellState::Obstacle)
        .map(|(p, _)| p)
}

/// Last cell in row-major order that is not an obstacle.
pub fn last_free(graph: &VisGraph) -> Option<Point> {
    graph
        .grid()
        .iter()
        .filter(|&(_, c)| c != CellState::Obstacle)
        .last()
        .map(|(p, _)| p)
}

/// Render the map with the path's vertices numbered `0-9` (cycling), the
/// start as `S` and the finish as `F`.
pub fn render_path(graph: &VisGraph, path: &[Point]) -> String {
    let mut rows: Vec<Vec<char>> = graph
        .grid()
        .to_string()
        .lines()
        .map(|l| l.chars().collect())
        .collect();
    let last = path.len().saturating_sub(1);
    for (i, p) in path.iter().enumerate() {
        let glyph = match i {
            0 => 'S',
            i if i == last => 'F',
            i => char::from_digit((i % 10) as u32, 10).unwrap_or('*'),
        };
        if let Some(cell) = rows
            .get_mut(p.y as usize)
            .and_then(|row| row.get_mut(p.x as usize))
        {
            *cell = glyph;
        }
    }
    rows.into_iter()
        .map(|r| r.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn render_marks_path() {
        let mut g = VisGraph::from_ascii("....\n.#..\n....").unwrap();
        g.build_matrix();
        let path = g.get_path(Point::new(0, 2), Point::new(3, 0)).unwrap().unwrap();
        let out = render_path(&g, &path);
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].chars().next(), Some('S'));
        assert_eq!(rows[0].chars().nth(3), Some('F'));
        assert_eq!(rows[1].chars().nth(1), Some('#'));
    }

    #[test]
    fn scatter_keeps_margin() {
        let mut g = VisGraph::new(WIDTH, HEIGHT);
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        scatter_blocks(&mut g, &mut rng, 30);
        assert!(!g.obstacles().is_empty());
        for p in g.obstacles() {
            assert!(p.x > 0 && p.x < WIDTH - 1);
            assert!(p.y > 0 && p.y < HEIGHT - 1);
        }
        assert_eq!(first_free(&g), Some(Point::new(0, 0)));
        assert_eq!(last_free(&g), Some(Point::new(WIDTH - 1, HEIGHT - 1)));
    }
}
