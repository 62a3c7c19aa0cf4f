//! The cell-state store every other part of the engine reads.
//!
//! [`GridMap`] is a fixed-size `width × height` array of [`CellState`]s.
//! Cells only ever move from `Free` to `Obstacle` or `Waypoint`, and from
//! `Waypoint` to `Obstacle`; nothing is ever cleared.

use std::fmt;

use sightline_core::{Point, Range};

use crate::GraphError;

/// Which kind of corner a waypoint sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CornerKind {
    /// Free cell diagonal to an obstacle whose two flanking cells are open:
    /// the agent has to swing around a convex obstacle corner here.
    Outside,
    /// Free cell hemmed in by obstacles on two orthogonal sides with the
    /// diagonal between them open.
    Inside,
}

/// State of a single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Free,
    Obstacle,
    Waypoint(CornerKind),
}

impl CellState {
    /// Character used by the ASCII rendering.
    pub const fn glyph(self) -> char {
        match self {
            Self::Free => '.',
            Self::Obstacle => '#',
            Self::Waypoint(CornerKind::Outside) => 'o',
            Self::Waypoint(CornerKind::Inside) => 'i',
        }
    }
}

/// A fixed-size 2D grid of [`CellState`]s anchored at the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    cells: Vec<CellState>,
    bounds: Range,
}

impl GridMap {
    /// Create a map with every cell free. Negative sizes yield an empty map.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            cells: vec![CellState::Free; bounds.len()],
            bounds,
        }
    }

    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// The rectangle `[0, width) × [0, height)`.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Whether `p` lies inside the map.
    #[inline]
    pub fn is_valid(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        row_major(self.bounds.width(), p)
    }

    /// State of the cell at `p`, or `None` outside the map.
    #[inline]
    pub fn cell(&self, p: Point) -> Option<CellState> {
        if !self.is_valid(p) {
            return None;
        }
        Some(self.cells[self.index(p)])
    }

    /// Whether `p` is an obstacle cell. Points outside the map are not.
    #[inline]
    pub fn is_obstacle(&self, p: Point) -> bool {
        self.cell(p) == Some(CellState::Obstacle)
    }

    /// Whether `p` is inside the map and neither obstacle nor waypoint.
    #[inline]
    pub fn is_free(&self, p: Point) -> bool {
        self.cell(p) == Some(CellState::Free)
    }

    /// Mark `p` as an obstacle. Returns `false` (and changes nothing) when
    /// `p` is outside the map or already an obstacle.
    pub(crate) fn mark_obstacle(&mut self, p: Point) -> bool {
        match self.cell(p) {
            None | Some(CellState::Obstacle) => false,
            Some(_) => {
                let i = self.index(p);
                self.cells[i] = CellState::Obstacle;
                true
            }
        }
    }

    /// Mark a free cell as a waypoint of the given kind.
    pub(crate) fn mark_waypoint(&mut self, p: Point, kind: CornerKind) {
        if self.is_free(p) {
            let i = self.index(p);
            self.cells[i] = CellState::Waypoint(kind);
        }
    }

    /// Iterate over all positions and their states in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellState)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }
}

/// Flat index of an in-bounds `p` in a row-major store `width` cells wide.
#[inline]
fn row_major(width: i32, p: Point) -> usize {
    p.y as usize * width as usize + p.x as usize
}

impl fmt::Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width() {
                let state = self.cells[self.index(Point::new(x, y))];
                write!(f, "{}", state.glyph())?;
            }
        }
        Ok(())
    }
}

/// Parsed ASCII map: its size and its obstacle cells in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AsciiMap {
    pub(crate) size: Point,
    pub(crate) obstacles: Vec<Point>,
}

/// Parse an ASCII map of `.` (free) and `#` (obstacle) cells. `o` and `i`
/// are read as free so that rendered maps parse back.
///
/// Leading and trailing whitespace of the whole string is trimmed; every
/// remaining line must have the same width.
pub(crate) fn parse_ascii(s: &str) -> Result<AsciiMap, GraphError> {
    let s = s.trim();
    let mut width: Option<i32> = None;
    let mut height = 0;
    let mut obstacles = Vec::new();

    for (y, line) in s.lines().enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let mut x = 0;
        for ch in line.chars() {
            let pos = Point::new(x, y as i32);
            match ch {
                '#' => obstacles.push(pos),
                '.' | 'o' | 'i' => {}
                _ => return Err(GraphError::InvalidRune { ch, pos }),
            }
            x += 1;
        }
        match width {
            None => width = Some(x),
            Some(w) if w != x => return Err(GraphError::InconsistentSize { line: y }),
            Some(_) => {}
        }
        height += 1;
    }

    Ok(AsciiMap {
        size: Point::new(width.unwrap_or(0), height),
        obstacles,
    })
}
