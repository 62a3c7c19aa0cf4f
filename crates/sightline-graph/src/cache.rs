//! Memoized pairwise visibility between graph vertices.

use std::fmt;

/// Cached visibility between two vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Link {
    /// Not tested yet in this build generation.
    #[default]
    Unknown,
    /// Mutually visible, with the Manhattan distance between them.
    Visible(u32),
    /// Line of sight is blocked.
    Blocked,
}

/// Square, symmetric visibility cache over `size` vertices, tagged with the
/// build generation it belongs to.
///
/// Two matrices are kept: the adjacency matrix the search reads (whose
/// query-endpoint rows are wiped before each query) and a completion matrix
/// recording every distance discovered during the generation, for
/// inspection only.
#[derive(Debug, Clone)]
pub struct AdjacencyCache {
    size: usize,
    generation: u32,
    links: Vec<Link>,
    discovered: Vec<Option<u32>>,
}

impl AdjacencyCache {
    /// Fresh cache with every entry unknown.
    pub fn new(size: usize, generation: u32) -> Self {
        Self {
            size,
            generation,
            links: vec![Link::Unknown; size * size],
            discovered: vec![None; size * size],
        }
    }

    /// Number of vertices the cache covers.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Build generation this cache was allocated for.
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[inline]
    fn idx(&self, a: usize, b: usize) -> usize {
        a * self.size + b
    }

    /// Cached link between `a` and `b`, or `None` if either is out of range.
    pub fn link(&self, a: usize, b: usize) -> Option<Link> {
        (a < self.size && b < self.size).then(|| self.links[self.idx(a, b)])
    }

    /// Distance recorded in the completion matrix this generation.
    pub fn discovered(&self, a: usize, b: usize) -> Option<u32> {
        if a < self.size && b < self.size {
            self.discovered[self.idx(a, b)]
        } else {
            None
        }
    }

    pub(crate) fn record_visible(&mut self, a: usize, b: usize, distance: u32) {
        let (ab, ba) = (self.idx(a, b), self.idx(b, a));
        self.links[ab] = Link::Visible(distance);
        self.links[ba] = Link::Visible(distance);
        self.discovered[ab] = Some(distance);
        self.discovered[ba] = Some(distance);
    }

    pub(crate) fn record_blocked(&mut self, a: usize, b: usize) {
        let (ab, ba) = (self.idx(a, b), self.idx(b, a));
        self.links[ab] = Link::Blocked;
        self.links[ba] = Link::Blocked;
    }

    /// Forget every adjacency entry in row and column `v`. The completion
    /// matrix is left alone.
    pub(crate) fn reset_vertex(&mut self, v: usize) {
        for i in 0..self.size {
            let (vi, iv) = (self.idx(v, i), self.idx(i, v));
            self.links[vi] = Link::Unknown;
            self.links[iv] = Link::Unknown;
        }
    }

    /// Number of known (visible or blocked) ordered pairs.
    pub fn known(&self) -> usize {
        self.links.iter().filter(|l| **l != Link::Unknown).count()
    }
}

impl fmt::Display for AdjacencyCache {
    /// One row per vertex; `.` unknown, `x` blocked, otherwise the distance.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for a in 0..self.size {
            if a > 0 {
                writeln!(f)?;
            }
            write!(f, "{a}:")?;
            for b in 0..self.size {
                match self.links[self.idx(a, b)] {
                    Link::Unknown => write!(f, "\t.")?,
                    Link::Blocked => write!(f, "\tx")?,
                    Link::Visible(d) => write!(f, "\t{d}")?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unknown() {
        let c = AdjacencyCache::new(3, 7);
        assert_eq!(c.size(), 3);
        assert_eq!(c.generation(), 7);
        assert_eq!(c.link(0, 2), Some(Link::Unknown));
        assert_eq!(c.link(3, 0), None);
        assert_eq!(c.known(), 0);
    }

    #[test]
    fn writes_are_symmetric() {
        let mut c = AdjacencyCache::new(4, 0);
        c.record_visible(0, 3, 12);
        c.record_blocked(1, 2);
        assert_eq!(c.link(0, 3), Some(Link::Visible(12)));
        assert_eq!(c.link(3, 0), Some(Link::Visible(12)));
        assert_eq!(c.link(2, 1), Some(Link::Blocked));
        assert_eq!(c.discovered(3, 0), Some(12));
        assert_eq!(c.discovered(1, 2), None);
        assert_eq!(c.known(), 4);
    }

    #[test]
    fn reset_vertex_keeps_completion_matrix() {
        let mut c = AdjacencyCache::new(3, 0);
        c.record_visible(0, 2, 5);
        c.record_blocked(1, 2);
        c.record_visible(0, 1, 1);
        c.reset_vertex(2);
        assert_eq!(c.link(0, 2), Some(Link::Unknown));
        assert_eq!(c.link(2, 1), Some(Link::Unknown));
        assert_eq!(c.link(0, 1), Some(Link::Visible(1)));
        assert_eq!(c.discovered(0, 2), Some(5));
    }

    #[test]
    fn display_marks_entries() {
        let mut c = AdjacencyCache::new(2, 0);
        c.record_visible(0, 1, 4);
        assert_eq!(c.to_string(), "0:\t.\t4\n1:\t4\t.");
        c.record_blocked(0, 1);
        assert_eq!(c.to_string(), "0:\t.\tx\n1:\tx\t.");
    }
}
