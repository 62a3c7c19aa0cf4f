//! **sightline-core** — geometry primitives shared by the *sightline* crates.
//!
//! [`Point`] is the integer cell coordinate used everywhere; [`Range`] is the
//! half-open rectangle describing a map's extent.

pub mod geom;

pub use geom::{Point, Range, RangeIter};
