//! **pathviz-core**: geometry primitives shared by the pathviz crates.
//!
//! Provides [`Point`] (the cell key), [`Range`] (grid bounds with row-major
//! iteration) and [`Direction`] (the four search directions).

pub mod geom;

pub use geom::{Direction, Point, Range, RangeIter};
