//! Error type shared by the grid, the searches and the layout parser.

use pathviz_core::Point;
use thiserror::Error;

use crate::strategy::Algorithm;

/// Everything that can go wrong in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A search was started without a source or destination.
    #[error("cannot search without a {missing}")]
    InvalidState { missing: &'static str },

    /// The destination is not reachable from the source.
    #[error("no path from {from} to {to}")]
    NoPathFound { from: Point, to: Point },

    /// A coordinate outside the grid was passed to a mutator.
    #[error("{pos} is outside the {rows}x{columns} grid")]
    OutOfBounds { pos: Point, rows: i32, columns: i32 },

    /// A source or destination was placed on a wall.
    #[error("{0} is a wall")]
    Blocked(Point),

    /// Layout lines differ in width.
    #[error("layout line {line} has a different width than the first line")]
    InconsistentSize { line: usize },

    /// Layout contains a character outside the legend.
    #[error("layout contains invalid character \u{201c}{ch}\u{201d} at {pos}")]
    InvalidRune { ch: char, pos: Point },

    /// Layout marks more than one source or destination.
    #[error("layout contains more than one \u{201c}{0}\u{201d}")]
    DuplicateEndpoint(char),

    /// A background search thread panicked before returning its strategy.
    #[error("{0} search thread panicked")]
    WorkerPanicked(Algorithm),
}

pub type Result<T> = std::result::Result<T, Error>;
