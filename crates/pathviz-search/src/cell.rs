//! The [`Cell`] type: one grid position and its search state.

use pathviz_core::Point;

/// Cost of stepping onto an ordinary cell.
pub const STEP_COST: f64 = 1.0;

/// Cost of stepping onto a weighted cell.
pub const WEIGHT_COST: f64 = 15.0;

/// A single grid cell.
///
/// Fields are only mutated through [`Grid`](crate::Grid), which keeps the
/// wall/weight exclusion intact.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub(crate) pos: Point,
    pub(crate) wall: bool,
    pub(crate) weighted: bool,
    pub(crate) distance: f64,
    pub(crate) visited: bool,
    pub(crate) previous: Option<Point>,
}

impl Cell {
    pub(crate) fn new(pos: Point) -> Self {
        Self {
            pos,
            wall: false,
            weighted: false,
            distance: f64::INFINITY,
            visited: false,
            previous: None,
        }
    }

    /// Position of the cell; also its key in the grid.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        self.wall
    }

    #[inline]
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Best known distance from the source. Only meaningful after a
    /// weighted search; at rest it is [`WEIGHT_COST`] for weighted cells and
    /// infinity otherwise.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Predecessor on the best known path back to the source.
    #[inline]
    pub fn previous(&self) -> Option<Point> {
        self.previous
    }

    /// Cost of entering this cell from a neighbour.
    #[inline]
    pub fn cost(&self) -> f64 {
        if self.weighted { WEIGHT_COST } else { STEP_COST }
    }

    /// Distance a cell rests at when no search is running.
    #[inline]
    pub(crate) fn resting_distance(&self) -> f64 {
        if self.weighted {
            WEIGHT_COST
        } else {
            f64::INFINITY
        }
    }

    pub(crate) fn clear_search_state(&mut self) {
        self.visited = false;
        self.previous = None;
        self.distance = self.resting_distance();
    }
}
