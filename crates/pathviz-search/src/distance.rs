use pathviz_core::Point;

use crate::grid::Grid;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Total weighted cost of a path returned by
/// [`SearchStrategy::find_path`](crate::SearchStrategy::find_path).
///
/// Every cell on the path is entered exactly once and the source is not on
/// it, so the cost is the sum of the entry costs of its cells.
pub fn path_cost(grid: &Grid, path: &[Point]) -> f64 {
    path.iter().map(|&p| grid.cost(p)).sum()
}
