//! Helpers shared by the strategy tests.

use std::sync::{Arc, Mutex};

use pathviz_core::Point;
use rand::{Rng, RngExt};

use crate::distance::manhattan;
use crate::grid::Grid;
use crate::layout::Layout;
use crate::strategy::SearchStrategy;

/// Replay `text` onto the strategy's grid.
pub(crate) fn load(s: &mut dyn SearchStrategy, text: &str) {
    Layout::parse(text).unwrap().apply(s.grid_mut()).unwrap();
}

/// Record every notification the grid emits.
pub(crate) fn record(grid: &mut Grid) -> Arc<Mutex<Vec<Point>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = Arc::clone(&seen);
    grid.register_observer(move |p| s.lock().unwrap().push(p));
    seen
}

/// Check that `path` is a walk of unit steps over open cells from the
/// destination to a neighbour of the source.
pub(crate) fn assert_walk(grid: &Grid, path: &[Point]) {
    let src = grid.source().unwrap();
    let dst = grid.destination().unwrap();
    if src == dst {
        assert!(path.is_empty());
        return;
    }
    assert_eq!(path.first(), Some(&dst));
    assert!(!path.contains(&src));
    let mut prev = dst;
    for &p in &path[1..] {
        assert_eq!(manhattan(prev, p), 1, "{prev} -> {p} is not a step");
        assert!(!grid.cell(p).unwrap().is_wall());
        prev = p;
    }
    assert_eq!(manhattan(prev, src), 1);
}

/// A `rows` × `columns` layout with the source in the top-left corner, the
/// destination in the bottom-right one and a random mix of walls and
/// weights in between.
pub(crate) fn random_layout(rng: &mut impl Rng, rows: i32, columns: i32) -> String {
    let mut text = String::new();
    for y in 0..rows {
        for x in 0..columns {
            let ch = if (y, x) == (0, 0) {
                'S'
            } else if (y, x) == (rows - 1, columns - 1) {
                'D'
            } else {
                match rng.random_range(0..10) {
                    0 | 1 => '#',
                    2 | 3 => '~',
                    _ => '.',
                }
            };
            text.push(ch);
        }
        text.push('\n');
    }
    text
}
