//! The [`Grid`] type, a fixed-size rectangle of [`Cell`]s with a source, a
//! destination and a list of visitation observers.
//!
//! Cells are keyed by [`Point`] and stored densely in row-major order. The
//! grid is created once and never resized; [`reset`](Grid::reset) and
//! [`clear`](Grid::clear) return it to a reusable state.

use log::debug;
use pathviz_core::{Direction, Point, Range};

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::observer::{ObserverId, Observers};

/// A rectangular grid of cells owned by one search strategy.
#[derive(Debug)]
pub struct Grid {
    rng: Range,
    width: usize,
    cells: Vec<Cell>,
    source: Option<Point>,
    destination: Option<Point>,
    observers: Observers,
    visits: usize,
}

impl Grid {
    /// Create a `rows` × `columns` grid of open cells. Negative dimensions
    /// are treated as zero.
    pub fn new(rows: i32, columns: i32) -> Self {
        let rng = Range::new(0, 0, columns.max(0), rows.max(0));
        let cells = rng.iter().map(Cell::new).collect();
        Self {
            rng,
            width: rng.width() as usize,
            cells,
            source: None,
            destination: None,
            observers: Observers::new(),
            visits: 0,
        }
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rng.height()
    }

    #[inline]
    pub fn columns(&self) -> i32 {
        self.rng.width()
    }

    /// The bounds of the grid.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.rng.contains(p)
    }

    /// The cell at `p`, or `None` outside the grid.
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn source(&self) -> Option<Point> {
        self.source
    }

    pub fn destination(&self) -> Option<Point> {
        self.destination
    }

    /// Number of observer notifications emitted since the last
    /// [`reset`](Self::reset) or [`clear`](Self::clear).
    pub fn visit_count(&self) -> usize {
        self.visits
    }

    // -----------------------------------------------------------------------
    // Mutators
    // -----------------------------------------------------------------------

    /// Make the cell at `p` the search source.
    pub fn set_source(&mut self, p: Point) -> Result<()> {
        self.walkable(p)?;
        self.source = Some(p);
        Ok(())
    }

    /// Make the cell at `p` the search destination.
    pub fn set_destination(&mut self, p: Point) -> Result<()> {
        self.walkable(p)?;
        self.destination = Some(p);
        Ok(())
    }

    /// Flip the wall flag at `p`. The cell loses its weight either way.
    /// When it becomes a wall its distance goes back to infinity, dropping a
    /// weighted cell's resting distance, and it loses any source or
    /// destination role.
    pub fn toggle_wall(&mut self, p: Point) -> Result<()> {
        let i = self.checked_idx(p)?;
        let cell = &mut self.cells[i];
        cell.weighted = false;
        cell.wall = !cell.wall;
        if cell.wall {
            cell.distance = f64::INFINITY;
            if self.source == Some(p) {
                debug!("wall at {p} replaces the source");
                self.source = None;
            }
            if self.destination == Some(p) {
                debug!("wall at {p} replaces the destination");
                self.destination = None;
            }
        }
        Ok(())
    }

    /// Flip the weight flag at `p`. The cell stops being a wall either way.
    pub fn toggle_weight(&mut self, p: Point) -> Result<()> {
        let i = self.checked_idx(p)?;
        let cell = &mut self.cells[i];
        cell.wall = false;
        cell.weighted = !cell.weighted;
        cell.distance = cell.resting_distance();
        Ok(())
    }

    /// Clear search-transient state (visited, previous, distance) while
    /// keeping walls, weights, source and destination.
    pub fn reset(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.clear_search_state();
        }
        self.visits = 0;
    }

    /// Return to a blank grid: no source, destination, walls or weights.
    /// Observers stay registered.
    pub fn clear(&mut self) {
        self.source = None;
        self.destination = None;
        for cell in self.cells.iter_mut() {
            cell.visited = false;
            cell.previous = None;
            cell.wall = false;
            cell.weighted = false;
            cell.distance = f64::INFINITY;
        }
        self.visits = 0;
    }

    /// Remove every weight. Walls and visited flags are left alone.
    pub fn clear_weights(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.distance = f64::INFINITY;
            cell.weighted = false;
        }
    }

    // -----------------------------------------------------------------------
    // Observers
    // -----------------------------------------------------------------------

    /// Subscribe to visitation events. See [`Observers`].
    pub fn register_observer<F>(&mut self, f: F) -> ObserverId
    where
        F: FnMut(Point) + Send + 'static,
    {
        self.observers.register(f)
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    pub(crate) fn notify(&mut self, p: Point) {
        self.visits += 1;
        self.observers.notify(p);
    }

    // -----------------------------------------------------------------------
    // Neighbours and costs
    // -----------------------------------------------------------------------

    /// The cell one step from `p` towards `dir`, or `None` past the edge.
    /// Walls are not filtered.
    pub fn neighbor(&self, p: Point, dir: Direction) -> Option<Point> {
        if !self.contains(p) {
            return None;
        }
        let n = p.step(dir);
        self.contains(n).then_some(n)
    }

    /// Append the non-wall neighbours of `p` into `buf`, in
    /// [`Direction::SEARCH_ORDER`]. The caller clears `buf` before calling.
    pub fn walkable_neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for dir in Direction::SEARCH_ORDER {
            if let Some(n) = self.neighbor(p, dir) {
                if !self.cells[self.point_idx(n)].wall {
                    buf.push(n);
                }
            }
        }
    }

    /// Cost of entering `p`. Out-of-range points cost nothing.
    pub fn cost(&self, p: Point) -> f64 {
        self.cell(p).map_or(0.0, Cell::cost)
    }

    // -----------------------------------------------------------------------
    // Crate internals
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        self.contains(p).then(|| self.point_idx(p))
    }

    #[inline]
    fn point_idx(&self, p: Point) -> usize {
        p.y as usize * self.width + p.x as usize
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        Point::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    #[inline]
    pub(crate) fn at(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    #[inline]
    pub(crate) fn at_mut(&mut self, idx: usize) -> &mut Cell {
        &mut self.cells[idx]
    }

    fn checked_idx(&self, p: Point) -> Result<usize> {
        self.idx(p).ok_or(Error::OutOfBounds {
            pos: p,
            rows: self.rows(),
            columns: self.columns(),
        })
    }

    fn walkable(&self, p: Point) -> Result<()> {
        let i = self.checked_idx(p)?;
        if self.cells[i].wall {
            return Err(Error::Blocked(p));
        }
        Ok(())
    }

    /// Source and destination indices, or `InvalidState` if either is unset.
    pub(crate) fn endpoints(&self) -> Result<(usize, usize)> {
        let src = self
            .source
            .ok_or(Error::InvalidState { missing: "source" })?;
        let dst = self
            .destination
            .ok_or(Error::InvalidState {
                missing: "destination",
            })?;
        Ok((self.point_idx(src), self.point_idx(dst)))
    }

    /// Follow `previous` links from `dst` back to `src`.
    ///
    /// The result runs from the destination towards the source and excludes
    /// the source itself. Fails with `NoPathFound` when the destination was
    /// never linked.
    pub(crate) fn trace_path(&self, src: usize, dst: usize) -> Result<Vec<Point>> {
        let from = self.point(src);
        let to = self.point(dst);
        let mut path = Vec::new();
        let mut cur = to;
        while cur != from {
            // A chain longer than the grid can only come from a broken link.
            if path.len() >= self.cells.len() {
                return Err(Error::NoPathFound { from, to });
            }
            path.push(cur);
            cur = match self.cells[self.point_idx(cur)].previous {
                Some(prev) => prev,
                None => return Err(Error::NoPathFound { from, to }),
            };
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::WEIGHT_COST;
    use std::sync::{Arc, Mutex};

    #[test]
    fn new_grid_is_blank() {
        let g = Grid::new(3, 4);
        assert_eq!((g.rows(), g.columns(), g.len()), (3, 4, 12));
        assert!(g.source().is_none() && g.destination().is_none());
        for c in g.cells() {
            assert!(!c.is_wall() && !c.is_weighted() && !c.is_visited());
            assert_eq!(c.distance(), f64::INFINITY);
            assert!(c.previous().is_none());
        }
    }

    #[test]
    fn cells_are_keyed_by_position() {
        let g = Grid::new(120, 130);
        let p = Point::at(101, 7);
        assert_eq!(g.cell(p).unwrap().pos(), p);
        assert_eq!(g.cell(Point::at(7, 101)).unwrap().pos(), Point::at(7, 101));
        assert!(g.cell(Point::at(120, 0)).is_none());
    }

    #[test]
    fn neighbor_stops_at_edges() {
        let g = Grid::new(3, 3);
        let corner = Point::at(0, 0);
        assert_eq!(g.neighbor(corner, Direction::Left), None);
        assert_eq!(g.neighbor(corner, Direction::Up), None);
        assert_eq!(g.neighbor(corner, Direction::Right), Some(Point::at(0, 1)));
        assert_eq!(g.neighbor(corner, Direction::Down), Some(Point::at(1, 0)));
        let far = Point::at(2, 2);
        assert_eq!(g.neighbor(far, Direction::Right), None);
        assert_eq!(g.neighbor(far, Direction::Down), None);
    }

    #[test]
    fn neighbor_ignores_walls_but_walkable_filters_them() {
        let mut g = Grid::new(3, 3);
        g.toggle_wall(Point::at(1, 0)).unwrap();
        let mid = Point::at(1, 1);
        assert_eq!(g.neighbor(mid, Direction::Left), Some(Point::at(1, 0)));
        let mut buf = Vec::new();
        g.walkable_neighbors(mid, &mut buf);
        assert_eq!(buf, vec![Point::at(0, 1), Point::at(1, 2), Point::at(2, 1)]);
    }

    #[test]
    fn wall_and_weight_are_exclusive() {
        let mut g = Grid::new(2, 2);
        let p = Point::at(0, 1);
        g.toggle_weight(p).unwrap();
        assert!(g.cell(p).unwrap().is_weighted());
        assert_eq!(g.cell(p).unwrap().distance(), WEIGHT_COST);

        g.toggle_wall(p).unwrap();
        let c = g.cell(p).unwrap();
        assert!(c.is_wall() && !c.is_weighted());
        assert_eq!(c.distance(), f64::INFINITY);

        g.toggle_weight(p).unwrap();
        let c = g.cell(p).unwrap();
        assert!(!c.is_wall() && c.is_weighted());
    }

    #[test]
    fn wall_round_trip_drops_weight() {
        let mut g = Grid::new(2, 2);
        let p = Point::at(1, 1);
        g.toggle_weight(p).unwrap();
        g.toggle_wall(p).unwrap();
        g.toggle_wall(p).unwrap();
        let c = g.cell(p).unwrap();
        assert!(!c.is_wall());
        assert!(!c.is_weighted());
    }

    #[test]
    fn toggle_weight_off_restores_infinity() {
        let mut g = Grid::new(2, 2);
        let p = Point::at(0, 0);
        g.toggle_weight(p).unwrap();
        g.toggle_weight(p).unwrap();
        assert_eq!(g.cell(p).unwrap().distance(), f64::INFINITY);
    }

    #[test]
    fn walling_an_endpoint_unsets_it() {
        let mut g = Grid::new(3, 3);
        g.set_source(Point::at(0, 0)).unwrap();
        g.set_destination(Point::at(2, 2)).unwrap();
        g.toggle_wall(Point::at(0, 0)).unwrap();
        g.toggle_wall(Point::at(2, 2)).unwrap();
        assert_eq!(g.source(), None);
        assert_eq!(g.destination(), None);
    }

    #[test]
    fn endpoints_reject_walls_and_bounds() {
        let mut g = Grid::new(3, 3);
        g.toggle_wall(Point::at(1, 1)).unwrap();
        assert_eq!(
            g.set_source(Point::at(1, 1)),
            Err(Error::Blocked(Point::at(1, 1)))
        );
        assert!(matches!(
            g.set_destination(Point::at(3, 0)),
            Err(Error::OutOfBounds { rows: 3, columns: 3, .. })
        ));
    }

    #[test]
    fn mutators_reject_out_of_range() {
        let mut g = Grid::new(2, 2);
        assert!(matches!(
            g.toggle_wall(Point::at(-1, 0)),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            g.toggle_weight(Point::at(0, 2)),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn reset_keeps_layout() {
        let mut g = Grid::new(3, 3);
        g.set_source(Point::at(0, 0)).unwrap();
        g.set_destination(Point::at(2, 2)).unwrap();
        g.toggle_wall(Point::at(1, 1)).unwrap();
        g.toggle_weight(Point::at(0, 1)).unwrap();
        let i = g.idx(Point::at(2, 0)).unwrap();
        g.at_mut(i).visited = true;
        g.at_mut(i).previous = Some(Point::at(1, 0));
        g.at_mut(i).distance = 2.0;

        g.reset();
        let c = g.cell(Point::at(2, 0)).unwrap();
        assert!(!c.is_visited() && c.previous().is_none());
        assert_eq!(c.distance(), f64::INFINITY);
        assert_eq!(g.cell(Point::at(0, 1)).unwrap().distance(), WEIGHT_COST);
        assert!(g.cell(Point::at(1, 1)).unwrap().is_wall());
        assert_eq!(g.source(), Some(Point::at(0, 0)));
        assert_eq!(g.destination(), Some(Point::at(2, 2)));
    }

    #[test]
    fn clear_returns_to_blank() {
        let mut g = Grid::new(3, 3);
        g.set_source(Point::at(0, 0)).unwrap();
        g.set_destination(Point::at(2, 2)).unwrap();
        g.toggle_wall(Point::at(1, 1)).unwrap();
        g.toggle_weight(Point::at(0, 1)).unwrap();
        g.clear();
        assert!(g.source().is_none() && g.destination().is_none());
        assert!(g.cells().all(|c| !c.is_wall() && !c.is_weighted()));
        assert!(g.cells().all(|c| c.distance() == f64::INFINITY));
    }

    #[test]
    fn clear_weights_leaves_walls_and_visits() {
        let mut g = Grid::new(2, 2);
        g.toggle_wall(Point::at(0, 0)).unwrap();
        g.toggle_weight(Point::at(1, 1)).unwrap();
        let i = g.idx(Point::at(0, 1)).unwrap();
        g.at_mut(i).visited = true;
        g.clear_weights();
        assert!(g.cell(Point::at(0, 0)).unwrap().is_wall());
        assert!(!g.cell(Point::at(1, 1)).unwrap().is_weighted());
        assert!(g.cell(Point::at(0, 1)).unwrap().is_visited());
    }

    #[test]
    fn notify_counts_and_forwards() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut g = Grid::new(2, 2);
        let s = Arc::clone(&seen);
        g.register_observer(move |p| s.lock().unwrap().push(p));
        g.notify(Point::at(1, 0));
        g.notify(Point::at(0, 1));
        assert_eq!(g.visit_count(), 2);
        assert_eq!(*seen.lock().unwrap(), vec![Point::at(1, 0), Point::at(0, 1)]);
        g.reset();
        assert_eq!(g.visit_count(), 0);
    }

    #[test]
    fn endpoints_require_both() {
        let mut g = Grid::new(2, 2);
        assert_eq!(g.endpoints(), Err(Error::InvalidState { missing: "source" }));
        g.set_source(Point::at(0, 0)).unwrap();
        assert_eq!(
            g.endpoints(),
            Err(Error::InvalidState {
                missing: "destination"
            })
        );
    }

    #[test]
    fn trace_path_excludes_source() {
        let mut g = Grid::new(1, 3);
        let i1 = g.idx(Point::at(0, 1)).unwrap();
        let i2 = g.idx(Point::at(0, 2)).unwrap();
        g.at_mut(i1).previous = Some(Point::at(0, 0));
        g.at_mut(i2).previous = Some(Point::at(0, 1));
        let path = g.trace_path(0, i2).unwrap();
        assert_eq!(path, vec![Point::at(0, 2), Point::at(0, 1)]);
        assert_eq!(g.trace_path(0, 0).unwrap(), Vec::<Point>::new());
    }

    #[test]
    fn trace_path_reports_unlinked_destination() {
        let g = Grid::new(1, 3);
        assert_eq!(
            g.trace_path(0, 2),
            Err(Error::NoPathFound {
                from: Point::at(0, 0),
                to: Point::at(0, 2)
            })
        );
    }
}
