use log::{debug, trace};
use pathviz_core::Point;

use crate::error::Result;
use crate::grid::Grid;
use crate::strategy::{Algorithm, SearchStrategy};

/// Bellman-Ford relaxation over cell weights.
///
/// Runs `len - 1` sweeps over the grid in row-major order. In each sweep
/// every reachable open cell tries to improve the distance of its walkable
/// neighbours; every improvement marks the neighbour visited and is reported
/// to the observers, so a cell may be reported more than once.
///
/// With `early_exit` the sweeps stop after the first one that changes
/// nothing. The result is the same either way.
#[derive(Debug)]
pub struct BellmanFord {
    grid: Grid,
    early_exit: bool,
    sweeps: usize,
    nbuf: Vec<Point>,
}

impl BellmanFord {
    /// A Bellman-Ford search over a fresh `rows` × `columns` grid running
    /// every sweep.
    pub fn new(rows: i32, columns: i32) -> Self {
        Self::with_grid(Grid::new(rows, columns), false)
    }

    pub fn with_grid(grid: Grid, early_exit: bool) -> Self {
        Self {
            grid,
            early_exit,
            sweeps: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    pub fn early_exit(&self) -> bool {
        self.early_exit
    }

    pub fn set_early_exit(&mut self, early_exit: bool) {
        self.early_exit = early_exit;
    }

    /// Number of sweeps the last search ran.
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    /// One row-major pass. Returns whether any distance improved.
    fn sweep(&mut self, nbuf: &mut Vec<Point>) -> bool {
        let mut changed = false;
        for ci in 0..self.grid.len() {
            let cell = self.grid.at(ci);
            if cell.wall || !cell.distance.is_finite() {
                continue;
            }
            let current = cell.distance;
            let cp = self.grid.point(ci);

            nbuf.clear();
            self.grid.walkable_neighbors(cp, nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.grid.idx(np) else {
                    continue;
                };
                let n = self.grid.at_mut(ni);
                let candidate = current + n.cost();
                if candidate < n.distance {
                    n.distance = candidate;
                    n.previous = Some(cp);
                    n.visited = true;
                    self.grid.notify(np);
                    changed = true;
                }
            }
        }
        changed
    }
}

impl SearchStrategy for BellmanFord {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BellmanFord
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    fn find_path(&mut self) -> Result<Vec<Point>> {
        let (src, dst) = self.grid.endpoints()?;
        self.grid.reset();
        for i in 0..self.grid.len() {
            self.grid.at_mut(i).distance = f64::INFINITY;
        }
        self.grid.at_mut(src).distance = 0.0;

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let rounds = self.grid.len().saturating_sub(1);
        self.sweeps = 0;

        for round in 0..rounds {
            let changed = self.sweep(&mut nbuf);
            self.sweeps += 1;
            trace!("bellman-ford sweep {round}: changed={changed}");
            if self.early_exit && !changed {
                break;
            }
        }

        self.nbuf = nbuf;
        debug!(
            "bellman-ford: {} sweeps, {} relaxations",
            self.sweeps,
            self.grid.visit_count()
        );
        self.grid.trace_path(src, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Frontier;
    use crate::dijkstra::Dijkstra;
    use crate::distance::path_cost;
    use crate::error::Error;
    use crate::testutil::{assert_walk, load, random_layout, record};
    use rand::SeedableRng;

    fn bellman_ford(rows: i32, columns: i32, early_exit: bool, text: &str) -> BellmanFord {
        let mut bf = BellmanFord::with_grid(Grid::new(rows, columns), early_exit);
        load(&mut bf, text);
        bf
    }

    #[test]
    fn later_sweeps_improve_earlier_guesses() {
        let mut bf = bellman_ford(2, 3, false, "D~S\n...");
        let seen = record(bf.grid_mut());
        let path = bf.find_path().unwrap();
        assert_eq!(
            path,
            vec![
                Point::at(0, 0),
                Point::at(1, 0),
                Point::at(1, 1),
                Point::at(1, 2)
            ]
        );
        assert_eq!(path_cost(bf.grid(), &path), 4.0);
        // (0,0) is first reached over the weight, then again around it.
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                Point::at(0, 1),
                Point::at(1, 2),
                Point::at(1, 1),
                Point::at(0, 0),
                Point::at(1, 0),
                Point::at(0, 0)
            ]
        );
        assert_eq!(bf.sweeps(), 5);
    }

    #[test]
    fn early_exit_gives_the_same_answer() {
        let text = "D~S\n...";
        let mut full = bellman_ford(2, 3, false, text);
        let mut quick = bellman_ford(2, 3, true, text);
        let seen_full = record(full.grid_mut());
        let seen_quick = record(quick.grid_mut());
        assert_eq!(full.find_path(), quick.find_path());
        assert_eq!(*seen_full.lock().unwrap(), *seen_quick.lock().unwrap());
        // Three sweeps improve something, the fourth confirms.
        assert_eq!(quick.sweeps(), 4);
    }

    #[test]
    fn costs_match_dijkstra_on_random_grids() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(23);
        for _ in 0..25 {
            let text = random_layout(&mut rng, 7, 9);
            let mut bf = bellman_ford(7, 9, false, &text);
            let mut dj = Dijkstra::with_grid(Grid::new(7, 9), Frontier::BinaryHeap);
            load(&mut dj, &text);

            match (bf.find_path(), dj.find_path()) {
                (Ok(a), Ok(b)) => {
                    assert_walk(bf.grid(), &a);
                    assert_eq!(
                        path_cost(bf.grid(), &a),
                        path_cost(dj.grid(), &b),
                        "grid:\n{text}"
                    );
                }
                (Err(a), Err(b)) => {
                    assert!(matches!(a, Error::NoPathFound { .. }));
                    assert_eq!(a, b);
                }
                (a, b) => panic!("disagreement {a:?} vs {b:?} on grid:\n{text}"),
            }
        }
    }

    #[test]
    fn single_cell_grid_runs_no_sweeps() {
        let mut bf = BellmanFord::new(1, 1);
        bf.grid_mut().set_source(Point::at(0, 0)).unwrap();
        bf.grid_mut().set_destination(Point::at(0, 0)).unwrap();
        assert_eq!(bf.find_path().unwrap(), Vec::<Point>::new());
        assert_eq!(bf.sweeps(), 0);
    }

    #[test]
    fn walls_are_never_relaxed() {
        let mut bf = bellman_ford(3, 3, false, "S#.\n.#.\n.#D");
        let seen = record(bf.grid_mut());
        assert!(matches!(bf.find_path(), Err(Error::NoPathFound { .. })));
        assert!(seen.lock().unwrap().iter().all(|p| p.column() == 0));
        assert!(!bf.grid().cell(Point::at(0, 1)).unwrap().is_visited());
    }

    #[test]
    fn missing_source_is_invalid_state() {
        let mut bf = BellmanFord::new(2, 2);
        assert_eq!(
            bf.find_path(),
            Err(Error::InvalidState { missing: "source" })
        );
    }
}
