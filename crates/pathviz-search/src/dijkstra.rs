use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;
use pathviz_core::Point;

use crate::config::Frontier;
use crate::error::Result;
use crate::grid::Grid;
use crate::strategy::{Algorithm, SearchStrategy};

/// Dijkstra's shortest-path search over cell weights.
///
/// Every distance starts at infinity except the source's, which is zero.
/// The unfinalised cell with the smallest distance is finalised next (ties
/// go to the lowest row-major position); the search stops when that cell is
/// the destination or when nothing reachable is left. Each improved
/// neighbour distance is reported to the observers.
///
/// Finalised cells are marked visited for display purposes.
#[derive(Debug)]
pub struct Dijkstra {
    grid: Grid,
    frontier: Frontier,
    finalized: Vec<bool>,
    nbuf: Vec<Point>,
}

/// Heap entry ordered so that `BinaryHeap` pops the smallest distance,
/// then the smallest index.
#[derive(Clone, Copy, Debug)]
struct NodeRef {
    idx: usize,
    dist: f64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

impl Dijkstra {
    /// A Dijkstra search over a fresh `rows` × `columns` grid using the
    /// linear-scan frontier.
    pub fn new(rows: i32, columns: i32) -> Self {
        Self::with_grid(Grid::new(rows, columns), Frontier::default())
    }

    pub fn with_grid(grid: Grid, frontier: Frontier) -> Self {
        Self {
            finalized: vec![false; grid.len()],
            grid,
            frontier,
            nbuf: Vec::with_capacity(4),
        }
    }

    pub fn frontier(&self) -> Frontier {
        self.frontier
    }

    pub fn set_frontier(&mut self, frontier: Frontier) {
        self.frontier = frontier;
    }

    /// Smallest-distance unfinalised cell by exhaustive scan.
    fn scan_min(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, done) in self.finalized.iter().enumerate() {
            if *done {
                continue;
            }
            let d = self.grid.at(i).distance;
            if d.is_finite() && best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Smallest-distance unfinalised cell from the heap, skipping entries
    /// that were finalised or improved after being pushed.
    fn pop_min(&self, open: &mut BinaryHeap<NodeRef>) -> Option<usize> {
        while let Some(node) = open.pop() {
            if self.finalized[node.idx] || node.dist > self.grid.at(node.idx).distance {
                continue;
            }
            return Some(node.idx);
        }
        None
    }
}

impl SearchStrategy for Dijkstra {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
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

        self.finalized.clear();
        self.finalized.resize(self.grid.len(), false);

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        if self.frontier == Frontier::BinaryHeap {
            open.push(NodeRef { idx: src, dist: 0.0 });
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut settled = 0usize;

        loop {
            let next = match self.frontier {
                Frontier::LinearScan => self.scan_min(),
                Frontier::BinaryHeap => self.pop_min(&mut open),
            };
            let Some(ci) = next else {
                break;
            };

            self.finalized[ci] = true;
            self.grid.at_mut(ci).visited = true;
            settled += 1;
            if ci == dst {
                break;
            }

            let cp = self.grid.point(ci);
            let current = self.grid.at(ci).distance;

            nbuf.clear();
            self.grid.walkable_neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.grid.idx(np) else {
                    continue;
                };
                if self.finalized[ni] {
                    continue;
                }
                let n = self.grid.at_mut(ni);
                let candidate = current + n.cost();
                if candidate < n.distance {
                    n.distance = candidate;
                    n.previous = Some(cp);
                    if self.frontier == Frontier::BinaryHeap {
                        open.push(NodeRef {
                            idx: ni,
                            dist: candidate,
                        });
                    }
                    self.grid.notify(np);
                }
            }
        }

        self.nbuf = nbuf;
        debug!(
            "dijkstra ({:?}): {} cells settled, {} relaxations",
            self.frontier,
            settled,
            self.grid.visit_count()
        );
        self.grid.trace_path(src, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::WEIGHT_COST;
    use crate::distance::path_cost;
    use crate::error::Error;
    use crate::testutil::{assert_walk, load, random_layout, record};
    use rand::SeedableRng;

    const FRONTIERS: [Frontier; 2] = [Frontier::LinearScan, Frontier::BinaryHeap];

    fn dijkstra(rows: i32, columns: i32, frontier: Frontier, text: &str) -> Dijkstra {
        let mut d = Dijkstra::with_grid(Grid::new(rows, columns), frontier);
        load(&mut d, text);
        d
    }

    #[test]
    fn routes_around_a_weight() {
        for f in FRONTIERS {
            let mut d = dijkstra(2, 3, f, "S~D\n...");
            let path = d.find_path().unwrap();
            assert_eq!(
                path,
                vec![
                    Point::at(0, 2),
                    Point::at(1, 2),
                    Point::at(1, 1),
                    Point::at(1, 0)
                ]
            );
            assert_eq!(path_cost(d.grid(), &path), 4.0);
        }
    }

    #[test]
    fn crosses_an_unavoidable_weight() {
        for f in FRONTIERS {
            let mut d = dijkstra(1, 3, f, "S~D");
            let seen = record(d.grid_mut());
            let path = d.find_path().unwrap();
            assert_eq!(path, vec![Point::at(0, 2), Point::at(0, 1)]);
            assert_eq!(d.grid().cell(Point::at(0, 2)).unwrap().distance(), WEIGHT_COST + 1.0);
            assert_eq!(*seen.lock().unwrap(), vec![Point::at(0, 1), Point::at(0, 2)]);
        }
    }

    #[test]
    fn prefers_weight_over_long_detour() {
        let text = "
            S~D
            .#.
            .#.
            .#.
            .#.
            .#.
            .#.
            .#.
            ...
        ";
        // 15 + 1 across the top against 18 steps around the wall.
        let mut d = dijkstra(9, 3, Frontier::LinearScan, text);
        let path = d.find_path().unwrap();
        assert_eq!(path, vec![Point::at(0, 2), Point::at(0, 1)]);
    }

    #[test]
    fn ties_go_to_lowest_row_major_cell() {
        for f in FRONTIERS {
            let mut d = dijkstra(2, 2, f, "S.\n.D");
            let seen = record(d.grid_mut());
            let path = d.find_path().unwrap();
            assert_eq!(path, vec![Point::at(1, 1), Point::at(0, 1)]);
            assert_eq!(
                *seen.lock().unwrap(),
                vec![Point::at(0, 1), Point::at(1, 0), Point::at(1, 1)]
            );
        }
    }

    #[test]
    fn frontiers_agree_on_random_grids() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let text = random_layout(&mut rng, 8, 10);

            let mut outcomes = Vec::new();
            for f in FRONTIERS {
                let mut d = dijkstra(8, 10, f, &text);
                let seen = record(d.grid_mut());
                let path = d.find_path();
                outcomes.push((path, seen.lock().unwrap().clone()));
            }
            assert_eq!(outcomes[0], outcomes[1], "grid:\n{text}");
        }
    }

    #[test]
    fn resting_weight_distance_does_not_block() {
        // reset() parks weighted cells at distance 15; the search must not
        // treat that as an already-known route.
        let mut d = dijkstra(1, 2, Frontier::LinearScan, "S~");
        d.grid_mut().set_destination(Point::at(0, 1)).unwrap();
        assert_eq!(d.find_path().unwrap(), vec![Point::at(0, 1)]);
    }

    #[test]
    fn walled_off_destination_has_no_path() {
        for f in FRONTIERS {
            let mut d = dijkstra(3, 3, f, "S.#\n.#.\n#.D");
            assert!(matches!(d.find_path(), Err(Error::NoPathFound { .. })));
        }
    }

    #[test]
    fn finalised_cells_are_marked_visited() {
        let mut d = dijkstra(3, 3, Frontier::LinearScan, "S..\n...\n..D");
        let path = d.find_path().unwrap();
        assert_walk(d.grid(), &path);
        assert!(d.grid().cell(Point::at(0, 0)).unwrap().is_visited());
        assert!(d.grid().cell(Point::at(2, 2)).unwrap().is_visited());
    }

    #[test]
    fn missing_destination_is_invalid_state() {
        let mut d = Dijkstra::new(2, 2);
        d.grid_mut().set_source(Point::at(0, 0)).unwrap();
        assert_eq!(
            d.find_path(),
            Err(Error::InvalidState {
                missing: "destination"
            })
        );
    }
}
