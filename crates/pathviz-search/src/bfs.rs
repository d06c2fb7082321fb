use std::collections::VecDeque;

use log::debug;
use pathviz_core::Point;

use crate::error::Result;
use crate::grid::Grid;
use crate::strategy::{Algorithm, SearchStrategy};

/// Breadth-first search. Ignores weights; finds a path with the fewest
/// steps.
///
/// The source is marked visited before it is queued. Each newly discovered
/// neighbour is marked visited, linked to the cell that discovered it,
/// queued and then reported to the observers. The search stops when the
/// destination is dequeued or the queue runs dry.
#[derive(Debug)]
pub struct Bfs {
    grid: Grid,
    nbuf: Vec<Point>,
}

impl Bfs {
    /// A BFS over a fresh `rows` × `columns` grid.
    pub fn new(rows: i32, columns: i32) -> Self {
        Self::with_grid(Grid::new(rows, columns))
    }

    pub fn with_grid(grid: Grid) -> Self {
        Self {
            grid,
            nbuf: Vec::with_capacity(4),
        }
    }
}

impl SearchStrategy for Bfs {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bfs
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

        let mut queue: VecDeque<usize> = VecDeque::new();
        self.grid.at_mut(src).visited = true;
        queue.push_back(src);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(ci) = queue.pop_front() {
            if ci == dst {
                break;
            }
            let cp = self.grid.point(ci);

            nbuf.clear();
            self.grid.walkable_neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.grid.idx(np) else {
                    continue;
                };
                let n = self.grid.at_mut(ni);
                if n.visited {
                    continue;
                }
                n.visited = true;
                n.previous = Some(cp);
                queue.push_back(ni);
                self.grid.notify(np);
            }
        }

        self.nbuf = nbuf;
        debug!("bfs: {} cells discovered", self.grid.visit_count());
        self.grid.trace_path(src, dst)
    }
}
