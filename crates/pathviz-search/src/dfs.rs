use log::debug;
use pathviz_core::Point;

use crate::config::DfsLinks;
use crate::error::Result;
use crate::grid::Grid;
use crate::strategy::{Algorithm, SearchStrategy};

/// Depth-first search. Ignores weights; finds *a* path, not a short one.
///
/// Neighbours are pushed in search order without checking whether they were
/// visited already; duplicates are discarded when popped. A popped cell is
/// marked visited, reported to the observers and then linked according to
/// [`DfsLinks`]. The search stops once the destination is popped.
#[derive(Debug)]
pub struct Dfs {
    grid: Grid,
    links: DfsLinks,
    nbuf: Vec<Point>,
}

impl Dfs {
    /// A DFS over a fresh `rows` × `columns` grid with discovery-tree links.
    pub fn new(rows: i32, columns: i32) -> Self {
        Self::with_grid(Grid::new(rows, columns), DfsLinks::default())
    }

    pub fn with_grid(grid: Grid, links: DfsLinks) -> Self {
        Self {
            grid,
            links,
            nbuf: Vec::with_capacity(4),
        }
    }

    pub fn links(&self) -> DfsLinks {
        self.links
    }

    pub fn set_links(&mut self, links: DfsLinks) {
        self.links = links;
    }
}

impl SearchStrategy for Dfs {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dfs
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

        // Each entry remembers the cell whose expansion pushed it.
        let mut stack: Vec<(usize, Option<Point>)> = vec![(src, None)];
        let mut last_visited: Option<Point> = None;
        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some((ci, pusher)) = stack.pop() {
            if self.grid.at(ci).visited {
                continue;
            }
            let cp = self.grid.point(ci);
            self.grid.at_mut(ci).visited = true;
            self.grid.notify(cp);

            let link = match self.links {
                DfsLinks::DiscoveryTree => pusher,
                DfsLinks::LinearChain => last_visited,
            };
            if link.is_some() {
                self.grid.at_mut(ci).previous = link;
            }
            last_visited = Some(cp);

            if ci == dst {
                break;
            }

            nbuf.clear();
            self.grid.walkable_neighbors(cp, &mut nbuf);
            for &np in nbuf.iter() {
                if let Some(ni) = self.grid.idx(np) {
                    stack.push((ni, Some(cp)));
                }
            }
        }

        self.nbuf = nbuf;
        debug!(
            "dfs ({:?}): {} cells visited",
            self.links,
            self.grid.visit_count()
        );
        self.grid.trace_path(src, dst)
    }
}
