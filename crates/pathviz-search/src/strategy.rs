//! The [`SearchStrategy`] contract and the [`Algorithm`] tag used to pick
//! one of its four implementations.

use std::fmt;
use std::str::FromStr;

use pathviz_core::Point;

use crate::bellman_ford::BellmanFord;
use crate::bfs::Bfs;
use crate::config::SearchConfig;
use crate::dfs::Dfs;
use crate::dijkstra::Dijkstra;
use crate::error::Result;
use crate::grid::Grid;

/// A path search over a grid the strategy owns.
///
/// `find_path` clears transient state, runs the search and returns the path
/// from the destination back towards the source: the destination comes
/// first and the source is not included. While it runs, the grid's
/// observers are notified once per cell visit or relaxation, in traversal
/// order, before the search moves on.
///
/// Fails with [`Error::InvalidState`](crate::Error::InvalidState) when the
/// source or destination is unset and with
/// [`Error::NoPathFound`](crate::Error::NoPathFound) when the destination
/// cannot be reached.
pub trait SearchStrategy: Send {
    /// Which algorithm this is.
    fn algorithm(&self) -> Algorithm;

    fn grid(&self) -> &Grid;

    fn grid_mut(&mut self) -> &mut Grid;

    fn find_path(&mut self) -> Result<Vec<Point>>;
}

/// The available search algorithms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
    BellmanFord,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::BellmanFord,
    ];

    /// Whether the algorithm takes cell weights into account.
    pub fn is_weighted(self) -> bool {
        matches!(self, Algorithm::Dijkstra | Algorithm::BellmanFord)
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::BellmanFord => "bellman-ford",
        }
    }

    /// Build a strategy of this kind on a fresh `rows` × `columns` grid.
    pub fn build(self, rows: i32, columns: i32, config: &SearchConfig) -> Box<dyn SearchStrategy> {
        let grid = Grid::new(rows, columns);
        match self {
            Algorithm::Bfs => Box::new(Bfs::with_grid(grid)),
            Algorithm::Dfs => Box::new(Dfs::with_grid(grid, config.dfs_links)),
            Algorithm::Dijkstra => Box::new(Dijkstra::with_grid(grid, config.dijkstra_frontier)),
            Algorithm::BellmanFord => Box::new(BellmanFord::with_grid(
                grid,
                config.bellman_ford_early_exit,
            )),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned by [`Algorithm::from_str`] for an unknown name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm \u{201c}{}\u{201d} (expected bfs, dfs, dijkstra or bellman-ford)",
            self.0
        )
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "bellman-ford" | "bellmanford" | "bellman_ford" => Ok(Algorithm::BellmanFord),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}
