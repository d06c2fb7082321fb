//! Observable shortest-path search on rectangular grids.
//!
//! A [`Grid`] holds open, wall and weighted cells plus a source and a
//! destination. Four [`SearchStrategy`] implementations walk it:
//!
//! - [`Bfs`] and [`Dfs`] ignore weights.
//! - [`Dijkstra`] and [`BellmanFord`] charge [`WEIGHT_COST`] for entering a
//!   weighted cell and [`STEP_COST`] otherwise.
//!
//! Every strategy reports each cell it visits or relaxes to the grid's
//! observers as it goes, which is what a visualiser animates. A
//! [`Workbench`] keeps one grid per algorithm in sync, and a [`SearchTask`]
//! runs a search on a background thread.
//!
//! ```
//! use pathviz_core::Point;
//! use pathviz_search::{Layout, SearchConfig, Workbench, Algorithm};
//!
//! let layout = Layout::parse("S~D\n...").unwrap();
//! let mut bench = Workbench::new(layout.rows(), layout.columns(), SearchConfig::default());
//! layout.apply_to(&mut bench).unwrap();
//!
//! let report = bench.run(Algorithm::Dijkstra).unwrap();
//! assert_eq!(report.cost, 4.0);
//! assert_eq!(report.path.first(), Some(&Point::at(0, 2)));
//! ```

pub mod bellman_ford;
pub mod bfs;
pub mod cell;
pub mod config;
pub mod dfs;
pub mod dijkstra;
pub mod distance;
pub mod error;
pub mod grid;
pub mod layout;
pub mod observer;
pub mod strategy;
pub mod workbench;
pub mod worker;

#[cfg(test)]
mod testutil;

pub use bellman_ford::BellmanFord;
pub use bfs::Bfs;
pub use cell::{Cell, STEP_COST, WEIGHT_COST};
pub use config::{DfsLinks, Frontier, SearchConfig};
pub use dfs::Dfs;
pub use dijkstra::Dijkstra;
pub use distance::{manhattan, path_cost};
pub use error::{Error, Result};
pub use grid::Grid;
pub use layout::{Layout, Tile, render};
pub use observer::{ObserverId, Observers};
pub use strategy::{Algorithm, SearchStrategy, UnknownAlgorithm};
pub use workbench::{SearchReport, Workbench, WorkbenchObserver};
pub use worker::{SearchEvent, SearchTask};
