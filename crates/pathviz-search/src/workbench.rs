//! One grid per algorithm, edited in lockstep.
//!
//! A [`Workbench`] owns a BFS, a DFS, a Dijkstra and a Bellman-Ford search
//! over identically sized grids. Every edit is applied to all four, so any
//! of them can be run against the same layout and the results compared.

use std::sync::Arc;

use log::debug;
use pathviz_core::Point;

use crate::config::SearchConfig;
use crate::distance::path_cost;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::observer::ObserverId;
use crate::strategy::{Algorithm, SearchStrategy};
use crate::worker::{SearchEvent, SearchTask};

/// Outcome of a successful search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchReport {
    pub algorithm: Algorithm,
    /// Destination first, source excluded.
    pub path: Vec<Point>,
    /// Sum of the entry costs along `path`.
    pub cost: f64,
    /// Observer notifications emitted by the search.
    pub visits: usize,
}

impl SearchReport {
    /// The path from the cell after the source up to the destination.
    pub fn route(&self) -> impl DoubleEndedIterator<Item = Point> + '_ {
        self.path.iter().rev().copied()
    }

    /// Number of steps from source to destination.
    pub fn steps(&self) -> usize {
        self.path.len()
    }
}

/// Handle returned by [`Workbench::register_observer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WorkbenchObserver(usize);

/// All four strategies over grids kept in sync.
pub struct Workbench {
    rows: i32,
    columns: i32,
    config: SearchConfig,
    /// Indexed like `Algorithm::ALL`.
    strategies: Vec<Box<dyn SearchStrategy>>,
    /// Per-strategy ids of each workbench observer; `None` once removed.
    observers: Vec<Option<Vec<ObserverId>>>,
}

impl std::fmt::Debug for Workbench {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbench")
            .field("rows", &self.rows)
            .field("columns", &self.columns)
            .field("config", &self.config)
            .field("observers", &self.observers.iter().flatten().count())
            .finish()
    }
}

fn slot(alg: Algorithm) -> usize {
    match alg {
        Algorithm::Bfs => 0,
        Algorithm::Dfs => 1,
        Algorithm::Dijkstra => 2,
        Algorithm::BellmanFord => 3,
    }
}

impl Workbench {
    pub fn new(rows: i32, columns: i32, config: SearchConfig) -> Self {
        let strategies = Algorithm::ALL
            .iter()
            .map(|alg| alg.build(rows, columns, &config))
            .collect();
        Self {
            rows: rows.max(0),
            columns: columns.max(0),
            config,
            strategies,
            observers: Vec::new(),
        }
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn strategy(&self, alg: Algorithm) -> &dyn SearchStrategy {
        self.strategies[slot(alg)].as_ref()
    }

    /// The grid searched by `alg`, including the state of its last run.
    pub fn grid(&self, alg: Algorithm) -> &Grid {
        self.strategy(alg).grid()
    }

    // -----------------------------------------------------------------------
    // Lockstep edits
    // -----------------------------------------------------------------------

    /// Apply `f` to every grid. The grids are identical, so a rejected edit
    /// is rejected by the first one before anything changes.
    fn each(&mut self, mut f: impl FnMut(&mut Grid) -> Result<()>) -> Result<()> {
        for s in self.strategies.iter_mut() {
            f(s.grid_mut())?;
        }
        Ok(())
    }

    pub fn set_source(&mut self, p: Point) -> Result<()> {
        self.each(|g| g.set_source(p))
    }

    pub fn set_destination(&mut self, p: Point) -> Result<()> {
        self.each(|g| g.set_destination(p))
    }

    pub fn toggle_wall(&mut self, p: Point) -> Result<()> {
        self.each(|g| g.toggle_wall(p))
    }

    /// Weights are applied to every grid; BFS and DFS ignore them.
    pub fn toggle_weight(&mut self, p: Point) -> Result<()> {
        self.each(|g| g.toggle_weight(p))
    }

    pub fn reset(&mut self) {
        for s in self.strategies.iter_mut() {
            s.grid_mut().reset();
        }
    }

    pub fn clear(&mut self) {
        for s in self.strategies.iter_mut() {
            s.grid_mut().clear();
        }
    }

    pub fn clear_weights(&mut self) {
        for s in self.strategies.iter_mut() {
            s.grid_mut().clear_weights();
        }
    }

    // -----------------------------------------------------------------------
    // Observers
    // -----------------------------------------------------------------------

    /// Subscribe `f` to the visits of all four searches.
    pub fn register_observer<F>(&mut self, f: F) -> WorkbenchObserver
    where
        F: Fn(Algorithm, Point) + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        let ids = self
            .strategies
            .iter_mut()
            .map(|s| {
                let alg = s.algorithm();
                let f = Arc::clone(&f);
                s.grid_mut().register_observer(move |p| f(alg, p))
            })
            .collect();
        self.observers.push(Some(ids));
        WorkbenchObserver(self.observers.len() - 1)
    }

    /// Detach an observer. Returns `false` if it was already removed.
    pub fn remove_observer(&mut self, handle: WorkbenchObserver) -> bool {
        let Some(ids) = self.observers.get_mut(handle.0).and_then(Option::take) else {
            return false;
        };
        for (s, id) in self.strategies.iter_mut().zip(ids) {
            s.grid_mut().remove_observer(id);
        }
        true
    }

    // -----------------------------------------------------------------------
    // Searching
    // -----------------------------------------------------------------------

    /// Run `alg` on the calling thread.
    pub fn run(&mut self, alg: Algorithm) -> Result<SearchReport> {
        let s = &mut self.strategies[slot(alg)];
        let path = s.find_path()?;
        let report = Self::report(s.as_ref(), path);
        debug!(
            "{alg}: {} steps, cost {}, {} visits",
            report.steps(),
            report.cost,
            report.visits
        );
        Ok(report)
    }

    /// Run `alg` on a worker thread, handing each visit to `on_visit` on the
    /// calling thread as it arrives.
    ///
    /// If an observer panics during the search the result is
    /// `Error::WorkerPanicked(alg)` and the strategy is put back with its
    /// grid as the search left it, so later edits still reach all four grids.
    pub fn run_in_background(
        &mut self,
        alg: Algorithm,
        mut on_visit: impl FnMut(Point),
    ) -> Result<SearchReport> {
        let idx = slot(alg);
        let placeholder = alg.build(0, 0, &self.config);
        let strategy = std::mem::replace(&mut self.strategies[idx], placeholder);

        let task = SearchTask::spawn(strategy);
        let mut outcome = None;
        for ev in task.events() {
            match ev {
                SearchEvent::Visited(p) => on_visit(p),
                SearchEvent::Finished(result) => outcome = Some(result),
            }
        }
        self.strategies[idx] = task.join()?;

        let Some(result) = outcome else {
            return Err(Error::WorkerPanicked(alg));
        };
        let path = result?;
        Ok(Self::report(self.strategies[idx].as_ref(), path))
    }

    /// Run every algorithm in turn.
    pub fn run_all(&mut self) -> Vec<(Algorithm, Result<SearchReport>)> {
        Algorithm::ALL
            .into_iter()
            .map(|alg| (alg, self.run(alg)))
            .collect()
    }

    fn report(s: &dyn SearchStrategy, path: Vec<Point>) -> SearchReport {
        SearchReport {
            algorithm: s.algorithm(),
            cost: path_cost(s.grid(), &path),
            visits: s.grid().visit_count(),
            path,
        }
    }
}
