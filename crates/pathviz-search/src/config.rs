//! Tunables that select between behaviour variants of the searches.

/// How depth-first search links each visited cell to a predecessor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DfsLinks {
    /// Link to the neighbour whose expansion pushed the cell. Produces a
    /// simple path.
    #[default]
    DiscoveryTree,
    /// Link to whichever cell was visited immediately before. Reproduces the
    /// historical behaviour; the path may wander through dead ends.
    LinearChain,
}

/// How Dijkstra's algorithm picks the next cell to finalise.
///
/// Both variants break distance ties on the lowest row-major position, so
/// they produce identical paths and notifications.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Frontier {
    /// Scan every unfinalised cell, O(V) per step.
    #[default]
    LinearScan,
    /// Lazy-deletion binary heap, O(log V) per step.
    BinaryHeap,
}

/// Search configuration shared by every strategy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub dfs_links: DfsLinks,
    pub dijkstra_frontier: Frontier,
    /// Stop Bellman-Ford after the first sweep that relaxes nothing instead
    /// of always running `|V| - 1` sweeps.
    pub bellman_ford_early_exit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_behaviour() {
        let c = SearchConfig::default();
        assert_eq!(c.dfs_links, DfsLinks::DiscoveryTree);
        assert_eq!(c.dijkstra_frontier, Frontier::LinearScan);
        assert!(!c.bellman_ford_early_exit);
    }
}
