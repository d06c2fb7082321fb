//! Helpers shared by the pathviz command-line demo: grid generation, config
//! loading and report formatting.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;
use pathviz_core::Point;
use pathviz_search::{Layout, SearchConfig, SearchReport, Workbench};
use rand::{Rng, RngExt};

/// Parse a `ROWSxCOLS` size such as `20x40`.
pub fn parse_size(s: &str) -> Result<(i32, i32)> {
    let Some((rows, cols)) = s.split_once(['x', 'X']) else {
        bail!("expected ROWSxCOLS, got \u{201c}{s}\u{201d}");
    };
    let rows: i32 = rows.trim().parse().with_context(|| format!("bad row count in {s}"))?;
    let cols: i32 = cols.trim().parse().with_context(|| format!("bad column count in {s}"))?;
    if rows < 1 || cols < 1 {
        bail!("grid {rows}x{cols} has no cells");
    }
    match rows.checked_mul(cols) {
        None => bail!("grid {rows}x{cols} is too large"),
        Some(n) if n < 2 => {
            bail!("grid {rows}x{cols} is too small for a source and a destination")
        }
        Some(_) => {}
    }
    Ok((rows, cols))
}

/// Read a [`SearchConfig`] from a TOML file. Missing keys take their
/// defaults.
pub fn load_config(path: &Path) -> Result<SearchConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: SearchConfig =
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    info!("loaded config from {}: {config:?}", path.display());
    Ok(config)
}

/// Build a workbench from a layout file.
pub fn load_map(path: &Path, config: SearchConfig) -> Result<Workbench> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading map {}", path.display()))?;
    let layout = Layout::parse(&text).with_context(|| format!("parsing map {}", path.display()))?;
    let mut bench = Workbench::new(layout.rows(), layout.columns(), config);
    layout.apply_to(&mut bench)?;
    Ok(bench)
}

/// Fill a fresh workbench with random walls and weights. The source goes in
/// the top-left corner and the destination in the bottom-right one; both
/// stay open.
pub fn random_bench<R: Rng>(
    rng: &mut R,
    rows: i32,
    columns: i32,
    wall_density: f64,
    weight_density: f64,
    config: SearchConfig,
) -> Result<Workbench> {
    if !(0.0..=1.0).contains(&wall_density) || !(0.0..=1.0).contains(&weight_density) {
        bail!("densities must lie between 0 and 1");
    }
    let mut bench = Workbench::new(rows, columns, config);
    let source = Point::at(0, 0);
    let destination = Point::at(rows - 1, columns - 1);

    for row in 0..rows {
        for col in 0..columns {
            let p = Point::at(row, col);
            if p == source || p == destination {
                continue;
            }
            let r: f64 = rng.random();
            if r < wall_density {
                bench.toggle_wall(p)?;
            } else if r < wall_density + weight_density {
                bench.toggle_weight(p)?;
            }
        }
    }
    bench.set_source(source)?;
    bench.set_destination(destination)?;
    Ok(bench)
}

/// One-line summary of a finished search.
pub fn summary(report: &SearchReport) -> String {
    format!(
        "{:<12} steps {:>4}  cost {:>6}  visits {:>5}",
        report.algorithm.to_string(),
        report.steps(),
        report.cost,
        report.visits
    )
}
