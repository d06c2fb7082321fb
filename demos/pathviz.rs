//! Command-line pathfinding visualiser.
//!
//! Loads a text map (or generates a random one), runs one or all of the
//! search algorithms and prints the explored grid with the path marked.
//!
//! Run: cargo run --bin pathviz -- --random 15x40 --algorithm all

use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use pathviz_demos::{load_config, load_map, parse_size, random_bench, summary};
use pathviz_search::{Algorithm, Error, SearchConfig, render};
use rand::{RngExt, SeedableRng};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Map file using `.`, `#`, `~`, `S` and `D`
    #[arg(short, long, conflicts_with = "random")]
    map: Option<PathBuf>,

    /// Random grid size as ROWSxCOLS
    #[arg(short, long, default_value = "15x40")]
    random: String,

    /// Seed for the random grid
    #[arg(long)]
    seed: Option<u64>,

    /// Fraction of random cells that become walls
    #[arg(long, default_value_t = 0.25)]
    wall_density: f64,

    /// Fraction of random cells that become weights
    #[arg(long, default_value_t = 0.1)]
    weight_density: f64,

    /// bfs, dfs, dijkstra, bellman-ford or all
    #[arg(short, long, default_value = "all")]
    algorithm: String,

    /// Pause after each visited cell, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// TOML file with search options
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn algorithms(&self) -> Result<Vec<Algorithm>> {
        if self.algorithm.eq_ignore_ascii_case("all") {
            return Ok(Algorithm::ALL.to_vec());
        }
        Ok(vec![self.algorithm.parse()?])
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let algorithms = args.algorithms()?;
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => SearchConfig::default(),
    };

    let mut bench = match &args.map {
        Some(path) => load_map(path, config)?,
        None => {
            let (rows, columns) = parse_size(&args.random)?;
            let seed = args.seed.unwrap_or_else(|| rand::rng().random());
            info!("random {rows}x{columns} grid, seed {seed}");
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            random_bench(
                &mut rng,
                rows,
                columns,
                args.wall_density,
                args.weight_density,
                config,
            )?
        }
    };

    let delay = Duration::from_millis(args.delay_ms);
    for alg in algorithms {
        let outcome = if delay.is_zero() {
            bench.run(alg)
        } else {
            let mut seen = 0usize;
            let outcome = bench.run_in_background(alg, |p| {
                seen += 1;
                print!("\r{alg}: {seen} cells, at {p}   ");
                let _ = io::stdout().flush();
                thread::sleep(delay);
            });
            println!();
            outcome
        };

        match outcome {
            Ok(report) => {
                println!("{}", render(bench.grid(alg), &report.path));
                println!("{}\n", summary(&report));
            }
            Err(e @ Error::NoPathFound { .. }) => {
                println!("{}", render(bench.grid(alg), &[]));
                warn!("{alg}: {e}");
                println!();
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
