use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use labyrinth::{MazeGenerator, SeededRandom};
use tools::config_file::{ConfigOverrides, resolve_config};
use tools::export::MazeExport;
use tools::seed::SeedChoice;
use tools::{format_fingerprint, logging};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the maze; a fresh one is generated when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// TOML file with maze configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    /// Number of hazard cells to place
    #[arg(long)]
    hazards: Option<usize>,
    #[arg(long)]
    iteration_cap: Option<u32>,
    /// Stop growing once a third of the grid is floor
    #[arg(long)]
    stop_at_coverage: bool,
    /// Write a JSON export of the maze to this path
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init_logging();
    let args = Args::parse();

    let overrides = ConfigOverrides {
        width: args.width,
        height: args.height,
        hazard_count: args.hazards,
        iteration_cap: args.iteration_cap,
        stop_at_coverage: args.stop_at_coverage,
    };
    let config = resolve_config(args.config.as_deref(), &overrides)?;
    let seed = SeedChoice::resolve(args.seed);

    let maze = MazeGenerator::new(config)?
        .generate(&mut SeededRandom::new(seed.value()))
        .with_context(|| format!("Failed to generate maze for seed {}", seed.value()))?;

    info!(
        seed = seed.value(),
        seed_source = seed.label(),
        fingerprint = %format_fingerprint(maze.fingerprint()),
        floor_count = maze.floor_count(),
        max_depth = maze.max_depth(),
        "maze ready"
    );
    print!("{}", maze.render_ascii());

    if let Some(path) = &args.out {
        MazeExport::from_maze(seed.value(), &maze)
            .write_atomic(path)
            .with_context(|| format!("Failed to write maze export: {}", path.display()))?;
        info!(path = %path.display(), "maze export written");
    }

    Ok(())
}
