use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use labyrinth::mapgen::audit_maze;
use labyrinth::{MazeError, MazeGenerator, SeededRandom};
use tools::config_file::{ConfigOverrides, resolve_config};
use tools::logging;
use tracing::{error, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 0)]
    start: u64,
    #[arg(short = 'n', long, default_value_t = 100)]
    count: u64,
    /// TOML file with maze configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init_logging();
    let args = Args::parse();

    let config = resolve_config(args.config.as_deref(), &ConfigOverrides::default())?;
    let generator = MazeGenerator::new(config.clone())?;

    println!("Sweeping {} seeds starting at {}...", args.count, args.start);
    let mut violations = 0_u64;
    let mut shortfalls = 0_u64;
    for seed in args.start..args.start.saturating_add(args.count) {
        match generator.generate(&mut SeededRandom::new(seed)) {
            Ok(maze) => {
                if let Err(violation) = audit_maze(&maze, &config) {
                    error!(seed, %violation, "maze invariant violated");
                    violations += 1;
                }
            }
            // Small or shallow grids can legitimately run out of deep floor.
            Err(MazeError::InsufficientDeepFloor { placed, requested }) => {
                warn!(seed, placed, requested, "not enough deep floor for hazards");
                shortfalls += 1;
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Generation failed for seed {seed}"));
            }
        }
    }

    println!(
        "Sweep complete: {} seeds, {violations} violations, {shortfalls} hazard shortfalls.",
        args.count
    );
    if violations > 0 {
        bail!("{violations} seeds violated maze invariants");
    }
    Ok(())
}
