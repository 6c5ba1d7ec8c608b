use anyhow::{bail, Result};
use clap::Parser;

/// Smallest grid dimension with eight distinct neighbor positions per cell;
/// below this the toroidal wrap makes neighbor enumeration degenerate.
pub(crate) const MIN_GRID_DIMENSION: u32 = 3;

/// Command-line arguments accepted by the simulator.
#[derive(Debug, Parser)]
#[command(name = "torus-life", about = "Game of Life on a toroidal grid", allow_negative_numbers = true)]
pub(crate) struct Args {
    /// Simulation grid dimension.
    #[arg(long, default_value_t = 50)]
    pub(crate) dim: u32,

    /// Number of simulation steps.
    #[arg(long, short, default_value_t = 100)]
    pub(crate) steps: u64,

    /// Seconds between frames, not counting simulation time.
    #[arg(long, default_value_t = 0.1)]
    pub(crate) wait: f64,

    /// Uses the non-deterministic event model.
    #[arg(long, short = 'm')]
    pub(crate) monte_carlo: bool,

    /// Seed for the initial configuration and the Monte Carlo draws.
    #[arg(long, default_value_t = 6666)]
    pub(crate) seed: u64,
}

/// Rejects parameter combinations the simulation cannot honor.
pub(crate) fn validate(args: Args) -> Result<Args> {
    if args.dim < MIN_GRID_DIMENSION {
        bail!("grid dimension cannot be smaller than {MIN_GRID_DIMENSION}x{MIN_GRID_DIMENSION}");
    }
    if !args.wait.is_finite() || args.wait < 0.0 {
        bail!("seconds between frames must be finite and non-negative");
    }
    Ok(args)
}
