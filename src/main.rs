//! CLI for maze generation

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use mazey::{render, solve, CharSet, MazeGenerator};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Generate a random maze and draw it with its solution
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width in cells
    #[arg(short, long, default_value_t = 30)]
    width: usize,

    /// Maze height in cells
    #[arg(long, default_value_t = 20)]
    height: usize,

    /// Draw with plain ASCII characters instead of box drawing characters
    #[arg(short, long)]
    ascii: bool,

    /// Do not draw the solution
    #[arg(short, long)]
    no_solve: bool,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Generate maze, print output
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    info!(?args, "generating maze");

    let mut grid = MazeGenerator::new(args.seed)
        .generate_maze(args.height, args.width)
        .context("Could not generate maze")?;
    if !args.no_solve {
        solve(&mut grid);
    }

    let charset = if args.ascii {
        CharSet::ASCII
    } else {
        CharSet::UNICODE
    };
    let mut out = io::stdout().lock();
    render(&grid, &charset, &mut out).context("Could not write maze")?;
    out.flush()?;
    Ok(())
}
