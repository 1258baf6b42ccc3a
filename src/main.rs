//! CLI entry point for the dungeon level generator

use clap::Parser;
use roomgraph::io::cli::{Cli, LevelRunner};

fn main() -> roomgraph::Result<()> {
    let cli = Cli::parse();
    let mut runner = LevelRunner::new(cli);
    runner.run()
}
