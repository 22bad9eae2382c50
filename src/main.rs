//! CLI entry point for the Hamiltonian cycle adjacency test runner

use clap::Parser;
use hamcycle_adjacency::io::cli::{BatchProcessor, Cli, RunConfig, init_tracing};

// Allow print for the final result table
#[allow(clippy::print_stdout)]
fn main() -> hamcycle_adjacency::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level());
    let config = RunConfig::from_cli(&cli)?;
    let mut processor = BatchProcessor::new(config);
    let table = processor.process()?;
    println!("{table}");
    Ok(())
}
