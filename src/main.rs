use clap::Parser;
use tracing_subscriber::EnvFilter;

use sbol_plan::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("sbol_plan=debug,info")
    } else {
        EnvFilter::new("sbol_plan=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Plan(args) => {
            cli::plan::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Fasta(args) => {
            cli::fasta::run(args, cli.verbose)?;
        }
    }

    Ok(())
}
