mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use corchain::config::Settings;
use corchain::observability;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let settings = match cli.config {
        Some(path) => Settings::load_from_path(path)?,
        None => Settings::load()?,
    };
    observability::init_tracing(&settings.telemetry.log_filter);

    match cli.command {
        Commands::Describe(args) => commands::describe(&settings, &args.namespace)?,
        Commands::Run(args) => commands::run(&settings, &args.target.namespace, &args.inputs)?,
        Commands::Namespaces => commands::namespaces(&settings),
    }

    Ok(())
}
