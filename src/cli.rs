use clap::{Parser, Subcommand};
use corchain::handlers::BUILTIN_NAMESPACE;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "corchain")]
#[command(about = "Build and exercise handler chains", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to $CORCHAIN_CONFIG or config/corchain.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the order a namespace's handlers would be linked in
    Describe(NamespaceArgs),
    /// Build a namespace's chain and run inputs through it
    Run(RunArgs),
    /// List known namespaces
    Namespaces,
}

#[derive(clap::Args, Debug)]
pub struct NamespaceArgs {
    /// Namespace to resolve
    #[arg(long, short, default_value = BUILTIN_NAMESPACE)]
    pub namespace: String,
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub target: NamespaceArgs,

    /// Inputs to process, one traversal each
    #[arg(required = true)]
    pub inputs: Vec<String>,
}
