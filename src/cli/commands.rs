use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "pagelift",
    version,
    about = "Turn a product photo into a published one-page business site"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the API server
    Serve(ServeArgs),

    /// Validate configuration and collaborator credentials
    Check,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0:8787")]
    pub bind: String,
}
