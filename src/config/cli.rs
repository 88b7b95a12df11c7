use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "kiosk-display")]
#[command(about = "Self-refreshing product kiosk display")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "kiosk-config.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Run a single refresh cycle, render it and exit
    #[arg(long)]
    pub once: bool,

    /// Use the built-in sample catalog instead of the HTTP backend
    #[arg(long)]
    pub demo: bool,

    /// Show the loaded configuration without fetching anything
    #[arg(long)]
    pub dry_run: bool,
}
