//! CLI for the egg and feed ledger.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{chickens, config, dashboard, eggs, import, purchases};

/// Egg ledger - log egg counts, import feed purchases, track cost per egg
#[derive(Parser)]
#[command(name = "eggledger")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import saved order pages from the inbox
    Import(import::ImportArgs),

    /// List, edit, and delete imported purchases
    Purchases(purchases::PurchasesArgs),

    /// Log and list egg counts
    Eggs(eggs::EggsArgs),

    /// Show cost-per-egg figures
    Dashboard(dashboard::DashboardArgs),

    /// Show or set the number of chickens
    Chickens(chickens::ChickensArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Import(args) => import::run(args, config_path),
        Commands::Purchases(args) => purchases::run(args, config_path),
        Commands::Eggs(args) => eggs::run(args, config_path),
        Commands::Dashboard(args) => dashboard::run(args, config_path),
        Commands::Chickens(args) => chickens::run(args, config_path),
        Commands::Config(args) => config::run(args, config_path),
    }
}
