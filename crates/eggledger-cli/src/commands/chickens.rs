//! Chickens command - show or set the flock size.

use clap::{Args, Subcommand};
use console::style;

use super::{load_config, open_store};

/// Arguments for the chickens command.
#[derive(Args)]
pub struct ChickensArgs {
    #[command(subcommand)]
    command: Option<ChickensCommand>,
}

#[derive(Subcommand)]
enum ChickensCommand {
    /// Show the current number of chickens
    Show,

    /// Set the number of chickens
    Set {
        count: u32,
    },
}

pub fn run(args: ChickensArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let mut store = open_store(&config)?;

    match args.command.unwrap_or(ChickensCommand::Show) {
        ChickensCommand::Show => println!("{}", store.chicken_count()),
        ChickensCommand::Set { count } => {
            store.set_chicken_count(count)?;
            println!("{} Chicken count set to {}", style("✓").green(), count);
        }
    }

    Ok(())
}
