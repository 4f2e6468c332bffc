//! Eggs command - log and list daily egg counts.

use chrono::Local;
use clap::{Args, Subcommand};
use console::style;

use eggledger_core::extract::rules::try_parse_date;
use eggledger_core::EggCount;

use super::{load_config, open_store, OutputFormat};

/// Arguments for the eggs command.
#[derive(Args)]
pub struct EggsArgs {
    #[command(subcommand)]
    command: EggsCommand,
}

#[derive(Subcommand)]
enum EggsCommand {
    /// Log today's egg count
    Add {
        /// Number of eggs collected
        count: u32,

        /// Free-text notes
        #[arg(short, long, default_value = "")]
        notes: String,

        /// Date to log against (default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List logged egg counts, newest first
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

pub fn run(args: EggsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let mut store = open_store(&config)?;

    match args.command {
        EggsCommand::Add { count, notes, date } => {
            let date = match date {
                Some(text) => try_parse_date(&text)
                    .ok_or_else(|| anyhow::anyhow!("Unrecognized date: {}", text))?,
                None => Local::now().date_naive(),
            };
            store.add_egg_count(date, count, &notes)?;
            println!("{} Logged {} eggs for {}", style("✓").green(), count, date);
            Ok(())
        }
        EggsCommand::List { format } => print_counts(&store.list_egg_counts()?, format),
    }
}

fn print_counts(counts: &[EggCount], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(counts)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["id", "date", "egg_count", "notes"])?;
            for egg in counts {
                wtr.serialize((egg.id, egg.date, egg.count, &egg.notes))?;
            }
            wtr.flush()?;
        }
        OutputFormat::Text => {
            if counts.is_empty() {
                println!("{} No egg counts logged yet.", style("ℹ").blue());
            }
            for egg in counts {
                println!("{:>5}  {}  {:>4}  {}", egg.id, egg.date, egg.count, egg.notes);
            }
        }
    }
    Ok(())
}
