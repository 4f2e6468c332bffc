//! Dashboard command - cost per egg and per chicken.

use chrono::Local;
use clap::Args;
use console::style;

use eggledger_core::{DashboardSummary, WindowSummary};

use super::{load_config, open_store};

/// Arguments for the dashboard command.
#[derive(Args)]
pub struct DashboardArgs {
    /// Print JSON instead of a text summary
    #[arg(long)]
    json: bool,
}

pub fn run(args: DashboardArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config)?;

    let summary = DashboardSummary::compute(&store, Local::now().date_naive())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", style("Totals").bold());
    println!("  Eggs:              {}", summary.total_eggs);
    println!("  Feed cost:         ${:.2}", summary.total_cost);
    println!(
        "  Cost per chicken:  ${:.2} ({} chickens)",
        summary.cost_per_chicken, summary.chickens
    );
    println!();
    print_window("Last 7 days", &summary.week);
    print_window("Last 30 days", &summary.month);

    Ok(())
}

fn print_window(title: &str, window: &WindowSummary) {
    println!("{}", style(title).bold());
    println!("  Eggs:              {}", window.eggs);
    println!("  Feed cost:         ${:.2}", window.cost);
    println!("  Cost per egg:      ${:.4}", window.cost_per_egg);
    println!();
}
