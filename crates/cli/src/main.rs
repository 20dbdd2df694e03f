mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "resim", about = "Seeded traffic-simulation batch runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the batch pipeline across a seed set
    Run {
        /// Path to a JSON batch configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Seeds to process, in order (comma separated)
        #[arg(long, value_delimiter = ',')]
        seeds: Option<Vec<u64>>,
        /// Target vehicle count per run
        #[arg(long)]
        vehicle_count: Option<u32>,
        /// Uniform lane width forced onto every declared network type
        #[arg(long)]
        lane_width: Option<f64>,
        /// Network name (derives the network, template, and output names)
        #[arg(long)]
        net_name: Option<String>,
        /// Record per-seed failures and continue instead of aborting
        #[arg(long)]
        keep_going: bool,
    },
    /// Compare two flattened tables under rounding tolerance
    Compare {
        left: PathBuf,
        right: PathBuf,
        /// Decimal places to round floating-point columns to
        #[arg(long, default_value = "8")]
        decimals: u32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            seeds,
            vehicle_count,
            lane_width,
            net_name,
            keep_going,
        } => commands::run::run(
            config.as_deref(),
            seeds,
            vehicle_count,
            lane_width,
            net_name,
            keep_going,
        ),
        Commands::Compare {
            left,
            right,
            decimals,
        } => commands::compare::run(&left, &right, decimals),
    }
}
