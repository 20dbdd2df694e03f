use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use resim_pipeline::runner::{self, BatchOptions};
use resim_shared::config::BatchConfig;

use crate::output;

pub fn run(
    config_path: Option<&Path>,
    seeds: Option<Vec<u64>>,
    vehicle_count: Option<u32>,
    lane_width: Option<f64>,
    net_name: Option<String>,
    keep_going: bool,
) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(seeds) = seeds {
        config.seeds = seeds;
    }
    if let Some(count) = vehicle_count {
        config.vehicle_count = count;
    }
    if let Some(width) = lane_width {
        config.lane_width = width;
    }
    if let Some(name) = net_name {
        config.net_name = name;
    }
    if config.seeds.is_empty() {
        anyhow::bail!("no seeds to run");
    }
    if config.vehicle_count == 0 {
        anyhow::bail!("vehicle count must be positive");
    }

    println!(
        "Running {} seeds on {} ({} vehicles each)...",
        config.seeds.len(),
        config.net_name,
        config.vehicle_count,
    );

    let start = Instant::now();
    let report = runner::run_batch(&config, BatchOptions { keep_going })?;
    let elapsed = start.elapsed();

    output::print_report(&report, elapsed);

    if !report.failed.is_empty() {
        anyhow::bail!(
            "{} of {} seeds failed",
            report.failed.len(),
            config.seeds.len()
        );
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<BatchConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid batch config {}", path.display()))
        }
        None => Ok(BatchConfig::default()),
    }
}
