//! Batch orchestration. Strictly sequential: one seed's stage pipeline
//! completes (or aborts the batch) before the next seed begins. The engine
//! stage blocks for the duration of the external run and is the dominant
//! latency contributor.

use std::fs;

use resim_shared::config::BatchConfig;
use resim_shared::result::{SeedRecord, Stage};

use crate::error::{PipelineError, StageError};
use crate::{engine, fcd, network, sumocfg, trips};

/// Orchestration policy. Fail-fast is the default; `keep_going` records a
/// seed's failure and moves on instead of aborting the batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    pub keep_going: bool,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Lane/edge types carrying the uniform width after setup.
    pub types_patched: usize,
    pub completed: Vec<SeedRecord>,
    pub failed: Vec<PipelineError>,
}

impl BatchReport {
    pub fn total_rows(&self) -> usize {
        self.completed.iter().map(|record| record.rows).sum()
    }
}

pub fn run_batch(config: &BatchConfig, options: BatchOptions) -> Result<BatchReport, PipelineError> {
    for dir in config.stage_dirs() {
        fs::create_dir_all(&dir)
            .map_err(|source| PipelineError::Setup(StageError::write(&dir, source)))?;
    }

    // The network is shared by every seed, so it is patched once up front
    // rather than re-patched inside the loop. The patch itself stays
    // idempotent, so re-running a batch converges to the same file.
    let types_patched = network::patch_lane_widths(&config.network_path(), config.lane_width)
        .map_err(PipelineError::Setup)?;

    let mut report = BatchReport {
        types_patched,
        ..BatchReport::default()
    };
    for &seed in &config.seeds {
        match run_seed(config, seed) {
            Ok(record) => report.completed.push(record),
            Err(err) if options.keep_going => report.failed.push(err),
            Err(err) => return Err(err),
        }
    }
    Ok(report)
}

/// Run the full stage sequence for one seed.
pub fn run_seed(config: &BatchConfig, seed: u64) -> Result<SeedRecord, PipelineError> {
    let fail = |stage: Stage| {
        move |source: StageError| PipelineError::Seed {
            seed,
            stage,
            source,
        }
    };

    let raw = trips::generate(config, seed).map_err(fail(Stage::GenerateTrips))?;
    let trips_path = config.trips_path(seed);
    trips::normalize(&raw, &trips_path, &config.vtype, &config.canonical_type)
        .map_err(fail(Stage::NormalizeTrips))?;

    let cfg_path = config.sumocfg_path(seed);
    sumocfg::materialize(
        &config.template_path(),
        &cfg_path,
        seed,
        &config.route_files_ref(seed),
        &config.net_file_ref(),
    )
    .map_err(fail(Stage::MaterializeConfig))?;

    let fcd_path = config.fcd_path(seed);
    engine::run(&config.engine, &cfg_path, &fcd_path).map_err(fail(Stage::RunSimulation))?;

    let table = config.csv_path(seed);
    let rows = fcd::flatten_to_csv(&fcd_path, &table).map_err(fail(Stage::Flatten))?;

    Ok(SeedRecord { seed, rows, table })
}
