use std::fmt;
use std::path::PathBuf;

/// Per-seed pipeline stages, in execution order. The network patch is batch
/// setup, not a per-seed stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    GenerateTrips,
    NormalizeTrips,
    MaterializeConfig,
    RunSimulation,
    Flatten,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::GenerateTrips => "trip generation",
            Stage::NormalizeTrips => "trip normalization",
            Stage::MaterializeConfig => "config materialization",
            Stage::RunSimulation => "simulation",
            Stage::Flatten => "trajectory flattening",
        };
        f.write_str(name)
    }
}

/// Outcome of one completed seed run. The file artifacts persist; this is
/// what the batch summary reports about them.
#[derive(Debug, Clone)]
pub struct SeedRecord {
    pub seed: u64,
    /// Rows written to the flattened table, one per (timestep, vehicle) pair.
    pub rows: usize,
    pub table: PathBuf,
}
