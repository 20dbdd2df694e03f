use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// Baseline batch parameters
pub const DEFAULT_SEEDS: [u64; 5] = [32, 64, 128, 256, 512];
pub const DEFAULT_NET_NAME: &str = "re-manhattan";
pub const DEFAULT_VEHICLE_COUNT: u32 = 100;
pub const DEFAULT_LANE_WIDTH: f64 = 200.0;
pub const DEFAULT_CANONICAL_TYPE: &str = "car1";
pub const DEFAULT_TRIP_ATTRIBUTES: &str = "type='type1'";
// Every trip is generated inside this window so the whole fleet departs at once.
pub const TRIP_WINDOW_BEGIN: u32 = 0;
pub const TRIP_WINDOW_END: u32 = 1;

/// Attribute mapping for the vehicle-type definition injected into every
/// normalized trip set. Loaded once from the batch configuration and shared
/// read-only across all seeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleType {
    pub attrs: BTreeMap<String, String>,
}

impl Default for VehicleType {
    fn default() -> Self {
        let mut attrs = BTreeMap::new();
        for (name, value) in [
            ("id", DEFAULT_CANONICAL_TYPE),
            ("accel", "2.6"),
            ("decel", "4.5"),
            ("length", "5.0"),
            ("maxSpeed", "13.9"),
            ("sigma", "0.5"),
        ] {
            attrs.insert(name.to_string(), value.to_string());
        }
        Self { attrs }
    }
}

/// Full batch configuration. Every field has a default, so a configuration
/// file may set any subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Network name; derives the network, template, and output file names.
    pub net_name: String,
    /// Directory holding the network, the template, and the stage directories.
    pub work_dir: PathBuf,
    /// Seeds to process, in this order.
    pub seeds: Vec<u64>,
    /// Target vehicle count per run; the generator period is its inverse.
    pub vehicle_count: u32,
    /// Uniform width forced onto every declared lane/edge type. Externally
    /// supplied; the default matches the historically observed value and is
    /// not assumed to be physically meaningful.
    pub lane_width: f64,
    pub vtype: VehicleType,
    /// Vehicle-type name every normalized trip references.
    pub canonical_type: String,
    /// Attribute string handed to the trip generator verbatim.
    pub trip_attributes: String,
    /// Trip-generator argv prefix; per-seed flags are appended.
    pub trip_generator: Vec<String>,
    /// Simulation engine program name.
    pub engine: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            net_name: DEFAULT_NET_NAME.to_string(),
            work_dir: PathBuf::from("."),
            seeds: DEFAULT_SEEDS.to_vec(),
            vehicle_count: DEFAULT_VEHICLE_COUNT,
            lane_width: DEFAULT_LANE_WIDTH,
            vtype: VehicleType::default(),
            canonical_type: DEFAULT_CANONICAL_TYPE.to_string(),
            trip_attributes: DEFAULT_TRIP_ATTRIBUTES.to_string(),
            trip_generator: vec!["python".to_string(), "randomTrips.py".to_string()],
            engine: "sumo".to_string(),
        }
    }
}

impl BatchConfig {
    /// Generation period targeting `vehicle_count` vehicles in the trip window.
    pub fn period(&self) -> f64 {
        1.0 / f64::from(self.vehicle_count)
    }

    pub fn network_path(&self) -> PathBuf {
        self.work_dir.join(format!("{}.net.xml", self.net_name))
    }

    pub fn template_path(&self) -> PathBuf {
        self.work_dir.join(format!("{}.sumocfg", self.net_name))
    }

    /// Stage output directories, created up front by the orchestrator.
    pub fn stage_dirs(&self) -> [PathBuf; 4] {
        [self.flw_dir(), self.cfg_dir(), self.fcd_dir(), self.csv_dir()]
    }

    fn flw_dir(&self) -> PathBuf {
        self.work_dir.join("flw")
    }

    fn cfg_dir(&self) -> PathBuf {
        self.work_dir.join("cfg")
    }

    fn fcd_dir(&self) -> PathBuf {
        self.work_dir.join("fcd")
    }

    fn csv_dir(&self) -> PathBuf {
        self.work_dir.join("csv")
    }

    /// Raw generator output; never treated as a final artifact.
    pub fn raw_trips_path(&self, seed: u64) -> PathBuf {
        self.flw_dir().join(format!("trips_tmp_{seed}.xml"))
    }

    pub fn trips_path(&self, seed: u64) -> PathBuf {
        self.flw_dir().join(format!("trips_{seed}.xml"))
    }

    pub fn sumocfg_path(&self, seed: u64) -> PathBuf {
        self.cfg_dir().join(format!("{}_by{seed}.sumocfg", self.net_name))
    }

    pub fn fcd_path(&self, seed: u64) -> PathBuf {
        self.fcd_dir().join(format!("{}_by{seed}.fcd.xml", self.net_name))
    }

    pub fn csv_path(&self, seed: u64) -> PathBuf {
        self.csv_dir().join(format!(
            "{}_seed{seed}_n{}.csv",
            self.net_name, self.vehicle_count
        ))
    }

    // References written into a materialized config are resolved by the
    // engine relative to the config file, which lives one level down.

    pub fn route_files_ref(&self, seed: u64) -> String {
        format!("../flw/trips_{seed}.xml")
    }

    pub fn net_file_ref(&self) -> String {
        format!("../{}.net.xml", self.net_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_names_encode_seed_and_count() {
        let config = BatchConfig::default();
        assert_eq!(
            config.csv_path(256),
            PathBuf::from("./csv/re-manhattan_seed256_n100.csv")
        );
        assert_eq!(
            config.sumocfg_path(32),
            PathBuf::from("./cfg/re-manhattan_by32.sumocfg")
        );
        assert_eq!(
            config.raw_trips_path(64),
            PathBuf::from("./flw/trips_tmp_64.xml")
        );
        assert_eq!(config.route_files_ref(64), "../flw/trips_64.xml");
        assert_eq!(config.net_file_ref(), "../re-manhattan.net.xml");
    }

    #[test]
    fn period_is_inverse_vehicle_count() {
        let config = BatchConfig {
            vehicle_count: 100,
            ..BatchConfig::default()
        };
        assert_eq!(config.period(), 0.01);
    }

    #[test]
    fn partial_config_file_fills_defaults() {
        let config: BatchConfig =
            serde_json::from_str(r#"{"seeds": [7], "lane_width": 3.5}"#).unwrap();
        assert_eq!(config.seeds, vec![7]);
        assert_eq!(config.lane_width, 3.5);
        assert_eq!(config.net_name, DEFAULT_NET_NAME);
        assert_eq!(config.vehicle_count, DEFAULT_VEHICLE_COUNT);
    }

    #[test]
    fn vtype_deserializes_as_plain_mapping() {
        let vtype: VehicleType =
            serde_json::from_str(r#"{"id": "car1", "accel": "1.0"}"#).unwrap();
        assert_eq!(vtype.attrs.get("id").map(String::as_str), Some("car1"));
        assert_eq!(vtype.attrs.len(), 2);
    }
}
