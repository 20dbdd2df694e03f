//! Trip-set synthesis and normalization.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use resim_shared::config::{BatchConfig, VehicleType, TRIP_WINDOW_BEGIN, TRIP_WINDOW_END};

use crate::error::StageError;
use crate::xml::{Document, Element, Node};

/// Invoke the external trip generator for one seed and return the raw
/// trip-set path. The raw set is generator output only; it is never used as
/// a final artifact.
pub fn generate(config: &BatchConfig, seed: u64) -> Result<PathBuf, StageError> {
    let out = config.raw_trips_path(seed);
    let (program, prefix) = config
        .trip_generator
        .split_first()
        .ok_or(StageError::EmptyCommand)?;
    let status = Command::new(program)
        .args(prefix)
        .arg("-n")
        .arg(config.network_path())
        .arg("--begin")
        .arg(TRIP_WINDOW_BEGIN.to_string())
        .arg("--end")
        .arg(TRIP_WINDOW_END.to_string())
        .arg("--period")
        .arg(config.period().to_string())
        .arg("--seed")
        .arg(seed.to_string())
        .arg("--trip-attributes")
        .arg(&config.trip_attributes)
        .arg("-o")
        .arg(&out)
        .status()
        .map_err(|source| StageError::Spawn {
            tool: program.clone(),
            source,
        })?;
    if !status.success() {
        return Err(StageError::ToolFailed {
            tool: program.clone(),
            status,
        });
    }
    Ok(out)
}

/// Rewrite a raw trip set into canonical form: the vehicle-type definition
/// becomes the first child, every trip departs at 0 and references the
/// canonical type name. Re-running on already-normalized output is a no-op.
pub fn normalize(
    raw: &Path,
    out: &Path,
    vtype: &VehicleType,
    canonical: &str,
) -> Result<usize, StageError> {
    let text = fs::read_to_string(raw).map_err(|source| StageError::read(raw, source))?;
    let mut doc =
        Document::parse(&text).map_err(|source| StageError::document(raw, source))?;

    // Drop any definition from a previous pass before re-inserting, so the
    // set always carries exactly one.
    doc.root
        .children
        .retain(|node| !matches!(node, Node::Element(el) if el.tag == "vType"));
    let mut def = Element::new("vType");
    for (name, value) in &vtype.attrs {
        def.set_attr(name, value.clone());
    }
    doc.root.insert_first(def);

    let mut trips = 0;
    for trip in doc.root.elements_mut().filter(|el| el.tag == "trip") {
        trip.set_attr("depart", "0");
        trip.set_attr("type", canonical);
        trips += 1;
    }

    fs::write(out, doc.to_xml()).map_err(|source| StageError::write(out, source))?;
    Ok(trips)
}
