//! Trajectory-log flattening.

use std::fs;
use std::path::Path;

use csv::WriterBuilder;

use crate::error::StageError;
use crate::xml::{Document, Element};

pub const TABLE_HEADER: [&str; 6] = ["time", "id", "x", "y", "angle", "speed"];
const VEHICLE_FIELDS: [&str; 5] = ["id", "x", "y", "angle", "speed"];

/// Flatten a trajectory log into one table row per (timestep, vehicle) pair.
/// Row order is the document traversal order, and values keep their literal
/// string form; both matter for reproducibility comparison downstream.
pub fn flatten_to_csv(fcd: &Path, out: &Path) -> Result<usize, StageError> {
    let text = fs::read_to_string(fcd).map_err(|source| StageError::read(fcd, source))?;
    let doc = Document::parse(&text).map_err(|source| StageError::document(fcd, source))?;

    let mut writer = WriterBuilder::new().from_path(out)?;
    writer.write_record(TABLE_HEADER)?;

    let mut rows = 0;
    for timestep in doc.root.elements().filter(|el| el.tag == "timestep") {
        let time = required_attr(timestep, "time", fcd)?;
        for vehicle in timestep.elements().filter(|el| el.tag == "vehicle") {
            let mut record = Vec::with_capacity(TABLE_HEADER.len());
            record.push(time);
            for field in VEHICLE_FIELDS {
                record.push(required_attr(vehicle, field, fcd)?);
            }
            writer.write_record(&record)?;
            rows += 1;
        }
    }

    writer
        .flush()
        .map_err(|source| StageError::write(out, source))?;
    Ok(rows)
}

fn required_attr<'a>(el: &'a Element, attr: &str, path: &Path) -> Result<&'a str, StageError> {
    el.attr(attr).ok_or_else(|| StageError::MissingAttribute {
        path: path.to_path_buf(),
        tag: el.tag.clone(),
        attr: attr.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LOG: &str = r#"<fcd-export>
    <timestep time="0.00">
        <vehicle id="a" x="1.10" y="2.20" angle="90.00" speed="0.00"/>
        <vehicle id="b" x="3.30" y="4.40" angle="180.00" speed="0.00"/>
    </timestep>
    <timestep time="1.00">
        <vehicle id="a" x="1.50" y="2.20" angle="90.00" speed="1.40"/>
        <vehicle id="b" x="3.30" y="4.90" angle="180.00" speed="1.70"/>
    </timestep>
</fcd-export>"#;

    #[test]
    fn rows_follow_document_order() {
        let dir = TempDir::new().unwrap();
        let fcd = dir.path().join("run.fcd.xml");
        let out = dir.path().join("run.csv");
        fs::write(&fcd, LOG).unwrap();

        let rows = flatten_to_csv(&fcd, &out).unwrap();
        assert_eq!(rows, 4);

        let text = fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "time,id,x,y,angle,speed",
                "0.00,a,1.10,2.20,90.00,0.00",
                "0.00,b,3.30,4.40,180.00,0.00",
                "1.00,a,1.50,2.20,90.00,1.40",
                "1.00,b,3.30,4.90,180.00,1.70",
            ]
        );
    }

    #[test]
    fn empty_timesteps_yield_no_rows() {
        let dir = TempDir::new().unwrap();
        let fcd = dir.path().join("run.fcd.xml");
        let out = dir.path().join("run.csv");
        fs::write(
            &fcd,
            r#"<fcd-export><timestep time="0.00"/><timestep time="1.00"/></fcd-export>"#,
        )
        .unwrap();

        let rows = flatten_to_csv(&fcd, &out).unwrap();
        assert_eq!(rows, 0);
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "time,id,x,y,angle,speed\n"
        );
    }

    #[test]
    fn missing_vehicle_attribute_is_an_error() {
        let dir = TempDir::new().unwrap();
        let fcd = dir.path().join("run.fcd.xml");
        let out = dir.path().join("run.csv");
        fs::write(
            &fcd,
            r#"<fcd-export><timestep time="0.00"><vehicle id="a" x="1" y="2" angle="3"/></timestep></fcd-export>"#,
        )
        .unwrap();

        let err = flatten_to_csv(&fcd, &out).unwrap_err();
        match err {
            StageError::MissingAttribute { tag, attr, .. } => {
                assert_eq!(tag, "vehicle");
                assert_eq!(attr, "speed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
