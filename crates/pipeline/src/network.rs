//! Shared network-descriptor patching.

use std::fs;
use std::path::Path;

use crate::error::StageError;
use crate::xml::Document;

/// Force a uniform width onto every declared lane/edge type and write the
/// descriptor back in place. The write is an unconditional overwrite, so
/// reapplying with the same width converges to the same bytes.
pub fn patch_lane_widths(path: &Path, width: f64) -> Result<usize, StageError> {
    let text = fs::read_to_string(path).map_err(|source| StageError::read(path, source))?;
    let mut doc = Document::parse(&text).map_err(|source| StageError::document(path, source))?;

    let width = width.to_string();
    let mut patched = 0;
    for decl in doc.root.elements_mut().filter(|el| el.tag == "type") {
        decl.set_attr("width", width.clone());
        patched += 1;
    }

    fs::write(path, doc.to_xml()).map_err(|source| StageError::write(path, source))?;
    Ok(patched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Document;
    use tempfile::TempDir;

    const NET: &str = r#"<net version="1.0">
    <type id="a" priority="3"/>
    <type id="b" priority="2" width="3.2"/>
    <edge id="e0"/>
</net>"#;

    #[test]
    fn every_type_gets_the_width() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("net.xml");
        fs::write(&path, NET).unwrap();

        let patched = patch_lane_widths(&path, 200.0).unwrap();
        assert_eq!(patched, 2);

        let doc = Document::parse(&fs::read_to_string(&path).unwrap()).unwrap();
        for decl in doc.root.elements().filter(|el| el.tag == "type") {
            assert_eq!(decl.attr("width"), Some("200"));
        }
        // Non-type declarations are untouched.
        let edge = doc.root.elements().find(|el| el.tag == "edge").unwrap();
        assert_eq!(edge.attr("width"), None);
    }

    #[test]
    fn patch_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("net.xml");
        fs::write(&path, NET).unwrap();

        patch_lane_widths(&path, 200.0).unwrap();
        let once = fs::read_to_string(&path).unwrap();
        patch_lane_widths(&path, 200.0).unwrap();
        let twice = fs::read_to_string(&path).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn parse_failure_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("net.xml");
        fs::write(&path, "<net><type").unwrap();

        let err = patch_lane_widths(&path, 200.0).unwrap_err();
        assert!(matches!(err, StageError::Document { .. }));
    }
}
