//! Per-seed configuration materialization.
//!
//! The template is parsed and the three references are overwritten
//! structurally: the `value` attribute of `route-files`, `seed`, and
//! `net-file` is replaced wholesale wherever the element appears. A template
//! missing one of them fails with the element's name instead of leaving
//! stale text behind.

use std::fs;
use std::path::Path;

use crate::error::StageError;
use crate::xml::Document;

pub fn materialize(
    template: &Path,
    out: &Path,
    seed: u64,
    route_files: &str,
    net_file: &str,
) -> Result<(), StageError> {
    let text = fs::read_to_string(template).map_err(|source| StageError::read(template, source))?;
    let mut doc =
        Document::parse(&text).map_err(|source| StageError::document(template, source))?;

    set_value(&mut doc, "route-files", route_files, template)?;
    set_value(&mut doc, "seed", &seed.to_string(), template)?;
    set_value(&mut doc, "net-file", net_file, template)?;

    fs::write(out, doc.to_xml()).map_err(|source| StageError::write(out, source))?;
    Ok(())
}

fn set_value(doc: &mut Document, tag: &str, value: &str, template: &Path) -> Result<(), StageError> {
    let hits = doc
        .root
        .visit_tag_mut(tag, &mut |el| el.set_attr("value", value));
    if hits == 0 {
        return Err(StageError::MissingElement {
            path: template.to_path_buf(),
            tag: tag.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TEMPLATE: &str = r#"<configuration>
    <input>
        <net-file value="placeholder.net.xml"/>
        <route-files value="placeholder.flw.xml"/>
    </input>
    <random_number>
        <seed value="0"/>
    </random_number>
</configuration>"#;

    #[test]
    fn all_three_references_are_substituted() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("template.sumocfg");
        let out = dir.path().join("by32.sumocfg");
        fs::write(&template, TEMPLATE).unwrap();

        materialize(
            &template,
            &out,
            32,
            "../flw/trips_32.xml",
            "../re-manhattan.net.xml",
        )
        .unwrap();

        let text = fs::read_to_string(&out).unwrap();
        assert!(text.contains(r#"<route-files value="../flw/trips_32.xml"/>"#));
        assert!(text.contains(r#"<seed value="32"/>"#));
        assert!(text.contains(r#"<net-file value="../re-manhattan.net.xml"/>"#));
        assert!(!text.contains("placeholder"));
    }

    #[test]
    fn missing_reference_element_fails_loudly() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("template.sumocfg");
        let out = dir.path().join("out.sumocfg");
        fs::write(
            &template,
            r#"<configuration><input><net-file value="x"/><route-files value="y"/></input></configuration>"#,
        )
        .unwrap();

        let err = materialize(&template, &out, 32, "r", "n").unwrap_err();
        match err {
            StageError::MissingElement { tag, .. } => assert_eq!(tag, "seed"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn template_is_left_untouched() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("template.sumocfg");
        let out = dir.path().join("out.sumocfg");
        fs::write(&template, TEMPLATE).unwrap();

        materialize(&template, &out, 64, "r", "n").unwrap();
        assert_eq!(fs::read_to_string(&template).unwrap(), TEMPLATE);
    }
}
