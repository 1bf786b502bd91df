//! Source reader tests

use geo_data_dictionary::pipeline::{DictionaryConfig, DictionaryPipeline, PipelineInput};
use geo_data_dictionary::source::{self, SourceError};
use std::path::Path;
use tempfile::TempDir;

/// Minimal dBase III table: header, field descriptors, terminator, no records
fn write_dbf(path: &Path, fields: &[(&str, u8, u8, u8)]) {
    let header_len = (32 + fields.len() * 32 + 1) as u16;
    let mut bytes = vec![0u8; 32];
    bytes[0] = 0x03;
    bytes[8..10].copy_from_slice(&header_len.to_le_bytes());
    for (name, code, width, decimals) in fields {
        let mut d = [0u8; 32];
        d[..name.len()].copy_from_slice(name.as_bytes());
        d[11] = *code;
        d[16] = *width;
        d[17] = *decimals;
        bytes.extend_from_slice(&d);
    }
    bytes.push(0x0D);
    bytes.push(0x1A);
    std::fs::write(path, bytes).unwrap();
}

mod shapefile_tests {
    use super::*;

    #[test]
    fn test_open_shapefile_reads_attribute_table() {
        let temp = TempDir::new().unwrap();
        let shp = temp.path().join("parcels.shp");
        std::fs::write(&shp, b"").unwrap();
        write_dbf(
            &temp.path().join("parcels.dbf"),
            &[("PIN", b'C', 12, 0), ("AREA", b'N', 24, 15), ("ZONE", b'N', 4, 0)],
        );

        let schema = source::open(&shp).unwrap();
        assert_eq!(schema.name, "parcels");
        assert_eq!(
            schema.properties,
            vec![
                ("PIN".to_string(), "str:12".to_string()),
                ("AREA".to_string(), "float:24.15".to_string()),
                ("ZONE".to_string(), "int:4".to_string()),
            ]
        );
    }

    #[test]
    fn test_open_dbf_directly() {
        let temp = TempDir::new().unwrap();
        let dbf = temp.path().join("zoning.dbf");
        write_dbf(&dbf, &[("CODE", b'C', 3, 0)]);

        let schema = source::open(&dbf).unwrap();
        assert_eq!(schema.name, "zoning");
        assert_eq!(schema.properties, vec![("CODE".to_string(), "str:3".to_string())]);
    }

    #[test]
    fn test_malformed_table() {
        let temp = TempDir::new().unwrap();
        let dbf = temp.path().join("broken.dbf");
        std::fs::write(&dbf, [0x03u8, 0, 0]).unwrap();

        let result = source::open(&dbf);
        assert!(matches!(result, Err(SourceError::Malformed { .. })));
    }

    #[test]
    fn test_shapefile_pipeline_output_names() {
        let temp = TempDir::new().unwrap();
        let shp = temp.path().join("rivers.shp");
        std::fs::write(&shp, b"").unwrap();
        write_dbf(&temp.path().join("rivers.dbf"), &[("NAME", b'C', 80, 0)]);

        let template_dir = temp.path().join("tpl");
        std::fs::create_dir(&template_dir).unwrap();
        std::fs::write(template_dir.join("t.hbs"), "{{#each categories}}{{name}}{{/each}}").unwrap();

        let out = temp.path().join("out");
        let pipeline = DictionaryPipeline::new(
            DictionaryConfig::new()
                .with_template_dir(&template_dir)
                .with_template_name("t.hbs")
                .with_output_dir(&out),
        )
        .unwrap();
        let report = pipeline.run(&PipelineInput::Source(shp)).unwrap();

        assert_eq!(report.artifacts().count(), 2);
        assert_eq!(std::fs::read_to_string(out.join("rivers.rst")).unwrap(), "rivers");
        let record = &report.document.categories[0].contains[0].contains[0];
        assert_eq!(record.data_type, "str");
        assert_eq!(record.length, "80");
    }
}

mod geojson_tests {
    use super::*;

    #[test]
    fn test_name_member_overrides_stem() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("export.geojson");
        std::fs::write(
            &path,
            r#"{"type": "FeatureCollection", "name": "bus_stops", "features": [
                {"type": "Feature", "geometry": null, "properties": {"stop_id": "A1", "shelter": true}}
            ]}"#,
        )
        .unwrap();

        let schema = source::open(&path).unwrap();
        assert_eq!(schema.name, "bus_stops");
        assert_eq!(
            schema.properties,
            vec![
                ("stop_id".to_string(), "str".to_string()),
                ("shelter".to_string(), "bool".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = source::open(&path);
        assert!(matches!(result, Err(SourceError::Malformed { .. })));
    }
}
