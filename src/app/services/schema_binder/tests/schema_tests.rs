//! Tests for schema parsing and the sample data model

use super::*;
use crate::Error;
use crate::app::services::schema_binder::{PropertyType, sample_schema};
use crate::constants::{ENTITY_SCHEMA_META, SAMPLE_SCHEMA_URI};

#[test]
fn test_parse_schema_document() {
    let schema = grid_schema();

    assert_eq!(schema.uri, "http://example.org/meta/0.1/grid");
    assert_eq!(schema.meta, ENTITY_SCHEMA_META);
    assert_eq!(schema.dimension_names().collect::<Vec<_>>(), ["ntimes", "nruns"]);

    let reading = schema.property("reading").unwrap();
    assert_eq!(reading.property_type, PropertyType::Float64);
    assert_eq!(reading.dims, ["ntimes", "nruns"]);
    assert_eq!(reading.unit.as_deref(), Some("Ohm"));

    let label = schema.property("label").unwrap();
    assert!(label.dims.is_empty());
    assert_eq!(label.unit, None);
}

#[test]
fn test_undeclared_dimension_rejected() {
    let json = GRID_SCHEMA_JSON.replace(r#"["ntimes", "nruns"]"#, r#"["ntimes", "nsamples"]"#);
    let error = EntitySchema::from_json_str(&json).unwrap_err();

    assert!(matches!(error, Error::Schema { .. }));
    assert!(error.to_string().contains("nsamples"));
}

#[test]
fn test_duplicate_property_rejected() {
    let json = GRID_SCHEMA_JSON.replace(r#""name": "runs""#, r#""name": "label""#);
    assert!(matches!(
        EntitySchema::from_json_str(&json),
        Err(Error::Schema { .. })
    ));
}

#[test]
fn test_unknown_property_type_rejected() {
    let json = GRID_SCHEMA_JSON.replace(r#""type": "string", "dims""#, r#""type": "int32", "dims""#);
    assert!(matches!(
        EntitySchema::from_json_str(&json),
        Err(Error::Json { .. })
    ));
}

#[test]
fn test_sample_schema_is_time_major() {
    let schema = sample_schema();
    assert!(schema.validate().is_ok());
    assert_eq!(schema.uri, SAMPLE_SCHEMA_URI);
    assert_eq!(schema.properties.len(), 15);

    for (name, dims) in [
        ("log_impedance", vec!["nimp", "nruns"]),
        ("impedance", vec!["nimp", "nruns"]),
        ("LPR", vec!["nlpr", "nruns"]),
        ("impedance_time", vec!["nimp"]),
        ("LPR_time", vec!["nlpr"]),
        ("Ecorr", vec!["nruns"]),
    ] {
        assert_eq!(schema.property(name).unwrap().dims, dims, "{}", name);
    }

    let substrates = schema
        .properties
        .iter()
        .filter(|property| property.name == "substrate")
        .count();
    assert_eq!(substrates, 1);
}

#[test]
fn test_sample_schema_json_round_trip() {
    let schema = sample_schema();
    let json = schema.to_json_pretty().unwrap();

    assert!(json.contains(r#""type": "float64""#));
    assert_eq!(EntitySchema::from_json_str(&json).unwrap(), schema);
}
