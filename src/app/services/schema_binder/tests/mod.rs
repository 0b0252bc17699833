//! Test fixtures for schema binding

use crate::app::services::schema_binder::{DimensionSizes, EntitySchema};

mod schema_tests;

/// A small two-dimensional schema in the JSON document format
pub const GRID_SCHEMA_JSON: &str = r#"{
    "uri": "http://example.org/meta/0.1/grid",
    "description": "Readings on a time/run grid",
    "dimensions": [
        {"name": "ntimes", "description": "Number of times."},
        {"name": "nruns"}
    ],
    "properties": [
        {"name": "label", "type": "string", "description": "Grid label."},
        {"name": "runs", "type": "string", "dims": ["nruns"]},
        {"name": "time", "type": "float64", "dims": ["ntimes"], "unit": "h"},
        {"name": "reading", "type": "float64", "dims": ["ntimes", "nruns"], "unit": "Ohm"}
    ]
}"#;

pub fn grid_schema() -> EntitySchema {
    EntitySchema::from_json_str(GRID_SCHEMA_JSON).unwrap()
}

pub fn grid_dims(ntimes: usize, nruns: usize) -> DimensionSizes {
    DimensionSizes::from([
        ("ntimes".to_string(), ntimes),
        ("nruns".to_string(), nruns),
    ])
}
