//! Declarative entity schemas
//!
//! A schema names its dimensions and declares each property with a type,
//! an optional unit and the dimensions its value spans. Schemas are JSON
//! documents of the form
//!
//! ```json
//! {
//!   "uri": "http://vipcoat.eu/meta/0.1/sample",
//!   "meta": "http://onto-ns.com/meta/0.3/EntitySchema",
//!   "description": "Datamodel for a sample",
//!   "dimensions": [{"name": "nruns", "description": "Number of runs."}],
//!   "properties": [{"name": "RunID", "type": "string", "dims": ["nruns"]}]
//! }
//! ```

use crate::constants::{self, dimensions, properties};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Value type of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Float64,
}

/// Named dimension of a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Property declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,

    #[serde(rename = "type")]
    pub property_type: PropertyType,

    /// Dimensions spanned by the value, outermost first; empty for scalars
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dims: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(default)]
    pub description: String,
}

/// Declarative description of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySchema {
    pub uri: String,

    #[serde(default = "default_meta")]
    pub meta: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub dimensions: Vec<Dimension>,

    pub properties: Vec<Property>,
}

fn default_meta() -> String {
    constants::ENTITY_SCHEMA_META.to_string()
}

impl EntitySchema {
    /// Parse and validate a schema from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let schema: EntitySchema = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Pretty-printed JSON representation
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::json(format!("Failed to serialize schema {}", self.uri), e))
    }

    /// Check that names are unique and every property spans declared dimensions
    pub fn validate(&self) -> Result<()> {
        if self.uri.trim().is_empty() {
            return Err(Error::schema(&self.uri, "uri cannot be empty"));
        }

        let mut dimension_names = HashSet::new();
        for dimension in &self.dimensions {
            if !dimension_names.insert(dimension.name.as_str()) {
                return Err(Error::schema(
                    &self.uri,
                    format!("duplicate dimension '{}'", dimension.name),
                ));
            }
        }

        let mut property_names = HashSet::new();
        for property in &self.properties {
            if !property_names.insert(property.name.as_str()) {
                return Err(Error::schema(
                    &self.uri,
                    format!("duplicate property '{}'", property.name),
                ));
            }
            if let Some(dim) = property
                .dims
                .iter()
                .find(|dim| !dimension_names.contains(dim.as_str()))
            {
                return Err(Error::schema(
                    &self.uri,
                    format!(
                        "property '{}' refers to undeclared dimension '{}'",
                        property.name, dim
                    ),
                ));
            }
        }

        Ok(())
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name == name)
    }

    pub fn dimension_names(&self) -> impl Iterator<Item = &str> {
        self.dimensions.iter().map(|dimension| dimension.name.as_str())
    }
}

fn dimension(name: &str, description: &str) -> Dimension {
    Dimension {
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn property(
    name: &str,
    property_type: PropertyType,
    dims: &[&str],
    unit: Option<&str>,
    description: &str,
) -> Property {
    Property {
        name: name.to_string(),
        property_type,
        dims: dims.iter().map(|dim| dim.to_string()).collect(),
        unit: unit.map(str::to_string),
        description: description.to_string(),
    }
}

/// The sample data model
///
/// Measurement tables are time-major: `[nimp, nruns]` and `[nlpr, nruns]`.
pub fn sample_schema() -> EntitySchema {
    use PropertyType::{Float64, String as Text};
    use dimensions::{NIMP, NLPR, NRUNS};

    EntitySchema {
        uri: constants::SAMPLE_SCHEMA_URI.to_string(),
        meta: constants::ENTITY_SCHEMA_META.to_string(),
        description: "Datamodel for a sample".to_string(),
        dimensions: vec![
            dimension(NRUNS, "Number of runs."),
            dimension(NIMP, "Number of impedance measurements."),
            dimension(NLPR, "Number of LPR measurements."),
        ],
        properties: vec![
            property(properties::SAMPLE, Text, &[], None, "Sample name."),
            property(properties::RUN_ID, Text, &[NRUNS], None, "ID for the different runs."),
            property(properties::DATE, Text, &[NRUNS], None, "Date of each run."),
            property(properties::COMPOSITION, Text, &[NRUNS], None, "Composition of each run."),
            property(properties::SUBSTRATE, Text, &[NRUNS], None, "The substrate for each run."),
            property(
                properties::IMPEDANCE_TIME,
                Float64,
                &[NIMP],
                Some("h"),
                "Duration of the different impedance measurements.",
            ),
            property(
                properties::LOG_IMPEDANCE,
                Float64,
                &[NIMP, NRUNS],
                Some("log(Ohm)"),
                "Logarithm of measured impedance for each time and run.",
            ),
            property(
                properties::IMPEDANCE,
                Float64,
                &[NIMP, NRUNS],
                Some("Ohm"),
                "Measured impedance for each time and run.",
            ),
            property(
                properties::ECORR,
                Float64,
                &[NRUNS],
                Some("mV"),
                "Measured corrosion voltage for each run.",
            ),
            property(
                properties::ICORR,
                Float64,
                &[NRUNS],
                Some("uA"),
                "Measured corrosion current for each run.",
            ),
            property(properties::BETA_A, Float64, &[NRUNS], Some("mV"), "Beta_a for each run."),
            property(properties::BETA_C, Float64, &[NRUNS], Some("mV"), "Beta_c for each run."),
            property(properties::FIT_ERROR, Float64, &[NRUNS], None, "Fit error for each run."),
            property(
                properties::LPR_TIME,
                Float64,
                &[NLPR],
                Some("h"),
                "Time for each LPR measurement.",
            ),
            property(
                properties::LPR,
                Float64,
                &[NLPR, NRUNS],
                None,
                "LPR for each time and run.",
            ),
        ],
    }
}
