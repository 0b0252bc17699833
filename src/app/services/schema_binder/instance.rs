//! Instance factory interfaces and the in-memory implementation
//!
//! A factory allocates an instance of a schema for concrete dimension
//! sizes. Properties are then assigned one at a time; every assignment is
//! checked against the declared type and the resolved shape.

use super::schema::{EntitySchema, PropertyType};
use crate::app::models::Matrix;
use crate::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Concrete sizes for the named dimensions of a schema
pub type DimensionSizes = BTreeMap<String, usize>;

/// Value assigned to an instance property
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    TextArray(Vec<String>),
    FloatArray(Vec<f64>),
    FloatMatrix(Matrix),
}

impl PropertyValue {
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::Text(_) | PropertyValue::TextArray(_) => PropertyType::String,
            PropertyValue::FloatArray(_) | PropertyValue::FloatMatrix(_) => PropertyType::Float64,
        }
    }

    /// Shape of the value, empty for scalars
    pub fn shape(&self) -> Vec<usize> {
        match self {
            PropertyValue::Text(_) => Vec::new(),
            PropertyValue::TextArray(values) => vec![values.len()],
            PropertyValue::FloatArray(values) => vec![values.len()],
            PropertyValue::FloatMatrix(matrix) => matrix.shape().to_vec(),
        }
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(values: Vec<String>) -> Self {
        PropertyValue::TextArray(values)
    }
}

impl From<Vec<f64>> for PropertyValue {
    fn from(values: Vec<f64>) -> Self {
        PropertyValue::FloatArray(values)
    }
}

impl From<Matrix> for PropertyValue {
    fn from(matrix: Matrix) -> Self {
        PropertyValue::FloatMatrix(matrix)
    }
}

/// Typed, dimensioned container created from a schema
pub trait Instance {
    /// URI of the schema this instance was created from
    fn schema_uri(&self) -> &str;

    /// Size of a named dimension
    fn dimension(&self, name: &str) -> Option<usize>;

    /// Assign a property; fails for undeclared names and mismatched type or shape
    fn set(&mut self, name: &str, value: PropertyValue) -> Result<()>;
}

/// Creates instances of a schema for concrete dimension sizes
pub trait InstanceFactory {
    type Instance: Instance;

    fn instantiate(&self, schema: &EntitySchema, dims: &DimensionSizes) -> Result<Self::Instance>;
}

/// Declared type and resolved shape of a property
#[derive(Debug, Clone, PartialEq)]
struct Slot {
    property_type: PropertyType,
    shape: Vec<usize>,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_name = match self.property_type {
            PropertyType::String => "string",
            PropertyType::Float64 => "float64",
        };
        write!(f, "{}{:?}", type_name, self.shape)
    }
}

/// In-memory instance
///
/// Serializes as `{"uri", "dimensions", "properties"}` with properties in
/// name order; unset properties are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityInstance {
    uri: String,
    dimensions: DimensionSizes,
    properties: BTreeMap<String, PropertyValue>,
    #[serde(skip)]
    slots: BTreeMap<String, Slot>,
}

impl EntityInstance {
    /// Value of an assigned property
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn dimensions(&self) -> &DimensionSizes {
        &self.dimensions
    }

    /// Declared properties that have not been assigned yet
    pub fn missing_properties(&self) -> Vec<&str> {
        self.slots
            .keys()
            .filter(|name| !self.properties.contains_key(name.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.len() == self.properties.len()
    }
}

impl Instance for EntityInstance {
    fn schema_uri(&self) -> &str {
        &self.uri
    }

    fn dimension(&self, name: &str) -> Option<usize> {
        self.dimensions.get(name).copied()
    }

    fn set(&mut self, name: &str, value: PropertyValue) -> Result<()> {
        let slot = self
            .slots
            .get(name)
            .ok_or_else(|| Error::unknown_property(&self.uri, name))?;

        let found = Slot {
            property_type: value.property_type(),
            shape: value.shape(),
        };
        if &found != slot {
            return Err(Error::shape_mismatch(
                name,
                slot.to_string(),
                found.to_string(),
            ));
        }

        self.properties.insert(name.to_string(), value);
        Ok(())
    }
}

/// Factory for [`EntityInstance`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryFactory;

impl InstanceFactory for MemoryFactory {
    type Instance = EntityInstance;

    fn instantiate(&self, schema: &EntitySchema, dims: &DimensionSizes) -> Result<EntityInstance> {
        schema.validate()?;

        let mut dimensions = DimensionSizes::new();
        for name in schema.dimension_names() {
            let size = dims.get(name).copied().ok_or_else(|| {
                Error::schema(&schema.uri, format!("no size given for dimension '{}'", name))
            })?;
            dimensions.insert(name.to_string(), size);
        }
        if let Some(extra) = dims.keys().find(|name| !dimensions.contains_key(name.as_str())) {
            return Err(Error::schema(
                &schema.uri,
                format!("unknown dimension '{}'", extra),
            ));
        }

        let slots = schema
            .properties
            .iter()
            .map(|property| {
                let shape = property.dims.iter().map(|dim| dimensions[dim]).collect();
                (
                    property.name.clone(),
                    Slot {
                        property_type: property.property_type,
                        shape,
                    },
                )
            })
            .collect();

        Ok(EntityInstance {
            uri: schema.uri.clone(),
            dimensions,
            properties: BTreeMap::new(),
            slots,
        })
    }
}
