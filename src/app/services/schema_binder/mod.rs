//! Schema binding for assembled sample records
//!
//! Records are handed to a schema/instance factory that allocates a typed,
//! dimensioned container from a declarative schema, then filled property by
//! property and added to a collection.
//!
//! - [`schema`] - declarative entity schemas and the built-in sample data model
//! - [`instance`] - the factory/instance interfaces and an in-memory implementation
//! - [`collection`] - the collection sink interface and an ordered in-memory collection
//! - [`binder`] - mapping of a [`SampleRecord`](crate::app::models::SampleRecord) onto the sample schema

pub mod binder;
pub mod collection;
pub mod instance;
pub mod schema;

#[cfg(test)]
mod tests;

pub use binder::{bind_sample, sample_dimensions};
pub use collection::{Collection, CollectionSink};
pub use instance::{
    DimensionSizes, EntityInstance, Instance, InstanceFactory, MemoryFactory, PropertyValue,
};
pub use schema::{Dimension, EntitySchema, Property, PropertyType, sample_schema};
