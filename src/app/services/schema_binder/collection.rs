//! Collections of labelled instances

use crate::{Error, Result};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::collections::HashMap;

/// Destination for bound instances
pub trait CollectionSink<I> {
    /// Add an instance under a unique label
    fn add(&mut self, label: String, instance: I) -> Result<()>;
}

/// Insertion-ordered in-memory collection
///
/// Serializes as a JSON object keyed by label, in insertion order.
#[derive(Debug, Clone)]
pub struct Collection<I> {
    entries: Vec<(String, I)>,
    index: HashMap<String, usize>,
}

impl<I> Default for Collection<I> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<I> Collection<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&I> {
        self.index.get(label).map(|&position| &self.entries[position].1)
    }

    /// Labels in insertion order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &I)> {
        self.entries
            .iter()
            .map(|(label, instance)| (label.as_str(), instance))
    }
}

impl<I> CollectionSink<I> for Collection<I> {
    fn add(&mut self, label: String, instance: I) -> Result<()> {
        if self.index.contains_key(&label) {
            return Err(Error::duplicate_label(label));
        }
        self.index.insert(label.clone(), self.entries.len());
        self.entries.push((label, instance));
        Ok(())
    }
}

impl<I: Serialize> Serialize for Collection<I> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, instance) in &self.entries {
            map.serialize_entry(label, instance)?;
        }
        map.end()
    }
}
