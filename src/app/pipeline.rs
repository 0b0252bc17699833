//! Loader pipeline
//!
//! Table provider → record assembler → schema binder → collection sink.
//! A table is loaded completely or not at all: every record is assembled
//! and bound before the first instance is added to the sink.

use crate::Result;
use crate::app::adapters::table_provider::TableProvider;
use crate::app::models::SampleRecord;
use crate::app::services::record_assembler::RecordAssembler;
use crate::app::services::schema_binder::{
    CollectionSink, EntitySchema, InstanceFactory, bind_sample, sample_schema,
};
use crate::config::Config;
use crate::constants::{self, collection_label};
use serde::Serialize;
use tracing::{debug, info};

/// What one table contributed to a collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    /// Sheet rows read from the provider
    pub rows: usize,
    pub samples: usize,
    pub runs: usize,
    /// Impedance columns per sample (shared by every block of a table)
    pub nimp: usize,
    /// LPR columns per sample
    pub nlpr: usize,
    /// Collection labels in the order they were added
    pub labels: Vec<String>,
}

/// Configured pipeline from a table provider into a collection sink
#[derive(Debug, Clone)]
pub struct SampleLoader {
    assembler: RecordAssembler,
    schema: EntitySchema,
    label_prefix: String,
}

impl SampleLoader {
    pub fn new(assembler: RecordAssembler, schema: EntitySchema) -> Result<Self> {
        schema.validate()?;
        Ok(Self {
            assembler,
            schema,
            label_prefix: constants::COLLECTION_LABEL_PREFIX.to_string(),
        })
    }

    /// Loader for the sample data model with the configured sheet layout and labels
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let assembler = RecordAssembler::new(config.assembler.clone())?;
        Ok(Self::new(assembler, sample_schema())?.with_label_prefix(config.label_prefix.as_str()))
    }

    pub fn with_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.label_prefix = prefix.into();
        self
    }

    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    /// Load one table and add an instance per sample block to `sink`
    pub fn load<P, F, S>(&self, provider: &P, factory: &F, sink: &mut S) -> Result<LoadSummary>
    where
        P: TableProvider + ?Sized,
        F: InstanceFactory,
        S: CollectionSink<F::Instance> + ?Sized,
    {
        run(
            provider,
            &self.assembler,
            &self.schema,
            factory,
            sink,
            &self.label_prefix,
        )
    }
}

/// Load one table into `sink`, labelling instances `sample0`, `sample1`, ...
pub fn load_samples<P, F, S>(
    provider: &P,
    assembler: &RecordAssembler,
    schema: &EntitySchema,
    factory: &F,
    sink: &mut S,
) -> Result<LoadSummary>
where
    P: TableProvider + ?Sized,
    F: InstanceFactory,
    S: CollectionSink<F::Instance> + ?Sized,
{
    run(
        provider,
        assembler,
        schema,
        factory,
        sink,
        constants::COLLECTION_LABEL_PREFIX,
    )
}

fn run<P, F, S>(
    provider: &P,
    assembler: &RecordAssembler,
    schema: &EntitySchema,
    factory: &F,
    sink: &mut S,
    label_prefix: &str,
) -> Result<LoadSummary>
where
    P: TableProvider + ?Sized,
    F: InstanceFactory,
    S: CollectionSink<F::Instance> + ?Sized,
{
    let source = provider.source_name();
    let table = provider.load_table()?;
    debug!(
        "{}: {} rows, {} columns",
        source,
        table.nrows(),
        table.ncols()
    );

    let records = assembler.assemble(&table)?;
    let instances = records
        .iter()
        .map(|record| bind_sample(record, schema, factory))
        .collect::<Result<Vec<_>>>()?;

    let mut summary = LoadSummary {
        rows: table.nrows(),
        samples: records.len(),
        runs: records.iter().map(SampleRecord::nruns).sum(),
        nimp: records.first().map(SampleRecord::nimp).unwrap_or(0),
        nlpr: records.first().map(SampleRecord::nlpr).unwrap_or(0),
        labels: Vec::with_capacity(records.len()),
    };

    for (index, instance) in instances.into_iter().enumerate() {
        let label = collection_label(label_prefix, index);
        sink.add(label.clone(), instance)?;
        summary.labels.push(label);
    }

    info!(
        "{}: loaded {} samples ({} runs, nimp={}, nlpr={})",
        source, summary.samples, summary.runs, summary.nimp, summary.nlpr
    );
    Ok(summary)
}
