//! Binding of assembled sample records to the sample data model

use super::instance::{DimensionSizes, Instance, InstanceFactory, PropertyValue};
use super::schema::EntitySchema;
use crate::app::models::SampleRecord;
use crate::constants::{dimensions, properties};
use crate::Result;
use tracing::debug;

/// Dimension sizes of a record: `nruns`, `nimp`, `nlpr`
pub fn sample_dimensions(record: &SampleRecord) -> DimensionSizes {
    DimensionSizes::from([
        (dimensions::NRUNS.to_string(), record.nruns()),
        (dimensions::NIMP.to_string(), record.nimp()),
        (dimensions::NLPR.to_string(), record.nlpr()),
    ])
}

/// Create an instance of `schema` sized for `record` and assign every property
pub fn bind_sample<F: InstanceFactory>(
    record: &SampleRecord,
    schema: &EntitySchema,
    factory: &F,
) -> Result<F::Instance> {
    let dims = sample_dimensions(record);
    let mut instance = factory.instantiate(schema, &dims)?;

    let values: [(&str, PropertyValue); 15] = [
        (properties::SAMPLE, record.sample.clone().into()),
        (properties::RUN_ID, record.run_ids.clone().into()),
        (properties::DATE, record.dates.clone().into()),
        (properties::COMPOSITION, record.compositions.clone().into()),
        (properties::SUBSTRATE, record.substrates.clone().into()),
        (properties::IMPEDANCE_TIME, record.impedance_time.clone().into()),
        (properties::LOG_IMPEDANCE, record.log_impedance.clone().into()),
        (properties::IMPEDANCE, record.impedance.clone().into()),
        (properties::ECORR, record.ecorr.clone().into()),
        (properties::ICORR, record.icorr.clone().into()),
        (properties::BETA_A, record.beta_a.clone().into()),
        (properties::BETA_C, record.beta_c.clone().into()),
        (properties::FIT_ERROR, record.fit_error.clone().into()),
        (properties::LPR_TIME, record.lpr_time.clone().into()),
        (properties::LPR, record.lpr.clone().into()),
    ];
    for (name, value) in values {
        instance.set(name, value)?;
    }

    debug!(
        "Bound sample '{}' to {} ({:?})",
        record.sample,
        instance.schema_uri(),
        dims
    );
    Ok(instance)
}
