//! Run identifier decomposition

use crate::app::models::RunIdentifier;
use crate::{Error, Result};

/// Parse a `date_composition[_composition2][_substrate]_suffix` run identifier
///
/// - 3 tokens: `date_composition_suffix`, substrate is empty
/// - 4 tokens: `date_composition_substrate_suffix`
/// - 5 tokens: `date_comp1_comp2_substrate_suffix`, composition is `comp1_comp2`
///
/// The trailing suffix token is discarded.
pub fn parse_run_identifier(text: &str) -> Result<RunIdentifier> {
    let tokens: Vec<&str> = text.trim().split('_').collect();

    let (date, composition, substrate) = match tokens.as_slice() {
        [date, composition, _] => (*date, composition.to_string(), ""),
        [date, composition, substrate, _] => (*date, composition.to_string(), *substrate),
        [date, comp1, comp2, substrate, _] => (*date, format!("{}_{}", comp1, comp2), *substrate),
        _ => {
            return Err(Error::format(format!(
                "Unexpected runid: '{}' ({} underscore-separated tokens, expected 3, 4 or 5)",
                text,
                tokens.len()
            )));
        }
    };

    Ok(RunIdentifier {
        date: date.to_string(),
        composition,
        substrate: substrate.to_string(),
    })
}
