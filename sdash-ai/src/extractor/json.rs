//! JSON documents

use super::{ExtractError, FileFormat};
use serde_json::Value;

/// Array elements, object values in document order, or the scalar itself
pub(super) fn fragments(content: &str) -> Result<Vec<String>, ExtractError> {
    let root: Value =
        serde_json::from_str(content).map_err(|e| ExtractError::malformed(FileFormat::Json, e))?;

    let fragments = match root {
        Value::Array(items) => items.into_iter().map(stringify).collect(),
        Value::Object(map) => map.into_iter().map(|(_, value)| stringify(value)).collect(),
        scalar => vec![stringify(scalar)],
    };
    Ok(fragments)
}

/// Strings verbatim, everything else as compact JSON text
fn stringify(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
