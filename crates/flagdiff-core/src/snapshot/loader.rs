//! Document decoding for snapshots and catalogs.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{ExError, FlagDiffError, Result};
use crate::model::{ProjectFlag, Segment};

/// Decode a list of records from an array root or an object holding `field`.
pub(crate) fn parse_record_list<T: DeserializeOwned>(
    document: &str,
    bytes: &[u8],
    field: &str,
) -> std::result::Result<Vec<T>, FlagDiffError> {
    let text = std::str::from_utf8(bytes).map_err(|e| FlagDiffError::NotUtf8 {
        document: document.to_string(),
        reason: e.to_string(),
    })?;

    let raw: Value = serde_json::from_str(text).map_err(|e| FlagDiffError::NotJson {
        document: document.to_string(),
        reason: e.to_string(),
    })?;

    let items = match raw {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove(field) {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(FlagDiffError::UnexpectedRoot {
                    document: document.to_string(),
                    expected: format!("an object whose `{}` is an array", field),
                })
            }
            None => {
                return Err(FlagDiffError::MissingField {
                    document: document.to_string(),
                    field: field.to_string(),
                })
            }
        },
        _ => {
            return Err(FlagDiffError::UnexpectedRoot {
                document: document.to_string(),
                expected: format!("an array or an object with `{}`", field),
            })
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| FlagDiffError::InvalidRecord {
                document: document.to_string(),
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Decode a project-flag catalog (array, or object with `project_flags`).
///
/// # Errors
///
/// Same taxonomy as [`crate::snapshot::Snapshot::from_json_bytes`].
pub fn load_project_flags(document: &str, bytes: &[u8]) -> Result<Vec<ProjectFlag>> {
    parse_record_list(document, bytes, "project_flags")
        .map_err(|e| ExError::from(e).with_op("load_project_flags"))
}

/// Decode a segment catalog (array, or object with `segments`).
///
/// # Errors
///
/// Same taxonomy as [`crate::snapshot::Snapshot::from_json_bytes`].
pub fn load_segments(document: &str, bytes: &[u8]) -> Result<Vec<Segment>> {
    parse_record_list(document, bytes, "segments")
        .map_err(|e| ExError::from(e).with_op("load_segments"))
}
