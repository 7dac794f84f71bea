//! Loader for the reference drive offset list.
//!
//! The list is a JSON array of `[name, offset, submissions, score]` arrays,
//! the layout of the published AccurateRip drive offset table. Numbers may be
//! written as integers or floats; the submission count is ignored.

use crate::error::{Error, Result};
use crate::types::DriveEntry;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawDrive(String, Value, #[allow(dead_code)] Value, Value);

/// Load drive entries from a JSON file, preserving file order
pub fn load_drive_database<P: AsRef<Path>>(path: P) -> Result<Vec<DriveEntry>> {
    let content = fs::read_to_string(path)?;
    parse_drive_database_str(&content)
}

/// Parse drive entries from a JSON string (useful for testing)
pub fn parse_drive_database_str(content: &str) -> Result<Vec<DriveEntry>> {
    let raw: Vec<RawDrive> = serde_json::from_str(content)?;

    raw.into_iter()
        .enumerate()
        .map(|(i, RawDrive(name, offset, _, score))| -> Result<DriveEntry> {
            Ok(DriveEntry {
                offset: as_integer(&offset)
                    .ok_or_else(|| invalid_field(i, &name, "offset", &offset))?,
                score: as_integer(&score).ok_or_else(|| invalid_field(i, &name, "score", &score))?,
                name,
            })
        })
        .collect()
}

fn as_integer(value: &Value) -> Option<i32> {
    if let Some(n) = value.as_i64() {
        return i32::try_from(n).ok();
    }
    let f = value.as_f64()?;
    if !f.is_finite() || f < i32::MIN as f64 || f > i32::MAX as f64 {
        return None;
    }
    Some(f.trunc() as i32)
}

fn invalid_field(index: usize, name: &str, field: &str, value: &Value) -> Error {
    Error::DriveDatabase(format!(
        "entry {} ('{}'): invalid {} value {}",
        index, name, field, value
    ))
}
