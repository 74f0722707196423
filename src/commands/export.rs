//! Backup export: the whole document as pretty-printed JSON, named so
//! successive backups sort by date.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::model::Document;

/// Serializes the document exactly as it is stored, so an export re-imported
/// with replace mode round-trips losslessly.
pub fn to_json(doc: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

pub fn backup_file_name(at: DateTime<Utc>) -> String {
    format!("linkstash-backup-{}.json", at.format("%Y-%m-%d"))
}
