use crate::domain::ApplicationRecord;
use anyhow::{Context, Result};

/// Serialize records as an indented JSON array
pub fn serialize_records(records: &[ApplicationRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).context("Failed to serialize records")
}

/// Parse the records file. Blank content is an empty list.
pub fn parse_records(content: &str) -> Result<Vec<ApplicationRecord>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(content).context("Malformed records file")
}
