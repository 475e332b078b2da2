use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Format accepted when the user edits a record's time
pub const EDIT_FORMAT: &str = "%m/%d/%Y %H:%M";

/// 12-hour clock time, e.g. "09:05:00 PM"
const TIME_12H_FORMAT: &str = "%I:%M:%S %p";

/// Short date, e.g. "Jan 02, 2024"
const SHORT_DATE_FORMAT: &str = "%b %d, %Y";

/// A single logged application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    /// In-memory identity (not persisted)
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    /// When the application happened
    #[serde(rename = "DateTime", with = "timestamp")]
    pub timestamp: DateTime<Local>,
}

impl ApplicationRecord {
    pub fn new(timestamp: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
        }
    }

    /// List text: "09:00:00 AM - Jan 01, 2024"
    pub fn display_text(&self) -> String {
        format!(
            "{} - {}",
            format_time_12h(self.timestamp),
            format_short_date(self.timestamp)
        )
    }

    /// Value used to pre-fill the edit prompt
    pub fn edit_text(&self) -> String {
        self.timestamp.format(EDIT_FORMAT).to_string()
    }
}

pub fn format_time_12h(time: DateTime<Local>) -> String {
    time.format(TIME_12H_FORMAT).to_string()
}

pub fn format_short_date(time: DateTime<Local>) -> String {
    time.format(SHORT_DATE_FORMAT).to_string()
}

/// Parse user input in `MM/dd/yyyy HH:mm` as a local time.
/// Returns None for anything that doesn't parse or doesn't exist locally (DST gaps).
pub fn parse_edit_input(input: &str) -> Option<DateTime<Local>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let naive = NaiveDateTime::parse_from_str(trimmed, EDIT_FORMAT).ok()?;
    Local.from_local_datetime(&naive).earliest()
}

/// Persisted timestamp format.
/// Written as RFC 3339 with the local offset; read back with or without an offset.
mod timestamp {
    use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const OFFSETLESS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S>(value: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, false))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;

        if let Ok(with_offset) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(with_offset.with_timezone(&Local));
        }

        NaiveDateTime::parse_from_str(&raw, OFFSETLESS_FORMAT)
            .ok()
            .and_then(|naive| Local.from_local_datetime(&naive).earliest())
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}
