use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One year, the longest accepted reminder interval
const MAX_REMINDER_HOURS: i64 = 24 * 365;
/// One day, the upper bound of every minute-valued setting
const MAX_MINUTES: i64 = 24 * 60;
const MAX_PROBE_DELAY_SECS: i64 = 60 * 60;

/// Reminder timing, stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Hours after the latest application before a reminder is due
    pub reminder_hours: i64,
    /// Delay of the backup notification after the primary one
    pub backup_delay_minutes: i64,
    /// How often the in-app reminder check runs
    pub poll_interval_minutes: u64,
    /// How long after the reminder time the in-app check still prompts
    pub tolerance_minutes: i64,
    /// Delay of the startup notification that triggers the permission prompt
    pub permission_probe_delay_secs: i64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            reminder_hours: 24,
            backup_delay_minutes: 5,
            poll_interval_minutes: 5,
            tolerance_minutes: 5,
            permission_probe_delay_secs: 5,
        }
    }
}

impl ReminderConfig {
    pub fn reminder_after(&self) -> chrono::Duration {
        chrono::Duration::hours(self.reminder_hours)
    }

    pub fn backup_delay(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.backup_delay_minutes)
    }

    pub fn tolerance(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.tolerance_minutes)
    }

    pub fn permission_probe_delay(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.permission_probe_delay_secs)
    }

    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.poll_interval_minutes.saturating_mul(60))
    }

    /// Reject values the reminder arithmetic can't use
    pub fn validate(&self) -> Result<()> {
        check_range("reminder_hours", self.reminder_hours, 1, MAX_REMINDER_HOURS)?;
        check_range("backup_delay_minutes", self.backup_delay_minutes, 0, MAX_MINUTES)?;
        check_range("tolerance_minutes", self.tolerance_minutes, 0, MAX_MINUTES)?;
        check_range(
            "permission_probe_delay_secs",
            self.permission_probe_delay_secs,
            0,
            MAX_PROBE_DELAY_SECS,
        )?;
        if self.poll_interval_minutes == 0 || self.poll_interval_minutes > MAX_MINUTES as u64 {
            bail!(
                "poll_interval_minutes must be between 1 and {}, got {}",
                MAX_MINUTES,
                self.poll_interval_minutes
            );
        }
        Ok(())
    }
}

fn check_range(name: &str, value: i64, min: i64, max: i64) -> Result<()> {
    if value < min || value > max {
        bail!("{} must be between {} and {}, got {}", name, min, max, value);
    }
    Ok(())
}

/// Load config from config.json, defaults if the file doesn't exist
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ReminderConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(ReminderConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: ReminderConfig = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    Ok(config)
}

/// Save config to config.json
pub fn save_config<P: AsRef<Path>>(path: P, config: &ReminderConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}
