//! Notification delivery.
//! The desktop implementation only shells out on macOS; elsewhere due reminders are logged.

use anyhow::Result;
use chrono::{DateTime, Local};
#[cfg(target_os = "macos")]
use std::process::Command;
use tracing::{debug, info};

/// A one-shot notification request
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub fire_at: DateTime<Local>,
    pub returning_data: Option<String>,
}

/// Host notification service
pub trait Notifier {
    /// Schedule `request`, replacing any pending request with the same id
    fn show(&mut self, request: &NotificationRequest) -> Result<()>;

    /// Cancel every pending request. Safe to call with nothing pending.
    fn cancel_all(&mut self) -> Result<()>;
}

/// Keeps pending requests in memory and delivers them from the UI tick
#[derive(Debug, Default)]
pub struct DesktopNotifier {
    pending: Vec<NotificationRequest>,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn pending(&self) -> &[NotificationRequest] {
        &self.pending
    }

    /// Deliver and forget every request due at `now`
    pub fn fire_due(&mut self, now: DateTime<Local>) -> Vec<NotificationRequest> {
        let (due, waiting): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|request| request.fire_at <= now);
        self.pending = waiting;

        for request in &due {
            if let Err(e) = deliver(request) {
                tracing::warn!(id = request.id, error = %e, "notification delivery failed");
            }
        }

        due
    }
}

impl Notifier for DesktopNotifier {
    fn show(&mut self, request: &NotificationRequest) -> Result<()> {
        self.pending.retain(|pending| pending.id != request.id);
        self.pending.push(request.clone());
        debug!(id = request.id, fire_at = %request.fire_at, "notification scheduled");
        Ok(())
    }

    fn cancel_all(&mut self) -> Result<()> {
        if !self.pending.is_empty() {
            debug!(count = self.pending.len(), "cancelling pending notifications");
        }
        self.pending.clear();
        Ok(())
    }
}

/// Hand a due notification to the platform
fn deliver(request: &NotificationRequest) -> Result<()> {
    info!(id = request.id, title = %request.title, "delivering notification");

    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "{}""#,
            request.body.replace('"', "\\\""),
            request.title.replace('"', "\\\"")
        );

        let output = Command::new("osascript").arg("-e").arg(&script).output()?;
        if !output.status.success() {
            anyhow::bail!(
                "osascript failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn request(id: i32, fire_at: DateTime<Local>) -> NotificationRequest {
        NotificationRequest {
            id,
            title: "t".to_string(),
            body: "b".to_string(),
            fire_at,
            returning_data: None,
        }
    }

    #[test]
    fn test_show_replaces_same_id() {
        let base = Local.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).single().unwrap();
        let mut notifier = DesktopNotifier::new();

        notifier.show(&request(100, base)).unwrap();
        notifier.show(&request(100, base + Duration::hours(1))).unwrap();

        assert_eq!(notifier.pending().len(), 1);
        assert_eq!(notifier.pending()[0].fire_at, base + Duration::hours(1));
    }

    #[test]
    fn test_cancel_all_is_idempotent() {
        let mut notifier = DesktopNotifier::new();
        notifier.cancel_all().unwrap();
        notifier.cancel_all().unwrap();
        assert!(notifier.pending().is_empty());
    }

    #[test]
    fn test_fire_due_only_takes_due_requests() {
        let base = Local.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).single().unwrap();
        let mut notifier = DesktopNotifier::new();
        notifier.show(&request(100, base)).unwrap();
        notifier.show(&request(101, base + Duration::minutes(5))).unwrap();

        assert!(notifier.fire_due(base - Duration::seconds(1)).is_empty());

        let fired = notifier.fire_due(base + Duration::minutes(1));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].id, 100);
        assert_eq!(notifier.pending().len(), 1);

        let fired = notifier.fire_due(base + Duration::minutes(5));
        assert_eq!(fired[0].id, 101);
        assert!(notifier.pending().is_empty());
    }
}
