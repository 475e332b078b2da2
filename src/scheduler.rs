use crate::domain::{NotificationSlot, ReminderState};
use crate::notifications::{NotificationRequest, Notifier};
use crate::persistence::ReminderConfig;
use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

pub const REMINDER_TITLE: &str = "⏰ Minoxidil Reminder";
const BACKUP_BODY: &str = "Reminder: Time for your minoxidil application!";
const PROBE_TITLE: &str = "Minoxidil Tracker";
const PROBE_BODY: &str = "Please allow notifications to receive reminders";

/// In-app reminder surfaced by the poll
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderPrompt {
    pub title: String,
    pub message: String,
    pub hours_since: i64,
}

/// Keeps the host notifications in step with the latest record
#[derive(Debug)]
pub struct ReminderScheduler {
    config: ReminderConfig,
    state: ReminderState,
}

impl ReminderScheduler {
    pub fn new(config: ReminderConfig) -> Self {
        Self {
            config,
            state: ReminderState::Idle,
        }
    }

    pub fn state(&self) -> ReminderState {
        self.state
    }

    pub fn config(&self) -> &ReminderConfig {
        &self.config
    }

    /// When a reminder is due for an application at `latest`
    pub fn next_reminder(&self, latest: DateTime<Local>) -> DateTime<Local> {
        latest + self.config.reminder_after()
    }

    /// Cancel everything, then schedule primary and backup for `latest` (if any).
    /// Notifier failures are logged, never returned.
    pub fn reschedule(&mut self, notifier: &mut dyn Notifier, latest: Option<DateTime<Local>>) {
        if let Err(e) = notifier.cancel_all() {
            warn!(error = %e, "failed to cancel notifications");
        }

        let Some(latest) = latest else {
            self.state = ReminderState::Idle;
            debug!("no records, reminders idle");
            return;
        };

        let next_at = self.next_reminder(latest);
        let requests = [
            reminder_request(
                NotificationSlot::Primary,
                &reminder_message(self.config.reminder_hours),
                next_at,
            ),
            reminder_request(
                NotificationSlot::Backup,
                BACKUP_BODY,
                next_at + self.config.backup_delay(),
            ),
        ];

        for request in &requests {
            if let Err(e) = notifier.show(request) {
                warn!(id = request.id, error = %e, "failed to schedule notification");
            }
        }

        self.state = ReminderState::Pending { next_at };
        info!(%next_at, "next reminder scheduled");
    }

    /// Schedule the one-off notification that makes the host ask for permission
    pub fn request_permission(&self, notifier: &mut dyn Notifier, now: DateTime<Local>) {
        let request = NotificationRequest {
            id: NotificationSlot::PermissionProbe.id(),
            title: PROBE_TITLE.to_string(),
            body: PROBE_BODY.to_string(),
            fire_at: now + self.config.permission_probe_delay(),
            returning_data: None,
        };

        if let Err(e) = notifier.show(&request) {
            warn!(error = %e, "notification permission request failed");
        }
    }

    /// Periodic check: a prompt when `now` is inside the window right after the reminder time
    pub fn poll(&self, latest: Option<DateTime<Local>>, now: DateTime<Local>) -> Option<ReminderPrompt> {
        let latest = latest?;
        let next_at = self.next_reminder(latest);

        if now < next_at || now > next_at + self.config.tolerance() {
            return None;
        }

        let hours_since = (now - latest).num_hours();
        debug!(hours_since, "reminder window reached");

        Some(ReminderPrompt {
            title: REMINDER_TITLE.to_string(),
            message: reminder_message(hours_since),
            hours_since,
        })
    }
}

fn reminder_message(hours: i64) -> String {
    format!(
        "It's been {} hours since your last application. Time for your next minoxidil application!",
        hours
    )
}

fn reminder_request(slot: NotificationSlot, body: &str, fire_at: DateTime<Local>) -> NotificationRequest {
    NotificationRequest {
        id: slot.id(),
        title: REMINDER_TITLE.to_string(),
        body: body.to_string(),
        fire_at,
        returning_data: slot.returning_data().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::testing::{NotifierCall, RecordingNotifier};
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, s).single().unwrap()
    }

    #[test]
    fn test_reschedule_cancels_then_schedules_two() {
        let mut scheduler = ReminderScheduler::new(ReminderConfig::default());
        let mut notifier = RecordingNotifier::default();
        let latest = at(2024, 1, 1, 9, 0, 0);

        scheduler.reschedule(&mut notifier, Some(latest));

        assert_eq!(notifier.calls.len(), 3);
        assert_eq!(notifier.calls[0], NotifierCall::CancelAll);
        assert_eq!(
            notifier.calls[1],
            NotifierCall::Show(NotificationRequest {
                id: 100,
                title: REMINDER_TITLE.to_string(),
                body: "It's been 24 hours since your last application. Time for your next minoxidil application!"
                    .to_string(),
                fire_at: at(2024, 1, 2, 9, 0, 0),
                returning_data: Some("reminder".to_string()),
            })
        );
        assert_eq!(
            notifier.calls[2],
            NotifierCall::Show(NotificationRequest {
                id: 101,
                title: REMINDER_TITLE.to_string(),
                body: BACKUP_BODY.to_string(),
                fire_at: at(2024, 1, 2, 9, 5, 0),
                returning_data: Some("reminder_backup".to_string()),
            })
        );
        assert_eq!(
            scheduler.state(),
            ReminderState::Pending {
                next_at: at(2024, 1, 2, 9, 0, 0)
            }
        );
    }

    #[test]
    fn test_reschedule_empty_goes_idle() {
        let mut scheduler = ReminderScheduler::new(ReminderConfig::default());
        let mut notifier = RecordingNotifier::default();
        scheduler.reschedule(&mut notifier, Some(at(2024, 1, 1, 9, 0, 0)));
        notifier.calls.clear();

        scheduler.reschedule(&mut notifier, None);

        assert_eq!(notifier.calls, vec![NotifierCall::CancelAll]);
        assert_eq!(scheduler.state(), ReminderState::Idle);
    }

    #[test]
    fn test_reschedule_survives_notifier_failure() {
        let mut scheduler = ReminderScheduler::new(ReminderConfig::default());
        let mut notifier = RecordingNotifier::failing();

        scheduler.reschedule(&mut notifier, Some(at(2024, 1, 1, 9, 0, 0)));

        assert_eq!(notifier.calls.len(), 3);
        assert!(matches!(scheduler.state(), ReminderState::Pending { .. }));
    }

    #[test]
    fn test_request_permission() {
        let scheduler = ReminderScheduler::new(ReminderConfig::default());
        let mut notifier = RecordingNotifier::default();
        let now = at(2024, 1, 1, 9, 0, 0);

        scheduler.request_permission(&mut notifier, now);

        match &notifier.calls[..] {
            [NotifierCall::Show(request)] => {
                assert_eq!(request.id, 999);
                assert_eq!(request.fire_at, now + Duration::seconds(5));
            }
            other => panic!("unexpected calls: {:?}", other),
        }
    }

    #[test]
    fn test_poll_window() {
        let scheduler = ReminderScheduler::new(ReminderConfig::default());
        let latest = Some(at(2024, 1, 1, 9, 0, 0));

        assert!(scheduler.poll(latest, at(2024, 1, 2, 8, 59, 59)).is_none());
        assert!(scheduler.poll(latest, at(2024, 1, 2, 9, 0, 0)).is_some());
        assert!(scheduler.poll(latest, at(2024, 1, 2, 9, 5, 0)).is_some());
        assert!(scheduler.poll(latest, at(2024, 1, 2, 9, 5, 1)).is_none());
        assert!(scheduler.poll(None, at(2024, 1, 2, 9, 2, 0)).is_none());
    }

    #[test]
    fn test_poll_prompt_message() {
        let scheduler = ReminderScheduler::new(ReminderConfig::default());
        let prompt = scheduler
            .poll(Some(at(2024, 1, 1, 9, 0, 0)), at(2024, 1, 2, 9, 2, 0))
            .unwrap();

        assert_eq!(prompt.title, "⏰ Minoxidil Reminder");
        assert_eq!(prompt.hours_since, 24);
        assert!(prompt.message.starts_with("It's been 24 hours"));
    }

    #[test]
    fn test_configured_window() {
        let config = ReminderConfig {
            reminder_hours: 12,
            tolerance_minutes: 30,
            ..ReminderConfig::default()
        };
        let scheduler = ReminderScheduler::new(config);
        let latest = Some(at(2024, 1, 1, 9, 0, 0));

        assert!(scheduler.poll(latest, at(2024, 1, 1, 21, 25, 0)).is_some());
        assert!(scheduler.poll(latest, at(2024, 1, 1, 21, 31, 0)).is_none());
    }

    #[test]
    fn test_primary_body_uses_configured_hours() {
        let config = ReminderConfig {
            reminder_hours: 12,
            ..ReminderConfig::default()
        };
        let mut scheduler = ReminderScheduler::new(config);
        let mut notifier = RecordingNotifier::default();

        scheduler.reschedule(&mut notifier, Some(at(2024, 1, 1, 9, 0, 0)));

        match &notifier.calls[..] {
            [NotifierCall::CancelAll, NotifierCall::Show(primary), NotifierCall::Show(backup)] => {
                assert_eq!(primary.id, 100);
                assert!(primary.body.starts_with("It's been 12 hours"));
                assert_eq!(primary.fire_at, at(2024, 1, 1, 21, 0, 0));
                assert_eq!(backup.body, BACKUP_BODY);
            }
            other => panic!("unexpected calls: {:?}", other),
        }
    }
}
