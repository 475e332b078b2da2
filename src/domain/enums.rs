use chrono::{DateTime, Local};

/// Reminder cycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderState {
    /// No records, nothing scheduled
    Idle,
    /// Notifications are scheduled for `next_at`
    Pending { next_at: DateTime<Local> },
}

/// Fixed notification slots used with the host notifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationSlot {
    Primary,
    Backup,
    PermissionProbe,
}

impl NotificationSlot {
    pub fn id(&self) -> i32 {
        match self {
            NotificationSlot::Primary => 100,
            NotificationSlot::Backup => 101,
            NotificationSlot::PermissionProbe => 999,
        }
    }

    /// Data handed back by the host when the notification is opened
    pub fn returning_data(&self) -> Option<&'static str> {
        match self {
            NotificationSlot::Primary => Some("reminder"),
            NotificationSlot::Backup => Some("reminder_backup"),
            NotificationSlot::PermissionProbe => None,
        }
    }
}

/// Next-reminder label state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextReminder {
    /// No records
    NotApplicable,
    /// The reminder time has already passed
    Overdue,
    At(DateTime<Local>),
}
