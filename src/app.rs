use crate::clock::{Clock, SystemClock};
use crate::dialogs::Dialogs;
use crate::domain::{format_short_date, format_time_12h, ScreenView};
use crate::notifications::{DesktopNotifier, Notifier};
use crate::persistence::ReminderConfig;
use crate::scheduler::ReminderScheduler;
use crate::store::{RecordStore, StoreError};
use anyhow::Result;
use chrono::{DateTime, Local};
use tracing::{debug, info, warn};
use uuid::Uuid;

const EDIT_TITLE: &str = "Edit Application Time";
const EDIT_MESSAGE: &str = "Enter new date and time (MM/dd/yyyy HH:mm):";

/// Main application state: wires user actions to the store and the scheduler
pub struct App<N: Notifier, C: Clock = SystemClock> {
    store: RecordStore,
    scheduler: ReminderScheduler,
    notifier: N,
    clock: C,
    /// What the screen currently shows (rebuilt by `refresh`)
    pub view: ScreenView,
    /// Selected row in `view.rows`
    pub selected_index: usize,
}

impl<N: Notifier, C: Clock> App<N, C> {
    pub fn new(store: RecordStore, config: ReminderConfig, notifier: N, clock: C) -> Self {
        Self {
            store,
            scheduler: ReminderScheduler::new(config),
            notifier,
            clock,
            view: ScreenView::default(),
            selected_index: 0,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }

    /// Load stored records and arm reminders for them.
    /// A bad file is reported as a warning and the app starts empty.
    pub fn startup(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        match self.store.load() {
            Ok(()) => {
                if !self.store.is_empty() {
                    self.reschedule();
                }
            }
            Err(e) => {
                warn!(error = %e, "starting with no records");
                dialogs.alert("Warning", &e.to_string(), "OK")?;
            }
        }

        self.refresh();
        Ok(())
    }

    /// Schedule the notification that triggers the host permission prompt
    pub fn request_notification_permission(&mut self) {
        let now = self.clock.now();
        self.scheduler.request_permission(&mut self.notifier, now);
    }

    /// Rebuild the screen view from the current records
    pub fn refresh(&mut self) {
        let now = self.clock.now();
        self.view = ScreenView::build(
            self.store.records(),
            now,
            self.scheduler.config().reminder_after(),
        );

        if self.selected_index >= self.view.rows.len() {
            self.selected_index = self.view.rows.len().saturating_sub(1);
        }
    }

    /// Record an application right now. No confirmation.
    pub fn record(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        let now = self.clock.now();
        self.record_at(dialogs, now)
    }

    /// Record an application at `timestamp`
    pub fn record_at(&mut self, dialogs: &mut dyn Dialogs, timestamp: DateTime<Local>) -> Result<()> {
        if let Err(e) = self.store.add(timestamp) {
            report_store_error(dialogs, &e)?;
        }
        info!(%timestamp, "application recorded");

        self.refresh_behind(dialogs);
        self.reschedule();

        dialogs.alert(
            "✅ Recorded!",
            &format!(
                "Minoxidil application recorded!\n\nTime: {}\nDate: {}\n\nNext reminder in {} hours!",
                format_time_12h(timestamp),
                format_short_date(timestamp),
                self.scheduler.config().reminder_hours
            ),
            "OK",
        )
    }

    /// Prompt for a new time for record `id`. Invalid input is dropped without a message.
    pub fn edit(&mut self, dialogs: &mut dyn Dialogs, id: Uuid) -> Result<()> {
        let Some(record) = self.store.get(id) else {
            return Ok(());
        };
        let initial = record.edit_text();

        let Some(answer) = dialogs.prompt(EDIT_TITLE, EDIT_MESSAGE, &initial)? else {
            return Ok(());
        };

        let changed = match self.store.update(id, &answer) {
            Ok(updated) => updated.is_some(),
            Err(e) => {
                report_store_error(dialogs, &e)?;
                true
            }
        };
        if !changed {
            return Ok(());
        }

        self.refresh_behind(dialogs);
        self.reschedule();

        if let Some(record) = self.store.get(id) {
            dialogs.alert(
                "✅ Updated!",
                &format!(
                    "Record updated successfully!\n\nNew Time: {}\nNew Date: {}",
                    format_time_12h(record.timestamp),
                    format_short_date(record.timestamp)
                ),
                "OK",
            )?;
        }
        Ok(())
    }

    /// Delete record `id` after confirmation
    pub fn delete(&mut self, dialogs: &mut dyn Dialogs, id: Uuid) -> Result<()> {
        let Some(record) = self.store.get(id) else {
            return Ok(());
        };

        let message = format!(
            "Are you sure you want to delete this record?\n\n{}",
            record.display_text()
        );
        if !dialogs.confirm("Confirm Deletion", &message, "Delete", "Cancel")? {
            return Ok(());
        }

        match self.store.remove(id) {
            Ok(true) => {}
            Ok(false) => return Ok(()),
            Err(e) => report_store_error(dialogs, &e)?,
        }

        self.refresh_behind(dialogs);
        self.reschedule();

        dialogs.alert("✅ Deleted!", "Record deleted successfully!", "OK")
    }

    /// Remove every record after confirmation
    pub fn clear_all(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        let confirmed = dialogs.confirm(
            "Confirm Clear All",
            "Are you sure you want to clear all application data?\n\nThis action cannot be undone.",
            "Clear All",
            "Cancel",
        )?;
        if !confirmed {
            return Ok(());
        }

        if let Err(e) = self.store.clear() {
            report_store_error(dialogs, &e)?;
        }

        self.refresh_behind(dialogs);
        self.reschedule();

        dialogs.alert("✅ Cleared!", "All data has been cleared successfully!", "OK")
    }

    pub fn settings(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        dialogs.alert("Settings", "Settings page coming soon!", "OK")
    }

    /// Periodic reminder check. Offers to record when the reminder window is open.
    pub fn poll_reminder(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        let latest = self.store.latest().map(|r| r.timestamp);
        let Some(prompt) = self.scheduler.poll(latest, self.clock.now()) else {
            return Ok(());
        };

        if dialogs.confirm(&prompt.title, &prompt.message, "Record Now", "Dismiss")? {
            self.record(dialogs)?;
        } else {
            info!("reminder dismissed");
        }
        Ok(())
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        self.view.rows.get(self.selected_index).map(|row| row.id)
    }

    pub fn edit_selected(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        match self.selected_id() {
            Some(id) => self.edit(dialogs, id),
            None => Ok(()),
        }
    }

    pub fn delete_selected(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        match self.selected_id() {
            Some(id) => self.delete(dialogs, id),
            None => Ok(()),
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.view.rows.len() {
            self.selected_index += 1;
        }
    }

    /// Rebuild the view and hand it to the host so result dialogs show the new state
    fn refresh_behind(&mut self, dialogs: &mut dyn Dialogs) {
        self.refresh();
        dialogs.show_screen(&self.view, self.selected_index);
    }

    /// Point the notifications at the current latest record
    fn reschedule(&mut self) {
        let latest = self.store.latest().map(|r| r.timestamp);
        self.scheduler.reschedule(&mut self.notifier, latest);
    }
}

impl<C: Clock> App<DesktopNotifier, C> {
    /// Deliver host notifications that have come due
    pub fn deliver_due_notifications(&mut self) {
        let now = self.clock.now();
        let delivered = self.notifier.fire_due(now);
        if !delivered.is_empty() {
            debug!(count = delivered.len(), "delivered due notifications");
        }
    }
}

fn report_store_error(dialogs: &mut dyn Dialogs, error: &StoreError) -> Result<()> {
    warn!(error = %error, "store operation failed");
    let title = match error {
        StoreError::Load(_) => "Warning",
        StoreError::Save(_) => "Error",
    };
    dialogs.alert(title, &error.to_string(), "OK")
}
