pub mod enums;
pub mod record;
pub mod views;

pub use enums::{NextReminder, NotificationSlot, ReminderState};
pub use record::{format_short_date, format_time_12h, parse_edit_input, ApplicationRecord};
pub use views::{latest, RecordRow, ScreenView, Summary};
