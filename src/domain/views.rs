use super::enums::NextReminder;
use super::record::{format_short_date, format_time_12h, ApplicationRecord};
use chrono::{DateTime, Duration, Local, NaiveDate};
use uuid::Uuid;

/// Record with the greatest timestamp. Insertion order is irrelevant.
pub fn latest(records: &[ApplicationRecord]) -> Option<&ApplicationRecord> {
    records.iter().max_by_key(|r| r.timestamp)
}

/// Number of records whose local date is `date`
pub fn count_on(records: &[ApplicationRecord], date: NaiveDate) -> usize {
    records
        .iter()
        .filter(|r| r.timestamp.date_naive() == date)
        .count()
}

/// Records ordered newest first, for display only
pub fn sorted_newest_first(records: &[ApplicationRecord]) -> Vec<&ApplicationRecord> {
    let mut sorted: Vec<&ApplicationRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted
}

/// Summary values shown above the record list
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub today: usize,
    pub last_application: Option<DateTime<Local>>,
    pub next_reminder: NextReminder,
}

impl Summary {
    pub fn total_label(&self) -> String {
        format!("Total Applications: {}", self.total)
    }

    pub fn today_label(&self) -> String {
        format!("Today: {}", self.today)
    }

    pub fn last_application_label(&self) -> String {
        match self.last_application {
            Some(time) => format!(
                "Last Application: {} ({})",
                format_time_12h(time),
                format_short_date(time)
            ),
            None => "Last Application: Never".to_string(),
        }
    }

    pub fn next_reminder_label(&self) -> String {
        match self.next_reminder {
            NextReminder::At(time) => format!(
                "Next Reminder: {} ({})",
                format_time_12h(time),
                format_short_date(time)
            ),
            NextReminder::Overdue => "Next Reminder: Overdue".to_string(),
            NextReminder::NotApplicable => "Next Reminder: N/A".to_string(),
        }
    }
}

/// Compute the summary for `records` as seen at `now`
pub fn compute_summary(
    records: &[ApplicationRecord],
    now: DateTime<Local>,
    reminder_after: Duration,
) -> Summary {
    let last = latest(records).map(|r| r.timestamp);

    let next_reminder = match last {
        Some(time) => {
            let next = time + reminder_after;
            if next > now {
                NextReminder::At(next)
            } else {
                NextReminder::Overdue
            }
        }
        None => NextReminder::NotApplicable,
    };

    Summary {
        total: records.len(),
        today: count_on(records, now.date_naive()),
        last_application: last,
        next_reminder,
    }
}

/// One row of the record list
#[derive(Debug, Clone, PartialEq)]
pub struct RecordRow {
    pub id: Uuid,
    pub text: String,
}

/// Everything the screen shows, rebuilt on every refresh
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenView {
    pub summary: Summary,
    pub rows: Vec<RecordRow>,
}

impl ScreenView {
    pub fn build(records: &[ApplicationRecord], now: DateTime<Local>, reminder_after: Duration) -> Self {
        let rows = sorted_newest_first(records)
            .into_iter()
            .map(|r| RecordRow {
                id: r.id,
                text: r.display_text(),
            })
            .collect();

        Self {
            summary: compute_summary(records, now, reminder_after),
            rows,
        }
    }
}

impl Default for ScreenView {
    fn default() -> Self {
        Self {
            summary: Summary {
                total: 0,
                today: 0,
                last_application: None,
                next_reminder: NextReminder::NotApplicable,
            },
            rows: Vec::new(),
        }
    }
}
