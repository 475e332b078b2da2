use chrono::{DateTime, Local};

/// Source of the current local time, so reminder logic can be driven from tests
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Manually advanced clock for tests
#[cfg(test)]
pub mod testing {
    use super::*;
    use std::cell::Cell;

    pub struct FixedClock(Cell<DateTime<Local>>);

    impl FixedClock {
        pub fn new(now: DateTime<Local>) -> Self {
            Self(Cell::new(now))
        }

        pub fn set(&self, now: DateTime<Local>) {
            self.0.set(now);
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Local> {
            self.0.get()
        }
    }
}
