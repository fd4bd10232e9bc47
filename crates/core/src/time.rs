use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::schedule::week_start;

/// Source of "now" for schedule navigation.
///
/// Services take a `Clock` instead of reading system time so that the
/// current week can be pinned in tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// A clock stopped at midnight UTC of `date`.
    #[must_use]
    pub fn on_day(date: NaiveDate) -> Self {
        Self::Fixed(date.and_time(NaiveTime::MIN).and_utc())
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }

    /// Calendar date of `now()` in UTC.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Monday of the week containing `today()`.
    #[must_use]
    pub fn week_start(&self) -> NaiveDate {
        week_start(self.today())
    }
}
