mod sample;
mod service;
mod week;

// Public API of the schedule subsystem.
pub use crate::error::ScheduleError;
pub use sample::sample_trainings;
pub use service::ScheduleService;
pub use week::{DataSource, DaySchedule, ScheduledSession, WeekSchedule};
