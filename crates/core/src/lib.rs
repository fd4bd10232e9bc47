#![forbid(unsafe_code)]

pub mod model;
pub mod schedule;
pub mod time;

pub use time::Clock;
