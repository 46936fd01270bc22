#![forbid(unsafe_code)]

//! Typed arithmetic progressions over integers, characters and calendar units.
//!
//! This crate provides:
//! - A widening numeric trait shared by every integral element type
//! - Last-element computation for stepped ranges
//! - Progressions (first, last, step) with lazy, restartable iteration
//! - Inclusive unit-step ranges with constant-time membership
//! - Calendar-unit progressions (year through millisecond)
//! - Configuration and logging for the `stride` binary

pub mod error;
pub mod num;
pub mod bounds;
pub mod progression;
pub mod range;
pub mod date;
pub mod ext;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use num::Integral;
pub use bounds::last_element;
pub use progression::{Progression, ProgressionIter, ProgressionOptions};
pub use range::ClosedRange;
pub use date::{
    parse_instant, CalendarUnit, DateProgression, DateProgressionIter, DateUnit,
    DayProgression, HourProgression, MillisecondProgression, MinuteProgression, MonthProgression,
    SecondProgression, YearProgression,
};
pub use ext::{DateTimeExt, IntegralExt};
pub use config::Config;
