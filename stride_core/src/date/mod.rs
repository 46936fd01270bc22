//! Calendar-unit progressions (year through millisecond).

pub mod parse;
pub mod progression;
pub mod unit;

pub use parse::parse_instant;
pub use progression::{
    DateProgression, DateProgressionIter, DayProgression, HourProgression, MillisecondProgression,
    MinuteProgression, MonthProgression, SecondProgression, YearProgression,
};
pub use unit::{CalendarUnit, DateUnit, Days, Hours, Millis, Minutes, Months, Seconds, Years};
