//! Calendar units and their arithmetic.
//!
//! Each unit knows how to truncate an instant to its own resolution, count
//! whole units between two truncated instants, and add a signed number of
//! units. All three are pure: they return new values and never mutate.

use crate::{Error, Result};
use chrono::{Datelike, Months as MonthSpan, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

const NANOS_PER_MILLI: u32 = 1_000_000;

/// Granularity of a calendar progression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl DateUnit {
    pub const ALL: [DateUnit; 7] = [
        DateUnit::Year,
        DateUnit::Month,
        DateUnit::Day,
        DateUnit::Hour,
        DateUnit::Minute,
        DateUnit::Second,
        DateUnit::Millisecond,
    ];

    /// Drop every field finer than this unit.
    pub fn truncate(self, instant: NaiveDateTime) -> Option<NaiveDateTime> {
        let date = instant.date();
        match self {
            DateUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)?.and_hms_opt(0, 0, 0),
            DateUnit::Month => {
                NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?.and_hms_opt(0, 0, 0)
            }
            DateUnit::Day => date.and_hms_opt(0, 0, 0),
            DateUnit::Hour => date.and_hms_opt(instant.hour(), 0, 0),
            DateUnit::Minute => date.and_hms_opt(instant.hour(), instant.minute(), 0),
            DateUnit::Second => instant.with_nanosecond(0),
            DateUnit::Millisecond => {
                instant.with_nanosecond(instant.nanosecond() / NANOS_PER_MILLI * NANOS_PER_MILLI)
            }
        }
    }

    /// Whole units from `from` to `to`. Both must already be truncated to
    /// this unit.
    pub fn between(self, from: NaiveDateTime, to: NaiveDateTime) -> i64 {
        let elapsed = to.signed_duration_since(from);
        match self {
            DateUnit::Year => i64::from(to.year()) - i64::from(from.year()),
            DateUnit::Month => month_index(to) - month_index(from),
            DateUnit::Day => elapsed.num_days(),
            DateUnit::Hour => elapsed.num_hours(),
            DateUnit::Minute => elapsed.num_minutes(),
            DateUnit::Second => elapsed.num_seconds(),
            DateUnit::Millisecond => elapsed.num_milliseconds(),
        }
    }

    /// `instant` moved by `amount` units; `None` outside chrono's range.
    pub fn add(self, instant: NaiveDateTime, amount: i64) -> Option<NaiveDateTime> {
        match self {
            DateUnit::Year => add_months(instant, amount.checked_mul(12)?),
            DateUnit::Month => add_months(instant, amount),
            DateUnit::Day => instant.checked_add_signed(TimeDelta::try_days(amount)?),
            DateUnit::Hour => instant.checked_add_signed(TimeDelta::try_hours(amount)?),
            DateUnit::Minute => instant.checked_add_signed(TimeDelta::try_minutes(amount)?),
            DateUnit::Second => instant.checked_add_signed(TimeDelta::try_seconds(amount)?),
            DateUnit::Millisecond => {
                instant.checked_add_signed(TimeDelta::try_milliseconds(amount)?)
            }
        }
    }

    /// strftime pattern that shows an instant at this unit's resolution.
    pub fn default_format(self) -> &'static str {
        match self {
            DateUnit::Year => "%Y",
            DateUnit::Month => "%Y-%m",
            DateUnit::Day => "%Y-%m-%d",
            DateUnit::Hour => "%Y-%m-%d %H:00",
            DateUnit::Minute => "%Y-%m-%d %H:%M",
            DateUnit::Second => "%Y-%m-%d %H:%M:%S",
            DateUnit::Millisecond => "%Y-%m-%d %H:%M:%S%.3f",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DateUnit::Year => "year",
            DateUnit::Month => "month",
            DateUnit::Day => "day",
            DateUnit::Hour => "hour",
            DateUnit::Minute => "minute",
            DateUnit::Second => "second",
            DateUnit::Millisecond => "millisecond",
        }
    }
}

fn month_index(instant: NaiveDateTime) -> i64 {
    i64::from(instant.year()) * 12 + i64::from(instant.month0())
}

fn add_months(instant: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = MonthSpan::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        instant.checked_add_months(magnitude)
    } else {
        instant.checked_sub_months(magnitude)
    }
}

impl fmt::Display for DateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DateUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "year" | "years" | "y" => Ok(DateUnit::Year),
            "month" | "months" => Ok(DateUnit::Month),
            "day" | "days" | "d" => Ok(DateUnit::Day),
            "hour" | "hours" | "h" => Ok(DateUnit::Hour),
            "minute" | "minutes" | "min" => Ok(DateUnit::Minute),
            "second" | "seconds" | "s" => Ok(DateUnit::Second),
            "millisecond" | "milliseconds" | "ms" => Ok(DateUnit::Millisecond),
            other => Err(Error::InvalidArgument(format!("unknown date unit: {}", other))),
        }
    }
}

/// Binds a zero-sized marker type to a [`DateUnit`], so each unit gets its
/// own progression type.
pub trait CalendarUnit:
    Copy + Default + fmt::Debug + Eq + Hash + Send + Sync + 'static
{
    const UNIT: DateUnit;
}

macro_rules! calendar_unit {
    ($name:ident, $unit:expr) => {
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl CalendarUnit for $name {
            const UNIT: DateUnit = $unit;
        }
    };
}

calendar_unit!(Years, DateUnit::Year);
calendar_unit!(Months, DateUnit::Month);
calendar_unit!(Days, DateUnit::Day);
calendar_unit!(Hours, DateUnit::Hour);
calendar_unit!(Minutes, DateUnit::Minute);
calendar_unit!(Seconds, DateUnit::Second);
calendar_unit!(Millis, DateUnit::Millisecond);
