//! Progressions over calendar units.
//!
//! Both bounds are truncated to the unit first, then the distance between
//! them in whole units becomes an `i64` offset progression anchored at the
//! truncated start. Stepping, emptiness, reversal and membership all run
//! through [`Progression<i64>`]; the unit only converts offsets back into
//! instants.

use super::unit::{CalendarUnit, Days, Hours, Millis, Minutes, Months, Seconds, Years};
use crate::{Error, Progression, ProgressionIter, ProgressionOptions, Result};
use chrono::NaiveDateTime;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::marker::PhantomData;

pub type YearProgression = DateProgression<Years>;
pub type MonthProgression = DateProgression<Months>;
pub type DayProgression = DateProgression<Days>;
pub type HourProgression = DateProgression<Hours>;
pub type MinuteProgression = DateProgression<Minutes>;
pub type SecondProgression = DateProgression<Seconds>;
pub type MillisecondProgression = DateProgression<Millis>;

/// Instants spaced a whole number of `U` apart.
///
/// # Examples
///
/// ```rust
/// # use chrono::NaiveDate;
/// # use stride_core::MonthProgression;
/// let aug = NaiveDate::from_ymd_opt(2018, 8, 20).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let nov = NaiveDate::from_ymd_opt(2018, 11, 2).unwrap().and_hms_opt(0, 0, 0).unwrap();
///
/// let months: Vec<String> = MonthProgression::new(aug, nov, 2)
///     .unwrap()
///     .iter()
///     .map(|m| m.format("%Y-%m").to_string())
///     .collect();
/// assert_eq!(months, vec!["2018-08", "2018-10"]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DateProgression<U: CalendarUnit> {
    origin: NaiveDateTime,
    first: NaiveDateTime,
    last: NaiveDateTime,
    offsets: Progression<i64>,
    _unit: PhantomData<U>,
}

impl<U: CalendarUnit> DateProgression<U> {
    /// Instants from `start` to `end_inclusive`, `step` units apart.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for a zero (or `i64::MIN`) step.
    pub fn new(start: NaiveDateTime, end_inclusive: NaiveDateTime, step: i64) -> Result<Self> {
        let (origin, distance) = Self::anchor(start, end_inclusive)?;
        Self::from_offsets(origin, Progression::new(0, distance, step)?)
    }

    /// Like [`DateProgression::new`] with the end bound excluded.
    pub fn until(start: NaiveDateTime, end_exclusive: NaiveDateTime, step: i64) -> Result<Self> {
        let (origin, distance) = Self::anchor(start, end_exclusive)?;
        Self::from_offsets(origin, Progression::until(0, distance, step)?)
    }

    /// Ascending by one unit, both bounds included.
    pub fn closed(start: NaiveDateTime, end_inclusive: NaiveDateTime) -> Result<Self> {
        Self::new(start, end_inclusive, 1)
    }

    /// Descending by one unit, both bounds included.
    pub fn down_to(start: NaiveDateTime, end_inclusive: NaiveDateTime) -> Result<Self> {
        Self::new(start, end_inclusive, -1)
    }

    pub fn with_options(
        start: NaiveDateTime,
        end: NaiveDateTime,
        options: ProgressionOptions<i64>,
    ) -> Result<Self> {
        if options.inclusive {
            Self::new(start, end, options.step)
        } else {
            Self::until(start, end, options.step)
        }
    }

    fn anchor(start: NaiveDateTime, end: NaiveDateTime) -> Result<(NaiveDateTime, i64)> {
        let origin = Self::truncate(start)?;
        let bound = Self::truncate(end)?;
        let distance = U::UNIT.between(origin, bound);
        tracing::trace!(
            "Anchored {} progression at {} with bound {} units away",
            U::UNIT,
            origin,
            distance
        );
        Ok((origin, distance))
    }

    fn truncate(instant: NaiveDateTime) -> Result<NaiveDateTime> {
        U::UNIT.truncate(instant).ok_or_else(|| {
            Error::InvalidArgument(format!("{} cannot be truncated to a {}", instant, U::UNIT))
        })
    }

    fn at(origin: NaiveDateTime, offset: i64) -> Result<NaiveDateTime> {
        U::UNIT.add(origin, offset).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "{} plus {} {}s is not a representable date",
                origin,
                offset,
                U::UNIT
            ))
        })
    }

    fn from_offsets(origin: NaiveDateTime, offsets: Progression<i64>) -> Result<Self> {
        Ok(Self {
            origin,
            first: Self::at(origin, offsets.first())?,
            last: Self::at(origin, offsets.last())?,
            offsets,
            _unit: PhantomData,
        })
    }

    pub fn first(&self) -> NaiveDateTime {
        self.first
    }

    /// The last instant reached, truncated to the unit.
    pub fn last(&self) -> NaiveDateTime {
        self.last
    }

    /// Step counted in units of `U`.
    pub fn step(&self) -> i64 {
        self.offsets.step()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn reversed(&self) -> Self {
        // Reversing an offset progression swaps its first and last exactly.
        Self {
            origin: self.origin,
            first: self.last,
            last: self.first,
            offsets: self.offsets.reversed(),
            _unit: PhantomData,
        }
    }

    /// Re-step with the magnitude of `step`, keeping the direction.
    pub fn step_by(&self, step: i64) -> Result<Self> {
        Self::from_offsets(self.origin, self.offsets.step_by(step)?)
    }

    /// Whether `instant`, compared at this unit's resolution, is an element.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        match U::UNIT.truncate(instant) {
            Some(truncated) => self
                .offsets
                .contains(U::UNIT.between(self.origin, truncated)),
            None => false,
        }
    }

    pub fn iter(&self) -> DateProgressionIter<U> {
        DateProgressionIter {
            origin: self.origin,
            offsets: self.offsets.iter(),
            _unit: PhantomData,
        }
    }
}

impl<U: CalendarUnit> PartialEq for DateProgression<U> {
    fn eq(&self, other: &Self) -> bool {
        (self.is_empty() && other.is_empty())
            || (self.first == other.first
                && self.last == other.last
                && self.step() == other.step())
    }
}

impl<U: CalendarUnit> Eq for DateProgression<U> {}

impl<U: CalendarUnit> Hash for DateProgression<U> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_empty() {
            0u8.hash(state);
        } else {
            1u8.hash(state);
            self.first.hash(state);
            self.last.hash(state);
            self.step().hash(state);
        }
    }
}

impl<U: CalendarUnit> fmt::Display for DateProgression<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pattern = U::UNIT.default_format();
        let first = self.first.format(pattern);
        let last = self.last.format(pattern);
        let step = self.step();
        if step > 0 {
            write!(f, "{}..={} step {} {}", first, last, step, U::UNIT)
        } else {
            write!(f, "{} down to {} step {} {}", first, last, -step, U::UNIT)
        }
    }
}

impl<U: CalendarUnit> IntoIterator for DateProgression<U> {
    type Item = NaiveDateTime;
    type IntoIter = DateProgressionIter<U>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<U: CalendarUnit> IntoIterator for &DateProgression<U> {
    type Item = NaiveDateTime;
    type IntoIter = DateProgressionIter<U>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Cursor over a [`DateProgression`].
#[derive(Clone, Debug)]
pub struct DateProgressionIter<U: CalendarUnit> {
    origin: NaiveDateTime,
    offsets: ProgressionIter<i64>,
    _unit: PhantomData<U>,
}

impl<U: CalendarUnit> DateProgressionIter<U> {
    pub fn has_next(&self) -> bool {
        self.offsets.has_next()
    }

    /// Advance, failing with [`Error::NoSuchElement`] once exhausted.
    pub fn next_element(&mut self) -> Result<NaiveDateTime> {
        self.next().ok_or(Error::NoSuchElement)
    }

    /// Always fails: progressions cannot be modified through an iterator.
    pub fn remove(&mut self) -> Result<()> {
        self.offsets.remove()
    }
}

impl<U: CalendarUnit> Iterator for DateProgressionIter<U> {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<NaiveDateTime> {
        let offset = self.offsets.next()?;
        U::UNIT.add(self.origin, offset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.offsets.size_hint()
    }
}

impl<U: CalendarUnit> DoubleEndedIterator for DateProgressionIter<U> {
    fn next_back(&mut self) -> Option<NaiveDateTime> {
        let offset = self.offsets.next_back()?;
        U::UNIT.add(self.origin, offset)
    }
}

impl<U: CalendarUnit> FusedIterator for DateProgressionIter<U> {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::hash_map::DefaultHasher;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn hash_of<H: Hash>(value: &H) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_month_progression_step_two() {
        let p = MonthProgression::new(ymd(2018, 8, 15), ymd(2018, 11, 3), 2).unwrap();
        assert_eq!(
            p.iter().collect::<Vec<_>>(),
            vec![ymd(2018, 8, 1), ymd(2018, 10, 1)]
        );
        assert_eq!(p.last(), ymd(2018, 10, 1));
    }

    #[test]
    fn test_month_distance_ignores_day_and_time() {
        let p = MonthProgression::closed(ymd_hms(2018, 8, 31, 23, 59, 59), ymd(2018, 11, 1)).unwrap();
        assert_eq!(p.iter().count(), 4);
        assert!(p.contains(ymd_hms(2018, 9, 30, 12, 0, 0)));
    }

    #[test]
    fn test_year_progression_descending() {
        let p = YearProgression::new(ymd(2020, 6, 1), ymd(2014, 1, 1), -3).unwrap();
        assert_eq!(
            p.iter().collect::<Vec<_>>(),
            vec![ymd(2020, 1, 1), ymd(2017, 1, 1), ymd(2014, 1, 1)]
        );
    }

    #[test]
    fn test_day_progression_until() {
        let p = DayProgression::until(ymd(2018, 2, 27), ymd(2018, 3, 2), 1).unwrap();
        assert_eq!(
            p.iter().collect::<Vec<_>>(),
            vec![ymd(2018, 2, 27), ymd(2018, 2, 28), ymd(2018, 3, 1)]
        );
    }

    #[test]
    fn test_hour_and_minute_units() {
        let p = HourProgression::new(ymd_hms(2018, 1, 1, 22, 30, 0), ymd_hms(2018, 1, 2, 1, 0, 0), 1)
            .unwrap();
        assert_eq!(p.iter().count(), 4);
        assert_eq!(p.first(), ymd_hms(2018, 1, 1, 22, 0, 0));

        let p = MinuteProgression::down_to(ymd_hms(2018, 1, 1, 0, 2, 59), ymd_hms(2017, 12, 31, 23, 59, 0))
            .unwrap();
        assert_eq!(p.iter().count(), 4);
        assert_eq!(p.last(), ymd_hms(2017, 12, 31, 23, 59, 0));
    }

    #[test]
    fn test_second_and_millisecond_units() {
        let p = SecondProgression::new(ymd_hms(2018, 1, 1, 0, 0, 0), ymd_hms(2018, 1, 1, 0, 1, 0), 15)
            .unwrap();
        assert_eq!(p.iter().count(), 5);

        let start = ymd(2018, 1, 1);
        let end = NaiveDate::from_ymd_opt(2018, 1, 1)
            .unwrap()
            .and_hms_milli_opt(0, 0, 0, 10)
            .unwrap();
        let p = MillisecondProgression::until(start, end, 3).unwrap();
        assert_eq!(p.iter().count(), 4);
    }

    #[test]
    fn test_sign_mismatch_is_empty() {
        let p = DayProgression::new(ymd(2018, 1, 1), ymd(2018, 1, 10), -1).unwrap();
        assert!(p.is_empty());
        assert_eq!(p.iter().next(), None);
    }

    #[test]
    fn test_zero_step_rejected() {
        assert!(matches!(
            MonthProgression::new(ymd(2018, 1, 1), ymd(2018, 6, 1), 0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_reversed() {
        let p = MonthProgression::new(ymd(2018, 1, 1), ymd(2018, 7, 1), 3).unwrap();
        let r = p.reversed();
        assert_eq!(r.first(), ymd(2018, 7, 1));
        assert_eq!(r.last(), ymd(2018, 1, 1));
        assert_eq!(r.step(), -3);
        assert_eq!(
            r.iter().collect::<Vec<_>>(),
            vec![ymd(2018, 7, 1), ymd(2018, 4, 1), ymd(2018, 1, 1)]
        );
        assert_eq!(r.reversed(), p);
    }

    #[test]
    fn test_step_by() {
        let p = DayProgression::closed(ymd(2018, 1, 1), ymd(2018, 1, 10)).unwrap();
        let q = p.step_by(-4).unwrap();
        assert_eq!(q.step(), 4);
        assert_eq!(
            q.iter().collect::<Vec<_>>(),
            vec![ymd(2018, 1, 1), ymd(2018, 1, 5), ymd(2018, 1, 9)]
        );
        assert!(p.step_by(0).is_err());
    }

    #[test]
    fn test_contains_checks_alignment() {
        let p = MonthProgression::new(ymd(2018, 1, 1), ymd(2018, 12, 1), 2).unwrap();
        assert!(p.contains(ymd(2018, 3, 17)));
        assert!(!p.contains(ymd(2018, 4, 1)));
        assert!(!p.contains(ymd(2019, 1, 1)));
    }

    #[test]
    fn test_equality_and_hash() {
        let a = MonthProgression::new(ymd(2018, 1, 5), ymd(2018, 6, 1), 2).unwrap();
        let b = MonthProgression::new(ymd(2018, 1, 1), ymd(2018, 5, 30), 2).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let e1 = MonthProgression::new(ymd(2018, 6, 1), ymd(2018, 1, 1), 1).unwrap();
        let e2 = MonthProgression::new(ymd(2000, 1, 1), ymd(2010, 1, 1), -1).unwrap();
        assert_eq!(e1, e2);
        assert_eq!(hash_of(&e1), hash_of(&e2));
    }

    #[test]
    fn test_iterator_errors() {
        let p = DayProgression::closed(ymd(2018, 1, 1), ymd(2018, 1, 1)).unwrap();
        let mut it = p.iter();
        assert_eq!(it.next_element().unwrap(), ymd(2018, 1, 1));
        assert!(matches!(it.next_element(), Err(Error::NoSuchElement)));
        assert!(matches!(it.remove(), Err(Error::UnsupportedOperation(_))));
    }

    #[test]
    fn test_display() {
        let p = MonthProgression::new(ymd(2018, 8, 1), ymd(2018, 11, 1), 2).unwrap();
        assert_eq!(p.to_string(), "2018-08..=2018-10 step 2 month");
        assert_eq!(p.reversed().to_string(), "2018-10 down to 2018-08 step 2 month");
    }
}
