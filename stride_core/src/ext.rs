//! Method-call mirrors of the progression constructors.
//!
//! ```rust
//! # use stride_core::{ext::IntegralExt, date::Months, DateTimeExt};
//! # use chrono::NaiveDate;
//! assert_eq!(1u8.until(4).iter().collect::<Vec<_>>(), vec![1, 2, 3]);
//! assert_eq!(5i32.down_to(3).iter().collect::<Vec<_>>(), vec![5, 4, 3]);
//!
//! let jan = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let mar = NaiveDate::from_ymd_opt(2018, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! assert_eq!(jan.range_to::<Months>(mar).unwrap().iter().count(), 3);
//! ```

use crate::date::{CalendarUnit, DateProgression};
use crate::{ClosedRange, Integral, Progression, Result};
use chrono::NaiveDateTime;

pub trait IntegralExt: Integral {
    fn range_to(self, end_inclusive: Self) -> ClosedRange<Self> {
        ClosedRange::new(self, end_inclusive)
    }

    fn range_to_by(self, end_inclusive: Self, step: Self::Step) -> Result<Progression<Self>> {
        Progression::new(self, end_inclusive, step)
    }

    fn until(self, end_exclusive: Self) -> ClosedRange<Self> {
        ClosedRange::until(self, end_exclusive)
    }

    fn until_by(self, end_exclusive: Self, step: Self::Step) -> Result<Progression<Self>> {
        Progression::until(self, end_exclusive, step)
    }

    fn down_to(self, end_inclusive: Self) -> Progression<Self> {
        Progression::down_to(self, end_inclusive)
    }
}

impl<T: Integral> IntegralExt for T {}

pub trait DateTimeExt {
    fn range_to<U: CalendarUnit>(self, end_inclusive: NaiveDateTime) -> Result<DateProgression<U>>;

    fn range_to_by<U: CalendarUnit>(
        self,
        end_inclusive: NaiveDateTime,
        step: i64,
    ) -> Result<DateProgression<U>>;

    fn until<U: CalendarUnit>(self, end_exclusive: NaiveDateTime) -> Result<DateProgression<U>>;

    fn down_to<U: CalendarUnit>(self, end_inclusive: NaiveDateTime) -> Result<DateProgression<U>>;
}

impl DateTimeExt for NaiveDateTime {
    fn range_to<U: CalendarUnit>(self, end_inclusive: NaiveDateTime) -> Result<DateProgression<U>> {
        DateProgression::closed(self, end_inclusive)
    }

    fn range_to_by<U: CalendarUnit>(
        self,
        end_inclusive: NaiveDateTime,
        step: i64,
    ) -> Result<DateProgression<U>> {
        DateProgression::new(self, end_inclusive, step)
    }

    fn until<U: CalendarUnit>(self, end_exclusive: NaiveDateTime) -> Result<DateProgression<U>> {
        DateProgression::until(self, end_exclusive, 1)
    }

    fn down_to<U: CalendarUnit>(self, end_inclusive: NaiveDateTime) -> Result<DateProgression<U>> {
        DateProgression::down_to(self, end_inclusive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::{Days, Years};
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_integral_mirrors() {
        assert_eq!(10i32.range_to(15), ClosedRange::new(10, 15));
        assert_eq!(
            20i32.range_to_by(10, -3).unwrap().iter().collect::<Vec<_>>(),
            vec![20, 17, 14, 11]
        );
        assert_eq!(1i8.until_by(11, 4).unwrap().iter().collect::<Vec<_>>(), vec![1, 5, 9]);
        assert_eq!('c'.down_to('a').iter().collect::<String>(), "cba");
    }

    #[test]
    fn test_date_mirrors() {
        let p = ymd(2018, 1, 1).until::<Days>(ymd(2018, 1, 4)).unwrap();
        assert_eq!(p.iter().count(), 3);

        let p = ymd(2020, 1, 1).down_to::<Years>(ymd(2018, 1, 1)).unwrap();
        assert_eq!(p.iter().collect::<Vec<_>>(), vec![ymd(2020, 1, 1), ymd(2019, 1, 1), ymd(2018, 1, 1)]);

        let p = ymd(2018, 1, 1).range_to_by::<Days>(ymd(2018, 1, 7), 3).unwrap();
        assert_eq!(p.iter().count(), 3);
    }
}
