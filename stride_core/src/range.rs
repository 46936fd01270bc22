//! Inclusive unit-step ranges.

use crate::{Integral, Progression, ProgressionIter, Result};
use num_traits::One;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The values `start..=end_inclusive`, ascending by one.
///
/// Membership is a bound comparison; nothing is iterated.
///
/// # Examples
///
/// ```rust
/// # use stride_core::ClosedRange;
/// let r = ClosedRange::new(10u8, 15);
/// assert!(r.contains(12));
/// assert_eq!(r.iter().count(), 6);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ClosedRange<T: Integral> {
    start: T,
    end_inclusive: T,
}

impl<T: Integral> ClosedRange<T> {
    pub fn new(start: T, end_inclusive: T) -> Self {
        Self {
            start,
            end_inclusive,
        }
    }

    /// `start` up to but excluding `end_exclusive`.
    ///
    /// Empty when `end_exclusive` is the type's minimum.
    pub fn until(start: T, end_exclusive: T) -> Self {
        match T::narrow(end_exclusive.widen() - T::Wide::one()) {
            Some(end_inclusive) => Self::new(start, end_inclusive),
            None => Self::empty(),
        }
    }

    pub fn empty() -> Self {
        Self::new(T::MAX, T::MIN)
    }

    pub fn start(&self) -> T {
        self.start
    }

    pub fn end_inclusive(&self) -> T {
        self.end_inclusive
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end_inclusive
    }

    pub fn contains(&self, value: T) -> bool {
        self.start <= value && value <= self.end_inclusive
    }

    pub fn as_progression(&self) -> Progression<T> {
        // A unit step is always aligned, so `end_inclusive` is already `last`.
        Progression::from_closed_range(self.start, self.end_inclusive, T::Step::one())
    }

    pub fn iter(&self) -> ProgressionIter<T> {
        self.as_progression().iter()
    }

    pub fn reversed(&self) -> Progression<T> {
        self.as_progression().reversed()
    }

    /// See [`Progression::step_by`]; the result is always ascending.
    pub fn step_by(&self, step: T::Step) -> Result<Progression<T>> {
        self.as_progression().step_by(step)
    }
}

impl<T: Integral> From<ClosedRange<T>> for Progression<T> {
    fn from(range: ClosedRange<T>) -> Self {
        range.as_progression()
    }
}

impl<T: Integral> PartialEq for ClosedRange<T> {
    fn eq(&self, other: &Self) -> bool {
        (self.is_empty() && other.is_empty())
            || (self.start == other.start && self.end_inclusive == other.end_inclusive)
    }
}

impl<T: Integral> Eq for ClosedRange<T> {}

impl<T: Integral> Hash for ClosedRange<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_empty() {
            0u8.hash(state);
        } else {
            1u8.hash(state);
            self.start.hash(state);
            self.end_inclusive.hash(state);
        }
    }
}

impl<T: Integral> fmt::Display for ClosedRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end_inclusive)
    }
}

impl<T: Integral> IntoIterator for ClosedRange<T> {
    type Item = T;
    type IntoIter = ProgressionIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Integral> IntoIterator for &ClosedRange<T> {
    type Item = T;
    type IntoIter = ProgressionIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
