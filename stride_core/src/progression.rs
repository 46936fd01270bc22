//! Stepped progressions over integral element types.
//!
//! A [`Progression`] is an immutable `(first, last, step)` triple where `last`
//! is the element stepping from `first` actually reaches. Bounds that
//! contradict the direction of the step produce an empty progression, never
//! an error.

use crate::bounds::{aligned_last, check_negatable_step};
use crate::{Error, Integral, Result};
use num_traits::{One, Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// Step and bound inclusivity for building a progression in one call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgressionOptions<S> {
    pub step: S,
    pub inclusive: bool,
}

impl<S: One> Default for ProgressionOptions<S> {
    fn default() -> Self {
        Self {
            step: S::one(),
            inclusive: true,
        }
    }
}

impl<S> ProgressionOptions<S> {
    /// Options for an inclusive upper bound
    pub fn inclusive(step: S) -> Self {
        Self {
            step,
            inclusive: true,
        }
    }

    /// Options for an exclusive upper bound
    pub fn exclusive(step: S) -> Self {
        Self {
            step,
            inclusive: false,
        }
    }
}

/// An arithmetic progression of integral values.
///
/// # Examples
///
/// ```rust
/// # use stride_core::Progression;
/// let p = Progression::new(20, 10, -3).unwrap();
/// assert_eq!(p.iter().collect::<Vec<i32>>(), vec![20, 17, 14, 11]);
/// assert_eq!(p.last(), 11);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Progression<T: Integral> {
    first: T,
    last: T,
    step: T::Step,
}

impl<T: Integral> Progression<T> {
    /// Progression from `start` to `end_inclusive` by `step`.
    ///
    /// A step whose sign contradicts the bounds yields an empty progression.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `step` is zero or the minimum value of
    /// the step type.
    pub fn new(start: T, end_inclusive: T, step: T::Step) -> Result<Self> {
        check_negatable_step(step)?;
        if (step.is_positive() && start > end_inclusive)
            || (step.is_negative() && start < end_inclusive)
        {
            tracing::debug!(
                "Step {} runs away from {} toward {}; progression is empty",
                step,
                start,
                end_inclusive
            );
        }
        Ok(Self::from_closed_range(start, end_inclusive, step))
    }

    /// Progression from `start` up to but excluding `end_exclusive`.
    ///
    /// The bound is narrowed by one unit in the step's direction. If that
    /// leaves the element domain the progression is empty.
    pub fn until(start: T, end_exclusive: T, step: T::Step) -> Result<Self> {
        check_negatable_step(step)?;
        let one = T::Wide::one();
        let narrowed = if step.is_positive() {
            end_exclusive.widen() - one
        } else {
            end_exclusive.widen() + one
        };

        match T::narrow(narrowed) {
            Some(end_inclusive) => Self::new(start, end_inclusive, step),
            None => {
                tracing::debug!(
                    "Exclusive bound {} has no predecessor in step direction; progression is empty",
                    end_exclusive
                );
                Ok(Self::empty(step))
            }
        }
    }

    /// Descending unit-step progression from `start` to `end_inclusive`.
    pub fn down_to(start: T, end_inclusive: T) -> Self {
        Self::from_closed_range(start, end_inclusive, -T::Step::one())
    }

    /// Build from explicit options instead of choosing a constructor.
    pub fn with_options(start: T, end: T, options: ProgressionOptions<T::Step>) -> Result<Self> {
        if options.inclusive {
            Self::new(start, end, options.step)
        } else {
            Self::until(start, end, options.step)
        }
    }

    /// Caller guarantees `step` is neither zero nor the step type's minimum.
    pub(crate) fn from_closed_range(start: T, end_inclusive: T, step: T::Step) -> Self {
        Self {
            first: start,
            last: aligned_last(start, end_inclusive, step),
            step,
        }
    }

    fn empty(step: T::Step) -> Self {
        if step.is_positive() {
            Self {
                first: T::MAX,
                last: T::MIN,
                step,
            }
        } else {
            Self {
                first: T::MIN,
                last: T::MAX,
                step,
            }
        }
    }

    pub fn first(&self) -> T {
        self.first
    }

    /// The last element reached, not the requested bound.
    pub fn last(&self) -> T {
        self.last
    }

    pub fn step(&self) -> T::Step {
        self.step
    }

    pub fn is_empty(&self) -> bool {
        if self.step.is_positive() {
            self.first > self.last
        } else {
            self.first < self.last
        }
    }

    /// Same elements in the opposite order.
    pub fn reversed(&self) -> Self {
        Self::from_closed_range(self.last, self.first, -self.step)
    }

    /// Re-step from the same `first` to the current `last`.
    ///
    /// Only the magnitude of `step` is used; the direction is kept from
    /// `self`, so `step_by(-2)` on an ascending progression steps by `+2`.
    pub fn step_by(&self, step: T::Step) -> Result<Self> {
        check_negatable_step(step)?;
        let magnitude = step.abs();
        let step = if self.step.is_positive() {
            magnitude
        } else {
            -magnitude
        };
        Ok(Self::from_closed_range(self.first, self.last, step))
    }

    /// Whether `value` is one of the elements, without iterating.
    pub fn contains(&self, value: T) -> bool {
        if self.is_empty() {
            return false;
        }
        let in_bounds = if self.step.is_positive() {
            self.first <= value && value <= self.last
        } else {
            self.last <= value && value <= self.first
        };
        let step: T::Wide = self.step.into();
        in_bounds && ((value.widen() - self.first.widen()) % step).is_zero()
    }

    /// A fresh cursor positioned at `first`.
    pub fn iter(&self) -> ProgressionIter<T> {
        ProgressionIter::new(self)
    }
}

impl<T: Integral> PartialEq for Progression<T> {
    fn eq(&self, other: &Self) -> bool {
        (self.is_empty() && other.is_empty())
            || (self.first == other.first && self.last == other.last && self.step == other.step)
    }
}

impl<T: Integral> Eq for Progression<T> {}

impl<T: Integral> Hash for Progression<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_empty() {
            // All empty progressions are equal.
            0u8.hash(state);
        } else {
            1u8.hash(state);
            self.first.hash(state);
            self.last.hash(state);
            self.step.hash(state);
        }
    }
}

impl<T: Integral> fmt::Display for Progression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.step.is_positive() {
            write!(f, "{}..={} step {}", self.first, self.last, self.step)
        } else {
            write!(f, "{} down to {} step {}", self.first, self.last, -self.step)
        }
    }
}

impl<T: Integral> IntoIterator for Progression<T> {
    type Item = T;
    type IntoIter = ProgressionIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Integral> IntoIterator for &Progression<T> {
    type Item = T;
    type IntoIter = ProgressionIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Cursor over a [`Progression`].
///
/// Each cursor owns its position, so any number of them may walk the same
/// progression independently.
#[derive(Clone, Debug)]
pub struct ProgressionIter<T: Integral> {
    front: T::Wide,
    back: T::Wide,
    step: T::Wide,
    exhausted: bool,
    _element: PhantomData<T>,
}

impl<T: Integral> ProgressionIter<T> {
    fn new(progression: &Progression<T>) -> Self {
        Self {
            front: progression.first.widen(),
            back: progression.last.widen(),
            step: progression.step.into(),
            exhausted: progression.is_empty(),
            _element: PhantomData,
        }
    }

    pub fn has_next(&self) -> bool {
        !self.exhausted
    }

    /// Advance, failing with [`Error::NoSuchElement`] once exhausted.
    pub fn next_element(&mut self) -> Result<T> {
        self.next().ok_or(Error::NoSuchElement)
    }

    /// Always fails: progressions cannot be modified through an iterator.
    pub fn remove(&mut self) -> Result<()> {
        Err(Error::UnsupportedOperation(
            "progression iterators are read-only".into(),
        ))
    }

    fn remaining(&self) -> Option<usize> {
        if self.exhausted {
            return Some(0);
        }
        ((self.back - self.front) / self.step + T::Wide::one()).to_usize()
    }
}

impl<T: Integral> Iterator for ProgressionIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.exhausted {
            return None;
        }
        let value = self.front;
        if value == self.back {
            self.exhausted = true;
        } else {
            self.front = self.front + self.step;
        }
        T::narrow(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining() {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

impl<T: Integral> DoubleEndedIterator for ProgressionIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.exhausted {
            return None;
        }
        let value = self.back;
        if value == self.front {
            self.exhausted = true;
        } else {
            self.back = self.back - self.step;
        }
        T::narrow(value)
    }
}

impl<T: Integral> FusedIterator for ProgressionIter<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<H: Hash>(value: &H) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_ascending_unit_step() {
        let p = Progression::new(10i32, 15, 1).unwrap();
        assert_eq!(p.iter().collect::<Vec<i32>>(), vec![10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn test_descending_step() {
        let p = Progression::new(20i32, 10, -3).unwrap();
        assert_eq!(p.iter().collect::<Vec<i32>>(), vec![20, 17, 14, 11]);
        assert_eq!(p.last(), 11);
    }

    #[test]
    fn test_sign_mismatch_is_empty() {
        crate::logging::init_test();
        let p = Progression::new(10i32, 15, -1).unwrap();
        assert!(p.is_empty());
        assert_eq!(p.iter().count(), 0);

        let p = Progression::new(15i32, 10, 2).unwrap();
        assert!(p.is_empty());
    }

    #[test]
    fn test_zero_and_min_step_rejected() {
        assert!(matches!(
            Progression::new(1i32, 5, 0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(Progression::new(1i32, 5, i32::MIN).is_err());
        assert!(Progression::until(1i64, 5, 0).is_err());
    }

    #[test]
    fn test_until_bytes() {
        let p = Progression::until(1i8, 11, 4).unwrap();
        assert_eq!(p.iter().collect::<Vec<_>>(), vec![1, 5, 9]);
    }

    #[test]
    fn test_until_descending_narrows_upward() {
        let p = Progression::until(10i32, 5, -2).unwrap();
        assert_eq!(p.iter().collect::<Vec<i32>>(), vec![10, 8, 6]);
    }

    #[test]
    fn test_until_at_domain_edge_is_empty() {
        let p = Progression::until(i8::MIN, i8::MIN, 1).unwrap();
        assert!(p.is_empty());
        let p = Progression::until(u8::MAX, u8::MAX, -1).unwrap();
        assert!(p.is_empty());
        assert_eq!(p.iter().next(), None);
    }

    #[test]
    fn test_down_to() {
        let p = Progression::down_to(3u16, 0);
        assert_eq!(p.iter().collect::<Vec<_>>(), vec![3, 2, 1, 0]);
        assert_eq!(p.step(), -1);
    }

    #[test]
    fn test_with_options() {
        let p = Progression::with_options(0i32, 10, ProgressionOptions::exclusive(5)).unwrap();
        assert_eq!(p.iter().collect::<Vec<i32>>(), vec![0, 5]);

        let p = Progression::with_options(0i32, 10, ProgressionOptions::default()).unwrap();
        assert_eq!(p.iter().count(), 11);
    }

    #[test]
    fn test_full_domain_iteration_ends() {
        let p = Progression::new(i8::MIN, i8::MAX, 1).unwrap();
        assert_eq!(p.iter().count(), 256);
        assert_eq!(p.iter().last(), Some(i8::MAX));

        let p = Progression::new(i64::MAX - 2, i64::MAX, 1).unwrap();
        assert_eq!(p.iter().collect::<Vec<_>>(), vec![i64::MAX - 2, i64::MAX - 1, i64::MAX]);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let p = Progression::new(0i32, 6, 3).unwrap();
        let first: Vec<i32> = p.iter().collect();
        let second: Vec<i32> = p.into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_next_element_and_remove() {
        let p = Progression::new(1i32, 2, 1).unwrap();
        let mut it = p.iter();
        assert!(it.remove().is_err());
        assert_eq!(it.next_element().unwrap(), 1);
        assert!(it.has_next());
        assert_eq!(it.next_element().unwrap(), 2);
        assert!(!it.has_next());
        assert!(matches!(it.next_element(), Err(Error::NoSuchElement)));
        assert!(matches!(it.remove(), Err(Error::UnsupportedOperation(_))));
    }

    #[test]
    fn test_double_ended() {
        let p = Progression::new(0i32, 10, 3).unwrap();
        let mut it = p.iter();
        assert_eq!(it.next(), Some(0));
        assert_eq!(it.next_back(), Some(9));
        assert_eq!(it.next_back(), Some(6));
        assert_eq!(it.next(), Some(3));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn test_size_hint() {
        let p = Progression::new(0i32, 10, 3).unwrap();
        assert_eq!(p.iter().size_hint(), (4, Some(4)));
        let empty = Progression::new(0i32, 10, -3).unwrap();
        assert_eq!(empty.iter().size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_size_hint_beyond_usize() {
        let full = Progression::new(i64::MIN, i64::MAX, 1).unwrap();
        assert_eq!(full.iter().size_hint(), (usize::MAX, None));

        let mut iter = full.iter();
        assert_eq!(iter.next(), Some(i64::MIN));
        assert_eq!(iter.next_back(), Some(i64::MAX));
    }

    #[test]
    fn test_reversed() {
        let p = Progression::new(0i32, 11, 2).unwrap();
        let r = p.reversed();
        assert_eq!(r.first(), 10);
        assert_eq!(r.last(), 0);
        assert_eq!(r.step(), -2);
        assert_eq!(r.iter().collect::<Vec<i32>>(), vec![10, 8, 6, 4, 2, 0]);
        assert_eq!(r.reversed(), p);
    }

    #[test]
    fn test_reversed_keeps_empty() {
        let p = Progression::new(10i32, 0, 1).unwrap();
        assert!(p.reversed().is_empty());
    }

    #[test]
    fn test_step_by_inherits_direction() {
        let p = Progression::new(0i32, 10, 1).unwrap();
        let q = p.step_by(-3).unwrap();
        assert_eq!(q.step(), 3);
        assert_eq!(q.first(), 0);
        assert_eq!(q.iter().collect::<Vec<i32>>(), vec![0, 3, 6, 9]);

        let d = Progression::down_to(10i32, 0).step_by(4).unwrap();
        assert_eq!(d.step(), -4);
        assert_eq!(d.iter().collect::<Vec<i32>>(), vec![10, 6, 2]);
    }

    #[test]
    fn test_step_by_rejects_zero() {
        let p = Progression::new(0i32, 10, 1).unwrap();
        assert!(matches!(p.step_by(0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_contains() {
        let p = Progression::new(1i32, 9, 3).unwrap();
        assert!(p.contains(1));
        assert!(p.contains(7));
        assert!(!p.contains(8));
        assert!(!p.contains(10));

        let d = Progression::down_to(5i32, -5);
        assert!(d.contains(-5));
        assert!(d.contains(0));
        assert!(!d.contains(6));

        let empty = Progression::new(5i32, 1, 1).unwrap();
        assert!(!empty.contains(3));
    }

    #[test]
    fn test_equality_and_hash() {
        let a = Progression::new(0i32, 11, 2).unwrap();
        let b = Progression::new(0i32, 10, 2).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let c = Progression::new(0i32, 10, 5).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_all_empty_progressions_equal() {
        let a = Progression::new(5i32, 1, 1).unwrap();
        let b = Progression::new(100i32, 200, -7).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_display() {
        assert_eq!(Progression::new(1i32, 10, 2).unwrap().to_string(), "1..=9 step 2");
        assert_eq!(Progression::down_to(5i32, 1).to_string(), "5 down to 1 step 1");
    }

    #[test]
    fn test_char_progression() {
        let p = Progression::new('a', 'k', 5).unwrap();
        assert_eq!(p.iter().collect::<String>(), "afk");

        let across = Progression::new('\u{D7FE}', '\u{E001}', 1).unwrap();
        assert_eq!(
            across.iter().collect::<Vec<_>>(),
            vec!['\u{D7FE}', '\u{D7FF}', '\u{E000}', '\u{E001}']
        );
    }
}
