//! Step validation and last-element computation.
//!
//! A progression never stores the bound it was asked for. It stores the last
//! element that stepping from `start` actually reaches, which is what
//! [`last_element`] computes.

use crate::{Error, Integral, Result};
use num_traits::{Bounded, Zero};

/// Reject a zero step.
pub fn check_step<S: Zero>(step: S) -> Result<()> {
    if step.is_zero() {
        return Err(Error::invalid("Step must be non-zero."));
    }
    Ok(())
}

/// Reject a zero step and a step whose negation overflows.
///
/// Progressions negate their step when reversed, so `S::MIN` is refused at
/// construction rather than later.
pub fn check_negatable_step<S>(step: S) -> Result<()>
where
    S: Copy + Zero + Bounded + PartialEq + std::fmt::Display,
{
    check_step(step)?;
    if step == S::min_value() {
        return Err(Error::invalid(format!(
            "Step must be greater than {} to avoid overflow on negation.",
            S::min_value()
        )));
    }
    Ok(())
}

/// Compute the final element of the sequence `start, start + step, ...` that
/// does not pass `end` in the direction of `step`.
///
/// When the bounds contradict the step direction the result is `end`, which
/// leaves the progression empty.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when `step` is zero.
///
/// # Examples
///
/// ```rust
/// # use stride_core::last_element;
/// assert_eq!(last_element(0, 11, 2).unwrap(), 10);
/// assert_eq!(last_element(20, 10, -3).unwrap(), 11);
/// assert_eq!(last_element(i8::MIN, i8::MAX, 100i32).unwrap(), 72);
/// ```
pub fn last_element<T: Integral>(start: T, end: T, step: T::Step) -> Result<T> {
    check_step(step)?;
    Ok(aligned_last(start, end, step))
}

/// [`last_element`] for a step already known to be non-zero.
pub(crate) fn aligned_last<T: Integral>(start: T, end: T, step: T::Step) -> T {
    let s = start.widen();
    let e = end.widen();
    let st: T::Wide = step.into();
    let zero = T::Wide::zero();

    let last = if st > zero {
        if s >= e {
            e
        } else {
            e - positive_mod(e - s, st)
        }
    } else if s <= e {
        e
    } else {
        e + positive_mod(s - e, -st)
    };

    // `last` lies between `start` and `end`, both of which are in the domain.
    T::narrow(last).unwrap_or(end)
}

/// `a mod b` for `b > 0`, always in `0..b`.
fn positive_mod<W: num_traits::PrimInt>(a: W, b: W) -> W {
    let m = a % b;
    if m < W::zero() {
        m + b
    } else {
        m
    }
}
