//! Integral element types for progressions.
//!
//! Every element type is mapped into a wider signed integer (`Integral::Wide`)
//! before any arithmetic, so differences and remainders never overflow even at
//! the type's `MIN`/`MAX`. One generic algorithm then serves all widths.

use num_traits::{PrimInt, Signed};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// An element type that can be stepped through by a [`Progression`].
///
/// Implemented for `i8`, `i16`, `i32`, `i64`, `u8`, `u16`, `u32`, `u64` and
/// `char`.
///
/// # Examples
///
/// ```rust
/// # use stride_core::Integral;
/// assert_eq!(i8::MIN.widen(), -128i64);
/// assert_eq!(<u8 as Integral>::narrow(300), None);
/// ```
///
/// [`Progression`]: crate::Progression
pub trait Integral: Copy + Ord + Hash + Debug + Display + Send + Sync + 'static {
    /// Signed type wide enough to hold any difference of two elements plus a step.
    type Wide: PrimInt + Signed + Hash + Debug + Display + Send + Sync;

    /// Signed increment type.
    type Step: PrimInt + Signed + Hash + Debug + Display + Send + Sync + Into<Self::Wide>;

    /// Smallest element.
    const MIN: Self;

    /// Largest element.
    const MAX: Self;

    /// Maps the element to its position on the wide number line.
    fn widen(self) -> Self::Wide;

    /// Inverse of [`Integral::widen`]; `None` when `wide` is outside the domain.
    fn narrow(wide: Self::Wide) -> Option<Self>;
}

macro_rules! impl_integral_for {
    ($t:ty, $wide:ty, $step:ty) => {
        impl Integral for $t {
            type Wide = $wide;
            type Step = $step;

            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;

            #[inline(always)]
            fn widen(self) -> $wide {
                <$wide>::from(self)
            }

            #[inline(always)]
            fn narrow(wide: $wide) -> Option<Self> {
                <$t>::try_from(wide).ok()
            }
        }
    };
}

impl_integral_for!(i8, i64, i32);
impl_integral_for!(i16, i64, i32);
impl_integral_for!(i32, i64, i32);
impl_integral_for!(i64, i128, i64);

impl_integral_for!(u8, i64, i32);
impl_integral_for!(u16, i64, i32);
impl_integral_for!(u32, i64, i32);
impl_integral_for!(u64, i128, i64);

const SURROGATE_START: u32 = 0xD800;
const SURROGATE_LEN: u32 = 0x800;

/// Characters are positioned by Unicode scalar value with the surrogate block
/// removed, so `'\u{D7FF}'` and `'\u{E000}'` are adjacent.
impl Integral for char {
    type Wide = i64;
    type Step = i32;

    const MIN: Self = '\0';
    const MAX: Self = char::MAX;

    #[inline]
    fn widen(self) -> i64 {
        let scalar = u32::from(self);
        if scalar >= SURROGATE_START {
            i64::from(scalar - SURROGATE_LEN)
        } else {
            i64::from(scalar)
        }
    }

    #[inline]
    fn narrow(wide: i64) -> Option<Self> {
        let position = u32::try_from(wide).ok()?;
        let scalar = if position >= SURROGATE_START {
            position.checked_add(SURROGATE_LEN)?
        } else {
            position
        };
        char::from_u32(scalar)
    }
}
