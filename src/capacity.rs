//! Entry-count bound for [`LruMap`](crate::policy::lru_map::LruMap).
//!
//! A map accepts any numeric capacity. Values that cannot describe a positive
//! entry count are not rejected; they collapse to [`Capacity::ZERO`], and a
//! zero-capacity map absorbs every insert without storing it.
//!
//! | Input                         | Effective bound            |
//! |-------------------------------|----------------------------|
//! | unsigned integer `n`          | `n` (saturating at `usize::MAX`) |
//! | signed integer `n >= 0`       | `n`                        |
//! | signed integer `n < 0`        | `0`                        |
//! | float `NaN` or `<= 0.0`       | `0`                        |
//! | float `+inf`                  | unbounded                  |
//! | other positive float `x`      | `ceil(x)`                  |
//!
//! Fractional bounds round up because eviction compares the bound against
//! whole entry counts: a bound of `1.5` is only reached once two entries are
//! present.

use std::fmt;

/// Maximum number of entries a map retains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capacity(usize);

impl Capacity {
    /// A bound that stores nothing.
    pub const ZERO: Capacity = Capacity(0);

    /// A bound that is never reached in practice.
    pub const UNBOUNDED: Capacity = Capacity(usize::MAX);

    /// Creates a bound of exactly `limit` entries.
    #[inline]
    pub const fn new(limit: usize) -> Self {
        Self(limit)
    }

    /// Returns the bound as an entry count.
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns `true` if no entry can ever be stored.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` for [`Capacity::UNBOUNDED`].
    #[inline]
    pub const fn is_unbounded(self) -> bool {
        self.0 == usize::MAX
    }

    /// Returns `true` once `len` entries fill the bound.
    #[inline]
    pub(crate) const fn is_reached_by(self, len: usize) -> bool {
        self.0 <= len
    }

    /// Returns `true` while there is room for one more entry.
    #[inline]
    pub(crate) const fn admits(self, len: usize) -> bool {
        self.0 > len
    }

    /// Number of slots worth reserving up front.
    #[inline]
    pub(crate) fn prealloc_hint(self) -> usize {
        self.0.min(PREALLOC_LIMIT)
    }

    fn from_float(value: f64) -> Self {
        if value.is_nan() || value <= 0.0 {
            Self::ZERO
        } else if value.is_infinite() {
            Self::UNBOUNDED
        } else {
            // `as` saturates for values beyond usize::MAX
            Self(value.ceil() as usize)
        }
    }
}

/// Upper limit on eager allocation; larger maps grow on demand.
const PREALLOC_LIMIT: usize = 4096;

impl Default for Capacity {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unbounded() {
            f.write_str("unbounded")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Capacity {
                #[inline]
                fn from(value: $t) -> Self {
                    Self(usize::try_from(value).unwrap_or(usize::MAX))
                }
            }
        )*
    };
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Capacity {
                #[inline]
                fn from(value: $t) -> Self {
                    if value <= 0 {
                        Self::ZERO
                    } else {
                        Self(usize::try_from(value).unwrap_or(usize::MAX))
                    }
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128, isize);

impl From<f64> for Capacity {
    #[inline]
    fn from(value: f64) -> Self {
        Self::from_float(value)
    }
}

impl From<f32> for Capacity {
    #[inline]
    fn from(value: f32) -> Self {
        Self::from_float(f64::from(value))
    }
}

impl From<Capacity> for usize {
    #[inline]
    fn from(value: Capacity) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_map_directly() {
        assert_eq!(Capacity::from(0usize).get(), 0);
        assert_eq!(Capacity::from(7u8).get(), 7);
        assert_eq!(Capacity::from(42i32).get(), 42);
        assert_eq!(Capacity::from(u64::MAX).get(), usize::MAX);
    }

    #[test]
    fn negative_integers_collapse_to_zero() {
        assert!(Capacity::from(-1i32).is_zero());
        assert!(Capacity::from(i64::MIN).is_zero());
        assert!(Capacity::from(-128i8).is_zero());
    }

    #[test]
    fn invalid_floats_collapse_to_zero() {
        assert!(Capacity::from(f64::NAN).is_zero());
        assert!(Capacity::from(-0.5f64).is_zero());
        assert!(Capacity::from(0.0f32).is_zero());
        assert!(Capacity::from(f64::NEG_INFINITY).is_zero());
    }

    #[test]
    fn fractional_floats_round_up() {
        assert_eq!(Capacity::from(0.25f64).get(), 1);
        assert_eq!(Capacity::from(1.5f64).get(), 2);
        assert_eq!(Capacity::from(3.0f32).get(), 3);
    }

    #[test]
    fn infinity_is_unbounded() {
        assert!(Capacity::from(f64::INFINITY).is_unbounded());
        assert_eq!(Capacity::default(), Capacity::UNBOUNDED);
    }

    #[test]
    fn reach_and_admit_are_complementary() {
        let cap = Capacity::new(2);
        assert!(cap.admits(1));
        assert!(!cap.is_reached_by(1));
        assert!(cap.is_reached_by(2));
        assert!(!cap.admits(2));

        assert!(Capacity::ZERO.is_reached_by(0));
        assert!(!Capacity::ZERO.admits(0));
    }

    #[test]
    fn prealloc_hint_is_clamped() {
        assert_eq!(Capacity::new(16).prealloc_hint(), 16);
        assert_eq!(Capacity::UNBOUNDED.prealloc_hint(), PREALLOC_LIMIT);
    }

    #[test]
    fn display_formats_bound() {
        assert_eq!(Capacity::new(5).to_string(), "5");
        assert_eq!(Capacity::UNBOUNDED.to_string(), "unbounded");
    }
}
