//! Picosecond-resolution timestamps and durations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

const PICOS_PER_NANO: u64 = 1_000;

/// An absolute point in time, in picoseconds since the start of a schedule.
///
/// Serializes as the bare picosecond count.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp {
    picos: u64,
}

impl Timestamp {
    /// The start of the schedule.
    pub const ZERO: Timestamp = Timestamp { picos: 0 };

    /// Create a timestamp from picoseconds.
    pub const fn from_picos(picos: u64) -> Self {
        Self { picos }
    }

    /// Create a timestamp from nanoseconds, saturating at `u64::MAX` picoseconds.
    pub const fn from_nanos(nanos: u64) -> Self {
        Self {
            picos: nanos.saturating_mul(PICOS_PER_NANO),
        }
    }

    /// Raw picosecond count.
    pub const fn raw_picos(self) -> u64 {
        self.picos
    }

    /// Time elapsed since `earlier`, or `None` if `earlier` is later than `self`.
    pub fn checked_duration_since(self, earlier: Timestamp) -> Option<Duration> {
        self.picos.checked_sub(earlier.picos).map(Duration::from_picos)
    }

    /// `self + duration`, or `None` on overflow.
    pub fn checked_add(self, duration: Duration) -> Option<Timestamp> {
        self.picos.checked_add(duration.picos).map(Timestamp::from_picos)
    }
}

/// Saturating; use [`Timestamp::checked_add`] to detect overflow.
impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Self::Output {
        Timestamp::from_picos(self.picos.saturating_add(rhs.picos))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}ps", self.picos)
    }
}

/// A span of time in picoseconds.
///
/// Serializes as the bare picosecond count.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Duration {
    picos: u64,
}

impl Duration {
    /// A zero-length duration.
    pub const ZERO: Duration = Duration { picos: 0 };

    /// Create a duration from picoseconds.
    pub const fn from_picos(picos: u64) -> Self {
        Self { picos }
    }

    /// Create a duration from nanoseconds, saturating at `u64::MAX` picoseconds.
    pub const fn from_nanos(nanos: u64) -> Self {
        Self {
            picos: nanos.saturating_mul(PICOS_PER_NANO),
        }
    }

    /// Raw picosecond count.
    pub const fn raw_picos(self) -> u64 {
        self.picos
    }

    /// Check for a zero-length duration.
    pub const fn is_zero(self) -> bool {
        self.picos == 0
    }
}

/// Saturating.
impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Self::Output {
        Duration::from_picos(self.picos.saturating_add(rhs.picos))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ps", self.picos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        assert_eq!(Timestamp::from_nanos(3).raw_picos(), 3_000);
        assert_eq!(Duration::from_nanos(20).raw_picos(), 20_000);
    }

    #[test]
    fn test_duration_since() {
        let a = Timestamp::from_picos(100);
        let b = Timestamp::from_picos(250);
        assert_eq!(b.checked_duration_since(a), Some(Duration::from_picos(150)));
        assert_eq!(a.checked_duration_since(a), Some(Duration::ZERO));
        assert_eq!(a.checked_duration_since(b), None);
    }

    #[test]
    fn test_checked_add() {
        let t = Timestamp::from_picos(u64::MAX - 1);
        assert_eq!(
            t.checked_add(Duration::from_picos(1)),
            Some(Timestamp::from_picos(u64::MAX))
        );
        assert_eq!(t.checked_add(Duration::from_picos(2)), None);
        assert_eq!(
            Timestamp::ZERO + Duration::from_nanos(1),
            Timestamp::from_picos(1_000)
        );
    }

    #[test]
    fn test_arithmetic_saturates() {
        assert_eq!(Timestamp::from_nanos(u64::MAX).raw_picos(), u64::MAX);
        assert_eq!(Duration::from_nanos(u64::MAX / 10).raw_picos(), u64::MAX);

        let late = Timestamp::from_picos(u64::MAX - 5);
        assert_eq!((late + Duration::from_picos(10)).raw_picos(), u64::MAX);

        let long = Duration::from_picos(u64::MAX);
        assert_eq!((long + Duration::from_picos(1)).raw_picos(), u64::MAX);
    }
}
