//! Half-open time intervals.

use crate::astrodyn_errors::AstrodynError;
use crate::constants::Microseconds;
use crate::time::atomic::AtomicTime;

/// A half-open span of atomic time, `[start, start + duration)`.
///
/// The duration is never negative. `finish` is derived, not stored, so two
/// intervals compare equal exactly when start and duration match. A
/// zero-duration interval is valid and contains no instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    start: AtomicTime,
    duration: Microseconds,
}

impl TimeInterval {
    pub fn new(start: AtomicTime, duration: Microseconds) -> Result<Self, AstrodynError> {
        if duration < 0 {
            return Err(AstrodynError::NegativeDuration(duration));
        }
        Ok(TimeInterval { start, duration })
    }

    /// Build from explicit bounds. `stop` earlier than `start` is an error.
    pub fn from_bounds(start: AtomicTime, stop: AtomicTime) -> Result<Self, AstrodynError> {
        if stop.before(&start) {
            return Err(AstrodynError::InvalidIntervalBounds {
                start: start.as_microseconds(),
                stop: stop.as_microseconds(),
            });
        }
        // Delegating keeps the duration check in one place, even though a
        // negative value cannot reach it from here.
        Self::new(start, stop.subtract(&start))
    }

    /// Bounds already known to be ordered at every call site.
    pub(crate) fn between(start: AtomicTime, finish: AtomicTime) -> Self {
        debug_assert!(finish.at_or_after(&start));
        TimeInterval {
            start,
            duration: finish.subtract(&start),
        }
    }

    pub fn start(&self) -> AtomicTime {
        self.start
    }

    pub fn duration(&self) -> Microseconds {
        self.duration
    }

    /// Open upper bound, `start + duration`.
    pub fn finish(&self) -> AtomicTime {
        self.start.add(self.duration)
    }

    /// Half-open membership: the start is inside, the finish is not.
    pub fn contains(&self, t: &AtomicTime) -> bool {
        t.at_or_after(&self.start) && t.before(&self.finish())
    }

    /// Whether `other` lies entirely within this interval.
    pub fn contains_interval(&self, other: &TimeInterval) -> bool {
        other.duration >= 0
            && other.start.at_or_after(&self.start)
            && other.finish().at_or_before(&self.finish())
    }

    /// Overlap of two intervals, or `None` when they are disjoint.
    ///
    /// Touching intervals (one's finish equal to the other's start) overlap
    /// in a genuinely empty zero-duration interval, which is still `Some`.
    pub fn intersection(&self, other: &TimeInterval) -> Option<TimeInterval> {
        let start = AtomicTime::latest(self.start, other.start);
        let finish = AtomicTime::earliest(self.finish(), other.finish());
        if start.after(&finish) {
            None
        } else {
            Some(TimeInterval::between(start, finish))
        }
    }
}

#[cfg(test)]
mod interval_test {
    use super::*;

    fn at(us: i64) -> AtomicTime {
        AtomicTime::from_microseconds(us)
    }

    #[test]
    fn test_half_open_boundary() {
        let iv = TimeInterval::new(at(100_000), 10).unwrap();
        assert!(iv.contains(&at(100_000)));
        assert!(iv.contains(&at(100_009)));
        assert!(!iv.contains(&at(100_010)));
        assert!(!iv.contains(&at(99_999)));
        assert_eq!(iv.finish(), at(100_010));
    }

    #[test]
    fn test_zero_duration_contains_nothing() {
        let iv = TimeInterval::new(at(42), 0).unwrap();
        assert!(!iv.contains(&at(42)));
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            TimeInterval::new(at(0), -1),
            Err(AstrodynError::NegativeDuration(-1))
        );
        assert_eq!(
            TimeInterval::from_bounds(at(10), at(9)),
            Err(AstrodynError::InvalidIntervalBounds { start: 10, stop: 9 })
        );
        assert_eq!(
            TimeInterval::from_bounds(at(10), at(25)).unwrap(),
            TimeInterval::new(at(10), 15).unwrap()
        );
    }

    #[test]
    fn test_contains_interval() {
        let outer = TimeInterval::new(at(0), 100).unwrap();
        let inner = TimeInterval::new(at(10), 80).unwrap();
        let flush = TimeInterval::new(at(0), 100).unwrap();
        let spill = TimeInterval::new(at(50), 51).unwrap();
        assert!(outer.contains_interval(&inner));
        assert!(outer.contains_interval(&flush));
        assert!(!outer.contains_interval(&spill));
        assert!(!inner.contains_interval(&outer));
    }

    #[test]
    fn test_intersection() {
        let a = TimeInterval::new(at(0), 10).unwrap();
        let b = TimeInterval::new(at(5), 10).unwrap();
        let c = TimeInterval::new(at(10), 5).unwrap();
        let d = TimeInterval::new(at(20), 5).unwrap();

        assert_eq!(
            a.intersection(&b),
            Some(TimeInterval::new(at(5), 5).unwrap())
        );
        // Touching: genuinely empty overlap, not absence of overlap.
        assert_eq!(
            a.intersection(&c),
            Some(TimeInterval::new(at(10), 0).unwrap())
        );
        assert_eq!(a.intersection(&d), None);
    }
}
