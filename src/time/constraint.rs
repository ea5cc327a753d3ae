//! Boolean-valued time constraints.
//!
//! A [`TimeConstraint`] is an ordered union of disjoint, non-touching,
//! non-empty half-open intervals, representing the set of instants at which
//! some condition holds. All operations return new constraints; a constraint
//! never mutates after construction.

use crate::constants::Microseconds;
use crate::time::atomic::AtomicTime;
use crate::time::interval::TimeInterval;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeConstraint {
    intervals: Vec<TimeInterval>,
}

impl TimeConstraint {
    /// The never-satisfied constraint.
    pub fn empty() -> Self {
        TimeConstraint { intervals: Vec::new() }
    }

    pub fn from_interval(interval: TimeInterval) -> Self {
        Self::from_intervals(vec![interval])
    }

    /// Normalize an arbitrary collection of intervals: sort by start, merge
    /// overlapping or touching spans, and drop empty ones.
    pub fn from_intervals(intervals: Vec<TimeInterval>) -> Self {
        let mut sorted: Vec<TimeInterval> = intervals
            .into_iter()
            .filter(|iv| iv.duration() > 0)
            .collect();
        sorted.sort_by_key(|iv| (iv.start(), iv.duration()));

        let mut merged: Vec<TimeInterval> = Vec::new();
        for iv in sorted {
            match merged.last_mut() {
                Some(last) if iv.start().at_or_before(&last.finish()) => {
                    if iv.finish().after(&last.finish()) {
                        *last = TimeInterval::between(last.start(), iv.finish());
                    }
                }
                _ => merged.push(iv),
            }
        }
        TimeConstraint { intervals: merged }
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn intervals(&self) -> &[TimeInterval] {
        &self.intervals
    }

    /// Whether the constraint is satisfied at `t`.
    pub fn contains(&self, t: &AtomicTime) -> bool {
        let idx = self.intervals.partition_point(|iv| iv.start().at_or_before(t));
        idx > 0 && self.intervals[idx - 1].contains(t)
    }

    /// Generic two-pointer sweep over both constraints' boundary events.
    ///
    /// `keep` decides, from the pair of inside-states, whether the combined
    /// constraint holds between two consecutive events. Output intervals open
    /// and close on transitions of `keep`, so spans outside the event range
    /// are never emitted and zero-width transitions produce nothing.
    fn combine(&self, other: &TimeConstraint, keep: impl Fn(bool, bool) -> bool) -> TimeConstraint {
        let a = &self.intervals;
        let b = &other.intervals;
        let mut ia = 0usize;
        let mut ib = 0usize;
        let mut in_a = false;
        let mut in_b = false;
        let mut pending: Option<AtomicTime> = None;
        let mut out = Vec::new();

        loop {
            let next_a = a.get(ia).map(|iv| if in_a { iv.finish() } else { iv.start() });
            let next_b = b.get(ib).map(|iv| if in_b { iv.finish() } else { iv.start() });
            let t = match (next_a, next_b) {
                (None, None) => break,
                (Some(x), None) => x,
                (None, Some(y)) => y,
                (Some(x), Some(y)) => AtomicTime::earliest(x, y),
            };
            if next_a == Some(t) {
                if in_a {
                    ia += 1;
                }
                in_a = !in_a;
            }
            if next_b == Some(t) {
                if in_b {
                    ib += 1;
                }
                in_b = !in_b;
            }
            match (pending, keep(in_a, in_b)) {
                (None, true) => pending = Some(t),
                (Some(open), false) => {
                    if t.after(&open) {
                        out.push(TimeInterval::between(open, t));
                    }
                    pending = None;
                }
                _ => {}
            }
        }
        // Normalized inputs and a monotone sweep keep the output normalized.
        TimeConstraint { intervals: out }
    }

    /// Instants satisfying either constraint.
    pub fn union(&self, other: &TimeConstraint) -> TimeConstraint {
        self.combine(other, |a, b| a || b)
    }

    /// Instants satisfying both constraints.
    pub fn intersection(&self, other: &TimeConstraint) -> TimeConstraint {
        self.combine(other, |a, b| a && b)
    }

    /// Instants satisfying `self` but not `other`.
    pub fn exclude(&self, other: &TimeConstraint) -> TimeConstraint {
        self.combine(other, |a, b| a && !b)
    }

    /// Gaps covered by neither constraint, within the combined event range.
    pub fn neither(&self, other: &TimeConstraint) -> TimeConstraint {
        self.combine(other, |a, b| !a && !b)
    }

    /// First satisfied instant, if any.
    pub fn earliest(&self) -> Option<AtomicTime> {
        self.intervals.first().map(|iv| iv.start())
    }

    /// Open finish of the last interval, if any.
    pub fn latest(&self) -> Option<AtomicTime> {
        self.intervals.last().map(|iv| iv.finish())
    }

    /// Earliest start of a `duration`-long sub-interval fitting inside a
    /// single interval.
    pub fn earliest_for(&self, duration: Microseconds) -> Option<AtomicTime> {
        self.intervals
            .iter()
            .find(|iv| iv.duration() >= duration)
            .map(|iv| iv.start())
    }

    /// Latest such start.
    pub fn latest_for(&self, duration: Microseconds) -> Option<AtomicTime> {
        self.intervals
            .iter()
            .rev()
            .find(|iv| iv.duration() >= duration)
            .map(|iv| iv.finish().add(-duration))
    }

    /// Start time, among intervals wide enough for `duration`, minimizing the
    /// distance to `t`. On an exact distance tie the earlier interval wins;
    /// callers rely on this tie-break.
    pub fn nearest_for(&self, duration: Microseconds, t: &AtomicTime) -> Option<AtomicTime> {
        let mut best: Option<(Microseconds, AtomicTime)> = None;
        for iv in &self.intervals {
            if iv.duration() < duration {
                continue;
            }
            let last_start = iv.finish().add(-duration);
            let candidate = AtomicTime::latest(iv.start(), AtomicTime::earliest(*t, last_start));
            let distance = candidate.subtract(t).abs();
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, candidate));
            }
        }
        best.map(|(_, candidate)| candidate)
    }

    /// Earliest qualifying start at or after `t`.
    pub fn earliest_not_before(&self, duration: Microseconds, t: &AtomicTime) -> Option<AtomicTime> {
        for iv in &self.intervals {
            if iv.duration() < duration {
                continue;
            }
            let last_start = iv.finish().add(-duration);
            if last_start.at_or_after(t) {
                return Some(AtomicTime::latest(iv.start(), *t));
            }
        }
        None
    }

    /// Latest qualifying start at or before `t`.
    pub fn latest_not_after(&self, duration: Microseconds, t: &AtomicTime) -> Option<AtomicTime> {
        for iv in self.intervals.iter().rev() {
            if iv.duration() < duration {
                continue;
            }
            if iv.start().at_or_before(t) {
                let last_start = iv.finish().add(-duration);
                return Some(AtomicTime::earliest(last_start, *t));
            }
        }
        None
    }
}
