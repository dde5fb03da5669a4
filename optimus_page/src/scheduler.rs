// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A manual clock for interval timers.
//!
//! Time only moves when the caller advances it. Due timers fire in deadline order; equal
//! deadlines fire in the order the timers were created. Every firing is recorded so tests
//! can assert on exactly which timers ran and when.

use alloc::vec::Vec;
use core::time::Duration;

/// Identifier of an interval timer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TimerId(u32);

#[derive(Clone, Debug)]
struct Interval {
    id: TimerId,
    period: Duration,
    next_due: Duration,
}

/// A recorded firing.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Firing {
    /// Clock time of the firing.
    pub at: Duration,
    /// The timer that fired.
    pub timer: TimerId,
}

/// Interval timers driven by a manual clock.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u32,
    intervals: Vec<Interval>,
    fired: Vec<Firing>,
}

impl Scheduler {
    /// Current clock time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Start a recurring timer first due one `period` from now.
    ///
    /// A zero period is treated as one millisecond so the clock always makes progress.
    pub fn set_interval(&mut self, period: Duration) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.intervals.push(Interval {
            id,
            period,
            next_due: self.now + period,
        });
        id
    }

    /// Cancel a timer; unknown timers are ignored.
    pub fn clear_interval(&mut self, timer: TimerId) {
        self.intervals.retain(|i| i.id != timer);
    }

    /// Returns true while `timer` is scheduled.
    pub fn is_active(&self, timer: TimerId) -> bool {
        self.intervals.iter().any(|i| i.id == timer)
    }

    /// Number of scheduled timers.
    pub fn active(&self) -> usize {
        self.intervals.len()
    }

    /// Every firing so far, oldest first.
    pub fn fired(&self) -> &[Firing] {
        &self.fired
    }

    /// Number of times `timer` has fired.
    pub fn fire_count(&self, timer: TimerId) -> usize {
        self.fired.iter().filter(|f| f.timer == timer).count()
    }

    /// Take the next timer due at or before `deadline`.
    ///
    /// Moves the clock to its deadline, records the firing and schedules its next run.
    pub(crate) fn pop_due(&mut self, deadline: Duration) -> Option<TimerId> {
        let interval = self
            .intervals
            .iter_mut()
            .filter(|i| i.next_due <= deadline)
            .min_by_key(|i| (i.next_due, i.id))?;
        let at = interval.next_due;
        interval.next_due += interval.period;
        let timer = interval.id;
        self.now = at;
        self.fired.push(Firing { at, timer });
        Some(timer)
    }

    /// Move the clock to `deadline` once nothing else is due.
    pub(crate) fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}
