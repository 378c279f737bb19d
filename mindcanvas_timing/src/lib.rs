// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mind Canvas Timing: host-agnostic rate limiters.
//!
//! Interactive canvases lean on three timing patterns:
//!
//! - [`Debouncer`]: collapse a burst of triggers into one firing after the
//!   burst goes quiet (viewport recompute, autosave).
//! - [`Throttle`]: fire at most once per interval, remembering a trailing
//!   trigger that arrived too early (pointer-move handling).
//! - [`Interval`]: fire periodically (preload reclaim).
//!
//! None of these own a clock or a timer queue. Timestamps are plain `u64`
//! milliseconds on any monotonic clock the host chooses, and the host polls
//! the limiters from its event loop. This keeps them deterministic and
//! testable without sleeping.
//!
//! ```rust
//! use mindcanvas_timing::Debouncer;
//!
//! let mut recompute = Debouncer::new(50);
//! recompute.schedule(0);
//! recompute.schedule(20);
//! recompute.schedule(40);
//! assert!(!recompute.poll(80));
//! assert!(recompute.poll(90));
//! assert!(!recompute.poll(200));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

/// Collapses bursts of triggers into a single firing.
///
/// Every [`Debouncer::schedule`] pushes the deadline out to `now + delay`.
/// [`Debouncer::poll`] returns `true` exactly once when the deadline is reached.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay: u64,
    deadline: Option<u64>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet period in milliseconds.
    #[must_use]
    pub const fn new(delay: u64) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Returns the quiet period in milliseconds.
    #[must_use]
    pub const fn delay(&self) -> u64 {
        self.delay
    }

    /// Records a trigger at `now`, restarting the quiet period.
    pub fn schedule(&mut self, now: u64) {
        self.deadline = Some(now.saturating_add(self.delay));
    }

    /// Returns `true` if a firing is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns the pending deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Returns `true` and clears the pending firing once `now` reaches the deadline.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drops any pending firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

/// Limits firings to one per interval, with a trailing edge.
///
/// [`Throttle::try_fire`] fires immediately when the interval has elapsed
/// since the last firing. Otherwise the trigger is remembered and
/// [`Throttle::poll_trailing`] fires it once the interval has elapsed, so the
/// last trigger of a burst is never lost.
#[derive(Clone, Debug)]
pub struct Throttle {
    interval: u64,
    last_fired: Option<u64>,
    trailing: bool,
}

impl Throttle {
    /// Creates a throttle with the given minimum interval in milliseconds.
    #[must_use]
    pub const fn new(interval: u64) -> Self {
        Self {
            interval,
            last_fired: None,
            trailing: false,
        }
    }

    /// Returns the minimum interval in milliseconds.
    #[must_use]
    pub const fn interval(&self) -> u64 {
        self.interval
    }

    /// Returns `true` if the caller should act on this trigger now.
    ///
    /// When it returns `false` the trigger is kept as a trailing firing.
    pub fn try_fire(&mut self, now: u64) -> bool {
        if self.ready(now) {
            self.last_fired = Some(now);
            self.trailing = false;
            true
        } else {
            self.trailing = true;
            false
        }
    }

    /// Returns `true` if a trailing trigger is waiting.
    #[must_use]
    pub const fn has_trailing(&self) -> bool {
        self.trailing
    }

    /// Fires a waiting trailing trigger once the interval has elapsed.
    pub fn poll_trailing(&mut self, now: u64) -> bool {
        if self.trailing && self.ready(now) {
            self.last_fired = Some(now);
            self.trailing = false;
            true
        } else {
            false
        }
    }

    /// Forgets the last firing and any trailing trigger.
    pub fn reset(&mut self) {
        self.last_fired = None;
        self.trailing = false;
    }

    fn ready(&self, now: u64) -> bool {
        match self.last_fired {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.interval,
        }
    }
}

/// Fires periodically while running.
///
/// Missed periods do not accumulate: after a late poll the next firing is a
/// full period later.
#[derive(Clone, Debug)]
pub struct Interval {
    period: u64,
    next: Option<u64>,
}

impl Interval {
    /// Creates a stopped interval with the given period in milliseconds.
    #[must_use]
    pub const fn new(period: u64) -> Self {
        Self { period, next: None }
    }

    /// Returns the period in milliseconds.
    #[must_use]
    pub const fn period(&self) -> u64 {
        self.period
    }

    /// Starts (or restarts) the interval; the first firing is one period after `now`.
    pub fn start(&mut self, now: u64) {
        self.next = Some(now.saturating_add(self.period));
    }

    /// Stops the interval.
    pub fn stop(&mut self) {
        self.next = None;
    }

    /// Returns `true` while the interval is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Returns `true` if a period has elapsed, scheduling the next one.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.next {
            Some(next) if now >= next => {
                self.next = Some(now.saturating_add(self.period));
                true
            }
            _ => false,
        }
    }
}
