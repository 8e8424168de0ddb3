// Copyright 2025 the Gemini Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic time sources.
//!
//! The dispatcher itself never reads a clock: every sample carries its own
//! timestamp and [`advance`](crate::dispatcher::Dispatcher::advance) takes the
//! current time as an argument. A [`Clock`] is what the *host loop* consults to
//! produce that argument and to turn
//! [`next_deadline`](crate::dispatcher::Dispatcher::next_deadline) into a
//! wait-with-timeout, so the whole pipeline stays testable with a fake time
//! source.

use core::cell::Cell;

/// A monotonic millisecond clock.
///
/// Implementations must never go backwards. Absolute origin is arbitrary; only
/// differences are meaningful.
pub trait Clock {
    /// Current monotonic time in milliseconds.
    fn now_ms(&self) -> u64;
}

/// A clock that only moves when told to. Intended for tests and hosts that own
/// their own notion of time (replay, simulation).
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    /// Create a clock starting at `start_ms`.
    pub const fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Move time forward by `delta_ms`.
    pub fn tick(&self, delta_ms: u64) {
        self.now.set(self.now.get() + delta_ms);
    }

    /// Jump to an absolute time. Saturating: the clock never moves backwards.
    pub fn set(&self, now_ms: u64) {
        if now_ms > self.now.get() {
            self.now.set(now_ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Real monotonic clock anchored to construction time.
#[cfg(feature = "std")]
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    epoch: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicClock {
    /// Create a clock whose zero is now.
    pub fn new() -> Self {
        Self {
            epoch: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for MonotonicClock {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "u64 milliseconds cover half a billion years of uptime."
    )]
    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}
