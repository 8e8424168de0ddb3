// Copyright 2025 the Gemini Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=gemini_input --heading-base-level=0

//! Gemini Input: non-blocking classification of raw input into UI events.
//!
//! ## Overview
//!
//! GEM disambiguated a click from a double click by spinning until the second
//! press did or did not arrive, stalling the UI thread for the whole window.
//! This crate replaces that with a timer-augmented state machine: feed raw
//! driver samples to [`Dispatcher::submit`](crate::dispatcher::Dispatcher::submit),
//! and ambiguity is resolved either by the second press arriving or by a
//! deadline expiring in [`advance`](crate::dispatcher::Dispatcher::advance).
//! Suspension lives in the *host's* existing blocking wait, parameterized by
//! [`next_deadline`](crate::dispatcher::Dispatcher::next_deadline) — never in a
//! spin loop here.
//!
//! ## Inputs and outputs
//!
//! A [`RawSample`](crate::types::RawSample) is a timestamped record from a
//! platform driver: press, release, move, key down, key up, tagged with a
//! [`PointerId`](crate::types::PointerId). The dispatcher validates it, runs
//! the per-pointer state machine, and queues
//! [`UiEvent`](crate::types::UiEvent)s — click, double click, drag start /
//! move / end, key events — strictly in the order the underlying causes were
//! resolved.
//!
//! ## Host loop integration
//!
//! 1) Block on "next raw sample OR [`next_deadline`](crate::dispatcher::Dispatcher::next_deadline)".
//! 2) [`submit`](crate::dispatcher::Dispatcher::submit) whatever samples arrived.
//! 3) [`advance`](crate::dispatcher::Dispatcher::advance) with the current
//!    monotonic time (see [`clock`]).
//! 4) [`drain`](crate::dispatcher::Dispatcher::drain) and deliver the events.
//!
//! `submit` and `advance` must be serialized by the host: pointer-state
//! transitions are not commutative. No call in this crate ever blocks.
//!
//! # Example
//!
//! ```rust
//! use gemini_input::{Dispatcher, EventKind, Point, RawSample, PRIMARY};
//!
//! let mut d = Dispatcher::default();
//!
//! // A press/release pair is only a *candidate* click...
//! d.submit(RawSample::press(PRIMARY, 1000, Point::new(10, 10))).unwrap();
//! d.submit(RawSample::release(PRIMARY, 1050, Point::new(10, 10))).unwrap();
//! assert_eq!(d.drain().count(), 0);
//!
//! // ...confirmed once the double-click window expires.
//! assert_eq!(d.next_deadline(), Some(1450));
//! d.advance(1450);
//! let ev: Vec<_> = d.drain().collect();
//! assert_eq!(ev[0].kind, EventKind::Click(Point::new(10, 10)));
//! assert_eq!(ev[0].timestamp, 1450);
//! ```
//!
//! This crate is `no_std` and uses `alloc`; the `std` feature (default) adds
//! the [`Instant`](std::time::Instant)-backed
//! [`MonotonicClock`](crate::clock::MonotonicClock).

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod clock;
pub mod dispatcher;
pub mod types;

pub use clock::{Clock, ManualClock};
#[cfg(feature = "std")]
pub use clock::MonotonicClock;
pub use dispatcher::{Dispatcher, PointerPhase};
pub use types::{
    DispatchConfig, EventKind, Modifiers, Point, PointerId, RawSample, SampleKind, SubmitError,
    UiEvent, PRIMARY,
};
