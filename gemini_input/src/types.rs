// Copyright 2025 the Gemini Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the dispatcher: samples, classified events, configuration, and errors.
//!
//! ## Overview
//!
//! These types describe the dispatcher's wire contract. [`RawSample`] is what a
//! platform input driver delivers; [`UiEvent`] is what the dispatcher hands the
//! windowing/widget layer after classification.

use bitflags::bitflags;
use core::num::NonZeroU64;

/// Pointer identifier for tracking multiple concurrent input sources.
///
/// A pointer identity is a logical input source — a specific mouse button or a
/// touch contact — tracked independently of all others. Key samples also carry
/// one (the originating device) so a host can route per-seat.
pub type PointerId = NonZeroU64;

/// The conventional single-mouse pointer identity.
pub const PRIMARY: PointerId = PointerId::MIN;

/// An integer screen position.
///
/// All coordinates in this crate are integral; distance comparisons are done in
/// squared form so no float ever enters the pipeline.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal coordinate, in pixels.
    pub x: i32,
    /// Vertical coordinate, in pixels.
    pub y: i32,
}

impl Point {
    /// Create a point from pixel coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`, widened to `i64`.
    pub const fn dist2(self, other: Self) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        dx * dx + dy * dy
    }
}

bitflags! {
    /// Keyboard modifier state carried on key samples and key events.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Either shift key.
        const SHIFT = 0b0000_0001;
        /// Either control key.
        const CTRL  = 0b0000_0010;
        /// Either alt/meta-left key.
        const ALT   = 0b0000_0100;
        /// Platform command/super key.
        const META  = 0b0000_1000;
    }
}

/// The kind of a raw input sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SampleKind {
    /// Button or contact went down.
    Press,
    /// Button or contact came up.
    Release,
    /// Pointer moved.
    Move,
    /// Key went down.
    KeyDown,
    /// Key came up.
    KeyUp,
}

/// A timestamped raw input sample from a platform driver.
///
/// This is deliberately a loose record rather than a fully typed event: the
/// dispatcher is the trust boundary for driver input, and it validates that the
/// fields required by `kind` are present (position for pointer kinds, keycode
/// for key kinds) before touching any state. Use the constructors to build
/// well-formed samples.
///
/// Timestamps are monotonic milliseconds; the dispatcher rejects per-pointer
/// regressions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RawSample {
    /// Originating pointer identity.
    pub pointer: PointerId,
    /// Monotonic timestamp in milliseconds.
    pub timestamp: u64,
    /// What happened.
    pub kind: SampleKind,
    /// Pointer position; required for `Press`/`Release`/`Move`.
    pub pos: Option<Point>,
    /// Key code; required for `KeyDown`/`KeyUp`.
    pub keycode: Option<u32>,
    /// Modifier state at sample time (meaningful for key kinds).
    pub modifiers: Modifiers,
}

impl RawSample {
    /// A button-down sample at `pos`.
    pub const fn press(pointer: PointerId, timestamp: u64, pos: Point) -> Self {
        Self {
            pointer,
            timestamp,
            kind: SampleKind::Press,
            pos: Some(pos),
            keycode: None,
            modifiers: Modifiers::empty(),
        }
    }

    /// A button-up sample at `pos`.
    pub const fn release(pointer: PointerId, timestamp: u64, pos: Point) -> Self {
        Self {
            pointer,
            timestamp,
            kind: SampleKind::Release,
            pos: Some(pos),
            keycode: None,
            modifiers: Modifiers::empty(),
        }
    }

    /// A pointer-motion sample at `pos`.
    pub const fn motion(pointer: PointerId, timestamp: u64, pos: Point) -> Self {
        Self {
            pointer,
            timestamp,
            kind: SampleKind::Move,
            pos: Some(pos),
            keycode: None,
            modifiers: Modifiers::empty(),
        }
    }

    /// A key-down sample.
    pub const fn key_down(
        pointer: PointerId,
        timestamp: u64,
        keycode: u32,
        modifiers: Modifiers,
    ) -> Self {
        Self {
            pointer,
            timestamp,
            kind: SampleKind::KeyDown,
            pos: None,
            keycode: Some(keycode),
            modifiers,
        }
    }

    /// A key-up sample.
    pub const fn key_up(
        pointer: PointerId,
        timestamp: u64,
        keycode: u32,
        modifiers: Modifiers,
    ) -> Self {
        Self {
            pointer,
            timestamp,
            kind: SampleKind::KeyUp,
            pos: None,
            keycode: Some(keycode),
            modifiers,
        }
    }
}

/// A classified event produced by the dispatcher.
///
/// Events are delivered strictly in the order their underlying causes were
/// resolved. A timer-driven click carries the timer's fire time, not the
/// original press time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UiEvent {
    /// Pointer identity the event belongs to.
    pub pointer: PointerId,
    /// Monotonic timestamp in milliseconds at which the cause was resolved.
    pub timestamp: u64,
    /// The classification.
    pub kind: EventKind,
}

/// Classification carried by a [`UiEvent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// A confirmed single click at the release position.
    Click(Point),
    /// A double click at the second release position.
    DoubleClick(Point),
    /// Motion exceeded the drag tolerance while pressed.
    DragStart(Point),
    /// Motion while dragging.
    DragMove(Point),
    /// Release while dragging.
    DragEnd(Point),
    /// A key went down.
    KeyDown {
        /// Platform key code.
        keycode: u32,
        /// Modifier state at sample time.
        modifiers: Modifiers,
    },
    /// A key came up.
    KeyUp {
        /// Platform key code.
        keycode: u32,
        /// Modifier state at sample time.
        modifiers: Modifiers,
    },
}

/// Timing and tolerance configuration for classification.
///
/// Defaults follow common desktop conventions: a 400 ms double-click window and
/// 3-pixel spatial tolerances.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DispatchConfig {
    /// How long after a candidate click's release a second press may still turn
    /// it into a double click, in milliseconds.
    pub double_click_window_ms: u64,
    /// Motion beyond this many pixels while pressed starts a drag.
    pub drag_tolerance_px: i32,
    /// A chaining press must land within this many pixels of the prior press
    /// to count toward a double click.
    pub click_tolerance_px: i32,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            double_click_window_ms: 400,
            drag_tolerance_px: 3,
            click_tolerance_px: 3,
        }
    }
}

/// Rejection reasons for [`Dispatcher::submit`](crate::dispatcher::Dispatcher::submit).
///
/// A rejected sample mutates no state; the caller may drop it or surface it to
/// diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// A field required by the sample's kind was missing.
    MalformedSample(&'static str),
    /// The sample's timestamp regressed relative to the last sample seen for
    /// the same pointer identity.
    OrderingViolation {
        /// Last timestamp accepted for the pointer.
        last: u64,
        /// Timestamp of the rejected sample.
        got: u64,
    },
}

impl core::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MalformedSample(why) => write!(f, "malformed sample: {why}"),
            Self::OrderingViolation { last, got } => {
                write!(f, "timestamp regression: last seen {last} ms, got {got} ms")
            }
        }
    }
}

impl core::error::Error for SubmitError {}
