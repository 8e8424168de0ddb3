// Copyright 2025 the Gemini Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher implementation.
//!
//! ## Overview
//!
//! Consumes timestamped raw samples and produces classified events without ever
//! blocking or polling. Click/double-click ambiguity is resolved either by the
//! second press arriving (fast path) or by a per-pointer deadline expiring in
//! [`Dispatcher::advance`] (slow path, driven by the host's own wait
//! primitive).
//!
//! ## Classification
//!
//! - Press → Release with no qualifying motion arms a deadline; nothing is
//!   emitted yet (a *candidate click*).
//! - A second press before the deadline and within the click tolerance turns
//!   the chain into a double click, emitted on its release.
//! - Deadline expiry confirms the candidate as a single click, timestamped at
//!   the deadline.
//! - Motion beyond the drag tolerance while pressed starts a drag immediately;
//!   drags never wait on click disambiguation, and any chained click state is
//!   discarded.
//! - Key samples classify immediately.
//!
//! ## See Also
//!
//! [`clock`](crate::clock) for the time sources a host loop feeds this from.

use alloc::collections::{BTreeMap, VecDeque};
use alloc::vec::Vec;

use crate::types::{
    DispatchConfig, EventKind, Point, PointerId, RawSample, SampleKind, SubmitError, UiEvent,
};

/// Interaction phase of one tracked pointer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PointerPhase {
    /// No button down, no interaction in flight.
    #[default]
    Idle,
    /// Button down, motion still within the drag tolerance.
    Pressed,
    /// Motion exceeded the drag tolerance while pressed.
    Dragging,
}

/// A scheduled wake-up for a candidate click awaiting disambiguation.
///
/// At most one exists per pointer identity; a new qualifying press replaces it,
/// a drag discards it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct PendingTimer {
    /// When the candidate is confirmed as a single click, in ms.
    deadline: u64,
    /// Release position of the candidate, reported with the click.
    pos: Point,
}

/// Per-pointer tracking record.
#[derive(Copy, Clone, Debug)]
struct PointerState {
    position: Point,
    phase: PointerPhase,
    press_time: Option<u64>,
    release_time: Option<u64>,
    press_pos: Point,
    click_count: u8,
    pending: Option<PendingTimer>,
    last_seen: u64,
}

impl PointerState {
    fn new(first_seen: u64) -> Self {
        Self {
            position: Point::default(),
            phase: PointerPhase::Idle,
            press_time: None,
            release_time: None,
            press_pos: Point::default(),
            click_count: 0,
            pending: None,
            last_seen: first_seen,
        }
    }
}

// Chains longer than a double click start over. Kept private: raising this is
// the extension point for triple-click semantics.
const MAX_CLICK_CHAIN: u8 = 2;

/// Non-blocking click/double-click/drag classification state machine.
///
/// ## Usage
///
/// - Feed every raw driver sample to [`Dispatcher::submit`].
/// - On each host-loop iteration, call [`Dispatcher::advance`] with the current
///   monotonic time, then [`Dispatcher::drain`] the classified events.
/// - Use [`Dispatcher::next_deadline`] as the timeout for the host's own
///   blocking wait, so deferred clicks fire without any polling loop.
///
/// `submit` and `advance` must be serialized by the host; pointer-state
/// transitions are not commutative. Neither ever blocks.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    config: DispatchConfig,
    pointers: BTreeMap<PointerId, PointerState>,
    queue: VecDeque<UiEvent>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DispatchConfig::default())
    }
}

impl Dispatcher {
    /// Create a dispatcher with the given timing/tolerance configuration.
    pub const fn new(config: DispatchConfig) -> Self {
        Self {
            config,
            pointers: BTreeMap::new(),
            queue: VecDeque::new(),
        }
    }

    /// The active configuration.
    pub const fn config(&self) -> DispatchConfig {
        self.config
    }

    /// Current phase of a pointer. Unknown pointers are [`PointerPhase::Idle`].
    pub fn phase(&self, pointer: PointerId) -> PointerPhase {
        self.pointers
            .get(&pointer)
            .map(|s| s.phase)
            .unwrap_or(PointerPhase::Idle)
    }

    /// Number of pointer identities currently tracked.
    pub fn tracked_pointers(&self) -> usize {
        self.pointers.len()
    }

    /// Number of classified events waiting to be drained.
    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    /// True when no classified events are waiting.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Earliest deadline among all armed candidate-click timers.
    ///
    /// A host loop should wait on "next raw sample OR this deadline"; `None`
    /// means there is nothing time-driven outstanding and the host may block
    /// indefinitely on input.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pointers
            .values()
            .filter_map(|s| s.pending.map(|p| p.deadline))
            .min()
    }

    /// Take the queued classified events, in cause-resolution order.
    pub fn drain(&mut self) -> impl Iterator<Item = UiEvent> + '_ {
        self.queue.drain(..)
    }

    /// Accept one timestamped raw sample. Never blocks; returns immediately.
    ///
    /// Classified events produced by the sample (and by any of this pointer's
    /// deadlines the sample's timestamp has already passed) are appended to the
    /// outgoing queue.
    ///
    /// # Errors
    ///
    /// [`SubmitError::MalformedSample`] if a field required by the sample's
    /// kind is missing, and [`SubmitError::OrderingViolation`] if the timestamp
    /// regresses for this pointer. Rejected samples mutate no state.
    pub fn submit(&mut self, sample: RawSample) -> Result<(), SubmitError> {
        let pos = Self::validate(&sample)?;

        if let Some(state) = self.pointers.get(&sample.pointer) {
            if sample.timestamp < state.last_seen {
                return Err(SubmitError::OrderingViolation {
                    last: state.last_seen,
                    got: sample.timestamp,
                });
            }
            // A press on an identity that is already down would corrupt the
            // chain; reject it and keep the current interaction.
            if sample.kind == SampleKind::Press && state.phase != PointerPhase::Idle {
                return Err(SubmitError::MalformedSample("press while pointer already down"));
            }
        }

        let mut state = self
            .pointers
            .remove(&sample.pointer)
            .unwrap_or_else(|| PointerState::new(sample.timestamp));

        // A sample arriving at or past this pointer's deadline proves no second
        // press made it in time: confirm the deferred click first so the queue
        // stays in cause-resolution order even when `advance` runs late.
        if let Some(pending) = state.pending
            && sample.timestamp >= pending.deadline
        {
            self.confirm_click(sample.pointer, &mut state, pending);
        }

        match sample.kind {
            SampleKind::Press => self.on_press(&sample, &mut state, pos),
            SampleKind::Release => self.on_release(&sample, &mut state, pos),
            SampleKind::Move => self.on_move(&sample, &mut state, pos),
            SampleKind::KeyDown => self.emit(
                sample.pointer,
                sample.timestamp,
                EventKind::KeyDown {
                    keycode: sample.keycode.unwrap_or_default(),
                    modifiers: sample.modifiers,
                },
            ),
            SampleKind::KeyUp => self.emit(
                sample.pointer,
                sample.timestamp,
                EventKind::KeyUp {
                    keycode: sample.keycode.unwrap_or_default(),
                    modifiers: sample.modifiers,
                },
            ),
        }

        state.last_seen = sample.timestamp;
        if let Some(p) = pos {
            state.position = p;
        }
        self.pointers.insert(sample.pointer, state);
        Ok(())
    }

    /// Resolve every armed timer whose deadline has passed, emitting the
    /// deferred single clicks, and forget pointers idle past the double-click
    /// window.
    ///
    /// This is the only time-driven entry point; the host calls it when its
    /// wait returns (for a sample or because [`Dispatcher::next_deadline`]
    /// expired). A deadline for a pointer with no outstanding candidate is a
    /// no-op, not a fault.
    pub fn advance(&mut self, now_ms: u64) {
        // Expired timers fire in deadline order across pointers, so the queue
        // reflects the order the causes resolved.
        let mut expired: Vec<(u64, PointerId)> = self
            .pointers
            .iter()
            .filter_map(|(id, s)| {
                s.pending
                    .filter(|p| p.deadline <= now_ms)
                    .map(|p| (p.deadline, *id))
            })
            .collect();
        expired.sort_unstable();

        for (_, id) in expired {
            let Some(mut state) = self.pointers.remove(&id) else {
                continue;
            };
            if let Some(pending) = state.pending.take() {
                self.confirm_click(id, &mut state, pending);
            }
            self.pointers.insert(id, state);
        }

        let window = self.config.double_click_window_ms;
        self.pointers.retain(|_, s| {
            s.phase != PointerPhase::Idle
                || s.pending.is_some()
                || s.last_seen.saturating_add(window) > now_ms
        });
    }

    fn on_press(&mut self, sample: &RawSample, state: &mut PointerState, pos: Option<Point>) {
        let pos = pos.unwrap_or_default();
        if let Some(pending) = state.pending.take() {
            if pos.dist2(state.press_pos) <= sq(self.config.click_tolerance_px) {
                // Qualifying second press: the candidate becomes a double
                // click, resolved on its release. Timer is gone.
                state.click_count = MAX_CLICK_CHAIN;
            } else {
                // Too far to chain: the candidate can no longer be superseded.
                // Confirm it here, timestamped at the resolving press.
                log::trace!("flushing candidate click for pointer {}", sample.pointer);
                state.click_count = 0;
                self.emit(sample.pointer, sample.timestamp, EventKind::Click(pending.pos));
            }
        }

        state.phase = PointerPhase::Pressed;
        state.press_time = Some(sample.timestamp);
        state.press_pos = pos;
    }

    fn on_release(&mut self, sample: &RawSample, state: &mut PointerState, pos: Option<Point>) {
        let pos = pos.unwrap_or_default();
        match state.phase {
            PointerPhase::Pressed => {
                state.release_time = Some(sample.timestamp);
                state.phase = PointerPhase::Idle;
                if state.click_count >= MAX_CLICK_CHAIN {
                    // Second release of a qualified chain: resolved, no wait.
                    state.click_count = 0;
                    self.emit(sample.pointer, sample.timestamp, EventKind::DoubleClick(pos));
                } else {
                    // Candidate click: arm the deadline, emit nothing yet.
                    state.click_count = 1;
                    state.pending = Some(PendingTimer {
                        deadline: sample.timestamp + self.config.double_click_window_ms,
                        pos,
                    });
                }
            }
            PointerPhase::Dragging => {
                state.release_time = Some(sample.timestamp);
                state.phase = PointerPhase::Idle;
                self.emit(sample.pointer, sample.timestamp, EventKind::DragEnd(pos));
            }
            // Release with no tracked press (e.g. a press that predates this
            // dispatcher). Position update only.
            PointerPhase::Idle => {}
        }
    }

    fn on_move(&mut self, sample: &RawSample, state: &mut PointerState, pos: Option<Point>) {
        let pos = pos.unwrap_or_default();
        match state.phase {
            PointerPhase::Pressed => {
                if pos.dist2(state.press_pos) > sq(self.config.drag_tolerance_px) {
                    // Pointer-down-and-move is unambiguous: drag starts now and
                    // click classification no longer applies, including any
                    // chained candidate.
                    log::trace!("drag start for pointer {}", sample.pointer);
                    state.phase = PointerPhase::Dragging;
                    state.pending = None;
                    state.click_count = 0;
                    self.emit(sample.pointer, sample.timestamp, EventKind::DragStart(pos));
                }
            }
            PointerPhase::Dragging => {
                self.emit(sample.pointer, sample.timestamp, EventKind::DragMove(pos));
            }
            PointerPhase::Idle => {}
        }
    }

    /// Emit the deferred click for a resolved candidate, timestamped at its
    /// deadline, and reset the chain.
    fn confirm_click(&mut self, pointer: PointerId, state: &mut PointerState, pending: PendingTimer) {
        state.pending = None;
        state.click_count = 0;
        self.emit(pointer, pending.deadline, EventKind::Click(pending.pos));
    }

    fn emit(&mut self, pointer: PointerId, timestamp: u64, kind: EventKind) {
        self.queue.push_back(UiEvent {
            pointer,
            timestamp,
            kind,
        });
    }

    /// Check that the fields required by the sample's kind are present, and
    /// return the position for pointer kinds.
    fn validate(sample: &RawSample) -> Result<Option<Point>, SubmitError> {
        match sample.kind {
            SampleKind::Press | SampleKind::Release | SampleKind::Move => match sample.pos {
                Some(p) => Ok(Some(p)),
                None => Err(SubmitError::MalformedSample("pointer sample without position")),
            },
            SampleKind::KeyDown | SampleKind::KeyUp => {
                if sample.keycode.is_none() {
                    return Err(SubmitError::MalformedSample("key sample without keycode"));
                }
                Ok(None)
            }
        }
    }
}

const fn sq(v: i32) -> i64 {
    (v as i64) * (v as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Modifiers, PRIMARY};
    use alloc::vec::Vec;

    fn pid(n: u64) -> PointerId {
        PointerId::new(n).unwrap()
    }

    fn drain(d: &mut Dispatcher) -> Vec<UiEvent> {
        d.drain().collect()
    }

    #[test]
    fn single_click_fires_at_deadline_not_earlier() {
        let mut d = Dispatcher::default();
        d.submit(RawSample::press(PRIMARY, 1000, Point::new(10, 10))).unwrap();
        d.submit(RawSample::release(PRIMARY, 1050, Point::new(10, 10))).unwrap();
        assert!(drain(&mut d).is_empty(), "candidate must not emit yet");

        // Just before the deadline: still nothing.
        d.advance(1449);
        assert!(drain(&mut d).is_empty(), "click emitted before deadline");

        d.advance(1450);
        let ev = drain(&mut d);
        assert_eq!(ev.len(), 1);
        assert_eq!(ev[0].kind, EventKind::Click(Point::new(10, 10)));
        assert_eq!(ev[0].timestamp, 1450, "click carries the deadline time");
    }

    #[test]
    fn double_click_worked_example() {
        // Press@t0(10,10) → Release@t0+50 → Press@t0+100(11,11) → Release@t0+120
        // with window=400ms, tolerance=3px ⇒ one DoubleClick at t0+120, no Click.
        let t0 = 5000;
        let mut d = Dispatcher::default();
        d.submit(RawSample::press(PRIMARY, t0, Point::new(10, 10))).unwrap();
        d.submit(RawSample::release(PRIMARY, t0 + 50, Point::new(10, 10))).unwrap();
        d.submit(RawSample::press(PRIMARY, t0 + 100, Point::new(11, 11))).unwrap();
        d.submit(RawSample::release(PRIMARY, t0 + 120, Point::new(11, 11))).unwrap();
        d.advance(t0 + 10_000);

        let ev = drain(&mut d);
        assert_eq!(ev.len(), 1);
        assert_eq!(ev[0].kind, EventKind::DoubleClick(Point::new(11, 11)));
        assert_eq!(ev[0].timestamp, t0 + 120);
    }

    #[test]
    fn timer_driven_click_worked_example() {
        // Press@t0 → Release@t0+50, window=400 ⇒ one Click at t0+450.
        let t0 = 100;
        let mut d = Dispatcher::default();
        d.submit(RawSample::press(PRIMARY, t0, Point::new(10, 10))).unwrap();
        d.submit(RawSample::release(PRIMARY, t0 + 50, Point::new(10, 10))).unwrap();
        assert_eq!(d.next_deadline(), Some(t0 + 450));

        d.advance(t0 + 450);
        let ev = drain(&mut d);
        assert_eq!(ev.len(), 1);
        assert_eq!(ev[0].kind, EventKind::Click(Point::new(10, 10)));
        assert_eq!(ev[0].timestamp, t0 + 450);
        assert_eq!(d.next_deadline(), None);
    }

    #[test]
    fn drag_cancels_click_classification() {
        let mut d = Dispatcher::default();
        d.submit(RawSample::press(PRIMARY, 0, Point::new(0, 0))).unwrap();
        // Within tolerance (3px): not a drag yet.
        d.submit(RawSample::motion(PRIMARY, 10, Point::new(2, 2))).unwrap();
        assert!(drain(&mut d).is_empty());
        assert_eq!(d.phase(PRIMARY), PointerPhase::Pressed);

        d.submit(RawSample::motion(PRIMARY, 20, Point::new(10, 0))).unwrap();
        d.submit(RawSample::motion(PRIMARY, 30, Point::new(20, 0))).unwrap();
        d.submit(RawSample::release(PRIMARY, 40, Point::new(25, 0))).unwrap();
        d.advance(10_000);

        let kinds: Vec<_> = drain(&mut d).into_iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [
                EventKind::DragStart(Point::new(10, 0)),
                EventKind::DragMove(Point::new(20, 0)),
                EventKind::DragEnd(Point::new(25, 0)),
            ]
        );
    }

    #[test]
    fn drag_after_chained_press_drops_candidate_entirely() {
        // First pair becomes a candidate, second press qualifies for a chain,
        // then the second press drags: nothing click-like may survive.
        let mut d = Dispatcher::default();
        d.submit(RawSample::press(PRIMARY, 0, Point::new(5, 5))).unwrap();
        d.submit(RawSample::release(PRIMARY, 30, Point::new(5, 5))).unwrap();
        d.submit(RawSample::press(PRIMARY, 100, Point::new(6, 6))).unwrap();
        d.submit(RawSample::motion(PRIMARY, 150, Point::new(40, 40))).unwrap();
        d.submit(RawSample::release(PRIMARY, 200, Point::new(50, 50))).unwrap();
        d.advance(10_000);

        let kinds: Vec<_> = drain(&mut d).into_iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [
                EventKind::DragStart(Point::new(40, 40)),
                EventKind::DragEnd(Point::new(50, 50)),
            ]
        );
        assert_eq!(d.next_deadline(), None);
    }

    #[test]
    fn far_second_press_flushes_candidate_as_click() {
        let mut d = Dispatcher::default();
        d.submit(RawSample::press(PRIMARY, 0, Point::new(0, 0))).unwrap();
        d.submit(RawSample::release(PRIMARY, 50, Point::new(0, 0))).unwrap();
        // Inside the window but far outside the 3px click tolerance.
        d.submit(RawSample::press(PRIMARY, 100, Point::new(100, 100))).unwrap();

        let ev = drain(&mut d);
        assert_eq!(ev.len(), 1);
        assert_eq!(ev[0].kind, EventKind::Click(Point::new(0, 0)));
        assert_eq!(ev[0].timestamp, 100, "flush is timestamped at the resolving press");

        // The far press starts a fresh candidate of its own.
        d.submit(RawSample::release(PRIMARY, 150, Point::new(100, 100))).unwrap();
        d.advance(150 + 400);
        let ev = drain(&mut d);
        assert_eq!(ev.len(), 1);
        assert_eq!(ev[0].kind, EventKind::Click(Point::new(100, 100)));
    }

    #[test]
    fn late_sample_resolves_deadline_before_itself() {
        let mut d = Dispatcher::default();
        d.submit(RawSample::press(PRIMARY, 0, Point::new(0, 0))).unwrap();
        d.submit(RawSample::release(PRIMARY, 50, Point::new(0, 0))).unwrap();
        // Host never called advance; the next press arrives after the deadline
        // (450) and must not chain into a double click.
        d.submit(RawSample::press(PRIMARY, 600, Point::new(0, 0))).unwrap();
        d.submit(RawSample::release(PRIMARY, 620, Point::new(0, 0))).unwrap();
        d.advance(2000);

        let ev = drain(&mut d);
        assert_eq!(ev.len(), 2);
        assert_eq!(ev[0].kind, EventKind::Click(Point::new(0, 0)));
        assert_eq!(ev[0].timestamp, 450, "first click resolves at its deadline");
        assert_eq!(ev[1].kind, EventKind::Click(Point::new(0, 0)));
        assert_eq!(ev[1].timestamp, 620 + 400);
    }

    #[test]
    fn third_press_starts_a_new_candidate() {
        let mut d = Dispatcher::default();
        for (t_down, t_up) in [(0, 20), (100, 120)] {
            d.submit(RawSample::press(PRIMARY, t_down, Point::new(0, 0))).unwrap();
            d.submit(RawSample::release(PRIMARY, t_up, Point::new(0, 0))).unwrap();
        }
        // Double click resolved; the third press within the old window chains
        // nothing and its release arms a fresh candidate.
        d.submit(RawSample::press(PRIMARY, 200, Point::new(0, 0))).unwrap();
        d.submit(RawSample::release(PRIMARY, 220, Point::new(0, 0))).unwrap();
        d.advance(10_000);

        let kinds: Vec<_> = drain(&mut d).into_iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [
                EventKind::DoubleClick(Point::new(0, 0)),
                EventKind::Click(Point::new(0, 0)),
            ]
        );
    }

    #[test]
    fn ordering_violation_is_rejected_without_state_change() {
        let mut d = Dispatcher::default();
        d.submit(RawSample::press(PRIMARY, 100, Point::new(0, 0))).unwrap();
        let err = d.submit(RawSample::release(PRIMARY, 90, Point::new(0, 0)));
        assert_eq!(err, Err(SubmitError::OrderingViolation { last: 100, got: 90 }));
        assert_eq!(d.phase(PRIMARY), PointerPhase::Pressed, "state must be untouched");

        // The pointer still works with a valid timestamp.
        d.submit(RawSample::release(PRIMARY, 110, Point::new(0, 0))).unwrap();
        d.advance(110 + 400);
        assert_eq!(drain(&mut d).len(), 1);
    }

    #[test]
    fn equal_timestamps_are_accepted() {
        let mut d = Dispatcher::default();
        d.submit(RawSample::press(PRIMARY, 100, Point::new(0, 0))).unwrap();
        assert!(d.submit(RawSample::release(PRIMARY, 100, Point::new(0, 0))).is_ok());
    }

    #[test]
    fn malformed_samples_are_rejected_without_state_change() {
        let mut d = Dispatcher::default();
        let no_pos = RawSample {
            pos: None,
            ..RawSample::press(PRIMARY, 0, Point::new(0, 0))
        };
        assert_eq!(
            d.submit(no_pos),
            Err(SubmitError::MalformedSample("pointer sample without position"))
        );
        assert_eq!(d.tracked_pointers(), 0);

        let no_key = RawSample {
            keycode: None,
            ..RawSample::key_down(PRIMARY, 0, 1, Modifiers::empty())
        };
        assert_eq!(
            d.submit(no_key),
            Err(SubmitError::MalformedSample("key sample without keycode"))
        );
        assert!(d.is_empty());
    }

    #[test]
    fn key_events_classify_immediately() {
        let mut d = Dispatcher::default();
        d.submit(RawSample::key_down(PRIMARY, 5, 0x0D, Modifiers::CTRL)).unwrap();
        d.submit(RawSample::key_up(PRIMARY, 9, 0x0D, Modifiers::CTRL)).unwrap();
        let ev = drain(&mut d);
        assert_eq!(
            ev[0].kind,
            EventKind::KeyDown {
                keycode: 0x0D,
                modifiers: Modifiers::CTRL
            }
        );
        assert_eq!(
            ev[1].kind,
            EventKind::KeyUp {
                keycode: 0x0D,
                modifiers: Modifiers::CTRL
            }
        );
        assert_eq!(ev[0].timestamp, 5);
        assert_eq!(ev[1].timestamp, 9);
    }

    #[test]
    fn pointers_are_tracked_independently() {
        let mut d = Dispatcher::default();
        d.submit(RawSample::press(pid(1), 0, Point::new(0, 0))).unwrap();
        d.submit(RawSample::press(pid(2), 10, Point::new(50, 50))).unwrap();
        d.submit(RawSample::release(pid(1), 20, Point::new(0, 0))).unwrap();
        // Pointer 2 drags while pointer 1's candidate is still armed.
        d.submit(RawSample::motion(pid(2), 30, Point::new(80, 80))).unwrap();
        d.advance(20 + 400);

        let ev = drain(&mut d);
        assert_eq!(ev.len(), 2);
        assert_eq!(ev[0].kind, EventKind::DragStart(Point::new(80, 80)));
        assert_eq!(ev[0].pointer, pid(2));
        assert_eq!(ev[1].kind, EventKind::Click(Point::new(0, 0)));
        assert_eq!(ev[1].pointer, pid(1));
    }

    #[test]
    fn expired_timers_fire_in_deadline_order() {
        let mut d = Dispatcher::default();
        // Pointer 3's candidate arms later but with an earlier deadline than
        // pointer 1 would with these timestamps reversed; verify order by time.
        d.submit(RawSample::press(pid(3), 0, Point::new(1, 1))).unwrap();
        d.submit(RawSample::release(pid(3), 10, Point::new(1, 1))).unwrap();
        d.submit(RawSample::press(pid(1), 50, Point::new(2, 2))).unwrap();
        d.submit(RawSample::release(pid(1), 60, Point::new(2, 2))).unwrap();
        d.advance(10_000);

        let ev = drain(&mut d);
        assert_eq!(ev.len(), 2);
        assert_eq!(ev[0].pointer, pid(3), "earlier deadline resolves first");
        assert_eq!(ev[0].timestamp, 410);
        assert_eq!(ev[1].pointer, pid(1));
        assert_eq!(ev[1].timestamp, 460);
    }

    #[test]
    fn advance_without_pending_is_a_noop() {
        let mut d = Dispatcher::default();
        d.advance(1_000_000);
        assert!(d.is_empty());
    }

    #[test]
    fn idle_pointers_are_pruned_after_the_window() {
        let mut d = Dispatcher::default();
        d.submit(RawSample::press(PRIMARY, 0, Point::new(0, 0))).unwrap();
        d.submit(RawSample::release(PRIMARY, 50, Point::new(0, 0))).unwrap();
        d.advance(100);
        assert_eq!(d.tracked_pointers(), 1, "armed pointer must be kept");

        // The deadline confirms the click and the pointer has then been idle
        // past the window, so its record goes away in the same call.
        d.advance(50 + 400 + 1);
        assert_eq!(drain(&mut d).len(), 1);
        assert_eq!(d.tracked_pointers(), 0, "idle pointer past the window is dropped");
    }

    #[test]
    fn release_while_idle_is_ignored() {
        let mut d = Dispatcher::default();
        d.submit(RawSample::release(PRIMARY, 0, Point::new(3, 3))).unwrap();
        d.submit(RawSample::motion(PRIMARY, 10, Point::new(4, 4))).unwrap();
        assert!(d.is_empty());
        assert_eq!(d.phase(PRIMARY), PointerPhase::Idle);
    }

    #[test]
    fn press_while_pressed_is_rejected_and_keeps_current_interaction() {
        let mut d = Dispatcher::default();
        d.submit(RawSample::press(PRIMARY, 0, Point::new(0, 0))).unwrap();
        let err = d.submit(RawSample::press(PRIMARY, 10, Point::new(9, 9)));
        assert_eq!(
            err,
            Err(SubmitError::MalformedSample("press while pointer already down"))
        );
        // The glitch press must not have restarted the gesture origin.
        d.submit(RawSample::motion(PRIMARY, 20, Point::new(10, 0))).unwrap();
        let ev = drain(&mut d);
        assert_eq!(ev.len(), 1);
        assert_eq!(ev[0].kind, EventKind::DragStart(Point::new(10, 0)));
    }
}
