// Copyright 2025 the Gemini Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry implementation.
//!
//! ## Locking
//!
//! Two levels, both brief:
//!
//! - a table lock (`RwLock` over the handle map), write-held only while
//!   [`Registry::register`] inserts a fresh slot;
//! - a per-record lock guarding that one record's payload.
//!
//! [`Registry::resolve`] takes the table read lock, clones the slot `Arc`,
//! drops the table lock, then takes the record read lock just long enough to
//! clone the payload `Arc`. A slow [`Registry::replace`] on one record
//! therefore never blocks readers of any other record, and the snapshot a
//! reader walks away with can never be torn by a later replace.

use std::collections::HashMap;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::types::{Handle, RegistryError, Resolved, ResourceData, ResourceKind};

/// One record's mutable state. The slot survives removal so the handle can
/// never be reassigned.
#[derive(Debug)]
enum SlotState {
    Live(Arc<ResourceData>),
    Gone,
}

#[derive(Debug)]
struct Slot {
    kind: ResourceKind,
    state: RwLock<SlotState>,
}

/// A live-mutable, handle-indexed table of shared UI resources.
///
/// Replaces the fixed, restart-required resource tables of GEM-era toolkits:
/// consumers hold opaque [`Handle`]s rather than positions in a static table,
/// and [`replace`](Self::replace) swaps a record's payload in place while the
/// system runs. Every holder observes either the old or the new payload in
/// full, never a mixture.
///
/// ## Usage
///
/// One instance per application/session, shared by reference (it is `Send` and
/// `Sync`); readers and the occasional hot-swap writer need no external
/// coordination.
///
/// ## Lifecycle
///
/// - [`register`](Self::register) → fresh [`Handle`].
/// - [`replace`](Self::replace) → payload swapped atomically, same handle.
/// - [`remove`](Self::remove) → handle resolves to [`Resolved::Gone`] forever.
#[derive(Debug)]
pub struct Registry {
    slots: RwLock<HashMap<Handle, Arc<Slot>>>,
    next_id: AtomicU64,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Store `data` under a fresh handle.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Exhausted`] once the handle space is spent. No other
    /// failure exists; the error is fatal to this allocation attempt only.
    pub fn register(&self, data: ResourceData) -> Result<Handle, RegistryError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if id == u64::MAX || id == 0 {
            // The counter reached (or wrapped past) the ceiling; park it there
            // so every later call keeps failing instead of re-issuing old
            // identifiers. u64::MAX itself is reserved as the sentinel.
            self.next_id.store(u64::MAX, Ordering::Relaxed);
            return Err(RegistryError::Exhausted);
        }
        let handle = Handle::new(NonZeroU64::new(id).expect("nonzero checked above"));

        let slot = Arc::new(Slot {
            kind: data.kind(),
            state: RwLock::new(SlotState::Live(Arc::new(data))),
        });
        self.write_table().insert(handle, slot);
        log::debug!("registered resource {handle}");
        Ok(handle)
    }

    /// Look up a handle. Never fails.
    ///
    /// Removed and never-issued handles yield [`Resolved::Gone`]; live handles
    /// yield a payload snapshot that later [`replace`](Self::replace) calls
    /// cannot alter.
    pub fn resolve(&self, handle: Handle) -> Resolved {
        let Some(slot) = self.slot(handle) else {
            return Resolved::Gone;
        };
        match &*self.read_record(&slot) {
            SlotState::Live(data) => Resolved::Live(Arc::clone(data)),
            SlotState::Gone => Resolved::Gone,
        }
    }

    /// Atomically swap the payload of a live record.
    ///
    /// Concurrent [`resolve`](Self::resolve) callers observe either the old or
    /// the new payload in full.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownHandle`] if the handle is not currently live,
    /// [`RegistryError::KindMismatch`] if the handle is live but `data`'s kind
    /// differs from the record's immutable kind. Liveness is checked first, so
    /// a dead handle always reports `UnknownHandle` whatever the payload.
    /// Neither error changes any state.
    pub fn replace(&self, handle: Handle, data: ResourceData) -> Result<(), RegistryError> {
        let Some(slot) = self.slot(handle) else {
            return Err(RegistryError::UnknownHandle(handle));
        };
        let mut state = self.write_record(&slot);
        match &*state {
            SlotState::Live(_) => {
                if data.kind() != slot.kind {
                    return Err(RegistryError::KindMismatch {
                        expected: slot.kind,
                        found: data.kind(),
                    });
                }
                *state = SlotState::Live(Arc::new(data));
                log::debug!("replaced resource {handle}");
                Ok(())
            }
            SlotState::Gone => Err(RegistryError::UnknownHandle(handle)),
        }
    }

    /// Mark a live record Gone. The handle is never reassigned.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownHandle`] if the handle is not currently live
    /// (including a second `remove`). No state changes on error.
    pub fn remove(&self, handle: Handle) -> Result<(), RegistryError> {
        let Some(slot) = self.slot(handle) else {
            return Err(RegistryError::UnknownHandle(handle));
        };
        let mut state = self.write_record(&slot);
        match &*state {
            SlotState::Live(_) => {
                *state = SlotState::Gone;
                log::debug!("removed resource {handle}");
                Ok(())
            }
            SlotState::Gone => Err(RegistryError::UnknownHandle(handle)),
        }
    }

    /// Total handles ever issued and still tracked (live or Gone).
    pub fn len(&self) -> usize {
        self.read_table().len()
    }

    /// True when no handle has ever been issued.
    pub fn is_empty(&self) -> bool {
        self.read_table().is_empty()
    }

    /// Number of records that currently resolve to a live payload.
    pub fn live_count(&self) -> usize {
        self.read_table()
            .values()
            .filter(|slot| matches!(&*self.read_record(slot), SlotState::Live(_)))
            .count()
    }

    fn slot(&self, handle: Handle) -> Option<Arc<Slot>> {
        self.read_table().get(&handle).cloned()
    }

    // Lock poisoning can only follow a panic inside one of the short critical
    // sections here, none of which can panic; recover the guard so one
    // panicked reader thread elsewhere can't wedge the whole table.
    fn read_table(&self) -> std::sync::RwLockReadGuard<'_, HashMap<Handle, Arc<Slot>>> {
        self.slots.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_table(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<Handle, Arc<Slot>>> {
        self.slots.write().unwrap_or_else(|e| e.into_inner())
    }

    fn read_record<'a>(&self, slot: &'a Slot) -> std::sync::RwLockReadGuard<'a, SlotState> {
        slot.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_record<'a>(&self, slot: &'a Slot) -> std::sync::RwLockWriteGuard<'a, SlotState> {
        slot.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
