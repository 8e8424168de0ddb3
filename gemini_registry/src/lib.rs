// Copyright 2025 the Gemini Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=gemini_registry --heading-base-level=0

//! Gemini Registry: shared UI resources that hot-swap without a restart.
//!
//! ## Overview
//!
//! GEM-era toolkits addressed fonts, cursors, and icons by position in a
//! static table baked at startup; changing one meant restarting the system.
//! This crate replaces that with an owned [`Registry`](crate::registry::Registry)
//! instance (lifecycle tied to the application/session, not process startup)
//! holding records behind opaque [`Handle`](crate::types::Handle)s:
//!
//! - [`register`](crate::registry::Registry::register) a payload, get a handle;
//! - [`replace`](crate::registry::Registry::replace) the payload in place while
//!   other subsystems keep their handles — they see the update on their next
//!   resolve, whole or not at all;
//! - [`remove`](crate::registry::Registry::remove) a record; the handle then
//!   resolves to an explicit [`Gone`](crate::types::Resolved::Gone) forever
//!   and is never reassigned.
//!
//! [`resolve`](crate::registry::Registry::resolve) never fails and is safe
//! from any thread; writers lock only the one record they mutate, so a slow
//! resource reload never stalls unrelated readers.
//!
//! # Example
//!
//! ```rust
//! use gemini_registry::{FontData, Registry, Resolved, ResourceData};
//!
//! let reg = Registry::new();
//! let f1 = ResourceData::Font(FontData {
//!     height: 8, ascender: 6, bits: vec![0; 8], left_edges: vec![0, 8],
//! });
//! let h = reg.register(f1).unwrap();
//!
//! // Hot-swap: holders of `h` see the new strike on their next resolve.
//! let f2 = ResourceData::Font(FontData {
//!     height: 16, ascender: 12, bits: vec![0; 16], left_edges: vec![0, 8],
//! });
//! reg.replace(h, f2).unwrap();
//!
//! reg.remove(h).unwrap();
//! assert_eq!(reg.resolve(h), Resolved::Gone);
//! ```

pub mod registry;
pub mod types;

pub use registry::Registry;
pub use types::{
    CursorData, FontData, Handle, IconData, PaletteData, RegistryError, Resolved, ResourceData,
    ResourceKind,
};
