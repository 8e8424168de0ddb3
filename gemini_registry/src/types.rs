// Copyright 2025 the Gemini Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the registry: handles, resource kinds and payloads,
//! resolution results, and errors.

use std::num::NonZeroU64;
use std::sync::Arc;

/// Opaque stable identifier for a registry entry.
///
/// ## Semantics
///
/// - Issued by [`Registry::register`](crate::registry::Registry::register);
///   unique for the lifetime of the registry.
/// - Never reused: after [`remove`](crate::registry::Registry::remove) the
///   handle keeps resolving to [`Resolved::Gone`] forever, so a stale handle
///   can never alias a different resource.
/// - Distinct from any storage position; nothing about a handle's value
///   reflects where or whether the record is stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(NonZeroU64);

impl Handle {
    pub(crate) const fn new(id: NonZeroU64) -> Self {
        Self(id)
    }

    /// The raw identifier, for diagnostics and serialization.
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of resource a record holds. Immutable for the life of a handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A monochrome bitmap font.
    Font,
    /// A pointer cursor image with a hot spot.
    Cursor,
    /// A small monochrome icon.
    Icon,
    /// A pen lookup table.
    Palette,
}

/// A monochrome bitmap font in 16-bit strike form.
///
/// Glyphs live side by side in one wide strike; `left_edges[g]..left_edges[g+1]`
/// is glyph `g`'s horizontal extent and `bits` holds `height` rows of the
/// strike, one `u16` per 16-pixel column group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontData {
    /// Total row count of the strike.
    pub height: u16,
    /// Rows from the top of the strike to the baseline.
    pub ascender: u16,
    /// Strike bitmap, row major.
    pub bits: Vec<u16>,
    /// Per-glyph left edges into the strike, one extra entry terminating the
    /// last glyph.
    pub left_edges: Vec<u16>,
}

/// A pointer cursor image: a 16-pixel-wide monochrome mask plus hot spot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CursorData {
    /// Hot spot x offset within the image.
    pub hot_x: u16,
    /// Hot spot y offset within the image.
    pub hot_y: u16,
    /// One `u16` per row, bit 0 at the left.
    pub rows: Vec<u16>,
}

/// A small monochrome icon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconData {
    /// Width in pixels (at most 16 per row word).
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
    /// One `u16` per row, bit 0 at the left.
    pub rows: Vec<u16>,
}

/// A pen lookup table mapping an 8-bit pen index to a device pen.
///
/// On monochrome devices, pens 0..=127 render black and 128..=255 render
/// white; use [`PaletteData::WHITE`] for future-proof white.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteData {
    /// Device pen per index.
    pub pens: Vec<u8>,
}

impl PaletteData {
    /// The canonical white pen.
    pub const WHITE: u8 = 255;
    /// The canonical black pen.
    pub const BLACK: u8 = 0;
}

/// The payload of a registry record: one of the supported resource kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceData {
    /// A monochrome bitmap font.
    Font(FontData),
    /// A pointer cursor image.
    Cursor(CursorData),
    /// A small monochrome icon.
    Icon(IconData),
    /// A pen lookup table.
    Palette(PaletteData),
}

impl ResourceData {
    /// The kind tag of this payload.
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Font(_) => ResourceKind::Font,
            Self::Cursor(_) => ResourceKind::Cursor,
            Self::Icon(_) => ResourceKind::Icon,
            Self::Palette(_) => ResourceKind::Palette,
        }
    }
}

/// Result of [`Registry::resolve`](crate::registry::Registry::resolve).
///
/// `Gone` is a value, not an error: a removed or never-issued handle resolves
/// to it explicitly rather than failing, so holders of stale handles get a
/// clean "no longer live" indication instead of undefined content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    /// The record is live; the snapshot is immune to later replaces.
    Live(Arc<ResourceData>),
    /// The handle is removed or was never issued.
    Gone,
}

impl Resolved {
    /// True for [`Resolved::Gone`].
    pub const fn is_gone(&self) -> bool {
        matches!(self, Self::Gone)
    }

    /// The live payload snapshot, if any.
    pub const fn as_live(&self) -> Option<&Arc<ResourceData>> {
        match self {
            Self::Live(data) => Some(data),
            Self::Gone => None,
        }
    }
}

/// Errors from registry mutations.
///
/// All are recoverable by the caller; none corrupt registry state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// The handle space is exhausted; no further registrations are possible.
    Exhausted,
    /// `replace`/`remove` addressed a handle that is not currently live.
    UnknownHandle(Handle),
    /// `replace` offered a payload whose kind differs from the record's
    /// immutable kind.
    KindMismatch {
        /// The record's kind.
        expected: ResourceKind,
        /// The offered payload's kind.
        found: ResourceKind,
    },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exhausted => write!(f, "resource handle space exhausted"),
            Self::UnknownHandle(h) => write!(f, "handle {h} is not live"),
            Self::KindMismatch { expected, found } => {
                write!(f, "payload kind {found:?} does not match record kind {expected:?}")
            }
        }
    }
}

impl std::error::Error for RegistryError {}
