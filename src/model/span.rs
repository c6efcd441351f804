//! Span-level types.

use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr};

/// Style attributes of a span as a bitset.
///
/// Bit values follow the span-flag convention shared by PDF structured-text
/// extractors, so flags from other tools can be fed in unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpanFlags(u32);

impl SpanFlags {
    pub const NONE: Self = Self(0);
    pub const SUPERSCRIPT: Self = Self(1);
    pub const ITALIC: Self = Self(2);
    pub const SERIF: Self = Self(4);
    pub const MONOSPACE: Self = Self(8);
    pub const BOLD: Self = Self(16);

    /// Create flags from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bit value.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether any bit of `other` is set.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Set the bits of `other`.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

impl BitOr for SpanFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for SpanFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Bounding box in page space, y axis pointing down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BBox {
    /// Create a bounding box from its edges.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// An atomic run of text sharing one font, size and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The text content, untrimmed
    pub text: String,
    /// Font size in points
    pub size: f32,
    /// Style flags
    #[serde(default)]
    pub flags: SpanFlags,
    /// Position on the page
    pub bbox: BBox,
}

impl Span {
    /// Create a span with no style flags.
    pub fn new(text: impl Into<String>, size: f32, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            size,
            flags: SpanFlags::NONE,
            bbox,
        }
    }

    /// Set style flags.
    pub fn with_flags(mut self, flags: SpanFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}
