//! Alignment of a child within slack space.
//!
//! An [`Alignment`] is a point in `[-1, 1]²`: `(-1, -1)` is top-left,
//! `(0, 0)` center, `(1, 1)` bottom-right. [`AlignmentDirectional`] swaps
//! the horizontal axis for a start/end axis that depends on text direction;
//! it must be resolved against a [`TextDirection`] before use.

use crate::geometry::{Offset, Rect, Size};

/// Horizontal reading direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TextDirection {
    /// Left to right: start is the left edge.
    Ltr,
    /// Right to left: start is the right edge.
    Rtl,
}

/// Absolute alignment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Alignment {
    pub x: f64,
    pub y: f64,
}

impl Default for Alignment {
    fn default() -> Self {
        Self::CENTER
    }
}

impl Alignment {
    pub const TOP_LEFT: Self = Self::new(-1.0, -1.0);
    pub const TOP_CENTER: Self = Self::new(0.0, -1.0);
    pub const TOP_RIGHT: Self = Self::new(1.0, -1.0);
    pub const CENTER_LEFT: Self = Self::new(-1.0, 0.0);
    pub const CENTER: Self = Self::new(0.0, 0.0);
    pub const CENTER_RIGHT: Self = Self::new(1.0, 0.0);
    pub const BOTTOM_LEFT: Self = Self::new(-1.0, 1.0);
    pub const BOTTOM_CENTER: Self = Self::new(0.0, 1.0);
    pub const BOTTOM_RIGHT: Self = Self::new(1.0, 1.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset of the aligned point within a box of `slack` extent.
    ///
    /// Used with `container - child` to position a child; negative slack
    /// yields a negative offset (the child overhangs evenly per alignment).
    pub fn along_offset(&self, slack: Offset) -> Offset {
        let cx = slack.dx / 2.0;
        let cy = slack.dy / 2.0;
        Offset::new(cx + self.x * cx, cy + self.y * cy)
    }

    /// Place a rect of `size` inside `rect` according to this alignment.
    pub fn inscribe(&self, size: Size, rect: Rect) -> Rect {
        let half_w = (rect.width - size.width) / 2.0;
        let half_h = (rect.height - size.height) / 2.0;
        Rect::new(
            rect.x + half_w + self.x * half_w,
            rect.y + half_h + self.y * half_h,
            size.width,
            size.height,
        )
    }
}

/// Alignment whose horizontal axis runs from start (`-1`) to end (`1`).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AlignmentDirectional {
    pub start: f64,
    pub y: f64,
}

impl AlignmentDirectional {
    pub const TOP_START: Self = Self::new(-1.0, -1.0);
    pub const TOP_END: Self = Self::new(1.0, -1.0);
    pub const CENTER_START: Self = Self::new(-1.0, 0.0);
    pub const CENTER_END: Self = Self::new(1.0, 0.0);
    pub const BOTTOM_START: Self = Self::new(-1.0, 1.0);
    pub const BOTTOM_END: Self = Self::new(1.0, 1.0);

    pub const fn new(start: f64, y: f64) -> Self {
        Self { start, y }
    }

    pub fn resolve(&self, direction: TextDirection) -> Alignment {
        match direction {
            TextDirection::Ltr => Alignment::new(self.start, self.y),
            TextDirection::Rtl => Alignment::new(-self.start, self.y),
        }
    }
}

/// Either kind of alignment, as configured by the caller.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AlignmentGeometry {
    Absolute(Alignment),
    Directional(AlignmentDirectional),
}

impl Default for AlignmentGeometry {
    fn default() -> Self {
        Self::Absolute(Alignment::CENTER)
    }
}

impl From<Alignment> for AlignmentGeometry {
    fn from(a: Alignment) -> Self {
        Self::Absolute(a)
    }
}

impl From<AlignmentDirectional> for AlignmentGeometry {
    fn from(a: AlignmentDirectional) -> Self {
        Self::Directional(a)
    }
}

impl AlignmentGeometry {
    /// Resolve to an absolute alignment.
    ///
    /// Absolute alignments ignore `direction`. A directional one with no
    /// direction available comes back unresolved as the error.
    pub fn resolve(
        &self,
        direction: Option<TextDirection>,
    ) -> Result<Alignment, AlignmentDirectional> {
        match (self, direction) {
            (Self::Absolute(a), _) => Ok(*a),
            (Self::Directional(d), Some(dir)) => Ok(d.resolve(dir)),
            (Self::Directional(d), None) => Err(*d),
        }
    }
}
