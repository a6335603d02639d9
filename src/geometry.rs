//! Sizes, offsets, rectangles and box constraints in logical pixels.
//!
//! Everything is `f64`. Infinity is a legal value for constraint maxima
//! ("unbounded"), never for a committed size or a placement rect.
//!
//! # Example
//!
//! ```
//! use fitstack::{BoxConstraints, Size};
//!
//! let c = BoxConstraints::loose(Size::new(800.0, 600.0));
//! assert_eq!(c.constrain(Size::new(1000.0, 100.0)), Size::new(800.0, 100.0));
//! assert_eq!(c.biggest(), Size::new(800.0, 600.0));
//! ```

/// Width × height in logical pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether either side is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

impl core::ops::Sub for Size {
    type Output = Offset;

    /// Slack between two sizes, as an offset. May be negative.
    fn sub(self, rhs: Self) -> Offset {
        Offset::new(self.width - rhs.width, self.height - rhs.height)
    }
}

/// A 2D displacement.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }

    /// Rect of `size` whose top-left corner sits at this offset.
    pub fn with_size(self, size: Size) -> Rect {
        Rect::new(self.dx, self.dy, size.width, size.height)
    }
}

impl core::ops::Add for Offset {
    type Output = Offset;
    fn add(self, rhs: Self) -> Offset {
        Offset::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl core::ops::Sub for Offset {
    type Output = Offset;
    fn sub(self, rhs: Self) -> Offset {
        Offset::new(self.dx - rhs.dx, self.dy - rhs.dy)
    }
}

/// Axis-aligned rectangle: top-left corner plus extent.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect spanning two corners given in either order.
    pub fn from_points(a: Offset, b: Offset) -> Self {
        let left = a.dx.min(b.dx);
        let top = a.dy.min(b.dy);
        Self::new(left, top, a.dx.max(b.dx) - left, a.dy.max(b.dy) - top)
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn top_left(&self) -> Offset {
        Offset::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Every component is finite (no infinity, no NaN).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Half-open containment: left/top edges inclusive, right/bottom exclusive.
    pub fn contains(&self, point: Offset) -> bool {
        point.dx >= self.left()
            && point.dx < self.right()
            && point.dy >= self.top()
            && point.dy < self.bottom()
    }

    /// Smallest rect containing both `self` and `other`.
    pub fn expand_to_include(&self, other: &Rect) -> Rect {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Bounding rect of a set of rects. `None` for an empty set.
    pub fn bounding<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
        rects
            .into_iter()
            .copied()
            .reduce(|acc, r| acc.expand_to_include(&r))
    }

    pub fn translate(&self, by: Offset) -> Rect {
        Rect::new(self.x + by.dx, self.y + by.dy, self.width, self.height)
    }
}

/// Min/max extents per axis that a child's size must satisfy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoxConstraints {
    pub min_width: f64,
    pub max_width: f64,
    pub min_height: f64,
    pub max_height: f64,
}

impl Default for BoxConstraints {
    fn default() -> Self {
        Self::UNCONSTRAINED
    }
}

impl BoxConstraints {
    /// Minimum zero, maximum infinite on both axes.
    pub const UNCONSTRAINED: Self = Self {
        min_width: 0.0,
        max_width: f64::INFINITY,
        min_height: 0.0,
        max_height: f64::INFINITY,
    };

    pub const fn new(min_width: f64, max_width: f64, min_height: f64, max_height: f64) -> Self {
        Self {
            min_width,
            max_width,
            min_height,
            max_height,
        }
    }

    /// Exactly `size`.
    pub const fn tight(size: Size) -> Self {
        Self::new(size.width, size.width, size.height, size.height)
    }

    /// Anything from zero up to `size`.
    pub const fn loose(size: Size) -> Self {
        Self::new(0.0, size.width, 0.0, size.height)
    }

    /// Same maxima, minima dropped to zero.
    pub fn loosen(&self) -> Self {
        Self {
            min_width: 0.0,
            min_height: 0.0,
            ..*self
        }
    }

    /// Tight to [`biggest`](Self::biggest).
    pub fn tight_to_biggest(&self) -> Self {
        Self::tight(self.biggest())
    }

    /// Largest size that satisfies the constraints (infinite on unbounded axes).
    pub fn biggest(&self) -> Size {
        Size::new(self.max_width, self.max_height)
    }

    /// Smallest size that satisfies the constraints.
    pub fn smallest(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    /// Clamp `size` into the permitted range, axis by axis.
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(
            size.width.max(self.min_width).min(self.max_width),
            size.height.max(self.min_height).min(self.max_height),
        )
    }

    pub fn has_bounded_width(&self) -> bool {
        self.max_width.is_finite()
    }

    pub fn has_bounded_height(&self) -> bool {
        self.max_height.is_finite()
    }

    pub fn is_tight(&self) -> bool {
        self.min_width >= self.max_width && self.min_height >= self.max_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_of_empty_set_is_none() {
        assert_eq!(Rect::bounding(&[] as &[Rect]), None);
    }

    #[test]
    fn bounding_spans_disjoint_rects() {
        let rects = [
            Rect::new(0.0, 100.0, 400.0, 300.0),
            Rect::new(0.0, 0.0, 200.0, 100.0),
            Rect::new(200.0, 0.0, 200.0, 100.0),
        ];
        assert_eq!(Rect::bounding(&rects), Some(Rect::new(0.0, 0.0, 400.0, 400.0)));
    }

    #[test]
    fn bounding_keeps_non_zero_origin() {
        let rects = [Rect::new(10.0, 20.0, 5.0, 5.0), Rect::new(30.0, 20.0, 5.0, 10.0)];
        let b = Rect::bounding(&rects).unwrap();
        assert_eq!(b.top_left(), Offset::new(10.0, 20.0));
        assert_eq!(b.size(), Size::new(25.0, 10.0));
    }

    #[test]
    fn non_finite_rects_detected() {
        assert!(Rect::new(0.0, 0.0, 10.0, 10.0).is_finite());
        assert!(!Rect::new(0.0, 0.0, f64::INFINITY, 10.0).is_finite());
        assert!(!Rect::new(f64::NAN, 0.0, 10.0, 10.0).is_finite());
    }

    #[test]
    fn from_points_normalizes_corners() {
        let r = Rect::from_points(Offset::new(10.0, 5.0), Offset::new(0.0, 15.0));
        assert_eq!(r, Rect::new(0.0, 5.0, 10.0, 10.0));
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Offset::ZERO));
        assert!(r.contains(Offset::new(9.9, 9.9)));
        assert!(!r.contains(Offset::new(10.0, 5.0)));
    }

    #[test]
    fn loosen_drops_minima_only() {
        let c = BoxConstraints::new(10.0, 100.0, 20.0, 200.0).loosen();
        assert_eq!(c, BoxConstraints::new(0.0, 100.0, 0.0, 200.0));
    }

    #[test]
    fn tight_to_biggest_uses_maxima() {
        let c = BoxConstraints::new(10.0, 100.0, 20.0, 200.0).tight_to_biggest();
        assert!(c.is_tight());
        assert_eq!(c.smallest(), Size::new(100.0, 200.0));
    }

    #[test]
    fn unconstrained_axes_are_unbounded() {
        let c = BoxConstraints::UNCONSTRAINED;
        assert!(!c.has_bounded_width());
        assert!(!c.has_bounded_height());
        assert!(!c.biggest().is_finite());
        assert_eq!(c.smallest(), Size::ZERO);
    }

    #[test]
    fn constrain_clamps_both_ways() {
        let c = BoxConstraints::new(50.0, 100.0, 50.0, 100.0);
        assert_eq!(c.constrain(Size::new(10.0, 500.0)), Size::new(50.0, 100.0));
    }

    #[test]
    fn size_difference_is_offset() {
        assert_eq!(
            Size::new(800.0, 600.0) - Size::new(200.0, 100.0),
            Offset::new(600.0, 500.0)
        );
    }
}
