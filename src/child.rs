//! The child-node seam: what the stack needs from the host's render tree.

use crate::geometry::{BoxConstraints, Offset, Size};

/// Which baseline a query refers to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Ideographic,
}

/// A child layout node owned by the host framework.
///
/// Only [`layout`](Self::layout) may mutate the node. Every other query is a
/// side-effect-free query and must agree with what `layout` would produce
/// for the same constraints.
pub trait RenderChild {
    /// Lay the child out and return the size it committed to.
    fn layout(&mut self, constraints: BoxConstraints) -> Size;

    /// Size the child would take under `constraints`, without laying out.
    fn dry_layout(&self, constraints: BoxConstraints) -> Size;

    /// Distance from the child's top edge to `baseline` under `constraints`.
    fn dry_baseline(&self, _constraints: BoxConstraints, _baseline: TextBaseline) -> Option<f64> {
        None
    }

    fn min_intrinsic_width(&self, _height: f64) -> f64 {
        0.0
    }

    fn max_intrinsic_width(&self, _height: f64) -> f64 {
        0.0
    }

    fn min_intrinsic_height(&self, _width: f64) -> f64 {
        0.0
    }

    fn max_intrinsic_height(&self, _width: f64) -> f64 {
        0.0
    }

    /// Whether `position` (in the child's own coordinates) hits this child.
    fn hit_test(&self, _position: Offset) -> bool {
        false
    }
}

/// Absolute-position metadata a host may attach to a child.
///
/// The fit stack rejects any child carrying it; see
/// [`LayoutError::PositionedChild`](crate::LayoutError::PositionedChild).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Positioned {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl Positioned {
    /// Whether any edge or extent is pinned.
    pub fn is_positioned(&self) -> bool {
        self.left.is_some()
            || self.top.is_some()
            || self.right.is_some()
            || self.bottom.is_some()
            || self.width.is_some()
            || self.height.is_some()
    }
}

/// Positioning data the stack attaches to each child.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StackParentData {
    /// Layout offset relative to the stack's origin.
    pub offset: Offset,
    /// Host-supplied absolute position, if any.
    pub position: Option<Positioned>,
}

impl StackParentData {
    pub fn is_positioned(&self) -> bool {
        self.position.is_some_and(|p| p.is_positioned())
    }
}

/// A child node plus the state the stack keeps for it.
#[derive(Clone, Debug)]
pub struct ChildSlot<C> {
    pub node: C,
    pub parent_data: StackParentData,
    /// Size from the last real layout pass.
    pub size: Size,
}

impl<C> ChildSlot<C> {
    pub fn new(node: C) -> Self {
        Self {
            node,
            parent_data: StackParentData::default(),
            size: Size::ZERO,
        }
    }

    /// A child carrying absolute-position metadata.
    pub fn positioned(node: C, position: Positioned) -> Self {
        Self {
            node,
            parent_data: StackParentData {
                offset: Offset::ZERO,
                position: Some(position),
            },
            size: Size::ZERO,
        }
    }

    pub fn offset(&self) -> Offset {
        self.parent_data.offset
    }
}

impl<C> From<C> for ChildSlot<C> {
    fn from(node: C) -> Self {
        Self::new(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_position_is_not_positioned() {
        let slot = ChildSlot::positioned((), Positioned::default());
        assert!(!slot.parent_data.is_positioned());
    }

    #[test]
    fn any_pinned_edge_is_positioned() {
        let slot = ChildSlot::positioned(
            (),
            Positioned {
                right: Some(0.0),
                ..Positioned::default()
            },
        );
        assert!(slot.parent_data.is_positioned());
        assert!(!ChildSlot::new(()).parent_data.is_positioned());
    }
}
