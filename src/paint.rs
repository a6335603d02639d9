//! Paint and hit-test seams: what the stack needs from the host's
//! compositor, and the layer handles it keeps between frames.

use alloc::vec::Vec;

use glam::{DAffine2, DMat2};

use crate::geometry::{Offset, Rect};

/// Whether and how content is clipped to the stack's bounds on overflow.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClipBehavior {
    /// Never clip.
    #[default]
    None,
    /// Clip without anti-aliasing.
    HardEdge,
    /// Clip with anti-aliasing.
    AntiAlias,
    /// Anti-aliased clip rendered through an offscreen layer.
    AntiAliasWithSaveLayer,
}

/// Opaque id of a compositing layer allocated by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayerHandle(pub u64);

/// The layer a stack retains between frames for reuse.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CachedLayer {
    ClipRect(LayerHandle),
    Transform(LayerHandle),
}

/// Painting surface supplied by the host for one frame.
///
/// `push_*` methods run `painter` inside the new layer with the origin it
/// should paint at, and return the layer they used so the caller can hand it
/// back as `old_layer` next frame. A host that composites without retained
/// layers returns `None`.
pub trait PaintContext<C> {
    fn paint_child(&mut self, child: &C, offset: Offset);

    fn push_clip_rect(
        &mut self,
        offset: Offset,
        clip_rect: Rect,
        clip_behavior: ClipBehavior,
        old_layer: Option<LayerHandle>,
        painter: &mut dyn FnMut(&mut Self, Offset),
    ) -> Option<LayerHandle>;

    fn push_transform(
        &mut self,
        offset: Offset,
        transform: DAffine2,
        old_layer: Option<LayerHandle>,
        painter: &mut dyn FnMut(&mut Self, Offset),
    ) -> Option<LayerHandle>;
}

/// The translation of `transform`, if it has no scale, skew or rotation.
pub fn as_translation(transform: &DAffine2) -> Option<Offset> {
    if transform.matrix2 == DMat2::IDENTITY {
        Some(Offset::new(transform.translation.x, transform.translation.y))
    } else {
        None
    }
}

/// One hit, innermost first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitTestEntry {
    /// Index of the child that was hit.
    pub child: usize,
    /// Hit position in that child's coordinates.
    pub position: Offset,
}

/// Accumulates hits during a hit-test traversal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HitTestResult {
    entries: Vec<HitTestEntry>,
}

impl HitTestResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: HitTestEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[HitTestEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn pure_translation_detected() {
        let t = DAffine2::from_translation(DVec2::new(3.0, 4.0));
        assert_eq!(as_translation(&t), Some(Offset::new(3.0, 4.0)));
        assert_eq!(as_translation(&DAffine2::IDENTITY), Some(Offset::ZERO));
    }

    #[test]
    fn scale_is_not_translation() {
        let t = DAffine2::from_scale(DVec2::new(2.0, 2.0));
        assert_eq!(as_translation(&t), None);
    }
}
