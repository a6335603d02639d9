//! The fit stack: a box child scaled to fit, plus siblings placed into rects
//! computed from the box's natural size.
//!
//! Layout is a two-pass protocol. Child 0 (the box) is measured with no
//! constraints; its natural size and the incoming constraints go to the
//! caller's [`RectComputation`], which returns one placement rect per child.
//! Siblings are laid out into their rects, and the container takes the
//! bounding box of all rects. The box itself is never resized: at paint time
//! it is scaled into its destination by a [`BoxFit`] transform.
//!
//! # Example
//!
//! ```
//! use fitstack::{
//!     BoxConstraints, ChildSlot, FitStack, Rect, RenderChild, Size,
//! };
//!
//! struct Fixed(Size);
//! impl RenderChild for Fixed {
//!     fn layout(&mut self, c: BoxConstraints) -> Size { c.constrain(self.0) }
//!     fn dry_layout(&self, c: BoxConstraints) -> Size { c.constrain(self.0) }
//! }
//!
//! let children = vec![
//!     ChildSlot::new(Fixed(Size::new(50.0, 50.0))),
//!     ChildSlot::new(Fixed(Size::new(1000.0, 1000.0))),
//! ];
//! // Box on top, a 40px caption strip underneath it.
//! let mut stack = FitStack::new()
//!     .build_pair(children, |c, _box_size| {
//!         let w = c.max_width;
//!         (Rect::new(0.0, 0.0, w, 200.0), Rect::new(0.0, 200.0, w, 40.0))
//!     })
//!     .unwrap();
//!
//! let size = stack.perform_layout(BoxConstraints::loose(Size::new(300.0, 600.0))).unwrap();
//! assert_eq!(size, Size::new(300.0, 240.0));
//! ```

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use glam::{DAffine2, DVec2};
use log::{debug, trace};

use crate::align::{Alignment, AlignmentGeometry, TextDirection};
use crate::child::{ChildSlot, RenderChild, TextBaseline};
use crate::error::LayoutError;
use crate::fit::{BoxFit, apply_box_fit};
use crate::geometry::{BoxConstraints, Offset, Rect, Size};
use crate::paint::{
    CachedLayer, ClipBehavior, HitTestEntry, HitTestResult, LayerHandle, PaintContext,
    as_translation,
};

/// How the incoming constraints are adjusted before the rect computation
/// sees them, and how siblings are constrained to their rects.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum StackFit {
    /// Minima dropped to zero; siblings may be smaller than their rects.
    #[default]
    Loose,
    /// Tight to the largest allowed size; siblings fill their rects.
    Expand,
    /// Incoming constraints unchanged; siblings fill their rects.
    Passthrough,
}

impl StackFit {
    /// Constraints handed to the rect computation.
    pub fn non_positioned_constraints(self, constraints: BoxConstraints) -> BoxConstraints {
        match self {
            Self::Loose => constraints.loosen(),
            Self::Expand => constraints.tight_to_biggest(),
            Self::Passthrough => constraints,
        }
    }

    /// Constraints for a sibling placed into a rect of `rect_size`.
    pub fn sibling_constraints(self, rect_size: Size) -> BoxConstraints {
        match self {
            Self::Loose => BoxConstraints::loose(rect_size),
            Self::Expand | Self::Passthrough => BoxConstraints::tight(rect_size),
        }
    }
}

/// Single-sibling rect computation output.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoxAndSiblingRects {
    pub box_rect: Rect,
    pub sibling_rect: Rect,
}

impl From<(Rect, Rect)> for BoxAndSiblingRects {
    fn from((box_rect, sibling_rect): (Rect, Rect)) -> Self {
        Self {
            box_rect,
            sibling_rect,
        }
    }
}

type PairFn = dyn Fn(BoxConstraints, Size) -> BoxAndSiblingRects;
type ListFn = dyn Fn(BoxConstraints, Size) -> Vec<Rect>;

/// Caller-supplied mapping from (constraints, box natural size) to placement rects.
///
/// Cloning shares the callback; two values are the same computation only if
/// they share it.
#[derive(Clone)]
pub enum RectComputation {
    /// Exactly two children: the box and one sibling.
    Pair(Rc<PairFn>),
    /// Any number of children; rect `i` belongs to child `i`, the box included.
    List(Rc<ListFn>),
}

impl RectComputation {
    pub fn pair<F, R>(f: F) -> Self
    where
        F: Fn(BoxConstraints, Size) -> R + 'static,
        R: Into<BoxAndSiblingRects>,
    {
        Self::Pair(Rc::new(move |c: BoxConstraints, s: Size| -> BoxAndSiblingRects {
            f(c, s).into()
        }))
    }

    pub fn list<F>(f: F) -> Self
    where
        F: Fn(BoxConstraints, Size) -> Vec<Rect> + 'static,
    {
        Self::List(Rc::new(f))
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Self::Pair(_))
    }

    /// Whether both values share the same callback.
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Pair(a), Self::Pair(b)) => Rc::ptr_eq(a, b),
            (Self::List(a), Self::List(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    fn compute(&self, constraints: BoxConstraints, box_size: Size) -> Vec<Rect> {
        match self {
            Self::Pair(f) => {
                let r = f(constraints, box_size);
                alloc::vec![r.box_rect, r.sibling_rect]
            }
            Self::List(f) => f(constraints, box_size),
        }
    }

    fn expected_rects(&self, child_count: usize) -> usize {
        match self {
            Self::Pair(_) => PAIR_CHILDREN,
            Self::List(_) => child_count,
        }
    }
}

impl fmt::Debug for RectComputation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pair(_) => f.write_str("RectComputation::Pair(..)"),
            Self::List(_) => f.write_str("RectComputation::List(..)"),
        }
    }
}

const PAIR_CHILDREN: usize = 2;

/// What a property change requires of the host pipeline.
///
/// Ordered by severity: a layout implies a repaint.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Invalidation {
    #[default]
    None,
    Paint,
    Layout,
}

/// Cached paint state for the box child.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PaintData {
    /// Maps box-child coordinates to the box's destination coordinates.
    pub transform: DAffine2,
    /// Part of the box child is cropped away by the fit.
    pub has_visual_overflow: bool,
}

impl PaintData {
    pub const IDENTITY: Self = Self {
        transform: DAffine2::IDENTITY,
        has_visual_overflow: false,
    };
}

/// Fit stack configuration.
///
/// ```
/// use fitstack::{AlignmentDirectional, BoxFit, ClipBehavior, FitStack, LayoutError};
///
/// let config = FitStack::new()
///     .fit(BoxFit::Cover)
///     .clip_behavior(ClipBehavior::HardEdge)
///     .alignment(AlignmentDirectional::TOP_START);
///
/// // No text direction to resolve `TOP_START` against.
/// let err = config.build_list::<(), _>(Vec::new(), |_, _| Vec::new()).unwrap_err();
/// assert!(matches!(err, LayoutError::MissingTextDirection { .. }));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FitStack {
    pub fit: BoxFit,
    pub alignment: AlignmentGeometry,
    pub text_direction: Option<TextDirection>,
    pub stack_fit: StackFit,
    pub clip_behavior: ClipBehavior,
}

impl FitStack {
    /// Contain, centered, loose, unclipped.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit(mut self, fit: BoxFit) -> Self {
        self.fit = fit;
        self
    }

    pub fn alignment(mut self, alignment: impl Into<AlignmentGeometry>) -> Self {
        self.alignment = alignment.into();
        self
    }

    /// Direction used to resolve a directional alignment.
    pub fn text_direction(mut self, direction: TextDirection) -> Self {
        self.text_direction = Some(direction);
        self
    }

    pub fn stack_fit(mut self, stack_fit: StackFit) -> Self {
        self.stack_fit = stack_fit;
        self
    }

    pub fn clip_behavior(mut self, clip_behavior: ClipBehavior) -> Self {
        self.clip_behavior = clip_behavior;
        self
    }

    /// Build the single-sibling form. Requires exactly two children.
    pub fn build_pair<C, F, R>(
        self,
        children: Vec<ChildSlot<C>>,
        rects: F,
    ) -> Result<RenderFitStack<C>, LayoutError>
    where
        F: Fn(BoxConstraints, Size) -> R + 'static,
        R: Into<BoxAndSiblingRects>,
    {
        self.build(children, RectComputation::pair(rects))
    }

    /// Build the multi-sibling form. The callback must return one rect per child.
    pub fn build_list<C, F>(
        self,
        children: Vec<ChildSlot<C>>,
        rects: F,
    ) -> Result<RenderFitStack<C>, LayoutError>
    where
        F: Fn(BoxConstraints, Size) -> Vec<Rect> + 'static,
    {
        self.build(children, RectComputation::list(rects))
    }

    pub fn build<C>(
        self,
        children: Vec<ChildSlot<C>>,
        rects: RectComputation,
    ) -> Result<RenderFitStack<C>, LayoutError> {
        check_child_count(&rects, children.len())?;
        let resolved_alignment = resolve_alignment(self.alignment, self.text_direction)?;
        Ok(RenderFitStack {
            children,
            fit: self.fit,
            alignment: self.alignment,
            text_direction: self.text_direction,
            stack_fit: self.stack_fit,
            clip_behavior: self.clip_behavior,
            rects_fn: rects,
            resolved_alignment,
            size: Size::ZERO,
            rects: Vec::new(),
            paint_data: None,
            clip_layer: None,
            transform_layer: None,
            released: Vec::new(),
            pending: Invalidation::Layout,
        })
    }
}

fn check_child_count(rects: &RectComputation, actual: usize) -> Result<(), LayoutError> {
    if rects.is_pair() && actual != PAIR_CHILDREN {
        return Err(LayoutError::ChildCount {
            expected: PAIR_CHILDREN,
            actual,
        });
    }
    Ok(())
}

fn resolve_alignment(
    alignment: AlignmentGeometry,
    direction: Option<TextDirection>,
) -> Result<Alignment, LayoutError> {
    alignment
        .resolve(direction)
        .map_err(|alignment| LayoutError::MissingTextDirection { alignment })
}

/// The layer to retain after a frame that used `used` where `old` was
/// offered. A skipped path keeps `old`; a replaced `old` is queued for release.
fn retain_layer(
    old: Option<LayerHandle>,
    used: Option<LayerHandle>,
    wrap: fn(LayerHandle) -> CachedLayer,
    released: &mut Vec<CachedLayer>,
) -> Option<LayerHandle> {
    match (old, used) {
        (Some(old), Some(used)) if old != used => {
            trace!("fit stack layer {:?} replaced by {:?}", wrap(old), wrap(used));
            released.push(wrap(old));
            Some(used)
        }
        (_, Some(used)) => Some(used),
        (old, None) => old,
    }
}

/// Output of one measurement pass.
struct Measured {
    size: Size,
    rects: Vec<Rect>,
    child_sizes: Vec<Size>,
}

/// The two-pass size computation shared by real and dry layout.
///
/// `layout_child(i, constraints)` measures child `i`; it is a real layout or
/// a dry measurement depending on the caller.
fn measure(
    rects_fn: &RectComputation,
    stack_fit: StackFit,
    child_count: usize,
    constraints: BoxConstraints,
    mut layout_child: impl FnMut(usize, BoxConstraints) -> Size,
) -> Result<Measured, LayoutError> {
    if child_count == 0 {
        let biggest = constraints.biggest();
        let size = if biggest.is_finite() {
            biggest
        } else {
            constraints.smallest()
        };
        return Ok(Measured {
            size,
            rects: Vec::new(),
            child_sizes: Vec::new(),
        });
    }
    check_child_count(rects_fn, child_count)?;

    let non_positioned = stack_fit.non_positioned_constraints(constraints);
    let box_size = layout_child(0, BoxConstraints::UNCONSTRAINED);
    let rects = rects_fn.compute(non_positioned, box_size);

    let non_finite: Vec<Rect> = rects.iter().filter(|r| !r.is_finite()).copied().collect();
    if !non_finite.is_empty() {
        return Err(LayoutError::NonFiniteRects {
            rects: non_finite,
            constraints: non_positioned,
            box_size,
        });
    }
    let expected = rects_fn.expected_rects(child_count);
    if rects.len() != expected {
        return Err(LayoutError::RectCount {
            expected,
            actual: rects.len(),
        });
    }

    let mut child_sizes = Vec::with_capacity(child_count);
    child_sizes.push(box_size);
    for (index, rect) in rects.iter().enumerate().skip(1) {
        let child_constraints = stack_fit.sibling_constraints(rect.size());
        child_sizes.push(layout_child(index, child_constraints));
    }

    let bounds = Rect::bounding(&rects).unwrap_or_default().size();
    let size = if rects_fn.is_pair() {
        bounds
    } else {
        constraints.constrain(bounds)
    };
    debug_assert!(
        size.is_finite(),
        "fit stack size {size:?} is not finite (constraints {constraints:?})"
    );

    Ok(Measured {
        size,
        rects,
        child_sizes,
    })
}

/// Render node for the fit stack.
#[derive(Debug)]
pub struct RenderFitStack<C> {
    children: Vec<ChildSlot<C>>,
    fit: BoxFit,
    alignment: AlignmentGeometry,
    text_direction: Option<TextDirection>,
    stack_fit: StackFit,
    clip_behavior: ClipBehavior,
    rects_fn: RectComputation,
    resolved_alignment: Alignment,
    size: Size,
    rects: Vec<Rect>,
    paint_data: Option<PaintData>,
    clip_layer: Option<LayerHandle>,
    transform_layer: Option<LayerHandle>,
    /// Layers no longer retained, waiting for the host to release them.
    released: Vec<CachedLayer>,
    pending: Invalidation,
}

impl<C> RenderFitStack<C> {
    pub fn children(&self) -> &[ChildSlot<C>] {
        &self.children
    }

    /// Mutable access to one child's node. Changes that affect its size
    /// need a new layout pass.
    pub fn child_mut(&mut self, index: usize) -> Option<&mut C> {
        self.children.get_mut(index).map(|slot| &mut slot.node)
    }

    /// Container size from the last successful layout.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Placement rects from the last successful layout, one per child
    /// (the pair form reports `[box_rect, sibling_rect]`).
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn fit_mode(&self) -> BoxFit {
        self.fit
    }

    pub fn alignment(&self) -> AlignmentGeometry {
        self.alignment
    }

    /// The alignment actually used for placement and painting.
    pub fn resolved_alignment(&self) -> Alignment {
        self.resolved_alignment
    }

    pub fn text_direction(&self) -> Option<TextDirection> {
        self.text_direction
    }

    pub fn stack_fit(&self) -> StackFit {
        self.stack_fit
    }

    pub fn clip_behavior(&self) -> ClipBehavior {
        self.clip_behavior
    }

    pub fn rect_computation(&self) -> &RectComputation {
        &self.rects_fn
    }

    /// Accumulated invalidation since the last [`take_invalidation`](Self::take_invalidation).
    pub fn pending_invalidation(&self) -> Invalidation {
        self.pending
    }

    /// Drain the accumulated invalidation.
    pub fn take_invalidation(&mut self) -> Invalidation {
        core::mem::take(&mut self.pending)
    }

    fn invalidate(&mut self, what: Invalidation) -> Invalidation {
        if what != Invalidation::None {
            self.paint_data = None;
            self.pending = self.pending.max(what);
            debug!("fit stack invalidated: {what:?}");
        }
        what
    }

    // ── property setters ────────────────────────────────────────────────

    /// Only transitions into or out of [`BoxFit::ScaleDown`] need a layout;
    /// every other change is paint-only.
    pub fn set_fit(&mut self, fit: BoxFit) -> Invalidation {
        if self.fit == fit {
            return Invalidation::None;
        }
        let previous = core::mem::replace(&mut self.fit, fit);
        if previous.affects_layout() || fit.affects_layout() {
            self.invalidate(Invalidation::Layout)
        } else {
            self.invalidate(Invalidation::Paint)
        }
    }

    pub fn set_alignment(
        &mut self,
        alignment: impl Into<AlignmentGeometry>,
    ) -> Result<Invalidation, LayoutError> {
        let alignment = alignment.into();
        if self.alignment == alignment {
            return Ok(Invalidation::None);
        }
        self.resolved_alignment = resolve_alignment(alignment, self.text_direction)?;
        self.alignment = alignment;
        Ok(self.invalidate(Invalidation::Layout))
    }

    pub fn set_text_direction(
        &mut self,
        direction: Option<TextDirection>,
    ) -> Result<Invalidation, LayoutError> {
        if self.text_direction == direction {
            return Ok(Invalidation::None);
        }
        self.resolved_alignment = resolve_alignment(self.alignment, direction)?;
        self.text_direction = direction;
        Ok(self.invalidate(Invalidation::Layout))
    }

    pub fn set_stack_fit(&mut self, stack_fit: StackFit) -> Invalidation {
        if self.stack_fit == stack_fit {
            return Invalidation::None;
        }
        self.stack_fit = stack_fit;
        self.invalidate(Invalidation::Layout)
    }

    pub fn set_clip_behavior(&mut self, clip_behavior: ClipBehavior) -> Invalidation {
        if self.clip_behavior == clip_behavior {
            return Invalidation::None;
        }
        self.clip_behavior = clip_behavior;
        self.invalidate(Invalidation::Paint)
    }

    /// Replace the rect computation. Sharing the current callback is a no-op.
    pub fn set_rect_computation(
        &mut self,
        rects: RectComputation,
    ) -> Result<Invalidation, LayoutError> {
        if self.rects_fn.same_as(&rects) {
            return Ok(Invalidation::None);
        }
        check_child_count(&rects, self.children.len())?;
        self.rects_fn = rects;
        Ok(self.invalidate(Invalidation::Layout))
    }

    /// Replace the child list, returning the previous one.
    pub fn set_children(
        &mut self,
        children: Vec<ChildSlot<C>>,
    ) -> Result<Vec<ChildSlot<C>>, LayoutError> {
        check_child_count(&self.rects_fn, children.len())?;
        let previous = core::mem::replace(&mut self.children, children);
        self.invalidate(Invalidation::Layout);
        Ok(previous)
    }

    // ── geometry helpers ────────────────────────────────────────────────

    fn first_positioned(&self) -> Option<usize> {
        self.children
            .iter()
            .position(|slot| slot.parent_data.is_positioned())
    }

    /// Where child `index` of `child_size` sits for a container of
    /// `container` with placement `rects`.
    fn child_offset(&self, index: usize, container: Size, rects: &[Rect], child_size: Size) -> Offset {
        let align = self.resolved_alignment;
        if index == 0 && self.rects_fn.is_pair() {
            return align.along_offset(container - child_size);
        }
        let rect = rects[index];
        rect.top_left() + align.along_offset(rect.size() - child_size)
    }

    /// The rect the box is fitted into, in stack coordinates.
    fn box_destination(&self) -> Rect {
        if self.rects_fn.is_pair() {
            Offset::ZERO.with_size(self.size)
        } else {
            self.rects.first().copied().unwrap_or_default()
        }
    }

    /// Paint data for the current layout, from cache when valid.
    pub fn paint_data(&self) -> PaintData {
        self.paint_data.unwrap_or_else(|| self.compute_paint_data())
    }

    fn compute_paint_data(&self) -> PaintData {
        let Some(box_slot) = self.children.first() else {
            return PaintData::IDENTITY;
        };
        let child_size = box_slot.size;
        let destination = self.box_destination().size();
        if child_size.is_empty() || destination.is_empty() {
            return PaintData::IDENTITY;
        }

        let sizes = apply_box_fit(self.fit, child_size, destination);
        let scale_x = sizes.destination.width / sizes.source.width;
        let scale_y = sizes.destination.height / sizes.source.height;
        debug_assert!(scale_x.is_finite() && scale_y.is_finite());

        let align = self.resolved_alignment;
        let source_rect = align.inscribe(sizes.source, Offset::ZERO.with_size(child_size));
        let dest_rect = align.inscribe(sizes.destination, Offset::ZERO.with_size(destination));

        let transform = DAffine2::from_translation(DVec2::new(dest_rect.x, dest_rect.y))
            * DAffine2::from_scale(DVec2::new(scale_x, scale_y))
            * DAffine2::from_translation(DVec2::new(-source_rect.x, -source_rect.y));

        PaintData {
            transform,
            has_visual_overflow: source_rect.width < child_size.width
                || source_rect.height < child_size.height,
        }
    }

    /// Recompute the paint transform if a layout or property change cleared it.
    pub fn update_paint_data(&mut self) -> PaintData {
        if let Some(data) = self.paint_data {
            return data;
        }
        let data = self.compute_paint_data();
        trace!(
            "fit stack paint data: fit {:?}, transform {:?}, overflow {}",
            self.fit, data.transform, data.has_visual_overflow
        );
        self.paint_data = Some(data);
        data
    }

    // ── paint / hit test ────────────────────────────────────────────────

    /// Paint the stack at `offset`.
    ///
    /// Clips to the stack bounds only when the fit crops the box and
    /// clipping is enabled. Siblings are painted without the fit transform.
    ///
    /// Clip and transform layers are retained separately and handed back to
    /// the context for reuse next frame. A layer whose path is skipped this
    /// frame stays retained; one the context replaced is queued for release
    /// (see [`take_released_layers`](Self::take_released_layers)).
    pub fn paint<P: PaintContext<C>>(&mut self, ctx: &mut P, offset: Offset) {
        if self.children.is_empty() {
            self.release_retained_layers();
            return;
        }
        let data = self.update_paint_data();
        let old_clip = self.clip_layer;
        let old_transform = self.transform_layer;

        let this = &*self;
        let mut transform_layer = None;
        let clip_layer = if this.clip_behavior != ClipBehavior::None && data.has_visual_overflow {
            let clip_rect = Offset::ZERO.with_size(this.size);
            trace!("fit stack clipping to {clip_rect:?} ({:?})", this.clip_behavior);
            ctx.push_clip_rect(
                offset,
                clip_rect,
                this.clip_behavior,
                old_clip,
                &mut |ctx: &mut P, origin: Offset| {
                    transform_layer = this.paint_contents(ctx, origin, &data, old_transform);
                },
            )
        } else {
            transform_layer = this.paint_contents(ctx, offset, &data, old_transform);
            None
        };

        self.clip_layer =
            retain_layer(old_clip, clip_layer, CachedLayer::ClipRect, &mut self.released);
        self.transform_layer = retain_layer(
            old_transform,
            transform_layer,
            CachedLayer::Transform,
            &mut self.released,
        );
    }

    fn paint_contents<P: PaintContext<C>>(
        &self,
        ctx: &mut P,
        offset: Offset,
        data: &PaintData,
        old_transform: Option<LayerHandle>,
    ) -> Option<LayerHandle> {
        let mut layer = None;
        let box_slot = &self.children[0];
        let destination = self.box_destination();

        if !box_slot.size.is_empty() && !destination.size().is_empty() {
            let origin = offset + destination.top_left();
            match as_translation(&data.transform) {
                Some(shift) => ctx.paint_child(&box_slot.node, origin + shift),
                None => {
                    layer = ctx.push_transform(
                        origin,
                        data.transform,
                        old_transform,
                        &mut |ctx: &mut P, at: Offset| ctx.paint_child(&box_slot.node, at),
                    );
                }
            }
        }

        for sibling in &self.children[1..] {
            ctx.paint_child(&sibling.node, offset + sibling.offset());
        }
        layer
    }

    /// Release retained paint state. Every returned layer must be released
    /// by the host; none of them is referenced again.
    pub fn dispose(&mut self) -> Vec<CachedLayer> {
        self.paint_data = None;
        self.release_retained_layers();
        core::mem::take(&mut self.released)
    }

    /// Layers currently retained for reuse next frame.
    pub fn retained_layers(&self) -> Vec<CachedLayer> {
        self.clip_layer
            .map(CachedLayer::ClipRect)
            .into_iter()
            .chain(self.transform_layer.map(CachedLayer::Transform))
            .collect()
    }

    /// Drain layers the stack stopped retaining. The host must release them.
    pub fn take_released_layers(&mut self) -> Vec<CachedLayer> {
        core::mem::take(&mut self.released)
    }

    fn release_retained_layers(&mut self) {
        let retained = self.retained_layers();
        if !retained.is_empty() {
            trace!("fit stack releasing {retained:?}");
        }
        self.released.extend(retained);
        self.clip_layer = None;
        self.transform_layer = None;
    }

    /// Informational properties for a host inspector.
    pub fn debug_properties(&self) -> Vec<(&'static str, String)> {
        alloc::vec![
            ("fit", format!("{:?}", self.fit)),
            ("alignment", format!("{:?}", self.alignment)),
            ("textDirection", format!("{:?}", self.text_direction)),
            ("stackFit", format!("{:?}", self.stack_fit)),
            ("clipBehavior", format!("{:?}", self.clip_behavior)),
            ("children", format!("{}", self.children.len())),
            ("rects", format!("{:?}", self.rects)),
        ]
    }
}

impl<C: RenderChild> RenderFitStack<C> {
    /// Lay out all children under `constraints` and commit the result.
    ///
    /// On error nothing of the stack's own state is committed: size, rects
    /// and child offsets keep their previous values.
    pub fn perform_layout(&mut self, constraints: BoxConstraints) -> Result<Size, LayoutError> {
        if let Some(index) = self.first_positioned() {
            return Err(LayoutError::PositionedChild { index });
        }

        let children = &mut self.children;
        let measured = measure(
            &self.rects_fn,
            self.stack_fit,
            children.len(),
            constraints,
            |index, c| children[index].node.layout(c),
        )?;

        for (slot, size) in self.children.iter_mut().zip(&measured.child_sizes) {
            slot.size = *size;
        }
        for index in 0..self.children.len() {
            let offset = self.child_offset(
                index,
                measured.size,
                &measured.rects,
                measured.child_sizes[index],
            );
            self.children[index].parent_data.offset = offset;
        }
        self.size = measured.size;
        self.rects = measured.rects;
        self.paint_data = None;
        self.pending = Invalidation::Paint;

        debug!(
            "fit stack laid out: size {:?}, {} rects",
            self.size,
            self.rects.len()
        );
        Ok(self.size)
    }

    /// Size a layout under `constraints` would produce, without side effects.
    pub fn compute_dry_layout(&self, constraints: BoxConstraints) -> Result<Size, LayoutError> {
        self.dry_measure(constraints).map(|m| m.size)
    }

    fn dry_measure(&self, constraints: BoxConstraints) -> Result<Measured, LayoutError> {
        if let Some(index) = self.first_positioned() {
            return Err(LayoutError::PositionedChild { index });
        }
        measure(
            &self.rects_fn,
            self.stack_fit,
            self.children.len(),
            constraints,
            |index, c| self.children[index].node.dry_layout(c),
        )
    }

    /// Topmost baseline among all children under `constraints`, in stack
    /// coordinates. `None` when no child reports one.
    ///
    /// Each child is asked under the constraints layout would give it: the
    /// box unconstrained, a sibling its rect's constraints.
    pub fn compute_dry_baseline(
        &self,
        constraints: BoxConstraints,
        baseline: TextBaseline,
    ) -> Result<Option<f64>, LayoutError> {
        let measured = self.dry_measure(constraints)?;
        let mut topmost: Option<f64> = None;
        for (index, slot) in self.children.iter().enumerate() {
            let child_constraints = if index == 0 {
                BoxConstraints::UNCONSTRAINED
            } else {
                self.stack_fit.sibling_constraints(measured.rects[index].size())
            };
            let Some(distance) = slot.node.dry_baseline(child_constraints, baseline) else {
                continue;
            };
            let offset = self.child_offset(
                index,
                measured.size,
                &measured.rects,
                measured.child_sizes[index],
            );
            let candidate = distance + offset.dy;
            topmost = Some(topmost.map_or(candidate, |t| t.min(candidate)));
        }
        Ok(topmost)
    }

    fn max_over_children(&self, f: impl Fn(&C) -> f64) -> f64 {
        self.children
            .iter()
            .filter(|slot| !slot.parent_data.is_positioned())
            .map(|slot| f(&slot.node))
            .fold(0.0, f64::max)
    }

    pub fn min_intrinsic_width(&self, height: f64) -> f64 {
        self.max_over_children(|c| c.min_intrinsic_width(height))
    }

    pub fn max_intrinsic_width(&self, height: f64) -> f64 {
        self.max_over_children(|c| c.max_intrinsic_width(height))
    }

    pub fn min_intrinsic_height(&self, width: f64) -> f64 {
        self.max_over_children(|c| c.min_intrinsic_height(width))
    }

    pub fn max_intrinsic_height(&self, width: f64) -> f64 {
        self.max_over_children(|c| c.max_intrinsic_height(width))
    }

    /// Hit-test at `position` in stack coordinates.
    ///
    /// Children are tested topmost first at their layout offsets. The box is
    /// tested at its unscaled layout bounds, not where the fit transform
    /// draws it.
    pub fn hit_test(&mut self, result: &mut HitTestResult, position: Offset) -> bool {
        if !Offset::ZERO.with_size(self.size).contains(position) {
            return false;
        }
        self.update_paint_data();
        self.hit_test_children(result, position)
    }

    fn hit_test_children(&self, result: &mut HitTestResult, position: Offset) -> bool {
        for (index, slot) in self.children.iter().enumerate().rev() {
            let local = position - slot.offset();
            if slot.node.hit_test(local) {
                result.add(HitTestEntry {
                    child: index,
                    position: local,
                });
                return true;
            }
        }
        false
    }
}
