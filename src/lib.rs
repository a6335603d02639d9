//! Fit-stack layout: a stack whose first child is scaled to fit like an
//! image, while its siblings are placed into rects computed from that
//! child's natural size.
//!
//! Pure layout and paint bookkeeping. The host framework supplies the child
//! nodes through [`RenderChild`] and a compositor through [`PaintContext`];
//! this crate decides sizes, offsets, the fit transform and which layers to
//! push.
//!
//! # Modules
//!
//! - [`geometry`] — Size, offset, rect and box constraints
//! - [`fit`] — Box fit modes and fitted source/destination sizes
//! - [`align`] — Absolute and direction-relative alignment
//! - [`child`] — The child node seam and per-child parent data
//! - [`paint`] — Paint context, retained layers and hit-test results
//! - [`stack`] — [`FitStack`] configuration and the [`RenderFitStack`] node
//! - `svg` — SVG visualization of a laid-out stack (feature `svg`)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod align;
pub mod child;
pub mod error;
pub mod fit;
pub mod geometry;
pub mod paint;
pub mod stack;
#[cfg(feature = "svg")]
pub mod svg;

pub use align::{Alignment, AlignmentDirectional, AlignmentGeometry, TextDirection};
pub use child::{ChildSlot, Positioned, RenderChild, StackParentData, TextBaseline};
pub use error::LayoutError;
pub use fit::{BoxFit, FittedSizes, apply_box_fit};
pub use geometry::{BoxConstraints, Offset, Rect, Size};
pub use paint::{
    CachedLayer, ClipBehavior, HitTestEntry, HitTestResult, LayerHandle, PaintContext,
    as_translation,
};
pub use stack::{
    BoxAndSiblingRects, FitStack, Invalidation, PaintData, RectComputation, RenderFitStack,
    StackFit,
};
