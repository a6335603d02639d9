//! Layout contract violations.

use alloc::vec::Vec;

use crate::align::AlignmentDirectional;
use crate::geometry::{BoxConstraints, Rect, Size};

/// Misuse of a [`RenderFitStack`](crate::RenderFitStack).
///
/// Every variant is a configuration or callback contract violation. None of
/// them are transient: retrying with the same inputs fails the same way.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// Wrong number of children for the single-sibling form.
    #[error("fit stack with one sibling needs exactly {expected} children, got {actual}")]
    ChildCount { expected: usize, actual: usize },

    /// The rect computation returned a different number of rects than there
    /// are children.
    #[error("rect computation returned {actual} rects for {expected} children")]
    RectCount { expected: usize, actual: usize },

    /// The rect computation returned rects with an infinite or NaN component.
    #[error(
        "rect computation returned non-finite rects {rects:?} \
         (constraints {constraints:?}, box size {box_size:?})"
    )]
    NonFiniteRects {
        /// Only the offending rects.
        rects: Vec<Rect>,
        constraints: BoxConstraints,
        box_size: Size,
    },

    /// A child carries absolute-position data, which this layout does not support.
    #[error("child {index} is positioned; positioned children are not supported")]
    PositionedChild { index: usize },

    /// A directional alignment was configured with no text direction to resolve it.
    #[error("directional alignment {alignment:?} needs a text direction")]
    MissingTextDirection { alignment: AlignmentDirectional },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_both_counts() {
        let e = LayoutError::RectCount {
            expected: 3,
            actual: 2,
        };
        let msg = e.to_string();
        assert!(msg.contains('3') && msg.contains('2'), "{msg}");
    }

    #[test]
    fn non_finite_message_names_rects_and_inputs() {
        let e = LayoutError::NonFiniteRects {
            rects: alloc::vec![Rect::new(0.0, 0.0, f64::INFINITY, 10.0)],
            constraints: BoxConstraints::UNCONSTRAINED,
            box_size: Size::new(5.0, 6.0),
        };
        let msg = e.to_string();
        assert!(msg.contains("inf"), "{msg}");
        assert!(msg.contains("BoxConstraints"), "{msg}");
        assert!(msg.contains("5.0") && msg.contains("6.0"), "{msg}");
    }
}
