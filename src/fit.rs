//! Box-fit resolution: how a source size is scaled into a destination size.
//!
//! [`apply_box_fit`] returns the matched pair of sub-sizes: the part of the
//! source that is shown, and the size it is drawn at. Scaling one onto the
//! other and inscribing both under an alignment reproduces the standard
//! contain / cover / fill behaviours.
//!
//! # Example
//!
//! ```
//! use fitstack::{BoxFit, Size, apply_box_fit};
//!
//! // 50×50 covering 100×200: only a 25×50 strip of the source survives,
//! // drawn at the full destination size.
//! let sizes = apply_box_fit(BoxFit::Cover, Size::new(50.0, 50.0), Size::new(100.0, 200.0));
//! assert_eq!(sizes.source, Size::new(25.0, 50.0));
//! assert_eq!(sizes.destination, Size::new(100.0, 200.0));
//! ```

use crate::geometry::Size;

/// How to fit a source box into a destination box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoxFit {
    /// Scale to exact destination dimensions, distorting aspect ratio.
    Fill,

    /// Scale uniformly so the whole source fits within the destination.
    /// Upscales or downscales as needed.
    #[default]
    Contain,

    /// Scale uniformly so the source fills the destination, cropping overflow.
    Cover,

    /// Match the destination width; the height may overflow or letterbox.
    FitWidth,

    /// Match the destination height; the width may overflow or letterbox.
    FitHeight,

    /// No scaling. The source is cropped to the destination if larger.
    None,

    /// Like [`Contain`](Self::Contain), but never upscales.
    ScaleDown,
}

impl BoxFit {
    /// Whether this mode can change a measured layout size.
    ///
    /// Only `ScaleDown` compares source and destination extents; every other
    /// mode affects the paint transform alone.
    pub fn affects_layout(self) -> bool {
        matches!(self, Self::ScaleDown)
    }
}

/// Result of [`apply_box_fit`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FittedSizes {
    /// Portion of the source that is shown.
    pub source: Size,
    /// Size at which that portion is drawn.
    pub destination: Size,
}

/// Resolve `fit` for a source of `input` size drawn into `output`.
///
/// Degenerate input or output (either side ≤ 0) yields zero sizes for both.
pub fn apply_box_fit(fit: BoxFit, input: Size, output: Size) -> FittedSizes {
    if input.is_empty() || output.is_empty() {
        return FittedSizes::default();
    }

    let output_wider = output.width / output.height > input.width / input.height;

    let (source, destination) = match fit {
        BoxFit::Fill => (input, output),

        BoxFit::Contain => {
            let dest = if output_wider {
                Size::new(input.width * output.height / input.height, output.height)
            } else {
                Size::new(output.width, input.height * output.width / input.width)
            };
            (input, dest)
        }

        BoxFit::Cover => {
            // Crop the source to the destination aspect ratio.
            let src = if output_wider {
                Size::new(input.width, input.width * output.height / output.width)
            } else {
                Size::new(input.height * output.width / output.height, input.height)
            };
            (src, output)
        }

        BoxFit::FitWidth => {
            if output_wider {
                let src = Size::new(input.width, input.width * output.height / output.width);
                (src, output)
            } else {
                let dest = Size::new(output.width, input.height * output.width / input.width);
                (input, dest)
            }
        }

        BoxFit::FitHeight => {
            if output_wider {
                let dest = Size::new(input.width * output.height / input.height, output.height);
                (input, dest)
            } else {
                let src = Size::new(input.height * output.width / output.height, input.height);
                (src, output)
            }
        }

        BoxFit::None => {
            let src = Size::new(input.width.min(output.width), input.height.min(output.height));
            (src, src)
        }

        BoxFit::ScaleDown => {
            let aspect = input.width / input.height;
            let mut dest = input;
            if dest.height > output.height {
                dest = Size::new(output.height * aspect, output.height);
            }
            if dest.width > output.width {
                dest = Size::new(output.width, output.width / aspect);
            }
            (input, dest)
        }
    };

    FittedSizes {
        source,
        destination,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(mode: BoxFit, iw: f64, ih: f64, ow: f64, oh: f64) -> FittedSizes {
        apply_box_fit(mode, Size::new(iw, ih), Size::new(ow, oh))
    }

    // ── degenerate ──────────────────────────────────────────────────────

    #[test]
    fn empty_input_or_output_is_zero() {
        for mode in [BoxFit::Fill, BoxFit::Cover, BoxFit::None, BoxFit::ScaleDown] {
            assert_eq!(fit(mode, 0.0, 10.0, 100.0, 100.0), FittedSizes::default());
            assert_eq!(fit(mode, 10.0, 10.0, 100.0, 0.0), FittedSizes::default());
        }
    }

    // ── Fill ────────────────────────────────────────────────────────────

    #[test]
    fn fill_distorts() {
        let s = fit(BoxFit::Fill, 50.0, 50.0, 100.0, 200.0);
        assert_eq!(s.source, Size::new(50.0, 50.0));
        assert_eq!(s.destination, Size::new(100.0, 200.0));
    }

    // ── Contain ─────────────────────────────────────────────────────────

    #[test]
    fn contain_landscape_into_portrait() {
        // 200×100 into 100×200 → width constrains → 100×50
        let s = fit(BoxFit::Contain, 200.0, 100.0, 100.0, 200.0);
        assert_eq!(s.source, Size::new(200.0, 100.0));
        assert_eq!(s.destination, Size::new(100.0, 50.0));
    }

    #[test]
    fn contain_upscales() {
        let s = fit(BoxFit::Contain, 10.0, 10.0, 300.0, 100.0);
        assert_eq!(s.destination, Size::new(100.0, 100.0));
    }

    // ── Cover ───────────────────────────────────────────────────────────

    #[test]
    fn cover_crops_source_to_destination_aspect() {
        let s = fit(BoxFit::Cover, 50.0, 50.0, 100.0, 200.0);
        assert_eq!(s.source, Size::new(25.0, 50.0));
        assert_eq!(s.destination, Size::new(100.0, 200.0));
    }

    #[test]
    fn cover_wide_destination_crops_height() {
        let s = fit(BoxFit::Cover, 100.0, 100.0, 400.0, 100.0);
        assert_eq!(s.source, Size::new(100.0, 25.0));
    }

    // ── FitWidth / FitHeight ────────────────────────────────────────────

    #[test]
    fn fit_width_matches_width() {
        let s = fit(BoxFit::FitWidth, 100.0, 50.0, 200.0, 400.0);
        assert_eq!(s.destination.width, 200.0);
        assert_eq!(s.destination, Size::new(200.0, 100.0));
        assert_eq!(s.source, Size::new(100.0, 50.0));
    }

    #[test]
    fn fit_width_crops_when_destination_wider() {
        let s = fit(BoxFit::FitWidth, 100.0, 100.0, 200.0, 100.0);
        assert_eq!(s.source, Size::new(100.0, 50.0));
        assert_eq!(s.destination, Size::new(200.0, 100.0));
    }

    #[test]
    fn fit_height_matches_height() {
        let s = fit(BoxFit::FitHeight, 100.0, 50.0, 400.0, 200.0);
        assert_eq!(s.destination, Size::new(400.0, 200.0));
        assert_eq!(s.source, Size::new(100.0, 50.0));
        let s = fit(BoxFit::FitHeight, 100.0, 100.0, 100.0, 200.0);
        assert_eq!(s.source, Size::new(50.0, 100.0));
        assert_eq!(s.destination, Size::new(100.0, 200.0));
    }

    // ── None ────────────────────────────────────────────────────────────

    #[test]
    fn none_never_scales() {
        let s = fit(BoxFit::None, 50.0, 50.0, 100.0, 200.0);
        assert_eq!(s.source, Size::new(50.0, 50.0));
        assert_eq!(s.destination, Size::new(50.0, 50.0));
    }

    #[test]
    fn none_crops_to_destination() {
        let s = fit(BoxFit::None, 300.0, 50.0, 100.0, 200.0);
        assert_eq!(s.source, Size::new(100.0, 50.0));
        assert_eq!(s.destination, s.source);
    }

    // ── ScaleDown ───────────────────────────────────────────────────────

    #[test]
    fn scale_down_no_upscale() {
        let s = fit(BoxFit::ScaleDown, 50.0, 50.0, 100.0, 200.0);
        assert_eq!(s.destination, Size::new(50.0, 50.0));
    }

    #[test]
    fn scale_down_downscales_like_contain() {
        let s = fit(BoxFit::ScaleDown, 400.0, 200.0, 100.0, 100.0);
        assert_eq!(s.destination, Size::new(100.0, 50.0));
        assert_eq!(
            s.destination,
            fit(BoxFit::Contain, 400.0, 200.0, 100.0, 100.0).destination
        );
    }

    #[test]
    fn only_scale_down_affects_layout() {
        let all = [
            BoxFit::Fill,
            BoxFit::Contain,
            BoxFit::Cover,
            BoxFit::FitWidth,
            BoxFit::FitHeight,
            BoxFit::None,
            BoxFit::ScaleDown,
        ];
        let affecting: Vec<_> = all.into_iter().filter(|f| f.affects_layout()).collect();
        assert_eq!(affecting, vec![BoxFit::ScaleDown]);
    }
}
