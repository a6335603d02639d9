//! SVG visualization of a laid-out fit stack.
//!
//! Generates a vertical sequence of annotated panels: the box child at its
//! natural size, the placement rects returned by the rect computation, and
//! the painted result with the box scaled into its destination.
//!
//! # Example
//!
//! ```
//! use fitstack::{BoxConstraints, ChildSlot, FitStack, Rect, RenderChild, Size};
//! use fitstack::svg::render_stack_svg;
//!
//! struct Fixed(Size);
//! impl RenderChild for Fixed {
//!     fn layout(&mut self, c: BoxConstraints) -> Size { c.constrain(self.0) }
//!     fn dry_layout(&self, c: BoxConstraints) -> Size { c.constrain(self.0) }
//! }
//!
//! let mut stack = FitStack::new()
//!     .build_list(vec![ChildSlot::new(Fixed(Size::new(64.0, 48.0)))], |c, _| {
//!         vec![Rect::new(0.0, 0.0, c.max_width, c.max_height)]
//!     })
//!     .unwrap();
//! stack.perform_layout(BoxConstraints::loose(Size::new(320.0, 320.0))).unwrap();
//!
//! let svg = render_stack_svg(&stack);
//! assert!(svg.contains("320×320"));
//! ```

use crate::geometry::{Offset, Rect, Size};
use crate::stack::RenderFitStack;

use glam::DVec2;

/// Maximum pixel width for any panel in the SVG output.
const MAX_PANEL_W: f64 = 300.0;
/// Maximum pixel height for any panel in the SVG output.
const MAX_PANEL_H: f64 = 200.0;
/// Vertical gap between panels.
const PANEL_GAP: f64 = 50.0;
/// Horizontal margin.
const MARGIN_X: f64 = 50.0;
/// Top margin for first panel.
const MARGIN_TOP: f64 = 30.0;
/// Height of label text area above each panel.
const LABEL_H: f64 = 22.0;

/// A single panel in the visualization.
struct Step {
    label: String,
    /// The panel's coordinate space (e.g. the container).
    outer: Size,
    /// Rects drawn inside the panel, in `outer` coordinates.
    inner: Vec<InnerRect>,
    annotation: String,
}

struct InnerRect {
    rect: Rect,
    class: &'static str,
    caption: Option<String>,
}

/// Render a complete SVG document for the stack's last layout.
pub fn render_stack_svg<C>(stack: &RenderFitStack<C>) -> String {
    render_steps(&build_steps(stack))
}

fn build_steps<C>(stack: &RenderFitStack<C>) -> Vec<Step> {
    let mut steps = Vec::new();
    let size = stack.size();
    let Some(box_slot) = stack.children().first() else {
        steps.push(Step {
            label: format!("Empty  {}", dims(size)),
            outer: size,
            inner: Vec::new(),
            annotation: String::new(),
        });
        return steps;
    };

    // Box at natural size
    steps.push(Step {
        label: format!("Box  {}", dims(box_slot.size)),
        outer: box_slot.size,
        inner: vec![InnerRect {
            rect: Offset::ZERO.with_size(box_slot.size),
            class: "inner",
            caption: None,
        }],
        annotation: format!("fit {:?}", stack.fit_mode()),
    });

    // Placement rects
    steps.push(Step {
        label: format!("Rects  {}", dims(size)),
        outer: size,
        inner: stack
            .rects()
            .iter()
            .enumerate()
            .map(|(i, r)| InnerRect {
                rect: *r,
                class: "rect",
                caption: Some(format!("{i}")),
            })
            .collect(),
        annotation: format!("{:?}", stack.stack_fit()),
    });

    // Painted result
    let data = stack.paint_data();
    let origin = if stack.rect_computation().is_pair() {
        Offset::ZERO
    } else {
        stack.rects().first().map(Rect::top_left).unwrap_or_default()
    };
    let a = data.transform.transform_point2(DVec2::ZERO);
    let b = data
        .transform
        .transform_point2(DVec2::new(box_slot.size.width, box_slot.size.height));
    let drawn = Rect::from_points(Offset::new(a.x, a.y), Offset::new(b.x, b.y)).translate(origin);

    let mut inner = vec![InnerRect {
        rect: drawn,
        class: "inner",
        caption: None,
    }];
    inner.extend(stack.children().iter().skip(1).map(|sibling| InnerRect {
        rect: sibling.offset().with_size(sibling.size),
        class: "sibling",
        caption: None,
    }));
    steps.push(Step {
        label: format!("Painted  {}", dims(size)),
        outer: size,
        inner,
        annotation: if data.has_visual_overflow {
            format!("overflow, clip {:?}", stack.clip_behavior())
        } else {
            String::new()
        },
    });

    steps
}

fn dims(size: Size) -> String {
    format!("{}×{}", size.width, size.height)
}

/// Scale a Size to fit within MAX_PANEL_W × MAX_PANEL_H, preserving aspect ratio.
fn scale_to_fit(size: Size) -> (f64, f64, f64) {
    if size.is_empty() {
        return (1.0, 1.0, 1.0);
    }
    let scale = (MAX_PANEL_W / size.width).min(MAX_PANEL_H / size.height);
    (size.width * scale, size.height * scale, scale)
}

/// Render panels into a complete SVG document.
fn render_steps(steps: &[Step]) -> String {
    let mut total_h = MARGIN_TOP;
    for (i, _step) in steps.iter().enumerate() {
        total_h += LABEL_H + MAX_PANEL_H;
        if i < steps.len() - 1 {
            total_h += PANEL_GAP;
        }
    }
    total_h += MARGIN_TOP;
    let total_w = MAX_PANEL_W + 2.0 * MARGIN_X;

    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    svg.push_str(r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .caption { font-size: 10px; fill: #333; }
  .outer { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .inner { fill: #6ba3d6; fill-opacity: 0.8; stroke: #2c6faa; stroke-width: 1.5; }
  .rect { fill: none; stroke: #d67a2c; stroke-width: 1.5; stroke-dasharray: 4,2; }
  .sibling { fill: #d6b46b; fill-opacity: 0.8; stroke: #aa862c; stroke-width: 1; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .caption { fill: #ddd; }
    .outer { fill: #2d2d2d; stroke: #555; }
    .inner { fill: #3a72a4; stroke: #5a9fd4; }
    .sibling { fill: #a4843a; stroke: #d4b45a; }
  }
</style>
"##);

    let mut y = MARGIN_TOP;
    let center_x = total_w / 2.0;

    for step in steps {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
            center_x,
            y + 14.0,
            escape_xml(&step.label)
        ));
        svg.push('\n');
        y += LABEL_H;

        let (sw, sh, scale) = scale_to_fit(step.outer);
        let panel_x = center_x - sw / 2.0;
        let panel_y = y;

        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="outer" rx="2"/>"#,
            panel_x, panel_y, sw, sh
        ));
        svg.push('\n');

        for inner in &step.inner {
            let ix = panel_x + inner.rect.x * scale;
            let iy = panel_y + inner.rect.y * scale;
            svg.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="{}" rx="1"/>"#,
                ix,
                iy,
                inner.rect.width * scale,
                inner.rect.height * scale,
                inner.class
            ));
            svg.push('\n');
            if let Some(caption) = &inner.caption {
                svg.push_str(&format!(
                    r#"<text x="{:.1}" y="{:.1}" class="caption">{}</text>"#,
                    ix + 3.0,
                    iy + 11.0,
                    escape_xml(caption)
                ));
                svg.push('\n');
            }
        }

        if !step.annotation.is_empty() {
            svg.push_str(&format!(
                r#"<text x="{}" y="{:.1}" class="annotation" text-anchor="middle">{}</text>"#,
                center_x,
                panel_y + sh + 14.0,
                escape_xml(&step.annotation)
            ));
            svg.push('\n');
        }

        y += MAX_PANEL_H + PANEL_GAP;
    }

    svg.push_str("</svg>\n");
    svg
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::child::{ChildSlot, RenderChild};
    use crate::fit::BoxFit;
    use crate::geometry::BoxConstraints;
    use crate::stack::FitStack;

    struct Fixed(Size);

    impl RenderChild for Fixed {
        fn layout(&mut self, c: BoxConstraints) -> Size {
            c.constrain(self.0)
        }
        fn dry_layout(&self, c: BoxConstraints) -> Size {
            c.constrain(self.0)
        }
    }

    fn laid_out(fit: BoxFit) -> RenderFitStack<Fixed> {
        let children = vec![
            ChildSlot::new(Fixed(Size::new(50.0, 50.0))),
            ChildSlot::new(Fixed(Size::new(200.0, 100.0))),
            ChildSlot::new(Fixed(Size::new(200.0, 100.0))),
        ];
        let mut stack = FitStack::new()
            .fit(fit)
            .build_list(children, |_, _| {
                vec![
                    Rect::new(0.0, 100.0, 400.0, 300.0),
                    Rect::new(0.0, 0.0, 200.0, 100.0),
                    Rect::new(200.0, 0.0, 200.0, 100.0),
                ]
            })
            .unwrap();
        stack.perform_layout(BoxConstraints::UNCONSTRAINED).unwrap();
        stack
    }

    #[test]
    fn svg_shows_every_panel() {
        let svg = render_stack_svg(&laid_out(BoxFit::Contain));
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Box  50×50"));
        assert!(svg.contains("Rects  400×400"));
        assert!(svg.contains("Painted  400×400"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn svg_numbers_placement_rects() {
        let svg = render_stack_svg(&laid_out(BoxFit::Contain));
        assert_eq!(svg.matches(r#"class="caption""#).count(), 3);
    }

    #[test]
    fn svg_annotates_overflow() {
        assert!(render_stack_svg(&laid_out(BoxFit::Cover)).contains("overflow"));
        assert!(!render_stack_svg(&laid_out(BoxFit::Contain)).contains("overflow"));
    }

    #[test]
    fn svg_empty_stack() {
        let mut stack = FitStack::new()
            .build_list::<Fixed, _>(Vec::new(), |_, _| Vec::new())
            .unwrap();
        stack
            .perform_layout(BoxConstraints::tight(Size::new(10.0, 20.0)))
            .unwrap();
        let svg = render_stack_svg(&stack);
        assert!(svg.contains("Empty  10×20"));
        assert!(!svg.contains("<<"));
    }
}
