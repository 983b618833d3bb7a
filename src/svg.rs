//! SVG visualization of compositions.
//!
//! Draws each composition as nested frame / matte / image boxes with their
//! dimensions, stacked vertically. Useful for eyeballing preview-vs-export
//! consistency.
//!
//! # Example
//!
//! ```
//! use zenmatte::{CompositionParams, Extent, SizeBudget, ViewportBudget, export, preview};
//! use zenmatte::svg::render_comparison_svg;
//!
//! let extent = Extent::new(4000.0, 3000.0).unwrap();
//! let params = CompositionParams::new().matte(20.0).frame(10.0);
//!
//! let on_screen = preview(&extent, &params, ViewportBudget::new(390.0, 600.0)).unwrap();
//! let saved = export(&extent, &params, SizeBudget::EXPORT).unwrap();
//!
//! let svg = render_comparison_svg(&[("Preview", &on_screen), ("Export", &saved)]);
//! assert!(svg.contains("Preview"));
//! ```

#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::string::String;

use crate::geometry::Size;
use crate::layout::LayoutResult;

/// Maximum pixel width for any panel in the SVG output.
const MAX_PANEL_W: f64 = 300.0;
/// Maximum pixel height for any panel in the SVG output.
const MAX_PANEL_H: f64 = 240.0;
/// Vertical gap between panels.
const PANEL_GAP: f64 = 40.0;
/// Horizontal margin.
const MARGIN_X: f64 = 50.0;
/// Top margin for first panel.
const MARGIN_TOP: f64 = 30.0;
/// Height of label text area above each panel.
const LABEL_H: f64 = 22.0;
/// Height of annotation text area below each panel.
const ANNOTATION_H: f64 = 18.0;

/// Render a single composition as a complete SVG document.
pub fn render_composition_svg(layout: &LayoutResult) -> String {
    render_comparison_svg(&[("Composition", layout)])
}

/// Render several labeled compositions, top to bottom, as one SVG document.
///
/// Each panel is scaled independently to the panel box, so compositions at
/// different fit factors look identical when they share geometry.
pub fn render_comparison_svg(panels: &[(&str, &LayoutResult)]) -> String {
    if panels.is_empty() {
        return String::from(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#);
    }

    let per_panel = LABEL_H + MAX_PANEL_H + ANNOTATION_H;
    let total_h = 2.0 * MARGIN_TOP
        + per_panel * panels.len() as f64
        + PANEL_GAP * (panels.len() - 1) as f64;
    let total_w = MAX_PANEL_W + 2.0 * MARGIN_X;

    let mut svg = String::with_capacity(2048 * panels.len());

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .frame { fill: #ffffff; stroke: #999; stroke-width: 1; }
  .matte { fill: #111111; }
  .image { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .frame { fill: #d8d8d8; stroke: #555; }
    .image { fill: #3a72a4; stroke: #5a9fd4; }
  }
</style>
"##,
    );

    let center_x = total_w / 2.0;
    let mut y = MARGIN_TOP;

    for (i, (label, layout)) in panels.iter().enumerate() {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}  {}</text>"#,
            center_x,
            y + 14.0,
            escape_xml(label),
            dims(layout.total)
        ));
        svg.push('\n');
        y += LABEL_H;

        let (pw, ph, scale) = scale_to_fit(layout.total);
        let px = center_x - pw / 2.0;
        let py = y;

        push_rect(&mut svg, px, py, pw, ph, "frame");

        if layout.has_matte() {
            let (mx, my) = layout.matte_origin();
            push_rect(
                &mut svg,
                px + mx * scale,
                py + my * scale,
                layout.matte_outer.width * scale,
                layout.matte_outer.height * scale,
                "matte",
            );
        }

        let (ix, iy) = layout.image_origin();
        push_rect(
            &mut svg,
            px + ix * scale,
            py + iy * scale,
            layout.image.width * scale,
            layout.image.height * scale,
            "image",
        );

        svg.push_str(&format!(
            r#"<text x="{}" y="{:.1}" class="annotation" text-anchor="middle">{}</text>"#,
            center_x,
            py + ph + 14.0,
            escape_xml(&annotation(layout))
        ));
        svg.push('\n');

        y += MAX_PANEL_H + ANNOTATION_H;
        if i < panels.len() - 1 {
            y += PANEL_GAP;
        }
    }

    svg.push_str("</svg>\n");
    svg
}

fn annotation(layout: &LayoutResult) -> String {
    format!(
        "image {}, matte {:.1}, frame {:.1}, scale {:.3}",
        dims(layout.image),
        layout.matte_thickness,
        layout.frame_thickness,
        layout.scale_factor
    )
}

fn dims(size: Size) -> String {
    format!("{:.0}×{:.0}", size.width, size.height)
}

fn push_rect(svg: &mut String, x: f64, y: f64, w: f64, h: f64, class: &str) {
    svg.push_str(&format!(
        r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" class="{class}"/>"#
    ));
    svg.push('\n');
}

/// Scale a Size to fit within MAX_PANEL_W × MAX_PANEL_H, preserving aspect ratio.
fn scale_to_fit(size: Size) -> (f64, f64, f64) {
    let (w, h) = (size.width, size.height);
    if w <= 0.0 || h <= 0.0 {
        return (1.0, 1.0, 1.0);
    }
    let scale = (MAX_PANEL_W / w).min(MAX_PANEL_H / h);
    (w * scale, h * scale, scale)
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
    use crate::geometry::Extent;
    use crate::layout::{SizeBudget, ViewportBudget, export, preview};
    use crate::params::CompositionParams;

    fn framed() -> (Extent, CompositionParams) {
        (
            Extent::new(800.0, 400.0).unwrap(),
            CompositionParams::new().matte(20.0).frame(10.0),
        )
    }

    #[test]
    fn svg_single_composition() {
        let (e, p) = framed();
        let l = export(&e, &p, SizeBudget::UNLIMITED).unwrap();
        let svg = render_composition_svg(&l);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert!(svg.contains("860×860"));
        assert!(svg.contains("image 800×400"));
        assert!(svg.contains(r#"class="matte""#));
    }

    #[test]
    fn svg_skips_matte_when_absent() {
        let e = Extent::new(800.0, 800.0).unwrap();
        let p = CompositionParams::new().frame_enabled(false);
        let l = export(&e, &p, SizeBudget::UNLIMITED).unwrap();
        let svg = render_composition_svg(&l);
        assert!(!svg.contains(r#"class="matte""#));
    }

    #[test]
    fn svg_preview_and_export_panels_match() {
        let (e, p) = framed();
        let a = preview(&e, &p, ViewportBudget::new(400.0, 400.0)).unwrap();
        let b = export(&e, &p, SizeBudget::UNLIMITED).unwrap();
        let svg = render_comparison_svg(&[("A", &a), ("B", &b)]);

        // Same geometry → same panel rectangles, only labels differ.
        let rects: Vec<&str> = svg.lines().filter(|l| l.starts_with("<rect")).collect();
        assert_eq!(rects.len(), 6);
        for (ra, rb) in rects[0..3].iter().zip(&rects[3..6]) {
            // x and size match; y differs by the panel offset.
            let strip_y = |r: &str| r.split(" y=").next().map(str::to_owned);
            assert_eq!(strip_y(*ra), strip_y(*rb));
        }
    }

    #[test]
    fn svg_escapes_labels() {
        let (e, p) = framed();
        let l = export(&e, &p, SizeBudget::EXPORT).unwrap();
        let svg = render_comparison_svg(&[("<a&b>", &l)]);
        assert!(svg.contains("&lt;a&amp;b&gt;"));
    }

    #[test]
    fn svg_empty_input() {
        assert!(render_comparison_svg(&[]).contains("width=\"1\""));
    }
}
