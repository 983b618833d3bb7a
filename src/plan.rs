//! Export planning: whole-pixel canvas geometry for the compositor.
//!
//! [`layout`](crate::layout::layout) works in fractional units. A renderer
//! needs integer canvas and placement values plus a note of whether the size
//! budget forced a downsample, which is what [`ExportPlan`] carries.

use core::fmt;

use num_traits::Float;

use crate::geometry::{Extent, Size};
use crate::layout::{LayoutError, LayoutResult, SizeBudget, content_size, export};
use crate::params::CompositionParams;

/// Which export limit, if any, shrank the composition.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Degradation {
    /// Exported at full resolution.
    #[default]
    None,
    /// The longest side exceeded `max_dimension`.
    MaxDimension,
    /// The area still exceeded `max_pixel_area` after the side limit.
    PixelArea,
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "full resolution",
            Self::MaxDimension => "downsampled to max dimension",
            Self::PixelArea => "downsampled to max pixel area",
        })
    }
}

/// Integer geometry for one export.
///
/// # Example
///
/// ```
/// use zenmatte::{CompositionParams, Degradation, ExportPlan, Extent, SizeBudget};
///
/// let extent = Extent::from_pixels(800, 400).unwrap();
/// let params = CompositionParams::new().matte(20.0).frame(10.0);
/// let plan = ExportPlan::new(&extent, &params, SizeBudget::EXPORT).unwrap();
///
/// assert_eq!(plan.canvas, (860, 860));
/// assert_eq!(plan.image_size, (800, 400));
/// assert_eq!(plan.image_placement, (30, 230));
/// assert_eq!(plan.degradation, Degradation::None);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ExportPlan {
    /// Fractional layout the integer values were derived from.
    pub layout: LayoutResult,
    /// Output canvas (frame outer edge) in pixels.
    pub canvas: (u32, u32),
    /// Matte rectangle size in pixels.
    pub matte_size: (u32, u32),
    /// Top-left of the matte on the canvas.
    pub matte_placement: (u32, u32),
    /// Size the source image is resampled to.
    pub image_size: (u32, u32),
    /// Top-left of the image on the canvas.
    pub image_placement: (u32, u32),
    /// Which limit shrank the output.
    pub degradation: Degradation,
}

impl ExportPlan {
    /// Plan an export of `extent` with `params` under `budget`.
    pub fn new(
        extent: &Extent,
        params: &CompositionParams,
        budget: SizeBudget,
    ) -> Result<Self, LayoutError> {
        let layout = export(extent, params, budget)?;
        let unscaled = content_size(extent, params).total;
        let degradation = classify(unscaled, &budget, layout.scale_factor);

        if degradation != Degradation::None {
            crate::log_debug!(
                "export {:.0}x{:.0} {} (scale {:.4})",
                unscaled.width,
                unscaled.height,
                degradation,
                layout.scale_factor
            );
        }

        let canvas = to_pixels(layout.total);
        let matte_size = fit_pixels(to_pixels(layout.matte_outer), canvas);
        let image_size = fit_pixels(to_pixels(layout.image), matte_size);

        Ok(Self {
            layout,
            canvas,
            matte_size,
            matte_placement: place(layout.matte_origin(), matte_size, canvas),
            image_size,
            image_placement: place(layout.image_origin(), image_size, canvas),
            degradation,
        })
    }

    /// Whether the export is smaller than the full-resolution composition.
    pub fn is_downsampled(&self) -> bool {
        self.degradation != Degradation::None
    }

    /// True when the source can be copied onto the canvas without resampling.
    pub fn image_is_identity(&self, extent: &Extent) -> bool {
        self.image_size == to_pixels(extent.size())
    }
}

fn classify(unscaled: Size, budget: &SizeBudget, applied: f64) -> Degradation {
    if applied >= 1.0 {
        return Degradation::None;
    }
    let side_only = (budget.max_dimension / unscaled.max_side()).min(1.0);
    if applied < side_only {
        Degradation::PixelArea
    } else {
        Degradation::MaxDimension
    }
}

/// Round to whole pixels, at least 1×1.
fn to_pixels(size: Size) -> (u32, u32) {
    (round_px(size.width), round_px(size.height))
}

fn round_px(v: f64) -> u32 {
    // `as` saturates at u32::MAX.
    (Float::round(v) as u32).max(1)
}

/// Shrink `inner` so rounding never pushes it past `outer`.
fn fit_pixels(inner: (u32, u32), outer: (u32, u32)) -> (u32, u32) {
    (inner.0.min(outer.0), inner.1.min(outer.1))
}

/// Round a fractional origin, keeping `size` inside `canvas`.
fn place(origin: (f64, f64), size: (u32, u32), canvas: (u32, u32)) -> (u32, u32) {
    let x = (Float::round(origin.0).max(0.0) as u32).min(canvas.0 - size.0);
    let y = (Float::round(origin.1).max(0.0) as u32).min(canvas.1 - size.1);
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extent(w: u32, h: u32) -> Extent {
        Extent::from_pixels(w, h).unwrap()
    }

    #[test]
    fn plain_image_is_identity() {
        let e = extent(800, 800);
        let p = CompositionParams::new().frame_enabled(false);
        let plan = ExportPlan::new(&e, &p, SizeBudget::EXPORT).unwrap();
        assert_eq!(plan.canvas, (800, 800));
        assert_eq!(plan.matte_size, (800, 800));
        assert_eq!(plan.image_placement, (0, 0));
        assert!(plan.image_is_identity(&e));
        assert!(!plan.is_downsampled());
    }

    #[test]
    fn matte_and_frame_placement() {
        let p = CompositionParams::new().matte(20.0).frame(10.0);
        let plan = ExportPlan::new(&extent(800, 400), &p, SizeBudget::EXPORT).unwrap();
        assert_eq!(plan.canvas, (860, 860));
        assert_eq!(plan.matte_size, (840, 440));
        assert_eq!(plan.matte_placement, (10, 210));
        assert_eq!(plan.image_placement, (30, 230));
    }

    #[test]
    fn wide_panorama_hits_max_dimension() {
        let p = CompositionParams::new().frame_enabled(false);
        let plan = ExportPlan::new(&extent(20000, 10000), &p, SizeBudget::EXPORT).unwrap();
        assert_eq!(plan.degradation, Degradation::MaxDimension);
        assert_eq!(plan.canvas, (8192, 4096));
        assert!(!plan.image_is_identity(&extent(20000, 10000)));
    }

    #[test]
    fn square_frame_on_large_image_hits_pixel_area() {
        // 1:1 frame turns 20000×10000 into 20000×20000; side limit alone
        // leaves 8192×8192 = 67 MP.
        let p = CompositionParams::new();
        let plan = ExportPlan::new(&extent(20000, 10000), &p, SizeBudget::EXPORT).unwrap();
        assert_eq!(plan.degradation, Degradation::PixelArea);
        let (w, h) = plan.canvas;
        assert_eq!(w, h);
        assert!(u64::from(w) * u64::from(h) <= 50_000_000);
    }

    #[test]
    fn area_only_degradation() {
        let p = CompositionParams::new().frame_enabled(false);
        let plan = ExportPlan::new(&extent(8000, 8000), &p, SizeBudget::EXPORT).unwrap();
        assert_eq!(plan.degradation, Degradation::PixelArea);
        assert_eq!(plan.canvas, (7071, 7071));
    }

    #[test]
    fn tiny_budget_keeps_one_pixel() {
        let p = CompositionParams::new().matte(30.0).frame(150.0);
        let plan = ExportPlan::new(&extent(800, 800), &p, SizeBudget::new(1.0, 1.0)).unwrap();
        assert_eq!(plan.canvas, (1, 1));
        assert_eq!(plan.image_size, (1, 1));
        assert_eq!(plan.image_placement, (0, 0));
    }

    #[test]
    fn invalid_params_propagate() {
        let p = CompositionParams::new().frame(-2.0);
        assert_eq!(
            ExportPlan::new(&extent(10, 10), &p, SizeBudget::EXPORT),
            Err(LayoutError::NegativeThickness)
        );
    }
}
