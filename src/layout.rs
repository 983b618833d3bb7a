//! Composition layout: image + matte + frame, sized for a preview viewport or
//! an export size budget.
//!
//! One geometry computation ([`content_size`]) feeds two fit strategies
//! ([`fit_to_viewport`], [`fit_to_size_budget`]) selected by [`FitTarget`].
//! The fit factor is a uniform display transform applied after the fact, so
//! a preview is always the export composition at a smaller scale.
//!
//! # Example
//!
//! ```
//! use zenmatte::{AspectRatio, CompositionParams, Extent, FitTarget, Size, SizeBudget, layout};
//!
//! let extent = Extent::new(800.0, 400.0).unwrap();
//! let params = CompositionParams::new()
//!     .matte(20.0)
//!     .frame(10.0)
//!     .frame_ratio(AspectRatio::SQUARE);
//!
//! let full = layout(&extent, &params, FitTarget::Export(SizeBudget::UNLIMITED)).unwrap();
//! assert_eq!(full.image, Size::new(800.0, 400.0));
//! assert_eq!(full.matte_outer, Size::new(840.0, 440.0));
//! assert_eq!(full.total, Size::new(860.0, 860.0));
//! assert_eq!(full.scale_factor, 1.0);
//! ```

use core::fmt;

use num_traits::Float;

use crate::geometry::{Extent, Size};
use crate::params::CompositionParams;

/// Thickness values are authored against an image whose longer side is this long.
pub const REFERENCE_DIMENSION: f64 = 800.0;

/// Fraction of the viewport a preview may occupy on each axis.
pub const VIEWPORT_MARGIN: f64 = 0.85;

/// Space available to an on-screen preview.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportBudget {
    /// Available width in display units.
    pub available_width: f64,
    /// Available height in display units.
    pub available_height: f64,
}

impl ViewportBudget {
    /// Create a viewport budget.
    pub const fn new(available_width: f64, available_height: f64) -> Self {
        Self {
            available_width,
            available_height,
        }
    }

    fn validate(&self) -> Result<(), LayoutError> {
        if positive(self.available_width) && positive(self.available_height) {
            Ok(())
        } else {
            Err(LayoutError::InvalidBudget)
        }
    }
}

/// Hard limits for an exported composite.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SizeBudget {
    /// Longest allowed side in pixels.
    pub max_dimension: f64,
    /// Largest allowed `width * height` in pixels.
    pub max_pixel_area: f64,
}

impl SizeBudget {
    /// Limits used for full-resolution export: 8192 px per side, 50 MP.
    pub const EXPORT: Self = Self {
        max_dimension: 8192.0,
        max_pixel_area: 50_000_000.0,
    };

    /// No limits. The composition is reported at its unscaled size.
    pub const UNLIMITED: Self = Self {
        max_dimension: f64::INFINITY,
        max_pixel_area: f64::INFINITY,
    };

    /// Create a size budget.
    pub const fn new(max_dimension: f64, max_pixel_area: f64) -> Self {
        Self {
            max_dimension,
            max_pixel_area,
        }
    }

    fn validate(&self) -> Result<(), LayoutError> {
        // Infinity is allowed here; NaN and non-positive limits are not.
        if self.max_dimension > 0.0 && self.max_pixel_area > 0.0 {
            Ok(())
        } else {
            Err(LayoutError::InvalidBudget)
        }
    }
}

impl Default for SizeBudget {
    fn default() -> Self {
        Self::EXPORT
    }
}

/// Where the composition will be shown, and therefore how it is fitted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FitTarget {
    /// Interactive preview bounded by [`VIEWPORT_MARGIN`] of the viewport.
    Viewport(ViewportBudget),
    /// Full-resolution export, shrunk uniformly only when over budget.
    Export(SizeBudget),
}

impl FitTarget {
    /// Scale factor this target applies to an unscaled composition of `total` size.
    pub fn scale_for(&self, total: Size) -> f64 {
        match self {
            Self::Viewport(budget) => fit_to_viewport(total, budget),
            Self::Export(budget) => fit_to_size_budget(total, budget),
        }
    }

    fn validate(&self) -> Result<(), LayoutError> {
        match self {
            Self::Viewport(budget) => budget.validate(),
            Self::Export(budget) => budget.validate(),
        }
    }
}

impl From<ViewportBudget> for FitTarget {
    fn from(budget: ViewportBudget) -> Self {
        Self::Viewport(budget)
    }
}

impl From<SizeBudget> for FitTarget {
    fn from(budget: SizeBudget) -> Self {
        Self::Export(budget)
    }
}

/// Unscaled composition geometry in source pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContentSize {
    /// Image plus matte.
    pub matte_outer: Size,
    /// Matted image grown to the frame aspect ratio (equal to `matte_outer`
    /// when the frame is disabled).
    pub content: Size,
    /// `content` plus the frame on every side.
    pub total: Size,
    /// Matte thickness in source pixels.
    pub matte_px: f64,
    /// Frame thickness in source pixels, zero when the frame is disabled.
    pub frame_px: f64,
}

/// Computed composition, scaled for its target.
///
/// All sizes are nested: `image ⊆ matte_outer ⊆ total` on both axes, and the
/// image and matte are centered inside `total`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutResult {
    /// Source image at its intrinsic aspect ratio.
    pub image: Size,
    /// Outer edge of the matte.
    pub matte_outer: Size,
    /// Outer edge of the frame; the full composition.
    pub total: Size,
    /// Matte thickness in output units.
    pub matte_thickness: f64,
    /// Frame thickness in output units. Frame border may be wider on one
    /// axis where the composition was grown to the frame aspect ratio.
    pub frame_thickness: f64,
    /// Source pixels per reference unit (see [`reference_scale`]).
    pub reference_scale: f64,
    /// Uniform factor applied to every unscaled dimension. Never above 1.
    pub scale_factor: f64,
}

impl LayoutResult {
    /// Top-left offset of the image inside `total`.
    pub fn image_origin(&self) -> (f64, f64) {
        self.image.centered_in(self.total)
    }

    /// Top-left offset of the matte inside `total`.
    pub fn matte_origin(&self) -> (f64, f64) {
        self.matte_outer.centered_in(self.total)
    }

    /// Composition size before the fit factor was applied.
    pub fn unscaled_total(&self) -> Size {
        self.total.scale(1.0 / self.scale_factor)
    }

    /// Whether the fit shrank the composition.
    pub fn is_scaled(&self) -> bool {
        self.scale_factor < 1.0
    }

    /// Whether any frame border is visible.
    pub fn has_frame(&self) -> bool {
        self.total != self.matte_outer
    }

    /// Whether any matte is visible.
    pub fn has_matte(&self) -> bool {
        self.matte_thickness > 0.0
    }
}

/// Source pixels per reference unit: the image's longer side over
/// [`REFERENCE_DIMENSION`].
///
/// Preview and export both derive thickness from this, never from the
/// display scale.
pub fn reference_scale(extent: &Extent) -> f64 {
    extent.max_side() / REFERENCE_DIMENSION
}

/// Unscaled composition for `extent` and `params`.
///
/// The image is never cropped. With the frame enabled, the matted image is
/// grown (never shrunk) on one axis to reach the frame aspect ratio and the
/// extra space becomes frame border.
pub fn content_size(extent: &Extent, params: &CompositionParams) -> ContentSize {
    let scale = reference_scale(extent);
    let matte_px = params.matte_thickness * scale;
    let frame_px = params.effective_frame_thickness() * scale;

    let matte_outer = extent.size().inflate(matte_px);

    let content = if params.frame_enabled {
        grow_to_aspect(matte_outer, params.frame_ratio.value())
    } else {
        matte_outer
    };

    ContentSize {
        matte_outer,
        content,
        total: content.inflate(frame_px),
        matte_px,
        frame_px,
    }
}

/// Preview scale: fit inside [`VIEWPORT_MARGIN`] of the viewport, never upscale.
pub fn fit_to_viewport(total: Size, budget: &ViewportBudget) -> f64 {
    let max_w = budget.available_width * VIEWPORT_MARGIN;
    let max_h = budget.available_height * VIEWPORT_MARGIN;
    (max_w / total.width).min(max_h / total.height).min(1.0)
}

/// Export scale: respect the longest-side limit, then the pixel-area limit.
///
/// Exceeding the budget is not an error; the whole composition is shrunk
/// uniformly instead.
pub fn fit_to_size_budget(total: Size, budget: &SizeBudget) -> f64 {
    let side = (budget.max_dimension / total.max_side()).min(1.0);
    // Per-axis roots: `width * height` overflows for huge finite extents.
    let area = Float::sqrt(budget.max_pixel_area)
        / Float::sqrt(total.width)
        / Float::sqrt(total.height);
    side.min(area)
}

/// Lay out a composition for `target`.
///
/// Rejects negative or non-finite thickness and invalid budgets; the extent is
/// already valid by construction. Everything else, including an export that
/// exceeds its size budget, produces a layout.
pub fn layout(
    extent: &Extent,
    params: &CompositionParams,
    target: FitTarget,
) -> Result<LayoutResult, LayoutError> {
    params.validate()?;
    target.validate()?;

    let geometry = content_size(extent, params);
    let scale = target.scale_for(geometry.total);

    Ok(LayoutResult {
        image: extent.size().scale(scale),
        matte_outer: geometry.matte_outer.scale(scale),
        total: geometry.total.scale(scale),
        matte_thickness: geometry.matte_px * scale,
        frame_thickness: geometry.frame_px * scale,
        reference_scale: reference_scale(extent),
        scale_factor: scale,
    })
}

/// [`layout`] for an on-screen preview.
pub fn preview(
    extent: &Extent,
    params: &CompositionParams,
    viewport: ViewportBudget,
) -> Result<LayoutResult, LayoutError> {
    layout(extent, params, FitTarget::Viewport(viewport))
}

/// [`layout`] for a full-resolution export.
pub fn export(
    extent: &Extent,
    params: &CompositionParams,
    budget: SizeBudget,
) -> Result<LayoutResult, LayoutError> {
    layout(extent, params, FitTarget::Export(budget))
}

/// Layout computation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// Image width or height is zero, negative, or not finite.
    InvalidExtent,
    /// Matte or enabled frame thickness is negative.
    NegativeThickness,
    /// Matte or enabled frame thickness is NaN or infinite.
    NonFiniteThickness,
    /// Viewport or size budget is zero, negative, or NaN.
    InvalidBudget,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InvalidExtent => "image extent must be positive and finite",
            Self::NegativeThickness => "matte and frame thickness must not be negative",
            Self::NonFiniteThickness => "matte and frame thickness must be finite",
            Self::InvalidBudget => "layout budget must be positive",
        })
    }
}

impl core::error::Error for LayoutError {}

// ============================================================================
// Internal geometry
// ============================================================================

/// Grow one axis of `size` so that `width / height == target`.
fn grow_to_aspect(size: Size, target: f64) -> Size {
    if target > size.aspect_ratio() {
        Size::new(size.height * target, size.height)
    } else {
        Size::new(size.width, size.width / target)
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
