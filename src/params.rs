//! Composition parameters and the validation boundary in front of the engine.
//!
//! Thickness values are authored in reference units (see
//! [`reference_scale`](crate::layout::reference_scale)). The engine assumes
//! they are non-negative; [`CompositionParams::clamped`] is where UI input is
//! brought into range.

use crate::layout::LayoutError;
use crate::ratio::AspectRatio;

/// Matte, frame, and frame aspect ratio for one composition.
///
/// # Example
///
/// ```
/// use zenmatte::{AspectRatio, CompositionParams};
///
/// let params = CompositionParams::new()
///     .matte(20.0)
///     .frame(10.0)
///     .frame_ratio(AspectRatio::parse_or_square("4:3"));
///
/// assert!(params.frame_enabled);
/// assert_eq!(params.effective_frame_thickness(), 10.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CompositionParams {
    /// Solid border directly around the image, in reference units.
    pub matte_thickness: f64,
    /// Outer border around the matted image, in reference units.
    /// Ignored unless `frame_enabled`.
    pub frame_thickness: f64,
    /// Whether the frame is drawn and the aspect ratio enforced.
    pub frame_enabled: bool,
    /// Aspect ratio the framed composition is grown to.
    pub frame_ratio: AspectRatio,
}

impl Default for CompositionParams {
    fn default() -> Self {
        Self {
            matte_thickness: 0.0,
            frame_thickness: 0.0,
            frame_enabled: true,
            frame_ratio: AspectRatio::SQUARE,
        }
    }
}

impl CompositionParams {
    /// No matte, zero-width frame enabled at 1:1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set matte thickness.
    pub fn matte(mut self, thickness: f64) -> Self {
        self.matte_thickness = thickness;
        self
    }

    /// Set frame thickness.
    pub fn frame(mut self, thickness: f64) -> Self {
        self.frame_thickness = thickness;
        self
    }

    /// Enable or disable the frame.
    pub fn frame_enabled(mut self, enabled: bool) -> Self {
        self.frame_enabled = enabled;
        self
    }

    /// Set the frame aspect ratio.
    pub fn frame_ratio(mut self, ratio: AspectRatio) -> Self {
        self.frame_ratio = ratio;
        self
    }

    /// Frame thickness that actually contributes to geometry.
    pub fn effective_frame_thickness(&self) -> f64 {
        if self.frame_enabled {
            self.frame_thickness
        } else {
            0.0
        }
    }

    /// Smallest frame thickness allowed for the current matte.
    pub fn min_frame_thickness(&self) -> f64 {
        min_frame_width(self.frame_enabled, self.matte_thickness)
    }

    /// Reject thickness values the engine cannot lay out.
    ///
    /// A disabled frame's thickness is not checked since it never reaches
    /// the geometry.
    pub fn validate(&self) -> Result<(), LayoutError> {
        check_thickness(self.matte_thickness)?;
        if self.frame_enabled {
            check_thickness(self.frame_thickness)?;
        }
        Ok(())
    }

    /// Bring UI-supplied thickness values into `limits`.
    ///
    /// Matte goes to `[0, max_matte]`; frame goes to
    /// `[min_frame_thickness, max_frame]`, evaluated after the matte is
    /// clamped. Non-finite values collapse to the lower bound.
    pub fn clamped(mut self, limits: &ThicknessLimits) -> Self {
        self.matte_thickness = clamp_or_min(self.matte_thickness, 0.0, limits.max_matte);
        let min_frame = self.min_frame_thickness();
        self.frame_thickness = clamp_or_min(self.frame_thickness, min_frame, limits.max_frame);
        self
    }
}

/// Upper bounds for the thickness controls.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ThicknessLimits {
    /// Largest matte thickness in reference units.
    pub max_matte: f64,
    /// Largest frame thickness in reference units.
    pub max_frame: f64,
}

impl Default for ThicknessLimits {
    fn default() -> Self {
        Self {
            max_matte: 30.0,
            max_frame: 150.0,
        }
    }
}

/// Minimum frame thickness for a given matte.
///
/// Zero when the frame is off or there is no matte; otherwise
/// `max(0.5, matte * 0.3)` so a matted image never gets a hairline frame.
pub fn min_frame_width(frame_enabled: bool, matte_thickness: f64) -> f64 {
    if !frame_enabled || matte_thickness <= 0.0 {
        return 0.0;
    }
    (matte_thickness * 0.3).max(0.5)
}

fn check_thickness(value: f64) -> Result<(), LayoutError> {
    if !value.is_finite() {
        Err(LayoutError::NonFiniteThickness)
    } else if value < 0.0 {
        Err(LayoutError::NegativeThickness)
    } else {
        Ok(())
    }
}

fn clamp_or_min(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    // max wins if the limits are inverted.
    value.max(min).min(max.max(min))
}
