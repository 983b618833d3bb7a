//! Input shaping for the user's image transform.
//!
//! Pinch and rotate gestures produce a scale and an angle that the renderer
//! applies to the image rectangle only. Matte and frame geometry never see
//! these values; nothing here feeds back into [`layout`](crate::layout::layout).

use num_traits::Float;

use crate::geometry::Size;

/// Rotations within this many degrees of a right angle snap to it.
pub const SNAP_TOLERANCE_DEGREES: f64 = 7.5;

/// Smallest magnification a pinch may settle at.
pub const MIN_MAGNIFICATION: f64 = 0.2;

/// Largest magnification a pinch may settle at.
pub const MAX_MAGNIFICATION: f64 = 5.0;

/// Snap `degrees` to the nearest multiple of 90 when within
/// [`SNAP_TOLERANCE_DEGREES`]; otherwise return it unchanged.
///
/// The winding is kept: `-88` snaps to `-90`, `455` to `450` and `-365`
/// to `-360`. Reduce modulo 360 downstream if a single turn is needed.
///
/// ```
/// use zenmatte::gesture::snap_rotation;
///
/// assert_eq!(snap_rotation(93.0), 90.0);
/// assert_eq!(snap_rotation(-4.0), 0.0);
/// assert_eq!(snap_rotation(45.0), 45.0);
/// ```
pub fn snap_rotation(degrees: f64) -> f64 {
    let nearest = Float::round(degrees / 90.0) * 90.0;
    if Float::abs(degrees - nearest) < SNAP_TOLERANCE_DEGREES {
        // Avoid handing out -0.0.
        nearest + 0.0
    } else {
        degrees
    }
}

/// Clamp a finished pinch to `[MIN_MAGNIFICATION, MAX_MAGNIFICATION]`.
/// NaN resets to 1.
pub fn clamp_magnification(scale: f64) -> f64 {
    if scale.is_nan() {
        return 1.0;
    }
    scale.clamp(MIN_MAGNIFICATION, MAX_MAGNIFICATION)
}

/// Scale and rotation applied to the image rectangle at render time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ImageTransform {
    /// Uniform magnification about the image center.
    pub scale: f64,
    /// Clockwise rotation about the image center, in degrees.
    pub rotation_degrees: f64,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ImageTransform {
    /// No scaling, no rotation.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        rotation_degrees: 0.0,
    };

    /// Create a transform without any shaping.
    pub const fn new(scale: f64, rotation_degrees: f64) -> Self {
        Self {
            scale,
            rotation_degrees,
        }
    }

    /// Transform from settled gesture values: magnification clamped,
    /// rotation snapped.
    pub fn from_gesture(scale: f64, rotation_degrees: f64) -> Self {
        Self {
            scale: clamp_magnification(scale),
            rotation_degrees: snap_rotation(rotation_degrees),
        }
    }

    /// Whether rendering can skip the transform.
    pub fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.quarter_turns() == Some(0)
    }

    /// Clockwise quarter turns (0-3) when the rotation is an exact multiple
    /// of 90 degrees, for renderers with a lossless rotate path.
    pub fn quarter_turns(&self) -> Option<u8> {
        let turns = self.rotation_degrees / 90.0;
        if !turns.is_finite() || Float::fract(turns) != 0.0 {
            return None;
        }
        let mut turns = turns % 4.0;
        if turns < 0.0 {
            turns += 4.0;
        }
        Some(turns as u8)
    }

    /// Axis-aligned bounds of `image` after this transform.
    ///
    /// The renderer clips to the unscaled image rectangle; this is the area
    /// that would be covered without the clip.
    pub fn rotated_bounds(&self, image: Size) -> Size {
        let (sin, cos) = Float::sin_cos(Float::to_radians(self.rotation_degrees));
        let (sin, cos) = (Float::abs(sin), Float::abs(cos));
        Size::new(
            (image.width * cos + image.height * sin) * self.scale,
            (image.width * sin + image.height * cos) * self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── snap_rotation ───────────────────────────────────────────────────

    #[test]
    fn snap_near_right_angles() {
        assert_eq!(snap_rotation(7.0), 0.0);
        assert_eq!(snap_rotation(84.0), 90.0);
        assert_eq!(snap_rotation(185.0), 180.0);
        assert_eq!(snap_rotation(-268.0), -270.0);
        assert_eq!(snap_rotation(357.5), 360.0);
    }

    #[test]
    fn snap_keeps_winding_past_full_turn() {
        assert_eq!(snap_rotation(455.0), 450.0);
        assert_eq!(snap_rotation(535.0), 540.0);
        assert_eq!(snap_rotation(-365.0), -360.0);
        assert_eq!(snap_rotation(724.0), 720.0);
        assert_eq!(snap_rotation(400.0), 400.0);
        let settled = ImageTransform::from_gesture(1.0, 455.0);
        assert_eq!(settled.quarter_turns(), Some(1));
    }

    #[test]
    fn snap_leaves_free_angles() {
        assert_eq!(snap_rotation(7.5), 7.5);
        assert_eq!(snap_rotation(30.0), 30.0);
        assert_eq!(snap_rotation(-135.0), -135.0);
    }

    #[test]
    fn snap_never_returns_negative_zero() {
        assert!(snap_rotation(-3.0).is_sign_positive());
    }

    #[test]
    fn snap_nan_passes_through() {
        assert!(snap_rotation(f64::NAN).is_nan());
    }

    // ── clamp_magnification ─────────────────────────────────────────────

    #[test]
    fn magnification_bounds() {
        assert_eq!(clamp_magnification(0.05), 0.2);
        assert_eq!(clamp_magnification(12.0), 5.0);
        assert_eq!(clamp_magnification(1.5), 1.5);
        assert_eq!(clamp_magnification(f64::NAN), 1.0);
    }

    // ── ImageTransform ──────────────────────────────────────────────────

    #[test]
    fn from_gesture_shapes_both_values() {
        let t = ImageTransform::from_gesture(9.0, 92.0);
        assert_eq!(t, ImageTransform::new(5.0, 90.0));
        assert_eq!(t.quarter_turns(), Some(1));
    }

    #[test]
    fn quarter_turns_wraps_negative() {
        assert_eq!(ImageTransform::new(1.0, -90.0).quarter_turns(), Some(3));
        assert_eq!(ImageTransform::new(1.0, 720.0).quarter_turns(), Some(0));
        assert_eq!(ImageTransform::new(1.0, 45.0).quarter_turns(), None);
    }

    #[test]
    fn identity_detection() {
        assert!(ImageTransform::default().is_identity());
        assert!(ImageTransform::new(1.0, 360.0).is_identity());
        assert!(!ImageTransform::new(1.2, 0.0).is_identity());
    }

    #[test]
    fn bounds_quarter_turn_swaps_axes() {
        let b = ImageTransform::new(1.0, 90.0).rotated_bounds(Size::new(800.0, 400.0));
        assert!((b.width - 400.0).abs() < 1e-9);
        assert!((b.height - 800.0).abs() < 1e-9);
    }

    #[test]
    fn bounds_diagonal_rotation_grows() {
        let b = ImageTransform::new(1.0, 45.0).rotated_bounds(Size::new(100.0, 100.0));
        let expected = 100.0 * core::f64::consts::SQRT_2;
        assert!((b.width - expected).abs() < 1e-9);
        assert!((b.height - expected).abs() < 1e-9);
    }

    #[test]
    fn bounds_scale_applies() {
        let b = ImageTransform::new(2.0, 0.0).rotated_bounds(Size::new(10.0, 20.0));
        assert_eq!(b, Size::new(20.0, 40.0));
    }
}
