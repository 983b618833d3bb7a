//! Value types for composition geometry.
//!
//! All dimensions are `f64` in abstract output units. The layout engine never
//! rounds; [`ExportPlan`](crate::ExportPlan) does that once at the end.

use crate::layout::LayoutError;

/// Width × height in output units.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in output units.
    pub width: f64,
    /// Height in output units.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Multiply both axes by `factor`.
    pub fn scale(self, factor: f64) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Add `amount` to each side (so `2 * amount` per axis).
    pub fn inflate(self, amount: f64) -> Self {
        Self {
            width: self.width + 2.0 * amount,
            height: self.height + 2.0 * amount,
        }
    }

    /// Width divided by height.
    pub fn aspect_ratio(self) -> f64 {
        self.width / self.height
    }

    /// `width * height`.
    pub fn area(self) -> f64 {
        self.width * self.height
    }

    /// Longer of the two axes.
    pub fn max_side(self) -> f64 {
        self.width.max(self.height)
    }

    /// Whether `self` fits inside `other` on both axes.
    pub fn fits_within(self, other: Size) -> bool {
        self.width <= other.width && self.height <= other.height
    }

    /// Offset that centers `self` inside `outer`.
    pub fn centered_in(self, outer: Size) -> (f64, f64) {
        (
            (outer.width - self.width) / 2.0,
            (outer.height - self.height) / 2.0,
        )
    }
}

/// Intrinsic pixel dimensions of a source image.
///
/// Both axes are finite and strictly positive; construction enforces it, so
/// the engine never divides by zero.
///
/// ```
/// use zenmatte::Extent;
///
/// let e = Extent::new(800.0, 400.0).unwrap();
/// assert_eq!(e.aspect_ratio(), 2.0);
/// assert!(Extent::new(0.0, 400.0).is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Extent {
    width: f64,
    height: f64,
}

impl Extent {
    /// Placeholder used when the decoder cannot report dimensions.
    pub const FALLBACK: Self = Self {
        width: 800.0,
        height: 800.0,
    };

    /// Create an extent, rejecting zero, negative and non-finite dimensions.
    pub fn new(width: f64, height: f64) -> Result<Self, LayoutError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(LayoutError::InvalidExtent);
        }
        Ok(Self { width, height })
    }

    /// Create from decoder-reported pixel dimensions.
    pub fn from_pixels(width: u32, height: u32) -> Result<Self, LayoutError> {
        Self::new(width as f64, height as f64)
    }

    /// Extent for a decode result, substituting [`FALLBACK`](Self::FALLBACK)
    /// when the decoder failed or reported a zero dimension.
    pub fn from_decoded(dimensions: Option<(u32, u32)>) -> Self {
        match dimensions.map(|(w, h)| Self::from_pixels(w, h)) {
            Some(Ok(extent)) => extent,
            _ => {
                crate::log_warn!(
                    "image dimensions unavailable ({:?}), using {}x{} placeholder",
                    dimensions,
                    Self::FALLBACK.width,
                    Self::FALLBACK.height
                );
                Self::FALLBACK
            }
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Longer of the two axes.
    pub fn max_side(&self) -> f64 {
        self.width.max(self.height)
    }

    /// As a plain [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl TryFrom<Size> for Extent {
    type Error = LayoutError;

    fn try_from(size: Size) -> Result<Self, Self::Error> {
        Self::new(size.width, size.height)
    }
}
