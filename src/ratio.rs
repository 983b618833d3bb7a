//! Frame aspect ratios written as `"w:h"`.
//!
//! Parsing is strict ([`AspectRatio::parse`]) with a recovering wrapper
//! ([`AspectRatio::parse_or_square`]) for UI callers that must always render
//! something.
//!
//! ```
//! use zenmatte::AspectRatio;
//!
//! assert_eq!(AspectRatio::parse_or_square("3:4").value(), 0.75);
//! assert_eq!(AspectRatio::parse_or_square("2:0"), AspectRatio::SQUARE);
//! assert_eq!(AspectRatio::new(16.0, 9.0).unwrap().reversed().to_string(), "9:16");
//! ```

use core::fmt;
use core::str::FromStr;

use num_traits::Float;

#[cfg(feature = "alloc")]
use alloc::string::{String, ToString};

/// Width:height ratio with both terms finite and positive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AspectRatio {
    width: f64,
    height: f64,
}

impl AspectRatio {
    /// 1:1, also the fallback for anything unparsable.
    pub const SQUARE: Self = Self::exact(1.0, 1.0);

    /// Ratios offered by the frame picker, in display order.
    pub const PRESETS: [Self; 7] = [
        Self::exact(1.0, 1.0),
        Self::exact(3.0, 4.0),
        Self::exact(4.0, 3.0),
        Self::exact(2.0, 3.0),
        Self::exact(3.0, 2.0),
        Self::exact(9.0, 16.0),
        Self::exact(16.0, 9.0),
    ];

    const fn exact(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Create a ratio from its two terms.
    pub fn new(width: f64, height: f64) -> Result<Self, RatioError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(RatioError::NonPositive);
        }
        Ok(Self { width, height })
    }

    /// Parse `"w:h"`. Both terms must be bare numbers; padding such as
    /// `" 3 : 4"` is malformed.
    pub fn parse(s: &str) -> Result<Self, RatioError> {
        let mut parts = s.split(':');
        let (Some(w), Some(h), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(RatioError::Malformed);
        };
        let w: f64 = w.parse().map_err(|_| RatioError::Malformed)?;
        let h: f64 = h.parse().map_err(|_| RatioError::Malformed)?;
        Self::new(w, h)
    }

    /// Parse `"w:h"`, substituting [`SQUARE`](Self::SQUARE) on failure.
    pub fn parse_or_square(s: &str) -> Self {
        match Self::parse(s) {
            Ok(ratio) => ratio,
            Err(e) => {
                crate::log_warn!("aspect ratio {:?} rejected ({}), using 1:1", s, e);
                Self::SQUARE
            }
        }
    }

    /// Numerator (width term).
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Denominator (height term).
    pub fn height(&self) -> f64 {
        self.height
    }

    /// `width / height`.
    pub fn value(&self) -> f64 {
        self.width / self.height
    }

    /// Swap numerator and denominator (`3:4` → `4:3`).
    pub fn reversed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Taller than wide.
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    /// Terms are equal.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::SQUARE
    }
}

impl FromStr for AspectRatio {
    type Err = RatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_term(f, self.width)?;
        f.write_str(":")?;
        write_term(f, self.height)
    }
}

/// Whole numbers print without a fractional part so `3:4` stays `3:4`.
fn write_term(f: &mut fmt::Formatter<'_>, term: f64) -> fmt::Result {
    if Float::fract(term) == 0.0 && term < u64::MAX as f64 {
        write!(f, "{}", term as u64)
    } else {
        write!(f, "{term}")
    }
}

/// Reverse a `"w:h"` string, falling back to `"1:1"` when it does not parse.
#[cfg(feature = "alloc")]
pub fn reverse_ratio_str(s: &str) -> String {
    match AspectRatio::parse(s) {
        Ok(ratio) => ratio.reversed().to_string(),
        Err(e) => {
            crate::log_warn!("cannot reverse aspect ratio {:?} ({}), using 1:1", s, e);
            AspectRatio::SQUARE.to_string()
        }
    }
}

/// Why an aspect ratio string was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RatioError {
    /// Not exactly two numeric components separated by `:`.
    Malformed,
    /// A term is zero, negative, or not finite.
    NonPositive,
}

impl fmt::Display for RatioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => f.write_str("expected two numbers separated by ':'"),
            Self::NonPositive => f.write_str("ratio terms must be positive and finite"),
        }
    }
}

impl core::error::Error for RatioError {}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse ───────────────────────────────────────────────────────────

    #[test]
    fn parse_simple() {
        let r = AspectRatio::parse("3:4").unwrap();
        assert_eq!(r.value(), 0.75);
        assert!(r.is_portrait());
    }

    #[test]
    fn parse_decimal_terms() {
        let r = AspectRatio::parse("1.85:1").unwrap();
        assert!((r.value() - 1.85).abs() < 1e-12);
    }

    #[test]
    fn parse_zero_denominator() {
        assert_eq!(AspectRatio::parse("2:0"), Err(RatioError::NonPositive));
        assert_eq!(AspectRatio::parse_or_square("2:0"), AspectRatio::SQUARE);
    }

    #[test]
    fn parse_negative_terms() {
        assert_eq!(AspectRatio::parse("4:-3"), Err(RatioError::NonPositive));
        assert_eq!(AspectRatio::parse("-4:3"), Err(RatioError::NonPositive));
    }

    #[test]
    fn parse_wrong_component_count() {
        assert_eq!(AspectRatio::parse(""), Err(RatioError::Malformed));
        assert_eq!(AspectRatio::parse("16"), Err(RatioError::Malformed));
        assert_eq!(AspectRatio::parse("1:2:3"), Err(RatioError::Malformed));
        assert_eq!(AspectRatio::parse("a:b"), Err(RatioError::Malformed));
    }

    #[test]
    fn parse_rejects_padded_terms() {
        assert_eq!(AspectRatio::parse(" 3 : 4"), Err(RatioError::Malformed));
        assert_eq!(AspectRatio::parse("3 :4"), Err(RatioError::Malformed));
        assert_eq!(AspectRatio::parse("3:4\n"), Err(RatioError::Malformed));
        assert_eq!(AspectRatio::parse_or_square(" 3 : 4"), AspectRatio::SQUARE);
    }

    #[test]
    fn parse_rejects_non_finite() {
        assert_eq!(AspectRatio::parse("inf:1"), Err(RatioError::NonPositive));
        assert_eq!(AspectRatio::parse("NaN:1"), Err(RatioError::NonPositive));
    }

    #[test]
    fn from_str_matches_parse() {
        let r: AspectRatio = "16:9".parse().unwrap();
        assert_eq!(r, AspectRatio::new(16.0, 9.0).unwrap());
    }

    // ── reverse / display ───────────────────────────────────────────────

    #[test]
    fn reversed_swaps_terms() {
        let r = AspectRatio::parse("9:16").unwrap().reversed();
        assert_eq!(r.width(), 16.0);
        assert_eq!(r.height(), 9.0);
    }

    #[test]
    fn reverse_string() {
        assert_eq!(reverse_ratio_str("3:2"), "2:3");
        assert_eq!(reverse_ratio_str("1:1"), "1:1");
        assert_eq!(reverse_ratio_str("oops"), "1:1");
        assert_eq!(reverse_ratio_str("5:0"), "1:1");
    }

    #[test]
    fn display_keeps_fractions() {
        assert_eq!(AspectRatio::new(2.35, 1.0).unwrap().to_string(), "2.35:1");
    }

    #[test]
    fn presets_round_trip_through_display() {
        for preset in AspectRatio::PRESETS {
            let text = preset.to_string();
            assert_eq!(AspectRatio::parse(&text).unwrap(), preset, "{text}");
        }
        assert!(AspectRatio::PRESETS[0].is_square());
    }
}
