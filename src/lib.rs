//! Matte and frame composition layout for image preview and export.
//!
//! Pure geometry with no pixel operations and no allocations in the engine; `no_std`
//! compatible.
//!
//! # Modules
//!
//! - [`layout`]: Reference scale, content sizing, viewport and size-budget fitting
//! - [`params`]: Composition parameters, thickness limits, minimum frame width
//! - [`ratio`]: `"w:h"` aspect ratio parsing with 1:1 fallback
//! - [`plan`]: Whole-pixel export plan and degradation reporting
//! - [`gesture`]: Rotation snapping and magnification clamping for the image transform
//! - `svg`: SVG diagrams of compositions (feature `svg`)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}
#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}
pub(crate) use log_warn;

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}
#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}
pub(crate) use log_debug;

pub mod geometry;
pub mod gesture;
pub mod layout;
pub mod params;
pub mod plan;
pub mod ratio;
#[cfg(feature = "svg")]
pub mod svg;

// Re-exports: core types from the layout engine
pub use geometry::{Extent, Size};
pub use gesture::ImageTransform;
pub use layout::{
    ContentSize, FitTarget, LayoutError, LayoutResult, SizeBudget, ViewportBudget, content_size,
    export, fit_to_size_budget, fit_to_viewport, layout, preview, reference_scale,
};
pub use params::{CompositionParams, ThicknessLimits, min_frame_width};
pub use plan::{Degradation, ExportPlan};
#[cfg(feature = "alloc")]
pub use ratio::reverse_ratio_str;
pub use ratio::{AspectRatio, RatioError};
