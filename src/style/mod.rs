//! Presentation data derived from a finished layout: fills, hover text and
//! the per-extension legend. Nothing here changes a [`LayoutRect`]; results
//! refer to boxes by path or are computed on demand.
//!
//! [`LayoutRect`]: crate::layout::LayoutRect

pub mod colors;
pub mod legend;
pub mod tooltip;

pub use colors::{depth_tier, leaf_fill, shade, Hsl};
pub use legend::{ExtensionStat, ExtensionStats};
pub use tooltip::{format_size, label_font_size, title};
