//! Colors, palettes, and per-kind style resolution.

pub mod color;
pub mod palette;
pub mod resolve;

pub use color::Color;
pub use palette::Palette;
pub use resolve::{FeatureStyle, LineStyle, PointStyle, PolygonStyle, StyleOverrides};
