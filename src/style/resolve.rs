//! Per-kind style vocabularies and override resolution.
//!
//! Each geometry kind speaks its own style vocabulary: points have a radius,
//! lines have no fill, polygons have both fill and stroke. Resolution order
//! per field, highest wins: explicit override, then the classification color,
//! then the kind default.

use serde::{Deserialize, Serialize};

use crate::core::feature::GeometryKind;
use crate::style::color::Color;
use crate::{Result, ViewError};

/// The default feature color, the Leaflet blue
const DEFAULT_COLOR: Color = Color::rgb(0x33, 0x88, 0xff);

/// Style for point features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointStyle {
    pub radius: f64,
    pub fill_color: Color,
    pub fill_opacity: f64,
    pub stroke_color: Color,
    pub stroke_weight: f64,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            radius: 5.0,
            fill_color: DEFAULT_COLOR,
            fill_opacity: 0.9,
            stroke_color: Color::rgb(255, 255, 255),
            stroke_weight: 2.0,
        }
    }
}

/// Style for line features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub stroke_color: Color,
    pub stroke_weight: f64,
    pub stroke_opacity: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            stroke_color: DEFAULT_COLOR,
            stroke_weight: 3.0,
            stroke_opacity: 1.0,
        }
    }
}

/// Style for polygon features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonStyle {
    pub fill_color: Color,
    pub fill_opacity: f64,
    pub stroke_color: Color,
    pub stroke_weight: f64,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            fill_color: DEFAULT_COLOR,
            fill_opacity: 0.4,
            stroke_color: DEFAULT_COLOR,
            stroke_weight: 2.0,
        }
    }
}

/// Combined style for all vector feature kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureStyle {
    Point(PointStyle),
    Line(LineStyle),
    Polygon(PolygonStyle),
}

impl FeatureStyle {
    pub fn kind(&self) -> GeometryKind {
        match self {
            FeatureStyle::Point(_) => GeometryKind::Point,
            FeatureStyle::Line(_) => GeometryKind::Line,
            FeatureStyle::Polygon(_) => GeometryKind::Polygon,
        }
    }
}

/// Fixed style values that win over classification-derived colors.
///
/// Overrides apply uniformly to every feature in a call; per-feature
/// variation comes only from classification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverrides {
    pub radius: Option<f64>,
    pub fill_color: Option<Color>,
    pub fill_opacity: Option<f64>,
    pub stroke_color: Option<Color>,
    pub stroke_weight: Option<f64>,
    pub stroke_opacity: Option<f64>,
}

impl StyleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    pub fn with_fill_opacity(mut self, opacity: f64) -> Self {
        self.fill_opacity = Some(opacity);
        self
    }

    pub fn with_stroke_color(mut self, color: Color) -> Self {
        self.stroke_color = Some(color);
        self
    }

    pub fn with_stroke_weight(mut self, weight: f64) -> Self {
        self.stroke_weight = Some(weight);
        self
    }

    pub fn with_stroke_opacity(mut self, opacity: f64) -> Self {
        self.stroke_opacity = Some(opacity);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries().iter().all(|(_, supplied)| !supplied)
    }

    fn entries(&self) -> [(&'static str, bool); 6] {
        [
            ("radius", self.radius.is_some()),
            ("fill_color", self.fill_color.is_some()),
            ("fill_opacity", self.fill_opacity.is_some()),
            ("stroke_color", self.stroke_color.is_some()),
            ("stroke_weight", self.stroke_weight.is_some()),
            ("stroke_opacity", self.stroke_opacity.is_some()),
        ]
    }

    /// Checks every supplied key against the vocabulary of `kind`
    pub fn validate(&self, kind: GeometryKind) -> Result<()> {
        let allowed: &[&str] = match kind {
            GeometryKind::Point => &[
                "radius",
                "fill_color",
                "fill_opacity",
                "stroke_color",
                "stroke_weight",
            ],
            GeometryKind::Line => &["stroke_color", "stroke_weight", "stroke_opacity"],
            GeometryKind::Polygon => &[
                "fill_color",
                "fill_opacity",
                "stroke_color",
                "stroke_weight",
            ],
        };

        for (key, supplied) in self.entries() {
            if supplied && !allowed.contains(&key) {
                return Err(ViewError::StyleConflict { key, kind });
            }
        }
        Ok(())
    }
}

/// Resolves the final style for one feature of the given kind.
///
/// The classification color drives the fill for points and polygons and the
/// stroke for lines. Callers must have validated `overrides` against `kind`.
pub fn resolve_style(
    kind: GeometryKind,
    class_color: Option<Color>,
    overrides: &StyleOverrides,
) -> FeatureStyle {
    match kind {
        GeometryKind::Point => {
            let mut style = PointStyle::default();
            if let Some(color) = class_color {
                style.fill_color = color;
            }
            if let Some(radius) = overrides.radius {
                style.radius = radius;
            }
            if let Some(color) = overrides.fill_color {
                style.fill_color = color;
            }
            if let Some(opacity) = overrides.fill_opacity {
                style.fill_opacity = opacity;
            }
            if let Some(color) = overrides.stroke_color {
                style.stroke_color = color;
            }
            if let Some(weight) = overrides.stroke_weight {
                style.stroke_weight = weight;
            }
            FeatureStyle::Point(style)
        }
        GeometryKind::Line => {
            let mut style = LineStyle::default();
            if let Some(color) = class_color {
                style.stroke_color = color;
            }
            if let Some(color) = overrides.stroke_color {
                style.stroke_color = color;
            }
            if let Some(weight) = overrides.stroke_weight {
                style.stroke_weight = weight;
            }
            if let Some(opacity) = overrides.stroke_opacity {
                style.stroke_opacity = opacity;
            }
            FeatureStyle::Line(style)
        }
        GeometryKind::Polygon => {
            let mut style = PolygonStyle::default();
            if let Some(color) = class_color {
                style.fill_color = color;
            }
            if let Some(color) = overrides.fill_color {
                style.fill_color = color;
            }
            if let Some(opacity) = overrides.fill_opacity {
                style.fill_opacity = opacity;
            }
            if let Some(color) = overrides.stroke_color {
                style.stroke_color = color;
            }
            if let Some(weight) = overrides.stroke_weight {
                style.stroke_weight = weight;
            }
            FeatureStyle::Polygon(style)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_rejected_for_polygons() {
        let overrides = StyleOverrides::new().with_radius(10.0);

        assert!(overrides.validate(GeometryKind::Point).is_ok());
        assert!(matches!(
            overrides.validate(GeometryKind::Polygon),
            Err(ViewError::StyleConflict {
                key: "radius",
                kind: GeometryKind::Polygon
            })
        ));
        assert!(overrides.validate(GeometryKind::Line).is_err());
    }

    #[test]
    fn test_fill_rejected_for_lines() {
        let overrides = StyleOverrides::new().with_fill_color(Color::rgb(255, 0, 0));

        assert!(overrides.validate(GeometryKind::Polygon).is_ok());
        assert!(matches!(
            overrides.validate(GeometryKind::Line),
            Err(ViewError::StyleConflict { key: "fill_color", .. })
        ));
    }

    #[test]
    fn test_override_beats_classification_color() {
        let class_color = Some(Color::rgb(0, 255, 0));
        let overrides = StyleOverrides::new().with_fill_color(Color::rgb(255, 0, 0));

        let style = resolve_style(GeometryKind::Polygon, class_color, &overrides);
        match style {
            FeatureStyle::Polygon(p) => assert_eq!(p.fill_color, Color::rgb(255, 0, 0)),
            other => panic!("unexpected style: {:?}", other),
        }
    }

    #[test]
    fn test_classification_color_beats_default() {
        let class_color = Some(Color::rgb(0, 255, 0));
        let style = resolve_style(GeometryKind::Line, class_color, &StyleOverrides::new());

        match style {
            FeatureStyle::Line(l) => {
                assert_eq!(l.stroke_color, Color::rgb(0, 255, 0));
                assert_eq!(l.stroke_weight, 3.0);
            }
            other => panic!("unexpected style: {:?}", other),
        }
    }

    #[test]
    fn test_default_style_without_classification() {
        let style = resolve_style(GeometryKind::Point, None, &StyleOverrides::new());
        assert_eq!(style, FeatureStyle::Point(PointStyle::default()));
    }
}
