//! The interactive map description handed to a rendering frontend.
//!
//! A [`MapDocument`] plays the role a live map object plays in a browser:
//! it carries framing, a base tile layer, styled vector layers, and the
//! optional legend and layer-control widgets. It is plain data; a frontend
//! materializes it into tiles and DOM.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::core::feature::Geometry;
use crate::core::geo::{LatLng, LatLngBounds};
use crate::pipeline::package::{Legend, StyledFeature};
use crate::style::resolve::FeatureStyle;
use crate::Result;

/// Nominal viewport used to choose a fitting zoom level
const VIEWPORT_WIDTH: f64 = 800.0;
const VIEWPORT_HEIGHT: f64 = 600.0;
const TILE_SIZE: f64 = 256.0;
const MAX_FIT_ZOOM: f64 = 18.0;

/// GeoJSON-shaped geometry used in the artifact wire format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
}

impl GeoJsonGeometry {
    fn coords(&self) -> Vec<[f64; 2]> {
        match self {
            GeoJsonGeometry::Point { coordinates } => vec![*coordinates],
            GeoJsonGeometry::LineString { coordinates } => coordinates.clone(),
            GeoJsonGeometry::Polygon { coordinates } => {
                coordinates.iter().flatten().copied().collect()
            }
        }
    }
}

impl From<&Geometry> for GeoJsonGeometry {
    fn from(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Point(p) => GeoJsonGeometry::Point {
                coordinates: [p.x(), p.y()],
            },
            Geometry::Line(l) => GeoJsonGeometry::LineString {
                coordinates: l.0.iter().map(|c| [c.x, c.y]).collect(),
            },
            Geometry::Polygon(p) => {
                let mut rings = vec![p.exterior().0.iter().map(|c| [c.x, c.y]).collect()];
                for ring in p.interiors() {
                    rings.push(ring.0.iter().map(|c| [c.x, c.y]).collect());
                }
                GeoJsonGeometry::Polygon { coordinates: rings }
            }
        }
    }
}

/// One feature as appended to a vector layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub geometry: GeoJsonGeometry,
    pub style: FeatureStyle,
    pub tooltip: Vec<(String, String)>,
    pub popup: Vec<(String, String)>,
}

impl From<StyledFeature> for FeatureRecord {
    fn from(feature: StyledFeature) -> Self {
        Self {
            geometry: (&feature.geometry).into(),
            style: feature.style,
            tooltip: feature.tooltip,
            popup: feature.popup,
        }
    }
}

/// A styled vector layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorLayer {
    pub name: String,
    pub features: Vec<FeatureRecord>,
}

/// Map-wide options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: f64,
    pub control_scale: bool,
}

/// The interactive map description produced by composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    pub options: MapOptions,
    pub base_layer: String,
    layers: Vec<VectorLayer>,
    legend: Option<Legend>,
    layer_control: bool,
}

impl MapDocument {
    /// Creates a map framed so `bounds` is fully visible
    pub fn new(bounds: &LatLngBounds) -> Self {
        let mut document = Self {
            options: MapOptions {
                center: LatLng::default(),
                zoom: 0.0,
                control_scale: true,
            },
            base_layer: "OpenStreetMap".to_string(),
            layers: Vec::new(),
            legend: None,
            layer_control: false,
        };
        document.fit_bounds(bounds);
        document
    }

    /// Reframes the view so `bounds` is fully visible
    pub fn fit_bounds(&mut self, bounds: &LatLngBounds) {
        self.options.center = bounds.center();
        self.options.zoom = fit_zoom(bounds);
    }

    /// Appends one vector layer; the layer control appears once more than
    /// one layer exists
    pub fn add_layer(&mut self, layer: VectorLayer) {
        self.layers.push(layer);
        self.layer_control = self.layers.len() > 1;
    }

    pub fn set_legend(&mut self, legend: Legend) {
        self.legend = Some(legend);
    }

    pub fn layers(&self) -> &[VectorLayer] {
        &self.layers
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    pub fn has_layer_control(&self) -> bool {
        self.layer_control
    }

    /// Minimal bounds enclosing every appended feature
    pub fn content_bounds(&self) -> Option<LatLngBounds> {
        let mut bounds: Option<LatLngBounds> = None;
        for layer in &self.layers {
            for feature in &layer.features {
                for [lng, lat] in feature.geometry.coords() {
                    let point = LatLng::new(lat, lng);
                    match bounds.as_mut() {
                        Some(b) => b.extend(&point),
                        None => bounds = Some(LatLngBounds::new(point, point)),
                    }
                }
            }
        }
        bounds
    }

    /// Serializes the document for a rendering frontend
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Highest integer zoom at which `bounds` fits the nominal viewport
fn fit_zoom(bounds: &LatLngBounds) -> f64 {
    let lng_fraction = (bounds.span().lng / 360.0).max(1e-12);
    let lat_fraction =
        (world_fraction(bounds.south_west.lat) - world_fraction(bounds.north_east.lat)).max(1e-12);

    let zoom_x = (VIEWPORT_WIDTH / TILE_SIZE / lng_fraction).log2();
    let zoom_y = (VIEWPORT_HEIGHT / TILE_SIZE / lat_fraction).log2();
    zoom_x.min(zoom_y).floor().clamp(0.0, MAX_FIT_ZOOM)
}

/// Vertical position of a latitude in the Web Mercator world square, 0 at
/// the north edge and 1 at the south edge
fn world_fraction(lat: f64) -> f64 {
    let rad = LatLng::clamp_lat(lat).to_radians();
    0.5 - (PI / 4.0 + rad / 2.0).tan().ln() / (2.0 * PI)
}
