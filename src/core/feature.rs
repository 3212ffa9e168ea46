//! Feature tables: geometry plus typed attribute columns.

use geo::MapCoords;
use geo_types::{Coord, LineString, Point, Polygon};
use std::fmt;

use crate::core::crs::Crs;
use crate::prelude::HashMap;

static NULL: Value = Value::Null;

/// A single attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
    Null,
}

impl Value {
    /// Numeric view of the value, if it is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    /// Stringified form used in tooltip and popup rows; nulls render as an
    /// explicit `None` marker
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{}", format_number(*v)),
            Value::Text(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Null => write!(f, "None"),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

/// Formats a number without a trailing fraction when it is integral
pub(crate) fn format_number(v: f64) -> String {
    if v.is_finite() && v == v.trunc() && v.abs() < 1e12 {
        format!("{}", v as i64)
    } else {
        format!("{:.2}", v)
    }
}

/// Declared type of an attribute column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Number,
    Text,
    Bool,
}

/// One column of the attribute schema
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Geometry kinds, each with its own style vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    Line,
    Polygon,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryKind::Point => write!(f, "point"),
            GeometryKind::Line => write!(f, "line"),
            GeometryKind::Polygon => write!(f, "polygon"),
        }
    }
}

/// One feature geometry
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point<f64>),
    Line(LineString<f64>),
    Polygon(Polygon<f64>),
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::Line(_) => GeometryKind::Line,
            Geometry::Polygon(_) => GeometryKind::Polygon,
        }
    }

    /// All coordinates of this geometry, interior rings included
    pub fn coords(&self) -> Vec<Coord<f64>> {
        match self {
            Geometry::Point(p) => vec![p.0],
            Geometry::Line(l) => l.0.clone(),
            Geometry::Polygon(p) => {
                let mut coords = p.exterior().0.clone();
                for ring in p.interiors() {
                    coords.extend_from_slice(&ring.0);
                }
                coords
            }
        }
    }

    /// Applies a coordinate transform, leaving structure intact
    pub fn map_coords(&self, transform: impl Fn(Coord<f64>) -> Coord<f64> + Copy) -> Self {
        match self {
            Geometry::Point(p) => Geometry::Point(p.map_coords(transform)),
            Geometry::Line(l) => Geometry::Line(l.map_coords(transform)),
            Geometry::Polygon(p) => Geometry::Polygon(p.map_coords(transform)),
        }
    }
}

/// A feature: one geometry plus attribute values keyed by column name
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: HashMap<String, Value>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            properties: HashMap::default(),
        }
    }

    /// Add a property to this feature
    pub fn with_property<V: Into<Value>>(mut self, key: impl Into<String>, value: V) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Get a property value; absent keys read as null
    pub fn value(&self, column: &str) -> &Value {
        self.properties.get(column).unwrap_or(&NULL)
    }
}

/// An ordered collection of features sharing one schema and one CRS
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    crs: Option<Crs>,
    columns: Vec<Column>,
    features: Vec<Feature>,
}

impl FeatureSet {
    /// Creates an empty feature set with the given attribute schema
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            crs: None,
            columns,
            features: Vec::new(),
        }
    }

    /// Sets the coordinate reference system of all geometries
    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.crs = Some(crs);
        self
    }

    pub(crate) fn from_parts(crs: Option<Crs>, columns: Vec<Column>, features: Vec<Feature>) -> Self {
        Self {
            crs,
            columns,
            features,
        }
    }

    /// Appends a feature
    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn crs(&self) -> Option<Crs> {
        self.crs
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a schema column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
