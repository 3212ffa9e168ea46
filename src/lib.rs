//! # Geoview
//!
//! One-call interactive map views of geographic feature tables.
//!
//! Given a [`FeatureSet`] of points, lines, or polygons with attribute
//! columns, [`render`] derives the visual presentation automatically:
//! reprojection to the display projection, color classification of a chosen
//! column, tooltips, popups, a legend, and view framing. The result is a
//! [`MapDocument`] describing an interactive map for a rendering frontend;
//! this crate never touches pixels, tiles, or markup.

pub mod classify;
pub mod core;
pub mod map;
pub mod pipeline;
pub mod prelude;
pub mod style;
pub mod view;

// Re-export public API
pub use crate::core::{
    crs::Crs,
    feature::{Column, ColumnType, Feature, FeatureSet, Geometry, GeometryKind, Value},
    geo::{LatLng, LatLngBounds},
};

pub use crate::classify::{scheme::ClassificationScheme, Classification};

pub use crate::map::artifact::{FeatureRecord, MapDocument, MapOptions, VectorLayer};

pub use crate::pipeline::{
    columns::ColumnKind,
    package::{Legend, LegendEntry, StyledFeature},
};

pub use crate::style::{
    color::Color,
    palette::Palette,
    resolve::{FeatureStyle, LineStyle, PointStyle, PolygonStyle, StyleOverrides},
};

pub use crate::view::{render, render_onto, ViewSpec};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, ViewError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("feature set has no coordinate reference system and no fallback was configured")]
    MissingCrs,

    #[error("feature set is empty; view framing is undefined")]
    EmptyDataset,

    #[error("column '{0}' does not exist in the feature set schema")]
    UnknownColumn(String),

    #[error("unknown classification scheme '{0}'")]
    UnknownScheme(String),

    #[error("column '{0}' has no non-null values to classify")]
    InsufficientData(String),

    #[error("style key '{key}' is not valid for {kind} features")]
    StyleConflict {
        key: &'static str,
        kind: GeometryKind,
    },

    #[error("unknown EPSG code: {0}")]
    UnknownCrs(u32),

    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = ViewError;
