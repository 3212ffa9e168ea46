//! Prelude module for common geoview types
//!
//! This module re-exports the most commonly used types and functions
//! for easy importing with `use geoview::prelude::*;`

pub use crate::core::{
    crs::Crs,
    feature::{Column, ColumnType, Feature, FeatureSet, Geometry, GeometryKind, Value},
    geo::{LatLng, LatLngBounds},
};

pub use crate::classify::{
    scheme::{scheme_by_name, ClassificationScheme},
    Classification,
};

pub use crate::map::artifact::{MapDocument, MapOptions, VectorLayer};

pub use crate::pipeline::{
    columns::{ColumnKind, ResolvedColumns},
    package::{Legend, LegendEntry, StyledFeature},
};

pub use crate::style::{
    color::Color,
    palette::Palette,
    resolve::{FeatureStyle, LineStyle, PointStyle, PolygonStyle, StyleOverrides},
};

pub use crate::view::{render, render_onto, ViewSpec};

pub use crate::{Result, ViewError};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
