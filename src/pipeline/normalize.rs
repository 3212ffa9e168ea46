//! Resolves the CRS, reprojects to the display projection, and frames the
//! view.

use std::borrow::Cow;

use crate::core::crs::Crs;
use crate::core::feature::{Feature, FeatureSet};
use crate::core::geo::{LatLng, LatLngBounds};
use crate::{Result, ViewError};

/// A feature set normalized to the display projection plus its framing box
#[derive(Debug, Clone)]
pub struct Normalized<'a> {
    pub features: Cow<'a, FeatureSet>,
    pub bounds: LatLngBounds,
}

/// Reprojects `set` to geographic WGS84 and computes the framing bounds.
///
/// A set that is already geographic is passed through borrowed, so
/// display-projection input round-trips bit for bit. `fallback_crs` stands
/// in when the set does not declare a CRS.
pub fn normalize(set: &FeatureSet, fallback_crs: Option<Crs>) -> Result<Normalized<'_>> {
    let crs = set.crs().or(fallback_crs).ok_or(ViewError::MissingCrs)?;

    let features = if crs.is_geographic() {
        Cow::Borrowed(set)
    } else {
        log::debug!(
            "reprojecting {} features from {} to the display projection",
            set.len(),
            crs
        );
        let reprojected = set
            .features()
            .iter()
            .map(|feature| Feature {
                geometry: feature.geometry.map_coords(|c| crs.to_wgs84(c)),
                properties: feature.properties.clone(),
            })
            .collect();
        Cow::Owned(FeatureSet::from_parts(
            Some(Crs::Wgs84),
            set.columns().to_vec(),
            reprojected,
        ))
    };

    let bounds = bounds_of(features.as_ref())?;
    Ok(Normalized { features, bounds })
}

/// Minimal enclosing box over all geometries
fn bounds_of(set: &FeatureSet) -> Result<LatLngBounds> {
    let mut bounds: Option<LatLngBounds> = None;
    for feature in set.features() {
        for coord in feature.geometry.coords() {
            let point = LatLng::new(coord.y, coord.x);
            match bounds.as_mut() {
                Some(b) => b.extend(&point),
                None => bounds = Some(LatLngBounds::new(point, point)),
            }
        }
    }
    bounds.ok_or(ViewError::EmptyDataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::feature::{Column, ColumnType, Geometry};
    use geo_types::{Coord, Point};

    fn point_set(crs: Option<Crs>, coords: &[(f64, f64)]) -> FeatureSet {
        let mut set = FeatureSet::new(vec![Column::new("id", ColumnType::Number)]);
        if let Some(crs) = crs {
            set = set.with_crs(crs);
        }
        for (x, y) in coords {
            set.push(Feature::new(Geometry::Point(Point::new(*x, *y))));
        }
        set
    }

    #[test]
    fn test_missing_crs() {
        let set = point_set(None, &[(0.0, 0.0)]);
        assert!(matches!(normalize(&set, None), Err(ViewError::MissingCrs)));
    }

    #[test]
    fn test_fallback_crs_applies() {
        let set = point_set(None, &[(10.0, 20.0)]);
        let normalized = normalize(&set, Some(Crs::Wgs84)).unwrap();
        assert_eq!(normalized.bounds.center(), LatLng::new(20.0, 10.0));
    }

    #[test]
    fn test_empty_dataset() {
        let set = point_set(Some(Crs::Wgs84), &[]);
        assert!(matches!(normalize(&set, None), Err(ViewError::EmptyDataset)));
    }

    #[test]
    fn test_geographic_input_is_borrowed() {
        let set = point_set(Some(Crs::Wgs84), &[(-74.0060, 40.7128)]);
        let normalized = normalize(&set, None).unwrap();

        assert!(matches!(normalized.features, Cow::Borrowed(_)));
        assert_eq!(normalized.features.as_ref(), &set);
    }

    #[test]
    fn test_mercator_input_is_reprojected() {
        let projected = Crs::WebMercator.from_wgs84(Coord { x: -74.0060, y: 40.7128 });
        let set = point_set(Some(Crs::WebMercator), &[(projected.x, projected.y)]);

        let normalized = normalize(&set, None).unwrap();
        assert!(matches!(normalized.features, Cow::Owned(_)));
        assert_eq!(normalized.features.crs(), Some(Crs::Wgs84));

        let coord = normalized.features.features()[0].geometry.coords()[0];
        assert!((coord.x - -74.0060).abs() < 1e-9);
        assert!((coord.y - 40.7128).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_cover_all_features() {
        let set = point_set(
            Some(Crs::Wgs84),
            &[(-74.0, 40.0), (-73.0, 41.0), (-73.5, 40.5)],
        );
        let normalized = normalize(&set, None).unwrap();

        assert_eq!(normalized.bounds.south_west, LatLng::new(40.0, -74.0));
        assert_eq!(normalized.bounds.north_east, LatLng::new(41.0, -73.0));
    }
}
