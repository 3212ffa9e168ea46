//! Value classification: binning continuous columns and slotting
//! categorical values into stable color assignments.

pub mod scheme;

use crate::core::feature::FeatureSet;
use crate::pipeline::columns::{ColumnKind, ResolvedColumns};
use crate::style::color::Color;
use crate::style::palette::{Palette, MISSING_COLOR};
use crate::{Result, ViewError};

use self::scheme::scheme_by_name;

/// Reserved label for the null-value category
pub const MISSING_LABEL: &str = "missing";

/// The outcome of classifying one column over a feature set
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// No target column: one constant style for every feature
    Uniform,
    /// Ordered bins with strictly increasing upper edges; `floor` is the
    /// sample minimum, the lower bound of the first bin
    Continuous {
        floor: f64,
        edges: Vec<f64>,
        colors: Vec<Color>,
        assignment: Vec<Option<usize>>,
    },
    /// Distinct values in first-encountered order, one color slot each
    Categorical {
        categories: Vec<String>,
        colors: Vec<Color>,
        assignment: Vec<Option<usize>>,
    },
}

impl Classification {
    pub fn is_uniform(&self) -> bool {
        matches!(self, Classification::Uniform)
    }

    /// Classification-derived color for the feature at `idx`.
    ///
    /// Features without a bin (null or non-finite values) receive the
    /// reserved neutral color; uniform classification yields no color.
    pub fn color_for(&self, idx: usize) -> Option<Color> {
        match self {
            Classification::Uniform => None,
            Classification::Continuous {
                colors, assignment, ..
            }
            | Classification::Categorical {
                colors, assignment, ..
            } => match assignment.get(idx).copied().flatten() {
                Some(slot) => colors.get(slot).copied(),
                None => Some(MISSING_COLOR),
            },
        }
    }
}

/// Classifies the resolved target column across `set`.
///
/// Uniform mode returns an empty classification; categorical mode assigns
/// each distinct value a color slot; continuous mode delegates break-point
/// computation to the named scheme.
pub fn classify(
    set: &FeatureSet,
    columns: &ResolvedColumns,
    scheme_name: &str,
    bins: usize,
    palette: Option<&Palette>,
) -> Result<Classification> {
    let Some(target) = columns.target.as_deref() else {
        return Ok(Classification::Uniform);
    };

    match columns.kind {
        ColumnKind::Uniform => Ok(Classification::Uniform),
        ColumnKind::Categorical => Ok(classify_categorical(set, target, palette)),
        ColumnKind::Continuous => classify_continuous(set, target, scheme_name, bins, palette),
    }
}

fn classify_categorical(set: &FeatureSet, target: &str, palette: Option<&Palette>) -> Classification {
    let palette = palette.cloned().unwrap_or_else(Palette::categorical);

    let mut categories: Vec<String> = Vec::new();
    let mut slots: crate::prelude::HashMap<String, usize> = Default::default();
    let mut assignment: Vec<Option<usize>> = Vec::with_capacity(set.len());
    let mut has_missing = false;

    for feature in set.features() {
        let value = feature.value(target);
        if value.is_null() {
            has_missing = true;
            assignment.push(None);
            continue;
        }
        let label = value.to_string();
        let slot = *slots.entry(label.clone()).or_insert_with(|| {
            categories.push(label);
            categories.len() - 1
        });
        assignment.push(Some(slot));
    }

    let mut colors = palette.cycle(categories.len());

    if has_missing {
        // A literal "missing" value shares the reserved slot
        let slot = categories
            .iter()
            .position(|c| c == MISSING_LABEL)
            .unwrap_or_else(|| {
                categories.push(MISSING_LABEL.to_string());
                colors.push(MISSING_COLOR);
                categories.len() - 1
            });
        for entry in assignment.iter_mut() {
            if entry.is_none() {
                *entry = Some(slot);
            }
        }
    }

    Classification::Categorical {
        categories,
        colors,
        assignment,
    }
}

fn classify_continuous(
    set: &FeatureSet,
    target: &str,
    scheme_name: &str,
    bins: usize,
    palette: Option<&Palette>,
) -> Result<Classification> {
    let scheme = scheme_by_name(scheme_name)
        .ok_or_else(|| ViewError::UnknownScheme(scheme_name.to_string()))?;
    let palette = palette.cloned().unwrap_or_else(Palette::sequential);

    // Nulls and non-finite numbers are excluded from the sample
    let mut sample: Vec<f64> = set
        .features()
        .iter()
        .filter_map(|f| f.value(target).as_number())
        .filter(|v| v.is_finite())
        .collect();

    if sample.is_empty() {
        return Err(ViewError::InsufficientData(target.to_string()));
    }

    sample.sort_by(f64::total_cmp);
    let distinct = count_distinct(&sample);
    let k = bins.max(1).min(distinct);

    let mut edges = scheme.break_points(&sample, k);
    edges.sort_by(f64::total_cmp);
    edges.dedup();
    if edges.len() < k {
        log::warn!(
            "scheme '{}' produced duplicate edges for column '{}'; collapsing to {} bins",
            scheme_name,
            target,
            edges.len()
        );
    }

    let colors = palette.pick(edges.len());
    let assignment = set
        .features()
        .iter()
        .map(|f| {
            f.value(target)
                .as_number()
                .filter(|v| v.is_finite())
                .map(|v| bin_index(&edges, v))
        })
        .collect();

    Ok(Classification::Continuous {
        floor: sample[0],
        edges,
        colors,
        assignment,
    })
}

/// First bin whose upper edge is at or above `value`; values past the last
/// edge land in the last bin
fn bin_index(edges: &[f64], value: f64) -> usize {
    edges
        .iter()
        .position(|edge| value <= *edge)
        .unwrap_or(edges.len() - 1)
}

fn count_distinct(sorted: &[f64]) -> usize {
    let mut distinct = 1;
    for window in sorted.windows(2) {
        if window[0] < window[1] {
            distinct += 1;
        }
    }
    distinct
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::feature::{Column, ColumnType, Feature, FeatureSet, Geometry, Value};
    use geo_types::Point;

    fn numeric_set(values: &[Option<f64>]) -> FeatureSet {
        let mut set = FeatureSet::new(vec![Column::new("value", ColumnType::Number)]);
        for (i, value) in values.iter().enumerate() {
            let mut feature = Feature::new(Geometry::Point(Point::new(i as f64, 0.0)));
            feature = match value {
                Some(v) => feature.with_property("value", *v),
                None => feature.with_property("value", Value::Null),
            };
            set.push(feature);
        }
        set
    }

    fn text_set(values: &[Option<&str>]) -> FeatureSet {
        let mut set = FeatureSet::new(vec![Column::new("kind", ColumnType::Text)]);
        for (i, value) in values.iter().enumerate() {
            let mut feature = Feature::new(Geometry::Point(Point::new(i as f64, 0.0)));
            feature = match value {
                Some(v) => feature.with_property("kind", *v),
                None => feature.with_property("kind", Value::Null),
            };
            set.push(feature);
        }
        set
    }

    fn continuous(target: &str) -> ResolvedColumns {
        ResolvedColumns {
            kind: ColumnKind::Continuous,
            target: Some(target.to_string()),
            tooltip: vec![],
            popup: vec![],
        }
    }

    fn categorical(target: &str) -> ResolvedColumns {
        ResolvedColumns {
            kind: ColumnKind::Categorical,
            target: Some(target.to_string()),
            tooltip: vec![],
            popup: vec![],
        }
    }

    #[test]
    fn test_uniform_without_target() {
        let set = numeric_set(&[Some(1.0)]);
        let columns = ResolvedColumns {
            kind: ColumnKind::Uniform,
            target: None,
            tooltip: vec![],
            popup: vec![],
        };

        let result = classify(&set, &columns, "quantiles", 5, None).unwrap();
        assert!(result.is_uniform());
        assert_eq!(result.color_for(0), None);
    }

    #[test]
    fn test_continuous_closed_upper_assignment() {
        let set = numeric_set(&[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(100.0)]);
        let result = classify(&set, &continuous("value"), "quantiles", 5, None).unwrap();

        let Classification::Continuous { edges, assignment, .. } = &result else {
            panic!("expected continuous classification");
        };

        assert_eq!(edges.len(), 5);
        assert!(edges.windows(2).all(|w| w[0] < w[1]));

        // The outlier is alone in the top bin
        assert_eq!(assignment[4], Some(4));
        assert_eq!(assignment.iter().flatten().filter(|b| **b == 4).count(), 1);

        // Every value sits at or below its bin's upper edge
        for (feature, bin) in set.features().iter().zip(assignment) {
            let value = feature.value("value").as_number().unwrap();
            let bin = bin.unwrap();
            assert!(value <= edges[bin]);
            if bin > 0 {
                assert!(value > edges[bin - 1]);
            }
        }
    }

    #[test]
    fn test_constant_column_collapses_to_single_bin() {
        let set = numeric_set(&[Some(7.0); 5]);
        let result = classify(&set, &continuous("value"), "quantiles", 5, None).unwrap();

        let Classification::Continuous { edges, colors, assignment, .. } = result else {
            panic!("expected continuous classification");
        };

        assert_eq!(edges, vec![7.0]);
        assert_eq!(colors.len(), 1);
        assert!(assignment.iter().all(|b| *b == Some(0)));
    }

    #[test]
    fn test_bin_count_clamped_to_distinct_values() {
        let set = numeric_set(&[Some(1.0), Some(1.0), Some(2.0), Some(2.0)]);
        let result = classify(&set, &continuous("value"), "quantiles", 5, None).unwrap();

        let Classification::Continuous { edges, .. } = result else {
            panic!("expected continuous classification");
        };
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn test_continuous_nulls_excluded_and_neutral() {
        let set = numeric_set(&[Some(1.0), None, Some(3.0)]);
        let result = classify(&set, &continuous("value"), "quantiles", 2, None).unwrap();

        let Classification::Continuous { assignment, .. } = &result else {
            panic!("expected continuous classification");
        };
        assert_eq!(assignment[1], None);
        assert_eq!(result.color_for(1), Some(MISSING_COLOR));
    }

    #[test]
    fn test_all_null_column_is_insufficient() {
        let set = numeric_set(&[None, None]);
        let result = classify(&set, &continuous("value"), "quantiles", 5, None);

        assert!(matches!(result, Err(ViewError::InsufficientData(column)) if column == "value"));
    }

    #[test]
    fn test_unknown_scheme() {
        let set = numeric_set(&[Some(1.0)]);
        let result = classify(&set, &continuous("value"), "headtail", 5, None);

        assert!(matches!(result, Err(ViewError::UnknownScheme(name)) if name == "headtail"));
    }

    #[test]
    fn test_categorical_first_seen_order() {
        let set = text_set(&[Some("b"), Some("a"), Some("b"), Some("c")]);
        let result = classify(&set, &categorical("kind"), "quantiles", 5, None).unwrap();

        let Classification::Categorical { categories, colors, assignment } = result else {
            panic!("expected categorical classification");
        };

        assert_eq!(categories, vec!["b", "a", "c"]);
        assert_eq!(colors.len(), 3);
        assert_eq!(
            assignment,
            vec![Some(0), Some(1), Some(0), Some(2)]
        );
    }

    #[test]
    fn test_categorical_idempotent() {
        let set = text_set(&[Some("x"), Some("y"), Some("x")]);
        let palette = Palette::categorical();

        let first = classify(&set, &categorical("kind"), "quantiles", 5, Some(&palette)).unwrap();
        let second = classify(&set, &categorical("kind"), "quantiles", 5, Some(&palette)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_categorical_missing_category() {
        let set = text_set(&[Some("a"), None, Some("b")]);
        let result = classify(&set, &categorical("kind"), "quantiles", 5, None).unwrap();

        let Classification::Categorical { categories, colors, assignment } = result else {
            panic!("expected categorical classification");
        };

        assert_eq!(categories, vec!["a", "b", MISSING_LABEL]);
        assert_eq!(*colors.last().unwrap(), MISSING_COLOR);
        assert_eq!(assignment[1], Some(2));
    }

    #[test]
    fn test_categorical_palette_cycles() {
        let palette = Palette::from_hex("duo", &["#ff0000", "#00ff00"]).unwrap();
        let set = text_set(&[Some("a"), Some("b"), Some("c")]);
        let result = classify(&set, &categorical("kind"), "quantiles", 5, Some(&palette)).unwrap();

        let Classification::Categorical { colors, .. } = result else {
            panic!("expected categorical classification");
        };
        assert_eq!(colors[0], colors[2]);
    }
}
