//! Packages features into renderer-ready records and derives the legend.

use serde::{Deserialize, Serialize};

use crate::classify::Classification;
use crate::core::feature::{format_number, Feature, FeatureSet, Geometry};
use crate::pipeline::columns::ResolvedColumns;
use crate::style::color::Color;
use crate::style::resolve::{resolve_style, FeatureStyle, StyleOverrides};
use crate::Result;

/// One renderer-ready feature: geometry, resolved style, and interactive
/// field rows. Produced once per feature and consumed once by the composer.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledFeature {
    pub geometry: Geometry,
    pub style: FeatureStyle,
    pub tooltip: Vec<(String, String)>,
    pub popup: Vec<(String, String)>,
}

/// One legend row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}

/// The legend widget description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub title: String,
    pub entries: Vec<LegendEntry>,
}

/// Merges geometry, resolved style, and field values into one record per
/// feature, and derives the legend from the classification.
pub fn package(
    set: &FeatureSet,
    columns: &ResolvedColumns,
    classification: &Classification,
    overrides: &StyleOverrides,
) -> Result<(Vec<StyledFeature>, Option<Legend>)> {
    let mut styled = Vec::with_capacity(set.len());

    for (idx, feature) in set.features().iter().enumerate() {
        let kind = feature.geometry.kind();
        overrides.validate(kind)?;

        styled.push(StyledFeature {
            geometry: feature.geometry.clone(),
            style: resolve_style(kind, classification.color_for(idx), overrides),
            tooltip: field_rows(feature, &columns.tooltip),
            popup: field_rows(feature, &columns.popup),
        });
    }

    Ok((styled, legend_for(columns, classification)))
}

/// Stringifies the selected fields in order; nulls become an explicit
/// `None` marker so no row silently disappears
fn field_rows(feature: &Feature, fields: &[String]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|name| (name.clone(), feature.value(name).to_string()))
        .collect()
}

/// One legend entry per bin or category actually present, in ascending or
/// first-seen order
fn legend_for(columns: &ResolvedColumns, classification: &Classification) -> Option<Legend> {
    let title = columns.target.clone()?;

    match classification {
        Classification::Uniform => None,
        Classification::Continuous {
            floor,
            edges,
            colors,
            assignment,
        } => {
            let mut entries = Vec::new();
            let mut lower = *floor;
            for (bin, (edge, color)) in edges.iter().zip(colors).enumerate() {
                if assignment.iter().flatten().any(|b| *b == bin) {
                    entries.push(LegendEntry {
                        label: format!("{} - {}", format_number(lower), format_number(*edge)),
                        color: *color,
                    });
                }
                lower = *edge;
            }
            Some(Legend { title, entries })
        }
        Classification::Categorical {
            categories,
            colors,
            assignment,
        } => {
            let entries = categories
                .iter()
                .zip(colors)
                .enumerate()
                .filter(|(slot, _)| assignment.iter().flatten().any(|s| s == slot))
                .map(|(_, (category, color))| LegendEntry {
                    label: category.clone(),
                    color: *color,
                })
                .collect();
            Some(Legend { title, entries })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::feature::{Column, ColumnType, Value};
    use crate::pipeline::columns::ColumnKind;
    use crate::style::palette::MISSING_COLOR;
    use geo_types::Point;

    fn one_point_set() -> FeatureSet {
        let mut set = FeatureSet::new(vec![
            Column::new("pop", ColumnType::Number),
            Column::new("name", ColumnType::Text),
        ]);
        set.push(
            Feature::new(Geometry::Point(Point::new(0.0, 0.0)))
                .with_property("pop", 42.0)
                .with_property("name", Value::Null),
        );
        set
    }

    fn columns(kind: ColumnKind, target: Option<&str>) -> ResolvedColumns {
        ResolvedColumns {
            kind,
            target: target.map(String::from),
            tooltip: vec!["pop".into(), "name".into()],
            popup: vec!["name".into()],
        }
    }

    #[test]
    fn test_null_fields_render_as_none_marker() {
        let set = one_point_set();
        let (styled, legend) = package(
            &set,
            &columns(ColumnKind::Uniform, None),
            &Classification::Uniform,
            &StyleOverrides::new(),
        )
        .unwrap();

        assert!(legend.is_none());
        assert_eq!(
            styled[0].tooltip,
            vec![
                ("pop".to_string(), "42".to_string()),
                ("name".to_string(), "None".to_string()),
            ]
        );
        assert_eq!(styled[0].popup, vec![("name".to_string(), "None".to_string())]);
    }

    #[test]
    fn test_override_conflict_surfaces() {
        let set = one_point_set();
        let overrides = StyleOverrides::new().with_stroke_opacity(0.5);

        let result = package(
            &set,
            &columns(ColumnKind::Uniform, None),
            &Classification::Uniform,
            &overrides,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_continuous_legend_skips_empty_bins() {
        let set = one_point_set();
        let classification = Classification::Continuous {
            floor: 0.0,
            edges: vec![10.0, 20.0, 50.0],
            colors: vec![
                Color::rgb(1, 1, 1),
                Color::rgb(2, 2, 2),
                Color::rgb(3, 3, 3),
            ],
            assignment: vec![Some(2)],
        };

        let (styled, legend) = package(
            &set,
            &columns(ColumnKind::Continuous, Some("pop")),
            &classification,
            &StyleOverrides::new(),
        )
        .unwrap();

        let legend = legend.unwrap();
        assert_eq!(legend.title, "pop");
        assert_eq!(legend.entries.len(), 1);
        assert_eq!(legend.entries[0].label, "20 - 50");
        assert_eq!(legend.entries[0].color, Color::rgb(3, 3, 3));

        match &styled[0].style {
            FeatureStyle::Point(style) => assert_eq!(style.fill_color, Color::rgb(3, 3, 3)),
            other => panic!("unexpected style: {:?}", other),
        }
    }

    #[test]
    fn test_categorical_legend_in_slot_order() {
        let set = one_point_set();
        let classification = Classification::Categorical {
            categories: vec!["a".into(), "b".into()],
            colors: vec![Color::rgb(1, 1, 1), Color::rgb(2, 2, 2)],
            assignment: vec![Some(0)],
        };

        let (_, legend) = package(
            &set,
            &columns(ColumnKind::Categorical, Some("name")),
            &classification,
            &StyleOverrides::new(),
        )
        .unwrap();

        let legend = legend.unwrap();
        assert_eq!(legend.entries.len(), 1);
        assert_eq!(legend.entries[0].label, "a");
    }

    #[test]
    fn test_missing_value_gets_neutral_color() {
        let set = one_point_set();
        let classification = Classification::Continuous {
            floor: 0.0,
            edges: vec![10.0],
            colors: vec![Color::rgb(1, 1, 1)],
            assignment: vec![None],
        };

        let (styled, _) = package(
            &set,
            &columns(ColumnKind::Continuous, Some("pop")),
            &classification,
            &StyleOverrides::new(),
        )
        .unwrap();

        match &styled[0].style {
            FeatureStyle::Point(style) => assert_eq!(style.fill_color, MISSING_COLOR),
            other => panic!("unexpected style: {:?}", other),
        }
    }
}
