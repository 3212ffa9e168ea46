//! Composes two datasets onto one map: a boundary layer first, then a
//! point layer appended onto the same document.
//!
//! Run with `cargo run --example overlay`.

use geo_types::{LineString, Point, Polygon};
use geoview::{
    render, render_onto, Color, Column, ColumnType, Crs, Feature, FeatureSet, Geometry,
    StyleOverrides, ViewSpec,
};

fn main() -> geoview::Result<()> {
    env_logger::init();

    let mut boundary = FeatureSet::new(vec![Column::new("name", ColumnType::Text)]).with_crs(Crs::Wgs84);
    boundary.push(
        Feature::new(Geometry::Polygon(Polygon::new(
            LineString::from(vec![(-74.05, 40.68), (-73.90, 40.68), (-73.90, 40.82), (-74.05, 40.82)]),
            vec![],
        )))
        .with_property("name", "study area"),
    );

    let mut sensors = FeatureSet::new(vec![
        Column::new("id", ColumnType::Number),
        Column::new("reading", ColumnType::Number),
    ])
    .with_crs(Crs::Wgs84);
    for (i, (x, y, reading)) in [
        (-74.01, 40.71, 14.0),
        (-73.98, 40.75, 18.5),
        (-73.95, 40.78, 31.0),
    ]
    .iter()
    .enumerate()
    {
        sensors.push(
            Feature::new(Geometry::Point(Point::new(*x, *y)))
                .with_property("id", i as i64)
                .with_property("reading", *reading),
        );
    }

    let boundary_spec = ViewSpec::new()
        .with_layer_name("boundary")
        .with_style(StyleOverrides::new().with_fill_opacity(0.05).with_stroke_color(Color::rgb(60, 60, 60)));

    let sensor_spec = ViewSpec::new()
        .with_column("reading")
        .with_bins(3)
        .with_layer_name("sensors");

    let mut document = render(&boundary, &boundary_spec)?;
    render_onto(&sensors, &sensor_spec, &mut document)?;

    println!("{}", document.to_json()?);
    Ok(())
}
