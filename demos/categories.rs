//! Renders point features colored by a categorical column, including a
//! feature with a missing value.
//!
//! Run with `cargo run --example categories`.

use geo_types::Point;
use geoview::{render, Column, ColumnType, Crs, Feature, FeatureSet, Geometry, Value, ViewSpec};

fn main() -> geoview::Result<()> {
    env_logger::init();

    let mut stations = FeatureSet::new(vec![
        Column::new("name", ColumnType::Text),
        Column::new("line", ColumnType::Text),
    ])
    .with_crs(Crs::Wgs84);

    let station = |x: f64, y: f64, name: &str, line: Value| {
        Feature::new(Geometry::Point(Point::new(x, y)))
            .with_property("name", name)
            .with_property("line", line)
    };

    stations.push(station(-73.99, 40.73, "Astor Pl", "green".into()));
    stations.push(station(-73.98, 40.75, "Grand Central", "green".into()));
    stations.push(station(-73.99, 40.75, "Times Sq", "red".into()));
    stations.push(station(-74.00, 40.72, "Canal St", Value::Null));

    let spec = ViewSpec::new()
        .with_column("line")
        .with_tooltip(&["name"])
        .with_layer_name("stations");

    let document = render(&stations, &spec)?;
    println!("{}", document.to_json()?);
    Ok(())
}
