//! Renders a small choropleth: five districts colored by population.
//!
//! Run with `cargo run --example choropleth`.

use geo_types::{LineString, Polygon};
use geoview::{render, Column, ColumnType, Crs, Feature, FeatureSet, Geometry, ViewSpec};

fn district(x: f64, name: &str, population: f64) -> Feature {
    let square = Polygon::new(
        LineString::from(vec![(x, 0.0), (x + 0.9, 0.0), (x + 0.9, 0.9), (x, 0.9)]),
        vec![],
    );
    Feature::new(Geometry::Polygon(square))
        .with_property("name", name)
        .with_property("population", population)
}

fn main() -> geoview::Result<()> {
    env_logger::init();

    let mut districts = FeatureSet::new(vec![
        Column::new("name", ColumnType::Text),
        Column::new("population", ColumnType::Number),
    ])
    .with_crs(Crs::Wgs84);

    districts.push(district(0.0, "Harbor", 12_400.0));
    districts.push(district(1.0, "Old Town", 18_200.0));
    districts.push(district(2.0, "Riverside", 23_900.0));
    districts.push(district(3.0, "Hillcrest", 31_700.0));
    districts.push(district(4.0, "Northgate", 96_500.0));

    let spec = ViewSpec::new()
        .with_column("population")
        .with_scheme("natural-breaks")
        .with_bins(3)
        .with_layer_name("districts");

    let document = render(&districts, &spec)?;
    println!("{}", document.to_json()?);
    Ok(())
}
