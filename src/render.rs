use crate::config::MapConfig;
use crate::html::escape_html;
use crate::processing::GroupedAttractions;
use crate::types::{AttractionRecord, CategoryBucket};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    pub tooltip: String,
    pub popup: String,
    pub color: &'static str,
}

/// One toggleable group of markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub name: &'static str,
    pub color: &'static str,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: [f64; 2], // [lat, lon]
    pub zoom: u8,
    pub width: u32,
    pub height: u32,
    pub layers: Vec<Layer>,
}

/// Build one layer per bucket, empty buckets included.
pub fn render_map(map: &MapConfig, grouped: &GroupedAttractions) -> MapView {
    let layers: Vec<Layer> = grouped.buckets.iter().map(render_layer).collect();
    debug!(
        "Rendered {} markers across {} layers",
        layers.iter().map(|l| l.markers.len()).sum::<usize>(),
        layers.len()
    );

    MapView {
        center: [map.center_lat, map.center_lon],
        zoom: map.zoom,
        width: map.width,
        height: map.height,
        layers,
    }
}

fn render_layer(bucket: &CategoryBucket) -> Layer {
    Layer {
        name: bucket.category.label(),
        color: bucket.color,
        markers: bucket
            .records
            .iter()
            .map(|record| render_marker(record, bucket.color))
            .collect(),
    }
}

fn render_marker(record: &AttractionRecord, color: &'static str) -> Marker {
    Marker {
        lat: record.latitude(),
        lon: record.longitude(),
        tooltip: escape_html(&record.name),
        popup: format!(
            "<b>{}</b><br>{}<br>{}",
            escape_html(&record.name),
            escape_html(&record.location),
            escape_html(&record.description)
        ),
        color,
    }
}

/// One Point feature per attraction, in bucket order.
pub fn to_geojson(grouped: &GroupedAttractions) -> FeatureCollection {
    let features = grouped
        .buckets
        .iter()
        .flat_map(|bucket| bucket.records.iter().map(move |record| (bucket, record)))
        .map(|(bucket, record)| {
            let mut properties = JsonObject::new();
            properties.insert("name".to_string(), record.name.clone().into());
            properties.insert("location".to_string(), record.location.clone().into());
            properties.insert("description".to_string(), record.description.clone().into());
            properties.insert("category".to_string(), bucket.category.label().into());
            properties.insert("color".to_string(), bucket.color.into());

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![
                    record.longitude(),
                    record.latitude(),
                ]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
