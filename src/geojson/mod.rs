// src/geojson/mod.rs
//! Aggregates per-station geocode responses into one feature collection.

use serde::{Deserialize, Serialize};

use crate::geocode::{GeocodeResponse, STATUS_OK};

/// The aggregated output artifact.
///
/// Coordinates are emitted `[lat, lng]` and the geometry type is lowercase
/// `"point"`, the shape downstream consumers of this artifact already read.
/// Standard GeoJSON would use `[lng, lat]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: Properties,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    #[serde(rename = "Address")]
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

/// Build a feature collection from every response with an OK status, taking
/// each one's first result. Returns the collection together with the count
/// of stations that could not be geocoded, for the operator's report.
pub fn feature_collection(responses: &[GeocodeResponse]) -> (FeatureCollection, usize) {
    let mut features = Vec::new();
    let mut non_geocodable = 0;

    for response in responses {
        let first = match response.results.first() {
            Some(first) if response.status == STATUS_OK => first,
            _ => {
                non_geocodable += 1;
                continue;
            }
        };
        features.push(Feature {
            kind: "Feature".to_string(),
            properties: Properties {
                address: first.formatted_address.clone(),
            },
            geometry: Geometry {
                kind: "point".to_string(),
                coordinates: [first.geometry.location.lat, first.geometry.location.lng],
            },
        });
    }

    (
        FeatureCollection {
            kind: "FeatureCollection".to_string(),
            features,
        },
        non_geocodable,
    )
}
