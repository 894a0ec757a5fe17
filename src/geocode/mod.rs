// src/geocode/mod.rs
//! Google geocoding of a station's city and address.
//!
//! The raw provider response is persisted verbatim per station, so the query
//! returns untyped JSON; [`GeocodeResponse`] is the lenient typed view the
//! aggregation stage reads back from disk.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static GEOCODE_URL: &str = "http://maps.googleapis.com/maps/api/geocode/json";

/// Provider status meaning at least one result was found.
pub const STATUS_OK: &str = "OK";

/// Typed view of a geocode response. Unknown provider fields are ignored on
/// deserialize; `results` is empty for non-OK statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Query the provider with the station's city as a locality constraint and
/// its address as free text. Transport failures propagate; a non-OK status
/// is a valid response and is the caller's signal that the station could not
/// be located.
pub async fn geocode(client: &Client, locality: &str, address: &str) -> Result<Value> {
    let body = client
        .get(GEOCODE_URL)
        .query(&[
            ("components", format!("locality:{locality}")),
            ("address", address.to_string()),
            ("sensor", "false".to_string()),
        ])
        .send()
        .await
        .with_context(|| format!("geocoding `{address}`"))?
        .error_for_status()?
        .text()
        .await
        .context("reading geocode response body")?;
    serde_json::from_str(&body).context("decoding geocode response")
}
