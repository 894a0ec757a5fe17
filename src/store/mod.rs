// src/store/mod.rs
//! On-disk layout: one JSON file per station under the root directory, one
//! raw geocode response per station under `geo/`, and the aggregated feature
//! collection under `geo/geojson/`. Files are keyed by station id, so
//! re-crawling overwrites records in place.

use anyhow::{Context, Result};
use glob::glob;
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::extract::StationRecord;
use crate::geocode::GeocodeResponse;
use crate::geojson::FeatureCollection;

const FEATURE_COLLECTION_FILE: &str = "stations-geo.json";

pub struct StationStore {
    stations_dir: PathBuf,
    geo_dir: PathBuf,
    geojson_dir: PathBuf,
}

impl StationStore {
    /// Open (and create if needed) the store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let stations_dir: PathBuf = root.into();
        let geo_dir = stations_dir.join("geo");
        let geojson_dir = geo_dir.join("geojson");
        for dir in [&stations_dir, &geo_dir, &geojson_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating store directory `{}`", dir.display()))?;
        }
        Ok(StationStore {
            stations_dir,
            geo_dir,
            geojson_dir,
        })
    }

    /// Persist one station record as `<id>.json`.
    pub fn save_station(&self, station: &StationRecord) -> Result<()> {
        write_json(
            self.stations_dir.join(format!("{}.json", station.id)),
            station,
        )
    }

    /// Persist the raw geocode response for a station as `geo/<id>.json`.
    pub fn save_geocode(&self, id: u32, response: &Value) -> Result<()> {
        write_json(self.geo_dir.join(format!("{id}.json")), response)
    }

    /// Load every persisted geocode response back for aggregation.
    pub fn load_geocoded(&self) -> Result<Vec<GeocodeResponse>> {
        let pattern = format!("{}/*.json", self.geo_dir.display());
        let mut responses = Vec::new();
        for entry in glob(&pattern).context("invalid glob pattern for geocode files")? {
            let path = entry.context("reading glob entry")?;
            let file = File::open(&path)
                .with_context(|| format!("failed to open `{}`", path.display()))?;
            let response = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("decoding geocode file `{}`", path.display()))?;
            responses.push(response);
        }
        Ok(responses)
    }

    /// Write the aggregated feature collection, via a temporary file and
    /// rename so a failed write never leaves a truncated artifact behind.
    pub fn save_feature_collection(&self, collection: &FeatureCollection) -> Result<PathBuf> {
        let final_path = self.geojson_dir.join(FEATURE_COLLECTION_FILE);
        let tmp_path = self.geojson_dir.join(format!("{FEATURE_COLLECTION_FILE}.tmp"));

        write_json(&tmp_path, collection)?;
        fs::rename(&tmp_path, &final_path).with_context(|| {
            format!(
                "failed to rename `{}` to `{}`",
                tmp_path.display(),
                final_path.display()
            )
        })?;
        Ok(final_path)
    }
}

fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("could not create `{}`", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("writing `{}`", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flushing `{}`", path.display()))?;
    Ok(())
}
