//! Scraper for the Ministry of Health "Tipat Halav" station pages.
//!
//! The pipeline is: crawl the paginated station listing, extract one
//! [`extract::StationRecord`] per table row pair, persist each record and its
//! raw geocode response as JSON, then aggregate everything that geocoded
//! successfully into a single feature collection.

pub mod crawl;
pub mod extract;
pub mod fetch;
pub mod geocode;
pub mod geojson;
pub mod store;
