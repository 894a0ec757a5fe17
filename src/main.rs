use anyhow::Result;
use reqwest::Client;
use std::time::Duration;
use tipatscraper::{crawl, geojson, store::StationStore};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const OUTPUT_DIR: &str = "raw";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) configure client & output dirs ───────────────────────────
    let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    let store = StationStore::new(OUTPUT_DIR)?;

    // ─── 3) crawl every listing page ─────────────────────────────────
    let total = crawl::crawl(&client, &store, crawl::START_PAGE, crawl::MAX_PAGES).await?;
    info!(total, "downloaded all stations");

    // ─── 4) aggregate geocoded stations ──────────────────────────────
    let responses = store.load_geocoded()?;
    let (collection, non_geocodable) = geojson::feature_collection(&responses);
    info!(
        features = collection.features.len(),
        non_geocodable, "aggregated feature collection"
    );

    let path = store.save_feature_collection(&collection)?;
    info!("wrote {}", path.display());

    Ok(())
}
