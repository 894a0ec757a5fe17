// src/crawl.rs
//! Sequential page-by-page crawl of the station listing.

use anyhow::Result;
use reqwest::Client;
use std::future::Future;
use tracing::{info, warn};

use crate::extract::{self, StationRecord};
use crate::fetch;
use crate::geocode;
use crate::store::StationStore;

/// The listing's station pages start after this offset; the cursor is
/// incremented before each fetch, so the first page requested is 67.
pub const START_PAGE: u32 = 66;

/// Safety net for the "stop on first empty page" termination signal: a
/// persistent upstream glitch must not loop forever.
pub const MAX_PAGES: u32 = 1_000;

/// Crawl the listing from `start_page`, persisting every extracted station
/// and its raw geocode response one by one. Returns the total number of
/// stations downloaded.
pub async fn crawl(
    client: &Client,
    store: &StationStore,
    start_page: u32,
    max_pages: u32,
) -> Result<usize> {
    crawl_with(
        |page| fetch::pages::fetch_listing_page(client, page),
        |station| async move {
            store.save_station(&station)?;
            let response = geocode::geocode(client, &station.city, &station.address).await?;
            store.save_geocode(station.id, &response)?;
            Ok(())
        },
        start_page,
        max_pages,
    )
    .await
}

/// The crawl loop with its collaborators injected: `fetch` produces one
/// page of HTML per cursor value, `sink` persists one extracted station.
///
/// Terminates at the first page that yields no station table or no row
/// pairs; `max_pages` bounds the loop when that signal never arrives.
pub async fn crawl_with<F, FFut, S, SFut>(
    mut fetch: F,
    mut sink: S,
    start_page: u32,
    max_pages: u32,
) -> Result<usize>
where
    F: FnMut(u32) -> FFut,
    FFut: Future<Output = Result<String>>,
    S: FnMut(StationRecord) -> SFut,
    SFut: Future<Output = Result<()>>,
{
    let mut total = 0;
    let mut page = start_page;
    let last_page = start_page + max_pages;

    loop {
        page += 1;
        if page > last_page {
            warn!(page, max_pages, "hit the page cap without an empty page");
            break;
        }

        let html = fetch(page).await?;
        let stations = match extract::stations_from_page(&html)? {
            Some(stations) if !stations.is_empty() => stations,
            _ => {
                info!(page, total, "empty page; crawl complete");
                break;
            }
        };

        let found = stations.len();
        for station in stations {
            sink(station).await?;
        }
        total += found;
        info!(page, found, total, "downloaded page");
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::future::ready;

    fn station_page(id: u32) -> String {
        format!(
            r#"<html><body>
            <table class="cqwpGridViewTable cqwpGridViewTableFullVaccines PaymentsGridViewGroup">
              <tr><th>label</th></tr>
              <tr id="grid_{id}">
                <td>עיר</td><td>רחוב 1</td><td>תחנה</td><td>-</td><td>בעלים</td><td></td>
              </tr>
              <tr><td colspan="6">
                <table><tr><th>h</th><th>h</th></tr><tr><td>ראשון</td><td>8:00</td></tr></table>
                <table><tr><td>מחוז:</td><td>מרכז</td></tr></table>
              </td></tr>
            </table>
            </body></html>"#
        )
    }

    const EMPTY_PAGE: &str = "<html><body><p>no more stations</p></body></html>";

    #[tokio::test]
    async fn stops_at_the_first_empty_page() -> Result<()> {
        let fetched = RefCell::new(Vec::new());
        let saved = RefCell::new(Vec::new());

        let total = crawl_with(
            |page| {
                fetched.borrow_mut().push(page);
                let html = if page < 69 {
                    station_page(page)
                } else {
                    EMPTY_PAGE.to_string()
                };
                ready(Ok(html))
            },
            |station| {
                saved.borrow_mut().push(station.id);
                ready(Ok(()))
            },
            66,
            100,
        )
        .await?;

        assert_eq!(total, 2);
        assert_eq!(*fetched.borrow(), vec![67, 68, 69]);
        assert_eq!(*saved.borrow(), vec![67, 68]);
        Ok(())
    }

    #[tokio::test]
    async fn table_with_no_row_pairs_also_terminates() -> Result<()> {
        let no_pairs = r#"<html><body>
            <table class="cqwpGridViewTable cqwpGridViewTableFullVaccines PaymentsGridViewGroup">
              <tr><th>label</th></tr>
            </table>
            </body></html>"#;

        let total = crawl_with(
            |_| ready(Ok(no_pairs.to_string())),
            |_| ready(Ok(())),
            66,
            100,
        )
        .await?;
        assert_eq!(total, 0);
        Ok(())
    }

    #[tokio::test]
    async fn page_cap_stops_a_listing_that_never_empties() -> Result<()> {
        let total = crawl_with(
            |page| ready(Ok(station_page(page))),
            |_| ready(Ok(())),
            66,
            5,
        )
        .await?;
        assert_eq!(total, 5);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_row_aborts_the_crawl() {
        let bad_page = r#"<html><body>
            <table class="cqwpGridViewTable cqwpGridViewTableFullVaccines PaymentsGridViewGroup">
              <tr><th>label</th></tr>
              <tr><td>only</td><td>five</td><td>cells</td><td>no</td><td>id</td></tr>
              <tr><td>detail</td></tr>
            </table>
            </body></html>"#;

        let result = crawl_with(
            |_| ready(Ok(bad_page.to_string())),
            |_| ready(Ok::<(), anyhow::Error>(())),
            66,
            100,
        )
        .await;
        assert!(result.is_err());
    }
}
