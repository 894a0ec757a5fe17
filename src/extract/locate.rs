// src/extract/locate.rs
//! Markup locator for the station listing table.

use scraper::{ElementRef, Html, Selector};

/// Class signature the listing stamps on exactly one table per page.
const TABLE_SIGNATURE: &str =
    ".cqwpGridViewTable.cqwpGridViewTableFullVaccines.PaymentsGridViewGroup";

/// Find the station table in a parsed page.
///
/// Only the first match is used. `None` means the page has no station
/// content, which the crawler treats as end-of-pagination rather than an
/// error; malformed or empty documents also land here.
pub fn locate_table(document: &Html) -> Option<ElementRef<'_>> {
    let selector =
        Selector::parse(TABLE_SIGNATURE).expect("station table CSS selector should be valid");
    document.select(&selector).next()
}
