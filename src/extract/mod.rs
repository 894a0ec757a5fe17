// src/extract/mod.rs
//! Turns one listing page of raw HTML into typed [`StationRecord`]s.
//!
//! The listing renders each station as a pair of `<tr>` elements: a flat
//! summary row (city, address, name, …) followed by a detail row holding two
//! nested sub-tables, the weekly schedule and a district/subdistrict lookup.

use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod locate;
pub mod rows;
pub mod station;

/// One Tipat Halav station, as extracted from a single row pair.
///
/// Immutable after construction; `schedule` serializes under the `days` key
/// for compatibility with previously downloaded records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub id: u32,
    pub city: String,
    pub address: String,
    pub name: String,
    pub owner: String,
    pub notes: String,
    #[serde(rename = "days")]
    pub schedule: Vec<String>,
    pub district: String,
    pub subdistrict: String,
}

/// A row pair whose structure does not match the listing's layout.
///
/// Any of these aborts extraction of the whole page; no partial record is
/// ever emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRowError {
    #[error("summary row has no id attribute")]
    MissingId,
    #[error("summary row id `{0}` has no numeric suffix after the last `_`")]
    UnparsableId(String),
    #[error("summary row has {0} cells, need at least 6")]
    TooFewCells(usize),
    #[error("detail row is missing the {0} sub-table")]
    MissingSubTable(&'static str),
    #[error("district lookup row has {0} cells, expected exactly 2")]
    BadLookupRow(usize),
}

/// Extract every station on one page of listing HTML.
///
/// Returns `Ok(None)` when the page carries no station table at all, which is
/// the crawler's end-of-pagination signal. The first malformed row pair fails
/// the page.
pub fn stations_from_page(html: &str) -> Result<Option<Vec<StationRecord>>, MalformedRowError> {
    let document = Html::parse_document(html);
    let table = match locate::locate_table(&document) {
        Some(table) => table,
        None => return Ok(None),
    };

    let mut stations = Vec::new();
    for (summary, detail) in rows::pair_rows(table) {
        stations.push(station::extract_station(summary, detail)?);
    }
    Ok(Some(stations))
}

/// Direct `<tr>` children of a table, looking through the `<tbody>` wrapper
/// html5ever inserts. Descendant selection would also pick up the rows of
/// nested sub-tables, which the pairer must never see.
pub(crate) fn table_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(
                child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|el| el.value().name() == "tr"),
            ),
            _ => {}
        }
    }
    rows
}

/// Direct cell children of a row.
pub(crate) fn row_cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "td" | "th"))
        .collect()
}

/// Concatenated visible text of an element, trimmed at the edges only.
pub(crate) fn cell_text(el: ElementRef<'_>) -> String {
    el.text().collect::<Vec<_>>().join("").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
      <table class="cqwpGridViewTable cqwpGridViewTableFullVaccines PaymentsGridViewGroup">
        <tr><th>עיר</th><th>כתובת</th><th>שם</th><th></th><th>בעלות</th><th>הערות</th></tr>
        <tr id="ctl00_grid_1001">
          <td> תל אביב </td><td>דיזנגוף 1</td><td>טיפת חלב מרכז</td>
          <td>-</td><td>עיריית תל אביב</td><td>קומה ב</td>
        </tr>
        <tr><td colspan="6">
          <table>
            <tr><th>יום</th><th>שעות</th></tr>
            <tr><td>ראשון</td><td> 8:00-12:00 </td></tr>
            <tr><td>שלישי</td><td>13:00-18:00</td></tr>
          </table>
          <table>
            <tr><td>מחוז:</td><td>תל אביב</td></tr>
            <tr><td>נפה:</td><td>תל אביב</td></tr>
          </table>
        </td></tr>
        <tr id="ctl00_grid_1002">
          <td>חיפה</td><td>הנביאים 2</td><td>טיפת חלב הדר</td>
          <td>-</td><td>משרד הבריאות</td><td></td>
        </tr>
        <tr><td colspan="6">
          <table>
            <tr><th>יום</th><th>שעות</th></tr>
            <tr><td>שני</td><td>9:00-14:00</td></tr>
          </table>
          <table>
            <tr><td>מחוז:</td><td>חיפה</td></tr>
          </table>
        </td></tr>
      </table>
    </body></html>"#;

    #[test]
    fn extracts_all_stations_on_a_page() {
        let stations = stations_from_page(PAGE).unwrap().unwrap();
        assert_eq!(stations.len(), 2);

        assert_eq!(stations[0].id, 1001);
        assert_eq!(stations[0].city, "תל אביב");
        assert_eq!(stations[0].address, "דיזנגוף 1");
        assert_eq!(stations[0].name, "טיפת חלב מרכז");
        assert_eq!(stations[0].owner, "עיריית תל אביב");
        assert_eq!(stations[0].notes, "קומה ב");
        assert_eq!(stations[0].schedule, vec!["8:00-12:00", "13:00-18:00"]);
        assert_eq!(stations[0].district, "תל אביב");
        assert_eq!(stations[0].subdistrict, "תל אביב");

        assert_eq!(stations[1].id, 1002);
        assert_eq!(stations[1].schedule, vec!["9:00-14:00"]);
        assert_eq!(stations[1].district, "חיפה");
        assert_eq!(stations[1].subdistrict, "");
    }

    #[test]
    fn extraction_is_deterministic() {
        let first = stations_from_page(PAGE).unwrap().unwrap();
        let second = stations_from_page(PAGE).unwrap().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn page_without_table_signals_end_of_pagination() {
        assert_eq!(stations_from_page("<html><body></body></html>"), Ok(None));
        assert_eq!(stations_from_page(""), Ok(None));
    }

    #[test]
    fn record_round_trips_through_json() {
        let station = stations_from_page(PAGE).unwrap().unwrap().remove(0);
        let json = serde_json::to_string_pretty(&station).unwrap();
        let back: StationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, station);
    }

    #[test]
    fn schedule_serializes_under_the_days_key() {
        let station = stations_from_page(PAGE).unwrap().unwrap().remove(0);
        let value = serde_json::to_value(&station).unwrap();
        assert!(value.get("days").is_some());
        assert!(value.get("schedule").is_none());
    }
}
