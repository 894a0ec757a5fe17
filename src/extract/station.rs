// src/extract/station.rs
//! Record extractor: one (summary, detail) row pair to one [`StationRecord`].

use scraper::{ElementRef, Selector};

use super::{cell_text, row_cells, table_rows, MalformedRowError, StationRecord};

/// Row label selecting the district field in the lookup sub-table.
const DISTRICT_LABEL: &str = "מחוז:";
/// Row label selecting the subdistrict field.
const SUBDISTRICT_LABEL: &str = "נפה:";

/// Index 3 of the summary row is a display-only column and is skipped.
const CELL_FIELDS: [usize; 5] = [0, 1, 2, 4, 5];

/// Extract a full station record from one row pair.
///
/// Atomic: either every field resolves or the pair fails with a
/// [`MalformedRowError`]. The only tolerated absences are district and
/// subdistrict, which default to the empty string when the lookup sub-table
/// has no matching row.
pub fn extract_station(
    summary: ElementRef<'_>,
    detail: ElementRef<'_>,
) -> Result<StationRecord, MalformedRowError> {
    let id = station_id(summary)?;

    let cells = row_cells(summary);
    if cells.len() < 6 {
        return Err(MalformedRowError::TooFewCells(cells.len()));
    }
    let [city, address, name, owner, notes] = CELL_FIELDS.map(|i| cell_text(cells[i]));

    let table_selector = Selector::parse("table").expect("`table` selector should be valid");
    let mut sub_tables = detail.select(&table_selector);
    let schedule_table = sub_tables
        .next()
        .ok_or(MalformedRowError::MissingSubTable("schedule"))?;
    let lookup_table = sub_tables
        .next()
        .ok_or(MalformedRowError::MissingSubTable("district lookup"))?;

    let schedule = weekly_schedule(schedule_table);
    let (district, subdistrict) = district_lookup(lookup_table)?;

    Ok(StationRecord {
        id,
        city,
        address,
        name,
        owner,
        notes,
        schedule,
        district,
        subdistrict,
    })
}

/// The summary row's `id` attribute ends in `_<n>`; `n` is the station id.
fn station_id(summary: ElementRef<'_>) -> Result<u32, MalformedRowError> {
    let raw = summary
        .value()
        .attr("id")
        .ok_or(MalformedRowError::MissingId)?;
    let (_, suffix) = raw
        .rsplit_once('_')
        .ok_or_else(|| MalformedRowError::UnparsableId(raw.to_string()))?;
    suffix
        .parse()
        .map_err(|_| MalformedRowError::UnparsableId(raw.to_string()))
}

/// Hours live in the odd-index cells of each data row; even-index cells hold
/// the day labels. The first row is a header and is skipped.
fn weekly_schedule(table: ElementRef<'_>) -> Vec<String> {
    table_rows(table)
        .into_iter()
        .skip(1)
        .flat_map(|row| {
            row_cells(row)
                .into_iter()
                .skip(1)
                .step_by(2)
                .map(cell_text)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Scan the two-column lookup sub-table for the district and subdistrict
/// labels. Rows with other labels are ignored; missing labels leave the
/// field empty.
fn district_lookup(table: ElementRef<'_>) -> Result<(String, String), MalformedRowError> {
    let mut district = String::new();
    let mut subdistrict = String::new();

    for row in table_rows(table) {
        let cells = row_cells(row);
        if cells.len() != 2 {
            return Err(MalformedRowError::BadLookupRow(cells.len()));
        }
        let content = cell_text(cells[1]);
        match cell_text(cells[0]).as_str() {
            DISTRICT_LABEL => district = content,
            SUBDISTRICT_LABEL => subdistrict = content,
            _ => {}
        }
    }
    Ok((district, subdistrict))
}
