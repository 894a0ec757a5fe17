// src/extract/rows.rs
//! Groups the listing table's rows into (summary, detail) pairs.

use scraper::ElementRef;

use super::table_rows;

/// Pair the table's rows: after dropping the leading column-label row,
/// row 1 goes with row 2, row 3 with row 4, and so on. An odd leftover row
/// has no partner and is not emitted. Source order is preserved.
pub fn pair_rows(table: ElementRef<'_>) -> Vec<(ElementRef<'_>, ElementRef<'_>)> {
    let rows = table_rows(table);
    rows.get(1..)
        .unwrap_or(&[])
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}
