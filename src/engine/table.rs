// src/engine/table.rs
use crate::core::html;
use crate::error::{Result, WatchError};

/// Typed rows out of the first `<table>` of `doc`.
///
/// Row 0 is the header and never reaches `row_mapper`. Rows with fewer than
/// `min_columns` cells are skipped (some firmware emits separator rows), as
/// are rows the mapper rejects. Output keeps document order.
///
/// No table at all is a parse error; a table with only a header is an empty,
/// valid result.
pub fn extract_table<T, F>(doc: &str, min_columns: usize, mut row_mapper: F) -> Result<Vec<T>>
where
    F: FnMut(&[String]) -> Option<T>,
{
    let rows = html::first_table_rows(doc).ok_or_else(|| WatchError::Parse(s!("no table in page")))?;
    if rows.len() < 2 {
        return Ok(Vec::new());
    }

    let mut out = Vec::with_capacity(rows.len() - 1);
    for (i, cells) in rows.iter().enumerate().skip(1) {
        if cells.len() < min_columns {
            logd!("row {} has {} cells (< {}), skipped", i, cells.len(), min_columns);
            continue;
        }
        if let Some(rec) = row_mapper(cells) {
            out.push(rec);
        }
    }
    Ok(out)
}
