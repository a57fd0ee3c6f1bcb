use super::model::{Measurement, WideTable};

// ---------------------------------------------------------------------------
// Wide → long
// ---------------------------------------------------------------------------

/// Melt the wide table into `(time, subject, value)` triples.
///
/// Subjects are visited in declaration order and rows in table order, so the
/// output is grouped by subject with row order preserved inside each group.
/// Cells with a missing value are omitted, as are rows with a missing time.
pub fn to_long_form(table: &WideTable) -> Vec<Measurement> {
    let skipped_rows = table.times.iter().filter(|t| t.is_none()).count();
    if skipped_rows > 0 {
        log::warn!(
            "{skipped_rows} row(s) have no value in '{}' and are ignored",
            table.time_column
        );
    }

    let mut out = Vec::new();
    for column in &table.subjects {
        for (time, value) in table.times.iter().zip(&column.values) {
            if let (Some(time), Some(value)) = (time, value) {
                out.push(Measurement::new(*time, column.name.as_str(), *value));
            }
        }
    }
    out
}
