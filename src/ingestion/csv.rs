//! CSV record loading.

use std::path::Path;

use crate::coercion::coerce;
use crate::error::CrudResult;
use crate::types::{Record, RecordSet, Value};

/// Load a CSV file into a [`RecordSet`].
///
/// Rules:
///
/// - CSV must have headers; each row becomes a record keyed by header, in column order.
/// - Rows shorter than the header simply lack the trailing fields.
/// - With `coerce_values`, each cell goes through [`coerce`]; otherwise cells stay strings.
pub fn ingest_csv_from_path(path: impl AsRef<Path>, coerce_values: bool) -> CrudResult<RecordSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr, coerce_values)
}

/// Load CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    coerce_values: bool,
) -> CrudResult<RecordSet> {
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let mut record = Record::new();
        for (name, raw) in headers.iter().zip(row.iter()) {
            let value = if coerce_values {
                coerce(raw)
            } else {
                Value::string(raw)
            };
            record.insert(name, value);
        }
        records.push(record);
    }

    Ok(RecordSet::from(records))
}
