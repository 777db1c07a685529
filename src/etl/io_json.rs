// Assembles the output records and writes the JSON document.

use std::fs;

use indexmap::IndexMap;
use log::info;
use snafu::prelude::*;

use crate::etl::{EtlResult, NormalizedTable, OutputAccessSnafu, Record, SerializingJsonSnafu};

/// One record per row, keyed by the normalized column names in sheet order.
pub fn to_records(table: &NormalizedTable) -> Vec<Record> {
    table
        .rows
        .iter()
        .map(|row| {
            let mut fields: IndexMap<String, String> = IndexMap::new();
            for (header, value) in table.headers.iter().zip(row.iter()) {
                fields.insert(header.clone(), value.clone());
            }
            Record(fields)
        })
        .collect()
}

/// Serializes the table as a pretty-printed JSON array and writes it to
/// `path`, creating or overwriting the file. Non-ASCII text is written
/// literally, not as escape sequences.
pub fn write_records(table: &NormalizedTable, path: &str) -> EtlResult<()> {
    let records = to_records(table);
    let document = serde_json::to_string_pretty(&records).context(SerializingJsonSnafu {})?;
    fs::write(path, document).context(OutputAccessSnafu { path })?;
    info!("wrote {} records to {}", records.len(), path);
    Ok(())
}
