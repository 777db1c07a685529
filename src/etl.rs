use log::info;

use indexmap::IndexMap;
use serde::Serialize;
use snafu::Snafu;

pub mod io_json;
pub mod io_xlsx;
pub mod normalize;

#[derive(Debug, Snafu)]
pub enum EtlError {
    #[snafu(display("Cannot open input file {path}"))]
    InputAccess {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("File {path} is not a readable xlsx workbook"))]
    InputFormat {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Workbook {path} contains no worksheet"))]
    MissingSheet { path: String },
    #[snafu(display("Worksheet in {path} has no header row"))]
    MissingHeader { path: String },
    #[snafu(display("Error serializing records to JSON"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Cannot write output file {path}"))]
    OutputAccess {
        source: std::io::Error,
        path: String,
    },
}

pub type EtlResult<T> = Result<T, EtlError>;

/// The first worksheet of the master list, as loaded. Headers are already
/// text; data cells keep their spreadsheet-native type until normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<calamine::DataType>>,
}

/// Same shape as [SourceTable] after the normalization pass: every cell is
/// text, missing cells are empty strings, and known category labels have been
/// replaced by their canonical identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One output row: canonical column name to cell text, in sheet column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record(pub IndexMap<String, String>);

/// Runs the whole conversion: read the workbook, normalize the table, write
/// the JSON document. Any failure aborts the run and propagates to the caller.
pub fn run_conversion(input_path: &str, output_path: &str) -> EtlResult<()> {
    let table = io_xlsx::read_workbook(input_path)?;
    info!(
        "loaded {} rows x {} columns from {}",
        table.rows.len(),
        table.headers.len(),
        input_path
    );
    let table = normalize::normalize_table(table);
    io_json::write_records(&table, output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_fails_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("no-such-list.xlsx");
        let output = dir.path().join("officials.json");

        let res = run_conversion(input.to_str().unwrap(), output.to_str().unwrap());
        assert!(matches!(res, Err(EtlError::InputAccess { .. })));
        assert!(!output.exists());
    }
}
