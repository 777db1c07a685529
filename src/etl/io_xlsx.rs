// Primitives for reading the master-list workbook.

use std::fs::File;
use std::io::BufReader;

use calamine::{Reader, Xlsx};
use log::debug;
use snafu::prelude::*;

use crate::etl::{
    normalize::cell_text, EtlResult, InputAccessSnafu, InputFormatSnafu, MissingHeaderSnafu,
    MissingSheetSnafu, SourceTable,
};

/// Reads the first worksheet of the workbook at `path` into a [SourceTable],
/// using the first row as column headers.
pub fn read_workbook(path: &str) -> EtlResult<SourceTable> {
    let file = File::open(path).context(InputAccessSnafu { path })?;
    let mut workbook: Xlsx<_> =
        Xlsx::new(BufReader::new(file)).context(InputFormatSnafu { path })?;

    let wrange = workbook
        .worksheet_range_at(0)
        .context(MissingSheetSnafu { path })?
        .context(InputFormatSnafu { path })?;

    let mut rows = wrange.rows();
    let header = rows.next().context(MissingHeaderSnafu { path })?;
    debug!("read_workbook: header: {:?}", header);

    // Header cells become plain text immediately. Data cells keep their
    // native type so the normalization pass controls the coercion.
    let headers: Vec<String> = header.iter().map(cell_text).collect();
    let data: Vec<Vec<calamine::DataType>> = rows.map(|row| row.to_vec()).collect();

    Ok(SourceTable {
        headers,
        rows: data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::etl::EtlError;
    use std::io::Write;

    #[test]
    fn missing_file_is_an_access_error() {
        let res = read_workbook("./does-not-exist/master-list.xlsx");
        assert!(matches!(res, Err(EtlError::InputAccess { .. })));
    }

    #[test]
    fn non_spreadsheet_file_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-a-workbook.xlsx");
        let mut f = File::create(&path).unwrap();
        f.write_all(b"this is plain text, not a zip archive").unwrap();

        let res = read_workbook(path.to_str().unwrap());
        assert!(matches!(res, Err(EtlError::InputFormat { .. })));
    }
}
