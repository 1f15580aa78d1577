use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use super::error::{DataError, Result};
use super::model::{Row, Table};

// ---------------------------------------------------------------------------
// Source description
// ---------------------------------------------------------------------------

/// Where the job table comes from and how its fields are separated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub path: PathBuf,
    pub delimiter: u8,
}

impl SourceConfig {
    /// Comma-separated file at `path`.
    pub fn csv(path: impl Into<PathBuf>) -> Self {
        SourceConfig {
            path: path.into(),
            delimiter: b',',
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the whole table described by `source`.
///
/// All-or-nothing: either every record is parsed into the returned [`Table`]
/// or an error is returned and nothing is kept.
pub fn load_table(source: &SourceConfig) -> Result<Table> {
    log::debug!("opening job data at {}", source.path.display());
    let file = File::open(&source.path).map_err(|e| DataError::SourceUnavailable {
        path: source.path.clone(),
        source: e,
    })?;

    let table = read_table(file, source.delimiter)?;
    log::info!(
        "loaded {} job rows with {} columns from {}",
        table.len(),
        table.columns().len(),
        source.path.display()
    );
    Ok(table)
}

/// Parse a delimited table from any reader.
///
/// Layout: first record is the header; each following record becomes a
/// [`Row`] keyed by header name. Quoting follows RFC 4180, so fields may
/// embed the delimiter, quotes and newlines.
pub fn read_table<R: Read>(reader: R, delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(reader);

    let columns: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if columns.is_empty() {
        return Err(DataError::malformed(Some(1), "missing header row"));
    }

    let mut seen = BTreeSet::new();
    for col in &columns {
        if !seen.insert(col.as_str()) {
            return Err(DataError::malformed(
                Some(1),
                format!("duplicate column '{col}' in header"),
            ));
        }
    }

    // Staged locally so a failure half way through leaves nothing behind.
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        let row: Row = columns
            .iter()
            .map(String::as_str)
            .zip(record.iter())
            .collect();
        rows.push(row);
    }

    Ok(Table::new(columns, rows))
}

fn csv_error(err: csv::Error) -> DataError {
    let line = err.position().map(|p| p.line());
    let reason = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("record has {len} fields but the header has {expected_len}"),
        csv::ErrorKind::Io(e) => format!("read failed: {e}"),
        _ => err.to_string(),
    };
    DataError::malformed(line, reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const JOBS: &str = "\
name,employer,location,position type,core competency
Junior Data Analyst,Lockerdome,Saint Louis,Data Scientist / Business Intelligence,Statistical Analysis
Web Developer,\"Enterprise Holdings, Inc\",Saint Louis,Web - Front End,Javascript
";

    #[test]
    fn reads_header_and_rows_in_order() {
        let table = read_table(JOBS.as_bytes(), b',').unwrap();
        assert_eq!(
            table.columns(),
            ["name", "employer", "location", "position type", "core competency"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].get("name"), Some("Junior Data Analyst"));
        assert_eq!(
            table.rows()[1].get("employer"),
            Some("Enterprise Holdings, Inc")
        );
        assert!(table.rows().iter().all(|r| r.len() == 5));
    }

    #[test]
    fn quoted_fields_keep_newlines() {
        let src = "name,notes\nA,\"line one\nline two\"\n";
        let table = read_table(src.as_bytes(), b',').unwrap();
        assert_eq!(table.rows()[0].get("notes"), Some("line one\nline two"));
    }

    #[test]
    fn honours_custom_delimiter() {
        let src = "name;employer\nTester;Acme, Ltd\n";
        let table = read_table(src.as_bytes(), b';').unwrap();
        assert_eq!(table.rows()[0].get("employer"), Some("Acme, Ltd"));
    }

    #[test]
    fn empty_cells_are_present() {
        let src = "name,employer\nTester,\n";
        let table = read_table(src.as_bytes(), b',').unwrap();
        assert_eq!(table.rows()[0].get("employer"), Some(""));
    }

    #[test]
    fn header_only_gives_empty_table() {
        let table = read_table("name,employer\n".as_bytes(), b',').unwrap();
        assert_eq!(table.columns().len(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn empty_input_is_malformed() {
        let err = read_table("".as_bytes(), b',').unwrap_err();
        assert!(matches!(err, DataError::MalformedSource { .. }), "{err}");
    }

    #[test]
    fn ragged_record_is_malformed() {
        let src = "name,employer\nA,B\nC\n";
        let err = read_table(src.as_bytes(), b',').unwrap_err();
        match err {
            DataError::MalformedSource { line, reason } => {
                assert_eq!(line, Some(3));
                assert!(reason.contains("1 fields"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_header_is_malformed() {
        let err = read_table("name,name\na,b\n".as_bytes(), b',').unwrap_err();
        assert!(matches!(err, DataError::MalformedSource { line: Some(1), .. }));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = SourceConfig::csv(dir.path().join("nope.csv"));
        let err = load_table(&source).unwrap_err();
        assert!(matches!(err, DataError::SourceUnavailable { .. }), "{err}");
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(JOBS.as_bytes()).unwrap();
        let table = load_table(&SourceConfig::csv(file.path())).unwrap();
        assert_eq!(table.len(), 2);
    }
}
