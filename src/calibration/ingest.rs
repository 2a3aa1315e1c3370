// CSV ingestion - decodes x,y,z rows into a SampleStore
//
// Rows are headerless by default. The first three columns are the x, y and
// z acceleration; any further columns are ignored. A malformed row aborts
// ingestion with the 1-based row number in the error.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::info;

use super::sample::{Axis, Sample, SampleStore};
use crate::error::CalibrationError;

/// Load samples from a CSV file on disk
pub fn load_samples(path: &Path, has_headers: bool) -> Result<SampleStore, CalibrationError> {
    let source = path.display().to_string();
    let file = File::open(path).map_err(|err| CalibrationError::Ingestion {
        source: source.clone(),
        reason: format!("unable to open file: {}", err),
    })?;
    read_samples(file, &source, has_headers)
}

/// Decode samples from any CSV reader
///
/// # Arguments
/// * `reader` - CSV byte source
/// * `source` - Name used in error messages
/// * `has_headers` - Skip the first row
pub fn read_samples<R: io::Read>(
    reader: R,
    source: &str,
    has_headers: bool,
) -> Result<SampleStore, CalibrationError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let row_offset = if has_headers { 2 } else { 1 };
    let mut samples = Vec::new();

    for (idx, result) in csv_reader.records().enumerate() {
        let row = idx + row_offset;
        let record = result.map_err(|err| CalibrationError::Ingestion {
            source: source.to_string(),
            reason: format!("row {}: {}", row, err),
        })?;
        samples.push(parse_record(&record, row).map_err(|reason| {
            CalibrationError::Ingestion {
                source: source.to_string(),
                reason,
            }
        })?);
    }

    info!("[Ingest] Read {} samples from {}", samples.len(), source);
    Ok(SampleStore::new(samples))
}

fn parse_record(record: &StringRecord, row: usize) -> Result<Sample, String> {
    if record.len() < 3 {
        return Err(format!(
            "row {}: expected 3 columns (x, y, z), found {}",
            row,
            record.len()
        ));
    }

    let field = |axis: Axis| -> Result<f64, String> {
        let raw = &record[axis.index()];
        raw.parse::<f64>().map_err(|err| {
            format!(
                "row {}: invalid {} value {:?}: {}",
                row,
                axis.label(),
                raw,
                err
            )
        })
    };

    Ok(Sample::new(field(Axis::X)?, field(Axis::Y)?, field(Axis::Z)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(data: &str, has_headers: bool) -> Result<SampleStore, CalibrationError> {
        read_samples(data.as_bytes(), "inline", has_headers)
    }

    #[test]
    fn test_reads_headerless_rows() {
        let store = read("0.1,0.2,9.8\n-0.1, 0.0 ,9.81\n", false).unwrap();
        assert_eq!(
            store.as_slice(),
            &[Sample::new(0.1, 0.2, 9.8), Sample::new(-0.1, 0.0, 9.81)]
        );
    }

    #[test]
    fn test_skips_header_when_requested() {
        let store = read("x,y,z\n1,2,3\n", true).unwrap();
        assert_eq!(store.as_slice(), &[Sample::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn test_header_without_flag_is_fatal() {
        match read("x,y,z\n1,2,3\n", false).unwrap_err() {
            CalibrationError::Ingestion { source, reason } => {
                assert_eq!(source, "inline");
                assert!(reason.contains("row 1"), "{}", reason);
                assert!(reason.contains("invalid X"), "{}", reason);
            }
            other => panic!("Expected Ingestion error, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_columns_ignored() {
        let store = read("1,2,3,1700000000\n4,5,6,1700000001\n", false).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.as_slice()[1], Sample::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_short_row_is_fatal() {
        match read("1,2,3\n4,5\n", false).unwrap_err() {
            CalibrationError::Ingestion { reason, .. } => {
                assert!(reason.contains("row 2"), "{}", reason);
                assert!(reason.contains("found 2"), "{}", reason);
            }
            other => panic!("Expected Ingestion error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_field_is_fatal() {
        match read("1,2,3\n1,abc,3\n", false).unwrap_err() {
            CalibrationError::Ingestion { reason, .. } => {
                assert!(reason.contains("row 2"), "{}", reason);
                assert!(reason.contains("invalid Y"), "{}", reason);
            }
            other => panic!("Expected Ingestion error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_yields_empty_store() {
        assert!(read("", false).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_ingestion_error() {
        let err = load_samples(Path::new("/nonexistent/capture.csv"), false).unwrap_err();
        assert!(matches!(err, CalibrationError::Ingestion { .. }));
    }
}
