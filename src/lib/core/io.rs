use crate::core::error::{Result, XenprepError};
use crate::core::fs::is_gzipped;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

const READ_BUFFER: usize = 256 * 1024;

/// Build a CSV reader over a plain or gzip-compressed file.
pub fn get_reader<P: AsRef<Path>>(
    path: P,
    delimiter: u8,
    has_headers: bool,
) -> Result<csv::Reader<Box<dyn Read>>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let raw_reader: Box<dyn Read> = if is_gzipped(path) {
        Box::new(BufReader::with_capacity(
            READ_BUFFER,
            MultiGzDecoder::new(file),
        ))
    } else {
        Box::new(BufReader::with_capacity(READ_BUFFER, file))
    };

    Ok(csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(has_headers)
        .from_reader(raw_reader))
}

/// Build a buffered CSV writer targeting a new (or truncated) file.
pub fn get_writer<P: AsRef<Path>>(
    path: P,
    delimiter: u8,
    write_headers: bool,
) -> Result<csv::Writer<BufWriter<File>>> {
    let writer = BufWriter::new(File::create(path)?);
    Ok(csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(write_headers)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer))
}

/// Locate a named column in a header row.
pub fn column_index(headers: &csv::StringRecord, column: &str, source: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| XenprepError::MissingColumn {
            column: column.to_string(),
            source_name: source.display().to_string(),
        })
}

/// Locate the first of several accepted spellings of a column.
pub fn column_index_any(
    headers: &csv::StringRecord,
    candidates: &[&str],
    source: &Path,
) -> Result<usize> {
    candidates
        .iter()
        .find_map(|name| headers.iter().position(|h| h == *name))
        .ok_or_else(|| XenprepError::MissingColumn {
            column: candidates.join("|"),
            source_name: source.display().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn reads_gzip_and_plain_tables_alike() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let plain = dir.path().join("t.csv");
        let packed = dir.path().join("t.csv.gz");
        let body = "gene,cell\nACTB,1\nGAPDH,2\n";

        std::fs::write(&plain, body)?;
        let mut encoder = GzEncoder::new(File::create(&packed)?, Compression::default());
        encoder.write_all(body.as_bytes())?;
        encoder.finish()?;

        for path in [&plain, &packed] {
            let mut reader = get_reader(path, b',', true)?;
            let headers = reader.headers()?.clone();
            assert_eq!(column_index(&headers, "cell", path)?, 1);
            let rows: Vec<csv::StringRecord> = reader.records().collect::<std::result::Result<_, _>>()?;
            assert_eq!(rows.len(), 2);
            assert_eq!(&rows[1][0], "GAPDH");
        }
        Ok(())
    }

    #[test]
    fn missing_column_is_reported() {
        let headers = csv::StringRecord::from(vec!["gene", "cell"]);
        let err = column_index(&headers, "assignment_confidence", Path::new("seg.csv"))
            .unwrap_err();
        assert!(matches!(err, XenprepError::MissingColumn { .. }));

        let idx = column_index_any(&headers, &["cell_id", "cell"], Path::new("seg.csv")).unwrap();
        assert_eq!(idx, 1);
    }
}
