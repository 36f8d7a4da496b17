use crate::domain::model::{InputRow, OutputRecord, OUTPUT_HEADERS};
use crate::utils::error::{EtlError, Result};

const UTF8_BOM: char = '\u{feff}';

/// A fully parsed quote export.
#[derive(Debug, Clone, Default)]
pub struct ParsedExport {
    pub headers: Vec<String>,
    pub rows: Vec<InputRow>,
}

/// Decodes and parses the whole export in one go.
///
/// Ragged rows are accepted: missing trailing cells are simply absent from the
/// row, and cells beyond the header width are ignored.
pub fn parse_export(bytes: &[u8]) -> Result<ParsedExport> {
    let decoded = String::from_utf8(bytes.to_vec())?;
    let text = decoded.strip_prefix(UTF8_BOM).unwrap_or(decoded.as_str());

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.as_str(), value))
                .collect(),
        );
    }

    Ok(ParsedExport { headers, rows })
}

/// Serializes records under the fixed Previous Service header.
pub fn write_records(records: &[OutputRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(OUTPUT_HEADERS)?;
    for record in records {
        writer.write_record(record.fields())?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}
