//! Keyword CSV ingestion.

use std::path::{Path, PathBuf};

use ciq_core::entities::{DIFFICULTY_COLUMN, VOLUME_COLUMN};
use ciq_core::{CoreError, KeywordRecord, RawFields, Strictness};
use tracing::{debug, warn};

pub const KEYWORD_COLUMN: &str = "Keyword";
pub const PRIMARY_KEYWORD_COLUMN: &str = "Primary Keyword";
pub const INTENT_COLUMN: &str = "Intent";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column 'Keyword' (or 'Primary Keyword'); found: {found}")]
    MissingColumn { found: String },

    #[error(transparent)]
    Record(#[from] CoreError),
}

/// Text encoding the input was decoded with.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    Utf8,
    Latin1,
}

#[derive(Debug)]
pub struct Ingested {
    pub records: Vec<KeywordRecord>,
    /// Data rows skipped because the keyword cell was empty.
    pub skipped: usize,
    pub encoding: Encoding,
}

/// Read a keyword CSV from disk.
///
/// # Errors
///
/// See [`parse_keywords`].
pub fn read_keywords(path: &Path, strictness: Strictness) -> Result<Ingested, IngestError> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_keywords(&bytes, strictness)
}

/// Parse keyword CSV bytes.
///
/// UTF-8 is tried first; anything else is decoded as ISO-8859-1, which never
/// fails. The keyword column must be present before any row is read.
///
/// # Errors
///
/// [`IngestError::MissingColumn`] when neither keyword column exists,
/// [`IngestError::Record`] for malformed numbers under
/// [`Strictness::Strict`], or [`IngestError::Csv`] for unreadable CSV.
pub fn parse_keywords(bytes: &[u8], strictness: Strictness) -> Result<Ingested, IngestError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let (text, encoding) = decode(bytes);
    if encoding == Encoding::Latin1 {
        warn!("input is not valid UTF-8, decoding as ISO-8859-1");
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let keyword_idx = column(KEYWORD_COLUMN)
        .or_else(|| column(PRIMARY_KEYWORD_COLUMN))
        .ok_or_else(|| IngestError::MissingColumn {
            found: headers.join(", "),
        })?;
    let volume_idx = column(VOLUME_COLUMN);
    let difficulty_idx = column(DIFFICULTY_COLUMN);
    let intent_idx = column(INTENT_COLUMN);
    debug!(?headers, keyword_idx, "resolved input columns");

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (offset, row) in reader.records().enumerate() {
        let row = row?;
        let line = offset + 1;
        let keyword = row.get(keyword_idx).map(str::trim).unwrap_or_default();
        if keyword.is_empty() {
            warn!(row = line, "skipping row with empty keyword");
            skipped += 1;
            continue;
        }

        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(str::to_string);
        let raw = RawFields {
            volume: cell(volume_idx),
            difficulty: cell(difficulty_idx),
            intent: cell(intent_idx),
        };
        records.push(KeywordRecord::from_raw(keyword, raw, strictness, line)?);
    }

    Ok(Ingested {
        records,
        skipped,
        encoding,
    })
}

fn decode(bytes: &[u8]) -> (String, Encoding) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_string(), Encoding::Utf8),
        // ISO-8859-1 maps every byte to the code point of the same value.
        Err(_) => (
            bytes.iter().map(|&b| char::from(b)).collect(),
            Encoding::Latin1,
        ),
    }
}
