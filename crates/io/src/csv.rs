// CSV tables: corpus join, annotation sheet, error subset

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use sentival_recon::model::columns;
use sentival_recon::{ErrorRecord, Post, SampleRecord, Sentiment, ValidationError};

use crate::encoding::TextEncoding;
use crate::error::IoError;
use crate::fs::write_atomic;

/// Encoding and delimiter shared by every table of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvFormat {
    pub encoding: TextEncoding,
    pub delimiter: u8,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::default(),
            delimiter: b',',
        }
    }
}

impl CsvFormat {
    pub fn new(encoding_label: &str, delimiter: char) -> Result<Self, IoError> {
        let encoding = TextEncoding::from_label(encoding_label)?;
        if !delimiter.is_ascii() {
            return Err(IoError::Encoding(format!(
                "delimiter '{delimiter}' is not a single-byte character"
            )));
        }
        Ok(Self {
            encoding,
            delimiter: delimiter as u8,
        })
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// A decoded table with its header row.
struct Table {
    path: PathBuf,
    headers: Vec<String>,
    records: Vec<csv::StringRecord>,
}

impl Table {
    fn read(path: &Path, fmt: &CsvFormat) -> Result<Self, IoError> {
        let content = fmt.encoding.read_file(path)?;
        let csv_err = |e: csv::Error| IoError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        // Flexible: short rows (e.g. a trailing empty manual label) yield missing fields
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(fmt.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_err)?;

        log::debug!("read {} rows from {}", records.len(), path.display());
        Ok(Self {
            path: path.to_path_buf(),
            headers,
            records,
        })
    }

    fn optional_column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    fn column(&self, name: &str) -> Result<usize, IoError> {
        self.optional_column(name).ok_or_else(|| IoError::MissingColumn {
            path: self.path.clone(),
            column: name.to_string(),
        })
    }
}

fn field(record: &csv::StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

/// Load the classified corpus: feature table joined with the text table on
/// `id_publicacion`. Feature rows without a text, or whose text is blank,
/// are dropped (inner join).
///
/// The first feature row and the first text per id win; later duplicates are
/// skipped with a warning. Rows with an empty `sentimiento` are skipped; any
/// other value outside POS/NEU/NEG aborts the load.
pub fn load_corpus(features: &Path, texts: &Path, fmt: &CsvFormat) -> Result<Vec<Post>, IoError> {
    let feature_table = Table::read(features, fmt)?;
    let text_table = Table::read(texts, fmt)?;

    let f_id = feature_table.column(columns::ID)?;
    let f_participant = feature_table.column(columns::PARTICIPANT)?;
    let f_label = feature_table.column(columns::AUTOMATED)?;
    let t_id = text_table.column(columns::ID)?;
    let t_text = text_table.column(columns::TEXT)?;

    let mut text_by_id: HashMap<&str, &str> = HashMap::new();
    let mut duplicate_texts = 0usize;
    for record in &text_table.records {
        let id = field(record, t_id).trim();
        if id.is_empty() {
            continue;
        }
        if text_by_id.contains_key(id) {
            duplicate_texts += 1;
        } else {
            text_by_id.insert(id, field(record, t_text));
        }
    }
    if duplicate_texts > 0 {
        log::warn!("{duplicate_texts} duplicate ids in {}, first text kept", texts.display());
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut posts = Vec::new();
    let mut without_text = 0usize;
    let mut blank_text = 0usize;
    let mut unlabelled = 0usize;
    let mut duplicate_rows = 0usize;

    for record in &feature_table.records {
        let id = field(record, f_id).trim();
        if id.is_empty() {
            continue;
        }
        let Some(text) = text_by_id.get(id) else {
            without_text += 1;
            continue;
        };
        if !seen.insert(id) {
            duplicate_rows += 1;
            continue;
        }
        if text.trim().is_empty() {
            blank_text += 1;
            continue;
        }

        let raw_label = field(record, f_label);
        if raw_label.trim().is_empty() {
            unlabelled += 1;
            continue;
        }
        let sentiment = Sentiment::parse_label(raw_label).ok_or_else(|| {
            IoError::Validation(ValidationError::UnknownLabel {
                record_id: id.to_string(),
                column: columns::AUTOMATED,
                value: raw_label.to_string(),
            })
        })?;

        posts.push(Post {
            id: id.to_string(),
            participant_id: field(record, f_participant).trim().to_string(),
            text: text.to_string(),
            sentiment,
        });
    }

    if without_text > 0 {
        log::info!("{without_text} feature rows have no matching text, skipped");
    }
    if blank_text > 0 {
        log::warn!("{blank_text} posts with an empty text, skipped");
    }
    if duplicate_rows > 0 {
        log::warn!("{duplicate_rows} duplicate ids in {}, first row kept", features.display());
    }
    if unlabelled > 0 {
        log::warn!("{unlabelled} rows without a sentiment label, skipped");
    }
    log::info!("corpus: {} posts", posts.len());

    Ok(posts)
}

/// Load an annotated sample. `id_participante` is optional; an empty
/// `sentimiento_manual` cell becomes `None`.
pub fn load_annotated(path: &Path, fmt: &CsvFormat) -> Result<Vec<SampleRecord>, IoError> {
    let table = Table::read(path, fmt)?;

    let id = table.column(columns::ID)?;
    let text = table.column(columns::TEXT)?;
    let automated = table.column(columns::AUTOMATED)?;
    let manual = table.column(columns::MANUAL)?;
    let participant = table.optional_column(columns::PARTICIPANT);

    let rows = table
        .records
        .iter()
        .map(|record| {
            let manual_raw = field(record, manual);
            SampleRecord {
                id: field(record, id).to_string(),
                participant_id: participant.map(|i| field(record, i).to_string()).unwrap_or_default(),
                text: field(record, text).to_string(),
                automated: field(record, automated).to_string(),
                manual: (!manual_raw.is_empty()).then(|| manual_raw.to_string()),
            }
        })
        .collect();

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

fn encode_table<'a, I>(path: &Path, header: &[&str], rows: I, fmt: &CsvFormat) -> Result<Vec<u8>, IoError>
where
    I: IntoIterator<Item = Vec<&'a str>>,
{
    let write_err = |message: String| IoError::Write {
        path: path.to_path_buf(),
        message,
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(fmt.delimiter)
        .from_writer(Vec::new());

    writer.write_record(header).map_err(|e| write_err(e.to_string()))?;
    for row in rows {
        writer.write_record(&row).map_err(|e| write_err(e.to_string()))?;
    }
    let bytes = writer.into_inner().map_err(|e| write_err(e.to_string()))?;

    // csv writes UTF-8; re-encode into the configured charset
    let text = String::from_utf8(bytes).map_err(|e| write_err(e.to_string()))?;
    Ok(fmt.encoding.encode(&text))
}

/// Write the annotation sheet. Overwrites any previous file at `path`.
pub fn write_sample(path: &Path, rows: &[SampleRecord], fmt: &CsvFormat) -> Result<(), IoError> {
    let bytes = encode_table(
        path,
        &columns::SAMPLE,
        rows.iter().map(|r| {
            vec![
                r.id.as_str(),
                r.participant_id.as_str(),
                r.text.as_str(),
                r.automated.as_str(),
                r.manual.as_deref().unwrap_or(""),
            ]
        }),
        fmt,
    )?;
    write_atomic(path, &bytes)
}

/// Write the error subset with normalized labels.
pub fn write_errors(path: &Path, errors: &[ErrorRecord], fmt: &CsvFormat) -> Result<(), IoError> {
    let bytes = encode_table(
        path,
        &columns::ERRORS,
        errors.iter().map(|e| {
            vec![
                e.id.as_str(),
                e.text.as_str(),
                e.automated.as_str(),
                e.manual.as_str(),
            ]
        }),
        fmt,
    )?;
    write_atomic(path, &bytes)
}
