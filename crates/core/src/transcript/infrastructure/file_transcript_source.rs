use std::fs;
use std::path::Path;

use serde_json::Value;

use super::source_error::SourceError;
use crate::shared::constants::JSON_EXTENSION;
use crate::transcript::domain::transcript_source::TranscriptSource;
use crate::transcript::domain::word_record::WordRecord;

/// Reads transcripts from local files.
///
/// Text files with a `.json` extension are parsed: a JSON string is used
/// as-is, an object contributes its `"text"` field and an array of strings
/// is joined with spaces. Word files hold either an array of
/// `{word, start, end}` objects or an object with such a `"words"` array.
#[derive(Debug, Default)]
pub struct FileTranscriptSource;

impl FileTranscriptSource {
    pub fn new() -> Self {
        Self
    }

    pub fn load_text(path: &Path) -> Result<String, SourceError> {
        let content = read_to_string(path)?;
        if !is_json(path) {
            return Ok(content);
        }
        match parse_json(path, &content)? {
            Value::String(text) => Ok(text),
            Value::Object(mut map) => match map.remove("text") {
                Some(Value::String(text)) => Ok(text),
                _ => Err(unsupported(path, "object without a \"text\" string")),
            },
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    _ => Err(unsupported(path, "array entries must be strings")),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(|parts| parts.join(" ")),
            _ => Err(unsupported(path, "expected a string, object or array")),
        }
    }

    pub fn load_words(path: &Path) -> Result<Vec<WordRecord>, SourceError> {
        let content = read_to_string(path)?;
        let words = match parse_json(path, &content)? {
            Value::Object(mut map) => map
                .remove("words")
                .ok_or_else(|| unsupported(path, "object without a \"words\" array"))?,
            array @ Value::Array(_) => array,
            _ => return Err(unsupported(path, "expected an array of word records")),
        };
        let records: Vec<WordRecord> =
            serde_json::from_value(words).map_err(|e| SourceError::Json {
                path: path.to_path_buf(),
                source: e,
            })?;
        validate(&records)?;
        log::debug!("Loaded {} word records from {}", records.len(), path.display());
        Ok(records)
    }
}

impl TranscriptSource for FileTranscriptSource {
    fn read_text(&self, path: &Path) -> Result<String, Box<dyn std::error::Error>> {
        Ok(Self::load_text(path)?)
    }

    fn read_words(&self, path: &Path) -> Result<Vec<WordRecord>, Box<dyn std::error::Error>> {
        Ok(Self::load_words(path)?)
    }
}

fn read_to_string(path: &Path) -> Result<String, SourceError> {
    if !path.exists() {
        return Err(SourceError::MissingFile(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|e| SourceError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

fn parse_json(path: &Path, content: &str) -> Result<Value, SourceError> {
    serde_json::from_str(content).map_err(|e| SourceError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(JSON_EXTENSION))
}

fn unsupported(path: &Path, reason: &str) -> SourceError {
    SourceError::UnsupportedShape {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn validate(records: &[WordRecord]) -> Result<(), SourceError> {
    for (index, record) in records.iter().enumerate() {
        if !record.start.is_finite() || !record.end.is_finite() {
            return Err(SourceError::InvalidRecord {
                index,
                reason: "timestamps must be finite".to_string(),
            });
        }
        if record.start < 0.0 || record.end < 0.0 {
            return Err(SourceError::InvalidRecord {
                index,
                reason: format!("negative timestamp in {:?}", record.word),
            });
        }
    }
    Ok(())
}
