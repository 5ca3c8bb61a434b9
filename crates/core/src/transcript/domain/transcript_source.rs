use std::path::Path;

use super::word_record::WordRecord;

/// Domain interface for loading the two inputs of an alignment pass.
pub trait TranscriptSource {
    /// Load the plain transcript text.
    fn read_text(&self, path: &Path) -> Result<String, Box<dyn std::error::Error>>;

    /// Load the time-ordered word records produced by the transcription
    /// service.
    fn read_words(&self, path: &Path) -> Result<Vec<WordRecord>, Box<dyn std::error::Error>>;
}
