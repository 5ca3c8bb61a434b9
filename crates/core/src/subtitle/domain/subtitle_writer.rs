use std::path::Path;

use super::cue::Cue;

/// Domain interface for persisting a finished cue sequence.
pub trait SubtitleWriter {
    fn write(&self, path: &Path, cues: &[Cue]) -> Result<(), Box<dyn std::error::Error>>;
}
