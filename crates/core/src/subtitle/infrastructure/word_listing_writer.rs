use std::path::Path;

use super::srt_file_writer::write_text;
use crate::subtitle::domain::cue::Cue;
use crate::subtitle::domain::subtitle_writer::SubtitleWriter;
use crate::subtitle::domain::timestamp::format_clock;

/// Plain-text listing of cues: index, `HH:MM:SS` start and text per block,
/// blocks separated by an empty line.
#[derive(Debug, Default)]
pub struct WordListingWriter;

impl WordListingWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(cues: &[Cue]) -> String {
        cues.iter()
            .map(|cue| format!("{}\n{}\n{}\n", cue.index, format_clock(cue.start), cue.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl SubtitleWriter for WordListingWriter {
    fn write(&self, path: &Path, cues: &[Cue]) -> Result<(), Box<dyn std::error::Error>> {
        write_text(path, &Self::render(cues))?;
        log::debug!("Wrote word listing of {} entries to {}", cues.len(), path.display());
        Ok(())
    }
}
