use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::subtitle::domain::cue::Cue;
use crate::subtitle::domain::cue_builder::CueBuilder;
use crate::subtitle::domain::sequencer::Sequencer;
use crate::subtitle::domain::subtitle_writer::SubtitleWriter;
use crate::transcript::domain::transcript_source::TranscriptSource;

/// One cue per word record, written through every configured writer.
///
/// Each writer is paired with its output path; typically an SRT file and a
/// plain-text listing.
pub struct WordSubtitlesUseCase {
    source: Box<dyn TranscriptSource>,
    outputs: Vec<(Box<dyn SubtitleWriter>, PathBuf)>,
}

impl WordSubtitlesUseCase {
    pub fn new(source: Box<dyn TranscriptSource>) -> Self {
        Self {
            source,
            outputs: Vec::new(),
        }
    }

    pub fn with_output(mut self, writer: Box<dyn SubtitleWriter>, path: &Path) -> Self {
        self.outputs.push((writer, path.to_path_buf()));
        self
    }

    /// Returns the number of cues written to each output.
    pub fn run(
        &self,
        words_path: &Path,
        logger: &mut dyn PipelineLogger,
    ) -> Result<usize, Box<dyn std::error::Error>> {
        let t0 = Instant::now();
        let records = self.source.read_words(words_path)?;

        let cues: Vec<Cue> = records
            .iter()
            .enumerate()
            .filter_map(|(i, record)| CueBuilder::from_record(i, record))
            .collect();
        let dropped = records.len() - cues.len();
        if dropped > 0 {
            logger.warn(&format!("{dropped} word records had no printable text"));
        }
        let cues = Sequencer::sort_and_reindex(cues);
        debug_assert!(Sequencer::is_sequenced(&cues));

        for (writer, path) in &self.outputs {
            writer.write(path, &cues)?;
            logger.info(&format!("Wrote {} word cues to {}", cues.len(), path.display()));
        }
        logger.timing("word_subtitles", t0.elapsed().as_secs_f64() * 1000.0);

        Ok(cues.len())
    }
}
