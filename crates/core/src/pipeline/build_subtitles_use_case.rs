use std::path::Path;
use std::time::Instant;

use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::language::Language;
use crate::subtitle::domain::cue_builder::CueBuilder;
use crate::subtitle::domain::sequencer::Sequencer;
use crate::subtitle::domain::subtitle_writer::SubtitleWriter;
use crate::transcript::domain::aligner::{Aligner, AlignerOptions};
use crate::transcript::domain::alignment_report::AlignmentReport;
use crate::transcript::domain::grouper::Grouper;
use crate::transcript::domain::number_normalizer::NumberNormalizer;
use crate::transcript::domain::tokenizer::Tokenizer;
use crate::transcript::domain::transcript_source::TranscriptSource;

/// Builds grouped subtitles from a transcript text and its word timestamps.
pub struct BuildSubtitlesUseCase {
    source: Box<dyn TranscriptSource>,
    tokenizer: Box<dyn Tokenizer>,
    writer: Box<dyn SubtitleWriter>,
    language: Language,
    options: AlignerOptions,
}

impl BuildSubtitlesUseCase {
    pub fn new(
        source: Box<dyn TranscriptSource>,
        tokenizer: Box<dyn Tokenizer>,
        writer: Box<dyn SubtitleWriter>,
        language: Language,
        options: AlignerOptions,
    ) -> Self {
        Self {
            source,
            tokenizer,
            writer,
            language,
            options,
        }
    }

    pub fn run(
        &self,
        text_path: &Path,
        words_path: &Path,
        output_path: &Path,
        logger: &mut dyn PipelineLogger,
    ) -> Result<AlignmentReport, Box<dyn std::error::Error>> {
        // 1. Read both inputs
        let t0 = Instant::now();
        let text = self.source.read_text(text_path)?;
        let records = self.source.read_words(words_path)?;
        logger.timing("read", elapsed_ms(t0));

        // 2. Sentences, then cue-sized word groups
        let t0 = Instant::now();
        let sentences = self.tokenizer.tokenize(&text, &self.language);
        let groups = Grouper::group_sentences(&sentences);
        logger.timing("group", elapsed_ms(t0));
        logger.info(&format!(
            "{} sentences, {} groups, {} word records",
            sentences.len(),
            groups.len(),
            records.len()
        ));

        // 3. Rejoin split digits before matching
        let normalized = NumberNormalizer::normalize(&records);
        let merged = records.len() - normalized.len();
        if merged > 0 {
            logger.info(&format!("Merged {merged} split digit pairs"));
        }

        // 4. Align groups against the record stream
        let t0 = Instant::now();
        let outcome = Aligner::new(&normalized, self.options).align(&groups, logger);
        logger.timing("align", elapsed_ms(t0));

        // 5. Cues, ordered and numbered from one
        let cues = outcome
            .groups
            .iter()
            .enumerate()
            .filter_map(|(i, group)| CueBuilder::build(i, group))
            .collect();
        let cues = Sequencer::sort_and_reindex(cues);
        debug_assert!(Sequencer::is_sequenced(&cues));

        // 6. Persist
        let t0 = Instant::now();
        self.writer.write(output_path, &cues)?;
        logger.timing("write", elapsed_ms(t0));

        Ok(outcome.report)
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}
