use std::sync::OnceLock;

use regex::Regex;

use super::cue::Cue;
use super::timestamp::seconds_to_duration;
use crate::transcript::domain::aligner::AlignedGroup;
use crate::transcript::domain::word_record::WordRecord;

fn control_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\p{Cc}&&[^\n\t]]").expect("control pattern is valid"))
}

fn blank_lines() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n[ \t]*(?:\n[ \t]*)+").expect("blank line pattern is valid"))
}

/// Turns aligned groups and raw word records into cues.
pub struct CueBuilder;

impl CueBuilder {
    /// Makes `content` safe for a cue block: control characters are dropped,
    /// blank lines (which would end the block) collapse to a single line
    /// break and surrounding whitespace is trimmed.
    pub fn legalize(content: &str) -> String {
        let without_controls = control_chars().replace_all(content, "");
        let single_spaced = blank_lines().replace_all(&without_controls, "\n");
        single_spaced.trim().to_string()
    }

    /// Returns `None` when nothing printable is left of the group's text.
    pub fn build(index: usize, group: &AlignedGroup) -> Option<Cue> {
        Self::cue(index, group.start, group.end, &group.text)
    }

    /// One cue for a single word record.
    pub fn from_record(index: usize, record: &WordRecord) -> Option<Cue> {
        Self::cue(index, record.start, record.end, &record.word)
    }

    fn cue(index: usize, start: f64, end: f64, text: &str) -> Option<Cue> {
        let text = Self::legalize(text);
        if text.is_empty() {
            return None;
        }
        let start = seconds_to_duration(start);
        let end = seconds_to_duration(end).max(start);
        Some(Cue::new(index, start, end, text))
    }
}
