use std::sync::OnceLock;

use regex::Regex;

use super::word_record::WordRecord;

fn single_digit() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d$").expect("single digit pattern is valid"))
}

/// Repairs numbers that a transcription service split into one record per
/// digit.
///
/// A single-digit record immediately followed by another single-digit record
/// is merged into one record `"d1,d2"` spanning both; scanning resumes after
/// the pair, so `1 2 3` becomes `1,2` and `3`. Running it again changes
/// nothing because merged words are no longer single digits.
pub struct NumberNormalizer;

impl NumberNormalizer {
    pub fn is_single_digit(word: &str) -> bool {
        single_digit().is_match(word)
    }

    pub fn normalize(records: &[WordRecord]) -> Vec<WordRecord> {
        let mut out = Vec::with_capacity(records.len());
        let mut i = 0;
        while i < records.len() {
            let current = &records[i];
            match records.get(i + 1) {
                Some(next)
                    if Self::is_single_digit(&current.word) && Self::is_single_digit(&next.word) =>
                {
                    out.push(WordRecord {
                        word: format!("{},{}", current.word, next.word),
                        start: current.start,
                        end: next.end,
                    });
                    i += 2;
                }
                _ => {
                    out.push(current.clone());
                    i += 1;
                }
            }
        }
        out
    }
}
