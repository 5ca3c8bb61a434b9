use super::token_sentence::TokenSentence;
use super::word_group::WordGroup;
use crate::shared::constants::PUNCTUATION_CLASS;

pub const EVEN_GROUP_SIZE: usize = 4;
pub const ODD_GROUP_SIZE: usize = 3;

/// Removes the punctuation class from `sentence` and splits on whitespace.
pub fn clean_tokens(sentence: &str) -> Vec<String> {
    sentence
        .replace(PUNCTUATION_CLASS, "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Cuts sentences into cue-sized word runs.
///
/// Even token counts are cut into runs of 4, odd counts into runs of 3; the
/// final run of a sentence may be shorter. Runs never cross a sentence.
pub struct Grouper;

impl Grouper {
    pub fn group_size(token_count: usize) -> usize {
        if token_count % 2 == 0 {
            EVEN_GROUP_SIZE
        } else {
            ODD_GROUP_SIZE
        }
    }

    pub fn split(tokens: &[String]) -> Vec<WordGroup> {
        if tokens.is_empty() {
            return Vec::new();
        }
        tokens
            .chunks(Self::group_size(tokens.len()))
            .map(|chunk| WordGroup::new(chunk.to_vec()))
            .collect()
    }

    /// Groups every sentence and flattens the result in sentence order.
    pub fn group_sentences(sentences: &[TokenSentence]) -> Vec<WordGroup> {
        sentences
            .iter()
            .flat_map(|sentence| Self::split(&sentence.tokens))
            .collect()
    }
}
