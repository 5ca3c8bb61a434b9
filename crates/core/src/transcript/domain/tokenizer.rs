use super::token_sentence::TokenSentence;
use crate::shared::language::Language;

/// Domain interface for splitting transcript text into sentences of tokens.
///
/// Implementations must be pure: the same text and language always yield
/// the same sentences. Sentences without tokens are not returned.
pub trait Tokenizer {
    fn tokenize(&self, text: &str, language: &Language) -> Vec<TokenSentence>;
}
