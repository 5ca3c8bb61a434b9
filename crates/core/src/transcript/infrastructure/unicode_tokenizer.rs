use unicode_segmentation::UnicodeSegmentation;

use crate::shared::language::Language;
use crate::transcript::domain::grouper::clean_tokens;
use crate::transcript::domain::token_sentence::TokenSentence;
use crate::transcript::domain::tokenizer::Tokenizer;

/// Words that may follow a German ordinal such as `3.` without a new
/// sentence starting.
const ORDINAL_FOLLOWERS: &[&str] = &[
    "januar", "jänner", "februar", "märz", "april", "mai", "juni", "juli", "august", "september",
    "oktober", "november", "dezember", "jahrhundert", "jahrtausend", "mal", "platz", "stock",
    "klasse", "auflage", "kapitel",
];

/// Sentence splitting on Unicode (UAX #29) sentence boundaries, repaired
/// for the abbreviations and dotted ordinals of the selected language.
#[derive(Debug, Default)]
pub struct UnicodeTokenizer;

impl UnicodeTokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Sentence strings, trimmed, in text order.
    pub fn sentences(&self, text: &str, language: &Language) -> Vec<String> {
        let pieces: Vec<&str> = text.split_sentence_bounds().collect();
        let mut sentences = Vec::new();
        let mut pending = String::new();

        for (i, piece) in pieces.iter().enumerate() {
            pending.push_str(piece);
            let next = pieces.get(i + 1).copied();
            if next.is_some_and(|next| continues_after(&pending, next, language)) {
                continue;
            }
            let sentence = pending.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            pending.clear();
        }
        sentences
    }
}

impl Tokenizer for UnicodeTokenizer {
    fn tokenize(&self, text: &str, language: &Language) -> Vec<TokenSentence> {
        self.sentences(text, language)
            .into_iter()
            .filter_map(|sentence| {
                let tokens = clean_tokens(&sentence);
                (!tokens.is_empty()).then(|| TokenSentence::new(sentence, tokens))
            })
            .collect()
    }
}

/// True when the boundary between `pending` and `next` is not a real
/// sentence end.
fn continues_after(pending: &str, next: &str, language: &Language) -> bool {
    let Some(last_word) = pending.split_whitespace().last() else {
        return false;
    };
    let last_word = last_word
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    if language.abbreviations().contains(&last_word.as_str()) {
        return true;
    }
    if language.has_dotted_ordinals() && is_dotted_number(&last_word) {
        return next
            .split_whitespace()
            .next()
            .map(|w| w.trim_end_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
            .is_some_and(|w| ORDINAL_FOLLOWERS.contains(&w.as_str()));
    }
    false
}

fn is_dotted_number(word: &str) -> bool {
    word.strip_suffix('.')
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sentences(text: &str, language: Language) -> Vec<String> {
        UnicodeTokenizer::new().sentences(text, &language)
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let tokenizer = UnicodeTokenizer::new();
        assert!(tokenizer.tokenize("", &Language::German).is_empty());
        assert!(tokenizer.tokenize("   \n ", &Language::German).is_empty());
    }

    #[test]
    fn test_splits_on_sentence_punctuation() {
        assert_eq!(
            sentences("Hallo Welt. Wie geht es dir? Gut!", Language::German),
            vec!["Hallo Welt.", "Wie geht es dir?", "Gut!"]
        );
    }

    #[test]
    fn test_german_abbreviation_does_not_end_sentence() {
        assert_eq!(
            sentences("Wir trafen Dr. Müller im Park. Er lachte.", Language::German),
            vec!["Wir trafen Dr. Müller im Park.", "Er lachte."]
        );
    }

    #[rstest]
    #[case::low_quote(
        "Wir trafen „Dr. Müller“ im Park. Er lachte.",
        "Wir trafen „Dr. Müller“ im Park."
    )]
    #[case::bracket("Siehe (vgl. Kapitel 2) oben. Danke.", "Siehe (vgl. Kapitel 2) oben.")]
    fn test_abbreviation_after_opening_punctuation(#[case] text: &str, #[case] first: &str) {
        let split = sentences(text, Language::German);
        assert_eq!(split.len(), 2);
        assert_eq!(split[0], first);
    }

    #[test]
    fn test_german_ordinal_date_stays_in_sentence() {
        assert_eq!(
            sentences("Am 3. Oktober ist Feiertag. Dann ruhen wir.", Language::German),
            vec!["Am 3. Oktober ist Feiertag.", "Dann ruhen wir."]
        );
    }

    #[test]
    fn test_number_at_sentence_end_still_splits() {
        assert_eq!(
            sentences("Er wurde 30. Dann zog er um.", Language::German),
            vec!["Er wurde 30.", "Dann zog er um."]
        );
    }

    #[test]
    fn test_english_abbreviation() {
        assert_eq!(
            sentences("I met Mr. Smith today. He waved.", Language::English),
            vec!["I met Mr. Smith today.", "He waved."]
        );
    }

    #[test]
    fn test_other_language_uses_plain_boundaries() {
        assert_eq!(
            sentences("Bonjour Mr. Dupont.", Language::Other("fr".to_string())).len(),
            2
        );
    }

    #[test]
    fn test_tokenize_strips_punctuation_and_drops_empty_sentences() {
        let tokenized =
            UnicodeTokenizer::new().tokenize("Hallo, Welt! ... Wie geht’s?", &Language::German);
        let tokens: Vec<Vec<String>> = tokenized.into_iter().map(|s| s.tokens).collect();
        assert_eq!(
            tokens,
            vec![
                vec!["Hallo".to_string(), "Welt".to_string()],
                vec!["Wie".to_string(), "gehts".to_string()],
            ]
        );
    }

    #[test]
    fn test_tokenize_keeps_sentence_text() {
        let tokenized = UnicodeTokenizer::new().tokenize("Hallo Welt wie geht es dir", &Language::German);
        assert_eq!(tokenized.len(), 1);
        assert_eq!(tokenized[0].text, "Hallo Welt wie geht es dir");
        assert_eq!(tokenized[0].len(), 6);
    }

    #[test]
    fn test_is_dotted_number() {
        assert!(is_dotted_number("3."));
        assert!(is_dotted_number("21."));
        assert!(!is_dotted_number("3"));
        assert!(!is_dotted_number("."));
        assert!(!is_dotted_number("a."));
    }
}
