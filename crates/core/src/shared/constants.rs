pub const DEFAULT_LANGUAGE: &str = "german";

/// Marker appended to the transcript file name for the grouped subtitle file.
pub const DEFAULT_MARKER: &str = "more_words";

/// Marker for the one-cue-per-word subtitle file.
pub const WORDWISE_MARKER: &str = "wordwise";

/// Marker for the plain-text word listing.
pub const LISTING_MARKER: &str = "srt_as_text";

pub const SRT_EXTENSION: &str = ".srt";
pub const LISTING_EXTENSION: &str = ".txt";

/// Records searched past the cursor when matching a token (~5 s of speech).
pub const DEFAULT_LOOKAHEAD: usize = 16;

/// Characters stripped from sentences before grouping.
pub const PUNCTUATION_CLASS: &[char] = &[
    '%', '$', '!', '?', '.', ',', ';', ':', '’', '‘', '“', '”', '„', '"', '(', ')', '…', '—', '–',
    '-',
];

pub const JSON_EXTENSION: &str = "json";
