use serde::{Deserialize, Serialize};

/// One transcribed word with its time span in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

impl WordRecord {
    pub fn new(word: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            word: word.into(),
            start,
            end,
        }
    }
}
