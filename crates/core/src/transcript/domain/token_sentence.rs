/// One sentence of the transcript text and its cleaned word tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenSentence {
    pub text: String,
    pub tokens: Vec<String>,
}

impl TokenSentence {
    pub fn new(text: impl Into<String>, tokens: Vec<String>) -> Self {
        Self {
            text: text.into(),
            tokens,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
