/// A short run of tokens that becomes the text of one cue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordGroup {
    tokens: Vec<String>,
}

impl WordGroup {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }
}

impl<S: Into<String>> FromIterator<S> for WordGroup {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
