use std::fmt;

/// Language selecting sentence segmentation rules.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    German,
    English,
    /// Any other tag: plain Unicode sentence boundaries, no abbreviation list.
    Other(String),
}

const GERMAN_ABBREVIATIONS: &[&str] = &[
    "z.b.", "bzw.", "usw.", "etc.", "dr.", "prof.", "nr.", "ca.", "d.h.", "u.a.", "z.t.", "vgl.",
    "evtl.", "ggf.", "inkl.", "bzgl.", "hr.", "fr.", "str.", "st.", "mio.", "mrd.", "jh.", "s.",
];

const ENGLISH_ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "st.", "jr.", "sr.", "vs.", "e.g.", "i.e.", "etc.",
    "approx.", "no.", "inc.", "ltd.", "co.",
];

impl Language {
    /// Parses a language tag (`"german"`, `"de"`, `"English"`, ...).
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "german" | "de" | "deu" | "ger" | "deutsch" => Language::German,
            "english" | "en" | "eng" => Language::English,
            other => Language::Other(other.to_string()),
        }
    }

    /// Lowercased abbreviations (with trailing dot) that never end a sentence.
    pub fn abbreviations(&self) -> &'static [&'static str] {
        match self {
            Language::German => GERMAN_ABBREVIATIONS,
            Language::English => ENGLISH_ABBREVIATIONS,
            Language::Other(_) => &[],
        }
    }

    /// German writes ordinals as `3.`; a dotted number does not end a sentence.
    pub fn has_dotted_ordinals(&self) -> bool {
        matches!(self, Language::German)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::German => write!(f, "german"),
            Language::English => write!(f, "english"),
            Language::Other(tag) => write!(f, "{tag}"),
        }
    }
}
