pub mod aligner;
pub mod alignment_report;
pub mod grouper;
pub mod number_normalizer;
pub mod token_sentence;
pub mod tokenizer;
pub mod transcript_source;
pub mod word_group;
pub mod word_record;
