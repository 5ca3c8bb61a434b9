pub mod file_transcript_source;
pub mod source_error;
pub mod unicode_tokenizer;
