pub mod srt_codec;
pub mod srt_file_writer;
pub mod word_listing_writer;
