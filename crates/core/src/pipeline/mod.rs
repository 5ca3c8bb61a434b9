pub mod build_subtitles_use_case;
pub mod pipeline_logger;
pub mod word_subtitles_use_case;
