pub mod cue;
pub mod cue_builder;
pub mod sequencer;
pub mod subtitle_writer;
pub mod timestamp;
