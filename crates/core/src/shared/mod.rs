pub mod constants;
pub mod language;
pub mod output_path;
pub mod settings;
