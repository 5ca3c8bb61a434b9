use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::srt_codec::compose;
use crate::subtitle::domain::cue::Cue;
use crate::subtitle::domain::subtitle_writer::SubtitleWriter;

#[derive(Error, Debug)]
pub enum SubtitleWriteError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Writes cues as a UTF-8 SubRip file, replacing any existing file.
#[derive(Debug, Default)]
pub struct SrtFileWriter;

impl SrtFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl SubtitleWriter for SrtFileWriter {
    fn write(&self, path: &Path, cues: &[Cue]) -> Result<(), Box<dyn std::error::Error>> {
        write_text(path, &compose(cues))?;
        log::debug!("Wrote {} cues to {}", cues.len(), path.display());
        Ok(())
    }
}

pub(crate) fn write_text(path: &Path, content: &str) -> Result<(), SubtitleWriteError> {
    fs::write(path, content).map_err(|source| SubtitleWriteError::Write {
        path: path.to_path_buf(),
        source,
    })
}
