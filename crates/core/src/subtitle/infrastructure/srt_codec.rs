//! SubRip text format: `index`, `start --> end`, content lines, blank line.

use thiserror::Error;

use crate::subtitle::domain::cue::Cue;
use crate::subtitle::domain::timestamp::{format_timestamp, parse_timestamp, InvalidTimestamp};

const ARROW: &str = " --> ";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SrtParseError {
    #[error("line {line}: expected a cue index, found {value:?}")]
    InvalidIndex { line: usize, value: String },
    #[error("line {line}: expected `start --> end`, found {value:?}")]
    InvalidTimeRange { line: usize, value: String },
    #[error("line {line}: {source}")]
    InvalidTimestamp {
        line: usize,
        #[source]
        source: InvalidTimestamp,
    },
}

/// Serializes cues as they are; callers sequence them first.
pub fn compose(cues: &[Cue]) -> String {
    let mut out = String::new();
    for cue in cues {
        out.push_str(&format!(
            "{}\n{}{ARROW}{}\n{}\n\n",
            cue.index,
            format_timestamp(cue.start),
            format_timestamp(cue.end),
            cue.text
        ));
    }
    out
}

/// Parses SubRip text. Accepts `\r\n` line endings, a leading byte order
/// mark, extra blank lines between blocks and a missing final blank line.
pub fn parse(content: &str) -> Result<Vec<Cue>, SrtParseError> {
    let content = content.trim_start_matches('\u{feff}');
    let lines: Vec<&str> = content.lines().collect();
    let mut cues = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].trim().is_empty() {
            i += 1;
            continue;
        }

        let index_line = lines[i].trim();
        let index = index_line
            .parse::<usize>()
            .map_err(|_| SrtParseError::InvalidIndex {
                line: i + 1,
                value: index_line.to_string(),
            })?;
        i += 1;

        let range_line = lines.get(i).map(|l| l.trim()).unwrap_or_default();
        let (start, end) = range_line
            .split_once(ARROW.trim())
            .ok_or_else(|| SrtParseError::InvalidTimeRange {
                line: i + 1,
                value: range_line.to_string(),
            })?;
        let timestamp = |value: &str| {
            parse_timestamp(value).map_err(|source| SrtParseError::InvalidTimestamp {
                line: i + 1,
                source,
            })
        };
        let start = timestamp(start)?;
        let end = timestamp(end)?;
        i += 1;

        let mut text = Vec::new();
        while i < lines.len() && !lines[i].trim().is_empty() {
            text.push(lines[i]);
            i += 1;
        }

        cues.push(Cue::new(index, start, end, text.join("\n")));
    }

    Ok(cues)
}
