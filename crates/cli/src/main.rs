use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use wordwise_core::pipeline::build_subtitles_use_case::BuildSubtitlesUseCase;
use wordwise_core::pipeline::pipeline_logger::{PipelineLogger, StdoutPipelineLogger};
use wordwise_core::pipeline::word_subtitles_use_case::WordSubtitlesUseCase;
use wordwise_core::shared::constants::{
    LISTING_EXTENSION, LISTING_MARKER, SRT_EXTENSION, WORDWISE_MARKER,
};
use wordwise_core::shared::output_path::{generated_file_name, sibling_with_marker};
use wordwise_core::shared::settings::Settings;
use wordwise_core::subtitle::infrastructure::srt_file_writer::SrtFileWriter;
use wordwise_core::subtitle::infrastructure::word_listing_writer::WordListingWriter;
use wordwise_core::transcript::domain::aligner::MissPolicy;
use wordwise_core::transcript::infrastructure::file_transcript_source::FileTranscriptSource;
use wordwise_core::transcript::infrastructure::unicode_tokenizer::UnicodeTokenizer;

/// Build grouped subtitles from a transcript and its word-level timestamps.
#[derive(Parser)]
#[command(name = "wordwise")]
struct Cli {
    /// Transcript text file (.txt, or .json with a "text" field).
    text_file: Option<PathBuf>,

    /// Word timestamps JSON (array of {word, start, end} or {"words": [...]}).
    json_file: Option<PathBuf>,

    /// Sentence segmentation language (german, english, ...).
    #[arg(long)]
    language: Option<String>,

    /// Marker appended to the output file stem.
    #[arg(long)]
    marker: Option<String>,

    /// What to do when a group matches no timestamp: skip or stop.
    #[arg(long)]
    miss_policy: Option<String>,

    /// Records searched ahead per token (0 = whole remaining stream).
    #[arg(long)]
    lookahead: Option<usize>,

    /// Also write one cue per word to <stem>_wordwise.srt.
    #[arg(long)]
    word_srt: bool,

    /// Also write a plain-text word listing to <stem>_srt_as_text.txt.
    #[arg(long)]
    word_listing: bool,

    /// Settings JSON to use instead of the per-user settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Store the effective settings (file plus flags) for later runs.
    #[arg(long)]
    save_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let settings = resolve_settings(&cli)?;
    if cli.save_config {
        persist_settings(&cli, &settings)?;
    }
    let json_file = match cli.json_file {
        Some(path) => path,
        None => prompt_path("Path to the word timestamps JSON: ")?,
    };
    let text_file = match cli.text_file {
        Some(path) => path,
        None => prompt_path("Path to the transcript text: ")?,
    };
    for path in [&text_file, &json_file] {
        if !path.exists() {
            return Err(format!("Input file not found: {}", path.display()).into());
        }
    }

    let mut logger = StdoutPipelineLogger::default();
    run_grouped(&text_file, &json_file, &settings, &mut logger)?;
    if settings.word_srt || settings.word_listing {
        run_word_outputs(&json_file, &settings, &mut logger)?;
    }
    logger.summary();

    Ok(())
}

fn run_grouped(
    text_file: &Path,
    json_file: &Path,
    settings: &Settings,
    logger: &mut StdoutPipelineLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = sibling_with_marker(text_file, &settings.marker, SRT_EXTENSION);
    log::info!(
        "Aligning {} against {} ({}, {:?}, lookahead {})",
        text_file.display(),
        json_file.display(),
        settings.language(),
        settings.miss_policy,
        describe_lookahead(settings.lookahead)
    );

    let use_case = BuildSubtitlesUseCase::new(
        Box::new(FileTranscriptSource::new()),
        Box::new(UnicodeTokenizer::new()),
        Box::new(SrtFileWriter::new()),
        settings.language(),
        settings.aligner_options(),
    );
    let report = use_case.run(text_file, json_file, &output, logger)?;

    if report.is_clean() {
        log::info!("{report}");
    } else {
        log::warn!("{report}");
    }
    log::info!("Output written to {}", output.display());
    Ok(())
}

fn run_word_outputs(
    json_file: &Path,
    settings: &Settings,
    logger: &mut StdoutPipelineLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut use_case = WordSubtitlesUseCase::new(Box::new(FileTranscriptSource::new()));
    if settings.word_srt {
        let path = generated_file_name(json_file, WORDWISE_MARKER, SRT_EXTENSION);
        use_case = use_case.with_output(Box::new(SrtFileWriter::new()), &path);
    }
    if settings.word_listing {
        let path = generated_file_name(json_file, LISTING_MARKER, LISTING_EXTENSION);
        use_case = use_case.with_output(Box::new(WordListingWriter::new()), &path);
    }
    use_case.run(json_file, logger)?;
    Ok(())
}

/// Settings file (explicit `--config` or per-user) overlaid with CLI flags.
fn resolve_settings(cli: &Cli) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::load(),
    };
    if let Some(language) = &cli.language {
        settings.language = language.clone();
    }
    if let Some(marker) = &cli.marker {
        settings.marker = marker.clone();
    }
    if let Some(policy) = &cli.miss_policy {
        settings.miss_policy = parse_miss_policy(policy)?;
    }
    if let Some(lookahead) = cli.lookahead {
        settings.lookahead = lookahead;
    }
    settings.word_srt |= cli.word_srt;
    settings.word_listing |= cli.word_listing;
    Ok(settings)
}

/// Writes back to `--config` when given, otherwise to the per-user file.
fn persist_settings(cli: &Cli, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.config {
        Some(path) => settings.save_to(path)?,
        None => settings.save(),
    }
    log::info!("Settings saved");
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(policy) = &cli.miss_policy {
        parse_miss_policy(policy)?;
    }
    if let Some(marker) = &cli.marker {
        if marker.contains(['/', '\\']) {
            return Err(format!("Marker must not contain path separators, got {marker:?}").into());
        }
    }
    if cli.language.as_deref().is_some_and(|l| l.trim().is_empty()) {
        return Err("Language must not be empty".into());
    }
    if let Some(config) = &cli.config {
        if !config.exists() {
            return Err(format!("Settings file not found: {}", config.display()).into());
        }
    }
    Ok(())
}

fn parse_miss_policy(value: &str) -> Result<MissPolicy, Box<dyn std::error::Error>> {
    match value {
        "skip" => Ok(MissPolicy::Skip),
        "stop" => Ok(MissPolicy::Stop),
        other => Err(format!("Miss policy must be 'skip' or 'stop', got '{other}'").into()),
    }
}

fn describe_lookahead(lookahead: usize) -> String {
    if lookahead == 0 {
        "unbounded".to_string()
    } else {
        lookahead.to_string()
    }
}

fn prompt_path(question: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    print!("{question}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().trim_matches(|c| c == '"' || c == '\'');
    if answer.is_empty() {
        return Err("No path given".into());
    }
    Ok(PathBuf::from(answer))
}
