use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use log::debug;
use wavedesc_core::{WaveError, Waveform, WaveformReport, decode_waveform, make_report};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("WAVEDESC_BUILD_COMMIT"),
    ", ",
    env!("WAVEDESC_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "wavedesc")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder for LeCroy WAVEDESC binary waveform captures (.trc).",
    long_about = None,
    after_help = "Examples:\n  wavedesc info C1--trace--00000.trc\n  wavedesc report C1--trace--00000.trc -o report.json\n  wavedesc dump 'captures/C2*.trc' --stdout --pretty --points"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a human-readable summary of a capture.
    Info {
        /// Path (or single-match glob) to a .trc file
        input: PathBuf,
    },
    /// Decode a capture and write a versioned JSON report.
    #[command(alias = "dump")]
    Report {
        /// Path (or single-match glob) to a .trc file
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Include the full time and voltage arrays
        #[arg(long)]
        points: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Info { input } => cmd_info(input),
        Commands::Report {
            input,
            report,
            stdout,
            pretty,
            compact,
            points,
            quiet,
        } => cmd_report(input, report, stdout, pretty, compact, points, quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

struct Capture {
    path: PathBuf,
    bytes: u64,
    waveform: Waveform,
}

fn cmd_info(input: PathBuf) -> Result<(), CliError> {
    let capture = load_capture(resolve_capture_path(&input)?)?;
    print!("{}", capture.waveform.summary());
    Ok(())
}

fn cmd_report(
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    points: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let style = JsonStyle::from_flags(pretty, compact)?;
    let resolved_input = resolve_capture_path(&input)?;
    let report = match (stdout, report) {
        (true, _) => None,
        (false, Some(path)) => Some(path),
        (false, None) => {
            return Err(CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            ));
        }
    };
    if let Some(report_path) = report.as_deref() {
        ensure_distinct_output(report_path, &resolved_input)?;
    }

    let capture = load_capture(resolved_input)?;
    let rep = make_report(
        &capture.path.display().to_string(),
        capture.bytes,
        &capture.waveform,
        points,
    );
    let json = style.render(&rep)?;

    let Some(report) = report else {
        print!("{}", json);
        return Ok(());
    };
    if let Some(parent) = report.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(&report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;

    if !quiet {
        eprintln!("OK: report written -> {}", report.display());
    }
    Ok(())
}

fn load_capture(path: PathBuf) -> Result<Capture, CliError> {
    let data =
        fs::read(&path).with_context(|| format!("Failed to read input file: {}", path.display()))?;
    debug!("read {} bytes from {}", data.len(), path.display());

    let waveform = decode_waveform(&data).map_err(|err| decode_error(&path, err))?;
    Ok(Capture {
        path,
        bytes: data.len() as u64,
        waveform,
    })
}

fn decode_error(path: &Path, err: WaveError) -> CliError {
    let hint = match err {
        WaveError::Format(_) => "the file is not a WAVEDESC capture or uses an unsupported layout",
        WaveError::OutOfRange { .. } => "the capture looks truncated; re-save it from the scope",
    };
    CliError::new(
        format!("failed to decode {}: {}", path.display(), err),
        Some(hint.to_string()),
    )
}

/// Refuse to overwrite the capture with its own report.
///
/// A report directory that does not exist yet cannot hold the input.
fn ensure_distinct_output(report_path: &Path, input: &Path) -> Result<(), CliError> {
    let parent = match report_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Ok(());
    }
    let Some(file_name) = report_path.file_name() else {
        return Err(CliError::new(
            format!("invalid report path: {}", report_path.display()),
            Some("pass a file path, not a directory".to_string()),
        ));
    };
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let report_abs = fs::canonicalize(parent)
        .with_context(|| format!("Failed to resolve output path: {}", report_path.display()))?
        .join(file_name);
    if report_abs == input_abs {
        return Err(CliError::new(
            format!("report path must differ from input: {}", report_path.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum JsonStyle {
    Compact,
    Pretty,
}

impl JsonStyle {
    fn from_flags(pretty: bool, compact: bool) -> Result<Self, CliError> {
        match (pretty, compact) {
            (true, true) => Err(CliError::new(
                "cannot use --pretty and --compact together",
                Some("choose one output format".to_string()),
            )),
            (true, false) => Ok(JsonStyle::Pretty),
            _ => Ok(JsonStyle::Compact),
        }
    }

    fn render(self, rep: &WaveformReport) -> Result<String, CliError> {
        let json = match self {
            JsonStyle::Compact => serde_json::to_string(rep),
            JsonStyle::Pretty => serde_json::to_string_pretty(rep),
        };
        Ok(json.context("JSON serialization failed")?)
    }
}

/// Expand a single-match glob and check the result is a `.trc` file.
fn resolve_capture_path(input: &Path) -> Result<PathBuf, CliError> {
    let path = if is_glob_pattern(&input.to_string_lossy()) {
        expand_single_match(input)?
    } else {
        input.to_path_buf()
    };

    let hint = || Some("use a .trc waveform file".to_string());
    if !path.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", path.display()),
            hint(),
        ));
    }
    if !path.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", path.display()),
            hint(),
        ));
    }
    let is_trc = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("trc"));
    if !is_trc {
        return Err(CliError::new(
            format!("unsupported input format '{}'", path.display()),
            hint(),
        ));
    }
    Ok(path)
}

fn expand_single_match(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    let bad_pattern = |detail: String| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", detail)),
        )
    };

    let mut files = Vec::new();
    for entry in glob(&pattern).map_err(|err| bad_pattern(err.msg.to_string()))? {
        let path = entry.map_err(|err| bad_pattern(err.to_string()))?;
        if path.is_file() {
            files.push(path);
        }
    }

    match files.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )),
        1 => Ok(files.remove(0)),
        n => {
            let shown: Vec<String> = files.iter().take(3).map(|p| p.display().to_string()).collect();
            let ellipsis = if n > shown.len() { ", ..." } else { "" };
            Err(CliError::new(
                format!(
                    "multiple files match pattern '{}' ({} matches: {}{})",
                    pattern,
                    n,
                    shown.join(", "),
                    ellipsis
                ),
                Some("pass a single capture file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}
