//! CLI tool for converting retail transaction files between the new
//! (delimited) and old (fixed-width) SOLS formats.
//!
//! # Usage
//!
//! ```bash
//! # Convert one new-format file to the old format
//! converter new2old --output_dir=/srv/out/ --parse_type=VEN /srv/in/Sales_20220301.csv
//!
//! # Convert every file in a directory
//! converter new2old --parse_type=TRF /srv/in/
//!
//! # Convert files matching a pattern, back to the new format
//! converter old2new --parse_type=VEN '/srv/in/Ven_*.dat' JAC
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use parser::{convert, format::Format, record::RecordKind};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Convert retail transaction files between SOLS formats.
///
/// Each input file is read whole, converted line by line, and written
/// next to it (or into `--output_dir`) under a derived name.
#[derive(Parser, Debug)]
#[command(name = "converter")]
#[command(version, about)]
struct Cli {
    /// Enable DEBUG logging verbosity.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert file(s) from the new (delimited) format to the old one.
    New2old {
        /// Directory where to output converted files. If omitted, outputs
        /// in the original directory.
        #[arg(long = "output_dir")]
        output_dir: Option<PathBuf>,

        /// The record kind to convert.
        #[arg(long = "parse_type", value_enum)]
        parse_type: KindArg,

        /// File, directory or `*` pattern to convert.
        input_files: String,
    },
    /// Convert file(s) from the old (fixed-width) format to the new one.
    Old2new {
        /// Directory where to output converted files. If omitted, outputs
        /// in the original directory.
        #[arg(long = "output_dir")]
        output_dir: Option<PathBuf>,

        /// The record kind to convert.
        #[arg(long = "parse_type", value_enum)]
        parse_type: KindArg,

        /// File, directory or `*` pattern to convert.
        input_files: String,

        /// Brand code used to prefix store codes (the old format does not
        /// carry it).
        brand_code: String,
    },
}

/// Record kinds accepted on the command line (canonical SOLS codes).
#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    /// Sales records.
    #[value(name = "VEN")]
    Ven,
    /// Store traffic counters.
    #[value(name = "TRF")]
    Trf,
    /// Inter-store transfers.
    #[value(name = "TRS")]
    Trs,
    /// Delivery validations.
    #[value(name = "VAL")]
    Val,
}

impl From<KindArg> for RecordKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Ven => Self::Sales,
            KindArg::Trf => Self::Traffic,
            KindArg::Trs => Self::Transfer,
            KindArg::Val => Self::Validation,
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (output_dir, kind, input, brand) = match cli.command {
        Command::New2old { output_dir, parse_type, input_files } => {
            (output_dir, parse_type.into(), input_files, None)
        }
        Command::Old2new { output_dir, parse_type, input_files, brand_code } => {
            (output_dir, parse_type.into(), input_files, Some(brand_code))
        }
    };

    let input = strip_quotes(&input);
    debug!("input_files = {input}");

    let files = discover_files(input)?;
    if files.is_empty() {
        bail!("No file found in input {input}");
    }

    let output_dir = resolve_output_dir(output_dir, &files)?;
    debug!("output directory = {}", output_dir.display());
    debug!("parse_type = {kind}");
    if let Some(brand) = &brand {
        debug!("brand_code = {brand}");
    }

    for file in &files {
        handle(&output_dir, file, kind, brand.as_deref())
            .with_context(|| format!("Failed to convert {}", file.display()))?;
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = if verbose > 0 { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    if verbose > 0 {
        debug!("DEBUG MODE [ON] don't forget to turn it off in production environment");
    }
}

/// Converts a single file and writes the result under its derived name.
fn handle(output_dir: &Path, file: &Path, kind: RecordKind, brand: Option<&str>) -> Result<()> {
    info!("handling file {}", file.display());
    info!("Running file conversion ...");

    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read input file: {}", file.display()))?;

    // The brand is only supplied for old->new conversions
    let (content, source_format) = match brand {
        Some(brand) => (convert::old_to_new(kind, &text, brand)?, Format::Old),
        None => (convert::new_to_old(kind, &text)?, Format::New),
    };
    debug!("content generated: {} bytes", content.len());

    let file_name = file
        .file_name()
        .with_context(|| format!("Input path has no file name: {}", file.display()))?
        .to_string_lossy();
    let output_name = output_file_name(&file_name, kind, source_format)?;
    debug!("generating new file: {output_name}");

    let output_path = output_dir.join(output_name);
    fs::write(&output_path, content)
        .with_context(|| format!("Failed to create output file: {}", output_path.display()))?;
    info!("File output: {}", output_path.display());

    Ok(())
}

/// Derives the output file name from the source one.
///
/// The record kind's marker (`Sales_` for new-format sources, `Ven_` for
/// old-format ones, last occurrence) locates the suffix in the source
/// name; the output is `<marker>_<suffix>_<timestamp>.<ext>` with the
/// opposite format's marker and extension.
///
/// ```text
/// 20220101120245_Sales_20012022_1234.csv -> Ven_20012022_1234_<ts>.dat
/// 20220101120245_Ven_20012022_1234.dat   -> Sales_20012022_1234_<ts>.csv
/// ```
fn output_file_name(file_name: &str, kind: RecordKind, source: Format) -> Result<String> {
    let (source_label, output_label) = match source {
        Format::New => (kind.new_label(), kind.old_prefix()),
        Format::Old => (kind.old_prefix(), kind.new_label()),
    };
    let output_ext = match source {
        Format::New => Format::Old.extension(),
        Format::Old => Format::New.extension(),
    };

    let marker = format!("{source_label}_");
    let start = file_name
        .rfind(&marker)
        .with_context(|| format!("File name '{file_name}' does not contain '{marker}'"))?;
    let suffix = file_name[start + marker.len()..]
        .strip_suffix(&format!(".{}", source.extension()))
        .with_context(|| {
            format!("File name '{file_name}' does not end with '.{}'", source.extension())
        })?;

    let timestamp = Local::now().format("%Y%m%d%H%M%S%6f");
    Ok(format!("{output_label}_{suffix}_{timestamp}.{output_ext}"))
}

/// Resolves the output directory.
///
/// A requested directory must exist; a requested path that is a file
/// falls back to its parent with a warning. With no request at all the
/// output lands next to the first input file.
fn resolve_output_dir(requested: Option<PathBuf>, files: &[PathBuf]) -> Result<PathBuf> {
    if let Some(dir) = requested {
        if !dir.exists() {
            bail!("{} does not exist", dir.display());
        }
        if dir.is_file() {
            let parent = dir.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            warn!("{} is a file, using {} instead", dir.display(), parent.display());
            return Ok(parent);
        }
        return Ok(dir);
    }

    let parent = files[0]
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    info!("output directory is None, using {} instead", parent.display());
    Ok(parent)
}

/// Strips surrounding single quotes a shell may have left in place.
fn strip_quotes(input: &str) -> &str {
    input.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')).unwrap_or(input)
}

/// Resolves the CLI input into a list of files.
///
/// The input may be a single file, a directory (every plain file inside)
/// or a `*` pattern matched against file names in its parent directory.
fn discover_files(input: &str) -> Result<Vec<PathBuf>> {
    if input.contains('*') {
        let path = Path::new(input);
        let pattern = path
            .file_name()
            .with_context(|| format!("Pattern '{input}' has no file name part"))?
            .to_string_lossy()
            .into_owned();
        let dir = match path.parent() {
            Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
            Some(parent) => parent,
            None => Path::new("."),
        };
        debug!("input_files is a pattern: {pattern} in {}", dir.display());
        return files_in_dir(dir, |name| matches_pattern(name, &pattern));
    }

    let path = Path::new(input);
    if !path.exists() {
        bail!("{input} does not exist");
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    debug!("input_files is a directory: {input}");
    files_in_dir(path, |_| true)
}

fn files_in_dir(dir: &Path, keep: impl Fn(&str) -> bool) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && keep(&path.file_name().unwrap_or_default().to_string_lossy()) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Matches a file name against a `*` pattern (greedy, left to right).
fn matches_pattern(name: &str, pattern: &str) -> bool {
    let mut parts = pattern.split('*');
    let mut rest = name;

    // The part before the first '*' anchors at the start
    match parts.next() {
        Some(prefix) => match rest.strip_prefix(prefix) {
            Some(stripped) => rest = stripped,
            None => return false,
        },
        None => return name.is_empty(),
    }

    let middles: Vec<&str> = parts.collect();
    let Some((last, middles)) = middles.split_last() else {
        // No '*' at all: the pattern is a plain name
        return rest.is_empty();
    };
    for part in middles {
        match rest.find(part) {
            Some(at) => rest = &rest[at + part.len()..],
            None => return false,
        }
    }
    rest.ends_with(last)
}
