//! notion2md-batch: Batch conversion of Notion block exports to Markdown
//!
//! This crate provides the file-level side of the converter:
//! - Reading a list of changed export files
//! - Deriving output paths (`_raw/foo/bar.json` -> `foo/bar.md`)
//! - Converting each file, reporting per-file outcomes without aborting the batch
//!
//! This crate is designed to be used by various interfaces (CLI, CI hooks, etc.)

use notion2md_core::{DocumentOptions, ParseError, convert_with_options};
use rayon::prelude::*;
use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Errors that can occur while converting a single file
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error in {file}: {source}")]
    Parse {
        file: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Result type for batch operations
pub type Result<T> = std::result::Result<T, BatchError>;

/// Options for batch conversion
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Prefix stripped from input paths when deriving output paths (default: `_raw`)
    pub input_root: PathBuf,
    /// Extension of export files; other list entries are ignored (default: `json`)
    pub input_extension: String,
    /// Directory output paths are joined onto (default: empty, i.e. relative to the working directory)
    pub output_dir: PathBuf,
    /// Extension for output files (default: `md`)
    pub output_extension: String,
    /// Document assembly options
    pub document: DocumentOptions,
    /// Number of parallel jobs (None or 1 = sequential, 0 = all CPUs)
    pub parallel_jobs: Option<usize>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from("_raw"),
            input_extension: "json".to_string(),
            output_dir: PathBuf::new(),
            output_extension: "md".to_string(),
            document: DocumentOptions::default(),
            parallel_jobs: None,
        }
    }
}

/// Outcome of processing a single listed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Converted successfully
    Converted { input: PathBuf, output: PathBuf },
    /// Listed path does not exist
    Skipped(PathBuf),
    /// Reading, parsing, or writing failed
    Failed { input: PathBuf, message: String },
}

/// Result of a batch conversion, in input order
#[derive(Debug, Default)]
pub struct BatchResult {
    pub outcomes: Vec<Outcome>,
}

impl BatchResult {
    /// `(input, output)` pairs of converted files
    pub fn converted(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.outcomes.iter().filter_map(|o| match o {
            Outcome::Converted { input, output } => Some((input.as_path(), output.as_path())),
            _ => None,
        })
    }

    /// Paths that were skipped because they do not exist
    pub fn skipped(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.iter().filter_map(|o| match o {
            Outcome::Skipped(path) => Some(path.as_path()),
            _ => None,
        })
    }

    /// `(input, message)` pairs of failed files
    pub fn failed(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            Outcome::Failed { input, message } => Some((input.as_path(), message.as_str())),
            _ => None,
        })
    }

    pub fn converted_count(&self) -> usize {
        self.converted().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }
}

/// Read a newline-separated list of changed files
///
/// Lines are trimmed; blank lines and lines not ending in `.{extension}` are dropped.
pub fn read_changed_list(path: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let file = fs::File::open(path)?;
    read_changed_list_from(std::io::BufReader::new(file), extension)
}

/// Read a changed-file list from any reader (e.g. stdin)
pub fn read_changed_list_from<R: BufRead>(reader: R, extension: &str) -> Result<Vec<PathBuf>> {
    let suffix = format!(".{}", extension);
    let mut files = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let entry = line.trim();
        if entry.is_empty() {
            continue;
        }

        // Suffix match, so a bare `_raw/.json` still counts
        if entry.ends_with(&suffix) {
            files.push(PathBuf::from(entry));
        }
    }

    Ok(files)
}

/// Derive the output path for an export file
///
/// Strips `input_root` when the path starts with it, swaps the extension, and
/// joins the result onto `output_dir`.
pub fn derive_output_path(input: &Path, options: &BatchOptions) -> PathBuf {
    let relative = input.strip_prefix(&options.input_root).unwrap_or(input);
    options
        .output_dir
        .join(relative)
        .with_extension(&options.output_extension)
}

/// Convert one export file and write the Markdown output
///
/// Parent directories of `output` are created as needed.
pub fn convert_file(input: &Path, output: &Path, options: &DocumentOptions) -> Result<()> {
    let content = fs::read_to_string(input)?;

    let markdown = convert_with_options(&content, options).map_err(|source| BatchError::Parse {
        file: input.to_path_buf(),
        source,
    })?;

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    fs::write(output, markdown)?;

    Ok(())
}

/// Convert every listed file
///
/// Missing paths are skipped and failures are recorded; neither stops the
/// remaining files from being converted. Outcomes keep the order of `files`
/// even when converting in parallel.
pub fn convert_batch(files: &[PathBuf], options: &BatchOptions) -> BatchResult {
    let outcomes: Vec<Outcome> = match options.parallel_jobs {
        None | Some(1) => files
            .iter()
            .map(|file| process_file(file, options))
            .collect(),
        Some(n) => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
            Ok(pool) => pool.install(|| {
                files
                    .par_iter()
                    .map(|file| process_file(file, options))
                    .collect()
            }),
            Err(e) => {
                tracing::warn!("Failed to build thread pool ({}), converting sequentially", e);
                files
                    .iter()
                    .map(|file| process_file(file, options))
                    .collect()
            }
        },
    };

    BatchResult { outcomes }
}

/// Convert a single listed file into an outcome
fn process_file(input: &Path, options: &BatchOptions) -> Outcome {
    if !input.exists() {
        tracing::warn!("Skipping missing file: {}", input.display());
        return Outcome::Skipped(input.to_path_buf());
    }

    let output = derive_output_path(input, options);
    tracing::debug!("Converting: {} -> {}", input.display(), output.display());

    match convert_file(input, &output, &options.document) {
        Ok(()) => Outcome::Converted {
            input: input.to_path_buf(),
            output,
        },
        Err(e) => {
            tracing::warn!("Failed to convert {}: {}", input.display(), e);
            Outcome::Failed {
                input: input.to_path_buf(),
                message: e.to_string(),
            }
        }
    }
}
