//! Directory batch processing.
//!
//! Every `.pdf` file of an input directory is turned into one
//! `<stem>.json` outline in the output directory as soon as it has been
//! processed. A file that cannot be parsed, or whose parsing panics, is
//! logged and reported, and the batch moves on; failing to write an output
//! file aborts the batch.

use std::any::Any;
use std::ffi::OsString;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::detect::has_pdf_extension;
use crate::error::{Error, Result};
use crate::outline::HeuristicConfig;
use crate::parser::ParseOptions;
use crate::render::{write_json, JsonFormat};
use crate::OutlineExtractor;

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory scanned for PDF files (not recursive)
    pub input_dir: PathBuf,
    /// Directory receiving the JSON files, created if missing
    pub output_dir: PathBuf,
    /// Process documents on the rayon thread pool
    pub parallel: bool,
    /// Output JSON layout
    pub format: JsonFormat,
    /// Parser options applied to every document
    pub parse: ParseOptions,
    /// Heading heuristics applied to every document
    pub heuristics: HeuristicConfig,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::new("input", "output")
    }
}

impl BatchOptions {
    /// Create options for the given directories.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            parallel: true,
            format: JsonFormat::Pretty,
            parse: ParseOptions::default(),
            heuristics: HeuristicConfig::default(),
        }
    }

    /// Process documents one at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the output JSON layout.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Set parser options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Set heading heuristics.
    pub fn with_heuristics(mut self, heuristics: HeuristicConfig) -> Self {
        self.heuristics = heuristics;
        self
    }
}

/// A document that could not be processed.
#[derive(Debug)]
pub struct FileFailure {
    /// Input file
    pub path: PathBuf,
    /// Why it failed
    pub error: Error,
}

/// Outcome of a batch run, in file-name order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// JSON files written
    pub written: Vec<PathBuf>,
    /// Inputs skipped because of a document error
    pub failed: Vec<FileFailure>,
}

impl BatchReport {
    /// Number of documents processed successfully.
    pub fn succeeded(&self) -> usize {
        self.written.len()
    }

    /// Whether every document was processed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of input documents.
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// List the PDF files of a directory, sorted by file name.
pub fn list_pdf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Path of the JSON artifact for `input` inside `output_dir`.
///
/// Only the final `.pdf` extension is replaced: `a.b.pdf` maps to `a.b.json`.
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name: OsString = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    name.push(".json");
    output_dir.join(name)
}

/// Run a batch without progress reporting.
pub fn run(options: &BatchOptions) -> Result<BatchReport> {
    run_with_progress(options, |_| {})
}

/// Run a batch, calling `on_file` once each input has been processed.
///
/// `on_file` may be called from several threads and in any order. Each
/// output is written as soon as its document is done; the report lists
/// files in file-name order.
pub fn run_with_progress<F>(options: &BatchOptions, on_file: F) -> Result<BatchReport>
where
    F: Fn(&Path) + Sync,
{
    let files = list_pdf_files(&options.input_dir)?;
    log::info!(
        "Found {} PDF files in {}",
        files.len(),
        options.input_dir.display()
    );

    fs::create_dir_all(&options.output_dir).map_err(|source| Error::OutputWrite {
        path: options.output_dir.clone(),
        source,
    })?;

    let extractor = OutlineExtractor::new()
        .with_parse_options(options.parse.clone())
        .with_heuristics(options.heuristics.clone());

    let process = |path: &PathBuf| -> Result<FileOutcome> {
        let outcome = process_file(&extractor, path, options);
        on_file(path);
        outcome
    };

    // Collecting into a Result stops at the first fatal error
    let outcomes: Vec<FileOutcome> = if options.parallel {
        files.par_iter().map(process).collect::<Result<_>>()?
    } else {
        files.iter().map(process).collect::<Result<_>>()?
    };

    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            FileOutcome::Written(out) => report.written.push(out),
            FileOutcome::Failed(failure) => report.failed.push(failure),
        }
    }

    Ok(report)
}

enum FileOutcome {
    Written(PathBuf),
    Failed(FileFailure),
}

/// Extract one document and write its JSON.
///
/// Document errors become [`FileOutcome::Failed`]; anything else is fatal.
fn process_file(
    extractor: &OutlineExtractor,
    path: &Path,
    options: &BatchOptions,
) -> Result<FileOutcome> {
    match isolate(|| extractor.extract_file(path)) {
        Ok(outline) => {
            let out = output_path(path, &options.output_dir);
            write_json(&outline, &out, options.format)?;
            log::info!(
                "{} -> {} ({} headings)",
                path.display(),
                out.display(),
                outline.outline.len()
            );
            Ok(FileOutcome::Written(out))
        }
        Err(error) if error.is_document_error() => {
            log::warn!("Skipping {}: {}", path.display(), error);
            Ok(FileOutcome::Failed(FileFailure {
                path: path.to_path_buf(),
                error,
            }))
        }
        Err(error) => Err(error),
    }
}

/// Run `f`, turning a panic into a document error.
fn isolate<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        Err(Error::Other(format!(
            "panicked while processing: {}",
            panic_message(payload.as_ref())
        )))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_replaces_last_extension() {
        let out = Path::new("/out");
        assert_eq!(
            output_path(Path::new("/in/report.pdf"), out),
            PathBuf::from("/out/report.json")
        );
        assert_eq!(
            output_path(Path::new("/in/v1.2.PDF"), out),
            PathBuf::from("/out/v1.2.json")
        );
    }

    #[test]
    fn test_list_pdf_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "c.pdf.bak"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let files = list_pdf_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_missing_input_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let options = BatchOptions::new(dir.path().join("absent"), dir.path().join("out"));
        assert!(matches!(run(&options), Err(Error::Io(_))));
    }

    #[test]
    fn test_invalid_pdf_reported_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");
        fs::create_dir(&input).unwrap();
        fs::write(input.join("broken.pdf"), b"this is not a pdf").unwrap();

        let report = run(&BatchOptions::new(&input, &output).sequential()).unwrap();
        assert_eq!(report.succeeded(), 0);
        assert_eq!(report.failed.len(), 1);
        assert!(matches!(report.failed[0].error, Error::UnknownFormat));
        assert!(output.is_dir());
        assert!(!output.join("broken.json").exists());
    }

    #[test]
    fn test_isolate_turns_panic_into_document_error() {
        let err = isolate(|| -> Result<()> { panic!("bad xref stream") }).unwrap_err();
        assert!(matches!(&err, Error::Other(msg) if msg.contains("bad xref stream")));
        assert!(err.is_document_error());

        let err = isolate(|| -> Result<()> { panic!("object {} missing", 7) }).unwrap_err();
        assert!(err.to_string().contains("object 7 missing"));

        assert_eq!(isolate(|| Ok(3)).unwrap(), 3);
    }

    #[test]
    fn test_batch_options_builder() {
        let options = BatchOptions::default()
            .sequential()
            .with_format(JsonFormat::Compact)
            .with_parse_options(ParseOptions::new().lenient());
        assert_eq!(options.input_dir, PathBuf::from("input"));
        assert_eq!(options.output_dir, PathBuf::from("output"));
        assert!(!options.parallel);
        assert_eq!(options.format, JsonFormat::Compact);
        assert!(options.with_parallel(true).parallel);
    }
}
