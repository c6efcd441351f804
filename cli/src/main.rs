//! pdfoutline CLI - PDF title and heading outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{self, BatchOptions};
use pdfoutline::{render, HeuristicConfig, JsonFormat, OutlineExtractor, ParseOptions};

/// Exit status when some documents of a batch could not be processed.
const EXIT_PARTIAL: i32 = 2;
/// Exit status for errors that stop the run.
const EXIT_FATAL: i32 = 1;

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Extract PDF titles and H1-H3 heading outlines to JSON", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(flatten)]
    batch: BatchArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct BatchArgs {
    /// Directory containing the PDF files
    #[arg(value_name = "INPUT_DIR", env = "PDFOUTLINE_INPUT", default_value = "input")]
    input: PathBuf,

    /// Directory receiving one JSON file per PDF
    #[arg(value_name = "OUTPUT_DIR", env = "PDFOUTLINE_OUTPUT", default_value = "output")]
    output: PathBuf,

    #[command(flatten)]
    heuristics: HeuristicArgs,

    /// Process one document at a time
    #[arg(long)]
    sequential: bool,

    /// Keep pages whose content cannot be read instead of failing the file
    #[arg(long)]
    lenient: bool,

    /// Write compact JSON
    #[arg(long)]
    compact: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Args)]
struct HeuristicArgs {
    /// Heuristic configuration (JSON)
    #[arg(long, value_name = "FILE", env = "PDFOUTLINE_CONFIG")]
    config: Option<PathBuf>,
}

impl HeuristicArgs {
    fn load(&self) -> pdfoutline::Result<HeuristicConfig> {
        match &self.config {
            Some(path) => HeuristicConfig::from_json_file(path),
            None => Ok(HeuristicConfig::default()),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract outlines for every PDF in a directory
    Batch(BatchArgs),

    /// Extract the outline of one PDF
    Outline {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Keep pages whose content cannot be read
        #[arg(long)]
        lenient: bool,

        #[command(flatten)]
        heuristics: HeuristicArgs,
    },

    /// Dump the extracted spans of one PDF as JSON
    Spans {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Batch(args)) => cmd_batch(&args),
        Some(Commands::Outline {
            input,
            output,
            compact,
            lenient,
            heuristics,
        }) => cmd_outline(&input, output.as_deref(), compact, lenient, &heuristics).map(|_| true),
        Some(Commands::Spans { input, output }) => {
            cmd_spans(&input, output.as_deref()).map(|_| true)
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(true)
        }
        None => cmd_batch(&cli.batch),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(EXIT_PARTIAL),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            process::exit(EXIT_FATAL);
        }
    }
}

/// Run a directory batch. Returns whether every document succeeded.
fn cmd_batch(args: &BatchArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let mut parse = ParseOptions::new();
    if args.lenient {
        parse = parse.lenient();
    }
    let format = if args.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let options = BatchOptions::new(&args.input, &args.output)
        .with_parallel(!args.sequential)
        .with_format(format)
        .with_parse_options(parse)
        .with_heuristics(args.heuristics.load()?);

    let total = batch::list_pdf_files(&args.input)?.len();
    if total == 0 {
        println!(
            "{} {}",
            "No PDF files found in".yellow(),
            args.input.display()
        );
    }

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(total as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = batch::run_with_progress(&options, |path| {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        pb.set_message(name.into_owned());
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    println!(
        "{} {} of {} files -> {}",
        "Processed".green().bold(),
        report.succeeded(),
        report.total(),
        args.output.display()
    );

    if !report.failed.is_empty() {
        println!("\n{}", "Failed:".red().bold());
        for (i, failure) in report.failed.iter().enumerate() {
            let branch = if i + 1 == report.failed.len() {
                "└─"
            } else {
                "├─"
            };
            println!(
                "  {} {}: {}",
                branch.dimmed(),
                failure.path.display(),
                failure.error
            );
        }
    }

    Ok(report.is_success())
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    lenient: bool,
    heuristics: &HeuristicArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut extractor = OutlineExtractor::new().with_heuristics(heuristics.load()?);
    if lenient {
        extractor = extractor.lenient();
    }
    let outline = extractor.extract_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    if let Some(path) = output {
        render::write_json(&outline, path, format)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", render::to_json(&outline, format)?);
    }

    Ok(())
}

fn cmd_spans(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let doc = pdfoutline::parse_file(input)?;
    let json = render::to_json(&doc, JsonFormat::Pretty)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!(
            "{} {} ({} spans)",
            "Saved to".green(),
            path.display(),
            doc.span_count()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "pdfoutline".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("PDF title and heading outline extraction tool");
    println!();
    println!("License: MIT");
}
