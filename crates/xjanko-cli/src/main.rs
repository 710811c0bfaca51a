//! xjanko CLI - Extract x-janko puzzle records and convert them to JSON
//!
//! Usage:
//!   xjanko [OPTIONS] <COMMAND>
//!
//! Commands:
//!   extract     Pull the embedded record out of a saved page or page tree
//!   parse       Parse one record file and print it
//!   batch       Convert one category directory to JSON Lines
//!   all         Convert every known category
//!   categories  List known categories
//!   check       Compare an input tree against the catalog

mod batch;
mod catalog;
mod error;
mod extract;
mod output;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use xjanko_core::parse_with_candidates_and_sink;

use crate::catalog::Catalog;
use crate::error::{CliError, Result};
use crate::output::JsonRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Extract x-janko puzzle records and convert them to JSON.
#[derive(Parser)]
#[command(name = "xjanko", version, about = "x-janko puzzle record extractor and converter")]
struct Cli {
    /// Output format for `parse` (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    format: OutputFormat,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull the embedded x-janko record out of a saved page or a page tree
    Extract {
        /// Path to the .htm page
        #[arg(required_unless_present = "input_dir", conflicts_with = "input_dir")]
        page: Option<PathBuf>,
        /// Write the record here instead of stdout
        #[arg(short, long, conflicts_with = "input_dir")]
        out: Option<PathBuf>,
        /// Extract every page below this directory
        #[arg(long, requires = "out_dir")]
        input_dir: Option<PathBuf>,
        /// Root of the mirrored .x-janko tree
        #[arg(long, requires = "input_dir")]
        out_dir: Option<PathBuf>,
    },

    /// Parse one record file with a category's candidate parsers
    Parse {
        /// Path to the record file
        file: PathBuf,
        /// Category path, e.g. /Sudoku
        #[arg(long)]
        category: String,
    },

    /// Convert every file of one category to JSON Lines
    Batch {
        /// Category path, e.g. /Sudoku
        category: String,
        /// Root of the extracted record tree
        #[arg(long)]
        input_dir: PathBuf,
        /// Output .jsonl file
        #[arg(long)]
        out: PathBuf,
    },

    /// Convert every catalog category found under the input tree
    All {
        /// Root of the extracted record tree
        #[arg(long)]
        input_dir: PathBuf,
        /// Directory for the .jsonl files
        #[arg(long)]
        out_dir: PathBuf,
    },

    /// List catalog categories and their candidate counts
    Categories,

    /// Report directories without a catalog entry and entries without files
    Check {
        /// Root of the extracted record tree
        #[arg(long)]
        input_dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Extract {
            page,
            out,
            input_dir,
            out_dir,
        } => match (page, input_dir, out_dir) {
            (Some(page), _, _) => cmd_extract(&page, out.as_deref()),
            (None, Some(input_dir), Some(out_dir)) => cmd_extract_tree(&input_dir, &out_dir),
            // clap requires a page or both directories
            (None, _, _) => Ok(()),
        },
        Commands::Parse { file, category } => cmd_parse(&file, &category, cli.format),
        Commands::Batch {
            category,
            input_dir,
            out,
        } => cmd_batch(&category, &input_dir, &out),
        Commands::All { input_dir, out_dir } => cmd_all(&input_dir, &out_dir),
        Commands::Categories => cmd_categories(),
        Commands::Check { input_dir } => cmd_check(&input_dir),
    }
}

// =============================================================================
// Extract Command
// =============================================================================

fn cmd_extract(page: &Path, out: Option<&Path>) -> Result<()> {
    let Some(record) = batch::read_page_record(page)? else {
        return Ok(());
    };
    match out {
        Some(path) => fs::write(path, record).map_err(|e| CliError::write(path, e))?,
        None => print!("{}", record),
    }
    Ok(())
}

fn cmd_extract_tree(input_dir: &Path, out_dir: &Path) -> Result<()> {
    let report = batch::run_extract_tree(input_dir, out_dir)?;

    println!(
        "wrote {} record(s) to {} ({} existing, {} without data, {} unsupported)",
        report.written,
        out_dir.display(),
        report.existing,
        report.missing.len(),
        report.unsupported.len()
    );
    Ok(())
}

// =============================================================================
// Parse Command
// =============================================================================

fn cmd_parse(file: &Path, category: &str, format: OutputFormat) -> Result<()> {
    let catalog = Catalog::builtin()?;
    let candidates = catalog
        .get(category)
        .ok_or_else(|| CliError::UnknownCategory(category.to_string()))?;

    let bytes = fs::read(file).map_err(|e| CliError::read(file, e))?;
    let input = String::from_utf8_lossy(&bytes);
    let sink = |message: &str| tracing::warn!("{}", message);

    let accepted = parse_with_candidates_and_sink(candidates, &input, &sink).map_err(
        |failures| CliError::NotParsed {
            path: file.to_path_buf(),
            failures,
        },
    )?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&JsonRecord(&accepted.record))?);
        }
        OutputFormat::Text => {
            println!("Parser: {} of {}", accepted.index, candidates.len());
            print!("{}", output::summarize(&accepted.record));
        }
    }
    Ok(())
}

// =============================================================================
// Batch Commands
// =============================================================================

fn cmd_batch(category: &str, input_dir: &Path, out: &Path) -> Result<()> {
    let catalog = Catalog::builtin()?;
    let report = batch::run_batch(&catalog, category, input_dir, out)?;

    print_report(&report, out);
    if report.failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::BatchFailed {
            count: report.failed.len(),
        })
    }
}

fn cmd_all(input_dir: &Path, out_dir: &Path) -> Result<()> {
    let catalog = Catalog::builtin()?;
    let reports = batch::run_all(&catalog, input_dir, out_dir)?;

    let mut failed = 0;
    for (category, report) in &reports {
        println!("== {}", category);
        print_report(report, &out_dir.join(batch::output_name(category)));
        failed += report.failed.len();
    }

    if failed == 0 {
        Ok(())
    } else {
        Err(CliError::BatchFailed { count: failed })
    }
}

fn print_report(report: &batch::BatchReport, out: &Path) {
    println!("failed files ({}):", report.failed.len());
    for file in &report.failed {
        println!("{}", file);
    }
    println!("wrote {} ({} objects)", out.display(), report.written);
}

// =============================================================================
// Catalog Commands
// =============================================================================

fn cmd_categories() -> Result<()> {
    let catalog = Catalog::builtin()?;
    for (category, count) in catalog.categories() {
        println!("{:<32} {}", category, count);
    }
    println!();
    println!("{} categories", catalog.len());
    Ok(())
}

fn cmd_check(input_dir: &Path) -> Result<()> {
    let catalog = Catalog::builtin()?;
    let report = batch::run_check(&catalog, input_dir)?;

    for dir in &report.unlisted {
        println!("no catalog entry: {}", dir);
    }
    for category in &report.empty {
        println!("no files: {}", category);
    }
    for dir in &report.unknown_empty {
        println!("unknown empty directory: {}", dir);
    }
    if report.is_clean() {
        println!("catalog matches {}", input_dir.display());
    }
    Ok(())
}
