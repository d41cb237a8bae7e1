//! CLI argument parsing for pdfdesk.
//!
//! This module defines the command-line interface structure using `clap`
//! and turns parsed arguments into a validated [`Config`].

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use pdfdesk::config::{
    CompressionLevel, Config, EditTask, JoinTask, NamesSource, OverwriteMode, PageRange,
    SelectTask, Task,
};
use pdfdesk::error::{PdfDeskError, Result};
use pdfdesk::utils::collect_paths_for_patterns;

/// Edit, join and batch-select PDF files.
#[derive(Parser, Debug)]
#[command(name = "pdfdesk")]
#[command(version)]
#[command(about = "Edit, join and batch-select PDF files", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Dry run - show what would be written without creating output
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Verbose output - show timings and sizes
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Overwrite an existing output file without asking
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Never overwrite an existing output file
    #[arg(long, global = true, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Compression level for the output PDF
    ///
    /// - none: write objects as they are
    /// - standard: compress streams and renumber objects (default)
    /// - maximum: also drop unreferenced objects
    #[arg(short, long, global = true, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Number of PDFs to load in parallel (default: number of CPU cores)
    #[arg(short, long, global = true, value_name = "N", env = "PDFDESK_JOBS")]
    pub jobs: Option<usize>,
}

/// The tool to run.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Delete pages from a PDF and save the rest
    ///
    /// Example:
    ///   pdfdesk edit report.pdf --delete 2,4
    Edit {
        /// PDF to edit
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Pages to delete (e.g., "2", "2,4", "5-7")
        #[arg(short, long, value_name = "RANGE")]
        delete: String,

        /// Output file (default: <name>-modified.pdf next to the input)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Join PDFs in the order given
    ///
    /// Examples:
    ///   pdfdesk join cover.pdf body.pdf -o book.pdf
    ///   pdfdesk join 'chapter*.pdf'
    Join {
        /// PDFs to join, in order; glob patterns are expanded
        #[arg(value_name = "FILE")]
        inputs: Vec<String>,

        /// Read more inputs from a file, one path per line ('-' for stdin)
        #[arg(long, value_name = "FILE")]
        input_list: Option<PathBuf>,

        /// Output file (default: derived from the input names)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Pick PDFs from a folder by name and join them in list order
    ///
    /// Example:
    ///   pdfdesk select --names wanted.txt --folder scans/
    Select {
        /// Text file with one PDF name per line ('-' for stdin)
        #[arg(long, value_name = "FILE")]
        names: PathBuf,

        /// Folder holding the PDFs
        #[arg(long, value_name = "DIR")]
        folder: PathBuf,

        /// Also look in subfolders
        #[arg(short, long)]
        recursive: bool,

        /// Refuse to join when any name is duplicated, ambiguous or missing
        #[arg(long)]
        strict: bool,

        /// Print the match report as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Output file (default: <first>_<second>_joined.pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// Join inputs are expanded here: glob patterns are resolved and the
    /// `--input-list` file is read and appended.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Compression level or page range is invalid
    /// - The input list cannot be read
    /// - Configuration validation fails
    pub async fn to_config(&self) -> Result<Config> {
        let compression = CompressionLevel::from_str(&self.global.compression)?;

        let overwrite_mode = if self.global.force {
            OverwriteMode::Force
        } else if self.global.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let task = match &self.command {
            Command::Edit {
                input,
                delete,
                output,
            } => Task::Edit(EditTask {
                input: input.clone(),
                delete: PageRange::parse(delete)
                    .map_err(|e| PdfDeskError::invalid_config(e.to_string()))?,
                output: output.clone(),
            }),
            Command::Join {
                inputs,
                input_list,
                output,
            } => Task::Join(JoinTask {
                inputs: self.get_all_inputs(inputs, input_list.as_deref()).await?,
                output: output.clone(),
            }),
            Command::Select {
                names,
                folder,
                recursive,
                strict,
                json,
                output,
            } => Task::Select(SelectTask {
                names: if names.as_os_str() == "-" {
                    NamesSource::Stdin
                } else {
                    NamesSource::File(names.clone())
                },
                folder: folder.clone(),
                recursive: *recursive,
                strict: *strict,
                json: *json,
                output: output.clone(),
            }),
        };

        let config = Config {
            task,
            dry_run: self.global.dry_run,
            verbose: self.global.verbose,
            quiet: self.global.quiet,
            overwrite_mode,
            compression,
            jobs: self.global.jobs,
        };

        config.validate().map_err(|e| {
            PdfDeskError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Join inputs from the command line followed by those of the input
    /// list.
    async fn get_all_inputs(
        &self,
        patterns: &[String],
        input_list: Option<&Path>,
    ) -> Result<Vec<PathBuf>> {
        let mut all_inputs = collect_paths_for_patterns(patterns)?;

        if let Some(path) = input_list {
            all_inputs.extend(read_input_list(path).await?);
        }

        if all_inputs.is_empty() {
            return Err(PdfDeskError::NoFilesToMerge);
        }

        Ok(all_inputs)
    }
}

/// Read input paths from a file, or stdin for `-`.
///
/// Lines starting with '#' are comments; blank lines are skipped.
pub async fn read_input_list(path: &Path) -> Result<Vec<PathBuf>> {
    if path.as_os_str() == "-" {
        let reader = BufReader::new(tokio::io::stdin());
        return parse_input_list(reader, path).await;
    }

    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| PdfDeskError::FailedToReadInputList {
            path: path.to_path_buf(),
            source: e,
        })?;

    parse_input_list(BufReader::new(file), path).await
}

async fn parse_input_list<R>(reader: R, path: &Path) -> Result<Vec<PathBuf>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut paths = Vec::new();
    let mut line_number = 0;

    while let Some(line) =
        lines
            .next_line()
            .await
            .map_err(|e| PdfDeskError::FailedToReadInputList {
                path: path.to_path_buf(),
                source: e,
            })?
    {
        line_number += 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.contains('\0') {
            return Err(PdfDeskError::InvalidInputList {
                path: path.to_path_buf(),
                line_number,
                details: "Path contains a NUL byte".to_string(),
            });
        }

        paths.push(PathBuf::from(line));
    }

    Ok(paths)
}
