//! Configuration module for pdfdesk.
//!
//! This module turns CLI arguments into a validated configuration that
//! drives one of the three tools. It handles:
//! - Validation of argument combinations
//! - Parsing of page lists for the editor
//! - Application of defaults
//!
//! Configuration is built once per invocation and never shared globally.

use anyhow::{Context, Result, bail};

use crate::PdfDeskError;
use std::{path::PathBuf, str::FromStr};

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - preserves exact quality and structure.
    None,
    /// Balanced compression - good trade-off between size and processing time.
    #[default]
    Standard,
    /// Maximum compression - also prunes unreferenced objects.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfDeskError;

    /// Parse compression level from "none", "standard" or "maximum".
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfDeskError::InvalidConfig {
                message: format!(
                    "Invalid compression level: {s}. Must be one of: none, standard, maximum"
                ),
            }),
        }
    }
}

/// Page list specification, e.g. the pages to delete in the editor.
///
/// Supports individual pages and ranges:
/// - "1" - single page
/// - "1-5" - range of pages (inclusive)
/// - "1,3,5" - multiple individual pages
/// - "1-5,10-15" - combination of ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    ranges: Vec<PageRangeItem>,
    source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PageRangeItem {
    Single(u32),
    Range(u32, u32),
}

impl PageRange {
    /// Parse a page range string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string format is invalid or contains invalid page numbers.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfdesk::config::PageRange;
    ///
    /// let range = PageRange::parse("1-5,10").unwrap();
    /// assert!(range.contains(3));
    /// assert!(range.contains(10));
    /// assert!(!range.contains(7));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let mut ranges = Vec::new();

        for part in s.split(',') {
            let part = part.trim();

            if part.contains('-') {
                let parts: Vec<&str> = part.split('-').collect();
                if parts.len() != 2 {
                    bail!("Invalid page range format: {part}. Expected format like '1-5'");
                }

                let start: u32 = parts[0]
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid page number: {}", parts[0]))?;

                let end: u32 = parts[1]
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid page number: {}", parts[1]))?;

                if start == 0 || end == 0 {
                    bail!("Page numbers must be positive (1-indexed)");
                }

                if start > end {
                    bail!(
                        "Invalid range {start}-{end}: start page must be less than or equal to end page"
                    );
                }

                ranges.push(PageRangeItem::Range(start, end));
            } else {
                let page: u32 = part
                    .parse()
                    .with_context(|| format!("Invalid page number: {part}"))?;

                if page == 0 {
                    bail!("Page numbers must be positive (1-indexed)");
                }

                ranges.push(PageRangeItem::Single(page));
            }
        }

        if ranges.is_empty() {
            bail!("Page range cannot be empty");
        }

        Ok(Self {
            ranges,
            source: s.trim().to_string(),
        })
    }

    /// Check if a page number is included in this range.
    pub fn contains(&self, page: u32) -> bool {
        self.ranges.iter().any(|item| match item {
            PageRangeItem::Single(p) => *p == page,
            PageRangeItem::Range(start, end) => page >= *start && page <= *end,
        })
    }

    /// Highest page number the range refers to.
    pub fn max_page(&self) -> u32 {
        self.ranges
            .iter()
            .map(|item| match item {
                PageRangeItem::Single(p) => *p,
                PageRangeItem::Range(_, end) => *end,
            })
            .max()
            .unwrap_or(0)
    }

    /// Sorted, deduplicated 1-indexed pages of this range up to `max_pages`.
    pub fn to_pages(&self, max_pages: u32) -> Vec<u32> {
        (1..=max_pages).filter(|p| self.contains(*p)).collect()
    }

    /// The range as it was written.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Where the selector reads its list of names from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamesSource {
    /// Read names from standard input.
    Stdin,
    /// Read names from a text file.
    File(PathBuf),
    /// Names given directly, newline-separated.
    Inline(String),
}

/// Settings for the page-deletion editor.
#[derive(Debug, Clone)]
pub struct EditTask {
    /// PDF to edit.
    pub input: PathBuf,
    /// Pages to delete.
    pub delete: PageRange,
    /// Explicit output path; computed from the input name when absent.
    pub output: Option<PathBuf>,
}

/// Settings for the multi-file joiner.
#[derive(Debug, Clone)]
pub struct JoinTask {
    /// PDFs to join, in order.
    pub inputs: Vec<PathBuf>,
    /// Explicit output path; computed from the input names when absent.
    pub output: Option<PathBuf>,
}

/// Settings for the name-based selector.
#[derive(Debug, Clone)]
pub struct SelectTask {
    /// Source of the target names.
    pub names: NamesSource,
    /// Folder holding the candidate PDFs.
    pub folder: PathBuf,
    /// Descend into subfolders when listing candidates.
    pub recursive: bool,
    /// Refuse to join when the report lists any problem.
    pub strict: bool,
    /// Print the reconciliation report as JSON.
    pub json: bool,
    /// Explicit output path; computed from the matched names when absent.
    pub output: Option<PathBuf>,
}

/// The tool a run drives.
#[derive(Debug, Clone)]
pub enum Task {
    /// Delete pages from one PDF.
    Edit(EditTask),
    /// Join a list of PDFs.
    Join(JoinTask),
    /// Select PDFs from a folder by name and join them.
    Select(SelectTask),
}

impl Task {
    /// Explicit output path, if one was given.
    pub fn output(&self) -> Option<&PathBuf> {
        match self {
            Self::Edit(task) => task.output.as_ref(),
            Self::Join(task) => task.output.as_ref(),
            Self::Select(task) => task.output.as_ref(),
        }
    }
}

/// Complete configuration for one pdfdesk run.
#[derive(Debug, Clone)]
pub struct Config {
    /// What to do.
    pub task: Task,

    /// Dry run mode - report without creating output.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for output.
    pub compression: CompressionLevel,

    /// Number of parallel jobs for loading (None = auto-detect).
    pub jobs: Option<usize>,
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - Jobs count is zero
    /// - The join list is empty
    /// - The output path is also an input
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            bail!("Number of jobs must be at least 1");
        }

        match &self.task {
            Task::Edit(task) => {
                if task.output.as_ref() == Some(&task.input) {
                    bail!(
                        "Output file cannot be the same as the input file: {}",
                        task.input.display()
                    );
                }
            }
            Task::Join(task) => {
                if task.inputs.is_empty() {
                    bail!("No input files specified");
                }

                if let Some(output) = &task.output
                    && task.inputs.contains(output)
                {
                    bail!(
                        "Output file cannot be the same as an input file: {}",
                        output.display()
                    );
                }
            }
            Task::Select(task) => {
                if task.folder.as_os_str().is_empty() {
                    bail!("No folder specified");
                }
            }
        }

        Ok(())
    }

    /// Get the effective number of parallel jobs.
    ///
    /// Returns the configured job count, or the number of CPU cores if auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}
