//! PDF reading and loading operations.
//!
//! This module provides PDF loading with support for:
//! - Existence and file-type checks before parsing
//! - Sequential and parallel loading (results always in input order)
//! - Load statistics
//!
//! Parsing is delegated to `lopdf` and runs on a blocking task so the async
//! runtime stays responsive.
//!
//! # Examples
//!
//! ```no_run
//! use pdfdesk::io::reader::PdfReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let (results, stats) = reader.load_all(&paths, 4).await;
//! println!("{} of {} loaded", stats.success_count, results.len());
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{PdfDeskError, Result};
use crate::utils::{file_name_of, format_file_size};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    fn new(document: Document, path: PathBuf, file_size: u64, load_time: Duration) -> Self {
        let page_count = document.get_pages().len();

        Self {
            document,
            path,
            page_count,
            load_time,
            file_size,
        }
    }

    /// File name of the source, e.g. `report.pdf`.
    pub fn name(&self) -> String {
        file_name_of(&self.path)
    }
}

/// Result of a load operation (success or failure).
pub type LoadResult = Result<LoadedPdf>;

/// Statistics for a batch load operation.
#[derive(Debug, Clone)]
pub struct LoadStatistics {
    /// Number of PDFs successfully loaded.
    pub success_count: usize,

    /// Number of PDFs that failed to load.
    pub failure_count: usize,

    /// Total time taken for all loads.
    pub total_time: Duration,

    /// Average time per successful load.
    pub average_time: Duration,

    /// Total size of successfully loaded files.
    pub total_size: u64,

    /// Total number of pages loaded.
    pub total_pages: usize,
}

impl LoadStatistics {
    /// Create statistics from load results.
    pub fn from_results(results: &[LoadResult], total_time: Duration) -> Self {
        let mut success_count = 0;
        let mut failure_count = 0;
        let mut total_size = 0;
        let mut total_pages = 0;
        let mut total_load_time = Duration::ZERO;

        for result in results {
            match result {
                Ok(loaded) => {
                    success_count += 1;
                    total_size += loaded.file_size;
                    total_pages += loaded.page_count;
                    total_load_time += loaded.load_time;
                }
                Err(_) => {
                    failure_count += 1;
                }
            }
        }

        let average_time = if success_count > 0 {
            total_load_time / success_count as u32
        } else {
            Duration::ZERO
        };

        Self {
            success_count,
            failure_count,
            total_time,
            average_time,
            total_size,
            total_pages,
        }
    }

    /// Format total size as human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// PDF reader with configurable loading behavior.
#[derive(Debug, Clone, Copy)]
pub struct PdfReader {
    /// Reject documents without pages.
    verify: bool,
}

impl PdfReader {
    /// Create a new PDF reader with default settings.
    pub fn new() -> Self {
        Self { verify: true }
    }

    /// Create a reader that accepts documents without pages.
    pub fn without_verification() -> Self {
        Self { verify: false }
    }

    /// Check that `path` exists and is a regular file.
    ///
    /// # Errors
    ///
    /// [`PdfDeskError::FileNotFound`], [`PdfDeskError::NotAFile`] or
    /// [`PdfDeskError::FileNotAccessible`].
    pub async fn check_path(path: &Path) -> Result<u64> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                PdfDeskError::file_not_found(path.to_path_buf())
            } else {
                PdfDeskError::FileNotAccessible {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        if metadata.is_dir() {
            return Err(PdfDeskError::not_a_file(path.to_path_buf()));
        }

        Ok(metadata.len())
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or is a directory
    /// - File cannot be read
    /// - File is not a valid PDF
    /// - PDF is encrypted
    /// - PDF has no pages (when verifying)
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfdesk::io::reader::PdfReader;
    /// # use std::path::Path;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let reader = PdfReader::new();
    /// let loaded = reader.load(Path::new("document.pdf")).await?;
    /// println!("Loaded {} pages in {:?}", loaded.page_count, loaded.load_time);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();
        let start = Instant::now();

        let file_size = Self::check_path(path).await?;

        let bytes =
            tokio::fs::read(path)
                .await
                .map_err(|e| PdfDeskError::FileNotAccessible {
                    path: path_buf.clone(),
                    source: e,
                })?;

        let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes))
            .await
            .map_err(|e| PdfDeskError::other(format!("Load task failed: {e}")))?
            .map_err(|e| {
                let err_msg = e.to_string();
                let lowered = err_msg.to_lowercase();
                if lowered.contains("encrypt") || lowered.contains("password") {
                    PdfDeskError::encrypted_pdf(path_buf.clone())
                } else {
                    PdfDeskError::failed_to_load_pdf(path_buf.clone(), err_msg)
                }
            })?;

        if self.verify && doc.get_pages().is_empty() {
            return Err(PdfDeskError::corrupted_pdf(path_buf, "PDF has no pages"));
        }

        Ok(LoadedPdf::new(doc, path_buf, file_size, start.elapsed()))
    }

    /// Load multiple PDF documents one at a time, in order.
    pub async fn load_sequential(&self, paths: &[PathBuf]) -> Vec<LoadResult> {
        let mut results = Vec::with_capacity(paths.len());

        for path in paths {
            results.push(self.load(path).await);
        }

        results
    }

    /// Load multiple PDF documents with up to `workers` loads in flight.
    ///
    /// Results come back in the same order as `paths`.
    pub async fn load_parallel(&self, paths: &[PathBuf], workers: usize) -> Vec<LoadResult> {
        self.load_with_progress(paths, workers, |_, _| {}).await
    }

    /// Load all PDFs, choosing sequential loading for small batches.
    ///
    /// Returns the per-file results in input order and aggregate statistics.
    pub async fn load_all(
        &self,
        paths: &[PathBuf],
        max_workers: usize,
    ) -> (Vec<LoadResult>, LoadStatistics) {
        let start = Instant::now();

        let results = if paths.len() <= 3 {
            self.load_sequential(paths).await
        } else {
            self.load_parallel(paths, max_workers).await
        };

        let stats = LoadStatistics::from_results(&results, start.elapsed());

        (results, stats)
    }

    /// Load PDFs in parallel, calling `on_progress` as each result is
    /// delivered (in input order).
    pub async fn load_with_progress<F>(
        &self,
        paths: &[PathBuf],
        workers: usize,
        mut on_progress: F,
    ) -> Vec<LoadResult>
    where
        F: FnMut(usize, &LoadResult),
    {
        use futures::stream::{self, StreamExt};

        let reader = *self;
        let tasks = paths.iter().cloned().map(|path| async move {
            reader.load(&path).await
        });

        let mut ordered = stream::iter(tasks).buffered(workers.max(1));
        let mut results = Vec::with_capacity(paths.len());

        while let Some(result) = ordered.next().await {
            on_progress(results.len(), &result);
            results.push(result);
        }

        results
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}
